//! Merging signatures collected by several parties.

use crate::{decode_hex, fee_payer, sender};
use assert_matches::assert_matches;
use klay_primitives::{
    address, hex, SignatureData, Signer, Transaction, TransactionBuilder, TransactionError,
    TxType, U256,
};

const SIGNED_BY_SECOND: &str = "0x08f87f3a8505d21dba0083015f90948723590d5d60e35f7ce0db5c09d3938b26ff80ae01947d0104ac150f749d36bb34999bcade9f2c0bd2e6f847f845820feaa0c24227c8128652d4ec039950d9cfa82c3f962c4f4dee61e54236bdf89cbff8e9a04522134ef899ba136a668afd4ae76bd00bb19c0dc5ff66d7492a6a2a506021c2";
const SIGNED_BY_THIRD: &str = "0x08f87f3a8505d21dba0083015f90948723590d5d60e35f7ce0db5c09d3938b26ff80ae01947d0104ac150f749d36bb34999bcade9f2c0bd2e6f847f845820fe9a0c9845154419b26dcb7700b4856c38f6e272004654ac3f38e9663134863600c52a05671961420adee43ee4538cba0200e82ff3c939c81e7d6f977660546b06d6914";
const COMBINED: &str = "0x08f9010d3a8505d21dba0083015f90948723590d5d60e35f7ce0db5c09d3938b26ff80ae01947d0104ac150f749d36bb34999bcade9f2c0bd2e6f8d5f845820feaa03d820b27d0997baf16f98df01c7b2b2e9734ad05b2228c4d403c2facff8397f3a01f4a44eeb8b7f0b0019162d1d6b90c401078e56fcd7495e74f7cfcd37e25f017f845820feaa0c24227c8128652d4ec039950d9cfa82c3f962c4f4dee61e54236bdf89cbff8e9a04522134ef899ba136a668afd4ae76bd00bb19c0dc5ff66d7492a6a2a506021c2f845820fe9a0c9845154419b26dcb7700b4856c38f6e272004654ac3f38e9663134863600c52a05671961420adee43ee4538cba0200e82ff3c939c81e7d6f977660546b06d6914";

const SENDER_SIGNED: &str = "0x0af886018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a9431e7c5218f810af8ad1e50bf207de0cfb5bd45261ef847f845820feaa0a832e241979ee7a3e08b49d7a7e8f8029982ee5502c7f970a8fe2676fe1b1084a044ded5739de93803b37790bb323f5020de50850b7b7cdc9a6a2e23a29a8cc14580c4c3018080";
const FEE_PAYER_SIGNED: &str = "0x0af89a018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a9431e7c5218f810af8ad1e50bf207de0cfb5bd45261ec4c30180809412dbe69692cb021bc1f161dd5abc0507bd1493cef847f845820fe9a00c438aba938ee678761ccde71696518d40ed0669c420aaedf66952af0f4eafaaa029354a82fe53b4971b745acd837e0182b7df7e03c6e77821e508669b6a0a6390";

fn u256(hex: &str) -> U256 {
    U256::from_be_slice(&decode_hex(hex))
}

fn multisig_value_transfer(value: &str) -> TransactionBuilder {
    TransactionBuilder::new(TxType::ValueTransfer)
        .from("0x7d0104ac150f749d36bb34999bcade9f2c0bd2e6")
        .unwrap()
        .to("0x8723590d5D60e35f7cE0Db5C09D3938b26fF80Ae")
        .unwrap()
        .value(value)
        .unwrap()
        .gas("90000")
        .unwrap()
        .chain_id("2019")
        .unwrap()
        .signatures(vec![SignatureData::new(
            0x0fea,
            u256("3d820b27d0997baf16f98df01c7b2b2e9734ad05b2228c4d403c2facff8397f3"),
            u256("1f4a44eeb8b7f0b0019162d1d6b90c401078e56fcd7495e74f7cfcd37e25f017"),
        )])
}

#[test]
fn combines_sender_signatures() {
    klay_tracing::init_test_tracing();

    let mut tx = multisig_value_transfer("0x1")
        .nonce("0x3a")
        .unwrap()
        .gas_price("0x5d21dba00")
        .unwrap()
        .build()
        .unwrap();
    let combined = tx
        .combine_signed_raw_transactions(&[
            decode_hex(SIGNED_BY_SECOND),
            decode_hex(SIGNED_BY_THIRD),
        ])
        .unwrap();
    assert_eq!(hex::encode_prefixed(&combined), COMBINED);
    assert_eq!(tx.signatures().len(), 3);
    assert_eq!(tx.raw_transaction_hex().unwrap(), COMBINED);

    // combining again only finds duplicates
    let again = tx.combine_signed_raw_transactions(&[decode_hex(COMBINED)]).unwrap();
    assert_eq!(again, combined);
}

#[test]
fn combine_takes_unset_fields_from_candidates() {
    let mut tx = multisig_value_transfer("0x1").build().unwrap();
    assert_eq!(tx.nonce(), None);
    assert_eq!(tx.gas_price(), None);

    let combined = tx
        .combine_signed_raw_transactions(&[
            decode_hex(SIGNED_BY_SECOND),
            decode_hex(SIGNED_BY_THIRD),
        ])
        .unwrap();
    assert_eq!(hex::encode_prefixed(combined), COMBINED);
    assert_eq!(tx.nonce(), Some(0x3a));
    assert_eq!(tx.gas_price(), Some(0x5d21dba00));
    assert_eq!(tx.chain_id(), Some(2019));
}

#[test]
fn conflicting_candidate_leaves_transaction_unchanged() {
    let mut tx = multisig_value_transfer("0x1000").build().unwrap();
    let before = tx.clone();
    assert_matches!(
        tx.combine_signed_raw_transactions(&[
            decode_hex(SIGNED_BY_SECOND),
            decode_hex(SIGNED_BY_THIRD),
        ]),
        Err(TransactionError::TransactionConflict { tx_type: TxType::ValueTransfer, candidate: 0 })
    );
    assert_eq!(tx, before);
}

#[test]
fn combine_rejects_other_types() {
    let mut tx = TransactionBuilder::new(TxType::FeeDelegatedValueTransfer)
        .from("0x7d0104ac150f749d36bb34999bcade9f2c0bd2e6")
        .unwrap()
        .to("0x8723590d5D60e35f7cE0Db5C09D3938b26fF80Ae")
        .unwrap()
        .gas("90000")
        .unwrap()
        .build()
        .unwrap();
    assert_matches!(
        tx.combine_signed_raw_transactions(&[decode_hex(SIGNED_BY_SECOND)]),
        Err(TransactionError::TypeTagMismatch {
            expected: TxType::FeeDelegatedValueTransfer,
            got: 0x08
        })
    );
    assert_matches!(
        tx.combine_signed_raw_transactions(&[vec![0x09, 0xc0, 0x00]]),
        Err(TransactionError::MalformedEncoding(_))
    );
    assert!(tx.signatures().is_empty());
}

#[test]
fn combines_sender_and_fee_payer_signatures() {
    let mut tx = TransactionBuilder::new(TxType::FeeDelegatedValueTransferWithRatio)
        .from("0x31e7c5218f810af8ad1e50bf207de0cfb5bd4526")
        .unwrap()
        .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
        .unwrap()
        .value("0xa")
        .unwrap()
        .gas("0xf4240")
        .unwrap()
        .nonce("0x1")
        .unwrap()
        .gas_price("0x5d21dba00")
        .unwrap()
        .chain_id("0x7e3")
        .unwrap()
        .fee_ratio("30")
        .unwrap()
        .build()
        .unwrap();

    let combined = tx
        .combine_signed_raw_transactions(&[
            decode_hex(SENDER_SIGNED),
            decode_hex(FEE_PAYER_SIGNED),
        ])
        .unwrap();
    assert_eq!(tx.signatures().len(), 1);
    assert_eq!(tx.fee_payer_signatures().map(|signatures| signatures.len()), Some(1));
    assert_eq!(tx.fee_payer(), Some(address!("12dbe69692cb021bc1f161dd5abc0507bd1493ce")));
    assert_eq!(tx.fee_ratio().map(|ratio| ratio.get()), Some(30));

    let decoded = Transaction::decode(&combined).unwrap();
    assert!(decoded.compare_fields(&tx, true));
    assert_eq!(decoded.signatures().first().map(|signature| signature.v), Some(0x0fea));
    assert_eq!(decoded.chain_id(), None);
}

#[test]
fn combines_signatures_made_locally() {
    let builder = TransactionBuilder::new(TxType::FeeDelegatedSmartContractExecution)
        .from("0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b")
        .unwrap()
        .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
        .unwrap()
        .input("0x6353586b000000000000000000000000bc5951f055a85f41a3b62fd6f68ab7de76d299b2")
        .unwrap()
        .gas("0xf4240")
        .unwrap()
        .nonce("0x4d2")
        .unwrap()
        .gas_price("0x19")
        .unwrap()
        .chain_id("0x1")
        .unwrap();

    let mut by_sender = builder.clone().build().unwrap();
    by_sender.sign(&sender()).unwrap();
    let mut by_fee_payer = builder.clone().build().unwrap();
    by_fee_payer.sign_as_fee_payer(&fee_payer()).unwrap();

    let mut tx = builder.build().unwrap();
    tx.combine_signed_raw_transactions(&[
        by_sender.full_encoding().unwrap(),
        by_fee_payer.full_encoding().unwrap(),
    ])
    .unwrap();
    assert_eq!(tx.fee_payer(), Some(fee_payer().address()));
    assert_eq!(tx.recover_signers().unwrap(), vec![sender().address()]);
    assert_eq!(tx.recover_fee_payers().unwrap(), vec![fee_payer().address()]);
}

#[test]
fn single_signature_types_do_not_accumulate() {
    let builder = TransactionBuilder::new(TxType::EthereumAccessList)
        .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
        .unwrap()
        .gas("0x5208")
        .unwrap()
        .nonce("0x0")
        .unwrap()
        .gas_price("0x5d21dba00")
        .unwrap()
        .chain_id("0x2710")
        .unwrap();
    let mut signed = builder.clone().build().unwrap();
    signed.sign(&sender()).unwrap();
    let raw = signed.full_encoding().unwrap();

    let mut tx = builder.build().unwrap();
    tx.combine_signed_raw_transactions(&[raw.clone()]).unwrap();
    assert_eq!(tx.signatures(), signed.signatures());

    assert_matches!(
        tx.combine_signed_raw_transactions(&[raw]),
        Err(TransactionError::SignatureCapacityExceeded { existing: true, .. })
    );
    assert_eq!(tx.signatures(), signed.signatures());
}
