//! Reference vectors produced by the canonical client of the chain.

use crate::{decode_hex, fee_payer, sender};
use klay_primitives::{
    address, b256, hex, Signer, SignatureData, Transaction, TransactionBuilder, TxType, U256,
};

const FROM: &str = "0xa94f5374Fce5edBC8E2a8697C15331677e6EbF0B";
const TO: &str = "0x7b65b75d204abed71587c9e519a89277766ee1d0";
const FEE_PAYER: &str = "0x5A0043070275d9f6054307Ee7348bD660849D90f";
const ACCOUNT_KEY: &str = "0x02a1033a514176466fa815ed481ffad09110a2d344f6c9b78c1d14afc351c3a51be33d";

const VALUE_TRANSFER: &str = "0x08f87a8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0bf845f84325a0f3d0cd43661cabf53425535817c5058c27781f478cb5459874feaa462ed3a29aa06748abe186269ff10b8100a4b7d7fea274b53ea2905acbf498dc8b5ab1bf4fbc";

const FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO: &str = "0x0af8d78204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b1ef845f84325a0dde32b8241f039a82b124fe94d3e556eb08f0d6f26d07dcc0f3fca621f1090caa01c8c336b358ab6d3a2bbf25de2adab4d01b754e2fb3b9b710069177d54c1e956945a0043070275d9f6054307ee7348bd660849d90ff845f84326a0091ecf53f91bb97bb694f2f2443f3563ac2b646d651497774524394aae396360a044228b88f275aa1ec1bab43681d21dc7e3a676786ed1906f6841d0a1a188f88a";

/// Value transfer of nothing on the test network, signed once by the sender.
const TESTNET_VALUE_TRANSFER: &str = "0x08f87e808505d21dba00825208947b65b75d204abed71587c9e519a89277766ee1d08094a94f5374fce5edbc8e2a8697c15331677e6ebf0bf847f8458207f6a0449fff25fffa82722172a5940dc79719e01c327db83bb5226302fed0cb352755a00fc178f2cdf13fe764d77de47c20ec6c3ec54e1767997a4536ad55b0f0ae2f28";

fn u256(hex: &str) -> U256 {
    U256::from_be_slice(&decode_hex(hex))
}

/// Common fields of every reference vector.
fn reference(tx_type: TxType) -> TransactionBuilder {
    TransactionBuilder::new(tx_type)
        .nonce("0x4D2")
        .unwrap()
        .gas_price("0x19")
        .unwrap()
        .gas("0xf4240")
        .unwrap()
        .chain_id("0x1")
        .unwrap()
}

fn value_transfer() -> Transaction {
    reference(TxType::ValueTransfer)
        .from(FROM)
        .unwrap()
        .to(TO)
        .unwrap()
        .value("0xa")
        .unwrap()
        .signatures(vec![SignatureData::new(
            0x25,
            u256("f3d0cd43661cabf53425535817c5058c27781f478cb5459874feaa462ed3a29a"),
            u256("6748abe186269ff10b8100a4b7d7fea274b53ea2905acbf498dc8b5ab1bf4fbc"),
        )])
        .build()
        .unwrap()
}

fn fee_delegated_value_transfer_with_ratio() -> Transaction {
    reference(TxType::FeeDelegatedValueTransferWithRatio)
        .from(FROM)
        .unwrap()
        .to(TO)
        .unwrap()
        .value("0xa")
        .unwrap()
        .fee_ratio("30")
        .unwrap()
        .fee_payer(FEE_PAYER)
        .unwrap()
        .signatures(vec![SignatureData::new(
            0x25,
            u256("dde32b8241f039a82b124fe94d3e556eb08f0d6f26d07dcc0f3fca621f1090ca"),
            u256("1c8c336b358ab6d3a2bbf25de2adab4d01b754e2fb3b9b710069177d54c1e956"),
        )])
        .fee_payer_signatures(vec![SignatureData::new(
            0x26,
            u256("091ecf53f91bb97bb694f2f2443f3563ac2b646d651497774524394aae396360"),
            u256("44228b88f275aa1ec1bab43681d21dc7e3a676786ed1906f6841d0a1a188f88a"),
        )])
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn value_transfer_encoding() {
    let tx = value_transfer();
    assert_eq!(tx.raw_transaction_hex().unwrap(), VALUE_TRANSFER);
    assert_eq!(
        tx.transaction_hash().unwrap(),
        b256!("762f130342569e9669a4d8547f1248bd2554fbbf3062d63a97ce28bfa97aa9d7")
    );
    assert_eq!(tx.sender_tx_hash().unwrap(), tx.transaction_hash().unwrap());
    assert_eq!(
        hex::encode_prefixed(tx.signature_base_encoding().unwrap()),
        "0xf839b5f4088204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b018080"
    );
}

#[test]
fn value_transfer_decoding() {
    let decoded = Transaction::decode(&decode_hex(VALUE_TRANSFER)).unwrap();
    assert_eq!(decoded.tx_type(), TxType::ValueTransfer);
    assert_eq!(decoded.from(), Some(address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b")));
    assert_eq!(decoded.nonce(), Some(1234));
    assert_eq!(decoded.value(), U256::from(10));
    // native encodings do not carry the chain id
    assert_eq!(decoded.chain_id(), None);
    assert!(decoded.compare_fields(&value_transfer(), true));
    assert_eq!(decoded.raw_transaction_hex().unwrap(), VALUE_TRANSFER);
}

#[test]
fn value_transfer_signature_recovers_sender() {
    assert_eq!(value_transfer().recover_signers().unwrap(), vec![sender().address()]);

    // the chain id is taken from `v` when the decoded transaction does not know it
    let decoded = Transaction::decode(&decode_hex(VALUE_TRANSFER)).unwrap();
    assert_eq!(decoded.recover_signers().unwrap(), vec![sender().address()]);
}

#[test]
fn testnet_value_transfer_signed_once() {
    let mut tx = TransactionBuilder::new(TxType::ValueTransfer)
        .nonce("0x0")
        .unwrap()
        .gas_price("0x5d21dba00")
        .unwrap()
        .gas("0x5208")
        .unwrap()
        .to(TO)
        .unwrap()
        .value("0x0")
        .unwrap()
        .from(FROM)
        .unwrap()
        .chain_id("0x3e9")
        .unwrap()
        .build()
        .unwrap();
    tx.sign(&sender()).unwrap();
    assert_eq!(tx.signatures().first().map(|signature| signature.v), Some(0x07f6));
    assert_eq!(
        tx.signature_hash().unwrap(),
        b256!("a681adc5ee535bc72848e001b5f033ffdae43809c8baa1e3d87e88d99f3c0939")
    );
    assert_eq!(tx.raw_transaction_hex().unwrap(), TESTNET_VALUE_TRANSFER);
    let sender_tx_hash = b256!("e79f313316f5557fd4edcb06ba708f43792b46b34510aa98a1a0d2da3e4b8394");
    assert_eq!(tx.sender_tx_hash().unwrap(), sender_tx_hash);

    let raw = decode_hex(TESTNET_VALUE_TRANSFER);
    let decoded = Transaction::decode(&raw).unwrap();
    assert_eq!(&decoded.full_encoding().unwrap()[..], &raw[..]);
    assert_eq!(decoded.sender_tx_hash().unwrap(), sender_tx_hash);
    assert!(decoded.compare_fields(&tx, true));
    assert_eq!(decoded.recover_signers().unwrap(), vec![sender().address()]);
}

#[test]
fn fee_delegated_with_ratio_encoding() {
    let tx = fee_delegated_value_transfer_with_ratio();
    assert_eq!(tx.raw_transaction_hex().unwrap(), FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO);
    assert_eq!(
        tx.transaction_hash().unwrap(),
        b256!("83a89f4debd8e9d6374b987e25132b3a4030c9cf9ace2fc6e7d1086fcea2ce40")
    );
    assert_eq!(
        tx.sender_tx_hash().unwrap(),
        b256!("4711ed4023e821425968342c1d50063b6bc3176b1792b7075cfeee3656d450f6")
    );
    assert_eq!(
        hex::encode_prefixed(tx.fee_payer_signature_base_encoding().unwrap()),
        "0xf84fb6f50a8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b1e945a0043070275d9f6054307ee7348bd660849d90f018080"
    );

    let decoded =
        Transaction::decode(&decode_hex(FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO)).unwrap();
    assert_eq!(decoded.fee_ratio().map(|ratio| ratio.get()), Some(30));
    assert_eq!(decoded.fee_payer(), Some(fee_payer().address()));
    assert!(decoded.compare_fields(&tx, true));
    assert_eq!(decoded.recover_fee_payers().unwrap(), vec![fee_payer().address()]);
}

#[test]
fn signing_reproduces_reference_encodings() {
    let mut legacy = reference(TxType::Legacy)
        .to(TO)
        .unwrap()
        .value("0xa")
        .unwrap()
        .input("0x31323334")
        .unwrap()
        .build()
        .unwrap();
    legacy.sign(&sender()).unwrap();
    assert_eq!(
        legacy.raw_transaction_hex().unwrap(),
        "0xf8668204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a843132333425a0b2a5a15550ec298dc7dddde3774429ed75f864c82caeb5ee24399649ad731be9a029da1014d16f2011b3307f7bbe1035b6e699a4204fc416c763def6cefd976567"
    );

    let mut tx = reference(TxType::ValueTransfer)
        .from(FROM)
        .unwrap()
        .to(TO)
        .unwrap()
        .value("0xa")
        .unwrap()
        .build()
        .unwrap();
    tx.sign(&sender()).unwrap();
    assert_eq!(tx.raw_transaction_hex().unwrap(), VALUE_TRANSFER);
}

#[test]
fn fee_payer_signing_reproduces_reference_encodings() {
    let mut tx = reference(TxType::FeeDelegatedValueTransfer)
        .from(FROM)
        .unwrap()
        .to(TO)
        .unwrap()
        .value("0xa")
        .unwrap()
        .build()
        .unwrap();
    tx.sign(&sender()).unwrap();
    tx.sign_as_fee_payer(&fee_payer()).unwrap();
    assert_eq!(
        tx.raw_transaction_hex().unwrap(),
        "0x09f8d68204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0bf845f84325a09f8e49e2ad84b0732984398749956e807e4b526c786af3c5f7416b293e638956a06bf88342092f6ff9fabe31739b2ebfa1409707ce54a54693e91a6b9bb77df0e7945a0043070275d9f6054307ee7348bd660849d90ff845f84326a0f45cf8d7f88c08e6b6ec0b3b562f34ca94283e4689021987abb6b0772ddfd80aa0298fe2c5aeabb6a518f4cbb5ff39631a5d88be505d3923374f65fdcf63c2955b"
    );

    let mut memo = reference(TxType::FeeDelegatedValueTransferMemoWithRatio)
        .from(FROM)
        .unwrap()
        .to(TO)
        .unwrap()
        .value("0xa")
        .unwrap()
        .input("0x68656c6c6f")
        .unwrap()
        .fee_ratio("30")
        .unwrap()
        .build()
        .unwrap();
    memo.sign(&sender()).unwrap();
    memo.sign_as_fee_payer(&fee_payer()).unwrap();
    assert_eq!(
        memo.raw_transaction_hex().unwrap(),
        "0x12f8dd8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b8568656c6c6f1ef845f84326a0769f0afdc310289f9b24decb5bb765c8d7a87a6a4ae28edffb8b7085bbd9bc78a06a7b970eea026e60ac29bb52aee10661a4222e6bdcdfb3839a80586e584586b4945a0043070275d9f6054307ee7348bd660849d90ff845f84325a0c1c54bdc72ce7c08821329bf50542535fac74f4bba5de5b7881118a461d52834a03a3a64878d784f9af91c2e3ab9c90f17144c47cfd9951e3588c75063c0649ecd"
    );
}

#[test]
fn account_update_reference_encodings() {
    let account_update = |tx_type| {
        reference(tx_type).from(FROM).unwrap().account_key(ACCOUNT_KEY).unwrap()
    };

    let mut tx = account_update(TxType::AccountUpdate).build().unwrap();
    tx.sign(&sender()).unwrap();
    let raw = tx.raw_transaction_hex().unwrap();
    assert_eq!(
        raw,
        "0x20f8888204d219830f424094a94f5374fce5edbc8e2a8697c15331677e6ebf0ba302a1033a514176466fa815ed481ffad09110a2d344f6c9b78c1d14afc351c3a51be33df845f84325a0f7d479628f05f51320f0842193e3f7ae55a5b49d3645bf55c35bee1e8fd2593aa04de8eab5338fdc86e96f8c49ed516550f793fc2c4007614ce3d2a6b33cf9e451"
    );
    let decoded = Transaction::decode(&decode_hex(&raw)).unwrap();
    assert_eq!(decoded.payload(), tx.payload());

    let mut tx = account_update(TxType::FeeDelegatedAccountUpdateWithRatio)
        .fee_ratio("30")
        .unwrap()
        .build()
        .unwrap();
    tx.sign(&sender()).unwrap();
    tx.sign_as_fee_payer(&fee_payer()).unwrap();
    assert_eq!(
        tx.raw_transaction_hex().unwrap(),
        "0x22f8e58204d219830f424094a94f5374fce5edbc8e2a8697c15331677e6ebf0ba302a1033a514176466fa815ed481ffad09110a2d344f6c9b78c1d14afc351c3a51be33d1ef845f84326a00e5929f96dec2b41343a9e6f0150eef08741fe7dcece88cc5936c49ed19051dca05a07b07017190e0baba32bdf6352f5a358a2798ed3c56e704a63819b87cf8e3f945a0043070275d9f6054307ee7348bd660849d90ff845f84326a0cf8d102de7c6b0a41d3f02aefb7e419522341734c98af233408298d0c424c04ba00286f89cab4668f728d7c269997116a49b80cec8776fc64e60588a9268571e35"
    );
}
