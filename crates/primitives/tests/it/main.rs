//! Integration tests of the transaction codec, signing and combine flows.

use klay_primitives::{b256, LocalSigner};

mod combine;
mod golden;

const fn main() {}

/// Sender key used by the reference vectors, its address is
/// `0xa94f5374Fce5edBC8E2a8697C15331677e6EbF0B`.
fn sender() -> LocalSigner {
    LocalSigner::from_bytes(b256!(
        "45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8"
    ))
    .unwrap()
}

/// Fee payer key used by the reference vectors, its address is
/// `0x5A0043070275d9f6054307Ee7348bD660849D90f`.
fn fee_payer() -> LocalSigner {
    LocalSigner::from_bytes(b256!(
        "b9d5558443585bca6f225b935950e3f6e69f9da8a5809a83f51c3365dff53936"
    ))
    .unwrap()
}

fn decode_hex(raw: &str) -> Vec<u8> {
    klay_primitives::hex::decode(raw).unwrap()
}
