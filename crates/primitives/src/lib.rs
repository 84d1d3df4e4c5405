#![warn(missing_debug_implementations, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Typed transactions of a fee delegating, account based chain.
//!
//! Every transaction type is a pairing of a payload kind with a fee delegation mode. This crate
//! builds them from their string forms, encodes and decodes them, computes the hashes that get
//! signed and merges signatures collected by several parties.

mod error;
mod traits;
mod transaction;

/// Validation and conversion of the string forms accepted at the API boundary.
pub mod validate;

pub use error::{ProviderError, SignerError, TransactionError};
pub use traits::{ChainParamsProvider, LocalSigner, Signer};
pub use transaction::{
    decode_transaction, util, AccessList, AccessListItem, CodeFormat, CommonFields,
    EncodingPurpose, FeeDelegation, FeePayerFields, FeeRatio, GasFee, Payload, PayloadKind,
    Signature, SignatureData, SignatureList, Transaction, TransactionBuilder, TxType,
    ETHEREUM_TX_TYPE_ENVELOPE,
};

pub use alloy_primitives::{self, address, b256, hex, Address, Bytes, B256, U256};
