//! Transaction errors
use crate::transaction::TxType;
use klay_rlp::{DecodeError, Error as RlpError};
use thiserror::Error;

/// Errors raised while building, encoding, decoding, signing or combining transactions.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The bytes are not well formed RLP, or are truncated or followed by trailing data.
    #[error("Malformed RLP encoding: {0}")]
    MalformedEncoding(#[from] DecodeError),
    /// The bytes carry the tag of another transaction type.
    #[error("Invalid RLP-encoded tag - expected {expected} ({:#x}), got {got:#x}", .expected.tag())]
    TypeTagMismatch {
        /// The type the caller asked for.
        expected: TxType,
        /// The tag found on the wire.
        got: u16,
    },
    /// No transaction type is registered under this tag.
    #[error("Unknown transaction type tag {0:#x}")]
    UnknownTypeTag(u16),
    /// The decoded field list has the wrong arity for the matched type.
    #[error("{tx_type} expects {expected} RLP fields, got {got}")]
    FieldCountMismatch {
        /// The matched transaction type.
        tx_type: TxType,
        /// Number of fields the type encodes.
        expected: usize,
        /// Number of fields found.
        got: usize,
    },
    /// A field was given a value it cannot hold.
    #[error("Invalid {field}. {field} : {value}")]
    InvalidField {
        /// Name of the field.
        field: &'static str,
        /// The rejected value, in its string form.
        value: String,
    },
    /// A field needed by the requested operation has not been set yet.
    #[error("{field} is missing in {tx_type}")]
    MissingRequiredField {
        /// The transaction type.
        tx_type: TxType,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A single-signature transaction was given more than one signature.
    #[error(
        "{tx_type} can only have one signature (existing signature: {existing}, supplied: {supplied})"
    )]
    SignatureCapacityExceeded {
        /// The transaction type.
        tx_type: TxType,
        /// Whether a non-empty signature was already present.
        existing: bool,
        /// Number of signatures supplied.
        supplied: usize,
    },
    /// A candidate passed to combine describes a different transaction.
    #[error(
        "Transactions containing different information cannot be combined ({tx_type}, candidate #{candidate})"
    )]
    TransactionConflict {
        /// The transaction type.
        tx_type: TxType,
        /// Index of the first conflicting candidate.
        candidate: usize,
    },
    /// A fee payer operation was requested on a transaction without fee delegation.
    #[error("{0} is not a fee delegated transaction")]
    NotFeeDelegated(TxType),
    /// The chain parameter provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The signing collaborator failed.
    #[error(transparent)]
    Signer(#[from] SignerError),
}

impl TransactionError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidField { field, value: value.to_string() }
    }

    pub(crate) const fn missing(tx_type: TxType, field: &'static str) -> Self {
        Self::MissingRequiredField { tx_type, field }
    }

    /// Maps a prefix mismatch reported by the codec onto the transaction level error.
    pub(crate) fn from_decode(expected: TxType, err: DecodeError) -> Self {
        match err {
            DecodeError::TypePrefixMismatch { got, .. } => Self::TypeTagMismatch { expected, got },
            err => Self::MalformedEncoding(err),
        }
    }
}

impl From<RlpError> for TransactionError {
    fn from(err: RlpError) -> Self {
        Self::MalformedEncoding(err.into())
    }
}

/// Errors returned by a [`ChainParamsProvider`](crate::ChainParamsProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The parameter could not be fetched.
    #[error("chain parameter {0} is unavailable")]
    Unavailable(&'static str),
    /// Any other failure of the underlying source.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by a [`Signer`](crate::Signer) or during signature recovery.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The secp256k1 backend rejected the key, message or signature.
    #[error(transparent)]
    Secp256k1(#[from] secp256k1::Error),
    /// `v` does not carry a recovery id for the given chain.
    #[error("invalid signature v {v:#x} for chain id {chain_id:?}")]
    InvalidRecoveryId {
        /// The signature's `v` value.
        v: u64,
        /// The chain id the signature was checked against.
        chain_id: Option<u64>,
    },
    /// Only the empty signature is present.
    #[error("no signature to recover from")]
    EmptySignature,
}
