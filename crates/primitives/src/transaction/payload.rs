use crate::{
    transaction::{AccessList, PayloadKind},
    TransactionError,
};
use alloy_primitives::{Address, Bytes, U256};
use core::fmt;

/// Percentage of the fee paid by the fee payer, in `1..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeeRatio(u8);

impl FeeRatio {
    /// Upper bound of the ratio, the fee payer pays everything.
    pub const MAX: u8 = 100;

    pub fn new(ratio: u8) -> Result<Self, TransactionError> {
        Self::try_from(ratio)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FeeRatio {
    type Error = TransactionError;

    fn try_from(ratio: u8) -> Result<Self, Self::Error> {
        if ratio == 0 || ratio > Self::MAX {
            return Err(TransactionError::invalid("feeRatio", ratio))
        }
        Ok(Self(ratio))
    }
}

impl fmt::Display for FeeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Format of the code carried by a deploy transaction. Only EVM bytecode is supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CodeFormat {
    #[default]
    Evm = 0,
}

impl TryFrom<u8> for CodeFormat {
    type Error = TransactionError;

    fn try_from(format: u8) -> Result<Self, Self::Error> {
        match format {
            0 => Ok(Self::Evm),
            other => Err(TransactionError::invalid("codeFormat", other)),
        }
    }
}

/// The kind specific part of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Payload {
    Legacy {
        /// Recipient, `None` creates a contract.
        to: Option<Address>,
        value: U256,
        input: Bytes,
    },
    ValueTransfer {
        to: Address,
        value: U256,
    },
    ValueTransferMemo {
        to: Address,
        value: U256,
        /// The memo.
        input: Bytes,
    },
    AccountUpdate {
        /// The new account key in its encoded form, carried on the wire as a byte string.
        account_key: Bytes,
    },
    /// The recipient is always empty and `humanReadable` always `false`.
    SmartContractDeploy {
        value: U256,
        /// Contract bytecode followed by the encoded constructor arguments.
        input: Bytes,
        code_format: CodeFormat,
    },
    SmartContractExecution {
        to: Address,
        value: U256,
        input: Bytes,
    },
    Cancel,
    ChainDataAnchoring {
        anchored_data: Bytes,
    },
    EthereumAccessList {
        to: Option<Address>,
        value: U256,
        input: Bytes,
        access_list: AccessList,
    },
    EthereumDynamicFee {
        to: Option<Address>,
        value: U256,
        input: Bytes,
        access_list: AccessList,
    },
}

impl Payload {
    pub const fn kind(&self) -> PayloadKind {
        match self {
            Self::Legacy { .. } => PayloadKind::Legacy,
            Self::ValueTransfer { .. } => PayloadKind::ValueTransfer,
            Self::ValueTransferMemo { .. } => PayloadKind::ValueTransferMemo,
            Self::AccountUpdate { .. } => PayloadKind::AccountUpdate,
            Self::SmartContractDeploy { .. } => PayloadKind::SmartContractDeploy,
            Self::SmartContractExecution { .. } => PayloadKind::SmartContractExecution,
            Self::Cancel => PayloadKind::Cancel,
            Self::ChainDataAnchoring { .. } => PayloadKind::ChainDataAnchoring,
            Self::EthereumAccessList { .. } => PayloadKind::EthereumAccessList,
            Self::EthereumDynamicFee { .. } => PayloadKind::EthereumDynamicFee,
        }
    }

    /// Gets the transaction's recipient, `None` for contract creation and kinds without one.
    pub const fn to(&self) -> Option<Address> {
        match self {
            Self::Legacy { to, .. } |
            Self::EthereumAccessList { to, .. } |
            Self::EthereumDynamicFee { to, .. } => *to,
            Self::ValueTransfer { to, .. } |
            Self::ValueTransferMemo { to, .. } |
            Self::SmartContractExecution { to, .. } => Some(*to),
            _ => None,
        }
    }

    /// Gets the transferred value, zero for kinds that carry none.
    pub const fn value(&self) -> U256 {
        match self {
            Self::Legacy { value, .. } |
            Self::ValueTransfer { value, .. } |
            Self::ValueTransferMemo { value, .. } |
            Self::SmartContractDeploy { value, .. } |
            Self::SmartContractExecution { value, .. } |
            Self::EthereumAccessList { value, .. } |
            Self::EthereumDynamicFee { value, .. } => *value,
            _ => U256::ZERO,
        }
    }

    /// Gets the data field: call data, memo, bytecode, anchored data or the encoded account key.
    pub fn input(&self) -> &Bytes {
        static EMPTY: Bytes = Bytes::new();
        match self {
            Self::Legacy { input, .. } |
            Self::ValueTransferMemo { input, .. } |
            Self::SmartContractDeploy { input, .. } |
            Self::SmartContractExecution { input, .. } |
            Self::EthereumAccessList { input, .. } |
            Self::EthereumDynamicFee { input, .. } => input,
            Self::ChainDataAnchoring { anchored_data } => anchored_data,
            Self::AccountUpdate { account_key } => account_key,
            Self::ValueTransfer { .. } | Self::Cancel => &EMPTY,
        }
    }

    pub const fn access_list(&self) -> Option<&AccessList> {
        match self {
            Self::EthereumAccessList { access_list, .. } |
            Self::EthereumDynamicFee { access_list, .. } => Some(access_list),
            _ => None,
        }
    }

    /// Number of RLP fields a native kind contributes between `gas` and the fee ratio, `from`
    /// included.
    pub(crate) const fn native_field_count(kind: PayloadKind) -> usize {
        match kind {
            PayloadKind::ValueTransfer => 3,
            PayloadKind::ValueTransferMemo | PayloadKind::SmartContractExecution => 4,
            PayloadKind::AccountUpdate | PayloadKind::ChainDataAnchoring => 2,
            PayloadKind::SmartContractDeploy => 6,
            PayloadKind::Cancel => 1,
            PayloadKind::Legacy |
            PayloadKind::EthereumAccessList |
            PayloadKind::EthereumDynamicFee => 0,
        }
    }
}
