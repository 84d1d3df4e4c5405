use crate::TransactionError;
use core::fmt;
use klay_rlp::TypePrefix;

/// First byte of every Ethereum-compatible typed envelope (`0x7801`, `0x7802`).
pub const ETHEREUM_TX_TYPE_ENVELOPE: u8 = 0x78;

/// Shape of the payload carried by a transaction, independent of fee delegation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Untyped Ethereum transaction.
    Legacy,
    /// Plain value transfer between two accounts.
    ValueTransfer,
    /// Value transfer carrying an arbitrary memo.
    ValueTransferMemo,
    /// Replaces the account key of `from`.
    AccountUpdate,
    /// Contract creation.
    SmartContractDeploy,
    /// Contract call.
    SmartContractExecution,
    /// Cancels a pending transaction with the same nonce.
    Cancel,
    /// Anchors service chain data.
    ChainDataAnchoring,
    /// Ethereum access list transaction.
    EthereumAccessList,
    /// Ethereum dynamic fee transaction.
    EthereumDynamicFee,
}

/// Who pays the fee of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeeDelegation {
    /// The sender pays.
    None,
    /// The fee payer pays all of the fee.
    FeeDelegated,
    /// The fee payer pays `feeRatio` percent of the fee.
    WithRatio,
}

/// Transaction Type
///
/// The discriminant is the tag written on the wire. Legacy transactions are never prefixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u16)]
pub enum TxType {
    /// Legacy transaction
    #[default]
    Legacy = 0x00,
    ValueTransfer = 0x08,
    FeeDelegatedValueTransfer = 0x09,
    FeeDelegatedValueTransferWithRatio = 0x0a,
    ValueTransferMemo = 0x10,
    FeeDelegatedValueTransferMemo = 0x11,
    FeeDelegatedValueTransferMemoWithRatio = 0x12,
    AccountUpdate = 0x20,
    FeeDelegatedAccountUpdate = 0x21,
    FeeDelegatedAccountUpdateWithRatio = 0x22,
    SmartContractDeploy = 0x28,
    FeeDelegatedSmartContractDeploy = 0x29,
    FeeDelegatedSmartContractDeployWithRatio = 0x2a,
    SmartContractExecution = 0x30,
    FeeDelegatedSmartContractExecution = 0x31,
    FeeDelegatedSmartContractExecutionWithRatio = 0x32,
    Cancel = 0x38,
    FeeDelegatedCancel = 0x39,
    FeeDelegatedCancelWithRatio = 0x3a,
    ChainDataAnchoring = 0x48,
    FeeDelegatedChainDataAnchoring = 0x49,
    FeeDelegatedChainDataAnchoringWithRatio = 0x4a,
    /// EIP-2930 access list transaction wrapped in the `0x78` envelope.
    EthereumAccessList = 0x7801,
    /// EIP-1559 dynamic fee transaction wrapped in the `0x78` envelope.
    EthereumDynamicFee = 0x7802,
}

impl TxType {
    /// Every registered transaction type, ordered by tag.
    pub const ALL: [TxType; 24] = [
        TxType::Legacy,
        TxType::ValueTransfer,
        TxType::FeeDelegatedValueTransfer,
        TxType::FeeDelegatedValueTransferWithRatio,
        TxType::ValueTransferMemo,
        TxType::FeeDelegatedValueTransferMemo,
        TxType::FeeDelegatedValueTransferMemoWithRatio,
        TxType::AccountUpdate,
        TxType::FeeDelegatedAccountUpdate,
        TxType::FeeDelegatedAccountUpdateWithRatio,
        TxType::SmartContractDeploy,
        TxType::FeeDelegatedSmartContractDeploy,
        TxType::FeeDelegatedSmartContractDeployWithRatio,
        TxType::SmartContractExecution,
        TxType::FeeDelegatedSmartContractExecution,
        TxType::FeeDelegatedSmartContractExecutionWithRatio,
        TxType::Cancel,
        TxType::FeeDelegatedCancel,
        TxType::FeeDelegatedCancelWithRatio,
        TxType::ChainDataAnchoring,
        TxType::FeeDelegatedChainDataAnchoring,
        TxType::FeeDelegatedChainDataAnchoringWithRatio,
        TxType::EthereumAccessList,
        TxType::EthereumDynamicFee,
    ];

    /// The numeric tag of this type.
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// The envelope prefix written before the RLP payload, `None` for legacy transactions.
    pub const fn prefix(self) -> Option<TypePrefix> {
        match self {
            TxType::Legacy => None,
            other => Some(TypePrefix(other.tag())),
        }
    }

    pub const fn kind(self) -> PayloadKind {
        match self {
            TxType::Legacy => PayloadKind::Legacy,
            TxType::ValueTransfer |
            TxType::FeeDelegatedValueTransfer |
            TxType::FeeDelegatedValueTransferWithRatio => PayloadKind::ValueTransfer,
            TxType::ValueTransferMemo |
            TxType::FeeDelegatedValueTransferMemo |
            TxType::FeeDelegatedValueTransferMemoWithRatio => PayloadKind::ValueTransferMemo,
            TxType::AccountUpdate |
            TxType::FeeDelegatedAccountUpdate |
            TxType::FeeDelegatedAccountUpdateWithRatio => PayloadKind::AccountUpdate,
            TxType::SmartContractDeploy |
            TxType::FeeDelegatedSmartContractDeploy |
            TxType::FeeDelegatedSmartContractDeployWithRatio => PayloadKind::SmartContractDeploy,
            TxType::SmartContractExecution |
            TxType::FeeDelegatedSmartContractExecution |
            TxType::FeeDelegatedSmartContractExecutionWithRatio => {
                PayloadKind::SmartContractExecution
            }
            TxType::Cancel | TxType::FeeDelegatedCancel | TxType::FeeDelegatedCancelWithRatio => {
                PayloadKind::Cancel
            }
            TxType::ChainDataAnchoring |
            TxType::FeeDelegatedChainDataAnchoring |
            TxType::FeeDelegatedChainDataAnchoringWithRatio => PayloadKind::ChainDataAnchoring,
            TxType::EthereumAccessList => PayloadKind::EthereumAccessList,
            TxType::EthereumDynamicFee => PayloadKind::EthereumDynamicFee,
        }
    }

    pub const fn fee_delegation(self) -> FeeDelegation {
        match self {
            TxType::FeeDelegatedValueTransfer |
            TxType::FeeDelegatedValueTransferMemo |
            TxType::FeeDelegatedAccountUpdate |
            TxType::FeeDelegatedSmartContractDeploy |
            TxType::FeeDelegatedSmartContractExecution |
            TxType::FeeDelegatedCancel |
            TxType::FeeDelegatedChainDataAnchoring => FeeDelegation::FeeDelegated,
            TxType::FeeDelegatedValueTransferWithRatio |
            TxType::FeeDelegatedValueTransferMemoWithRatio |
            TxType::FeeDelegatedAccountUpdateWithRatio |
            TxType::FeeDelegatedSmartContractDeployWithRatio |
            TxType::FeeDelegatedSmartContractExecutionWithRatio |
            TxType::FeeDelegatedCancelWithRatio |
            TxType::FeeDelegatedChainDataAnchoringWithRatio => FeeDelegation::WithRatio,
            _ => FeeDelegation::None,
        }
    }

    /// Looks up the type carrying `kind` with the given fee delegation mode.
    pub fn compose(kind: PayloadKind, delegation: FeeDelegation) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.kind() == kind && ty.fee_delegation() == delegation)
    }

    /// Returns `true` if a fee payer signs this transaction.
    pub const fn is_fee_delegated(self) -> bool {
        !matches!(self.fee_delegation(), FeeDelegation::None)
    }

    /// Returns `true` if the type carries a `feeRatio` field.
    pub const fn has_fee_ratio(self) -> bool {
        matches!(self.fee_delegation(), FeeDelegation::WithRatio)
    }

    /// Returns `true` for the types wrapped in the `0x78` envelope.
    pub const fn is_ethereum_family(self) -> bool {
        matches!(self, TxType::EthereumAccessList | TxType::EthereumDynamicFee)
    }

    /// Returns `true` for the types native to the ledger, i.e. neither legacy nor Ethereum
    /// typed.
    pub const fn is_native(self) -> bool {
        !matches!(self, TxType::Legacy) && !self.is_ethereum_family()
    }

    /// Returns `true` if the sender side can only hold a single signature.
    pub const fn is_single_signature(self) -> bool {
        !self.is_native()
    }

    /// Symbolic name, e.g. `TxTypeFeeDelegatedValueTransfer`.
    pub const fn name(self) -> &'static str {
        match self {
            TxType::Legacy => "TxTypeLegacyTransaction",
            TxType::ValueTransfer => "TxTypeValueTransfer",
            TxType::FeeDelegatedValueTransfer => "TxTypeFeeDelegatedValueTransfer",
            TxType::FeeDelegatedValueTransferWithRatio => {
                "TxTypeFeeDelegatedValueTransferWithRatio"
            }
            TxType::ValueTransferMemo => "TxTypeValueTransferMemo",
            TxType::FeeDelegatedValueTransferMemo => "TxTypeFeeDelegatedValueTransferMemo",
            TxType::FeeDelegatedValueTransferMemoWithRatio => {
                "TxTypeFeeDelegatedValueTransferMemoWithRatio"
            }
            TxType::AccountUpdate => "TxTypeAccountUpdate",
            TxType::FeeDelegatedAccountUpdate => "TxTypeFeeDelegatedAccountUpdate",
            TxType::FeeDelegatedAccountUpdateWithRatio => {
                "TxTypeFeeDelegatedAccountUpdateWithRatio"
            }
            TxType::SmartContractDeploy => "TxTypeSmartContractDeploy",
            TxType::FeeDelegatedSmartContractDeploy => "TxTypeFeeDelegatedSmartContractDeploy",
            TxType::FeeDelegatedSmartContractDeployWithRatio => {
                "TxTypeFeeDelegatedSmartContractDeployWithRatio"
            }
            TxType::SmartContractExecution => "TxTypeSmartContractExecution",
            TxType::FeeDelegatedSmartContractExecution => {
                "TxTypeFeeDelegatedSmartContractExecution"
            }
            TxType::FeeDelegatedSmartContractExecutionWithRatio => {
                "TxTypeFeeDelegatedSmartContractExecutionWithRatio"
            }
            TxType::Cancel => "TxTypeCancel",
            TxType::FeeDelegatedCancel => "TxTypeFeeDelegatedCancel",
            TxType::FeeDelegatedCancelWithRatio => "TxTypeFeeDelegatedCancelWithRatio",
            TxType::ChainDataAnchoring => "TxTypeChainDataAnchoring",
            TxType::FeeDelegatedChainDataAnchoring => "TxTypeFeeDelegatedChainDataAnchoring",
            TxType::FeeDelegatedChainDataAnchoringWithRatio => {
                "TxTypeFeeDelegatedChainDataAnchoringWithRatio"
            }
            TxType::EthereumAccessList => "TxTypeEthereumAccessList",
            TxType::EthereumDynamicFee => "TxTypeEthereumDynamicFee",
        }
    }
}

impl TryFrom<u16> for TxType {
    type Error = TransactionError;

    fn try_from(tag: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.tag() == tag)
            .ok_or(TransactionError::UnknownTypeTag(tag))
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
