//! Transaction types.

use crate::{validate, TransactionError};
use alloy_primitives::{Address, Bytes, U256};

pub use access_list::{AccessList, AccessListItem};
pub use builder::TransactionBuilder;
pub use decode::decode_transaction;
pub use encode::EncodingPurpose;
pub use payload::{CodeFormat, FeeRatio, Payload};
pub use signature::{Signature, SignatureData, SignatureList};
pub use tx_type::{FeeDelegation, PayloadKind, TxType, ETHEREUM_TX_TYPE_ENVELOPE};

mod access_list;
mod builder;
mod combine;
mod decode;
mod encode;
mod fill;
mod payload;
mod sign;
mod signature;
mod tx_type;

/// Secp256k1 helpers used for signing and recovery.
pub mod util;

/// Gas pricing of a transaction.
///
/// `None` marks a value that is not known yet and has to be filled before encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GasFee {
    /// A single gas price, used by every type but the dynamic fee one.
    GasPrice(Option<u128>),
    /// EIP-1559 fee fields.
    Dynamic {
        /// Max Priority fee that transaction is paying
        max_priority_fee_per_gas: Option<u128>,
        /// A maximum of total fee per gas the sender is willing to pay.
        max_fee_per_gas: Option<u128>,
    },
}

impl GasFee {
    pub(crate) const fn unset_for(tx_type: TxType) -> Self {
        match tx_type {
            TxType::EthereumDynamicFee => {
                Self::Dynamic { max_priority_fee_per_gas: None, max_fee_per_gas: None }
            }
            _ => Self::GasPrice(None),
        }
    }
}

/// Fields shared by every transaction type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommonFields {
    /// Sender address. Always encoded by native types, only known from the signer otherwise.
    pub from: Option<Address>,
    /// A scalar value equal to the number of transactions sent by the sender.
    pub nonce: Option<u64>,
    /// Maximum amount of gas the transaction is allowed to use.
    pub gas: u64,
    /// Chain the transaction is bound to.
    pub chain_id: Option<u64>,
    pub fee: GasFee,
}

/// The fee payer side of a fee delegated transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct FeePayerFields {
    pub fee_payer: Option<Address>,
    /// Present on the with-ratio types only.
    pub fee_ratio: Option<FeeRatio>,
    pub signatures: SignatureList,
}

impl FeePayerFields {
    /// The fee payer, treating the zero address as unset.
    pub fn fee_payer(&self) -> Option<Address> {
        self.fee_payer.filter(|address| !address.is_zero())
    }
}

/// A transaction of any registered type.
///
/// Instances are created through [`TransactionBuilder`] or decoded from their raw encoding, both
/// keep the type, payload and fee payer shape consistent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transaction {
    pub(crate) tx_type: TxType,
    pub(crate) common: CommonFields,
    pub(crate) payload: Payload,
    pub(crate) fee_payer: Option<FeePayerFields>,
    pub(crate) signatures: SignatureList,
}

impl Transaction {
    /// Creates a new transaction builder for the given type.
    pub fn builder(tx_type: TxType) -> TransactionBuilder {
        TransactionBuilder::new(tx_type)
    }

    pub const fn tx_type(&self) -> TxType {
        self.tx_type
    }

    pub const fn common(&self) -> &CommonFields {
        &self.common
    }

    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    pub const fn from(&self) -> Option<Address> {
        self.common.from
    }

    pub const fn nonce(&self) -> Option<u64> {
        self.common.nonce
    }

    pub const fn gas(&self) -> u64 {
        self.common.gas
    }

    pub const fn chain_id(&self) -> Option<u64> {
        self.common.chain_id
    }

    /// Gets the gas price, `None` for dynamic fee transactions or when unset.
    pub const fn gas_price(&self) -> Option<u128> {
        match self.common.fee {
            GasFee::GasPrice(price) => price,
            GasFee::Dynamic { .. } => None,
        }
    }

    pub const fn max_priority_fee_per_gas(&self) -> Option<u128> {
        match self.common.fee {
            GasFee::Dynamic { max_priority_fee_per_gas, .. } => max_priority_fee_per_gas,
            GasFee::GasPrice(_) => None,
        }
    }

    pub const fn max_fee_per_gas(&self) -> Option<u128> {
        match self.common.fee {
            GasFee::Dynamic { max_fee_per_gas, .. } => max_fee_per_gas,
            GasFee::GasPrice(_) => None,
        }
    }

    pub const fn to(&self) -> Option<Address> {
        self.payload.to()
    }

    pub const fn value(&self) -> U256 {
        self.payload.value()
    }

    pub fn input(&self) -> &Bytes {
        self.payload.input()
    }

    pub const fn access_list(&self) -> Option<&AccessList> {
        self.payload.access_list()
    }

    /// The fee payer, `None` if unset or if the type is not fee delegated.
    pub fn fee_payer(&self) -> Option<Address> {
        self.fee_payer.as_ref().and_then(FeePayerFields::fee_payer)
    }

    pub fn fee_ratio(&self) -> Option<FeeRatio> {
        self.fee_payer.as_ref().and_then(|fields| fields.fee_ratio)
    }

    /// Sender signatures, refined.
    pub const fn signatures(&self) -> &SignatureList {
        &self.signatures
    }

    /// Fee payer signatures, `None` if the type is not fee delegated.
    pub fn fee_payer_signatures(&self) -> Option<&SignatureList> {
        self.fee_payer.as_ref().map(|fields| &fields.signatures)
    }

    pub fn set_from(&mut self, from: Address) {
        self.common.from = Some(from);
    }

    pub fn set_nonce(&mut self, nonce: u64) {
        self.common.nonce = Some(nonce);
    }

    pub fn set_chain_id(&mut self, chain_id: u64) {
        self.common.chain_id = Some(chain_id);
    }

    pub fn set_gas(&mut self, gas: u64) {
        self.common.gas = gas;
    }

    pub fn set_gas_price(&mut self, gas_price: u128) -> Result<(), TransactionError> {
        match &mut self.common.fee {
            GasFee::GasPrice(price) => *price = Some(gas_price),
            GasFee::Dynamic { .. } => return Err(TransactionError::invalid("gasPrice", gas_price)),
        }
        Ok(())
    }

    pub fn set_max_priority_fee_per_gas(&mut self, fee: u128) -> Result<(), TransactionError> {
        match &mut self.common.fee {
            GasFee::Dynamic { max_priority_fee_per_gas, .. } => {
                *max_priority_fee_per_gas = Some(fee)
            }
            GasFee::GasPrice(_) => {
                return Err(TransactionError::invalid("maxPriorityFeePerGas", fee))
            }
        }
        Ok(())
    }

    pub fn set_max_fee_per_gas(&mut self, fee: u128) -> Result<(), TransactionError> {
        match &mut self.common.fee {
            GasFee::Dynamic { max_fee_per_gas, .. } => *max_fee_per_gas = Some(fee),
            GasFee::GasPrice(_) => return Err(TransactionError::invalid("maxFeePerGas", fee)),
        }
        Ok(())
    }

    pub fn set_fee_payer(&mut self, fee_payer: Address) -> Result<(), TransactionError> {
        match &mut self.fee_payer {
            Some(fields) => fields.fee_payer = Some(fee_payer),
            None => return Err(TransactionError::NotFeeDelegated(self.tx_type)),
        }
        Ok(())
    }

    /// Returns `true` if at least one non-empty sender signature is present.
    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// `from` in its EIP-55 checksummed form.
    pub fn from_checksummed(&self) -> Option<String> {
        self.common.from.as_ref().map(validate::to_checksum_address)
    }

    /// Decodes a raw transaction of any registered type.
    pub fn decode(raw: &[u8]) -> Result<Self, TransactionError> {
        decode_transaction(raw)
    }
}
