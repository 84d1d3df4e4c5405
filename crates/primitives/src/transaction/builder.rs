use crate::{
    transaction::{
        AccessList, CodeFormat, CommonFields, FeePayerFields, FeeRatio, GasFee, Payload,
        PayloadKind, SignatureData, SignatureList, Transaction, TxType,
    },
    validate, TransactionError,
};
use alloy_primitives::{Address, Bytes, U256};
use tracing::debug;

/// Builds a [`Transaction`] from the string forms accepted at the API boundary.
///
/// Every setter validates its input immediately and rejects fields the selected type does not
/// carry. `"0x"` (or an empty string) leaves an optional quantity unset so it can be filled later.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    tx_type: TxType,
    from: Option<Address>,
    to: Option<Option<Address>>,
    nonce: Option<u64>,
    gas: Option<u64>,
    gas_price: Option<u128>,
    max_priority_fee_per_gas: Option<u128>,
    max_fee_per_gas: Option<u128>,
    chain_id: Option<u64>,
    value: U256,
    input: Bytes,
    account_key: Option<Bytes>,
    code_format: CodeFormat,
    fee_payer: Option<Address>,
    fee_ratio: Option<FeeRatio>,
    access_list: AccessList,
    signatures: Vec<SignatureData>,
    fee_payer_signatures: Vec<SignatureData>,
}

fn is_unset(value: &str) -> bool {
    validate::strip_hex_prefix(value).is_empty()
}

fn optional_quantity<T: TryFrom<U256>>(
    field: &'static str,
    value: &str,
) -> Result<Option<T>, TransactionError> {
    if is_unset(value) {
        return Ok(None)
    }
    validate::parse_quantity(field, value).map(Some)
}

impl TransactionBuilder {
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            from: None,
            to: None,
            nonce: None,
            gas: None,
            gas_price: None,
            max_priority_fee_per_gas: None,
            max_fee_per_gas: None,
            chain_id: None,
            value: U256::ZERO,
            input: Bytes::new(),
            account_key: None,
            code_format: CodeFormat::Evm,
            fee_payer: None,
            fee_ratio: None,
            access_list: AccessList::default(),
            signatures: Vec::new(),
            fee_payer_signatures: Vec::new(),
        }
    }

    pub const fn tx_type(&self) -> TxType {
        self.tx_type
    }

    fn kind(&self) -> PayloadKind {
        self.tx_type.kind()
    }

    fn applies(
        &self,
        applicable: bool,
        field: &'static str,
        value: &str,
    ) -> Result<(), TransactionError> {
        if applicable {
            return Ok(())
        }
        debug!(target: "klay::tx", tx_type = %self.tx_type, field, "Field not carried by type");
        Err(TransactionError::invalid(field, value))
    }

    pub fn from(mut self, from: &str) -> Result<Self, TransactionError> {
        self.from = validate::parse_optional_address("from", from)?;
        Ok(self)
    }

    /// Sets the recipient. An empty address is only accepted by types that can create contracts.
    pub fn to(mut self, to: &str) -> Result<Self, TransactionError> {
        use PayloadKind::*;
        let kind = self.kind();
        self.applies(!matches!(kind, AccountUpdate | Cancel | ChainDataAnchoring), "to", to)?;
        let to_address = validate::parse_optional_address("to", to)?;
        match (kind, to_address) {
            (SmartContractDeploy, Some(_)) => return Err(TransactionError::invalid("to", to)),
            (ValueTransfer | ValueTransferMemo | SmartContractExecution, None) => {
                return Err(TransactionError::invalid("to", to))
            }
            _ => {}
        }
        self.to = Some(to_address);
        Ok(self)
    }

    pub fn nonce(mut self, nonce: &str) -> Result<Self, TransactionError> {
        self.nonce = optional_quantity("nonce", nonce)?;
        Ok(self)
    }

    pub fn gas(mut self, gas: &str) -> Result<Self, TransactionError> {
        self.gas = Some(validate::parse_quantity("gas", gas)?);
        Ok(self)
    }

    pub fn gas_price(mut self, gas_price: &str) -> Result<Self, TransactionError> {
        self.applies(self.tx_type != TxType::EthereumDynamicFee, "gasPrice", gas_price)?;
        self.gas_price = optional_quantity("gasPrice", gas_price)?;
        Ok(self)
    }

    pub fn max_priority_fee_per_gas(mut self, fee: &str) -> Result<Self, TransactionError> {
        self.applies(self.tx_type == TxType::EthereumDynamicFee, "maxPriorityFeePerGas", fee)?;
        self.max_priority_fee_per_gas = optional_quantity("maxPriorityFeePerGas", fee)?;
        Ok(self)
    }

    pub fn max_fee_per_gas(mut self, fee: &str) -> Result<Self, TransactionError> {
        self.applies(self.tx_type == TxType::EthereumDynamicFee, "maxFeePerGas", fee)?;
        self.max_fee_per_gas = optional_quantity("maxFeePerGas", fee)?;
        Ok(self)
    }

    pub fn chain_id(mut self, chain_id: &str) -> Result<Self, TransactionError> {
        self.chain_id = optional_quantity("chainId", chain_id)?;
        Ok(self)
    }

    pub fn value(mut self, value: &str) -> Result<Self, TransactionError> {
        use PayloadKind::*;
        self.applies(
            !matches!(self.kind(), AccountUpdate | Cancel | ChainDataAnchoring),
            "value",
            value,
        )?;
        self.value = validate::parse_quantity("value", value)?;
        Ok(self)
    }

    /// Sets the data field: call data, memo, bytecode or the anchored data.
    pub fn input(mut self, input: &str) -> Result<Self, TransactionError> {
        use PayloadKind::*;
        let carries_input = !matches!(self.kind(), ValueTransfer | AccountUpdate | Cancel);
        self.applies(carries_input, "input", input)?;
        self.input = validate::parse_hex_bytes("input", input)?;
        Ok(self)
    }

    /// Sets the encoded account key of an account update.
    pub fn account_key(mut self, account_key: &str) -> Result<Self, TransactionError> {
        self.applies(self.kind() == PayloadKind::AccountUpdate, "accountKey", account_key)?;
        let key = validate::parse_hex_bytes("accountKey", account_key)?;
        if key.is_empty() {
            return Err(TransactionError::invalid("accountKey", account_key))
        }
        self.account_key = Some(key);
        Ok(self)
    }

    pub fn fee_payer(mut self, fee_payer: &str) -> Result<Self, TransactionError> {
        self.applies(self.tx_type.is_fee_delegated(), "feePayer", fee_payer)?;
        self.fee_payer = validate::parse_optional_address("feePayer", fee_payer)?;
        Ok(self)
    }

    pub fn fee_ratio(mut self, fee_ratio: &str) -> Result<Self, TransactionError> {
        self.applies(self.tx_type.has_fee_ratio(), "feeRatio", fee_ratio)?;
        let ratio: u8 = validate::parse_quantity("feeRatio", fee_ratio)?;
        self.fee_ratio = Some(FeeRatio::new(ratio)?);
        Ok(self)
    }

    /// Human readable addresses are not supported, only `false` is accepted.
    pub fn human_readable(self, human_readable: bool) -> Result<Self, TransactionError> {
        if self.kind() != PayloadKind::SmartContractDeploy || human_readable {
            return Err(TransactionError::invalid("humanReadable", human_readable))
        }
        Ok(self)
    }

    pub fn code_format(mut self, code_format: &str) -> Result<Self, TransactionError> {
        self.applies(self.kind() == PayloadKind::SmartContractDeploy, "codeFormat", code_format)?;
        let format: u8 = validate::parse_quantity("codeFormat", code_format)?;
        self.code_format = CodeFormat::try_from(format)?;
        Ok(self)
    }

    pub fn access_list(mut self, access_list: AccessList) -> Result<Self, TransactionError> {
        self.applies(self.tx_type.is_ethereum_family(), "accessList", "[..]")?;
        self.access_list = access_list;
        Ok(self)
    }

    /// Sender signatures, appended at build time with the capacity rules of the type.
    pub fn signatures(mut self, signatures: Vec<SignatureData>) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn fee_payer_signatures(
        mut self,
        signatures: Vec<SignatureData>,
    ) -> Result<Self, TransactionError> {
        if !self.tx_type.is_fee_delegated() {
            return Err(TransactionError::NotFeeDelegated(self.tx_type))
        }
        self.fee_payer_signatures = signatures;
        Ok(self)
    }

    fn payload(&self) -> Result<Payload, TransactionError> {
        let missing = |field| TransactionError::missing(self.tx_type, field);
        let to = self.to.flatten();
        let value = self.value;
        let input = self.input.clone();
        Ok(match self.kind() {
            PayloadKind::Legacy => Payload::Legacy { to, value, input },
            PayloadKind::ValueTransfer => {
                Payload::ValueTransfer { to: to.ok_or_else(|| missing("to"))?, value }
            }
            PayloadKind::ValueTransferMemo => {
                Payload::ValueTransferMemo { to: to.ok_or_else(|| missing("to"))?, value, input }
            }
            PayloadKind::AccountUpdate => Payload::AccountUpdate {
                account_key: self.account_key.clone().ok_or_else(|| missing("accountKey"))?,
            },
            PayloadKind::SmartContractDeploy => {
                Payload::SmartContractDeploy { value, input, code_format: self.code_format }
            }
            PayloadKind::SmartContractExecution => Payload::SmartContractExecution {
                to: to.ok_or_else(|| missing("to"))?,
                value,
                input,
            },
            PayloadKind::Cancel => Payload::Cancel,
            PayloadKind::ChainDataAnchoring => Payload::ChainDataAnchoring { anchored_data: input },
            PayloadKind::EthereumAccessList => Payload::EthereumAccessList {
                to,
                value,
                input,
                access_list: self.access_list.clone(),
            },
            PayloadKind::EthereumDynamicFee => Payload::EthereumDynamicFee {
                to,
                value,
                input,
                access_list: self.access_list.clone(),
            },
        })
    }

    /// Checks the fields every encoding of the type needs and assembles the transaction.
    pub fn build(self) -> Result<Transaction, TransactionError> {
        let tx_type = self.tx_type;
        let gas = self.gas.ok_or(TransactionError::missing(tx_type, "gas"))?;
        if tx_type.is_native() && self.from.is_none() {
            return Err(TransactionError::missing(tx_type, "from"))
        }
        if tx_type.has_fee_ratio() && self.fee_ratio.is_none() {
            return Err(TransactionError::missing(tx_type, "feeRatio"))
        }

        let fee = match GasFee::unset_for(tx_type) {
            GasFee::GasPrice(_) => GasFee::GasPrice(self.gas_price),
            GasFee::Dynamic { .. } => GasFee::Dynamic {
                max_priority_fee_per_gas: self.max_priority_fee_per_gas,
                max_fee_per_gas: self.max_fee_per_gas,
            },
        };
        let fee_payer = tx_type.is_fee_delegated().then(|| FeePayerFields {
            fee_payer: self.fee_payer,
            fee_ratio: self.fee_ratio,
            signatures: SignatureList::new(),
        });

        let mut tx = Transaction {
            tx_type,
            common: CommonFields {
                from: self.from,
                nonce: self.nonce,
                gas,
                chain_id: self.chain_id,
                fee,
            },
            payload: self.payload()?,
            fee_payer,
            signatures: SignatureList::new(),
        };
        tx.append_signatures(self.signatures)?;
        if !self.fee_payer_signatures.is_empty() {
            tx.append_fee_payer_signatures(self.fee_payer_signatures)?;
        }
        Ok(tx)
    }
}
