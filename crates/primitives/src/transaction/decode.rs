use crate::{
    transaction::{
        AccessList, CodeFormat, CommonFields, FeePayerFields, FeeRatio, GasFee, Payload,
        PayloadKind, SignatureData, SignatureList, Transaction, TxType, ETHEREUM_TX_TYPE_ENVELOPE,
    },
    TransactionError,
};
use alloy_primitives::{Address, Bytes, U256};
use klay_rlp::{Decodable, Error as RlpError, Rlp, TypePrefix, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use tracing::trace;

/// Decodes a raw transaction of any registered type.
///
/// A leading `0x78` selects a two byte tag, a leading RLP list header a legacy transaction and
/// anything else a one byte tag.
pub fn decode_transaction(raw: &[u8]) -> Result<Transaction, TransactionError> {
    let tx_type = peek_tx_type(raw)?;
    trace!(target: "klay::tx::decode", %tx_type, len = raw.len(), "Dispatching raw transaction");
    Transaction::decode_as(tx_type, raw)
}

fn peek_tx_type(raw: &[u8]) -> Result<TxType, TransactionError> {
    let first = *raw.first().ok_or(RlpError::InputTooShort)?;
    if first >= EMPTY_LIST_CODE {
        return Ok(TxType::Legacy)
    }
    let tag =
        if first == ETHEREUM_TX_TYPE_ENVELOPE { TypePrefix::peek(raw, 2)?.0 } else { first as u16 };
    match TxType::try_from(tag)? {
        TxType::Legacy => Err(TransactionError::UnknownTypeTag(tag)),
        tx_type => Ok(tx_type),
    }
}

/// Number of RLP fields the encoding of `tx_type` carries.
pub(crate) const fn field_count(tx_type: TxType) -> usize {
    match tx_type {
        TxType::Legacy => 9,
        TxType::EthereumAccessList => 11,
        TxType::EthereumDynamicFee => 12,
        _ => {
            let mut count = 3 + Payload::native_field_count(tx_type.kind()) + 1;
            if tx_type.has_fee_ratio() {
                count += 1;
            }
            if tx_type.is_fee_delegated() {
                count += 2;
            }
            count
        }
    }
}

/// Cursor over the fields of one transaction, failing on a missing field.
struct Fields<'a> {
    rlp: Rlp<'a>,
}

impl<'a> Fields<'a> {
    fn next<T: Decodable>(&mut self) -> Result<T, TransactionError> {
        Ok(self.rlp.get_next()?.ok_or(RlpError::InputTooShort)?)
    }

    fn next_raw(&mut self) -> Result<&'a [u8], TransactionError> {
        Ok(self.rlp.get_next_raw()?.ok_or(RlpError::InputTooShort)?)
    }

    /// An address where the empty string stands for none.
    fn next_optional_address(&mut self) -> Result<Option<Address>, TransactionError> {
        let raw = self.next_raw()?;
        if raw == [EMPTY_STRING_CODE] {
            return Ok(None)
        }
        Ok(Some(klay_rlp::decode_exact(raw)?))
    }

    fn next_fee_ratio(&mut self) -> Result<FeeRatio, TransactionError> {
        FeeRatio::try_from(self.next::<u8>()?)
    }
}

impl Transaction {
    /// Decodes a raw transaction that must be of type `expected`.
    pub fn decode_as(expected: TxType, raw: &[u8]) -> Result<Self, TransactionError> {
        let payload = match expected.prefix() {
            Some(prefix) => {
                prefix.strip(raw).map_err(|err| TransactionError::from_decode(expected, err))?
            }
            None => match raw.first() {
                Some(&first) if first < EMPTY_LIST_CODE => {
                    let got = if first == ETHEREUM_TX_TYPE_ENVELOPE {
                        TypePrefix::peek(raw, 2).map_or(first as u16, |prefix| prefix.0)
                    } else {
                        first as u16
                    };
                    return Err(TransactionError::TypeTagMismatch { expected, got })
                }
                _ => raw,
            },
        };

        let rlp = Rlp::new_exact(payload)?;
        let got = rlp.item_count()?;
        let expected_count = field_count(expected);
        if got != expected_count {
            return Err(TransactionError::FieldCountMismatch {
                tx_type: expected,
                expected: expected_count,
                got,
            })
        }

        let mut fields = Fields { rlp };
        let tx = if expected == TxType::Legacy {
            Self::decode_legacy(&mut fields)?
        } else if expected.is_ethereum_family() {
            Self::decode_ethereum(expected, &mut fields)?
        } else {
            Self::decode_native(expected, &mut fields)?
        };
        trace!(
            target: "klay::tx::decode",
            tx_type = %expected,
            signatures = tx.signatures.len(),
            "Decoded transaction"
        );
        Ok(tx)
    }

    fn decode_legacy(fields: &mut Fields<'_>) -> Result<Self, TransactionError> {
        let nonce = fields.next()?;
        let gas_price = fields.next()?;
        let gas = fields.next()?;
        let to = fields.next_optional_address()?;
        let value = fields.next()?;
        let input = fields.next()?;
        let signature = SignatureData { v: fields.next()?, r: fields.next()?, s: fields.next()? };

        Ok(Self {
            tx_type: TxType::Legacy,
            common: CommonFields {
                from: None,
                nonce: Some(nonce),
                gas,
                chain_id: signature.chain_id(),
                fee: GasFee::GasPrice(Some(gas_price)),
            },
            payload: Payload::Legacy { to, value, input },
            fee_payer: None,
            signatures: SignatureList::from(vec![signature]),
        })
    }

    fn decode_ethereum(
        tx_type: TxType,
        fields: &mut Fields<'_>,
    ) -> Result<Self, TransactionError> {
        let chain_id = fields.next()?;
        let nonce = fields.next()?;
        let fee = if tx_type == TxType::EthereumDynamicFee {
            GasFee::Dynamic {
                max_priority_fee_per_gas: Some(fields.next()?),
                max_fee_per_gas: Some(fields.next()?),
            }
        } else {
            GasFee::GasPrice(Some(fields.next()?))
        };
        let gas = fields.next()?;
        let to = fields.next_optional_address()?;
        let value: U256 = fields.next()?;
        let input: Bytes = fields.next()?;
        let access_list: AccessList = fields.next()?;
        let signature = SignatureData { v: fields.next()?, r: fields.next()?, s: fields.next()? };
        if signature.v > 1 {
            return Err(TransactionError::invalid("v", signature.v))
        }

        let payload = if tx_type == TxType::EthereumDynamicFee {
            Payload::EthereumDynamicFee { to, value, input, access_list }
        } else {
            Payload::EthereumAccessList { to, value, input, access_list }
        };
        Ok(Self {
            tx_type,
            common: CommonFields {
                from: None,
                nonce: Some(nonce),
                gas,
                chain_id: Some(chain_id),
                fee,
            },
            payload,
            fee_payer: None,
            signatures: SignatureList::from(vec![signature]),
        })
    }

    fn decode_native(tx_type: TxType, fields: &mut Fields<'_>) -> Result<Self, TransactionError> {
        let nonce = fields.next()?;
        let gas_price = fields.next()?;
        let gas = fields.next()?;

        let mut deploy_ratio = None;
        let (from, payload) = match tx_type.kind() {
            PayloadKind::ValueTransfer => {
                let to = fields.next()?;
                let value = fields.next()?;
                (fields.next()?, Payload::ValueTransfer { to, value })
            }
            PayloadKind::ValueTransferMemo => {
                let to = fields.next()?;
                let value = fields.next()?;
                let from = fields.next()?;
                (from, Payload::ValueTransferMemo { to, value, input: fields.next()? })
            }
            PayloadKind::SmartContractExecution => {
                let to = fields.next()?;
                let value = fields.next()?;
                let from = fields.next()?;
                (from, Payload::SmartContractExecution { to, value, input: fields.next()? })
            }
            PayloadKind::AccountUpdate => {
                let from = fields.next()?;
                (from, Payload::AccountUpdate { account_key: fields.next()? })
            }
            PayloadKind::SmartContractDeploy => {
                if fields.next_optional_address()?.is_some() {
                    return Err(TransactionError::invalid("to", "non-empty recipient"))
                }
                let value = fields.next()?;
                let from = fields.next()?;
                let input = fields.next()?;
                let human_readable: bool = fields.next()?;
                if human_readable {
                    return Err(TransactionError::invalid("humanReadable", human_readable))
                }
                if tx_type.has_fee_ratio() {
                    deploy_ratio = Some(fields.next_fee_ratio()?);
                }
                let code_format = CodeFormat::try_from(fields.next::<u8>()?)?;
                (from, Payload::SmartContractDeploy { value, input, code_format })
            }
            PayloadKind::Cancel => (fields.next()?, Payload::Cancel),
            PayloadKind::ChainDataAnchoring => {
                let from = fields.next()?;
                (from, Payload::ChainDataAnchoring { anchored_data: fields.next()? })
            }
            PayloadKind::Legacy |
            PayloadKind::EthereumAccessList |
            PayloadKind::EthereumDynamicFee => {
                return Err(TransactionError::UnknownTypeTag(tx_type.tag()))
            }
        };

        let fee_ratio = match deploy_ratio {
            Some(ratio) => Some(ratio),
            None if tx_type.has_fee_ratio() => Some(fields.next_fee_ratio()?),
            None => None,
        };
        let signatures: SignatureList = fields.next()?;
        let fee_payer = if tx_type.is_fee_delegated() {
            Some(FeePayerFields {
                fee_payer: fields.next_optional_address()?,
                fee_ratio,
                signatures: fields.next()?,
            })
        } else {
            None
        };

        Ok(Self {
            tx_type,
            common: CommonFields {
                from: Some(from),
                nonce: Some(nonce),
                gas,
                chain_id: None,
                fee: GasFee::GasPrice(Some(gas_price)),
            },
            payload,
            fee_payer,
            signatures,
        })
    }
}
