use crate::{
    transaction::{GasFee, Payload, SignatureData, Transaction},
    validate, TransactionError,
};
use alloy_primitives::{keccak256, Address, Bytes, B256};
use klay_rlp::{BufMut, BytesMut, Encodable, ListEncoder};

/// What an encoding is produced for, deciding which optional fields it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingPurpose {
    /// The raw transaction or the sender encoding.
    Transaction,
    /// The bytes a sender or fee payer signs.
    SignatureBase,
}

/// Fee fields once every optional value is known.
#[derive(Clone, Copy, Debug)]
enum ResolvedFee {
    GasPrice(u128),
    Dynamic { max_priority_fee_per_gas: u128, max_fee_per_gas: u128 },
}

/// Optional fields resolved for one encoding.
#[derive(Clone, Copy, Debug)]
struct Resolved {
    nonce: u64,
    fee: ResolvedFee,
    chain_id: Option<u64>,
}

impl Resolved {
    fn chain_id(&self, tx: &Transaction) -> Result<u64, TransactionError> {
        self.chain_id.ok_or(TransactionError::missing(tx.tx_type, "chainId"))
    }
}

fn append_recipient(stream: &mut ListEncoder, to: Option<Address>) {
    match to {
        Some(to) => stream.append(&to),
        None => stream.append_empty(),
    };
}

fn append_signature(stream: &mut ListEncoder, signature: SignatureData) {
    stream.append(&signature.v).append(&signature.r).append(&signature.s);
}

impl Transaction {
    /// Checks that the optional fields an encoding for `purpose` needs are set.
    ///
    /// Nonce and the fee fields are always needed. The chain id is needed by every signature
    /// base and by every encoding of the Ethereum typed family.
    pub fn validate_required_fields(
        &self,
        purpose: EncodingPurpose,
    ) -> Result<(), TransactionError> {
        self.resolve(purpose).map(drop)
    }

    fn resolve(&self, purpose: EncodingPurpose) -> Result<Resolved, TransactionError> {
        let missing = |field| TransactionError::missing(self.tx_type, field);
        let nonce = self.common.nonce.ok_or_else(|| missing("nonce"))?;
        let fee = match self.common.fee {
            GasFee::GasPrice(price) => {
                ResolvedFee::GasPrice(price.ok_or_else(|| missing("gasPrice"))?)
            }
            GasFee::Dynamic { max_priority_fee_per_gas, max_fee_per_gas } => ResolvedFee::Dynamic {
                max_priority_fee_per_gas: max_priority_fee_per_gas
                    .ok_or_else(|| missing("maxPriorityFeePerGas"))?,
                max_fee_per_gas: max_fee_per_gas.ok_or_else(|| missing("maxFeePerGas"))?,
            },
        };
        let chain_id = self.common.chain_id;
        if chain_id.is_none() &&
            (purpose == EncodingPurpose::SignatureBase || self.tx_type.is_ethereum_family())
        {
            return Err(missing("chainId"))
        }
        Ok(Resolved { nonce, fee, chain_id })
    }

    fn append_fee(stream: &mut ListEncoder, fee: ResolvedFee) {
        match fee {
            ResolvedFee::GasPrice(price) => stream.append(&price),
            ResolvedFee::Dynamic { max_priority_fee_per_gas, max_fee_per_gas } => {
                stream.append(&max_priority_fee_per_gas).append(&max_fee_per_gas)
            }
        };
    }

    /// Writes `[nonce, gasPrice, gas, <payload>, (feeRatio)]` of a native type.
    fn append_native_fields(
        &self,
        resolved: &Resolved,
        stream: &mut ListEncoder,
    ) -> Result<(), TransactionError> {
        let from = self.common.from.ok_or(TransactionError::missing(self.tx_type, "from"))?;
        let fee_ratio = if self.tx_type.has_fee_ratio() {
            Some(self.fee_ratio().ok_or(TransactionError::missing(self.tx_type, "feeRatio"))?)
        } else {
            None
        };

        stream.append(&resolved.nonce);
        Self::append_fee(stream, resolved.fee);
        stream.append(&self.common.gas);
        match &self.payload {
            Payload::ValueTransfer { to, value } => {
                stream.append(to).append(value).append(&from);
            }
            Payload::ValueTransferMemo { to, value, input } |
            Payload::SmartContractExecution { to, value, input } => {
                stream.append(to).append(value).append(&from).append(input);
            }
            Payload::AccountUpdate { account_key } => {
                stream.append(&from).append(account_key);
            }
            Payload::SmartContractDeploy { value, input, code_format } => {
                stream.append_empty().append(value).append(&from).append(input).append(&false);
                if let Some(ratio) = fee_ratio {
                    stream.append(&ratio.get());
                }
                stream.append(&(*code_format as u8));
                return Ok(())
            }
            Payload::Cancel => {
                stream.append(&from);
            }
            Payload::ChainDataAnchoring { anchored_data } => {
                stream.append(&from).append(anchored_data);
            }
            Payload::Legacy { .. } |
            Payload::EthereumAccessList { .. } |
            Payload::EthereumDynamicFee { .. } => {
                return Err(TransactionError::invalid("txType", self.tx_type))
            }
        }
        if let Some(ratio) = fee_ratio {
            stream.append(&ratio.get());
        }
        Ok(())
    }

    /// Writes the fields shared by the signature base and the full encoding of the Ethereum
    /// typed family, up to and including the access list.
    fn append_ethereum_fields(
        &self,
        resolved: &Resolved,
        stream: &mut ListEncoder,
    ) -> Result<(), TransactionError> {
        stream.append(&resolved.chain_id(self)?).append(&resolved.nonce);
        Self::append_fee(stream, resolved.fee);
        stream.append(&self.common.gas);
        append_recipient(stream, self.payload.to());
        stream.append(&self.payload.value()).append(self.payload.input());
        match self.payload.access_list() {
            Some(access_list) => stream.append(access_list),
            None => return Err(TransactionError::invalid("txType", self.tx_type)),
        };
        Ok(())
    }

    fn append_legacy_fields(&self, resolved: &Resolved, stream: &mut ListEncoder) {
        stream.append(&resolved.nonce);
        Self::append_fee(stream, resolved.fee);
        stream.append(&self.common.gas);
        append_recipient(stream, self.payload.to());
        stream.append(&self.payload.value()).append(self.payload.input());
    }

    fn with_prefix(&self, stream: &ListEncoder) -> Bytes {
        let prefix = self.tx_type.prefix();
        let mut out =
            BytesMut::with_capacity(prefix.map_or(0, |prefix| prefix.length()) + stream.length());
        if let Some(prefix) = prefix {
            prefix.encode(&mut out);
        }
        stream.finish(&mut out);
        out.freeze().into()
    }

    /// `type || RLP([F..., senderSignatures])`, the encoding the sender transaction hash is
    /// computed over. For legacy and Ethereum typed transactions this is the full encoding.
    pub fn sender_tx_encoding(&self) -> Result<Bytes, TransactionError> {
        if !self.tx_type.is_native() {
            return self.full_encoding()
        }
        let resolved = self.resolve(EncodingPurpose::Transaction)?;
        let mut stream = ListEncoder::new();
        self.append_native_fields(&resolved, &mut stream)?;
        stream.append(&self.signatures);
        Ok(self.with_prefix(&stream))
    }

    /// The raw transaction, ready to be broadcast.
    pub fn full_encoding(&self) -> Result<Bytes, TransactionError> {
        let resolved = self.resolve(EncodingPurpose::Transaction)?;
        let mut stream = ListEncoder::new();
        if self.tx_type.is_ethereum_family() {
            self.append_ethereum_fields(&resolved, &mut stream)?;
            append_signature(&mut stream, self.signatures.first_or_empty());
        } else if self.tx_type.is_native() {
            self.append_native_fields(&resolved, &mut stream)?;
            stream.append(&self.signatures);
            if let Some(fields) = &self.fee_payer {
                append_recipient(&mut stream, fields.fee_payer);
                stream.append(&fields.signatures);
            }
        } else {
            self.append_legacy_fields(&resolved, &mut stream);
            append_signature(&mut stream, self.signatures.first_or_empty());
        }
        Ok(self.with_prefix(&stream))
    }

    /// The raw transaction as `0x` prefixed hex.
    pub fn raw_transaction_hex(&self) -> Result<String, TransactionError> {
        self.full_encoding().map(validate::bytes_to_hex)
    }

    /// `RLP([type, F...])` of a native type, the part both signature bases wrap.
    fn native_signing_payload(&self, resolved: &Resolved) -> Result<BytesMut, TransactionError> {
        let mut inner = ListEncoder::new();
        inner.append(&self.tx_type.tag());
        self.append_native_fields(resolved, &mut inner)?;
        Ok(inner.out())
    }

    /// The bytes the sender signs.
    pub fn signature_base_encoding(&self) -> Result<Bytes, TransactionError> {
        let resolved = self.resolve(EncodingPurpose::SignatureBase)?;
        let chain_id = resolved.chain_id(self)?;
        let mut stream = ListEncoder::new();
        if self.tx_type.is_ethereum_family() {
            self.append_ethereum_fields(&resolved, &mut stream)?;
            let mut out = BytesMut::with_capacity(1 + stream.length());
            out.put_u8(self.tx_type.tag() as u8);
            stream.finish(&mut out);
            return Ok(out.freeze().into())
        }
        if self.tx_type.is_native() {
            let inner = self.native_signing_payload(&resolved)?;
            stream.append(&&inner[..]);
        } else {
            self.append_legacy_fields(&resolved, &mut stream);
        }
        stream.append(&chain_id).append(&0_u8).append(&0_u8);
        Ok(stream.out().freeze().into())
    }

    /// The bytes the fee payer signs, `RLP([RLP([type, F...]), feePayer, chainId, 0, 0])`.
    pub fn fee_payer_signature_base_encoding(&self) -> Result<Bytes, TransactionError> {
        let fields =
            self.fee_payer.as_ref().ok_or(TransactionError::NotFeeDelegated(self.tx_type))?;
        let fee_payer =
            fields.fee_payer().ok_or(TransactionError::missing(self.tx_type, "feePayer"))?;
        let resolved = self.resolve(EncodingPurpose::SignatureBase)?;
        let inner = self.native_signing_payload(&resolved)?;
        let mut stream = ListEncoder::new();
        stream
            .append(&&inner[..])
            .append(&fee_payer)
            .append(&resolved.chain_id(self)?)
            .append(&0_u8)
            .append(&0_u8);
        Ok(stream.out().freeze().into())
    }

    /// Hash of the raw transaction. The leading `0x78` envelope byte of the Ethereum typed family
    /// is not hashed.
    pub fn transaction_hash(&self) -> Result<B256, TransactionError> {
        let raw = self.full_encoding()?;
        if self.tx_type.is_ethereum_family() {
            return Ok(keccak256(&raw[1..]))
        }
        Ok(keccak256(&raw))
    }

    /// Hash of the sender encoding. Equals [`Transaction::transaction_hash`] unless the type is
    /// fee delegated.
    pub fn sender_tx_hash(&self) -> Result<B256, TransactionError> {
        if !self.tx_type.is_fee_delegated() {
            return self.transaction_hash()
        }
        self.sender_tx_encoding().map(keccak256)
    }

    /// Hash the sender signs.
    pub fn signature_hash(&self) -> Result<B256, TransactionError> {
        self.signature_base_encoding().map(keccak256)
    }

    /// Hash the fee payer signs.
    pub fn fee_payer_signature_hash(&self) -> Result<B256, TransactionError> {
        self.fee_payer_signature_base_encoding().map(keccak256)
    }
}
