use crate::{
    transaction::{GasFee, SignatureData, Transaction},
    TransactionError,
};
use alloy_primitives::Bytes;
use tracing::{debug, trace};

impl Transaction {
    /// Returns `true` if `other` describes the same transaction.
    ///
    /// `from` is compared when the type encodes it or both sides know it, the chain id when both
    /// sides know it (always for the Ethereum typed family) and the fee payer when both sides have
    /// one. With `check_signatures` both signature lists must match as well.
    pub fn compare_fields(&self, other: &Self, check_signatures: bool) -> bool {
        if self.tx_type != other.tx_type {
            return false
        }
        let (ours, theirs) = (&self.common, &other.common);
        if ours.nonce != theirs.nonce || ours.gas != theirs.gas || ours.fee != theirs.fee {
            return false
        }
        let from_known =
            self.tx_type.is_native() || (ours.from.is_some() && theirs.from.is_some());
        if from_known && ours.from != theirs.from {
            return false
        }
        let chain_id_known = self.tx_type.is_ethereum_family() ||
            (ours.chain_id.is_some() && theirs.chain_id.is_some());
        if chain_id_known && ours.chain_id != theirs.chain_id {
            return false
        }
        if self.payload != other.payload || self.fee_ratio() != other.fee_ratio() {
            return false
        }
        if let (Some(ours), Some(theirs)) = (self.fee_payer(), other.fee_payer()) {
            if ours != theirs {
                return false
            }
        }
        if check_signatures {
            return self.signatures == other.signatures &&
                self.fee_payer_signatures() == other.fee_payer_signatures()
        }
        true
    }

    /// Appends sender signatures.
    ///
    /// Legacy and Ethereum typed transactions hold a single signature: appending to a signed one
    /// or appending more than one at once fails and leaves the transaction unchanged. Ethereum
    /// typed transactions additionally need `v` to be the bare y parity.
    pub fn append_signatures<I>(&mut self, signatures: I) -> Result<(), TransactionError>
    where
        I: IntoIterator<Item = SignatureData>,
    {
        let signatures: Vec<_> = signatures.into_iter().collect();
        if self.tx_type.is_single_signature() && !signatures.is_empty() {
            let existing = !self.signatures.is_empty();
            if existing || signatures.len() > 1 {
                return Err(TransactionError::SignatureCapacityExceeded {
                    tx_type: self.tx_type,
                    existing,
                    supplied: signatures.len(),
                })
            }
            if self.tx_type.is_ethereum_family() {
                if let Some(invalid) = signatures.iter().find(|signature| signature.v > 1) {
                    return Err(TransactionError::invalid("v", invalid.v))
                }
            }
        }
        trace!(
            target: "klay::tx::sign",
            tx_type = %self.tx_type,
            count = signatures.len(),
            "Appending signatures"
        );
        self.signatures.extend(signatures);
        Ok(())
    }

    /// Appends fee payer signatures. Fails if the type is not fee delegated.
    pub fn append_fee_payer_signatures<I>(
        &mut self,
        signatures: I,
    ) -> Result<(), TransactionError>
    where
        I: IntoIterator<Item = SignatureData>,
    {
        let fields =
            self.fee_payer.as_mut().ok_or(TransactionError::NotFeeDelegated(self.tx_type))?;
        fields.signatures.extend(signatures);
        Ok(())
    }

    /// Takes every unset optional field from `candidate`.
    fn adopt_unset_fields(&mut self, candidate: &Self) {
        let common = &mut self.common;
        common.nonce = common.nonce.or(candidate.common.nonce);
        common.chain_id = common.chain_id.or(candidate.common.chain_id);
        common.from = common.from.or(candidate.common.from);
        common.fee = match (common.fee, candidate.common.fee) {
            (GasFee::GasPrice(ours), GasFee::GasPrice(theirs)) => {
                GasFee::GasPrice(ours.or(theirs))
            }
            (
                GasFee::Dynamic { max_priority_fee_per_gas, max_fee_per_gas },
                GasFee::Dynamic {
                    max_priority_fee_per_gas: their_priority_fee,
                    max_fee_per_gas: their_max_fee,
                },
            ) => GasFee::Dynamic {
                max_priority_fee_per_gas: max_priority_fee_per_gas.or(their_priority_fee),
                max_fee_per_gas: max_fee_per_gas.or(their_max_fee),
            },
            (ours, _) => ours,
        };
        if let (Some(ours), Some(theirs)) = (self.fee_payer.as_mut(), candidate.fee_payer()) {
            if ours.fee_payer().is_none() {
                ours.fee_payer = Some(theirs);
            }
        }
    }

    /// Merges the signatures of raw transactions describing this same transaction and returns the
    /// combined raw transaction.
    ///
    /// Unset optional fields are taken from the first candidate that has them. Every candidate is
    /// checked before anything is merged: on error the transaction is left unchanged.
    pub fn combine_signed_raw_transactions<T: AsRef<[u8]>>(
        &mut self,
        candidates: &[T],
    ) -> Result<Bytes, TransactionError> {
        let decoded = candidates
            .iter()
            .map(|raw| Self::decode(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(other) = decoded.iter().find(|tx| tx.tx_type != self.tx_type) {
            return Err(TransactionError::TypeTagMismatch {
                expected: self.tx_type,
                got: other.tx_type.tag(),
            })
        }

        let mut merged = self.clone();
        for candidate in &decoded {
            merged.adopt_unset_fields(candidate);
        }
        if let Some(candidate) = decoded.iter().position(|tx| !merged.compare_fields(tx, false)) {
            debug!(
                target: "klay::tx::combine",
                tx_type = %self.tx_type,
                candidate,
                "Conflicting candidate"
            );
            return Err(TransactionError::TransactionConflict { tx_type: self.tx_type, candidate })
        }

        for candidate in &decoded {
            merged.append_signatures(candidate.signatures.iter().copied())?;
        }
        if merged.tx_type.is_fee_delegated() {
            for candidate in &decoded {
                if let Some(signatures) = candidate.fee_payer_signatures() {
                    merged.append_fee_payer_signatures(signatures.iter().copied())?;
                }
            }
        }

        let raw = merged.full_encoding()?;
        debug!(
            target: "klay::tx::combine",
            tx_type = %merged.tx_type,
            candidates = candidates.len(),
            signatures = merged.signatures.len(),
            "Combined raw transactions"
        );
        *self = merged;
        Ok(raw)
    }
}
