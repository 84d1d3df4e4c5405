use crate::{
    transaction::{util::secp256k1, SignatureData, SignatureList, Transaction},
    Signer, SignerError, TransactionError,
};
use alloy_primitives::{Address, B256};
use tracing::debug;

impl Transaction {
    /// Signs the transaction as its sender and appends the signature.
    ///
    /// `from` is taken from the signer when unset, otherwise it must match the signer.
    pub fn sign<S: Signer + ?Sized>(&mut self, signer: &S) -> Result<(), TransactionError> {
        let address = signer.address();
        match self.common.from {
            Some(from) if from != address => {
                return Err(TransactionError::invalid("from", address))
            }
            _ => {}
        }

        let mut signed = self.clone();
        signed.common.from = Some(address);
        let hash = signed.signature_hash()?;
        let signature = signer.sign_hash(hash)?;
        let signature = if signed.tx_type.is_ethereum_family() {
            SignatureData::from_y_parity(signature)
        } else {
            let chain_id =
                signed.common.chain_id.ok_or(TransactionError::missing(self.tx_type, "chainId"))?;
            SignatureData::from_signature(signature, chain_id)?
        };
        signed.append_signatures([signature])?;
        debug!(target: "klay::tx::sign", tx_type = %self.tx_type, %address, "Signed as sender");
        *self = signed;
        Ok(())
    }

    /// Signs the transaction as its fee payer and appends the signature.
    ///
    /// The fee payer is taken from the signer when unset, otherwise it must match the signer.
    pub fn sign_as_fee_payer<S: Signer + ?Sized>(
        &mut self,
        signer: &S,
    ) -> Result<(), TransactionError> {
        let address = signer.address();
        match self.fee_payer() {
            Some(fee_payer) if fee_payer != address => {
                return Err(TransactionError::invalid("feePayer", address))
            }
            _ => {}
        }

        let mut signed = self.clone();
        signed.set_fee_payer(address)?;
        let hash = signed.fee_payer_signature_hash()?;
        let chain_id =
            signed.common.chain_id.ok_or(TransactionError::missing(self.tx_type, "chainId"))?;
        let signature = SignatureData::from_signature(signer.sign_hash(hash)?, chain_id)?;
        signed.append_fee_payer_signatures([signature])?;
        debug!(target: "klay::tx::sign", tx_type = %self.tx_type, %address, "Signed as fee payer");
        *self = signed;
        Ok(())
    }

    /// The transaction with its chain id taken from the first signature when unset.
    fn with_signed_chain_id(&self, signatures: &SignatureList) -> Self {
        let mut tx = self.clone();
        if tx.common.chain_id.is_none() {
            tx.common.chain_id = signatures.first().and_then(SignatureData::chain_id);
        }
        tx
    }

    fn recover(
        &self,
        signatures: &SignatureList,
        hash: B256,
    ) -> Result<Vec<Address>, TransactionError> {
        if signatures.is_empty() {
            return Err(SignerError::EmptySignature.into())
        }
        let chain_id = if self.tx_type.is_ethereum_family() { None } else { self.common.chain_id };
        signatures
            .iter()
            .map(|signature| {
                let signature = signature.to_signature(chain_id)?;
                Ok(secp256k1::recover_signer(&signature, hash)?)
            })
            .collect()
    }

    /// Recovers the address behind every sender signature.
    pub fn recover_signers(&self) -> Result<Vec<Address>, TransactionError> {
        let tx = self.with_signed_chain_id(&self.signatures);
        tx.recover(&self.signatures, tx.signature_hash()?)
    }

    /// Recovers the address behind every fee payer signature.
    pub fn recover_fee_payers(&self) -> Result<Vec<Address>, TransactionError> {
        let signatures =
            self.fee_payer_signatures().ok_or(TransactionError::NotFeeDelegated(self.tx_type))?;
        let tx = self.with_signed_chain_id(signatures);
        tx.recover(signatures, tx.fee_payer_signature_hash()?)
    }
}
