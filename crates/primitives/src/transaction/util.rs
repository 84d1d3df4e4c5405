use alloy_primitives::{keccak256, Address};

/// Secp256k1 signing and public key recovery.
pub mod secp256k1 {
    use super::*;
    use crate::{transaction::Signature, SignerError};
    use ::secp256k1::{
        ecdsa::{RecoverableSignature, RecoveryId},
        Message, PublicKey, SecretKey, SECP256K1,
    };
    use alloy_primitives::{B256, U256};

    /// Recovers the address of the sender using secp256k1 pubkey recovery.
    ///
    /// Converts the public key into an ethereum address by hashing the public key with keccak256.
    pub fn recover_signer(signature: &Signature, hash: B256) -> Result<Address, SignerError> {
        let mut compact = [0_u8; 64];
        compact[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
        compact[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());
        let recovery_id = RecoveryId::from_i32(i32::from(signature.odd_y_parity))?;
        let signature = RecoverableSignature::from_compact(&compact, recovery_id)?;

        let message = Message::from_digest_slice(hash.as_slice())?;
        let public = SECP256K1.recover_ecdsa(&message, &signature)?;
        Ok(public_key_to_address(public))
    }

    /// Signs message with the given secret key.
    /// Returns the corresponding signature.
    pub fn sign_message(secret: &SecretKey, message: B256) -> Result<Signature, SignerError> {
        let message = Message::from_digest_slice(message.as_slice())?;
        let (rec_id, data) = SECP256K1.sign_ecdsa_recoverable(&message, secret).serialize_compact();

        Ok(Signature {
            r: U256::from_be_slice(&data[..32]),
            s: U256::from_be_slice(&data[32..64]),
            odd_y_parity: rec_id.to_i32() != 0,
        })
    }

    /// Converts a public key into an ethereum address by hashing the encoded public key with
    /// keccak256.
    pub fn public_key_to_address(public: PublicKey) -> Address {
        // strip out the first byte because that should be the SECP256K1_TAG_PUBKEY_UNCOMPRESSED
        // tag returned by libsecp's uncompressed pubkey serialization
        let hash = keccak256(&public.serialize_uncompressed()[1..]);
        Address::from_slice(&hash[12..])
    }
}
