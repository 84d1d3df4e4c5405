//! Collaborators a transaction relies on to be filled and signed.

use crate::{
    transaction::{util::secp256k1, Signature},
    ProviderError, SignerError,
};
use alloy_primitives::{Address, B256};
use auto_impl::auto_impl;
use ::secp256k1::SecretKey;

/// Source of the chain parameters needed to fill the optional fields of a transaction.
///
/// Implementations typically query a node. Retrying a failed fetch is up to the implementation.
#[auto_impl(&, Box, Arc)]
pub trait ChainParamsProvider {
    /// Next nonce of `address`, pending transactions included.
    fn nonce(&self, address: Address) -> Result<u64, ProviderError>;

    /// Suggested gas price.
    fn gas_price(&self) -> Result<u128, ProviderError>;

    fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Base fee of the latest block.
    fn base_fee_per_gas(&self) -> Result<u128, ProviderError>;

    /// Suggested priority fee.
    fn max_priority_fee_per_gas(&self) -> Result<u128, ProviderError>;
}

/// Produces signatures over 32 byte hashes.
#[auto_impl(&, Box, Arc)]
pub trait Signer {
    /// The address the produced signatures recover to.
    fn address(&self) -> Address;

    fn sign_hash(&self, hash: B256) -> Result<Signature, SignerError>;
}

/// A [`Signer`] holding a secp256k1 secret key in memory.
#[derive(Clone)]
pub struct LocalSigner {
    secret: SecretKey,
    address: Address,
}

impl LocalSigner {
    pub fn new(secret: SecretKey) -> Self {
        let public = secret.public_key(::secp256k1::SECP256K1);
        Self { secret, address: secp256k1::public_key_to_address(public) }
    }

    /// Creates a signer from a 32 byte secret.
    pub fn from_bytes(secret: B256) -> Result<Self, SignerError> {
        Ok(Self::new(SecretKey::from_slice(secret.as_slice())?))
    }
}

impl core::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocalSigner").field("address", &self.address).finish_non_exhaustive()
    }
}

impl Signer for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_hash(&self, hash: B256) -> Result<Signature, SignerError> {
        secp256k1::sign_message(&self.secret, hash)
    }
}
