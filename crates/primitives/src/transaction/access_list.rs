use crate::{validate, TransactionError};
use alloy_primitives::{Address, B256};
use bytes::BufMut;
use klay_rlp::{length_of_length, Decodable, Encodable, Error as RlpError, Header};
use std::mem;

/// A list of addresses and storage keys that the transaction plans to access.
/// Accesses outside the list are possible, but become more expensive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct AccessListItem {
    /// Account addresses that would be loaded at the start of execution
    pub address: Address,
    /// Keys of storage that would be loaded at the start of execution
    pub storage_keys: Vec<B256>,
}

impl AccessListItem {
    /// Parses an item from its hex string form, validating every key.
    pub fn parse<S: AsRef<str>>(
        address: &str,
        storage_keys: &[S],
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            address: validate::parse_address("accessList.address", address)?,
            storage_keys: storage_keys
                .iter()
                .map(|key| validate::parse_b256("accessList.storageKeys", key.as_ref()))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Calculates a heuristic for the in-memory size of the [AccessListItem].
    #[inline]
    pub fn size(&self) -> usize {
        mem::size_of::<Address>() + self.storage_keys.capacity() * mem::size_of::<B256>()
    }

    fn payload_len(&self) -> usize {
        self.address.length() + self.storage_keys.length()
    }
}

impl Encodable for AccessListItem {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_len() }.encode(out);
        self.address.encode(out);
        self.storage_keys.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_len();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for AccessListItem {
    fn decode(buf: &mut &[u8]) -> Result<Self, RlpError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(RlpError::UnexpectedString)
        }
        let (mut payload, rest) = buf.split_at(header.payload_length);
        let item = Self {
            address: Address::decode(&mut payload)?,
            storage_keys: Vec::decode(&mut payload)?,
        };
        if !payload.is_empty() {
            return Err(RlpError::ListLengthMismatch {
                expected: header.payload_length,
                got: header.payload_length - payload.len(),
            })
        }
        *buf = rest;
        Ok(item)
    }
}

/// AccessList as defined in EIP-2930
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, AccessListItem> {
        self.0.iter()
    }

    /// Calculates a heuristic for the in-memory size of the [AccessList].
    #[inline]
    pub fn size(&self) -> usize {
        // take into account capacity
        self.0.iter().map(AccessListItem::size).sum::<usize>() +
            self.0.capacity() * mem::size_of::<AccessListItem>()
    }
}

impl From<Vec<AccessListItem>> for AccessList {
    fn from(items: Vec<AccessListItem>) -> Self {
        Self(items)
    }
}

impl Encodable for AccessList {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out)
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}

impl Decodable for AccessList {
    fn decode(buf: &mut &[u8]) -> Result<Self, RlpError> {
        Vec::decode(buf).map(Self)
    }
}
