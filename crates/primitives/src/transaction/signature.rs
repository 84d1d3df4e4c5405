use crate::{SignerError, TransactionError};
use alloy_primitives::U256;
use bytes::BufMut;
use klay_rlp::{length_of_length, Decodable, Encodable, Error as RlpError, Header};

/// r, s: Values corresponding to the signature of the
/// transaction and used to determine the sender of
/// the transaction; formally Tr and Ts. This is expanded in Appendix F of yellow paper.
///
/// This is the raw output of a signer, before it is bound to a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    /// The R field of the signature; the point on the curve.
    pub r: U256,
    /// The S field of the signature; the point on the curve.
    pub s: U256,
    /// yParity: Signature Y parity; formally Ty
    pub odd_y_parity: bool,
}

/// A signature as it is carried by a transaction: `[v, r, s]`.
///
/// For legacy and native transactions `v` follows EIP-155, for the Ethereum typed family `v` is the
/// bare y parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignatureData {
    /// Recovery value.
    pub v: u64,
    /// The R field of the signature.
    pub r: U256,
    /// The S field of the signature.
    pub s: U256,
}

impl Default for SignatureData {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl SignatureData {
    /// Placeholder used where a signature slot must be present but nothing is signed yet.
    pub const EMPTY: Self = Self { v: 1, r: U256::ZERO, s: U256::ZERO };

    pub const fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Binds a raw signature to `chain_id` with `v = parity + chain_id * 2 + 35`.
    ///
    /// Fails when `v` does not fit in a `u64`.
    pub fn from_signature(signature: Signature, chain_id: u64) -> Result<Self, TransactionError> {
        let v = chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(35 + u64::from(signature.odd_y_parity)))
            .ok_or_else(|| TransactionError::invalid("chainId", chain_id))?;
        Ok(Self { v, r: signature.r, s: signature.s })
    }

    /// Keeps the bare y parity as `v`, as the Ethereum typed envelopes do.
    pub const fn from_y_parity(signature: Signature) -> Self {
        Self { v: signature.odd_y_parity as u64, r: signature.r, s: signature.s }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// The chain id encoded in an EIP-155 `v`, if any.
    pub const fn chain_id(&self) -> Option<u64> {
        if self.v >= 35 {
            Some((self.v - 35) / 2)
        } else {
            None
        }
    }

    /// Returns the y parity carried by `v`.
    ///
    /// When `chain_id` is given an EIP-155 `v` must belong to it.
    pub fn odd_y_parity(&self, chain_id: Option<u64>) -> Result<bool, SignerError> {
        let invalid = SignerError::InvalidRecoveryId { v: self.v, chain_id };
        match self.v {
            0 | 1 => Ok(self.v == 1),
            27 | 28 => Ok(self.v == 28),
            v if v >= 35 => {
                if chain_id.is_some_and(|id| self.chain_id() != Some(id)) {
                    return Err(invalid)
                }
                Ok((v - 35) % 2 == 1)
            }
            _ => Err(invalid),
        }
    }

    /// Recovery id used by secp256k1 recovery.
    pub fn recovery_id(&self, chain_id: Option<u64>) -> Result<i32, SignerError> {
        self.odd_y_parity(chain_id).map(i32::from)
    }

    /// The raw signature, with the parity resolved against `chain_id`.
    pub fn to_signature(&self, chain_id: Option<u64>) -> Result<Signature, SignerError> {
        Ok(Signature { r: self.r, s: self.s, odd_y_parity: self.odd_y_parity(chain_id)? })
    }

    fn payload_len(&self) -> usize {
        self.v.length() + self.r.length() + self.s.length()
    }
}

impl Encodable for SignatureData {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_len() }.encode(out);
        self.v.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_len();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for SignatureData {
    fn decode(buf: &mut &[u8]) -> Result<Self, RlpError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(RlpError::UnexpectedString)
        }
        let started_len = buf.len();
        let this = Self {
            v: Decodable::decode(buf)?,
            r: Decodable::decode(buf)?,
            s: Decodable::decode(buf)?,
        };
        let consumed = started_len - buf.len();
        if consumed != header.payload_length {
            return Err(RlpError::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            })
        }
        Ok(this)
    }
}

static UNSIGNED: [SignatureData; 1] = [SignatureData::EMPTY];

/// Ordered list of signatures.
///
/// The list is kept refined: empty signatures and duplicates are dropped on insertion, the first
/// occurrence wins. An empty list still encodes a single [`SignatureData::EMPTY`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SignatureList(Vec<SignatureData>);

impl SignatureList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends signatures, skipping empty ones and those already present.
    pub fn extend<I: IntoIterator<Item = SignatureData>>(&mut self, signatures: I) {
        for signature in signatures {
            if !signature.is_empty() && !self.0.contains(&signature) {
                self.0.push(signature);
            }
        }
    }

    pub fn push(&mut self, signature: SignatureData) {
        self.extend([signature])
    }

    /// Returns `true` if no non-empty signature is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, SignatureData> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&SignatureData> {
        self.0.first()
    }

    /// The first signature, or [`SignatureData::EMPTY`] when nothing is signed.
    pub fn first_or_empty(&self) -> SignatureData {
        self.0.first().copied().unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[SignatureData] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<SignatureData> {
        self.0
    }

    fn encoded_items(&self) -> &[SignatureData] {
        if self.0.is_empty() {
            &UNSIGNED
        } else {
            &self.0
        }
    }
}

impl FromIterator<SignatureData> for SignatureList {
    fn from_iter<T: IntoIterator<Item = SignatureData>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl From<Vec<SignatureData>> for SignatureList {
    fn from(signatures: Vec<SignatureData>) -> Self {
        signatures.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a SignatureList {
    type Item = &'a SignatureData;
    type IntoIter = core::slice::Iter<'a, SignatureData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Encodable for SignatureList {
    fn encode(&self, out: &mut dyn BufMut) {
        klay_rlp::encode_list::<_, SignatureData>(self.encoded_items(), out)
    }

    fn length(&self) -> usize {
        klay_rlp::list_length::<_, SignatureData>(self.encoded_items())
    }
}

impl Decodable for SignatureList {
    fn decode(buf: &mut &[u8]) -> Result<Self, RlpError> {
        Vec::<SignatureData>::decode(buf).map(Into::into)
    }
}
