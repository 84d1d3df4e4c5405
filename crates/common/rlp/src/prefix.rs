use crate::DecodeError;
use alloy_rlp::Error;
use bytes::BufMut;

/// Tag written in front of the RLP payload of a typed transaction.
///
/// Tags up to `0xff` occupy a single byte, larger tags are written as two big-endian bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePrefix(pub u16);

impl TypePrefix {
    /// Number of bytes the prefix occupies on the wire.
    pub const fn length(&self) -> usize {
        if self.0 > 0xff {
            2
        } else {
            1
        }
    }

    pub fn encode(&self, out: &mut dyn BufMut) {
        if self.0 > 0xff {
            out.put_u16(self.0);
        } else {
            out.put_u8(self.0 as u8);
        }
    }

    /// Reads a prefix of the given `width` without consuming it.
    pub fn peek(buf: &[u8], width: usize) -> Result<Self, DecodeError> {
        match (width, buf) {
            (1, [b, ..]) => Ok(Self(*b as u16)),
            (2, [hi, lo, ..]) => Ok(Self(u16::from_be_bytes([*hi, *lo]))),
            (1 | 2, _) => Err(DecodeError::too_short()),
            _ => Err(Error::Custom("type prefix width must be 1 or 2").into()),
        }
    }

    /// Leading byte of the prefix on the wire.
    pub const fn first_byte(&self) -> u8 {
        if self.0 > 0xff {
            (self.0 >> 8) as u8
        } else {
            self.0 as u8
        }
    }

    /// Checks that `buf` starts with this prefix and returns the remaining RLP payload.
    ///
    /// A leading byte that already differs is reported as a mismatch even when `buf` is shorter
    /// than the prefix.
    pub fn strip<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        let first = *buf.first().ok_or_else(DecodeError::too_short)?;
        if first != self.first_byte() {
            return Err(DecodeError::TypePrefixMismatch { expected: self.0, got: first as u16 })
        }
        let got = Self::peek(buf, self.length())?;
        if got != *self {
            return Err(DecodeError::TypePrefixMismatch { expected: self.0, got: got.0 })
        }
        Ok(&buf[self.length()..])
    }
}
