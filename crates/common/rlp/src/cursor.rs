use crate::DecodeError;
use alloy_rlp::{Decodable, Error, Header};

/// Decodes a single `T` from `buf` and fails if anything is left over.
pub fn decode_exact<T: Decodable>(mut buf: &[u8]) -> Result<T, DecodeError> {
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(DecodeError::TrailingBytes { remaining: buf.len() })
    }
    Ok(value)
}

/// Positional cursor over the items of an RLP list.
///
/// Transaction bodies are read field by field, so the cursor hands out one item at a time and
/// reports `None` once the list is exhausted instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct Rlp<'a> {
    payload_view: &'a [u8],
}

impl<'a> Rlp<'a> {
    /// Opens the list at the start of `payload`, ignoring whatever follows it.
    pub fn new(mut payload: &'a [u8]) -> Result<Self, DecodeError> {
        let payload_length = list_header(&mut payload)?;
        Ok(Self { payload_view: &payload[..payload_length] })
    }

    /// Like [`Rlp::new`] but the list must span the whole of `payload`.
    pub fn new_exact(mut payload: &'a [u8]) -> Result<Self, DecodeError> {
        let payload_length = list_header(&mut payload)?;
        if payload.len() != payload_length {
            return Err(DecodeError::TrailingBytes { remaining: payload.len() - payload_length })
        }
        Ok(Self { payload_view: payload })
    }

    pub fn get_next<T: Decodable>(&mut self) -> Result<Option<T>, DecodeError> {
        if self.payload_view.is_empty() {
            return Ok(None)
        }
        Ok(Some(T::decode(&mut self.payload_view)?))
    }

    /// Returns the next item without interpreting it, header included.
    pub fn get_next_raw(&mut self) -> Result<Option<&'a [u8]>, DecodeError> {
        if self.payload_view.is_empty() {
            return Ok(None)
        }
        let start = self.payload_view;
        let mut rest = start;
        let h = Header::decode(&mut rest)?;
        let consumed = start.len() - rest.len() + h.payload_length;
        self.payload_view = &start[consumed..];
        Ok(Some(&start[..consumed]))
    }

    /// Counts the items left in the list by walking their headers.
    pub fn item_count(&self) -> Result<usize, DecodeError> {
        let mut cursor = *self;
        let mut count = 0;
        while cursor.get_next_raw()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Returns `true` once every item has been consumed.
    pub fn is_empty(&self) -> bool {
        self.payload_view.is_empty()
    }
}

/// Reads a list header, leaving `buf` at the start of its payload.
fn list_header(buf: &mut &[u8]) -> Result<usize, DecodeError> {
    let h = Header::decode(buf)?;
    if !h.list {
        return Err(Error::UnexpectedString.into())
    }
    Ok(h.payload_length)
}
