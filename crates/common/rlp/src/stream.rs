use alloy_rlp::{length_of_length, Encodable, Header, EMPTY_STRING_CODE};
use bytes::{BufMut, BytesMut};

/// Incrementally builds an RLP list whose items are heterogeneous.
///
/// Items are encoded into a scratch buffer as they are appended, the list header is written on
/// [`ListEncoder::finish`] once the payload length is known.
#[derive(Debug, Default, Clone)]
pub struct ListEncoder {
    payload: BytesMut,
}

impl ListEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an encodable item.
    pub fn append(&mut self, item: &dyn Encodable) -> &mut Self {
        item.encode(&mut self.payload);
        self
    }

    /// Appends an already RLP-encoded item verbatim.
    pub fn append_raw(&mut self, raw: &[u8]) -> &mut Self {
        self.payload.put_slice(raw);
        self
    }

    /// Appends the empty string `0x80`.
    pub fn append_empty(&mut self) -> &mut Self {
        self.payload.put_u8(EMPTY_STRING_CODE);
        self
    }

    /// Length of the finished list, header included.
    pub fn length(&self) -> usize {
        let payload_length = self.payload.len();
        payload_length + length_of_length(payload_length)
    }

    /// Writes the list header followed by the accumulated items.
    pub fn finish(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload.len() }.encode(out);
        out.put_slice(&self.payload);
    }

    /// Returns the finished list as a standalone buffer.
    pub fn out(&self) -> BytesMut {
        let mut out = BytesMut::with_capacity(self.length());
        self.finish(&mut out);
        out
    }
}
