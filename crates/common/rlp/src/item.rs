use alloy_rlp::{Decodable, Encodable, Header};
use bytes::{Buf, BufMut, Bytes};

/// An untyped RLP tree: either a byte string or a list of nested items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    String(Bytes),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Returns the nested items if this is a list.
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::String(_) => None,
        }
    }

    /// Returns the raw bytes if this is a string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::String(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            RlpItem::String(bytes) => bytes.encode(out),
            RlpItem::List(items) => items.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            RlpItem::String(bytes) => bytes.length(),
            RlpItem::List(items) => items.length(),
        }
    }
}

impl Decodable for RlpItem {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let mut peek = *buf;
        let h = Header::decode(&mut peek)?;
        if !h.list {
            return Bytes::decode(buf).map(RlpItem::String)
        }

        let mut payload = &peek[..h.payload_length];
        let mut items = Vec::new();
        while !payload.is_empty() {
            items.push(RlpItem::decode(&mut payload)?);
        }
        buf.advance(buf.len() - peek.len() + h.payload_length);
        Ok(RlpItem::List(items))
    }
}
