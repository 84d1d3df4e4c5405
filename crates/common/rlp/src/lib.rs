//! RLP helpers for typed transactions.
//!
//! The codec itself comes from [`alloy_rlp`]. This crate adds what the transaction envelopes need
//! on top of it: the one or two byte [`TypePrefix`] written in front of a typed payload, a
//! [`ListEncoder`] for lists of heterogeneous fields, the positional [`Rlp`] cursor and the
//! untyped [`RlpItem`] tree.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cursor;
mod error;
mod item;
mod prefix;
mod stream;

pub use alloy_rlp::{
    encode_list, length_of_length, list_length, Decodable, Encodable, Error, Header,
    EMPTY_LIST_CODE, EMPTY_STRING_CODE,
};
pub use bytes::{Buf, BufMut, Bytes, BytesMut};

pub use cursor::{decode_exact, Rlp};
pub use error::DecodeError;
pub use item::RlpItem;
pub use prefix::TypePrefix;
pub use stream::ListEncoder;
