//! Validators and normalizers for the string forms accepted at the API boundary.
//!
//! Every `parse_*` helper takes the name of the field it is parsing so a rejected value is
//! reported as [`TransactionError::InvalidField`] naming that field.

use crate::TransactionError;
use alloy_primitives::{hex, Address, Bytes, B256, U256};
use std::str::FromStr;

/// Returns the string without its `0x`/`0X` prefix.
pub fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value)
}

/// Returns the string with a `0x` prefix.
pub fn add_hex_prefix(value: &str) -> String {
    format!("0x{}", strip_hex_prefix(value))
}

/// Matches `^(0x)?[0-9a-fA-F]*$`.
pub fn is_hex(value: &str) -> bool {
    strip_hex_prefix(value).bytes().all(|b| b.is_ascii_hexdigit())
}

/// Like [`is_hex`] but the `0x` prefix is mandatory.
pub fn is_hex_strict(value: &str) -> bool {
    (value.starts_with("0x") || value.starts_with("0X")) && is_hex(value)
}

/// Accepts a non-empty decimal number or a `0x` prefixed hex quantity.
pub fn is_number(value: &str) -> bool {
    if is_hex_strict(value) {
        return value.len() > 2
    }
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` for a 20 byte hex address that is all lowercase, all uppercase or a valid
/// EIP-55 checksum.
pub fn is_address(value: &str) -> bool {
    let body = strip_hex_prefix(value);
    body.len() == 40 && is_hex(body) && is_valid_checksum(value)
}

/// Checks the EIP-55 mixed case checksum. Single case addresses carry no checksum and pass.
pub fn is_valid_checksum(value: &str) -> bool {
    let body = strip_hex_prefix(value);
    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true
    }
    match Address::from_str(body) {
        Ok(address) => strip_hex_prefix(&address.to_checksum(None)) == body,
        Err(_) => false,
    }
}

/// EIP-55 checksummed form of an address.
pub fn to_checksum_address(address: &Address) -> String {
    address.to_checksum(None)
}

/// Parses a mandatory address.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, TransactionError> {
    if !is_address(value) {
        return Err(TransactionError::invalid(field, value))
    }
    Address::from_str(strip_hex_prefix(value)).map_err(|_| TransactionError::invalid(field, value))
}

/// Parses an address where `""` and `"0x"` stand for no address.
pub fn parse_optional_address(
    field: &'static str,
    value: &str,
) -> Result<Option<Address>, TransactionError> {
    if strip_hex_prefix(value).is_empty() {
        return Ok(None)
    }
    parse_address(field, value).map(Some)
}

/// Parses a decimal or `0x` prefixed hex quantity that must fit `T`.
pub fn parse_quantity<T>(field: &'static str, value: &str) -> Result<T, TransactionError>
where
    T: TryFrom<U256>,
{
    if !is_number(value) {
        return Err(TransactionError::invalid(field, value))
    }
    let parsed = if is_hex_strict(value) {
        U256::from_str_radix(strip_hex_prefix(value), 16)
    } else {
        U256::from_str_radix(value, 10)
    };
    parsed
        .ok()
        .and_then(|quantity| T::try_from(quantity).ok())
        .ok_or_else(|| TransactionError::invalid(field, value))
}

/// Parses an even length hex byte string, `0x` optional.
pub fn parse_hex_bytes(field: &'static str, value: &str) -> Result<Bytes, TransactionError> {
    if !is_hex(value) || strip_hex_prefix(value).len() % 2 != 0 {
        return Err(TransactionError::invalid(field, value))
    }
    hex::decode(strip_hex_prefix(value))
        .map(Bytes::from)
        .map_err(|_| TransactionError::invalid(field, value))
}

/// Parses a 32 byte hex string such as a storage key.
pub fn parse_b256(field: &'static str, value: &str) -> Result<B256, TransactionError> {
    let bytes = parse_hex_bytes(field, value)?;
    if bytes.len() != 32 {
        return Err(TransactionError::invalid(field, value))
    }
    Ok(B256::from_slice(&bytes))
}

/// Formats a quantity as minimal `0x` prefixed lowercase hex, zero being `0x0`.
pub fn to_hex_quantity(value: impl Into<U256>) -> String {
    format!("{:#x}", value.into())
}

/// Formats bytes as `0x` prefixed lowercase hex.
pub fn bytes_to_hex(value: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(value)
}
