/// Failure to read a typed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The RLP itself is malformed.
    #[error(transparent)]
    Rlp(#[from] alloy_rlp::Error),
    /// A complete item was read but input remains.
    #[error("{remaining} trailing bytes after the rlp item")]
    TrailingBytes { remaining: usize },
    #[error("type prefix mismatch: expected {expected:#x}, got {got:#x}")]
    TypePrefixMismatch { expected: u16, got: u16 },
}

impl DecodeError {
    pub(crate) const fn too_short() -> Self {
        Self::Rlp(alloy_rlp::Error::InputTooShort)
    }
}
