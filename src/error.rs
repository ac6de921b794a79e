//! The one fallible boundary this crate has: rendering a decoded symbol
//! into a caller-supplied output buffer.

/// Failure writing a decoded symbol into the host's output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("output buffer too small: need {needed} bytes, got {available}")]
    BufferTooSmall { needed: usize, available: usize },
}
