//! # Error Types
//!
//! Error handling for symbol table decoding.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.
//!
//! Decoding is strict: every error aborts the record being decoded and carries
//! the byte offset where that record started plus its zero-based index in the
//! stream. Rendering never fails, so nothing in the C type model returns these.

use thiserror::Error;

use crate::types::encoded::TypeError;

/// Main error type for symbol table decoding
///
/// ## Error Categories
///
/// 1. **Stream errors**: Truncated
/// 2. **Shape errors**: UnknownKind
/// 3. **Type errors**: MalformedType
/// 4. **Container errors**: InvalidMagic, UnsupportedVersion
/// 5. **I/O errors**: Io (reading the file from disk)
///
/// Clean end-of-stream is not an error; the reader reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum SymError
{
    /// The stream ended in the middle of a record
    ///
    /// This happens when:
    /// - Fewer than 5 header bytes remain after a record boundary
    /// - A length-prefixed name or tag runs past the end
    /// - A dimension list has no terminating zero before the end
    #[error("truncated symbol table: record {index} at offset 0x{offset:x} ends while reading {context}")]
    Truncated
    {
        /// Offset of the first byte of the failing record
        offset: u64,
        /// Zero-based record index
        index: usize,
        /// What was being read when the data ran out
        context: &'static str,
    },

    /// The header carries a kind tag with no known body shape
    ///
    /// Body lengths of unknown kinds cannot be inferred, so decoding stops here.
    #[error("unsupported symbol kind 0x{kind:02X}: record {index} at offset 0x{offset:x}")]
    UnknownKind
    {
        /// The raw kind byte
        kind: u8,
        /// Offset of the first byte of the failing record
        offset: u64,
        /// Zero-based record index
        index: usize,
    },

    /// A definition record carries a type word the codec rejects
    #[error("malformed type in record {index} at offset 0x{offset:x}: {source}")]
    MalformedType
    {
        /// The codec error
        source: TypeError,
        /// Offset of the first byte of the failing record
        offset: u64,
        /// Zero-based record index
        index: usize,
    },

    /// The file does not start with the `MND` signature
    #[error("invalid magic: expected \"MND\", got {actual:02x?}")]
    InvalidMagic
    {
        /// The bytes found where the signature should be
        actual: Vec<u8>,
    },

    /// The file header names a format version we cannot read
    #[error("unsupported symbol file version: {0}")]
    UnsupportedVersion(u8),

    /// I/O error (reading the symbol file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SymError
{
    /// Offset of the record that failed, for errors tied to a record.
    #[must_use]
    pub fn offset(&self) -> Option<u64>
    {
        match self {
            SymError::Truncated { offset, .. }
            | SymError::UnknownKind { offset, .. }
            | SymError::MalformedType { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Index of the record that failed, for errors tied to a record.
    #[must_use]
    pub fn record_index(&self) -> Option<usize>
    {
        match self {
            SymError::Truncated { index, .. }
            | SymError::UnknownKind { index, .. }
            | SymError::MalformedType { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Whether the error means the input ended early.
    #[must_use]
    pub fn is_truncation(&self) -> bool
    {
        matches!(self, SymError::Truncated { .. })
    }
}

/// Convenience type alias for `Result<T, SymError>`
///
/// ```rust
/// use psxsym_core::error::Result;
/// fn foo() -> Result<()>
/// {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, SymError>;
