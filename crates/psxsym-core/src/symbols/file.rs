//! `.SYM` file container.
//!
//! A symbol file is an 8-byte header followed by the record stream:
//!
//! ```text
//! Magic:u8[3] = "MND"  Version:u8  Unit:u8  Reserved:u8[3]
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Symbol, SymbolReader};
use crate::error::{Result, SymError};

/// File signature.
pub const MAGIC: &[u8; 3] = b"MND";

/// The only container version in circulation.
pub const SUPPORTED_VERSION: u8 = 1;

/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: usize = 8;

/// Parsed `.SYM` file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader
{
    /// Container format version
    pub version: u8,
    /// Target unit the table was produced for
    pub unit: u8,
}

impl FileHeader
{
    /// Parse and validate the header at the start of `data`.
    ///
    /// ## Errors
    ///
    /// - [`SymError::InvalidMagic`] if the file does not start with `MND`
    /// - [`SymError::Truncated`] if the header is cut short, including inputs
    ///   that end inside the signature
    /// - [`SymError::UnsupportedVersion`] for versions other than 1
    pub fn parse(data: &[u8]) -> Result<Self>
    {
        let magic = &data[..data.len().min(MAGIC.len())];
        if magic != &MAGIC[..magic.len()] {
            return Err(SymError::InvalidMagic { actual: magic.to_vec() });
        }
        if data.len() < FILE_HEADER_SIZE {
            return Err(SymError::Truncated {
                offset: 0,
                index: 0,
                context: "file header",
            });
        }

        let version = data[3];
        if version != SUPPORTED_VERSION {
            return Err(SymError::UnsupportedVersion(version));
        }

        Ok(Self { version, unit: data[4] })
    }
}

/// A fully decoded symbol file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymFile
{
    pub header: FileHeader,
    pub symbols: Vec<Symbol>,
}

impl SymFile
{
    /// Parse a complete symbol file from memory.
    ///
    /// ## Errors
    ///
    /// Returns header errors from [`FileHeader::parse`] or the first record
    /// decode error. Offsets in record errors are file offsets.
    pub fn parse(data: &[u8]) -> Result<Self>
    {
        let header = FileHeader::parse(data)?;
        let symbols = Self::records(data)?.read_all()?;
        debug!(version = header.version, unit = header.unit, symbols = symbols.len(), "parsed symbol file");
        Ok(Self { header, symbols })
    }

    /// Read and parse a symbol file from disk.
    ///
    /// ## Errors
    ///
    /// Returns [`SymError::Io`] if the file cannot be read, otherwise as [`SymFile::parse`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self>
    {
        let data = fs::read(path.as_ref())?;
        debug!(path = %path.as_ref().display(), bytes = data.len(), "read symbol file");
        Self::parse(&data)
    }

    /// Reader over the records that follow a valid header.
    ///
    /// ## Errors
    ///
    /// Returns header errors from [`FileHeader::parse`].
    pub fn records(data: &[u8]) -> Result<SymbolReader<'_>>
    {
        FileHeader::parse(data)?;
        Ok(SymbolReader::with_base_offset(&data[FILE_HEADER_SIZE..], FILE_HEADER_SIZE as u64))
    }
}
