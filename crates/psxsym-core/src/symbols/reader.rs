//! # Record Decoder
//!
//! Sequential decoding of a symbol record stream.
//!
//! Records have no length prefix, so each one starts exactly where the previous
//! one ended and the stream can only be walked front to back. The reader keeps
//! a single position into the input and never skips: the first error stops it.
//!
//! ## Usage
//!
//! ```rust
//! use psxsym_core::symbols::SymbolReader;
//!
//! // $80010000 2 main
//! let bytes = [0x00, 0x00, 0x01, 0x80, 0x02, 0x04, b'm', b'a', b'i', b'n'];
//! let mut reader = SymbolReader::new(&bytes);
//! let symbol = reader.next_symbol()?.unwrap();
//! assert_eq!(symbol.to_string(), "$80010000 2 main");
//! assert!(reader.next_symbol()?.is_none());
//! # Ok::<(), psxsym_core::SymError>(())
//! ```

use tracing::trace;

use super::{Def, Def2, Dimensions, Name, Overlay, PString, Symbol, SymbolBody, SymbolHeader};
use crate::error::{Result, SymError};
use crate::types::{Address, Class, EncodedType, Kind};

/// Cursor over the bytes of one record.
///
/// Errors it produces point at the start of the record, not the failing byte.
struct RecordCursor<'data>
{
    data: &'data [u8],
    pos: usize,
    start: usize,
    base_offset: u64,
    index: usize,
}

impl<'data> RecordCursor<'data>
{
    fn offset(&self) -> u64
    {
        self.base_offset + self.start as u64
    }

    fn truncated(&self, context: &'static str) -> SymError
    {
        SymError::Truncated {
            offset: self.offset(),
            index: self.index,
            context,
        }
    }

    fn bytes(&mut self, len: usize, context: &'static str) -> Result<&'data [u8]>
    {
        let end = self.pos.checked_add(len).filter(|end| *end <= self.data.len());
        match end {
            Some(end) => {
                let bytes = &self.data[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
            None => Err(self.truncated(context)),
        }
    }

    fn u8(&mut self, context: &'static str) -> Result<u8>
    {
        Ok(self.bytes(1, context)?[0])
    }

    fn u16(&mut self, context: &'static str) -> Result<u16>
    {
        let bytes = self.bytes(2, context)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self, context: &'static str) -> Result<u32>
    {
        let bytes = self.bytes(4, context)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn pstring(&mut self, context: &'static str) -> Result<PString>
    {
        let len = self.u8(context)?;
        let raw = self.bytes(usize::from(len), context)?;
        Ok(PString::new(raw))
    }

    /// Read lengths up to and including the zero terminator.
    fn dimensions(&mut self) -> Result<Dimensions>
    {
        let mut lengths = Vec::new();
        loop {
            match self.u16("array dimensions")? {
                0 => return Ok(Dimensions(lengths)),
                len => lengths.push(len),
            }
        }
    }

    fn encoded_type(&mut self) -> Result<(Class, EncodedType, u32)>
    {
        let class = Class::from(self.u16("definition class")?);
        let ty = EncodedType::new(self.u16("definition type")?);
        let size = self.u32("definition size")?;
        Ok((class, ty, size))
    }

    fn malformed(&self, source: crate::types::TypeError) -> SymError
    {
        SymError::MalformedType {
            source,
            offset: self.offset(),
            index: self.index,
        }
    }

    fn def(&mut self) -> Result<Def>
    {
        let (class, ty, size) = self.encoded_type()?;
        ty.decode().map_err(|err| self.malformed(err))?;
        let name = self.pstring("definition name")?;
        Ok(Def { class, ty, size, name })
    }

    fn def2(&mut self) -> Result<Def2>
    {
        let (class, ty, size) = self.encoded_type()?;
        let decoded = ty.decode().map_err(|err| self.malformed(err))?;

        let groups = decoded.dimension_groups();
        let mut dims = Vec::with_capacity(groups);
        for _ in 0..groups {
            dims.push(self.dimensions()?);
        }

        let tag = self.pstring("definition tag")?;
        let name = self.pstring("definition name")?;
        Ok(Def2 {
            class,
            ty,
            size,
            dims,
            tag,
            name,
        })
    }
}

/// Decoder for a stream of symbol records
///
/// Yields `Result<Symbol>` items when used as an iterator and stops after the
/// first error. Use [`SymbolReader::next_symbol`] to tell a clean end
/// (`Ok(None)`) from an error directly.
#[derive(Debug, Clone)]
pub struct SymbolReader<'data>
{
    data: &'data [u8],
    pos: usize,
    base_offset: u64,
    index: usize,
    failed: bool,
}

impl<'data> SymbolReader<'data>
{
    /// Reader over a bare record stream.
    pub fn new(data: &'data [u8]) -> Self
    {
        Self::with_base_offset(data, 0)
    }

    /// Reader whose reported offsets are shifted by `base_offset`.
    ///
    /// Used when the stream is a slice of a larger file, so errors still name
    /// file offsets.
    pub fn with_base_offset(data: &'data [u8], base_offset: u64) -> Self
    {
        Self {
            data,
            pos: 0,
            base_offset,
            index: 0,
            failed: false,
        }
    }

    /// Bytes consumed so far.
    ///
    /// After an error this points at the start of the failing record.
    pub fn position(&self) -> usize
    {
        self.pos
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> usize
    {
        self.index
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(None)` when the input ends exactly at a record boundary.
    /// Errors do not advance the reader, so calling again after one returns
    /// the same error.
    ///
    /// ## Errors
    ///
    /// - [`SymError::Truncated`] if the input ends inside a record
    /// - [`SymError::UnknownKind`] if the kind byte has no known layout
    /// - [`SymError::MalformedType`] if a definition's type word is invalid
    pub fn next_symbol(&mut self) -> Result<Option<Symbol>>
    {
        if self.pos == self.data.len() {
            return Ok(None);
        }

        let mut cursor = RecordCursor {
            data: self.data,
            pos: self.pos,
            start: self.pos,
            base_offset: self.base_offset,
            index: self.index,
        };

        let value = Address::new(cursor.u32("header value")?);
        let kind = Kind::from(cursor.u8("header kind")?);
        let header = SymbolHeader { value, kind };

        let body = match kind {
            Kind::NameLocal => SymbolBody::NameLocal(Name {
                name: cursor.pstring("name")?,
            }),
            Kind::NameGlobal => SymbolBody::NameGlobal(Name {
                name: cursor.pstring("name")?,
            }),
            Kind::Def => SymbolBody::Def(cursor.def()?),
            Kind::Def2 => SymbolBody::Def2(cursor.def2()?),
            Kind::Overlay => SymbolBody::Overlay(Overlay {
                length: cursor.u32("overlay length")?,
                id: cursor.u32("overlay id")?,
            }),
            Kind::Other(raw) => {
                return Err(SymError::UnknownKind {
                    kind: raw,
                    offset: cursor.offset(),
                    index: self.index,
                });
            }
        };

        let symbol = Symbol { header, body };
        debug_assert_eq!(cursor.pos - cursor.start, symbol.size());
        trace!(offset = cursor.offset(), index = self.index, kind = %kind, "decoded symbol");

        self.pos = cursor.pos;
        self.index += 1;
        Ok(Some(symbol))
    }

    /// Decode every remaining record.
    ///
    /// ## Errors
    ///
    /// Returns the first decode error; records decoded before it are dropped.
    pub fn read_all(mut self) -> Result<Vec<Symbol>>
    {
        let mut symbols = Vec::new();
        while let Some(symbol) = self.next_symbol()? {
            symbols.push(symbol);
        }
        Ok(symbols)
    }
}

impl Iterator for SymbolReader<'_>
{
    type Item = Result<Symbol>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.failed {
            return None;
        }
        match self.next_symbol() {
            Ok(Some(symbol)) => Some(Ok(symbol)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
