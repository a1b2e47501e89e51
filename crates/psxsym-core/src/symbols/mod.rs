//! # Symbols
//!
//! Decoded symbol records.
//!
//! Every record is a fixed 5-byte header (value + kind) followed by a body
//! whose layout is chosen by the kind:
//!
//! ```text
//! Header      := Value:u32 Kind:u8
//! Name        := NameLen:u8 Name:u8[NameLen]
//! Def         := Class:u16 Type:u16 Size:u32 NameLen:u8 Name:u8[NameLen]
//! Def2        := Class:u16 Type:u16 Size:u32 Dims{N} TagLen:u8 Tag:u8[TagLen] NameLen:u8 Name:u8[NameLen]
//! Dims        := (Len:u16)* 0:u16
//! Overlay     := Length:u32 ID:u32
//! ```
//!
//! All integers are little-endian. Every type here reports its encoded size,
//! and the reader guarantees that size equals the bytes it consumed.

pub mod file;
pub mod reader;

use std::borrow::Cow;
use std::fmt;

pub use file::{FileHeader, SymFile};
pub use reader::SymbolReader;

use crate::types::{Address, Class, EncodedType, Kind};

/// Size of a record header in bytes.
pub const HEADER_SIZE: usize = 5;

/// A length-prefixed byte string (names and tags)
///
/// The raw bytes are kept as read so the encoded size stays exact even when
/// they are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PString
{
    raw: Vec<u8>,
}

impl PString
{
    pub fn new(raw: impl Into<Vec<u8>>) -> Self
    {
        Self { raw: raw.into() }
    }

    pub fn as_bytes(&self) -> &[u8]
    {
        &self.raw
    }

    /// Text form; invalid UTF-8 is replaced.
    pub fn as_str(&self) -> Cow<'_, str>
    {
        String::from_utf8_lossy(&self.raw)
    }

    pub fn is_empty(&self) -> bool
    {
        self.raw.is_empty()
    }

    /// Length prefix plus bytes.
    pub fn encoded_size(&self) -> usize
    {
        1 + self.raw.len()
    }
}

impl From<&str> for PString
{
    fn from(value: &str) -> Self
    {
        Self::new(value.as_bytes())
    }
}

impl fmt::Display for PString
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.as_str())
    }
}

/// One zero-terminated group of array lengths
///
/// The terminator is not stored; it is accounted for in [`Dimensions::encoded_size`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dimensions(pub Vec<u16>);

impl Dimensions
{
    pub fn lengths(&self) -> &[u16]
    {
        &self.0
    }

    /// Lengths plus the zero terminator.
    pub fn encoded_size(&self) -> usize
    {
        2 * (self.0.len() + 1)
    }
}

impl fmt::Display for Dimensions
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.0.is_empty() {
            return write!(f, "0");
        }
        for (i, len) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{len}")?;
        }
        Ok(())
    }
}

/// Header shared by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolHeader
{
    /// Address or value of the symbol
    pub value: Address,
    /// Record kind; selects the body layout
    pub kind: Kind,
}

impl fmt::Display for SymbolHeader
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} {}", self.value, self.kind)
    }
}

/// Name attached to an address (kinds 0x01 and 0x02).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name
{
    pub name: PString,
}

impl Name
{
    pub fn body_size(&self) -> usize
    {
        self.name.encoded_size()
    }
}

/// Class, type, size and name of a definition (kind 0x94).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def
{
    pub class: Class,
    pub ty: EncodedType,
    pub size: u32,
    pub name: PString,
}

impl Def
{
    pub fn body_size(&self) -> usize
    {
        2 + 2 + 4 + self.name.encoded_size()
    }
}

/// Definition with array dimensions and aggregate tag (kind 0x96).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def2
{
    pub class: Class,
    pub ty: EncodedType,
    pub size: u32,
    /// One group per array modifier, at least one
    pub dims: Vec<Dimensions>,
    /// Struct, union or enum tag; empty when the type has none
    pub tag: PString,
    pub name: PString,
}

impl Def2
{
    pub fn body_size(&self) -> usize
    {
        let dims: usize = self.dims.iter().map(Dimensions::encoded_size).sum();
        2 + 2 + 4 + dims + self.tag.encoded_size() + self.name.encoded_size()
    }

    /// Every array length in modifier order, across all groups.
    pub fn array_lengths(&self) -> impl Iterator<Item = u16> + '_
    {
        self.dims.iter().flat_map(|group| group.lengths().iter().copied())
    }
}

/// Overlay descriptor (kind 0x98)
///
/// The header value is the base address the overlay is loaded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay
{
    /// Overlay length in bytes
    pub length: u32,
    /// Overlay ID
    pub id: u32,
}

impl Overlay
{
    pub fn body_size(&self) -> usize
    {
        4 + 4
    }
}

/// Record body; the variant always matches the header kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolBody
{
    NameLocal(Name),
    NameGlobal(Name),
    Def(Def),
    Def2(Def2),
    Overlay(Overlay),
}

impl SymbolBody
{
    /// Size of the body in bytes.
    pub fn body_size(&self) -> usize
    {
        match self {
            SymbolBody::NameLocal(body) | SymbolBody::NameGlobal(body) => body.body_size(),
            SymbolBody::Def(body) => body.body_size(),
            SymbolBody::Def2(body) => body.body_size(),
            SymbolBody::Overlay(body) => body.body_size(),
        }
    }

    /// The kind tag that selects this body.
    pub fn kind(&self) -> Kind
    {
        match self {
            SymbolBody::NameLocal(_) => Kind::NameLocal,
            SymbolBody::NameGlobal(_) => Kind::NameGlobal,
            SymbolBody::Def(_) => Kind::Def,
            SymbolBody::Def2(_) => Kind::Def2,
            SymbolBody::Overlay(_) => Kind::Overlay,
        }
    }
}

impl fmt::Display for SymbolBody
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            SymbolBody::NameLocal(body) | SymbolBody::NameGlobal(body) => write!(f, "{}", body.name),
            SymbolBody::Def(body) => write!(
                f,
                "class {} type {} size {} name {}",
                body.class, body.ty, body.size, body.name
            ),
            SymbolBody::Def2(body) => {
                write!(f, "class {} type {} size {} dims", body.class, body.ty, body.size)?;
                for dims in &body.dims {
                    write!(f, " {dims}")?;
                }
                write!(f, " tag {} name {}", body.tag, body.name)
            }
            SymbolBody::Overlay(body) => write!(f, "length ${:08x} id ${:x}", body.length, body.id),
        }
    }
}

/// A decoded record: header plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol
{
    pub header: SymbolHeader,
    pub body: SymbolBody,
}

impl Symbol
{
    pub fn new(value: impl Into<Address>, body: SymbolBody) -> Self
    {
        Self {
            header: SymbolHeader {
                value: value.into(),
                kind: body.kind(),
            },
            body,
        }
    }

    /// Total record size in bytes, header included.
    pub fn size(&self) -> usize
    {
        HEADER_SIZE + self.body.body_size()
    }

    pub fn value(&self) -> Address
    {
        self.header.value
    }

    pub fn kind(&self) -> Kind
    {
        self.header.kind
    }

    /// Name of the symbol; overlays have none.
    pub fn name(&self) -> Option<Cow<'_, str>>
    {
        match &self.body {
            SymbolBody::NameLocal(body) | SymbolBody::NameGlobal(body) => Some(body.name.as_str()),
            SymbolBody::Def(body) => Some(body.name.as_str()),
            SymbolBody::Def2(body) => Some(body.name.as_str()),
            SymbolBody::Overlay(_) => None,
        }
    }

    /// Storage class of definitions.
    pub fn class(&self) -> Option<Class>
    {
        match &self.body {
            SymbolBody::Def(body) => Some(body.class),
            SymbolBody::Def2(body) => Some(body.class),
            _ => None,
        }
    }

    /// Type word of definitions.
    pub fn encoded_type(&self) -> Option<EncodedType>
    {
        match &self.body {
            SymbolBody::Def(body) => Some(body.ty),
            SymbolBody::Def2(body) => Some(body.ty),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} {}", self.header, self.body)
    }
}
