//! # Type Codec
//!
//! Decoding of the 16-bit type word carried by definition records.
//!
//! ## Layout
//!
//! ```text
//!  15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//! [ slot5 ][ slot4 ][ slot3 ][ slot2 ][ slot1 ][ slot0 ][   base    ]
//! ```
//!
//! The low nibble is the base type. Above it sit six 2-bit modifier slots,
//! slot 0 (bits 4-5) being the outermost modifier. Each slot holds none,
//! pointer, function or array. The toolchain builds a type by shifting the
//! existing slots up and writing the new outermost modifier into slot 0, so a
//! valid word never has an occupied slot above an empty one.
//!
//! Struct, union and enum references are base codes; the tag they refer to is
//! carried by the record, not by the type word.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

/// Number of modifier slots in a type word.
pub const MODIFIER_SLOTS: usize = 6;

/// Ordered modifier stack, outermost first.
pub type Modifiers = SmallVec<[Modifier; MODIFIER_SLOTS]>;

/// Error returned when a type word cannot be decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeError
{
    /// An occupied modifier slot sits above an empty one
    #[error("type 0x{raw:04X} has modifier in slot {slot} above an empty slot")]
    ModifierGap
    {
        /// The raw type word
        raw: u16,
        /// The first occupied slot found above the gap
        slot: usize,
    },
}

/// Base type selected by the low nibble of a type word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType
{
    Null,
    Void,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Reference to a struct tag
    Struct,
    /// Reference to a union tag
    Union,
    /// Reference to an enum tag
    Enum,
    /// Member of an enumeration
    EnumMember,
    UChar,
    UShort,
    UInt,
    ULong,
}

/// Which aggregate a tag-reference base type points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind
{
    Struct,
    Union,
    Enum,
}

impl BaseType
{
    /// Decode a base type from the low nibble of `bits`.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self
    {
        match bits & 0xF {
            0x0 => BaseType::Null,
            0x1 => BaseType::Void,
            0x2 => BaseType::Char,
            0x3 => BaseType::Short,
            0x4 => BaseType::Int,
            0x5 => BaseType::Long,
            0x6 => BaseType::Float,
            0x7 => BaseType::Double,
            0x8 => BaseType::Struct,
            0x9 => BaseType::Union,
            0xA => BaseType::Enum,
            0xB => BaseType::EnumMember,
            0xC => BaseType::UChar,
            0xD => BaseType::UShort,
            0xE => BaseType::UInt,
            _ => BaseType::ULong,
        }
    }

    /// The tag kind for struct, union and enum references.
    #[must_use]
    pub const fn tag_kind(self) -> Option<TagKind>
    {
        match self {
            BaseType::Struct => Some(TagKind::Struct),
            BaseType::Union => Some(TagKind::Union),
            BaseType::Enum => Some(TagKind::Enum),
            _ => None,
        }
    }

    /// The mnemonic used in symbol dumps.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self {
            BaseType::Null => "NULL",
            BaseType::Void => "VOID",
            BaseType::Char => "CHAR",
            BaseType::Short => "SHORT",
            BaseType::Int => "INT",
            BaseType::Long => "LONG",
            BaseType::Float => "FLOAT",
            BaseType::Double => "DOUBLE",
            BaseType::Struct => "STRUCT",
            BaseType::Union => "UNION",
            BaseType::Enum => "ENUM",
            BaseType::EnumMember => "MOE",
            BaseType::UChar => "UCHAR",
            BaseType::UShort => "USHORT",
            BaseType::UInt => "UINT",
            BaseType::ULong => "ULONG",
        }
    }
}

impl fmt::Display for BaseType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.label())
    }
}

/// One wrapping step applied to a base type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier
{
    /// Pointer to the inner type
    Pointer,
    /// Function returning the inner type
    Function,
    /// Array of the inner type
    Array,
}

impl Modifier
{
    /// Decode one 2-bit slot. `None` means the slot is empty.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self>
    {
        match bits & 0x3 {
            0x1 => Some(Modifier::Pointer),
            0x2 => Some(Modifier::Function),
            0x3 => Some(Modifier::Array),
            _ => None,
        }
    }

    /// The mnemonic used in symbol dumps.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self {
            Modifier::Pointer => "PTR",
            Modifier::Function => "FCN",
            Modifier::Array => "ARY",
        }
    }
}

impl fmt::Display for Modifier
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.label())
    }
}

/// A raw 16-bit type word as it appears in Def and Def2 records
///
/// ## Example
///
/// ```rust
/// use psxsym_core::types::{BaseType, EncodedType, Modifier};
///
/// // ARY PTR INT: array of pointers to int
/// let ty = EncodedType::new(0x0074);
/// let decoded = ty.decode().unwrap();
/// assert_eq!(decoded.base, BaseType::Int);
/// assert_eq!(decoded.modifiers.as_slice(), &[Modifier::Array, Modifier::Pointer]);
/// assert_eq!(ty.to_string(), "ARY PTR INT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncodedType(u16);

impl EncodedType
{
    pub const fn new(raw: u16) -> Self
    {
        EncodedType(raw)
    }

    pub const fn raw(self) -> u16
    {
        self.0
    }

    /// Base type in the low nibble. Never fails: all sixteen codes are assigned.
    #[must_use]
    pub const fn base(self) -> BaseType
    {
        BaseType::from_bits(self.0)
    }

    fn slot(self, index: usize) -> Option<Modifier>
    {
        Modifier::from_bits(self.0 >> (4 + index * 2))
    }

    /// Decode the base type and the modifier stack.
    ///
    /// ## Errors
    ///
    /// Returns [`TypeError::ModifierGap`] if an occupied slot follows an empty one.
    pub fn decode(self) -> Result<DecodedType, TypeError>
    {
        let mut modifiers = Modifiers::new();
        let mut gap = false;
        for index in 0..MODIFIER_SLOTS {
            match self.slot(index) {
                Some(_) if gap => return Err(TypeError::ModifierGap { raw: self.0, slot: index }),
                Some(modifier) => modifiers.push(modifier),
                None => gap = true,
            }
        }

        Ok(DecodedType {
            base: self.base(),
            modifiers,
        })
    }
}

impl From<u16> for EncodedType
{
    fn from(raw: u16) -> Self
    {
        EncodedType(raw)
    }
}

impl fmt::Display for EncodedType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for modifier in (0..MODIFIER_SLOTS).filter_map(|index| self.slot(index)) {
            write!(f, "{modifier} ")?;
        }
        write!(f, "{}", self.base())
    }
}

/// A type word split into base type and modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedType
{
    /// Innermost type
    pub base: BaseType,
    /// Modifiers, outermost first
    pub modifiers: Modifiers,
}

impl DecodedType
{
    /// Number of array modifiers in the stack.
    #[must_use]
    pub fn array_count(&self) -> usize
    {
        self.modifiers.iter().filter(|m| **m == Modifier::Array).count()
    }

    /// Number of dimension groups a Def2 record with this type carries.
    ///
    /// A Def2 always carries at least one group, even for non-array types.
    #[must_use]
    pub fn dimension_groups(&self) -> usize
    {
        self.array_count().max(1)
    }
}
