//! Storage class codes carried by definition records.

use std::fmt;

/// Storage class of a definition
///
/// These are the COFF storage classes the toolchain inherited. Codes outside
/// the table are preserved as `Other` rather than rejected; the class never
/// affects the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class
{
    /// No class (0)
    Null,
    /// Automatic (stack) variable (1)
    Auto,
    /// External symbol (2)
    Extern,
    /// Static symbol (3)
    Static,
    /// Register variable (4)
    Register,
    /// External definition (5)
    ExternDef,
    /// Label (6)
    Label,
    /// Undefined label (7)
    UndefinedLabel,
    /// Member of structure (8)
    StructMember,
    /// Function argument (9)
    Argument,
    /// Structure tag (10)
    StructTag,
    /// Member of union (11)
    UnionMember,
    /// Union tag (12)
    UnionTag,
    /// Type definition (13)
    Typedef,
    /// Undefined static (14)
    UndefinedStatic,
    /// Enumeration tag (15)
    EnumTag,
    /// Member of enumeration (16)
    EnumMember,
    /// Register parameter (17)
    RegisterParam,
    /// Bitfield member (18)
    Bitfield,
    /// Block marker (100)
    Block,
    /// Function marker (101)
    Function,
    /// End of structure, union or enumeration members (102)
    EndOfSymbols,
    /// Source file (103)
    File,
    /// Line number record (104)
    Line,
    /// Duplicated tag (105)
    Alias,
    /// Hidden symbol (106)
    Hidden,
    /// Physical end of function (0xFFFF)
    EndOfFunction,
    /// A code outside the table
    Other(u16),
}

impl Class
{
    /// The raw class code.
    #[must_use]
    pub const fn raw(self) -> u16
    {
        match self {
            Class::Null => 0,
            Class::Auto => 1,
            Class::Extern => 2,
            Class::Static => 3,
            Class::Register => 4,
            Class::ExternDef => 5,
            Class::Label => 6,
            Class::UndefinedLabel => 7,
            Class::StructMember => 8,
            Class::Argument => 9,
            Class::StructTag => 10,
            Class::UnionMember => 11,
            Class::UnionTag => 12,
            Class::Typedef => 13,
            Class::UndefinedStatic => 14,
            Class::EnumTag => 15,
            Class::EnumMember => 16,
            Class::RegisterParam => 17,
            Class::Bitfield => 18,
            Class::Block => 100,
            Class::Function => 101,
            Class::EndOfSymbols => 102,
            Class::File => 103,
            Class::Line => 104,
            Class::Alias => 105,
            Class::Hidden => 106,
            Class::EndOfFunction => 0xFFFF,
            Class::Other(raw) => raw,
        }
    }

    /// The mnemonic used in symbol dumps (`MOS`, `STRTAG`, ...).
    #[must_use]
    pub const fn label(self) -> Option<&'static str>
    {
        let label = match self {
            Class::Null => "NULL",
            Class::Auto => "AUTO",
            Class::Extern => "EXT",
            Class::Static => "STAT",
            Class::Register => "REG",
            Class::ExternDef => "EXTDEF",
            Class::Label => "LABEL",
            Class::UndefinedLabel => "ULABEL",
            Class::StructMember => "MOS",
            Class::Argument => "ARG",
            Class::StructTag => "STRTAG",
            Class::UnionMember => "MOU",
            Class::UnionTag => "UNTAG",
            Class::Typedef => "TPDEF",
            Class::UndefinedStatic => "USTATIC",
            Class::EnumTag => "ENTAG",
            Class::EnumMember => "MOE",
            Class::RegisterParam => "REGPARM",
            Class::Bitfield => "FIELD",
            Class::Block => "BLOCK",
            Class::Function => "FCN",
            Class::EndOfSymbols => "EOS",
            Class::File => "FILE",
            Class::Line => "LINE",
            Class::Alias => "ALIAS",
            Class::Hidden => "HIDDEN",
            Class::EndOfFunction => "EFCN",
            Class::Other(_) => return None,
        };
        Some(label)
    }
}

impl From<u16> for Class
{
    fn from(raw: u16) -> Self
    {
        match raw {
            0 => Class::Null,
            1 => Class::Auto,
            2 => Class::Extern,
            3 => Class::Static,
            4 => Class::Register,
            5 => Class::ExternDef,
            6 => Class::Label,
            7 => Class::UndefinedLabel,
            8 => Class::StructMember,
            9 => Class::Argument,
            10 => Class::StructTag,
            11 => Class::UnionMember,
            12 => Class::UnionTag,
            13 => Class::Typedef,
            14 => Class::UndefinedStatic,
            15 => Class::EnumTag,
            16 => Class::EnumMember,
            17 => Class::RegisterParam,
            18 => Class::Bitfield,
            100 => Class::Block,
            101 => Class::Function,
            102 => Class::EndOfSymbols,
            103 => Class::File,
            104 => Class::Line,
            105 => Class::Alias,
            106 => Class::Hidden,
            0xFFFF => Class::EndOfFunction,
            other => Class::Other(other),
        }
    }
}

impl fmt::Display for Class
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.label() {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "{}", self.raw()),
        }
    }
}
