//! Record kind tags.

use std::fmt;

/// Record kind, the byte that follows the value in every header
///
/// The kind alone decides the body layout. Only the five shapes below are
/// understood; any other byte is kept as `Other` so the decoder can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind
{
    /// Local name attached to an address (0x01)
    NameLocal,
    /// Global name attached to an address (0x02)
    NameGlobal,
    /// Typed definition (0x94)
    Def,
    /// Typed definition with dimensions and tag (0x96)
    Def2,
    /// Overlay descriptor (0x98)
    Overlay,
    /// A kind byte without a known body shape
    Other(u8),
}

impl Kind
{
    /// The raw kind byte.
    #[must_use]
    pub const fn raw(self) -> u8
    {
        match self {
            Kind::NameLocal => 0x01,
            Kind::NameGlobal => 0x02,
            Kind::Def => 0x94,
            Kind::Def2 => 0x96,
            Kind::Overlay => 0x98,
            Kind::Other(raw) => raw,
        }
    }

    /// Whether the decoder knows the body layout for this kind.
    #[must_use]
    pub const fn is_known(self) -> bool
    {
        !matches!(self, Kind::Other(_))
    }
}

impl From<u8> for Kind
{
    fn from(raw: u8) -> Self
    {
        match raw {
            0x01 => Kind::NameLocal,
            0x02 => Kind::NameGlobal,
            0x94 => Kind::Def,
            0x96 => Kind::Def2,
            0x98 => Kind::Overlay,
            other => Kind::Other(other),
        }
    }
}

impl fmt::Display for Kind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Kind::NameLocal => write!(f, "1"),
            Kind::NameGlobal => write!(f, "2"),
            Kind::Def => write!(f, "94 Def"),
            Kind::Def2 => write!(f, "96 Def2"),
            Kind::Overlay => write!(f, "overlay"),
            Kind::Other(raw) => write!(f, "{raw:02x} ?"),
        }
    }
}
