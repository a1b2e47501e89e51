//! Symbol value type.

use std::fmt;
use std::ops::Add;

/// Strongly typed 32-bit symbol value
///
/// Every record header starts with one of these. Depending on the record it is
/// a load address (names, globals, overlays), a byte offset inside an
/// aggregate (struct members), a bit offset (bitfields) or an enumerator value.
///
/// The target is a 32-bit machine, so the value is a `u32` and displays the
/// way the toolchain's own dumper prints it: `$` followed by eight hex digits.
///
/// ## Example
///
/// ```rust
/// use psxsym_core::types::Address;
///
/// let addr = Address::from(0x8001_0000);
/// assert_eq!(addr.to_string(), "$80010000");
/// assert_eq!((addr + 0x10).value(), 0x8001_0010);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u32);

impl Address
{
    /// The zero value
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u32` value
    pub const fn new(value: u32) -> Self
    {
        Address(value)
    }

    /// Get the raw `u32` value
    pub const fn value(self) -> u32
    {
        self.0
    }
}

impl From<u32> for Address
{
    fn from(value: u32) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u32
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "${:08x}", self.0)
    }
}

impl fmt::LowerHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Add<u32> for Address
{
    type Output = Address;

    fn add(self, rhs: u32) -> Self::Output
    {
        Address(self.0.wrapping_add(rhs))
    }
}
