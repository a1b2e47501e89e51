//! # psxsym-core
//!
//! Decoding of PlayStation (MND) `.SYM` symbol tables and reconstruction of
//! the C declarations they describe.
//!
//! This crate provides:
//! - The record decoder ([`symbols::SymbolReader`]) and the `.SYM` container
//!   ([`symbols::SymFile`])
//! - The COFF-style packed type word ([`types::EncodedType`])
//! - A C type model with C declaration syntax ([`ctype`])
//! - Rebuilding struct, union, enum, typedef and global declarations from a
//!   record stream ([`collect::TypeCollector`])
//! - Text listings of both ([`listing`])
//!
//! ## Example
//!
//! ```rust
//! use psxsym_core::{listing, Declarations, SymbolReader};
//!
//! // $80010000 2 main
//! let bytes = [0x00, 0x00, 0x01, 0x80, 0x02, 0x04, b'm', b'a', b'i', b'n'];
//! let symbols = SymbolReader::new(&bytes).read_all()?;
//!
//! let mut out = String::new();
//! listing::dump(&symbols, &mut out).unwrap();
//! assert_eq!(out, "$80010000 2 main\n");
//!
//! // Name records carry no type information.
//! assert!(Declarations::from_symbols(&symbols).variables.is_empty());
//! # Ok::<(), psxsym_core::SymError>(())
//! ```

pub mod collect;
pub mod ctype;
pub mod error;
pub mod listing;
pub mod prelude;
pub mod symbols;
pub mod types;

pub use collect::{Declarations, TypeCollector, Variable};
// Re-export commonly used types
pub use error::{Result, SymError};
pub use symbols::{Symbol, SymbolBody, SymbolReader, SymFile};
pub use types::{Address, Class, EncodedType, Kind};
