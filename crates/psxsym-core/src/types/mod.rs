//! # Types
//!
//! Value types shared by the decoder and the listing code: symbol values,
//! record kinds, storage classes and the type word codec.

pub mod address;
pub mod class;
pub mod encoded;
pub mod kind;

// Re-export all public types
pub use address::Address;
pub use class::Class;
pub use encoded::{BaseType, DecodedType, EncodedType, Modifier, Modifiers, TagKind, TypeError};
pub use kind::Kind;
