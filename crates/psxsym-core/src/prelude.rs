//! Common module for library exports

pub use crate::collect::{Declarations, TypeCollector, Variable};
pub use crate::ctype::{CType, EnumMember, EnumType, Field, StructType, Typedef, UnionType};
pub use crate::error::{Result, SymError};
pub use crate::symbols::{Def, Def2, Dimensions, Name, Overlay, PString, Symbol, SymbolBody, SymbolReader, SymFile};
pub use crate::types::{Address, Class, DecodedType, EncodedType, Kind, Modifier, TypeError};
