//! # Type Reconstruction
//!
//! Rebuilds C declarations from a decoded record stream.
//!
//! Aggregates are spread over several records: a tag record opens the
//! definition, one record per member follows, and an end-of-symbols record
//! closes it.
//!
//! ```text
//! $00000000 96 Def2 class STRTAG type STRUCT size 8 dims 0 tag  name Point
//! $00000000 94 Def class MOS type INT size 4 name x
//! $00000004 94 Def class MOS type INT size 4 name y
//! $00000008 96 Def2 class EOS type NULL size 8 dims 0 tag  name Point
//! ```
//!
//! For members the header value is the byte offset (the bit offset for
//! bitfields, whose size is then a width in bits). For enumerators it is the
//! value.
//!
//! ## Array bounds
//!
//! Def2 dimension values are read as one list across all groups. The
//! toolchain writes the number of dimensions first, then the bounds:
//!
//! ```text
//! type ARY INT size 4 dims 1 1            int r[1]
//! type ARY ARY SHORT size 18 dims 2 3 3   short m[3][3]
//! ```
//!
//! Both readings of the list (with and without the leading count) are checked
//! against the record size when the element size is known. If neither matches,
//! the bounds are dropped and the arrays render as `[]`.
//!
//! ## Tag resolution
//!
//! A member whose type is a struct, union or enum carries the tag name. Real
//! tags are emitted as references (`struct Foo`). Anonymous bodies, whose tags
//! are synthesized (`_3fake`), are always defined before the aggregate that
//! uses them, so the collector clones the most recent body with that tag into
//! the referencing field. Nothing is ever embedded by reference, so the
//! resulting trees cannot contain cycles.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::ctype::declarator::is_anonymous;
use crate::ctype::{self, CType, EnumMember, EnumType, Field, StructType, Typedef, UnionType};
use crate::symbols::{Symbol, SymbolBody};
use crate::types::{Address, BaseType, Class, EncodedType, Modifier, TagKind};

/// Pointer size on the target.
const POINTER_SIZE: u32 = 4;

/// A global variable or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable
{
    pub address: Address,
    pub class: Class,
    /// Declared type and name; `size` is the record size
    pub field: Field,
}

/// Everything recovered from a symbol stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations
{
    /// Tagged struct, union and enum definitions, in definition order
    pub types: Vec<CType>,
    pub typedefs: Vec<Typedef>,
    /// Globals in stream order
    pub variables: Vec<Variable>,
}

impl Declarations
{
    /// Collect declarations from a slice of symbols.
    pub fn from_symbols<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> Self
    {
        let mut collector = TypeCollector::new();
        for symbol in symbols {
            collector.push(symbol);
        }
        collector.finish()
    }

    /// Globals sorted by address; stream order is kept for equal addresses.
    pub fn variables_by_address(&self) -> Vec<&Variable>
    {
        let mut variables: Vec<&Variable> = self.variables.iter().collect();
        variables.sort_by_key(|variable| variable.address);
        variables
    }
}

/// Definition currently receiving members.
#[derive(Debug)]
enum Open
{
    Struct(StructType),
    Union(UnionType),
    Enum(EnumType),
}

/// The parts of a Def or Def2 record the collector needs.
struct DefView<'a>
{
    value: Address,
    class: Class,
    ty: EncodedType,
    size: u32,
    tag: String,
    name: String,
    lengths: Vec<u16>,
    symbol: &'a Symbol,
}

impl<'a> DefView<'a>
{
    fn new(symbol: &'a Symbol) -> Option<Self>
    {
        let value = symbol.value();
        match &symbol.body {
            SymbolBody::Def(def) => Some(Self {
                value,
                class: def.class,
                ty: def.ty,
                size: def.size,
                tag: String::new(),
                name: def.name.as_str().into_owned(),
                lengths: Vec::new(),
                symbol,
            }),
            SymbolBody::Def2(def) => Some(Self {
                value,
                class: def.class,
                ty: def.ty,
                size: def.size,
                tag: def.tag.as_str().into_owned(),
                name: def.name.as_str().into_owned(),
                lengths: def.array_lengths().collect(),
                symbol,
            }),
            _ => None,
        }
    }
}

/// Incremental builder for [`Declarations`]
///
/// Feed symbols in stream order with [`TypeCollector::push`], then call
/// [`TypeCollector::finish`]. Records that do not describe a type, typedef or
/// global are ignored.
#[derive(Debug, Default)]
pub struct TypeCollector
{
    open: Vec<Open>,
    anonymous: HashMap<(TagKind, String), CType>,
    /// Byte size of every closed definition, by tag
    sizes: HashMap<(TagKind, String), u32>,
    defined: HashMap<(TagKind, String), Vec<usize>>,
    decls: Declarations,
}

impl TypeCollector
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Process one symbol.
    pub fn push(&mut self, symbol: &Symbol)
    {
        let Some(def) = DefView::new(symbol) else {
            trace!(symbol = %symbol, "skipping non-definition");
            return;
        };

        match def.class {
            Class::StructTag => self.open.push(Open::Struct(StructType {
                tag: def.name,
                size: def.size,
                fields: Vec::new(),
            })),
            Class::UnionTag => self.open.push(Open::Union(UnionType {
                tag: def.name,
                size: def.size,
                fields: Vec::new(),
            })),
            Class::EnumTag => self.open.push(Open::Enum(EnumType {
                tag: def.name,
                members: Vec::new(),
            })),
            Class::StructMember | Class::UnionMember => {
                let field = Field::new(self.ctype_of(&def), def.name.clone()).at(def.value.value(), def.size);
                self.push_field(field, def.symbol);
            }
            Class::Bitfield => {
                let field = Field::new(self.ctype_of(&def), def.name.clone())
                    .at(def.value.value() / 8, 0)
                    .with_bits(def.size);
                self.push_field(field, def.symbol);
            }
            Class::EnumMember => match self.open.last_mut() {
                Some(Open::Enum(t)) => t.members.push(EnumMember {
                    name: def.name,
                    value: def.value.value(),
                }),
                _ => warn!(symbol = %def.symbol, "enum member outside of an enum definition"),
            },
            Class::EndOfSymbols => match self.open.pop() {
                Some(open) => self.close(open),
                None => warn!(symbol = %def.symbol, "end of members without an open definition"),
            },
            Class::Typedef => {
                let ty = self.ctype_of(&def);
                self.decls.typedefs.push(Typedef {
                    name: def.name,
                    ty: Box::new(ty),
                });
            }
            Class::Extern | Class::Static | Class::ExternDef => {
                let field = Field::new(self.ctype_of(&def), def.name.clone()).at(0, def.size);
                self.decls.variables.push(Variable {
                    address: def.value,
                    class: def.class,
                    field,
                });
            }
            _ => trace!(symbol = %def.symbol, "skipping definition"),
        }
    }

    /// Close any definitions left open and return the result.
    pub fn finish(mut self) -> Declarations
    {
        while let Some(open) = self.open.pop() {
            warn!(?open, "definition not closed before the end of the table");
            self.close(open);
        }
        self.decls
    }

    fn push_field(&mut self, field: Field, symbol: &Symbol)
    {
        match self.open.last_mut() {
            Some(Open::Struct(t)) => t.fields.push(field),
            Some(Open::Union(t)) => t.fields.push(field),
            _ => warn!(symbol = %symbol, "member outside of a struct or union definition"),
        }
    }

    fn close(&mut self, open: Open)
    {
        let (kind, tag, size, ty) = match open {
            Open::Struct(t) => (TagKind::Struct, t.tag.clone(), t.size, CType::Struct(t)),
            Open::Union(t) => (TagKind::Union, t.tag.clone(), t.size, CType::Union(t)),
            // Enums are always int sized.
            Open::Enum(t) => (TagKind::Enum, t.tag.clone(), 0, CType::Enum(t)),
        };
        if size > 0 {
            self.sizes.insert((kind, tag.clone()), size);
        }

        if is_anonymous(&tag) {
            self.anonymous.insert((kind, tag), ty);
            return;
        }

        // Every compilation unit repeats the definitions it uses.
        let seen = self.defined.entry((kind, tag)).or_default();
        if seen.iter().any(|index| self.decls.types[*index] == ty) {
            return;
        }
        seen.push(self.decls.types.len());
        self.decls.types.push(ty);
    }

    fn ctype_of(&self, def: &DefView<'_>) -> CType
    {
        let (base, modifiers) = match def.ty.decode() {
            Ok(decoded) => (decoded.base, decoded.modifiers),
            Err(err) => {
                warn!(symbol = %def.symbol, %err, "ignoring malformed modifiers");
                (def.ty.base(), Default::default())
            }
        };

        let mut lengths = self.array_bounds(def, base, &modifiers).into_iter();
        let array_lengths: Vec<Option<u32>> = modifiers
            .iter()
            .map(|modifier| match modifier {
                Modifier::Array => lengths.next(),
                _ => None,
            })
            .collect();

        let mut ty = self.base_ctype(base, &def.tag);
        for (modifier, len) in modifiers.iter().zip(array_lengths).rev() {
            ty = match modifier {
                Modifier::Pointer => CType::pointer(ty),
                Modifier::Function => CType::func(ty, Vec::new(), false),
                Modifier::Array => CType::array(ty, len),
            };
        }
        ty
    }

    /// Bounds for the array modifiers, outermost first.
    ///
    /// The leading run of arrays spans the whole record, so its bounds times
    /// the element size must equal the record size.
    fn array_bounds(&self, def: &DefView<'_>, base: BaseType, modifiers: &[Modifier]) -> Vec<u32>
    {
        let values: Vec<u32> = def.lengths.iter().copied().map(u32::from).collect();
        let mut candidates = Vec::with_capacity(2);
        if values.len() >= 2 && usize::try_from(values[0]).ok() == Some(values.len() - 1) {
            candidates.push(values[1..].to_vec());
        }
        candidates.push(values);

        let leading = modifiers.iter().take_while(|m| **m == Modifier::Array).count();
        let element = match modifiers.get(leading) {
            Some(Modifier::Pointer) => Some(POINTER_SIZE),
            Some(_) => None,
            None => self.base_size(base, &def.tag),
        };

        match element {
            Some(element) if leading > 0 => {
                let bounds = candidates.into_iter().find(|bounds| {
                    bounds.len() >= leading
                        && bounds[..leading]
                            .iter()
                            .try_fold(element, |total, len| total.checked_mul(*len))
                            == Some(def.size)
                });
                if bounds.is_none() {
                    trace!(symbol = %def.symbol, "array bounds do not match the record size");
                }
                bounds.unwrap_or_default()
            }
            _ => candidates.into_iter().next().unwrap_or_default(),
        }
    }

    /// Size in bytes of a base type, if known.
    fn base_size(&self, base: BaseType, tag: &str) -> Option<u32>
    {
        match base {
            BaseType::Null | BaseType::Void => None,
            BaseType::Char | BaseType::UChar => Some(1),
            BaseType::Short | BaseType::UShort => Some(2),
            BaseType::Int
            | BaseType::UInt
            | BaseType::Long
            | BaseType::ULong
            | BaseType::Float
            | BaseType::EnumMember
            | BaseType::Enum => Some(4),
            BaseType::Double => Some(8),
            BaseType::Struct => self.sizes.get(&(TagKind::Struct, tag.to_string())).copied(),
            BaseType::Union => self.sizes.get(&(TagKind::Union, tag.to_string())).copied(),
        }
    }

    fn base_ctype(&self, base: BaseType, tag: &str) -> CType
    {
        let base = match base {
            BaseType::Null | BaseType::Void => ctype::BaseType::Void,
            BaseType::Char => ctype::BaseType::Char,
            BaseType::Short => ctype::BaseType::Short,
            BaseType::Int | BaseType::EnumMember => ctype::BaseType::Int,
            BaseType::Long => ctype::BaseType::Long,
            BaseType::Float => ctype::BaseType::Float,
            BaseType::Double => ctype::BaseType::Double,
            BaseType::UChar => ctype::BaseType::UChar,
            BaseType::UShort => ctype::BaseType::UShort,
            BaseType::UInt => ctype::BaseType::UInt,
            BaseType::ULong => ctype::BaseType::ULong,
            BaseType::Struct => return self.resolve(TagKind::Struct, tag),
            BaseType::Union => return self.resolve(TagKind::Union, tag),
            BaseType::Enum => return self.resolve(TagKind::Enum, tag),
        };
        CType::Base(base)
    }

    fn resolve(&self, kind: TagKind, tag: &str) -> CType
    {
        if is_anonymous(tag) {
            if let Some(body) = self.anonymous.get(&(kind, tag.to_string())) {
                return body.clone();
            }
        }
        match kind {
            TagKind::Struct => CType::struct_ref(tag),
            TagKind::Union => CType::union_ref(tag),
            TagKind::Enum => CType::enum_ref(tag),
        }
    }
}
