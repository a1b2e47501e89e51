//! # C Type Model
//!
//! C types recovered from a symbol table, and their C syntax.
//!
//! Every type has two renderings:
//!
//! - the **reference form** (`Display`), used when the type appears inside
//!   another one: `struct Foo`, `int*`, `short[4]`, `int (*)()`
//! - the **definition form** ([`CType::definition`]), used for top-level
//!   declarations: the full `struct Foo { ... }` body, `typedef` lines and
//!   sorted enum bodies
//!
//! Variable and field declarations go through [`Field`], which applies the
//! declarator rules in [`declarator`].
//!
//! The model is a tree. Aggregates refer to other aggregates by tag, never by
//! embedding them, except for anonymous bodies which are owned by the field
//! that uses them.

mod aggregate;
pub mod declarator;

use std::fmt;

pub use declarator::is_fake_tag;

/// C base types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType
{
    Void,
    Char,
    Short,
    Int,
    Long,
    UChar,
    UShort,
    UInt,
    ULong,
    Float,
    Double,
}

impl BaseType
{
    /// C spelling of the type.
    #[must_use]
    pub const fn c_name(self) -> &'static str
    {
        match self {
            BaseType::Void => "void",
            BaseType::Char => "char",
            BaseType::Short => "short",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::UChar => "unsigned char",
            BaseType::UShort => "unsigned short",
            BaseType::UInt => "unsigned int",
            BaseType::ULong => "unsigned long",
            BaseType::Float => "float",
            BaseType::Double => "double",
        }
    }
}

impl fmt::Display for BaseType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.c_name())
    }
}

/// Pointer to an element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerType
{
    pub elem: Box<CType>,
}

/// Array of an element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType
{
    pub elem: Box<CType>,
    /// Number of elements; `None` renders as `[]`
    pub len: Option<u32>,
}

/// Function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType
{
    pub ret: Box<CType>,
    pub params: Vec<Field>,
    pub variadic: bool,
}

/// Structure type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructType
{
    /// Structure tag; empty or fake for anonymous structures
    pub tag: String,
    /// Size in bytes, 0 when unknown
    pub size: u32,
    pub fields: Vec<Field>,
}

/// Union type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnionType
{
    /// Union tag; empty or fake for anonymous unions
    pub tag: String,
    /// Size in bytes, 0 when unknown
    pub size: u32,
    pub fields: Vec<Field>,
}

/// Enumeration type
///
/// Members are kept in the order they were added. Rendering sorts a copy by
/// value, so printing never reorders the type itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumType
{
    pub tag: String,
    pub members: Vec<EnumMember>,
}

/// Enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember
{
    pub name: String,
    pub value: u32,
}

/// Type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typedef
{
    pub name: String,
    /// Underlying type
    pub ty: Box<CType>,
}

/// A C type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CType
{
    Base(BaseType),
    Pointer(PointerType),
    Array(ArrayType),
    Func(FuncType),
    Struct(StructType),
    Union(UnionType),
    Enum(EnumType),
    Typedef(Typedef),
}

impl CType
{
    pub fn pointer(elem: CType) -> Self
    {
        CType::Pointer(PointerType { elem: Box::new(elem) })
    }

    pub fn array(elem: CType, len: Option<u32>) -> Self
    {
        CType::Array(ArrayType { elem: Box::new(elem), len })
    }

    pub fn func(ret: CType, params: Vec<Field>, variadic: bool) -> Self
    {
        CType::Func(FuncType {
            ret: Box::new(ret),
            params,
            variadic,
        })
    }

    /// Reference to a struct tag whose body is defined elsewhere.
    pub fn struct_ref(tag: impl Into<String>) -> Self
    {
        CType::Struct(StructType {
            tag: tag.into(),
            ..StructType::default()
        })
    }

    /// Reference to a union tag whose body is defined elsewhere.
    pub fn union_ref(tag: impl Into<String>) -> Self
    {
        CType::Union(UnionType {
            tag: tag.into(),
            ..UnionType::default()
        })
    }

    /// Reference to an enum tag whose body is defined elsewhere.
    pub fn enum_ref(tag: impl Into<String>) -> Self
    {
        CType::Enum(EnumType {
            tag: tag.into(),
            members: Vec::new(),
        })
    }

    /// Full C definition of the type.
    ///
    /// Aggregates render their complete body, enums their sorted members and
    /// typedefs a `typedef` line. Other types render as their reference form.
    #[must_use]
    pub fn definition(&self) -> String
    {
        match self {
            CType::Struct(t) => t.definition(),
            CType::Union(t) => t.definition(),
            CType::Enum(t) => t.definition(),
            CType::Typedef(t) => t.definition(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            CType::Base(t) => write!(f, "{t}"),
            CType::Pointer(t) => write!(f, "{}*", t.elem),
            CType::Array(t) => match t.len {
                Some(len) => write!(f, "{}[{len}]", t.elem),
                None => write!(f, "{}[]", t.elem),
            },
            CType::Func(t) => {
                write!(f, "{} (*)(", t.ret)?;
                declarator::write_params(f, &t.params, t.variadic, 0)?;
                write!(f, ")")
            }
            CType::Struct(t) => f.write_str(&aggregate::reference("struct", &t.tag, &t.fields, 0)),
            CType::Union(t) => f.write_str(&aggregate::reference("union", &t.tag, &t.fields, 0)),
            CType::Enum(t) => {
                if t.tag.is_empty() {
                    write!(f, "enum")
                } else {
                    write!(f, "enum {}", t.tag)
                }
            }
            CType::Typedef(t) => f.write_str(&t.name),
        }
    }
}

impl StructType
{
    /// `struct Tag { ... }` with size and offset comments.
    #[must_use]
    pub fn definition(&self) -> String
    {
        aggregate::definition("struct", &self.tag, self.size, &self.fields)
    }
}

impl UnionType
{
    /// `union Tag { ... }` with size and offset comments.
    #[must_use]
    pub fn definition(&self) -> String
    {
        aggregate::definition("union", &self.tag, self.size, &self.fields)
    }
}

impl EnumType
{
    /// `enum Tag { ... }` with members sorted by value and aligned.
    #[must_use]
    pub fn definition(&self) -> String
    {
        aggregate::enum_definition(&self.tag, &self.members)
    }

    /// Members in rendering order: ascending by value, ties in insertion order.
    #[must_use]
    pub fn sorted_members(&self) -> Vec<&EnumMember>
    {
        let mut members: Vec<&EnumMember> = self.members.iter().collect();
        members.sort_by_key(|member| member.value);
        members
    }
}

impl Typedef
{
    /// `typedef <type> <name>;`
    #[must_use]
    pub fn definition(&self) -> String
    {
        match self.ty.as_ref() {
            CType::Base(base) => format!("typedef {base} {};", self.name),
            ty => format!("typedef {};", declarator::declaration(ty, &self.name, 0)),
        }
    }
}

/// A struct or union member, function parameter or variable
///
/// `offset` and `size` are optional metadata (0 when unknown) used for the
/// comments in aggregate bodies. `bits` marks a bitfield of that width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field
{
    pub offset: u32,
    pub size: u32,
    pub bits: Option<u32>,
    pub ty: CType,
    pub name: String,
}

impl Field
{
    pub fn new(ty: CType, name: impl Into<String>) -> Self
    {
        Self {
            offset: 0,
            size: 0,
            bits: None,
            ty,
            name: name.into(),
        }
    }

    /// Set the byte offset and size.
    #[must_use]
    pub fn at(mut self, offset: u32, size: u32) -> Self
    {
        self.offset = offset;
        self.size = size;
        self
    }

    /// Mark as a bitfield of `bits` width.
    #[must_use]
    pub fn with_bits(mut self, bits: u32) -> Self
    {
        self.bits = Some(bits);
        self
    }

    /// Declaration text for a line indented `depth` levels.
    ///
    /// Anonymous aggregate bodies are indented one level deeper than `depth`.
    #[must_use]
    pub fn declaration(&self, depth: usize) -> String
    {
        let mut decl = declarator::declaration(&self.ty, &self.name, depth);
        if let Some(bits) = self.bits {
            decl.push_str(&format!(" : {bits}"));
        }
        decl
    }
}

impl fmt::Display for Field
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.declaration(0))
    }
}
