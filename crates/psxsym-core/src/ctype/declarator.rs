//! Declarator synthesis.
//!
//! C declarations are written inside out: the name sits in the middle and each
//! type constructor wraps it, pointers on the left and arrays and functions on
//! the right. Starting from the outermost type we rewrite the name once per
//! wrapper and recurse into the wrapped type:
//!
//! | wrapper  | name becomes        |
//! |----------|---------------------|
//! | pointer  | `*name`             |
//! | array    | `name[len]`         |
//! | function | `(name)(params)`    |
//!
//! until a leaf type is reached and `<leaf> <name>` is printed. An array
//! applied to a pointer declarator gets parentheses, `(*name)[len]`, so a
//! pointer to an array does not read back as an array of pointers.
//!
//! ```rust
//! use psxsym_core::ctype::{BaseType, CType, Field};
//!
//! let int = CType::Base(BaseType::Int);
//! let fp = Field::new(CType::pointer(CType::func(int, vec![], false)), "fn");
//! assert_eq!(fp.to_string(), "int (*fn)()");
//! ```

use std::fmt::{self, Write};

use super::{aggregate, CType, Field};

/// Reports whether a tag was synthesized by the compiler for an untagged
/// aggregate: `_`, a decimal number, then `fake` (`_0fake`, `_12fake`).
#[must_use]
pub fn is_fake_tag(tag: &str) -> bool
{
    tag.strip_prefix('_')
        .and_then(|rest| rest.strip_suffix("fake"))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Aggregates with no programmer-visible tag are inlined rather than named.
pub(crate) fn is_anonymous(tag: &str) -> bool
{
    tag.is_empty() || is_fake_tag(tag)
}

/// Declaration of `name` with type `ty`, for a line indented `depth` levels.
#[must_use]
pub fn declaration(ty: &CType, name: &str, depth: usize) -> String
{
    let mut name = name.to_string();
    let mut ty = ty;
    loop {
        match ty {
            CType::Pointer(t) => {
                name = format!("*{name}");
                ty = t.elem.as_ref();
            }
            CType::Array(t) => {
                if name.starts_with('*') {
                    name = format!("({name})");
                }
                match t.len {
                    Some(len) => name.push_str(&format!("[{len}]")),
                    None => name.push_str("[]"),
                }
                ty = t.elem.as_ref();
            }
            CType::Func(t) => {
                let mut wrapped = format!("({name})(");
                // Writing into a String cannot fail.
                let _ = write_params(&mut wrapped, &t.params, t.variadic, depth);
                wrapped.push(')');
                name = wrapped;
                ty = t.ret.as_ref();
            }
            leaf => {
                let mut decl = leaf_name(leaf, depth);
                if !name.is_empty() {
                    decl.push(' ');
                    decl.push_str(&name);
                }
                return decl;
            }
        }
    }
}

fn leaf_name(ty: &CType, depth: usize) -> String
{
    match ty {
        CType::Struct(t) => aggregate::reference("struct", &t.tag, &t.fields, depth),
        CType::Union(t) => aggregate::reference("union", &t.tag, &t.fields, depth),
        other => other.to_string(),
    }
}

/// Comma-separated parameter list, with `...` for variadic functions.
pub(crate) fn write_params<W: Write>(out: &mut W, params: &[Field], variadic: bool, depth: usize) -> fmt::Result
{
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        out.write_str(&param.declaration(depth))?;
    }
    if variadic {
        if !params.is_empty() {
            out.write_str(", ")?;
        }
        out.write_str("...")?;
    }
    Ok(())
}
