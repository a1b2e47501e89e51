//! Struct, union and enum bodies.

use std::fmt::Write;

use super::declarator::is_anonymous;
use super::{EnumMember, Field};

fn indent(out: &mut String, depth: usize)
{
    for _ in 0..depth {
        out.push('\t');
    }
}

/// `struct Tag`, or the inlined body for anonymous aggregates.
pub(super) fn reference(keyword: &str, tag: &str, fields: &[Field], depth: usize) -> String
{
    if is_anonymous(tag) {
        let mut out = String::new();
        write_body(&mut out, keyword, None, fields, depth);
        out
    } else {
        format!("{keyword} {tag}")
    }
}

/// Top-level definition with the size comment.
pub(super) fn definition(keyword: &str, tag: &str, size: u32, fields: &[Field]) -> String
{
    let mut out = String::new();
    if size > 0 {
        let _ = writeln!(out, "// size = 0x{size:X}");
    }
    let tag = (!tag.is_empty()).then_some(tag);
    write_body(&mut out, keyword, tag, fields, 0);
    out
}

/// `keyword [tag] {`, one line per field at `depth + 1`, then `}` at `depth`.
///
/// The opening line is not indented; the caller has already positioned it.
fn write_body(out: &mut String, keyword: &str, tag: Option<&str>, fields: &[Field], depth: usize)
{
    match tag {
        Some(tag) => {
            let _ = writeln!(out, "{keyword} {tag} {{");
        }
        None => {
            let _ = writeln!(out, "{keyword} {{");
        }
    }

    // Without a size on the field itself, a nonzero second offset is the only
    // hint that the offsets are meaningful.
    let offsets_known = fields.len() > 1 && fields[1].offset > 0;
    for field in fields {
        if field.size > 0 {
            indent(out, depth + 1);
            let _ = writeln!(out, "// offset: {:04X} ({} bytes)", field.offset, field.size);
        } else if offsets_known {
            indent(out, depth + 1);
            let _ = writeln!(out, "// offset: {:04X}", field.offset);
        }
        indent(out, depth + 1);
        out.push_str(&field.declaration(depth + 1));
        out.push_str(";\n");
    }

    indent(out, depth);
    out.push('}');
}

/// `enum Tag {` with members sorted by value and `=` aligned.
pub(super) fn enum_definition(tag: &str, members: &[EnumMember]) -> String
{
    let mut out = String::new();
    if tag.is_empty() {
        out.push_str("enum {\n");
    } else {
        let _ = writeln!(out, "enum {tag} {{");
    }

    let mut sorted: Vec<&EnumMember> = members.iter().collect();
    sorted.sort_by_key(|member| member.value);
    // `{:<width$}` pads by characters, not bytes.
    let width = sorted.iter().map(|member| member.name.chars().count()).max().unwrap_or(0);
    for member in sorted {
        let _ = writeln!(out, "\t{:<width$} = {},", member.name, member.value);
    }

    out.push('}');
    out
}
