//! Text listings of decoded tables.
//!
//! [`dump`] prints the raw records, one per line, in the same shape as their
//! `Display` impls. [`declarations`] prints the recovered C declarations as a
//! pseudo-header.

use std::fmt::{self, Write};

use crate::collect::{Declarations, Variable};
use crate::symbols::Symbol;
use crate::types::Class;

/// One line per symbol: `$<value> <kind> <summary>`.
pub fn dump<W: Write>(symbols: &[Symbol], out: &mut W) -> fmt::Result
{
    for symbol in symbols {
        writeln!(out, "{symbol}")?;
    }
    Ok(())
}

/// Aggregates in definition order, then typedefs, then globals by address.
pub fn declarations<W: Write>(decls: &Declarations, out: &mut W) -> fmt::Result
{
    for ty in &decls.types {
        writeln!(out, "{};", ty.definition())?;
        writeln!(out)?;
    }

    for typedef in &decls.typedefs {
        writeln!(out, "{}", typedef.definition())?;
    }
    if !decls.typedefs.is_empty() {
        writeln!(out)?;
    }

    for variable in decls.variables_by_address() {
        write_variable(variable, out)?;
    }
    Ok(())
}

fn write_variable<W: Write>(variable: &Variable, out: &mut W) -> fmt::Result
{
    writeln!(out, "// {}", variable.address)?;
    if variable.class == Class::Static {
        out.write_str("static ")?;
    }
    writeln!(out, "{};", variable.field)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::ctype::{BaseType, CType, Field, StructType, Typedef};
    use crate::types::Address;

    #[test]
    fn test_globals_sorted_by_address()
    {
        let int = CType::Base(BaseType::Int);
        let decls = Declarations {
            variables: vec![
                Variable {
                    address: Address::new(0x8001_0010),
                    class: Class::Extern,
                    field: Field::new(int.clone(), "b"),
                },
                Variable {
                    address: Address::new(0x8001_0000),
                    class: Class::Static,
                    field: Field::new(int, "a"),
                },
            ],
            ..Declarations::default()
        };

        let mut out = String::new();
        declarations(&decls, &mut out).unwrap();
        assert_eq!(out, "// $80010000\nstatic int a;\n// $80010010\nint b;\n");
    }

    #[test]
    fn test_section_order()
    {
        let point = StructType {
            tag: "Point".into(),
            size: 0,
            fields: vec![Field::new(CType::Base(BaseType::Short), "x")],
        };
        let decls = Declarations {
            types: vec![CType::Struct(point)],
            typedefs: vec![Typedef {
                name: "Point_t".into(),
                ty: Box::new(CType::struct_ref("Point")),
            }],
            variables: Vec::new(),
        };

        let mut out = String::new();
        declarations(&decls, &mut out).unwrap();
        assert_eq!(out, "struct Point {\n\tshort x;\n};\n\ntypedef struct Point Point_t;\n\n");
    }
}
