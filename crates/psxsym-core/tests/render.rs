//! Tests for C declaration rendering

use psxsym_core::ctype::{
    declarator, is_fake_tag, BaseType, CType, EnumMember, EnumType, Field, StructType, Typedef, UnionType,
};

fn int() -> CType
{
    CType::Base(BaseType::Int)
}

fn short() -> CType
{
    CType::Base(BaseType::Short)
}

#[test]
fn test_pointer_declaration()
{
    let field = Field::new(CType::pointer(int()), "p");
    assert_eq!(field.to_string(), "int *p");
}

#[test]
fn test_array_declaration()
{
    let field = Field::new(CType::array(short(), Some(4)), "arr");
    assert_eq!(field.to_string(), "short arr[4]");
}

#[test]
fn test_array_of_arrays()
{
    let matrix = CType::array(CType::array(short(), Some(3)), Some(2));
    assert_eq!(Field::new(matrix, "m").to_string(), "short m[2][3]");
}

#[test]
fn test_unknown_array_length()
{
    let field = Field::new(CType::array(CType::Base(BaseType::Char), None), "buf");
    assert_eq!(field.to_string(), "char buf[]");
}

#[test]
fn test_array_of_pointers_and_pointer_to_array()
{
    let array_of_pointers = CType::array(CType::pointer(int()), Some(4));
    assert_eq!(Field::new(array_of_pointers, "p").to_string(), "int *p[4]");

    let pointer_to_array = CType::pointer(CType::array(int(), Some(4)));
    assert_eq!(Field::new(pointer_to_array, "p").to_string(), "int (*p)[4]");
}

#[test]
fn test_function_pointer_declaration()
{
    let field = Field::new(CType::pointer(CType::func(int(), vec![], false)), "fn");
    assert_eq!(field.to_string(), "int (*fn)()");
}

#[test]
fn test_function_declaration_with_params()
{
    let params = vec![
        Field::new(CType::Base(BaseType::UChar), "c"),
        Field::new(CType::pointer(CType::Base(BaseType::Void)), "ctx"),
    ];
    let field = Field::new(CType::func(CType::Base(BaseType::Void), params, false), "handler");
    assert_eq!(field.to_string(), "void (handler)(unsigned char c, void *ctx)");
}

#[test]
fn test_reference_forms()
{
    assert_eq!(CType::pointer(int()).to_string(), "int*");
    assert_eq!(CType::array(short(), Some(4)).to_string(), "short[4]");
    assert_eq!(CType::func(int(), vec![], false).to_string(), "int (*)()");
    assert_eq!(CType::struct_ref("Foo").to_string(), "struct Foo");
    assert_eq!(CType::union_ref("Bar").to_string(), "union Bar");
    assert_eq!(CType::enum_ref("Color").to_string(), "enum Color");
    assert_eq!(CType::Base(BaseType::ULong).to_string(), "unsigned long");
}

#[test]
fn test_struct_definition_with_sizes()
{
    let point = StructType {
        tag: "Point".into(),
        size: 8,
        fields: vec![Field::new(int(), "x").at(0, 4), Field::new(int(), "y").at(4, 4)],
    };
    assert_eq!(
        point.definition(),
        "// size = 0x8\nstruct Point {\n\t// offset: 0000 (4 bytes)\n\tint x;\n\t// offset: 0004 (4 bytes)\n\tint y;\n}"
    );
}

#[test]
fn test_struct_definition_offsets_without_sizes()
{
    let pair = StructType {
        tag: "Pair".into(),
        size: 0,
        fields: vec![Field::new(short(), "a").at(0, 0), Field::new(short(), "b").at(2, 0)],
    };
    assert_eq!(
        pair.definition(),
        "struct Pair {\n\t// offset: 0000\n\tshort a;\n\t// offset: 0002\n\tshort b;\n}"
    );
}

#[test]
fn test_struct_definition_without_offsets()
{
    let pair = StructType {
        tag: "Pair".into(),
        size: 0,
        fields: vec![Field::new(short(), "a"), Field::new(short(), "b")],
    };
    assert_eq!(pair.definition(), "struct Pair {\n\tshort a;\n\tshort b;\n}");
}

#[test]
fn test_single_field_offset_not_shown()
{
    let one = StructType {
        tag: "One".into(),
        size: 0,
        fields: vec![Field::new(int(), "only").at(8, 0)],
    };
    assert_eq!(one.definition(), "struct One {\n\tint only;\n}");
}

#[test]
fn test_union_definition()
{
    let value = UnionType {
        tag: "Value".into(),
        size: 4,
        fields: vec![
            Field::new(int(), "i").at(0, 4),
            Field::new(CType::Base(BaseType::Float), "f").at(0, 4),
        ],
    };
    assert_eq!(
        value.definition(),
        "// size = 0x4\nunion Value {\n\t// offset: 0000 (4 bytes)\n\tint i;\n\t// offset: 0000 (4 bytes)\n\tfloat f;\n}"
    );
}

#[test]
fn test_fake_union_is_inlined()
{
    let inner = UnionType {
        tag: "_0fake".into(),
        size: 4,
        fields: vec![Field::new(int(), "i"), Field::new(short(), "s")],
    };
    let outer = StructType {
        tag: "Outer".into(),
        size: 8,
        fields: vec![
            Field::new(CType::Union(inner), "u").at(0, 4),
            Field::new(int(), "tail").at(4, 4),
        ],
    };
    assert_eq!(
        outer.definition(),
        "// size = 0x8\nstruct Outer {\n\t// offset: 0000 (4 bytes)\n\tunion {\n\t\tint i;\n\t\tshort s;\n\t} u;\n\t// offset: \
         0004 (4 bytes)\n\tint tail;\n}"
    );
}

#[test]
fn test_nested_anonymous_bodies_indent()
{
    let innermost = StructType {
        tag: String::new(),
        size: 0,
        fields: vec![Field::new(CType::Base(BaseType::Char), "c")],
    };
    let middle = StructType {
        tag: "_1fake".into(),
        size: 0,
        fields: vec![Field::new(CType::Struct(innermost), "deep")],
    };
    let outer = StructType {
        tag: "Top".into(),
        size: 0,
        fields: vec![Field::new(CType::Struct(middle), "mid")],
    };
    assert_eq!(
        outer.definition(),
        "struct Top {\n\tstruct {\n\t\tstruct {\n\t\t\tchar c;\n\t\t} deep;\n\t} mid;\n}"
    );
}

#[test]
fn test_real_tag_is_referenced()
{
    let outer = StructType {
        tag: "Node".into(),
        size: 0,
        fields: vec![Field::new(CType::pointer(CType::struct_ref("Node")), "next")],
    };
    assert_eq!(outer.definition(), "struct Node {\n\tstruct Node *next;\n}");
}

#[test]
fn test_bitfield_declaration()
{
    let field = Field::new(CType::Base(BaseType::UInt), "flags").with_bits(3);
    assert_eq!(field.to_string(), "unsigned int flags : 3");
}

#[test]
fn test_enum_definition_sorted_and_aligned()
{
    let color = EnumType {
        tag: "Color".into(),
        members: vec![
            EnumMember {
                name: "BLUE".into(),
                value: 2,
            },
            EnumMember {
                name: "RED".into(),
                value: 0,
            },
            EnumMember {
                name: "GREEN".into(),
                value: 1,
            },
        ],
    };
    let expected = "enum Color {\n\tRED   = 0,\n\tGREEN = 1,\n\tBLUE  = 2,\n}";
    assert_eq!(color.definition(), expected);
    assert_eq!(CType::Enum(color.clone()).definition(), expected);

    // Rendering does not reorder the members.
    assert_eq!(color.members[0].name, "BLUE");
    assert_eq!(color.definition(), expected);
}

#[test]
fn test_enum_alignment_counts_characters()
{
    let lossy = EnumType {
        tag: "Lossy".into(),
        members: vec![
            EnumMember {
                name: "\u{FFFD}x".into(),
                value: 0,
            },
            EnumMember {
                name: "abcd".into(),
                value: 1,
            },
        ],
    };
    assert_eq!(lossy.definition(), "enum Lossy {\n\t\u{FFFD}x   = 0,\n\tabcd = 1,\n}");
}

#[test]
fn test_enum_sort_is_stable()
{
    let flags = EnumType {
        tag: "Flags".into(),
        members: vec![
            EnumMember {
                name: "B".into(),
                value: 1,
            },
            EnumMember {
                name: "A".into(),
                value: 1,
            },
        ],
    };
    let names: Vec<&str> = flags.sorted_members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn test_typedef_definitions()
{
    let word = Typedef {
        name: "u16".into(),
        ty: Box::new(CType::Base(BaseType::UShort)),
    };
    assert_eq!(word.definition(), "typedef unsigned short u16;");

    let callback = Typedef {
        name: "Callback".into(),
        ty: Box::new(CType::pointer(CType::func(CType::Base(BaseType::Void), vec![], false))),
    };
    assert_eq!(callback.definition(), "typedef void (*Callback)();");

    let point = Typedef {
        name: "Point".into(),
        ty: Box::new(CType::struct_ref("Point")),
    };
    assert_eq!(point.definition(), "typedef struct Point Point;");
    assert_eq!(CType::Typedef(point).to_string(), "Point");
}

#[test]
fn test_fake_tag_predicate()
{
    assert!(is_fake_tag("_0fake"));
    assert!(is_fake_tag("_42fake"));
    assert!(!is_fake_tag("fake"));
    assert!(!is_fake_tag("_afake"));
    assert!(!is_fake_tag("Point"));
}

#[test]
fn test_declaration_depth_matches_field()
{
    let int_ptr = CType::pointer(int());
    assert_eq!(declarator::declaration(&int_ptr, "p", 2), "int *p");
}
