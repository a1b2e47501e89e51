//! Record encoders for building test inputs.

#![allow(dead_code)]

pub const KIND_NAME_LOCAL: u8 = 0x01;
pub const KIND_NAME_GLOBAL: u8 = 0x02;
pub const KIND_DEF: u8 = 0x94;
pub const KIND_DEF2: u8 = 0x96;
pub const KIND_OVERLAY: u8 = 0x98;

pub const C_EXT: u16 = 2;
pub const C_STAT: u16 = 3;
pub const C_MOS: u16 = 8;
pub const C_STRTAG: u16 = 10;
pub const C_MOU: u16 = 11;
pub const C_UNTAG: u16 = 12;
pub const C_TPDEF: u16 = 13;
pub const C_ENTAG: u16 = 15;
pub const C_MOE: u16 = 16;
pub const C_FIELD: u16 = 18;
pub const C_EOS: u16 = 102;

pub const T_NULL: u16 = 0x00;
pub const T_CHAR: u16 = 0x02;
pub const T_SHORT: u16 = 0x03;
pub const T_INT: u16 = 0x04;
pub const T_STRUCT: u16 = 0x08;
pub const T_UNION: u16 = 0x09;
pub const T_ENUM: u16 = 0x0A;
pub const T_MOE: u16 = 0x0B;
pub const T_UINT: u16 = 0x0E;

pub const PTR: u16 = 1;
pub const FCN: u16 = 2;
pub const ARY: u16 = 3;

/// Pack a base type and modifiers (outermost first) into a type word.
pub fn ty(base: u16, modifiers: &[u16]) -> u16
{
    modifiers
        .iter()
        .enumerate()
        .fold(base, |word, (slot, modifier)| word | (modifier << (4 + slot * 2)))
}

pub fn header(value: u32, kind: u8) -> Vec<u8>
{
    let mut out = value.to_le_bytes().to_vec();
    out.push(kind);
    out
}

fn push_pstring(out: &mut Vec<u8>, s: &str)
{
    out.push(u8::try_from(s.len()).unwrap());
    out.extend_from_slice(s.as_bytes());
}

pub fn name(value: u32, kind: u8, name: &str) -> Vec<u8>
{
    let mut out = header(value, kind);
    push_pstring(&mut out, name);
    out
}

fn push_def_fields(out: &mut Vec<u8>, class: u16, ty: u16, size: u32)
{
    out.extend_from_slice(&class.to_le_bytes());
    out.extend_from_slice(&ty.to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes());
}

pub fn def(value: u32, class: u16, ty: u16, size: u32, name: &str) -> Vec<u8>
{
    let mut out = header(value, KIND_DEF);
    push_def_fields(&mut out, class, ty, size);
    push_pstring(&mut out, name);
    out
}

/// A Def2 record; each group in `dims` gets its zero terminator.
pub fn def2(value: u32, class: u16, ty: u16, size: u32, dims: &[&[u16]], tag: &str, name: &str) -> Vec<u8>
{
    let mut out = header(value, KIND_DEF2);
    push_def_fields(&mut out, class, ty, size);
    for group in dims {
        for len in *group {
            out.extend_from_slice(&len.to_le_bytes());
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    push_pstring(&mut out, tag);
    push_pstring(&mut out, name);
    out
}

pub fn overlay(value: u32, length: u32, id: u32) -> Vec<u8>
{
    let mut out = header(value, KIND_OVERLAY);
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(&id.to_le_bytes());
    out
}

pub fn stream(records: &[Vec<u8>]) -> Vec<u8>
{
    records.concat()
}

/// MND version 1 container around `records`.
pub fn sym_file(records: &[Vec<u8>]) -> Vec<u8>
{
    let mut out = vec![b'M', b'N', b'D', 1, 0, 0, 0, 0];
    out.extend(stream(records));
    out
}
