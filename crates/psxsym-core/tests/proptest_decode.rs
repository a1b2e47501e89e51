//! Property-based tests for the record decoder.
//!
//! These tests verify that decoding handles arbitrary input safely and that
//! well-formed records decode to exactly their encoded size.

mod common;

use common::*;
use proptest::prelude::*;
use psxsym_core::symbols::{SymbolBody, SymbolReader, SymFile};
use psxsym_core::types::EncodedType;
use psxsym_core::Declarations;

/// Modifier stacks with no gaps, outermost first.
fn modifiers() -> impl Strategy<Value = Vec<u16>>
{
    prop::collection::vec(1u16..=3, 0..=6)
}

fn dimension_group() -> impl Strategy<Value = Vec<u16>>
{
    prop::collection::vec(1u16..=512, 0..4)
}

fn pstring() -> impl Strategy<Value = String>
{
    "[A-Za-z_][A-Za-z0-9_]{0,24}"
}

fn def2_record() -> impl Strategy<Value = (Vec<u8>, usize)>
{
    (
        any::<u32>(),
        any::<u16>(),
        0u16..16,
        modifiers(),
        any::<u32>(),
        pstring(),
        pstring(),
    )
        .prop_flat_map(|(value, class, base, mods, size, tag, name)| {
            let arrays = mods.iter().filter(|m| **m == ARY).count();
            let groups = arrays.max(1);
            prop::collection::vec(dimension_group(), groups).prop_map(move |dims| {
                let dims: Vec<&[u16]> = dims.iter().map(Vec::as_slice).collect();
                let bytes = def2(value, class, ty(base, &mods), size, &dims, &tag, &name);
                (bytes, groups)
            })
        })
}

fn any_record() -> impl Strategy<Value = Vec<u8>>
{
    prop_oneof![
        (any::<u32>(), pstring()).prop_map(|(value, s)| name(value, KIND_NAME_LOCAL, &s)),
        (any::<u32>(), pstring()).prop_map(|(value, s)| name(value, KIND_NAME_GLOBAL, &s)),
        (any::<u32>(), any::<u16>(), 0u16..16, modifiers(), any::<u32>(), pstring())
            .prop_map(|(value, class, base, mods, size, s)| def(value, class, ty(base, &mods), size, &s)),
        def2_record().prop_map(|(bytes, _)| bytes),
        (any::<u32>(), any::<u32>(), any::<u32>()).prop_map(|(value, length, id)| overlay(value, length, id)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Decoding never panics on arbitrary input.
    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = SymbolReader::new(&data).read_all();
        let _ = SymFile::parse(&data);
    }

    /// Decoding arbitrary input stops without panicking when collected too.
    #[test]
    fn collect_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let symbols: Vec<_> = SymbolReader::new(&data).filter_map(Result::ok).collect();
        let _ = Declarations::from_symbols(&symbols);
    }

    /// Type words built from gap-free modifier stacks always decode.
    #[test]
    fn gap_free_type_words_decode(base in 0u16..16, mods in modifiers()) {
        let decoded = EncodedType::new(ty(base, &mods)).decode().unwrap();
        prop_assert_eq!(decoded.modifiers.len(), mods.len());
        prop_assert_eq!(decoded.dimension_groups(), mods.iter().filter(|m| **m == ARY).count().max(1));
    }

    /// A well-formed Def2 consumes exactly its reported size.
    #[test]
    fn def2_size_matches_bytes((bytes, groups) in def2_record()) {
        let mut reader = SymbolReader::new(&bytes);
        let symbol = reader.next_symbol().unwrap().unwrap();

        prop_assert_eq!(symbol.size(), bytes.len());
        prop_assert_eq!(reader.position(), bytes.len());
        match &symbol.body {
            SymbolBody::Def2(def) => prop_assert_eq!(def.dims.len(), groups),
            other => prop_assert!(false, "expected Def2, got {:?}", other),
        }
        prop_assert!(reader.next_symbol().unwrap().is_none());
    }

    /// A stream of well-formed records decodes record by record.
    #[test]
    fn stream_sizes_add_up(records in prop::collection::vec(any_record(), 0..16)) {
        let bytes = stream(&records);
        let symbols = SymbolReader::new(&bytes).read_all().unwrap();

        prop_assert_eq!(symbols.len(), records.len());
        for (symbol, record) in symbols.iter().zip(&records) {
            prop_assert_eq!(symbol.size(), record.len());
        }
    }

    /// Cutting a well-formed record short is always a truncation error.
    #[test]
    fn truncated_record_is_reported((bytes, _) in def2_record(), cut in any::<prop::sample::Index>()) {
        let len = cut.index(bytes.len());
        let err = SymbolReader::new(&bytes[..len]).read_all();
        if len == 0 {
            prop_assert!(err.unwrap().is_empty());
        } else {
            let err = err.unwrap_err();
            prop_assert!(err.is_truncation());
            prop_assert_eq!(err.offset(), Some(0));
        }
    }
}
