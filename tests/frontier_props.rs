use piecelog::frontier::{is_compatible, is_more_general_than, FrontierInstantiation};
use piecelog::symbol::SymbolStore;
use proptest::prelude::*;

const FRONTIER_LEN: usize = 3;

fn raw_instantiation() -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(prop::option::of(0u8..3), FRONTIER_LEN..=FRONTIER_LEN)
}

fn build(raw: &[Option<u8>], symbols: &SymbolStore) -> FrontierInstantiation {
    FrontierInstantiation::new(
        raw.iter()
            .map(|entry| entry.map(|c| symbols.intern(&format!("c{c}")))),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn compatibility_is_reflexive(raw in raw_instantiation()) {
        let symbols = SymbolStore::new();
        let inst = build(&raw, &symbols);
        prop_assert!(is_compatible(&inst, &inst));
    }

    #[test]
    fn compatibility_is_symmetric(a in raw_instantiation(), b in raw_instantiation()) {
        let symbols = SymbolStore::new();
        let (a, b) = (build(&a, &symbols), build(&b, &symbols));
        prop_assert_eq!(is_compatible(&a, &b), is_compatible(&b, &a));
    }

    #[test]
    fn compatibility_matches_positionwise_agreement(
        a in raw_instantiation(),
        b in raw_instantiation(),
    ) {
        let symbols = SymbolStore::new();
        let expected = a
            .iter()
            .zip(b.iter())
            .all(|(x, y)| x.is_none() || y.is_none() || x == y);
        prop_assert_eq!(is_compatible(&build(&a, &symbols), &build(&b, &symbols)), expected);
    }

    #[test]
    fn unspecified_is_compatible_with_everything(raw in raw_instantiation()) {
        let symbols = SymbolStore::new();
        let open = FrontierInstantiation::unspecified(FRONTIER_LEN);
        prop_assert!(is_compatible(&open, &build(&raw, &symbols)));
        prop_assert!(is_more_general_than(&open, &build(&raw, &symbols)));
    }

    #[test]
    fn more_general_implies_compatible(a in raw_instantiation(), b in raw_instantiation()) {
        let symbols = SymbolStore::new();
        let (a, b) = (build(&a, &symbols), build(&b, &symbols));
        if is_more_general_than(&a, &b) {
            prop_assert!(is_compatible(&a, &b));
        }
    }
}
