//! Property tests for generated accessors and queries.

use std::collections::BTreeSet;

use dcg_sdk::{
    ClientGenerator, GeneratedInterface, IntrospectedInterface, ManagedObjects, ObjectEntry,
    ObjectPath, PropertyTable, RuntimeError, SearchConditionError, Value,
};
use proptest::prelude::*;

const IFACE: &str = "com.example.Widget";
const OTHER: &str = "com.example.Other";

fn generate(props: &BTreeSet<String>) -> GeneratedInterface {
    let desc = IntrospectedInterface::new(IFACE, props.iter().cloned());
    ClientGenerator::default().generate(&desc).unwrap()
}

fn arb_props() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-e]", 1..=4)
}

/// Objects that either lack the interface or carry every declared property.
fn arb_full_objects(props: BTreeSet<String>) -> impl Strategy<Value = ManagedObjects> {
    let names: Vec<String> = props.into_iter().collect();
    let n = names.len();
    prop::collection::btree_map(
        "/o/[0-9]{1,2}".prop_map(ObjectPath::from),
        (any::<bool>(), prop::collection::vec(0i64..3, n)).prop_map(move |(implements, values)| {
            let mut entry = ObjectEntry::new();
            if implements {
                let table: PropertyTable = names
                    .iter()
                    .cloned()
                    .zip(values.into_iter().map(Value::Int))
                    .collect();
                entry.insert(IFACE.to_string(), table);
            } else {
                entry.insert(OTHER.to_string(), PropertyTable::new());
            }
            entry
        }),
        0..8,
    )
}

/// A query table over a subset of `props`.
fn arb_query(props: BTreeSet<String>) -> impl Strategy<Value = PropertyTable> {
    let names: Vec<String> = props.into_iter().collect();
    let n = names.len();
    prop::collection::vec(prop::option::of(0i64..3), n).prop_map(move |values| {
        names
            .iter()
            .zip(values)
            .filter_map(|(name, v)| v.map(|v| (name.clone(), Value::Int(v))))
            .collect()
    })
}

fn arb_case() -> impl Strategy<Value = (BTreeSet<String>, ManagedObjects, PropertyTable, PropertyTable)> {
    arb_props().prop_flat_map(|props| {
        (
            Just(props.clone()),
            arb_full_objects(props.clone()),
            arb_query(props.clone()),
            arb_query(props),
        )
    })
}

fn paths(generated: &GeneratedInterface, query: &PropertyTable, objects: &ManagedObjects) -> BTreeSet<String> {
    generated
        .query(query.clone())
        .unwrap()
        .search_paths(objects)
        .unwrap()
        .into_iter()
        .map(ObjectPath::into_string)
        .collect()
}

fn implementers(objects: &ManagedObjects) -> BTreeSet<String> {
    objects
        .iter()
        .filter(|(_, entry)| entry.contains_key(IFACE))
        .map(|(path, _)| path.to_string())
        .collect()
}

proptest! {
    /// Populated properties read back; unpopulated ones fail individually.
    #[test]
    fn accessor_reads_follow_table(
        props in arb_props(),
        table in prop::collection::btree_map("[a-e]", (0i64..3).prop_map(Value::Int), 0..5),
    ) {
        let generated = generate(&props);
        let mut entry = ObjectEntry::new();
        entry.insert(IFACE.to_string(), table.clone());
        let accessor = generated.accessor().wrap(&entry).unwrap();

        for name in &props {
            match table.get(name) {
                Some(value) => {
                    prop_assert_eq!(accessor.read(name).unwrap(), value);
                }
                None => {
                    let is_missing = matches!(
                        accessor.read(name),
                        Err(RuntimeError::MissingProperty { .. })
                    );
                    prop_assert!(is_missing);
                }
            }
        }
    }

    /// Wrapping an entry without the interface fails before any read.
    #[test]
    fn accessor_requires_interface(props in arb_props()) {
        let generated = generate(&props);
        let mut entry = ObjectEntry::new();
        entry.insert(OTHER.to_string(), PropertyTable::new());
        let err = generated.accessor().wrap(&entry).unwrap_err();
        prop_assert_eq!(err, RuntimeError::MissingInterface { interface_name: IFACE.into() });
    }

    /// The empty query returns exactly the implementers.
    #[test]
    fn empty_query_finds_implementers((props, objects, _, _) in arb_case()) {
        let generated = generate(&props);
        let found = paths(&generated, &PropertyTable::new(), &objects);
        prop_assert_eq!(found, implementers(&objects));
    }

    /// Unknown query keys are reported exactly.
    #[test]
    fn unknown_keys_listed_precisely(
        props in arb_props(),
        extra in prop::collection::btree_set("[f-h]", 1..=3),
        known in any::<bool>(),
    ) {
        let generated = generate(&props);
        let mut query: PropertyTable = extra.iter().map(|k| (k.clone(), Value::Bool(true))).collect();
        if known {
            let first = props.iter().next().unwrap();
            query.insert(first.clone(), Value::Int(0));
        }
        match generated.query(query) {
            Err(RuntimeError::UnknownSearchProperties { unknown, .. }) => {
                prop_assert_eq!(unknown, extra.into_iter().collect::<Vec<_>>());
            }
            other => {
                prop_assert!(false, "unexpected: {:?}", other);
            }
        }
    }

    /// Searching twice yields equal sequences.
    #[test]
    fn search_is_idempotent((props, objects, a, _) in arb_case()) {
        let generated = generate(&props);
        let query = generated.query(a).unwrap();
        let first: Vec<_> = query.search(&objects).unwrap().collect();
        let second: Vec<_> = query.search(&objects).unwrap().collect();
        prop_assert_eq!(first, second);
    }

    /// Uniqueness succeeds iff exactly one object matches, and otherwise
    /// reports every match.
    #[test]
    fn unique_search_checks_count((props, objects, a, _) in arb_case()) {
        let generated = generate(&props);
        let expected = paths(&generated, &a, &objects);
        let query = generated.query(a).unwrap().require_unique_match();

        match query.search(&objects) {
            Ok(search) => {
                let found: Vec<String> = search.map(|item| item.unwrap().0.to_string()).collect();
                prop_assert_eq!(expected.len(), 1);
                prop_assert_eq!(found, expected.into_iter().collect::<Vec<_>>());
            }
            Err(RuntimeError::SearchCondition(SearchConditionError::UniqueResult { result, .. })) => {
                prop_assert_ne!(expected.len(), 1);
                let reported: BTreeSet<String> = result.into_iter().map(|(p, _)| p.into_string()).collect();
                prop_assert_eq!(reported, expected);
            }
            Err(other) => {
                prop_assert!(false, "unexpected: {:?}", other);
            }
        }
    }

    /// Conjunction is intersection, disjunction is union.
    #[test]
    fn conjunction_and_disjunction((props, objects, a, b) in arb_case()) {
        let generated = generate(&props);
        let qa = generated.query(a.clone()).unwrap();
        let qb = generated.query(b.clone()).unwrap();
        let pa = paths(&generated, &a, &objects);
        let pb = paths(&generated, &b, &objects);

        let and: BTreeSet<String> = qa.conjunction(&qb).search_paths(&objects).unwrap()
            .into_iter().map(ObjectPath::into_string).collect();
        let or: BTreeSet<String> = qa.disjunction(&qb).search_paths(&objects).unwrap()
            .into_iter().map(ObjectPath::into_string).collect();

        prop_assert_eq!(and, pa.intersection(&pb).cloned().collect::<BTreeSet<_>>());
        prop_assert_eq!(or, pa.union(&pb).cloned().collect::<BTreeSet<_>>());
    }

    /// Within the implementers, negation is the complement.
    #[test]
    fn negation_complements_within_implementers((props, objects, a, _) in arb_case()) {
        let generated = generate(&props);
        let query = generated.query(a.clone()).unwrap();
        let within = query.negation().conjunction(&generated.queries().all());

        let negated: BTreeSet<String> = within.search_paths(&objects).unwrap()
            .into_iter().map(ObjectPath::into_string).collect();
        let matched = paths(&generated, &a, &objects);
        let complement: BTreeSet<String> = implementers(&objects).difference(&matched).cloned().collect();
        prop_assert_eq!(negated, complement);
    }
}
