//! Properties that hold for arbitrary collections.

use ordered_collection::{Accessor, Collection, Key, SortOptions, Truthy, Value};
use proptest::prelude::*;

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![(-5i64..20).prop_map(Key::Int), "[a-e]{1,3}".prop_map(Key::from)]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-100i64..100).prop_map(Value::Int),
        (-100i32..100).prop_map(|n| Value::Float(f64::from(n) / 4.0)),
        "[0-9a-z]{0,4}".prop_map(Value::String),
    ]
}

fn scalars() -> impl Strategy<Value = Collection> {
    proptest::collection::vec((key(), scalar()), 0..24).prop_map(Collection::make)
}

fn rows() -> impl Strategy<Value = Collection> {
    proptest::collection::vec((-50i64..50, 0i64..1000), 0..24).prop_map(|rows| {
        Collection::from_values(rows.into_iter().map(|(rank, id)| {
            Value::Array([(Key::from("rank"), Value::Int(rank)), (Key::from("id"), Value::Int(id))].into_iter().collect())
        }))
    })
}

proptest! {
    #[test]
    fn count_matches_backing_map(c in scalars()) {
        prop_assert_eq!(c.count(), c.all().len());
        prop_assert_eq!(c.is_empty(), c.count() == 0);
    }

    #[test]
    fn push_appends(mut c in scalars(), value in scalar()) {
        let count = c.count();
        prop_assert!(c.push(value.clone()).is_ok());
        prop_assert_eq!(c.count(), count + 1);
        prop_assert_eq!(c.last(), Some(&value));
    }

    #[test]
    fn put_then_get(mut c in scalars(), key in key(), value in scalar()) {
        c.put(key.clone(), value.clone());
        prop_assert_eq!(c.get(key.clone()), Some(&value));
        c.forget(key.clone());
        prop_assert!(!c.has(key));
    }

    #[test]
    fn to_array_round_trips(c in scalars()) {
        let round_tripped = Collection::from(c.to_array());
        prop_assert_eq!(round_tripped.all(), c.all());
    }

    #[test]
    fn identity_map_is_identity(c in scalars()) {
        prop_assert_eq!(c.map(|value, _| value.clone()), c);
    }

    #[test]
    fn filter_truthy_keeps_truthy_in_order(c in scalars()) {
        let filtered = c.filter_truthy();
        prop_assert!(filtered.values().all(Truthy::is_truthy));
        let expected: Vec<_> = c.iter().filter(|(_, value)| value.is_truthy()).collect();
        prop_assert_eq!(filtered.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn double_reverse_is_identity(c in scalars()) {
        prop_assert_eq!(c.reverse(true).reverse(true), c);
    }

    #[test]
    fn chunks_partition_values(c in scalars(), size in 1usize..6) {
        let chunks = c.chunk(size, false);
        prop_assert!(chunks.values().all(|chunk| chunk.count() <= size && !chunk.is_empty()));
        let flattened: Vec<_> = chunks.values().flat_map(|chunk| chunk.values().cloned()).collect();
        prop_assert_eq!(flattened, c.values().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn sort_by_is_stable(mut c in rows()) {
        let before: Vec<_> = c.values().cloned().collect();
        c.sort_by(Accessor::Path("rank"), SortOptions::default(), false).unwrap();

        let ranks = c.lists("rank");
        prop_assert!(ranks.windows(2).all(|w| w[0].as_i64() <= w[1].as_i64()));

        let mut expected = before;
        expected.sort_by_key(|row| row.field("rank").and_then(|rank| rank.as_i64()));
        prop_assert_eq!(c.values().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn sort_by_desc_reverses_distinct_keys(c in rows()) {
        let ids = c.lists("id");
        let mut distinct = std::collections::HashSet::new();
        prop_assume!(ids.iter().all(|id| distinct.insert(id.as_i64())));

        let mut ascending = c.clone();
        ascending.sort_by(Accessor::Path("id"), SortOptions::default(), false).unwrap();
        let mut descending = c;
        descending.sort_by_desc(Accessor::Path("id"), SortOptions::default()).unwrap();
        prop_assert_eq!(ascending.reverse(true), descending);
    }
}
