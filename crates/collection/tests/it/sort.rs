//! Sorting by value and by derived keys.

use ordered_collection::{Accessor, Collection, Key, SortFlavor, SortOptions, Value, collection};
use similar_asserts::assert_eq;

fn named() -> Collection {
    let mut collection = Collection::new();
    collection.put("foo", collection! { "name" => "Foo" }.into());
    collection.put("bar", collection! { "name" => "Bar" }.into());
    collection.put("baz", collection! { "name" => "Baz" }.into());
    collection
}

fn keys(collection: &Collection) -> Vec<Key> {
    collection.keys().cloned().collect()
}

#[test]
fn sort_with_equal_comparator_keeps_order() {
    let mut collection = named();
    collection.sort(|_, _| std::cmp::Ordering::Equal);
    assert_eq!(collection, named());
}

#[test]
fn sorts_by_name() {
    crate::init_tracing();
    let mut collection = named();

    collection.sort_by(Accessor::Path("name"), SortOptions::default(), false).unwrap();
    assert_eq!(keys(&collection), vec![Key::from("bar"), Key::from("baz"), Key::from("foo")]);

    collection.sort_by_desc(Accessor::Path("name"), SortOptions::default()).unwrap();
    assert_eq!(keys(&collection), vec![Key::from("foo"), Key::from("baz"), Key::from("bar")]);
    assert_eq!(collection["foo"], Value::from(collection! { "name" => "Foo" }));
}

#[test]
fn sorts_numeric_strings_numerically() {
    let mut versions = collection! { "a" => "10", "b" => "9", "c" => "100" };
    let identity = |value: &Value| value.clone();

    versions.sort_by(Accessor::With(&identity), SortOptions::default(), false).unwrap();
    assert_eq!(keys(&versions), vec![Key::from("b"), Key::from("a"), Key::from("c")]);

    versions.sort_by(Accessor::With(&identity), SortOptions::new(SortFlavor::String), false).unwrap();
    assert_eq!(keys(&versions), vec![Key::from("a"), Key::from("c"), Key::from("b")]);
}

#[test]
fn sorts_case_insensitively() {
    let mut names = collection!["bob", "Alice", "carol"];
    let identity = |value: &Value| value.clone();
    let options = SortOptions::new(SortFlavor::String).case_insensitive(true);
    names.sort_by(Accessor::With(&identity), options, false).unwrap();
    assert_eq!(names.to_string(), r#"{"1":"Alice","0":"bob","2":"carol"}"#);
}

#[test]
fn reports_incomparable_keys() {
    let mut collection = collection! { "a" => collection! { "n" => 1 }, "b" => collection! { "n" => vec![1] } };
    let before = collection.clone();
    let err = collection.sort_by(Accessor::Path("n"), SortOptions::default(), true).unwrap_err();
    assert!(err.to_string().starts_with("cannot compare"), "{err}");
    assert_eq!(collection, before);
}
