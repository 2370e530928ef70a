//! Operations returning new collections.

use ordered_collection::{Accessor, Collection, Key, Object, Value, collection};
use similar_asserts::assert_eq;

fn product() -> Collection {
    collection! { "product_id" => 1, "name" => "Desk", "price" => 100, "discount" => false }
}

fn books() -> Collection {
    collection![
        collection! { "name" => "JavaScript: The Good Parts", "pages" => 176 },
        collection! { "name" => "JavaScript: The Definitive Guide", "pages" => 1096 },
    ]
}

#[test]
fn only_and_except_select_keys() {
    let product = product();
    let expected = collection! { "product_id" => 1, "name" => "Desk" };
    assert_eq!(product.only(["product_id", "name"]), expected);
    assert_eq!(product.except(["price", "discount"]), expected);
    assert_eq!(product.count(), 4);
}

#[test]
fn every_nth_item() {
    let letters = collection!["a", "b", "c", "d", "e", "f"];
    assert_eq!(letters.every(4, 0), collection!["a", "e"]);
    assert_eq!(letters.every(4, 1), collection!["b", "f"]);
}

#[test]
fn every_with_offset_past_step_is_empty() {
    let letters = collection!["a", "b", "c", "d", "e", "f"];
    assert_eq!(letters.every(1, 0), letters);
    assert_eq!(letters.every(2, 1), collection!["b", "d", "f"]);
    assert!(letters.every(2, 2).is_empty());
    assert!(letters.every(3, 7).is_empty());
    assert!(letters.every(10, 6).is_empty());
}

#[test]
#[should_panic = "step must be non-zero"]
fn every_rejects_zero_step() {
    collection!["a"].every(0, 0);
}

#[test]
fn flips_a_list() {
    let flipped = collection!["oranges", "apples", "pears"].flip().unwrap();
    assert_eq!(flipped, collection! { "oranges" => 0, "apples" => 1, "pears" => 2 });
}

#[test]
fn reduces_with_a_function() {
    let numbers = collection![1, 2, 3, 4, 5];
    let sum = numbers.reduce(|carry, item| carry + item.as_i64().unwrap_or_default(), 0);
    assert_eq!(sum, 15);
    let product = numbers.reduce(|carry, item| carry * item.as_i64().unwrap_or_default(), 10);
    assert_eq!(product, 1200);
}

#[test]
fn reverses_a_list() {
    let collection = collection!["php", 4.0, vec!["green", "red"]];

    let preserved = collection.reverse(true);
    assert_eq!(preserved.keys().cloned().collect::<Vec<_>>(), vec![Key::Int(2), Key::Int(1), Key::Int(0)]);
    assert_eq!(preserved.get(0), Some(&Value::from("php")));

    assert_eq!(collection.reverse(false), collection![vec!["green", "red"], 4.0, "php"]);
}

#[test]
fn filters_rejects_and_maps() {
    let ids = collection![collection! { "id" => "foo" }, collection! { "id" => "bar" }];
    let filtered = ids.filter(|item, _| item.field("id") == Some(Value::from("foo")));
    assert_eq!(filtered.count(), 1);

    let numbers = collection![1, 2, 3, 4];
    let small = numbers.reject(|value, _| value.as_i64().is_some_and(|n| n > 2));
    assert_eq!(small, collection![1, 2]);
    assert_eq!(numbers.reject_value(&Value::Int(3)), Collection::make([(0, 1), (1, 2), (3, 4)]).map(|v, _| Value::from(*v)));

    let mapped = ids.map(|item, _| {
        let id = item.field("id").and_then(|id| id.as_str().map(str::to_string)).unwrap_or_default();
        Value::from(collection! { "id" => format!("{id}baz") })
    });
    assert_eq!(mapped, collection![collection! { "id" => "foobaz" }, collection! { "id" => "barbaz" }]);
}

#[test]
fn slices_a_list() {
    let letters = collection!["a", "b", "c", "d", "e"];
    assert_eq!(letters.slice(2, None, false), collection!["c", "d", "e"]);
    assert_eq!(letters.slice(-2, Some(1), false), collection!["d"]);
    assert_eq!(letters.slice(2, Some(-1), true), Collection::make([(2, "c"), (3, "d")]).map(|v, _| Value::from(*v)));
}

#[test]
fn merges_keyed_and_listed_entries() {
    let first = collection! { "a" => 1, 5 => "x" };
    let second = collection! { "a" => 2, "b" => 3 };
    let third = collection!["y"];
    let merged = first.merge([&second, &third]);
    assert_eq!(merged, Collection::make([
        (Key::from("a"), Value::Int(2)),
        (Key::Int(0), "x".into()),
        (Key::from("b"), 3.into()),
        (Key::Int(1), "y".into()),
    ]));
    assert_eq!(first.count(), 2);
}

#[test]
fn merges_many_collections_in_order() {
    let first = collection! { "a" => 1, 7 => "x" };
    let second = collection!["y", "z"];
    let third = collection! { "b" => 2, "a" => 3 };
    let fourth = collection! { 40 => "w", "b" => 4 };

    let mut merged = first.merge([&second, &third, &fourth]);
    assert_eq!(merged.to_string(), r#"{"a":3,"0":"x","1":"y","2":"z","b":4,"3":"w"}"#);

    merged.push("v".into()).unwrap();
    assert_eq!(merged.last(), Some(&Value::from("v")));
    assert_eq!(merged.keys().last(), Some(&Key::Int(4)));

    assert_eq!(collection![].merge([&first]), collection! { "a" => 1, 0 => "x" });
    assert_eq!(first.merge(std::iter::empty()), collection! { "a" => 1, 0 => "x" });
}

#[test]
fn chunks_a_list() {
    let chunks = collection![1, 2, 3, 4, 5, 6, 7].chunk(4, false);
    assert_eq!(chunks.to_string(), "[[1,2,3,4],[5,6,7]]");
}

#[test]
fn lists_and_plucks_fields() {
    let ids = collection![collection! { "id" => "foo" }, collection! { "id" => "bar" }];
    assert_eq!(ids.lists("id"), vec![Value::from("foo"), Value::from("bar")]);

    let plucked = books().pluck("pages", Some("name"));
    assert_eq!(
        Collection::from(plucked),
        collection! { "JavaScript: The Good Parts" => 176, "JavaScript: The Definitive Guide" => 1096 }
    );
}

#[test]
fn sums_values() {
    crate::init_tracing();
    assert_eq!(collection![2, 3].sum(None).unwrap(), Value::Int(5));
    assert_eq!(books().sum(Some(Accessor::Path("pages"))).unwrap(), Value::Int(1272));
    assert_eq!(books().sum(Some("pages".into())).unwrap(), Value::Int(1272));
}

#[test]
fn sums_by_method_calls() {
    #[derive(Debug)]
    struct Item(i64);

    impl Object for Item {
        fn call(&self, method: &str) -> Option<Value> {
            (method == "getValue").then(|| Value::Int(self.0))
        }
    }

    let items = collection![Value::object(Item(2)), Value::object(Item(3))];
    assert_eq!(items.sum(Some(Accessor::Method("getValue"))).unwrap(), Value::Int(5));

    // Entries without the method, and plain values, contribute nothing.
    let mixed = collection! { "a" => Value::object(Item(-4)), "b" => 9, "c" => Value::object(Item(10)) };
    assert_eq!(mixed.sum(Some(Accessor::Method("getValue"))).unwrap(), Value::Int(6));
    assert_eq!(mixed.sum(Some(Accessor::Method("missing"))).unwrap(), Value::Int(0));
}
