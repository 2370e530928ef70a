//! Plain array and JSON conversions.

use ordered_collection::{Array, Collection, JsonOptions, Key, Value, collection};
use serde::{Deserialize, Serialize};
use similar_asserts::assert_eq;

#[test]
fn serializes_a_collection() {
    let collection = collection! { "foo" => "Foo", "bar" => "Bar" };
    assert_eq!(serde_json::to_string(&collection).unwrap(), r#"{"foo":"Foo","bar":"Bar"}"#);
    assert_eq!(collection.to_json(JsonOptions::default()).unwrap(), r#"{"foo":"Foo","bar":"Bar"}"#);
    assert_eq!(collection.to_string(), r#"{"foo":"Foo","bar":"Bar"}"#);
}

#[test]
fn converts_to_a_plain_array() {
    let collection = collection! { "foo" => "Foo" };
    assert_eq!(collection.to_array(), Array::from_iter([(Key::from("foo"), Value::from("Foo"))]));

    let nested = collection![collection![1, 2], collection! { "a" => collection!["b"] }];
    assert_eq!(nested.to_string(), r#"[[1,2],{"a":["b"]}]"#);
}

#[test]
fn pretty_prints() {
    let collection = collection! { "foo" => collection![1, 2] };
    let json = collection.to_json(JsonOptions::new().pretty(true)).unwrap();
    assert_eq!(json, "{\n    \"foo\": [\n        1,\n        2\n    ]\n}");
}

#[test]
fn embeds_in_caller_types() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Cart {
        owner: String,
        #[serde(default)]
        items: Collection,
        options: JsonOptions,
    }

    let cart: Cart = serde_json::from_str(
        r#"{"owner":"alice","items":{"apples":3,"7":"pears"},"options":{"force_object":true}}"#,
    )
    .unwrap();
    assert_eq!(cart.items, collection! { "apples" => 3, 7 => "pears" });
    assert!(cart.options.force_object);
    assert!(!cart.options.pretty);

    let mut items = cart.items.clone();
    items.push("plums".into()).unwrap();
    assert!(items.has(8));

    let json = serde_json::to_string(&cart).unwrap();
    assert_eq!(serde_json::from_str::<Cart>(&json).unwrap(), cart);

    let empty: Cart = serde_json::from_str(r#"{"owner":"bob","options":{}}"#).unwrap();
    assert!(empty.items.is_empty());
}
