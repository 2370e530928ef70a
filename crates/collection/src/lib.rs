//! # ordered-collection
//!
//! An ordered key-value container with array-like ergonomics.
//!
//! [`Collection`] keeps its entries in insertion order under integer or string [`Key`]s and
//! exposes a fluent set of helpers on top: `map`, `filter`, `reduce`, `sort_by`, `chunk`,
//! `slice`, `pluck`, `sum` and friends. Most helpers return a new collection; the few that
//! mutate (`put`, `push`, `pop`, `shift`, `pull`, `forget` and the sorts) say so.
//!
//! Values default to the dynamic [`Value`] type, which mirrors a JSON document with ordered,
//! mixed-key arrays:
//!
//! ```
//! use ordered_collection::{Accessor, SortOptions, Value, collection};
//!
//! let mut books = collection![
//!     collection! { "name" => "JavaScript: The Definitive Guide", "pages" => 1096 },
//!     collection! { "name" => "JavaScript: The Good Parts", "pages" => 176 },
//! ];
//!
//! assert_eq!(books.sum(Some(Accessor::Path("pages"))).unwrap(), Value::Int(1272));
//!
//! books.sort_by(Accessor::Path("pages"), SortOptions::default(), false).unwrap();
//! assert_eq!(books.lists("pages"), vec![Value::Int(176), Value::Int(1096)]);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod accessor;
pub use accessor::Accessor;

mod collection;
pub use collection::{Collection, Continue};

mod error;
pub use error::{CollectionError, Result};

mod key;
pub use key::Key;

mod options;
pub use options::{JsonOptions, SortFlavor, SortOptions};

mod value;
pub use value::{Array, Arrayable, Object, Truthy, Value};

/// Builds a [`Collection`] of [`Value`]s.
///
/// `key => value` pairs produce a keyed collection, a bare list of values produces one with
/// sequential integer keys. Keys go through [`Key::from`] and values through [`Value::from`].
///
/// ```
/// use ordered_collection::collection;
///
/// let keyed = collection! { "foo" => "Foo", "bar" => "Bar" };
/// assert_eq!(keyed.to_string(), r#"{"foo":"Foo","bar":"Bar"}"#);
///
/// let list = collection![1, 2, 3];
/// assert_eq!(list.to_string(), "[1,2,3]");
/// ```
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::<$crate::Value>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Collection::<$crate::Value>::make([
            $(($crate::Key::from($key), $crate::Value::from($value))),+
        ])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Collection::<$crate::Value>::from_values([$($crate::Value::from($value)),+])
    };
}
