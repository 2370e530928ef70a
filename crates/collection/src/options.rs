//! Options for sorting and JSON encoding.

use crate::{
    CollectionError, Result, Value,
    value::{Json, ensure_finite},
};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::cmp::Ordering;

/// How sort keys are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortFlavor {
    /// [`Value::try_cmp`]: numbers and numeric strings numerically, other strings bytewise.
    #[default]
    Regular,
    /// Coerce both sides to numbers first.
    Numeric,
    /// Compare the string form of both sides.
    String,
    /// Compare the string form of both sides, treating digit runs as numbers (`"img2"` sorts
    /// before `"img10"`).
    Natural,
}

/// Options for [`Collection::sort_by`](crate::Collection::sort_by).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// How sort keys are compared.
    pub flavor: SortFlavor,
    /// Ignore ASCII case. Only applies to the [`SortFlavor::String`] and [`SortFlavor::Natural`]
    /// flavors.
    pub case_insensitive: bool,
}

impl SortOptions {
    /// Options using the given flavor.
    pub const fn new(flavor: SortFlavor) -> Self {
        Self { flavor, case_insensitive: false }
    }

    /// Sets [`SortOptions::case_insensitive`].
    pub const fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Compares two sort keys.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<Ordering> {
        match self.flavor {
            SortFlavor::Regular => a.try_cmp(b),
            SortFlavor::Numeric => {
                let (x, y) = (a.to_number("sort")?, b.to_number("sort")?);
                x.partial_cmp(y).ok_or_else(|| CollectionError::type_mismatch("sort", "NaN"))
            }
            SortFlavor::String | SortFlavor::Natural => {
                let string = |value: &Value| {
                    let s = value.scalar_string().ok_or_else(|| {
                        CollectionError::type_mismatch(
                            "sort",
                            format!("a value of type {} as a string", value.kind()),
                        )
                    })?;
                    Ok::<_, CollectionError>(if self.case_insensitive {
                        s.to_ascii_lowercase()
                    } else {
                        s.into_owned()
                    })
                };
                let (x, y) = (string(a)?, string(b)?);
                if self.flavor == SortFlavor::Natural {
                    Ok(natural_cmp(&x, &y))
                } else {
                    Ok(x.cmp(&y))
                }
            }
        }
    }
}

/// Compares strings the way a person would order file names: runs of digits compare by
/// numeric value, everything else by byte.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let (end_a, digits_a) = digit_run(a, i);
            let (end_b, digits_b) = digit_run(b, j);
            let significant = |d: &[u8]| {
                let zeros = d.iter().take_while(|&&c| c == b'0').count();
                d.len() - zeros
            };
            let (len_a, len_b) = (significant(digits_a), significant(digits_b));
            let ordering = len_a
                .cmp(&len_b)
                .then_with(|| digits_a[digits_a.len() - len_a..].cmp(&digits_b[digits_b.len() - len_b..]))
                .then_with(|| digits_a.len().cmp(&digits_b.len()));
            if ordering.is_ne() {
                return ordering;
            }
            (i, j) = (end_a, end_b);
        } else {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => (i, j) = (i + 1, j + 1),
                ordering => return ordering,
            }
        }
    }
    (a.len() - i).cmp(&(b.len() - j))
}

/// Returns the end of the digit run starting at `start`, and the run itself.
fn digit_run(s: &[u8], start: usize) -> (usize, &[u8]) {
    let end = s[start..].iter().position(|c| !c.is_ascii_digit()).map_or(s.len(), |n| start + n);
    (end, &s[start..end])
}

/// Options for [`Collection::to_json`](crate::Collection::to_json).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Indent nested structures with four spaces.
    pub pretty: bool,
    /// Encode lists as objects keyed by index.
    pub force_object: bool,
}

impl JsonOptions {
    /// Compact output with lists encoded as arrays.
    pub const fn new() -> Self {
        Self { pretty: false, force_object: false }
    }

    /// Sets [`JsonOptions::pretty`].
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets [`JsonOptions::force_object`].
    pub const fn force_object(mut self, force_object: bool) -> Self {
        self.force_object = force_object;
        self
    }

    /// Encodes `value`. NaN and infinite floats fail with [`CollectionError::TypeMismatch`].
    pub(crate) fn encode(&self, value: &Value) -> Result<String> {
        ensure_finite(value)?;
        self.render(value)
    }

    /// Encodes `value`, writing NaN and infinite floats as `null`.
    pub(crate) fn render(&self, value: &Value) -> Result<String> {
        let json = Json { value, force_object: self.force_object };
        if !self.pretty {
            return Ok(serde_json::to_string(&json)?);
        }

        let mut out = Vec::with_capacity(128);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        json.serialize(&mut serializer)?;
        String::from_utf8(out)
            .map_err(|err| <serde_json::Error as serde::ser::Error>::custom(err).into())
    }
}
