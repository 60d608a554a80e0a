//! Named style modifiers (`color`, `marker`, `linewidth`,...) handed
//! to Matplotlib as keyword arguments.
//!
//! No validation is performed here: an unknown name or an ill-typed
//! value is reported by Matplotlib when the artist is drawn.

use std::collections::BTreeMap;
use pyo3::{
    prelude::*,
    types::PyDict,
};

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Sequences such as dash patterns or RGBA colors.
    Floats(Vec<f64>),
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self { StyleValue::Bool(b) }
}

impl From<i32> for StyleValue {
    fn from(i: i32) -> Self { StyleValue::Int(i as i64) }
}

impl From<i64> for StyleValue {
    fn from(i: i64) -> Self { StyleValue::Int(i) }
}

/// Values above `i64::MAX` saturate.
impl From<usize> for StyleValue {
    fn from(i: usize) -> Self {
        StyleValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for StyleValue {
    fn from(x: f64) -> Self { StyleValue::Float(x) }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self { StyleValue::Str(s.to_string()) }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self { StyleValue::Str(s) }
}

impl From<Vec<f64>> for StyleValue {
    fn from(v: Vec<f64>) -> Self { StyleValue::Floats(v) }
}

impl From<&[f64]> for StyleValue {
    fn from(v: &[f64]) -> Self { StyleValue::Floats(v.to_vec()) }
}

/// RGB color with components in \[0, 1\].
impl From<(f64, f64, f64)> for StyleValue {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        StyleValue::Floats(vec![r, g, b])
    }
}

impl ToPyObject for StyleValue {
    fn to_object(&self, py: Python<'_>) -> PyObject {
        match self {
            StyleValue::Bool(b) => b.to_object(py),
            StyleValue::Int(i) => i.to_object(py),
            StyleValue::Float(x) => x.to_object(py),
            StyleValue::Str(s) => s.to_object(py),
            StyleValue::Floats(v) => v.to_object(py),
        }
    }
}

/// Mapping from option names to values.  Setting a name twice keeps
/// the last value.
///
/// # Example
///
/// ```
/// use quickplot::StyleOptions;
/// let opts = StyleOptions::new().with("marker", "x").with("linewidth", 2.);
/// assert_eq!(opts.len(), 2);
/// let same: StyleOptions = [("marker", "x")].into();
/// assert_eq!(same.get("marker"), opts.get("marker"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    items: BTreeMap<String, StyleValue>,
}

impl StyleOptions {
    /// Return an empty set of options (Matplotlib defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `self` with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>,
                value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>,
                  value: impl Into<StyleValue>) -> &mut Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy the options into a fresh Python keyword dictionary.
    pub fn to_kwargs<'py>(&self, py: Python<'py>)
                          -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        for (k, v) in &self.items {
            kwargs.set_item(k, v.to_object(py))?;
        }
        Ok(kwargs)
    }
}

impl<K, V> FromIterator<(K, V)> for StyleOptions
where K: Into<String>, V: Into<StyleValue> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut opts = StyleOptions::new();
        for (k, v) in iter {
            opts.insert(k, v);
        }
        opts
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for StyleOptions
where K: Into<String>, V: Into<StyleValue> {
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_sizes_saturate() {
        assert_eq!(StyleValue::from(7_usize), StyleValue::Int(7));
        assert_eq!(StyleValue::from(usize::MAX), StyleValue::Int(i64::MAX));
    }

    #[test]
    fn last_value_wins() {
        let mut opts = StyleOptions::new();
        opts.insert("color", "red").insert("color", "blue");
        assert_eq!(opts.len(), 1);
        assert_eq!(opts.get("color"), Some(&StyleValue::Str("blue".into())));
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let opts: StyleOptions =
            [("marker", StyleValue::from("o")),
             ("color", (0., 0.5, 1.).into()),
             ("alpha", 0.5.into())].into();
        let names: Vec<_> = opts.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["alpha", "color", "marker"]);
    }

    #[test]
    fn kwargs_dictionary() -> PyResult<()> {
        let opts = StyleOptions::new()
            .with("linewidth", 2_i64)
            .with("antialiased", false)
            .with("dashes", vec![4., 2.]);
        Python::with_gil(|py| {
            let kwargs = opts.to_kwargs(py)?;
            assert_eq!(kwargs.len(), 3);
            let lw: i64 = kwargs.get_item("linewidth")?.unwrap().extract()?;
            assert_eq!(lw, 2);
            let aa: bool = kwargs.get_item("antialiased")?.unwrap().extract()?;
            assert!(!aa);
            let dashes: Vec<f64> = kwargs.get_item("dashes")?.unwrap().extract()?;
            assert_eq!(dashes, [4., 2.]);
            Ok(())
        })
    }

    #[test]
    fn empty_options_give_empty_kwargs() -> PyResult<()> {
        Python::with_gil(|py| {
            assert!(StyleOptions::new().to_kwargs(py)?.is_empty());
            Ok(())
        })
    }
}
