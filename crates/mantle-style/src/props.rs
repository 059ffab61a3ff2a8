#![forbid(unsafe_code)]

//! String-keyed property maps.
//!
//! A [`Props`] map is how every layer of widget configuration is expressed:
//! library defaults, theme output, instance props, and the per-slot style
//! objects nested inside them. Keys are kept sorted so rendering and debug
//! output are deterministic.
//!
//! # Override semantics
//!
//! - [`Props::overlay`] is a shallow override: every key present on top
//!   replaces the base value wholesale. This is how explicit slot props win
//!   over context-derived defaults.
//! - [`Props::merge_nested`] additionally merges nested maps one level deep,
//!   so a partial style object augments the lower layer instead of replacing it.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::color::Rgba;

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropValue {
    Bool(bool),
    Num(f64),
    Color(Rgba),
    Str(String),
    Map(Props),
}

impl PropValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Props> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<u16> for PropValue {
    fn from(value: u16) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<Rgba> for PropValue {
    fn from(value: Rgba) -> Self {
        Self::Color(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Props> for PropValue {
    fn from(value: Props) -> Self {
        Self::Map(value)
    }
}

/// Ordered map of named properties.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropValue::as_bool)
    }

    #[must_use]
    pub fn get_num(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_num)
    }

    #[must_use]
    pub fn get_color(&self, key: &str) -> Option<Rgba> {
        self.get(key).and_then(PropValue::as_color)
    }

    #[must_use]
    pub fn get_map(&self, key: &str) -> Option<&Props> {
        self.get(key).and_then(PropValue::as_map)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PropValue> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Shallow override: keys on `top` replace keys on `self`.
    #[must_use]
    pub fn overlay(&self, top: &Props) -> Props {
        let mut out = self.clone();
        for (key, value) in top.iter() {
            out.entries.insert(key.clone(), value.clone());
        }
        out
    }

    /// Override with nested maps merged one level deep.
    ///
    /// When both sides hold a map for the same key, the result is
    /// `self[key].overlay(top[key])`; values inside those maps are never
    /// merged further.
    #[must_use]
    pub fn merge_nested(&self, top: &Props) -> Props {
        let mut out = self.clone();
        for (key, value) in top.iter() {
            let merged = match (out.entries.get(key), value) {
                (Some(PropValue::Map(lower)), PropValue::Map(upper)) => {
                    PropValue::Map(lower.overlay(upper))
                }
                _ => value.clone(),
            };
            out.entries.insert(key.clone(), merged);
        }
        out
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build a [`Props`] map from `key => value` pairs.
///
/// ```
/// use mantle_style::props;
///
/// let p = props! { "size" => "lg", "closeOnOverlayClick" => false };
/// assert_eq!(p.get_str("size"), Some("lg"));
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::Props::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut p = $crate::Props::new();
        $( p.insert($key, $value); )+
        p
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_reject_mismatched_types() {
        let p = props! { "a" => "x", "b" => true, "c" => 2, "d" => Rgba::WHITE };
        assert_eq!(p.get_str("a"), Some("x"));
        assert_eq!(p.get_bool("a"), None);
        assert_eq!(p.get_bool("b"), Some(true));
        assert_eq!(p.get_num("c"), Some(2.0));
        assert_eq!(p.get_color("d"), Some(Rgba::WHITE));
        assert_eq!(p.get_map("d"), None);
        assert_eq!(p.get("missing"), None);
    }

    #[test]
    fn overlay_replaces_nested_maps_wholesale() {
        let base = props! { "style" => props! { "p" => 4, "bg" => "white" } };
        let top = props! { "style" => props! { "p" => 2 } };
        let out = base.overlay(&top);
        let style = out.get_map("style").cloned().unwrap_or_default();
        assert_eq!(style.get_num("p"), Some(2.0));
        assert!(!style.contains_key("bg"));
    }

    #[test]
    fn merge_nested_augments_one_level() {
        let base = props! {
            "style" => props! { "p" => 4, "bg" => "white", "inner" => props! { "x" => 1 } },
        };
        let top = props! {
            "style" => props! { "p" => 2, "inner" => props! { "y" => 2 } },
        };
        let out = base.merge_nested(&top);
        let style = out.get_map("style").cloned().unwrap_or_default();
        assert_eq!(style.get_num("p"), Some(2.0));
        assert_eq!(style.get_str("bg"), Some("white"));
        // Two levels down is replaced, not merged.
        let inner = style.get_map("inner").cloned().unwrap_or_default();
        assert!(!inner.contains_key("x"));
        assert_eq!(inner.get_num("y"), Some(2.0));
    }

    #[test]
    fn merge_nested_scalar_replaces_map() {
        let base = props! { "style" => props! { "p" => 4 } };
        let top = props! { "style" => "none" };
        assert_eq!(base.merge_nested(&top).get_str("style"), Some("none"));
    }

    #[test]
    fn from_iter_and_keys_are_sorted() {
        let p: Props = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(p.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(p.len(), 2);
        assert!(!p.is_empty());
    }
}
