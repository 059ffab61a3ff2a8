#![forbid(unsafe_code)]

//! Layered configuration merge.
//!
//! Widgets resolve their configuration from three layers, lowest precedence
//! first: library defaults, theme-resolved defaults, and instance props.
//!
//! # Invariants
//!
//! - Higher layers win key-wise.
//! - Nested maps are merged one level deep, so an instance that sets only
//!   `{ p: 2 }` inside a style object keeps the theme's other style keys.
//! - Inputs are never mutated; the result is a fresh map.

use crate::props::Props;

/// Merge library defaults, theme defaults, and instance props.
#[must_use]
pub fn merge(library: &Props, theme: &Props, instance: &Props) -> Props {
    merge_layers([library, theme, instance])
}

/// Merge any number of layers, lowest precedence first.
#[must_use]
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a Props>) -> Props {
    layers.into_iter().fold(Props::new(), |acc, layer| {
        for (key, value) in layer {
            if let Some(lower) = acc.get(key)
                && lower != value
            {
                tracing::trace!(key = key.as_str(), "configuration layer overrides key");
            }
        }
        acc.merge_nested(layer)
    })
}
