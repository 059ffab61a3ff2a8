#![forbid(unsafe_code)]

//! Style primitives for Mantle with layered, CSS-like override semantics.
//!
//! This crate provides:
//! - [`Rgba`] packed colors with hex parsing
//! - [`Props`] / [`PropValue`], the string-keyed property maps every widget
//!   configuration is expressed in
//! - [`merge`], the three-layer configuration merge (library < theme < instance)
//! - [`ThemeResolver`] and the [`Theme`] registry that backs it

pub mod color;
pub mod merge;
pub mod props;
pub mod theme;

pub use color::{ColorParseError, Rgba};
pub use merge::{merge, merge_layers};
pub use props::{PropValue, Props};
pub use theme::{ComponentTheme, EmptyTheme, SharedTheme, Theme, ThemeResolver};
