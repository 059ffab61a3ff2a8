#![forbid(unsafe_code)]

//! Theme lookup for component-level defaults.
//!
//! A theme maps a component name (e.g. `"Modal"`) to a [`ComponentTheme`]:
//! a base props map plus optional per-size overrides. Resolution is a pure
//! lookup; unknown components resolve to an empty map.
//!
//! [`SharedTheme`] wraps a theme in an [`ArcSwap`] so an application can swap
//! themes at runtime while widgets keep resolving through the same handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use arc_swap::ArcSwap;

use crate::props::Props;

/// Prop key that selects a size override.
pub const SIZE_KEY: &str = "size";

/// Resolves component-level defaults for a component instance.
pub trait ThemeResolver {
    /// Resolve the themed defaults for `component` given its instance props.
    ///
    /// Never fails; an unknown component yields an empty map.
    fn resolve(&self, component: &str, instance: &Props) -> Props;
}

impl<T: ThemeResolver + ?Sized> ThemeResolver for &T {
    fn resolve(&self, component: &str, instance: &Props) -> Props {
        (**self).resolve(component, instance)
    }
}

impl<T: ThemeResolver + ?Sized> ThemeResolver for std::rc::Rc<T> {
    fn resolve(&self, component: &str, instance: &Props) -> Props {
        (**self).resolve(component, instance)
    }
}

impl<T: ThemeResolver + ?Sized> ThemeResolver for Arc<T> {
    fn resolve(&self, component: &str, instance: &Props) -> Props {
        (**self).resolve(component, instance)
    }
}

/// A resolver with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTheme;

impl ThemeResolver for EmptyTheme {
    fn resolve(&self, _component: &str, _instance: &Props) -> Props {
        Props::new()
    }
}

/// Themed defaults for one component.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComponentTheme {
    /// Defaults applied to every instance.
    pub base: Props,
    /// Overrides keyed by the instance's `size` prop.
    pub sizes: BTreeMap<String, Props>,
}

impl ComponentTheme {
    #[must_use]
    pub fn new(base: Props) -> Self {
        Self {
            base,
            sizes: BTreeMap::new(),
        }
    }

    /// Add an override applied when the instance's `size` equals `name`.
    #[must_use]
    pub fn size(mut self, name: impl Into<String>, props: Props) -> Self {
        self.sizes.insert(name.into(), props);
        self
    }

    /// Resolve base plus the size override selected by `instance`.
    #[must_use]
    pub fn resolve(&self, instance: &Props) -> Props {
        match instance
            .get_str(SIZE_KEY)
            .and_then(|size| self.sizes.get(size))
        {
            Some(sized) => self.base.merge_nested(sized),
            None => self.base.clone(),
        }
    }
}

/// Registry of component themes.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Theme {
    components: AHashMap<String, ComponentTheme>,
}

impl Theme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the theme for a component.
    #[must_use]
    pub fn component(mut self, name: impl Into<String>, theme: ComponentTheme) -> Self {
        self.insert(name, theme);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, theme: ComponentTheme) {
        self.components.insert(name.into(), theme);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentTheme> {
        self.components.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ThemeResolver for Theme {
    fn resolve(&self, component: &str, instance: &Props) -> Props {
        match self.components.get(component) {
            Some(theme) => theme.resolve(instance),
            None => {
                tracing::trace!(component, "no theme entry; using empty defaults");
                Props::new()
            }
        }
    }
}

/// A theme handle that can be swapped at runtime.
///
/// Clones share the same underlying slot: swapping through one clone is
/// visible to every other.
#[derive(Debug, Clone)]
pub struct SharedTheme {
    current: Arc<ArcSwap<Theme>>,
}

impl SharedTheme {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(theme)),
        }
    }

    /// Replace the active theme.
    pub fn swap(&self, theme: Theme) {
        tracing::debug!(components = theme.len(), "theme swapped");
        self.current.store(Arc::new(theme));
    }

    /// Snapshot of the active theme.
    #[must_use]
    pub fn current(&self) -> Arc<Theme> {
        self.current.load_full()
    }
}

impl Default for SharedTheme {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl ThemeResolver for SharedTheme {
    fn resolve(&self, component: &str, instance: &Props) -> Props {
        self.current.load().resolve(component, instance)
    }
}
