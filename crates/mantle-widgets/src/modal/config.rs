#![forbid(unsafe_code)]

//! Merged modal configuration.
//!
//! A [`ModalConfiguration`] is the single immutable props map every slot of
//! one modal activation reads from. It is rebuilt from scratch whenever the
//! modal opens or refreshes; nothing ever edits one in place.

use std::sync::Arc;

use mantle_style::{PropValue, Props, Rgba, merge};

/// Well-known configuration and node prop keys.
pub mod keys {
    /// Explicit content width; wins over `size`.
    pub const WIDTH_OVERRIDE: &str = "_width";
    /// Size token; used as the content width when `_width` is absent.
    pub const SIZE: &str = "size";
    pub const CLOSE_ON_OVERLAY_CLICK: &str = "closeOnOverlayClick";
    pub const OVERLAY_COLOR: &str = "overlayColor";
    pub const OVERLAY_VISIBLE: &str = "overlayVisible";
    pub const AVOID_KEYBOARD: &str = "avoidKeyboard";

    /// Resolved width on a rendered node.
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "h";
    /// Background color on a rendered node.
    pub const BG: &str = "bg";
    /// Whether a rendered node is drawn at all.
    pub const VISIBLE: &str = "visible";
    pub const JUSTIFY_CONTENT: &str = "justifyContent";
    pub const ALIGN_ITEMS: &str = "alignItems";
    pub const NATIVE_ID: &str = "nativeID";
    pub const Z_INDEX: &str = "zIndex";
    pub const STYLE: &str = "style";
}

/// Component name used for theme lookup.
pub const MODAL_COMPONENT: &str = "Modal";

/// Content width used when neither `_width` nor `size` is configured.
pub const DEFAULT_CONTENT_WIDTH: &str = "75%";

/// Per-slot configuration objects inside a [`ModalConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// Props for the surface box that positions modal content.
    Modal,
    Content,
    Header,
    Body,
    Footer,
    CloseButton,
    /// Style for the wrapper around the close button.
    CloseButtonStyle,
    /// Style for the backdrop and its capture region.
    OverlayStyle,
}

impl SlotKey {
    pub const ALL: [SlotKey; 8] = [
        SlotKey::Modal,
        SlotKey::Content,
        SlotKey::Header,
        SlotKey::Body,
        SlotKey::Footer,
        SlotKey::CloseButton,
        SlotKey::CloseButtonStyle,
        SlotKey::OverlayStyle,
    ];

    /// The configuration key holding this slot's props.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Modal => "modalProps",
            Self::Content => "modalContentProps",
            Self::Header => "modalHeaderProps",
            Self::Body => "modalBodyProps",
            Self::Footer => "modalFooterProps",
            Self::CloseButton => "modalCloseButtonProps",
            Self::CloseButtonStyle => "modalCloseButtonStyle",
            Self::OverlayStyle => "modalOverlayStyle",
        }
    }
}

/// Immutable merged configuration for one modal activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalConfiguration {
    props: Arc<Props>,
}

impl Default for ModalConfiguration {
    fn default() -> Self {
        Self::from_props(Self::library_defaults())
    }
}

impl ModalConfiguration {
    /// The library's built-in defaults (lowest precedence layer).
    #[must_use]
    pub fn library_defaults() -> Props {
        let mut defaults = Props::new()
            .with(keys::CLOSE_ON_OVERLAY_CLICK, true)
            .with(keys::OVERLAY_VISIBLE, true)
            .with(keys::AVOID_KEYBOARD, false);
        for slot in SlotKey::ALL {
            defaults.insert(slot.config_key(), Props::new());
        }
        defaults
    }

    /// Merge `library < theme < instance` into a configuration.
    #[must_use]
    pub fn merge(library: &Props, theme: &Props, instance: &Props) -> Self {
        Self::from_props(merge(library, theme, instance))
    }

    #[must_use]
    pub fn from_props(props: Props) -> Self {
        Self {
            props: Arc::new(props),
        }
    }

    /// The full merged map.
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    #[must_use]
    pub fn width_override(&self) -> Option<&PropValue> {
        self.props.get(keys::WIDTH_OVERRIDE)
    }

    #[must_use]
    pub fn size(&self) -> Option<&PropValue> {
        self.props.get(keys::SIZE)
    }

    #[must_use]
    pub fn close_on_overlay_click(&self) -> bool {
        self.props
            .get_bool(keys::CLOSE_ON_OVERLAY_CLICK)
            .unwrap_or(true)
    }

    #[must_use]
    pub fn overlay_color(&self) -> Option<Rgba> {
        self.props.get_color(keys::OVERLAY_COLOR)
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.props.get_bool(keys::OVERLAY_VISIBLE).unwrap_or(true)
    }

    #[must_use]
    pub fn avoid_keyboard(&self) -> bool {
        self.props.get_bool(keys::AVOID_KEYBOARD).unwrap_or(false)
    }

    /// Props configured for `slot`; empty if unset or not a map.
    #[must_use]
    pub fn slot(&self, slot: SlotKey) -> Props {
        self.props
            .get_map(slot.config_key())
            .cloned()
            .unwrap_or_default()
    }

    /// Width for `ModalContent`: `_width`, else `size`, else 75%.
    #[must_use]
    pub fn content_width(&self) -> PropValue {
        match (self.width_override(), self.size()) {
            (Some(width), size) => {
                if size.is_some() {
                    tracing::trace!("both _width and size configured; _width wins");
                }
                width.clone()
            }
            (None, Some(size)) => size.clone(),
            (None, None) => PropValue::from(DEFAULT_CONTENT_WIDTH),
        }
    }

    /// Whether two configurations share the same underlying map.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.props, &b.props)
    }
}
