#![forbid(unsafe_code)]

//! Mantle public facade.
//!
//! Re-exports the style layer and the overlay/modal widgets under one crate,
//! plus a [`prelude`] for the common imports.
//!
//! ```ignore
//! use mantle::prelude::*;
//!
//! let mut overlays = OverlayManager::new();
//! let mut modal = ModalController::new(ModalProps::new().prop("size", "sm"))
//!     .child(ModalContent::new().child(ModalBody::new().child(Label::new("Saved"))));
//! modal.set_open(true, &mut overlays);
//! ```

pub use mantle_style as style;
pub use mantle_widgets as widgets;

pub use mantle_style::{
    ComponentTheme, EmptyTheme, PropValue, Props, Rgba, SharedTheme, Theme, ThemeResolver, props,
};
pub use mantle_widgets::modal;
pub use mantle_widgets::{
    Child, Component, FocusError, FocusHandle, FocusRef, Label, ModalError, Node, NodeKind,
    OverlayHandle, OverlayManager, RenderScope,
};

/// Common imports for building modals.
pub mod prelude {
    pub use mantle_style::{Props, Rgba, Theme, props};
    pub use mantle_widgets::modal::{
        CloseReason, ModalBody, ModalCloseButton, ModalContent, ModalController, ModalFooter,
        ModalHeader, ModalOverlay, ModalProps, ModalTransition,
    };
    pub use mantle_widgets::{Component, Label, ModalError, Node, OverlayManager, RenderScope};
}
