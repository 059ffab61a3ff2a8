#![forbid(unsafe_code)]

//! The Modal composite: controller, merged configuration, context, surface,
//! and slot components.
//!
//! # Lifecycle
//!
//! A [`ModalController`] owns the open/closed state of one modal. The caller
//! drives it with [`ModalController::set_open`]; user dismissals (close
//! button, backdrop tap, Escape via the overlay manager) are queued on the
//! controller and applied by [`ModalController::flush`] or the next
//! `set_open`. Every transition fires the owner callbacks and is returned as
//! a [`ModalTransition`].
//!
//! # Configuration
//!
//! On activation the controller merges library defaults, the theme's
//! `"Modal"` entry, and the instance props into a [`ModalConfiguration`].
//! Slots read it through the [`ModalContext`] carried by the render scope,
//! then apply their own explicit props on top.
//!
//! # Example
//!
//! ```ignore
//! use mantle_widgets::modal::*;
//!
//! let mut overlays = OverlayManager::new();
//! let mut modal = ModalController::new(
//!     ModalProps::new()
//!         .on_close(|_| println!("closed"))
//!         .prop("size", "lg"),
//! )
//! .child(
//!     ModalContent::new()
//!         .child(ModalCloseButton::new())
//!         .child(ModalHeader::new().child(Label::new("Title")))
//!         .child(ModalBody::new().child(Label::new("Body"))),
//! );
//!
//! modal.set_open(true, &mut overlays);
//! let layers = overlays.render()?;
//!
//! // The renderer dispatches a tap on the close button (or the backdrop).
//! // The press only queues the request; the host applies it afterwards,
//! // typically once per event-loop turn.
//! if let Some(button) = layers[0].find_kind(NodeKind::Button) {
//!     button.press();
//! }
//! if let Some(ModalTransition::Closed(_)) = modal.flush(&mut overlays) {
//!     // on_close(false) has fired and the layer is gone.
//! }
//! ```
//!
//! A host that never calls [`ModalController::flush`] (or `set_open`) after
//! dispatching input will never see taps close the modal.

mod config;
mod context;
mod controller;
mod slots;
mod surface;

pub use config::{
    DEFAULT_CONTENT_WIDTH, MODAL_COMPONENT, ModalConfiguration, SlotKey, keys,
};
pub use context::{DismissMailbox, ModalContext};
pub use controller::{CloseReason, ModalController, ModalProps, ModalState, ModalTransition};
pub use slots::{
    ModalBody, ModalCloseButton, ModalContent, ModalFooter, ModalHeader, ModalOverlay,
};
