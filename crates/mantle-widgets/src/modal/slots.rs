#![forbid(unsafe_code)]

//! Slot components of the Modal composite.
//!
//! Each slot reads the enclosing [`ModalContext`](super::ModalContext) from
//! its render scope, takes its configured props as a base, and applies its
//! own explicit props on top (shallow: explicit keys always win). Rendering a
//! slot outside an open modal fails with [`ModalError::MissingContext`].

use std::fmt;
use std::rc::Rc;

use mantle_style::{PropValue, Props};

use crate::error::ModalError;
use crate::modal::config::{SlotKey, keys};
use crate::scope::RenderScope;
use crate::view::{Node, NodeKind, PressHandler};
use crate::{Child, Component, render_children};

/// Shared builder surface for every slot.
macro_rules! slot_common {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Set one explicit prop.
            #[must_use]
            pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
                self.props.insert(key, value);
                self
            }

            /// Apply several explicit props at once.
            #[must_use]
            pub fn props(mut self, props: Props) -> Self {
                self.props = self.props.overlay(&props);
                self
            }

            #[must_use]
            pub fn child(mut self, child: impl Component + 'static) -> Self {
                self.children.push(Rc::new(child));
                self
            }

            #[must_use]
            pub fn shared_child(mut self, child: Child) -> Self {
                self.children.push(child);
                self
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("props", &self.props)
                    .field("children", &self.children.len())
                    .finish()
            }
        }
    };
}

/// Slots that are a plain box styled from one configuration key.
macro_rules! box_slot {
    ($(#[$meta:meta])* $name:ident, $slot:expr) => {
        $(#[$meta])*
        #[derive(Default)]
        pub struct $name {
            props: Props,
            children: Vec<Child>,
        }

        slot_common!($name);

        impl Component for $name {
            fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
                let context = scope.modal(stringify!($name))?;
                let props = context.configuration().slot($slot).overlay(&self.props);
                Ok(Node::boxed(props).children(render_children(&self.children, scope)?))
            }
        }
    };
}

box_slot!(
    /// Title region of a modal.
    ModalHeader,
    SlotKey::Header
);

box_slot!(
    /// Main content region of a modal.
    ModalBody,
    SlotKey::Body
);

box_slot!(
    /// Action region of a modal.
    ModalFooter,
    SlotKey::Footer
);

/// The dialog box itself.
///
/// Width resolves from the configuration's `_width`, then `size`, then 75%;
/// an explicit `width` prop still wins over all of them.
#[derive(Default)]
pub struct ModalContent {
    props: Props,
    children: Vec<Child>,
}

slot_common!(ModalContent);

impl Component for ModalContent {
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        let context = scope.modal("ModalContent")?;
        let configuration = context.configuration();
        let props = configuration
            .slot(SlotKey::Content)
            .with(keys::WIDTH, configuration.content_width())
            .overlay(&self.props);
        Ok(Node::boxed(props).children(render_children(&self.children, scope)?))
    }
}

/// Button that closes the enclosing modal.
///
/// The press handler always routes to the modal's close entry point; explicit
/// props style the button but cannot replace that behavior.
#[derive(Default)]
pub struct ModalCloseButton {
    props: Props,
    children: Vec<Child>,
}

slot_common!(ModalCloseButton);

impl Component for ModalCloseButton {
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        let context = scope.modal("ModalCloseButton")?;
        let configuration = context.configuration();
        let button = Node::new(NodeKind::Button)
            .props(configuration.slot(SlotKey::CloseButton).overlay(&self.props))
            .children(render_children(&self.children, scope)?)
            .on_press(context.dismiss_fn());
        Ok(Node::boxed(configuration.slot(SlotKey::CloseButtonStyle)).child(button))
    }
}

/// Backdrop behind the modal content.
///
/// Renders a full-bleed [`NodeKind::Backdrop`] holding a
/// [`NodeKind::TouchCapture`] region. Pressing the capture region requests
/// close unless `closeOnOverlayClick` is false, in which case the press is
/// swallowed. Explicit `overlayColor` / `overlayVisible` props override the
/// configured backdrop color and visibility.
#[derive(Default)]
pub struct ModalOverlay {
    props: Props,
    children: Vec<Child>,
}

slot_common!(ModalOverlay);

impl Component for ModalOverlay {
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        let context = scope.modal("ModalOverlay")?;
        let configuration = context.configuration();
        let style = configuration.slot(SlotKey::OverlayStyle);

        let mut backdrop = style.clone();
        if let Some(color) = configuration.overlay_color() {
            backdrop.insert(keys::BG, color);
        }
        backdrop.insert(keys::VISIBLE, configuration.overlay_visible());

        let mut explicit = self.props.clone();
        if let Some(color) = explicit
            .remove(keys::OVERLAY_COLOR)
            .and_then(|v| v.as_color())
        {
            backdrop.insert(keys::BG, color);
        }
        if let Some(visible) = explicit
            .remove(keys::OVERLAY_VISIBLE)
            .and_then(|v| v.as_bool())
        {
            backdrop.insert(keys::VISIBLE, visible);
        }

        let on_press: PressHandler = if configuration.close_on_overlay_click() {
            context.dismiss_fn()
        } else {
            Rc::new(|| {})
        };
        let capture = Node::new(NodeKind::TouchCapture)
            .props(style)
            .on_press(on_press);

        Ok(Node::new(NodeKind::Backdrop)
            .props(backdrop.overlay(&explicit))
            .child(capture)
            .children(render_children(&self.children, scope)?))
    }
}
