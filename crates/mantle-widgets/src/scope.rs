#![forbid(unsafe_code)]

//! Render scopes: the explicit channel that carries enclosing context down
//! the component tree.
//!
//! Every [`Component::render`](crate::Component::render) call receives a
//! scope. The overlay manager renders each layer from [`RenderScope::root`];
//! a modal surface derives a child scope carrying its [`ModalContext`] and
//! renders its slots inside it. Slots therefore read the merged modal
//! configuration without it being threaded through every constructor.

use crate::error::ModalError;
use crate::modal::ModalContext;

/// Context visible to a component while it renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderScope<'a> {
    modal: Option<&'a ModalContext>,
}

impl RenderScope<'static> {
    /// A scope with no enclosing context.
    #[must_use]
    pub const fn root() -> Self {
        Self { modal: None }
    }
}

impl RenderScope<'_> {
    /// Derive a scope in which `context` is the nearest enclosing modal.
    #[must_use]
    pub fn with_modal<'b>(&self, context: &'b ModalContext) -> RenderScope<'b> {
        RenderScope {
            modal: Some(context),
        }
    }

    /// The nearest enclosing modal context, if any.
    #[must_use]
    pub fn try_modal(&self) -> Option<&ModalContext> {
        self.modal
    }

    /// The nearest enclosing modal context, required by `slot`.
    pub fn modal(&self, slot: &'static str) -> Result<&ModalContext, ModalError> {
        self.modal.ok_or_else(|| {
            tracing::debug!(slot, "slot rendered outside a modal");
            ModalError::MissingContext { slot }
        })
    }
}
