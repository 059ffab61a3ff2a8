#![forbid(unsafe_code)]

//! Composite widgets for Mantle: the overlay layer and the Modal composite.
//!
//! Widgets do not draw anything themselves. A [`Component`] renders into an
//! inert [`Node`] tree that a platform renderer consumes; press handlers on
//! nodes are how user input flows back into the widgets.

pub mod error;
pub mod focus;
pub mod modal;
pub mod overlay;
pub mod scope;
pub mod view;

pub use error::ModalError;
pub use focus::{FocusError, FocusHandle, FocusRef};
pub use overlay::{DismissFn, OverlayEntry, OverlayHandle, OverlayManager, OwnerId};
pub use scope::RenderScope;
pub use view::{Label, Node, NodeKind, PressHandler};

use std::rc::Rc;

/// A `Component` renders itself into a [`Node`] subtree.
///
/// Rendering is synchronous and side-effect free. The [`RenderScope`] carries
/// whatever enclosing context the component may read; components that
/// require a context fail with [`ModalError`] when it is absent.
pub trait Component {
    /// Render this component within `scope`.
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError>;
}

impl<C: Component + ?Sized> Component for Rc<C> {
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        (**self).render(scope)
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        (**self).render(scope)
    }
}

/// Shared, cheaply clonable component handle used for child lists.
pub type Child = Rc<dyn Component>;

/// Render every child in order, stopping at the first failure.
pub(crate) fn render_children(
    children: &[Child],
    scope: &RenderScope<'_>,
) -> Result<Vec<Node>, ModalError> {
    children.iter().map(|child| child.render(scope)).collect()
}
