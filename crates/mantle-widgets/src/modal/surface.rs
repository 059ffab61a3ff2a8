#![forbid(unsafe_code)]

//! Root content mounted into the overlay layer for an open modal.

use mantle_style::Props;

use crate::error::ModalError;
use crate::modal::config::{SlotKey, keys};
use crate::modal::context::ModalContext;
use crate::modal::slots::ModalOverlay;
use crate::scope::RenderScope;
use crate::view::{Node, NodeKind};
use crate::{Child, Component, render_children};

/// Layout props passed straight through from the modal instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SurfaceLayout {
    pub(crate) justify_content: Option<String>,
    pub(crate) align_items: Option<String>,
    pub(crate) id: Option<String>,
}

/// The subtree an open modal mounts: the context boundary for its slots.
///
/// Structure, outermost first:
/// 1. a full-height box carrying the instance `id`,
/// 2. a keyboard-avoiding wrapper when `avoidKeyboard` is set,
/// 3. the positioning box (`modalProps`, centered by default) holding the
///    backdrop slot (or an empty box when backdrop clicks are disabled)
///    followed by the caller's children.
pub(crate) struct ModalSurface {
    context: ModalContext,
    layout: SurfaceLayout,
    children: Vec<Child>,
}

impl ModalSurface {
    pub(crate) fn new(context: ModalContext, layout: SurfaceLayout, children: Vec<Child>) -> Self {
        Self {
            context,
            layout,
            children,
        }
    }
}

impl Component for ModalSurface {
    fn render(&self, scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "ModalSurface",
            generation = self.context.generation(),
            children = self.children.len()
        )
        .entered();

        let scope = scope.with_modal(&self.context);
        let configuration = self.context.configuration();

        let backdrop = if configuration.close_on_overlay_click() {
            ModalOverlay::new().render(&scope)?
        } else {
            Node::boxed(Props::new())
        };

        let positioning = configuration
            .slot(SlotKey::Modal)
            .with(
                keys::JUSTIFY_CONTENT,
                self.layout.justify_content.as_deref().unwrap_or("center"),
            )
            .with(
                keys::ALIGN_ITEMS,
                self.layout.align_items.as_deref().unwrap_or("center"),
            );
        let inner = Node::boxed(positioning)
            .child(backdrop)
            .children(render_children(&self.children, &scope)?);

        let body = if configuration.avoid_keyboard() {
            Node::new(NodeKind::KeyboardAvoiding).child(inner)
        } else {
            inner
        };

        let mut root = Props::new().with(keys::HEIGHT, "100%");
        if let Some(id) = &self.layout.id {
            root.insert(keys::NATIVE_ID, id.as_str());
        }
        Ok(Node::boxed(root).child(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::config::ModalConfiguration;
    use crate::modal::context::DismissMailbox;
    use crate::modal::slots::ModalBody;
    use crate::view::Label;
    use mantle_style::props;
    use std::rc::Rc;

    fn surface(instance: Props, layout: SurfaceLayout, children: Vec<Child>) -> ModalSurface {
        let configuration = ModalConfiguration::merge(
            &ModalConfiguration::library_defaults(),
            &Props::new(),
            &instance,
        );
        let context = ModalContext::new(configuration, 1, Rc::new(DismissMailbox::new()));
        ModalSurface::new(context, layout, children)
    }

    fn render(surface: &ModalSurface) -> Node {
        surface
            .render(&RenderScope::root())
            .expect("surface provides its own context")
    }

    #[test]
    fn slots_inside_surface_see_the_context() {
        let body: Child = Rc::new(ModalBody::new().child(Label::new("hi")));
        let node = render(&surface(Props::new(), SurfaceLayout::default(), vec![body]));
        assert_eq!(
            node.find_kind(NodeKind::Text).and_then(Node::text),
            Some("hi")
        );
    }

    #[test]
    fn centered_by_default_and_overridable() {
        let node = render(&surface(Props::new(), SurfaceLayout::default(), Vec::new()));
        let positioning = &node.child_nodes()[0];
        assert_eq!(positioning.prop_map().get_str("justifyContent"), Some("center"));
        assert_eq!(positioning.prop_map().get_str("alignItems"), Some("center"));

        let layout = SurfaceLayout {
            justify_content: Some("flex-end".into()),
            align_items: None,
            id: Some("settings".into()),
        };
        let node = render(&surface(Props::new(), layout, Vec::new()));
        assert_eq!(node.prop_map().get_str("nativeID"), Some("settings"));
        assert_eq!(node.prop_map().get_str("h"), Some("100%"));
        assert_eq!(
            node.child_nodes()[0].prop_map().get_str("justifyContent"),
            Some("flex-end")
        );
    }

    #[test]
    fn backdrop_slot_only_when_overlay_clicks_close() {
        let with = render(&surface(Props::new(), SurfaceLayout::default(), Vec::new()));
        assert_eq!(with.count_kind(NodeKind::Backdrop), 1);

        let without = render(&surface(
            props! { "closeOnOverlayClick" => false },
            SurfaceLayout::default(),
            Vec::new(),
        ));
        assert_eq!(without.count_kind(NodeKind::Backdrop), 0);
        assert_eq!(without.count_kind(NodeKind::TouchCapture), 0);
    }

    #[test]
    fn avoid_keyboard_wraps_positioning_box() {
        let node = render(&surface(
            props! { "avoidKeyboard" => true },
            SurfaceLayout::default(),
            Vec::new(),
        ));
        assert_eq!(node.child_nodes()[0].kind(), NodeKind::KeyboardAvoiding);
    }

    #[test]
    fn modal_props_style_the_positioning_box() {
        let node = render(&surface(
            props! { "modalProps" => props! { "p" => 3 } },
            SurfaceLayout::default(),
            Vec::new(),
        ));
        assert_eq!(node.child_nodes()[0].prop_map().get_num("p"), Some(3.0));
    }
}
