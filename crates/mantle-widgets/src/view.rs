#![forbid(unsafe_code)]

//! Inert view nodes produced by rendering.
//!
//! A [`Node`] is what the platform renderer consumes: a kind, a props map, an
//! optional text payload, children, and an optional press handler. Nodes are
//! plain data; pressing one just invokes its handler.

use std::fmt;
use std::rc::Rc;

use mantle_style::Props;

use crate::error::ModalError;
use crate::scope::RenderScope;
use crate::Component;

/// Callback invoked when a node is pressed.
pub type PressHandler = Rc<dyn Fn()>;

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Generic layout box.
    Box,
    /// Text leaf.
    Text,
    /// One overlay layer as mounted by the overlay manager.
    Layer,
    /// Full-bleed background behind modal content.
    Backdrop,
    /// Invisible region capturing taps over the backdrop.
    TouchCapture,
    /// Pressable button.
    Button,
    /// Subtree the platform shifts out of the way of the on-screen keyboard.
    KeyboardAvoiding,
}

/// A rendered node.
#[derive(Clone)]
pub struct Node {
    kind: NodeKind,
    props: Props,
    text: Option<String>,
    children: Vec<Node>,
    on_press: Option<PressHandler>,
}

impl Node {
    /// Create an empty node of the given kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            props: Props::new(),
            text: None,
            children: Vec::new(),
            on_press: None,
        }
    }

    /// A layout box with the given props.
    #[must_use]
    pub fn boxed(props: Props) -> Self {
        Self::new(NodeKind::Box).props(props)
    }

    /// A text leaf.
    #[must_use]
    pub fn text_leaf(text: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text);
        node.text = Some(text.into());
        node
    }

    #[must_use]
    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn on_press(mut self, handler: PressHandler) -> Self {
        self.on_press = Some(handler);
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn prop_map(&self) -> &Props {
        &self.props
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn is_pressable(&self) -> bool {
        self.on_press.is_some()
    }

    /// Invoke the press handler. Returns `false` if the node has none.
    pub fn press(&self) -> bool {
        match &self.on_press {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// First node (pre-order, self included) matching `pred`.
    #[must_use]
    pub fn find(&self, pred: impl Fn(&Node) -> bool + Copy) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// First node of `kind`, pre-order.
    #[must_use]
    pub fn find_kind(&self, kind: NodeKind) -> Option<&Node> {
        self.find(|n| n.kind == kind)
    }

    /// Number of nodes of `kind` in this subtree.
    #[must_use]
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        let own = usize::from(self.kind == kind);
        own + self
            .children
            .iter()
            .map(|c| c.count_kind(kind))
            .sum::<usize>()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("props", &self.props)
            .field("text", &self.text)
            .field("children", &self.children)
            .field("pressable", &self.on_press.is_some())
            .finish()
    }
}

/// Static subtrees render as themselves.
impl Component for Node {
    fn render(&self, _scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        Ok(self.clone())
    }
}

/// A text component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Component for Label {
    fn render(&self, _scope: &RenderScope<'_>) -> Result<Node, ModalError> {
        Ok(Node::text_leaf(self.text.clone()))
    }
}
