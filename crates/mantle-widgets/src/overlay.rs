#![forbid(unsafe_code)]

//! Overlay layer for floating content with proper z-ordering.
//!
//! The `OverlayManager` holds every mounted overlay in z-order. Each entry
//! belongs to an owner (usually a modal controller); an owner has at most one
//! live entry at a time. Entries render from bottom to top above the normal
//! view tree.
//!
//! # Invariants
//!
//! - At most one live entry per [`OwnerId`]. Presenting again for the same
//!   owner replaces the entry in place: same handle, same z-position.
//! - Z-order is strictly increasing: entries for new owners land on top.
//! - Handles are never reused, so a stale handle can never alias a newer
//!   entry.
//!
//! # Failure Modes
//!
//! - `dismiss()` of an unknown or already-dismissed handle returns `false`
//!   (no panic).
//! - `is_presented()` / `z_index()` for an unknown handle return `false` /
//!   `None`.
//!
//! # Example
//!
//! ```ignore
//! let mut overlays = OverlayManager::new();
//!
//! let handle = overlays.present(OverlayEntry::new(owner, Box::new(content)));
//! assert!(overlays.is_presented(handle));
//!
//! // Render all layers in z-order
//! let layers = overlays.render()?;
//!
//! overlays.dismiss(handle);
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use mantle_style::{Props, Rgba};

use crate::error::ModalError;
use crate::modal::keys;
use crate::scope::RenderScope;
use crate::view::{Node, NodeKind};
use crate::Component;

/// Base z-index for the overlay layer.
const BASE_OVERLAY_Z: u32 = 1000;

/// Z-index increment between overlays (leaves room for internal layers).
const Z_INCREMENT: u32 = 10;

/// Global counter for owner identities.
static OWNER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Global counter for overlay handles.
static HANDLE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Callback an entry uses to ask its owner to close it.
pub type DismissFn = Rc<dyn Fn()>;

/// Identity of something that presents overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a new unique owner identity.
    #[must_use]
    pub fn next() -> Self {
        Self(OWNER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Handle to a mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    fn next() -> Self {
        Self(HANDLE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// One floating presentation.
pub struct OverlayEntry {
    owner: OwnerId,
    content: Box<dyn Component>,
    on_dismiss: DismissFn,
    dismiss_on_backdrop_press: bool,
    backdrop_color: Option<Rgba>,
    backdrop_visible: bool,
}

impl OverlayEntry {
    /// Create an entry with a visible, dismissing backdrop.
    pub fn new(owner: OwnerId, content: Box<dyn Component>) -> Self {
        Self {
            owner,
            content,
            on_dismiss: Rc::new(|| {}),
            dismiss_on_backdrop_press: true,
            backdrop_color: None,
            backdrop_visible: true,
        }
    }

    /// Set the callback invoked when the backdrop asks to close the entry.
    #[must_use]
    pub fn on_dismiss(mut self, on_dismiss: DismissFn) -> Self {
        self.on_dismiss = on_dismiss;
        self
    }

    /// Set whether pressing the backdrop invokes `on_dismiss`.
    #[must_use]
    pub fn dismiss_on_backdrop_press(mut self, dismiss: bool) -> Self {
        self.dismiss_on_backdrop_press = dismiss;
        self
    }

    #[must_use]
    pub fn backdrop_color(mut self, color: Option<Rgba>) -> Self {
        self.backdrop_color = color;
        self
    }

    #[must_use]
    pub fn backdrop_visible(mut self, visible: bool) -> Self {
        self.backdrop_visible = visible;
        self
    }

    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Render the backdrop node for this entry, if visible.
    fn render_backdrop(&self) -> Option<Node> {
        if !self.backdrop_visible {
            return None;
        }
        let mut props = Props::new();
        if let Some(color) = self.backdrop_color {
            props.insert(keys::BG, color);
        }
        let handler: Rc<dyn Fn()> = if self.dismiss_on_backdrop_press {
            Rc::clone(&self.on_dismiss)
        } else {
            // Swallow the tap so it never reaches the view tree below.
            Rc::new(|| {})
        };
        Some(Node::new(NodeKind::Backdrop).props(props).on_press(handler))
    }
}

impl fmt::Debug for OverlayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayEntry")
            .field("owner", &self.owner)
            .field("dismiss_on_backdrop_press", &self.dismiss_on_backdrop_press)
            .field("backdrop_color", &self.backdrop_color)
            .field("backdrop_visible", &self.backdrop_visible)
            .finish_non_exhaustive()
    }
}

/// A mounted overlay.
#[derive(Debug)]
struct MountedOverlay {
    handle: OverlayHandle,
    z_index: u32,
    entry: OverlayEntry,
}

/// Ordered registry of mounted overlays.
///
/// # Invariants
///
/// - `layers` is ordered by `z_index` (lowest to highest).
/// - `next_z` always produces a z-index greater than any existing layer.
/// - `next_z` restarts from the base once the last layer is unmounted.
/// - No two layers share an owner.
#[derive(Debug)]
pub struct OverlayManager {
    /// Mounted overlays in z-order (bottom to top).
    layers: Vec<MountedOverlay>,
    /// Next z offset to assign.
    next_z: u32,
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayManager {
    /// Create an empty overlay layer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            next_z: 0,
        }
    }

    // --- Mount / Unmount ---

    /// Mount an entry, or replace the live entry of the same owner in place.
    pub fn present(&mut self, entry: OverlayEntry) -> OverlayHandle {
        if let Some(layer) = self
            .layers
            .iter_mut()
            .find(|layer| layer.entry.owner == entry.owner)
        {
            tracing::debug!(
                handle = layer.handle.id(),
                owner = entry.owner.id(),
                "overlay replaced in place"
            );
            layer.entry = entry;
            return layer.handle;
        }

        let handle = OverlayHandle::next();
        let z_index = BASE_OVERLAY_Z.saturating_add(self.next_z);
        self.next_z = self.next_z.saturating_add(Z_INCREMENT);

        tracing::debug!(
            handle = handle.id(),
            owner = entry.owner.id(),
            z_index,
            "overlay mounted"
        );
        self.layers.push(MountedOverlay {
            handle,
            z_index,
            entry,
        });
        handle
    }

    /// Unmount an overlay. Returns `false` if it was not mounted.
    pub fn dismiss(&mut self, handle: OverlayHandle) -> bool {
        let Some(idx) = self.layers.iter().position(|l| l.handle == handle) else {
            tracing::trace!(handle = handle.id(), "dismiss of unmounted overlay ignored");
            return false;
        };
        self.layers.remove(idx);
        tracing::debug!(handle = handle.id(), "overlay unmounted");
        self.reset_z_if_empty();
        true
    }

    /// Unmount everything, returning handles top first.
    pub fn dismiss_all(&mut self) -> Vec<OverlayHandle> {
        let mut handles = Vec::with_capacity(self.layers.len());
        while let Some(layer) = self.layers.pop() {
            handles.push(layer.handle);
        }
        self.reset_z_if_empty();
        handles
    }

    fn reset_z_if_empty(&mut self) {
        if self.layers.is_empty() {
            self.next_z = 0;
        }
    }

    /// Invoke the dismiss callback of the top overlay (Escape / hardware back).
    ///
    /// Returns `false` when nothing is mounted. The owner decides whether and
    /// when the overlay actually goes away.
    pub fn request_dismiss_top(&self) -> bool {
        match self.layers.last() {
            Some(layer) => {
                (layer.entry.on_dismiss)();
                true
            }
            None => false,
        }
    }

    // --- State Queries ---

    #[must_use]
    pub fn is_presented(&self, handle: OverlayHandle) -> bool {
        self.layers.iter().any(|l| l.handle == handle)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of mounted overlays.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Handle of the top overlay, if any.
    #[must_use]
    pub fn top(&self) -> Option<OverlayHandle> {
        self.layers.last().map(|l| l.handle)
    }

    /// Live handle for `owner`, if it has one.
    #[must_use]
    pub fn handle_for(&self, owner: OwnerId) -> Option<OverlayHandle> {
        self.layers
            .iter()
            .find(|l| l.entry.owner == owner)
            .map(|l| l.handle)
    }

    #[must_use]
    pub fn z_index(&self, handle: OverlayHandle) -> Option<u32> {
        self.layers
            .iter()
            .find(|l| l.handle == handle)
            .map(|l| l.z_index)
    }

    // --- Rendering ---

    /// Render all overlays in z-order, bottom first.
    ///
    /// Each layer is a [`NodeKind::Layer`] node holding the backdrop (when
    /// visible) followed by the entry's content rendered from a root scope.
    pub fn render(&self) -> Result<Vec<Node>, ModalError> {
        self.layers
            .iter()
            .map(|layer| {
                let content = layer.entry.content.render(&RenderScope::root())?;
                let mut node = Node::new(NodeKind::Layer)
                    .props(Props::new().with(keys::Z_INDEX, f64::from(layer.z_index)));
                if let Some(backdrop) = layer.entry.render_backdrop() {
                    node = node.child(backdrop);
                }
                Ok(node.child(content))
            })
            .collect()
    }
}
