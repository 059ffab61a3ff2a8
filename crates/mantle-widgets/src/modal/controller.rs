#![forbid(unsafe_code)]

//! Modal controller: the open/closed state machine behind one modal.
//!
//! # States
//!
//! ```text
//!          intent false → true            set_open(false) | dismissal
//! Closed ───────────────────▶ Open ────────────────────────────────────▶ Closed
//!                              │ ▲
//!                              └─┘ set_open(true): refresh in place
//! ```
//!
//! # Invariants
//!
//! - Exactly one overlay entry exists for this controller while `Open`,
//!   none while `Closed`.
//! - `on_show` fires once per activation, after the entry is mounted.
//! - `on_close(false)` fires once per deactivation, whatever triggered it.
//! - Closing while `Closed` and dismissals from an earlier activation are
//!   no-ops.
//!
//! # Dismissals
//!
//! The close button, the backdrop, and [`OverlayManager::request_dismiss_top`]
//! all post into the controller's [`DismissMailbox`]. Posting never touches
//! the overlay layer; the request is applied by [`ModalController::flush`]
//! or at the start of the next [`ModalController::set_open`], so a dismissal
//! is always processed after any present that preceded it.
//!
//! An internal dismissal does not update the caller's own "is open" state.
//! Callers reconcile it in `on_close`. Until they pass `false`, further
//! `set_open(true)` calls are repeated values and do nothing; the modal
//! opens again only on the next `false → true` edge.

use std::fmt;
use std::rc::Rc;

use mantle_style::{EmptyTheme, PropValue, Props, Rgba, ThemeResolver};

use crate::focus::{FocusRef, request_focus_best_effort};
use crate::modal::config::{MODAL_COMPONENT, ModalConfiguration, keys};
use crate::modal::context::{DismissMailbox, ModalContext};
use crate::modal::surface::{ModalSurface, SurfaceLayout};
use crate::overlay::{OverlayEntry, OverlayHandle, OverlayManager, OwnerId};
use crate::{Child, Component};

/// Whether a controller currently has a mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What caused a modal to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The caller set the open intent to false.
    Intent,
    /// The user dismissed it (close button, backdrop, or Escape).
    Dismissed,
}

/// A state change reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTransition {
    /// Closed → Open; `on_show` fired.
    Shown,
    /// Open → Open; configuration rebuilt and the entry replaced in place.
    Refreshed,
    /// Open → Closed; `on_close(false)` fired.
    Closed(CloseReason),
}

/// Caller-facing props of a modal.
///
/// Behavior options left unset (`None`) fall through to the theme and then
/// the library defaults instead of pinning the default value at the
/// instance layer.
#[derive(Default)]
pub struct ModalProps {
    on_close: Option<Box<dyn FnMut(bool)>>,
    on_show: Option<Box<dyn FnMut()>>,
    initial_focus: Option<FocusRef>,
    final_focus: Option<FocusRef>,
    close_on_overlay_click: Option<bool>,
    overlay_color: Option<Rgba>,
    overlay_visible: Option<bool>,
    avoid_keyboard: Option<bool>,
    layout: SurfaceLayout,
    extra: Props,
}

impl ModalProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with `false` every time the modal closes.
    #[must_use]
    pub fn on_close(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Called once each time the modal opens, after it is mounted.
    #[must_use]
    pub fn on_show(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_show = Some(Box::new(f));
        self
    }

    /// Focus target requested after the modal opens.
    #[must_use]
    pub fn initial_focus(mut self, target: FocusRef) -> Self {
        self.initial_focus = Some(target);
        self
    }

    /// Focus target requested after the modal closes.
    #[must_use]
    pub fn final_focus(mut self, target: FocusRef) -> Self {
        self.final_focus = Some(target);
        self
    }

    #[must_use]
    pub fn close_on_overlay_click(mut self, close: bool) -> Self {
        self.close_on_overlay_click = Some(close);
        self
    }

    #[must_use]
    pub fn overlay_color(mut self, color: Rgba) -> Self {
        self.overlay_color = Some(color);
        self
    }

    #[must_use]
    pub fn overlay_visible(mut self, visible: bool) -> Self {
        self.overlay_visible = Some(visible);
        self
    }

    #[must_use]
    pub fn avoid_keyboard(mut self, avoid: bool) -> Self {
        self.avoid_keyboard = Some(avoid);
        self
    }

    #[must_use]
    pub fn justify_content(mut self, value: impl Into<String>) -> Self {
        self.layout.justify_content = Some(value.into());
        self
    }

    #[must_use]
    pub fn align_items(mut self, value: impl Into<String>) -> Self {
        self.layout.align_items = Some(value.into());
        self
    }

    /// Identifier exposed on the mounted subtree.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.layout.id = Some(id.into());
        self
    }

    /// Any other instance prop (`size`, `_width`, `modalHeaderProps`, ...).
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// The instance layer of the configuration merge.
    #[must_use]
    pub fn instance_props(&self) -> Props {
        let mut props = self.extra.clone();
        if let Some(close) = self.close_on_overlay_click {
            props.insert(keys::CLOSE_ON_OVERLAY_CLICK, close);
        }
        if let Some(color) = self.overlay_color {
            props.insert(keys::OVERLAY_COLOR, color);
        }
        if let Some(visible) = self.overlay_visible {
            props.insert(keys::OVERLAY_VISIBLE, visible);
        }
        if let Some(avoid) = self.avoid_keyboard {
            props.insert(keys::AVOID_KEYBOARD, avoid);
        }
        props
    }
}

impl fmt::Debug for ModalProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalProps")
            .field("on_close", &self.on_close.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("initial_focus", &self.initial_focus.is_some())
            .field("final_focus", &self.final_focus.is_some())
            .field("layout", &self.layout)
            .field("instance", &self.instance_props())
            .finish()
    }
}

/// Per-instance modal state machine.
pub struct ModalController {
    owner: OwnerId,
    props: ModalProps,
    children: Vec<Child>,
    theme: Rc<dyn ThemeResolver>,
    state: ModalState,
    intent: bool,
    handle: Option<OverlayHandle>,
    generation: u64,
    mailbox: Rc<DismissMailbox>,
    configuration: Option<ModalConfiguration>,
}

impl ModalController {
    /// Create a closed controller with no theme.
    #[must_use]
    pub fn new(props: ModalProps) -> Self {
        Self {
            owner: OwnerId::next(),
            props,
            children: Vec::new(),
            theme: Rc::new(EmptyTheme),
            state: ModalState::Closed,
            intent: false,
            handle: None,
            generation: 0,
            mailbox: Rc::new(DismissMailbox::new()),
            configuration: None,
        }
    }

    /// Resolve themed defaults through `theme`.
    #[must_use]
    pub fn with_theme(mut self, theme: Rc<dyn ThemeResolver>) -> Self {
        self.theme = theme;
        self
    }

    /// Append a child rendered inside the modal.
    #[must_use]
    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Rc::new(child));
        self
    }

    /// Append an already shared child.
    #[must_use]
    pub fn shared_child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    #[must_use]
    pub fn state(&self) -> ModalState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    /// The last intent passed to [`set_open`](Self::set_open).
    #[must_use]
    pub fn intent(&self) -> bool {
        self.intent
    }

    /// Activation counter; bumps on every Closed → Open transition.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle of the mounted overlay while open.
    #[must_use]
    pub fn handle(&self) -> Option<OverlayHandle> {
        self.handle
    }

    /// Configuration of the current activation while open.
    #[must_use]
    pub fn configuration(&self) -> Option<&ModalConfiguration> {
        self.configuration.as_ref()
    }

    /// Whether a dismissal is waiting for the next flush.
    #[must_use]
    pub fn has_pending_dismissal(&self) -> bool {
        self.is_open() && self.mailbox.is_pending(self.generation)
    }

    // --- Transitions ---

    /// Apply the caller's open intent.
    ///
    /// Pending dismissals are processed first, so the returned transitions
    /// are in the order their triggering events happened. A closed modal
    /// opens only on a `false → true` change of intent.
    pub fn set_open(&mut self, open: bool, overlays: &mut OverlayManager) -> Vec<ModalTransition> {
        let mut transitions: Vec<ModalTransition> = self.flush(overlays).into_iter().collect();
        let previous = std::mem::replace(&mut self.intent, open);
        let next = match (open, previous, self.state) {
            (true, false, ModalState::Closed) => Some(self.activate(overlays)),
            (true, _, ModalState::Open) => Some(self.refresh_entry(overlays)),
            (false, _, ModalState::Open) => Some(self.deactivate(overlays, CloseReason::Intent)),
            // Repeated `true` after a dismissal is not a new edge.
            (true, true, ModalState::Closed) | (false, _, ModalState::Closed) => None,
        };
        transitions.extend(next);
        transitions
    }

    /// Apply a pending dismissal, if any.
    pub fn flush(&mut self, overlays: &mut OverlayManager) -> Option<ModalTransition> {
        let generation = self.mailbox.take()?;
        if self.state != ModalState::Open || generation != self.generation {
            tracing::trace!(
                owner = self.owner.id(),
                generation,
                current = self.generation,
                "stale dismissal ignored"
            );
            return None;
        }
        Some(self.deactivate(overlays, CloseReason::Dismissed))
    }

    /// Queue a dismissal exactly as the close button would.
    pub fn request_close(&self) {
        if self.is_open() {
            self.mailbox.request(self.generation);
        }
    }

    /// Rebuild the configuration of an open modal from current props.
    pub fn refresh(&mut self, overlays: &mut OverlayManager) -> Option<ModalTransition> {
        self.is_open().then(|| self.refresh_entry(overlays))
    }

    /// Replace the caller props; applied on the next activation or refresh.
    pub fn update_props(&mut self, props: ModalProps) {
        self.props = props;
    }

    // --- Internals ---

    fn build_configuration(&self) -> ModalConfiguration {
        let instance = self.props.instance_props();
        let themed = self.theme.resolve(MODAL_COMPONENT, &instance);
        ModalConfiguration::merge(&ModalConfiguration::library_defaults(), &themed, &instance)
    }

    /// Build the entry for the current activation and mount it.
    fn mount(&mut self, overlays: &mut OverlayManager) {
        let configuration = self.build_configuration();
        let context = ModalContext::new(
            configuration.clone(),
            self.generation,
            Rc::clone(&self.mailbox),
        );
        let on_dismiss = context.dismiss_fn();
        let surface = ModalSurface::new(context, self.props.layout.clone(), self.children.clone());
        // When the surface mounts the backdrop slot, the slot paints the
        // overlay color; the layer backdrop stays transparent.
        let layer_color = if configuration.close_on_overlay_click() {
            None
        } else {
            configuration.overlay_color()
        };
        let entry = OverlayEntry::new(self.owner, Box::new(surface))
            .on_dismiss(on_dismiss)
            .dismiss_on_backdrop_press(configuration.close_on_overlay_click())
            .backdrop_color(layer_color)
            .backdrop_visible(configuration.overlay_visible());
        self.handle = Some(overlays.present(entry));
        self.configuration = Some(configuration);
    }

    fn activate(&mut self, overlays: &mut OverlayManager) -> ModalTransition {
        self.generation += 1;
        // Anything still latched belongs to an earlier activation.
        self.mailbox.take();
        self.mount(overlays);
        self.state = ModalState::Open;
        tracing::debug!(owner = self.owner.id(), generation = self.generation, "modal shown");

        if let Some(on_show) = self.props.on_show.as_mut() {
            on_show();
        }
        request_focus_best_effort(self.props.initial_focus.as_ref(), "initial");
        ModalTransition::Shown
    }

    fn refresh_entry(&mut self, overlays: &mut OverlayManager) -> ModalTransition {
        self.mount(overlays);
        tracing::debug!(owner = self.owner.id(), generation = self.generation, "modal refreshed");
        ModalTransition::Refreshed
    }

    fn deactivate(&mut self, overlays: &mut OverlayManager, reason: CloseReason) -> ModalTransition {
        if let Some(handle) = self.handle.take() {
            overlays.dismiss(handle);
        }
        self.mailbox.take();
        self.configuration = None;
        self.state = ModalState::Closed;
        tracing::debug!(owner = self.owner.id(), ?reason, "modal closed");

        if let Some(on_close) = self.props.on_close.as_mut() {
            on_close(false);
        }
        request_focus_best_effort(self.props.final_focus.as_ref(), "final");
        ModalTransition::Closed(reason)
    }
}

impl fmt::Debug for ModalController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalController")
            .field("owner", &self.owner)
            .field("state", &self.state)
            .field("intent", &self.intent)
            .field("handle", &self.handle)
            .field("generation", &self.generation)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
