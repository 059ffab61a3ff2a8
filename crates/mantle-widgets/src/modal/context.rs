#![forbid(unsafe_code)]

//! The context value modal slots read while rendering.
//!
//! # Invariants
//!
//! - A [`ModalContext`] belongs to exactly one activation of one controller,
//!   identified by its generation.
//! - Close requests are latched in a [`DismissMailbox`] shared with the
//!   controller. Any number of requests for the same activation collapse
//!   into one pending dismissal.
//! - A request never displaces one from a newer activation. Requests from an
//!   older activation are discarded when the controller drains the mailbox.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::modal::config::ModalConfiguration;
use crate::overlay::DismissFn;

/// Latched close requests for one controller.
#[derive(Debug, Default)]
pub struct DismissMailbox {
    pending: Cell<Option<u64>>,
    coalesced: Cell<u32>,
}

impl DismissMailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a close request for activation `generation`.
    ///
    /// Returns `false` if a request for the same activation was already
    /// pending (the new one is coalesced into it) or a newer activation
    /// already has one.
    pub fn request(&self, generation: u64) -> bool {
        match self.pending.get() {
            Some(pending) if pending > generation => {
                tracing::trace!(generation, pending, "close request from older activation");
                false
            }
            Some(pending) if pending == generation => {
                self.coalesced.set(self.coalesced.get().saturating_add(1));
                tracing::trace!(generation, "close request coalesced");
                false
            }
            _ => {
                self.pending.set(Some(generation));
                true
            }
        }
    }

    /// Whether a request for `generation` is waiting to be processed.
    #[must_use]
    pub fn is_pending(&self, generation: u64) -> bool {
        self.pending.get() == Some(generation)
    }

    /// Drain the pending request, if any.
    pub fn take(&self) -> Option<u64> {
        self.coalesced.set(0);
        self.pending.take()
    }

    /// Number of requests folded into the pending one.
    #[must_use]
    pub fn coalesced(&self) -> u32 {
        self.coalesced.get()
    }
}

/// Value exposed to slot components for one modal activation.
#[derive(Clone)]
pub struct ModalContext {
    configuration: ModalConfiguration,
    generation: u64,
    mailbox: Rc<DismissMailbox>,
}

impl ModalContext {
    pub(crate) fn new(
        configuration: ModalConfiguration,
        generation: u64,
        mailbox: Rc<DismissMailbox>,
    ) -> Self {
        Self {
            configuration,
            generation,
            mailbox,
        }
    }

    /// The merged configuration of this activation.
    #[must_use]
    pub fn configuration(&self) -> &ModalConfiguration {
        &self.configuration
    }

    /// Whether the modal is still showing (no close request pending).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.mailbox.is_pending(self.generation)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ask the owning controller to close this modal.
    ///
    /// The request is processed on the controller's next `flush` or
    /// `set_open`; repeated requests before then have no further effect.
    pub fn request_close(&self) {
        self.mailbox.request(self.generation);
    }

    /// The close entry point as a shareable callback.
    #[must_use]
    pub fn dismiss_fn(&self) -> DismissFn {
        let mailbox = Rc::clone(&self.mailbox);
        let generation = self.generation;
        Rc::new(move || {
            mailbox.request(generation);
        })
    }

    #[cfg(test)]
    pub(crate) fn detached_for_tests() -> Self {
        Self::new(ModalConfiguration::default(), 1, Rc::new(DismissMailbox::new()))
    }
}

impl fmt::Debug for ModalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalContext")
            .field("visible", &self.is_visible())
            .field("generation", &self.generation)
            .field("configuration", &self.configuration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_for_same_activation_coalesce() {
        let mailbox = DismissMailbox::new();
        assert!(mailbox.request(3));
        assert!(!mailbox.request(3));
        assert!(!mailbox.request(3));
        assert_eq!(mailbox.coalesced(), 2);
        assert_eq!(mailbox.take(), Some(3));
        assert_eq!(mailbox.take(), None);
        assert_eq!(mailbox.coalesced(), 0);
    }

    #[test]
    fn newer_activation_replaces_stale_request() {
        let mailbox = DismissMailbox::new();
        mailbox.request(1);
        assert!(mailbox.request(2));
        assert_eq!(mailbox.take(), Some(2));
    }

    #[test]
    fn older_activation_never_overwrites_current_request() {
        let mailbox = DismissMailbox::new();
        mailbox.request(5);
        assert!(!mailbox.request(4));
        assert!(mailbox.is_pending(5));
    }

    #[test]
    fn request_close_hides_context() {
        let ctx = ModalContext::detached_for_tests();
        assert!(ctx.is_visible());
        ctx.request_close();
        assert!(!ctx.is_visible());
    }

    #[test]
    fn dismiss_fn_targets_same_activation() {
        let ctx = ModalContext::detached_for_tests();
        let dismiss = ctx.dismiss_fn();
        dismiss();
        dismiss();
        assert!(!ctx.is_visible());
        assert_eq!(ctx.mailbox.coalesced(), 1);
    }
}
