#![forbid(unsafe_code)]

//! Focus handles for initial-focus and focus-restore behavior.
//!
//! A [`FocusHandle`] is an opaque reference to something that can take input
//! focus. Requests are best-effort: a target that is detached or not
//! focusable reports a [`FocusError`], which callers in this crate log and
//! swallow. Focus failures never change modal open/close behavior.

use std::rc::Rc;

/// Why a focus request could not be honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// The target is not attached to the view tree (yet or anymore).
    #[error("focus target is not attached")]
    Detached,
    /// The target exists but cannot receive focus.
    #[error("focus target cannot receive focus")]
    NotFocusable,
}

/// Something that can be asked to take focus.
pub trait FocusHandle {
    /// Ask the target to take focus.
    fn request_focus(&self) -> Result<(), FocusError>;
}

impl<F> FocusHandle for F
where
    F: Fn() -> Result<(), FocusError>,
{
    fn request_focus(&self) -> Result<(), FocusError> {
        self()
    }
}

/// Shared focus handle as stored in modal props.
pub type FocusRef = Rc<dyn FocusHandle>;

/// Request focus on `target` if present, swallowing failures.
///
/// Returns whether focus was actually taken.
pub(crate) fn request_focus_best_effort(target: Option<&FocusRef>, purpose: &'static str) -> bool {
    let Some(target) = target else {
        return false;
    };
    match target.request_focus() {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(purpose, error = %err, "focus request ignored");
            false
        }
    }
}
