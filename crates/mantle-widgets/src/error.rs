#![forbid(unsafe_code)]

//! Errors surfaced while rendering widgets.

/// Errors from rendering a component tree.
///
/// Lifecycle operations on the overlay manager and modal controller never
/// fail; repeated or out-of-order calls are documented no-ops. The only
/// user-facing failure is a malformed tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// A modal slot was rendered outside an open modal.
    #[error("`{slot}` must be rendered inside an open Modal")]
    MissingContext {
        /// Name of the slot component that was rendered.
        slot: &'static str,
    },
}
