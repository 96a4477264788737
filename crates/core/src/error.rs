//! Error taxonomy shared by every storefront component.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the storefront layer.
pub type ShopResult<T> = Result<T, ShopError>;

/// Storefront-level error.
///
/// Remote failures abort only the operation that hit them; validation failures
/// never leave the component that detected them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShopError {
    /// Transport-level failure, no response was received.
    #[error("Unable to reach the server")]
    Unreachable,

    /// The call was bounded by a timeout and no response arrived in time.
    #[error("No response from the server")]
    TimedOut,

    /// The remote service answered with a non-success status.
    #[error("{reason}")]
    Rejected { reason: String },

    /// A client-side precondition failed before any network call.
    #[error("{reason}")]
    ValidationFailed { field: &'static str, reason: String },

    /// No session credential is available.
    #[error("Please login again.")]
    AuthenticationRequired,

    /// The session role does not allow administrative operations.
    #[error("Admin access required")]
    AdminRequired,

    /// The item is no longer present in the latest snapshot.
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Another row is already being edited.
    #[error("Item {0} is already being edited")]
    DraftActive(ItemId),

    /// `save`/`cancel` without an active draft.
    #[error("No item is being edited")]
    NoActiveDraft,
}

impl ShopError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field,
            reason: reason.into(),
        }
    }

    /// True for failures that happened without the remote service answering.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Unreachable | Self::TimedOut)
    }
}
