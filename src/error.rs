//! Typed errors for component preconditions and asset loading.
//!
//! Precondition failures (bad arguments, unknown animation names, calls that
//! make no sense in the current state) fail synchronously with a [`ModelError`].
//! IO and parsing inside the loaders propagate `anyhow::Result` instead and are
//! wrapped into [`ModelError::LoadFailed`] at the delegate boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A malformed argument was passed to a component method (empty required
    /// string, negative duration, etc.).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An animation name was referenced that was never registered via
    /// `set_animation`.
    #[error("no animation named {0:?} has been set")]
    NotFound(String),

    /// An operation was called in a state it does not support, e.g. resuming
    /// playback before any animation was ever selected.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The asset could not be fetched or parsed. This is terminal for the
    /// owning delegate: it parks in the failed phase and no retry is attempted.
    #[error("failed to load model {path}: {reason}")]
    LoadFailed { path: String, reason: anyhow::Error },
}
