//! Core error types for tabset-core
//!
//! This module provides the error type shared by setting bindings,
//! the widget host contract, persistence and the tab manager.

use crate::host::{ControlKind, ElementId};
use std::io;
use thiserror::Error;

/// Errors that can occur while building or driving a settings screen.
///
/// All of these are local to the call that produced them: a failed
/// render or activation is never retried.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `display` was called on a tab manager with no pages.
    ///
    /// At least one page must be registered before displaying.
    #[error("no tabs registered")]
    NoTabsRegistered,

    /// A page was registered after the tab strip had been rendered.
    #[error("cannot add tabs after the settings tab has been displayed")]
    TabsAlreadyDisplayed,

    /// Two pages produced the same id slug.
    #[error("duplicate tab id: {0}")]
    DuplicateTabId(String),

    /// The widget reported a dropdown key that is not one of the options.
    ///
    /// This means the control and its binding are out of sync, which is
    /// a wiring bug rather than bad user input.
    #[error("unknown option key: {0}")]
    UnknownOptionKey(String),

    /// Two dropdown options were declared with the same key.
    #[error("duplicate option key: {0}")]
    DuplicateOptionKey(String),

    /// Slider limits violate `minimum <= maximum` or `step > 0`.
    #[error("invalid slider limits: min={minimum}, max={maximum}, step={step}")]
    InvalidSliderLimits {
        minimum: f64,
        maximum: f64,
        step: f64,
    },

    /// A control delivered a value of the wrong shape for its kind.
    #[error("control value mismatch: {kind:?} control cannot accept {found}")]
    ControlValueMismatch { kind: ControlKind, found: String },

    /// The widget host has no element with this id.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// Event system error, e.g. a message bus without subscribers.
    #[error("event error: {0}")]
    EventError(String),

    /// Underlying IO error from the settings store.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Persisted settings could not be encoded or decoded.
    #[error("settings data error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
