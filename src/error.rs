//! Error types surfaced by event dispatch.
//!
//! Binding and unbinding never fail. The only failure the registry reports is
//! a callback that returned an error during [`trigger`](crate::Registry::trigger);
//! that error is handed back to the caller wrapped in [`TriggerError`].

use thiserror::Error;

/// Error a fallible callback may return.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?` or `.into()`.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced while dispatching an event.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TriggerError {
    /// A callback failed; the rest of the dispatch pass was skipped.
    #[error("callback '{key}' for event '{event}' failed: {source}")]
    Callback {
        /// Event being dispatched.
        event: String,
        /// Subscriber key of the failing callback.
        key: String,
        /// The error returned by the callback, unchanged.
        source: CallbackError,
    },
}

impl TriggerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use microstore::TriggerError;
    ///
    /// let err = TriggerError::Callback {
    ///     event: "values.loaded".into(),
    ///     key: "local-key".into(),
    ///     source: "boom".into(),
    /// };
    /// assert_eq!(err.as_label(), "trigger_callback_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TriggerError::Callback { .. } => "trigger_callback_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TriggerError::Callback { event, key, source } => {
                format!("event={event} key={key}: {source}")
            }
        }
    }

    /// Event name the failing dispatch was for.
    pub fn event(&self) -> &str {
        match self {
            TriggerError::Callback { event, .. } => event,
        }
    }

    /// Subscriber key whose callback failed.
    pub fn key(&self) -> &str {
        match self {
            TriggerError::Callback { key, .. } => key,
        }
    }

    /// Consumes the error and returns what the callback returned.
    pub fn into_source(self) -> CallbackError {
        match self {
            TriggerError::Callback { source, .. } => source,
        }
    }
}
