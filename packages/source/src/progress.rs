//! Progress reporting for dataset loading.
//!
//! Providers report each parsed record through [`ProgressCallback`] so the
//! CLI can render a spinner while tests and library callers stay silent.

use std::sync::Arc;

/// Receives progress updates while a provider loads records.
pub trait ProgressCallback: Send + Sync {
    /// Advance by `delta` records.
    fn inc(&self, delta: u64);

    /// Update the message shown alongside the indicator.
    fn set_message(&self, msg: String);

    /// Mark loading as complete with a final message.
    fn finish(&self, msg: String);
}

/// Discards all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
