//! Progress reporting trait for conversion feedback.
//!
//! The [`ProgressCallback`] trait allows callers to receive progress updates
//! during conversion without coupling the library to any specific progress
//! bar implementation. The CLI crate provides an `indicatif`-based
//! implementation.

/// Trait for receiving progress updates during conversion.
///
/// Implement this trait to display a progress bar, log progress, or perform
/// any other action as the pipeline makes forward progress. The pipeline
/// calls [`inc`](ProgressCallback::inc) once per progress interval
/// ([`PROGRESS_INTERVAL`](crate::PROGRESS_INTERVAL) qualifying rows).
pub trait ProgressCallback: Send + Sync {
    /// Called to report that `n` additional rows have been processed.
    fn inc(&self, n: u64);

    /// Called when conversion begins for the file at `path`.
    fn conversion_started(&self, path: &str);
}
