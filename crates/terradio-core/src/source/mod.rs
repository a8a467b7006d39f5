//! External collaborators: the station directory and the inference service.
//!
//! Both sit behind traits so the planner and loader are testable against
//! scripted fakes. Failure taxonomy per the core's doctrine: transport and
//! malformed-response errors are typed here, but every consumer recovers
//! locally — an empty result set or the fixed fallback filter — rather than
//! propagating.

pub mod inference;
pub mod radio_browser;

use terradio_proto::mood::{GenerationOptions, MoodFilter};
use terradio_proto::station::{StationQuery, StationRecord};
use thiserror::Error;
use tracing::warn;

pub use inference::HttpInferenceSource;
pub use radio_browser::RadioBrowserSource;

/// Why a source call yielded nothing usable.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source unreachable, connection dropped, body unreadable.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// Source reachable but answered with a non-success status.
    #[error("source returned status {status}")]
    Status { status: u16 },
    /// Response arrived but cannot be parsed against the expected shape.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

/// Parameterized catalog queries against the station directory.
pub trait StationSource {
    fn search(
        &self,
        query: &StationQuery,
    ) -> impl std::future::Future<Output = Result<Vec<StationRecord>, SourceError>> + Send;
}

/// Free-text completion and structured mood extraction.
pub trait InferenceSource {
    /// Short natural-language completion of `text` under `system_prompt`.
    fn complete(
        &self,
        system_prompt: &str,
        text: &str,
        opts: &GenerationOptions,
    ) -> impl std::future::Future<Output = Result<String, SourceError>> + Send;

    /// Structured extraction of a [`MoodFilter`] from free text. Fails with
    /// [`SourceError::MalformedResponse`] when the output does not match the
    /// `{country?, tag?, explanation}` shape.
    fn extract_mood(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<MoodFilter, SourceError>> + Send;
}

/// Collapses a failed station query into an empty result set, logging the
/// cause. Callers never see a directory failure as anything but "no records".
pub fn recover_empty(
    result: Result<Vec<StationRecord>, SourceError>,
    context: &str,
) -> Vec<StationRecord> {
    match result {
        Ok(records) => records,
        Err(err) => {
            warn!(%err, context, "station query failed, continuing with empty result");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recover_empty_passes_records_through() {
        let out = recover_empty(Ok(Vec::new()), "test");
        assert!(out.is_empty());
    }

    #[test]
    fn recover_empty_swallows_errors() {
        let out = recover_empty(
            Err(SourceError::Status { status: 503 }),
            "test",
        );
        assert!(out.is_empty());
    }
}
