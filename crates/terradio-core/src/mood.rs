//! Mood query planner: free text → structured filter → catalog, with one
//! level of fallback.
//!
//! Known race, left as-is on purpose: two overlapping resolve calls have no
//! cancellation or sequencing, so a slow earlier request can land after (and
//! visually overwrite) a faster later one. The fix would be tagging requests
//! with a monotonic sequence number and dropping stale responses; the current
//! behavior matches the shipped product, so it stays.

use terradio_proto::mood::MoodFilter;
use terradio_proto::station::StationQuery;
use tracing::{debug, info, warn};

use crate::catalog::{filter_geo, reconcile, ReconciledCatalog};
use crate::source::{recover_empty, InferenceSource, SourceError, StationSource};

/// Shown when the inference service fails or answers with something
/// unparseable. From the caller's view this is a successful resolution.
const FALLBACK_EXPLANATION: &str =
    "I couldn't quite read the mood, so here is something easygoing instead.";
/// Genre used by the fallback filter.
const FALLBACK_TAG: &str = "chillout";
/// Result-set size for mood-driven directory queries.
const MOOD_QUERY_LIMIT: u32 = 100;

/// Outcome of a mood resolution: always usable, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodResolution {
    pub explanation: String,
    pub catalog: ReconciledCatalog,
}

pub struct MoodPlanner<S, I> {
    stations: S,
    inference: I,
}

impl<S: StationSource, I: InferenceSource> MoodPlanner<S, I> {
    pub fn new(stations: S, inference: I) -> Self {
        Self { stations, inference }
    }

    /// Resolves a free-text mood description into an explanation and a
    /// geo-valid catalog.
    ///
    /// Flow: structured extraction (or the fixed fallback filter on any
    /// inference failure), then the primary directory query from the
    /// extracted country/tag. If that yields zero geo-valid records and a tag
    /// is present, one looser tag-only query replaces it — never more than
    /// one loosening step. An empty final catalog is a legitimate "no
    /// matches" outcome, not an error.
    pub async fn resolve_mood(&self, free_text: &str) -> MoodResolution {
        let filter = match self.inference.extract_mood(free_text).await {
            Ok(filter) => {
                debug!(?filter, "inference extracted mood filter");
                filter
            }
            Err(err) => {
                warn!(%err, "mood extraction failed, using fallback filter");
                fallback_filter()
            }
        };

        let mut records = filter_geo(recover_empty(
            self.stations.search(&primary_query(&filter)).await,
            "mood primary query",
        ));

        if records.is_empty() {
            if let Some(tag) = &filter.tag {
                // One loosening step only: drop the country, keep the tag.
                info!(%tag, "primary mood query empty, retrying with tag only");
                records = filter_geo(recover_empty(
                    self.stations
                        .search(&StationQuery::by_tag(tag.clone(), MOOD_QUERY_LIMIT))
                        .await,
                    "mood fallback query",
                ));
            }
        }

        if records.is_empty() {
            info!("mood resolution found no matching stations");
        }

        // Single-set reconcile: dedup plus the (already applied) geo filter.
        MoodResolution {
            explanation: filter.explanation,
            catalog: reconcile([records], |_| false),
        }
    }
}

fn fallback_filter() -> MoodFilter {
    MoodFilter {
        country: None,
        tag: Some(FALLBACK_TAG.to_string()),
        explanation: FALLBACK_EXPLANATION.to_string(),
    }
}

fn primary_query(filter: &MoodFilter) -> StationQuery {
    let mut query = StationQuery::top(MOOD_QUERY_LIMIT);
    query.country = filter.country.clone();
    query.tag = filter.tag.clone();
    query
}
