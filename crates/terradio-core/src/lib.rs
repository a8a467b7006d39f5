//! terradio core: catalog reconciliation, globe projection/overlay, and the
//! mood query planner.
//!
//! The core owns no UI and emits no events. It exposes pure functions
//! (`reconcile`, `filter_geo`, `project`, the marker state machine) and async
//! orchestration (`MoodPlanner::resolve_mood`, `initial_catalog`) to the
//! embedding application, which owns selection/catalog state and the audio
//! element.
//!
//! Failure doctrine: nothing in here has a fatal error class. Source failures
//! degrade to empty result sets, malformed inference output degrades to a
//! fixed fallback filter, and an empty catalog is a legitimate outcome — a
//! broken frame loop is worse than a temporarily empty globe.

pub mod catalog;
pub mod globe;
pub mod load;
pub mod mood;
pub mod source;

pub use catalog::{filter_geo, reconcile, ReconciledCatalog};
pub use globe::frame::GlobeFrame;
pub use globe::marker::{MarkerOverlay, MarkerVisual};
pub use globe::projection::{project, project_station, Point3};
pub use load::{initial_catalog, LoadPlan};
pub use mood::{MoodPlanner, MoodResolution};
pub use source::{InferenceSource, SourceError, StationSource};
