//! Initial catalog load: parallel fan-out over the station directory.
//!
//! Featured-country queries run alongside one global top-N query; all are
//! awaited together before reconciling. A query that fails is treated as an
//! empty result set (and logged) so one flaky source never blanks the globe.

use std::collections::HashSet;

use futures_util::future::join_all;
use terradio_proto::config::LoadConfig;
use terradio_proto::station::{StationQuery, StationRecord};
use tracing::info;

use crate::catalog::{reconcile, ReconciledCatalog};
use crate::source::{recover_empty, StationSource};

/// What the initial load asks the directory for.
///
/// Query order doubles as merge priority: featured-country result sets are
/// passed to reconciliation before the global set, so on a duplicate station
/// id the featured copy wins.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPlan {
    pub featured_countries: Vec<String>,
    pub featured_limit: u32,
    pub global_limit: u32,
}

impl LoadPlan {
    pub fn from_config(config: &LoadConfig) -> Self {
        Self {
            featured_countries: config.featured_countries.clone(),
            featured_limit: config.featured_limit,
            global_limit: config.global_limit,
        }
    }

    fn queries(&self) -> Vec<StationQuery> {
        let mut queries: Vec<StationQuery> = self
            .featured_countries
            .iter()
            .map(|country| StationQuery::by_country(country.clone(), self.featured_limit))
            .collect();
        queries.push(StationQuery::top(self.global_limit));
        queries
    }
}

/// Runs the plan's queries concurrently and reconciles the results.
///
/// Partial failure is fine: each rejected query contributes an empty set.
/// Records from featured countries form the priority partition of the
/// resulting catalog.
pub async fn initial_catalog<S: StationSource>(source: &S, plan: &LoadPlan) -> ReconciledCatalog {
    let queries = plan.queries();
    let results = join_all(queries.iter().map(|query| source.search(query))).await;

    let result_sets: Vec<Vec<StationRecord>> = results
        .into_iter()
        .map(|result| recover_empty(result, "initial load"))
        .collect();

    let featured: HashSet<&str> = plan
        .featured_countries
        .iter()
        .map(String::as_str)
        .collect();

    let catalog = reconcile(result_sets, |record| {
        featured.contains(record.country.as_str())
    });
    info!(stations = catalog.len(), "initial catalog reconciled");
    catalog
}
