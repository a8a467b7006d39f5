//! Catalog reconciliation: merge, dedup, geo-filter, priority-order.
//!
//! Pure functions of their input — no network, no randomness. Reconciling an
//! already-reconciled set is a no-op.

use std::collections::HashSet;

use terradio_proto::station::StationRecord;

/// The single canonical station list shown on the globe.
///
/// Ordering contract:
/// - Unique by station id (first occurrence across input sets wins).
/// - Every record is geo-valid (both coordinates present).
/// - All priority records precede all ordinary records; within each class the
///   original merge order is preserved (stable partition, never a full sort).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconciledCatalog {
    records: Vec<StationRecord>,
}

impl ReconciledCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<StationRecord> {
        self.records
    }
}

impl IntoIterator for ReconciledCatalog {
    type Item = StationRecord;
    type IntoIter = std::vec::IntoIter<StationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Merges query result sets into one deduplicated, geo-valid, priority-ordered
/// catalog.
///
/// Callers pass higher-priority sources first: when two sources return the
/// same station id, the copy from the earlier set is kept and later
/// duplicates are dropped silently. `is_priority` partitions the merged list;
/// equal-priority records never get reordered relative to each other.
///
/// Never fails. Empty input yields an empty catalog.
pub fn reconcile(
    result_sets: impl IntoIterator<Item = Vec<StationRecord>>,
    is_priority: impl Fn(&StationRecord) -> bool,
) -> ReconciledCatalog {
    let mut seen: HashSet<String> = HashSet::new();
    let mut priority: Vec<StationRecord> = Vec::new();
    let mut ordinary: Vec<StationRecord> = Vec::new();

    for set in result_sets {
        for record in set {
            // Dedup before the geo filter: the first occurrence of an id
            // claims it even when that copy is geo-invalid, so a later valid
            // duplicate from a lower-priority source cannot resurrect it.
            if !seen.insert(record.id.clone()) {
                continue;
            }
            if !record.geo_valid() {
                continue;
            }
            if is_priority(&record) {
                priority.push(record);
            } else {
                ordinary.push(record);
            }
        }
    }

    priority.append(&mut ordinary);
    ReconciledCatalog { records: priority }
}

/// Geo-validity filter for single-query paths (simple search, mood search)
/// where no cross-source merge is needed.
pub fn filter_geo(records: Vec<StationRecord>) -> Vec<StationRecord> {
    records.into_iter().filter(StationRecord::geo_valid).collect()
}
