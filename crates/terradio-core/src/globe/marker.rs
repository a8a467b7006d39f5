//! Station markers: visual state machine, exclusive selection, pulse.
//!
//! Ordering/exclusivity contract:
//! - At most one marker is `Selected` system-wide.
//! - Selecting a station moves the previously selected marker to `Idle`.
//! - Selection is never auto-cleared; only a different pick replaces it.

use terradio_proto::station::StationRecord;

use super::projection::{project_station, Point3};

// ── Visual constants ──────────────────────────────────────────────────────────

pub const C_MARKER_IDLE: [u8; 3] = [80, 140, 200];
pub const C_MARKER_HOVERED: [u8; 3] = [255, 200, 80];
pub const C_MARKER_SELECTED: [u8; 3] = [255, 95, 95];

/// Pulse oscillation frequency for selected markers, in Hz.
pub const PULSE_FREQUENCY_HZ: f64 = 1.5;
/// Peak size deviation of the pulse, as a fraction of base scale.
pub const PULSE_AMPLITUDE: f64 = 0.25;

/// Minimum radius of the clickable solid around a marker, in sphere-local
/// units. Keeps picking reliable at the camera controller's zoom extremes.
pub const PICK_RADIUS_MIN: f64 = 0.015;

// ── MarkerVisual ──────────────────────────────────────────────────────────────

/// Per-marker visual state.
///
/// Transitions:
///   Idle -> Hovered       on pointer-enter
///   Hovered -> Idle       on pointer-leave
///   any -> Selected       on click-select of that station
///   Selected -> Idle      only when a different station becomes Selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerVisual {
    #[default]
    Idle,
    Hovered,
    Selected,
}

impl MarkerVisual {
    pub fn pointer_enter(self) -> Self {
        match self {
            MarkerVisual::Idle => MarkerVisual::Hovered,
            other => other,
        }
    }

    pub fn pointer_leave(self) -> Self {
        match self {
            MarkerVisual::Hovered => MarkerVisual::Idle,
            other => other,
        }
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            MarkerVisual::Idle => C_MARKER_IDLE,
            MarkerVisual::Hovered => C_MARKER_HOVERED,
            MarkerVisual::Selected => C_MARKER_SELECTED,
        }
    }

    /// Size multiplier at `elapsed` seconds. Selected markers pulse
    /// sinusoidally; Idle/Hovered render at fixed size (color alone differs).
    pub fn scale(self, elapsed_seconds: f64) -> f64 {
        match self {
            MarkerVisual::Selected => {
                1.0 + PULSE_AMPLITUDE
                    * (2.0 * std::f64::consts::PI * PULSE_FREQUENCY_HZ * elapsed_seconds).sin()
            }
            _ => 1.0,
        }
    }
}

// ── Marker / MarkerOverlay ────────────────────────────────────────────────────

/// One renderable marker: a station projected into the sphere's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub station_id: String,
    /// Local-frame position; repositioning happens only via the rotating
    /// container transform, never by re-projecting.
    pub position: Point3,
    pub visual: MarkerVisual,
}

impl Marker {
    /// Radius of the clickable solid, clamped to the minimum footprint.
    pub fn pick_radius(&self, base_radius: f64) -> f64 {
        base_radius.max(PICK_RADIUS_MIN)
    }
}

/// All markers for the current catalog, with system-wide selection
/// exclusivity enforced here rather than per marker.
#[derive(Debug, Clone, Default)]
pub struct MarkerOverlay {
    markers: Vec<Marker>,
}

impl MarkerOverlay {
    /// Builds the overlay from a catalog's records. Records without a
    /// complete coordinate pair are declined (reconciliation filters them
    /// upstream; a straggler renders as nothing).
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a StationRecord>,
        sphere_radius: f64,
    ) -> Self {
        let markers = records
            .into_iter()
            .filter_map(|record| {
                let position = project_station(record, sphere_radius)?;
                Some(Marker {
                    station_id: record.id.clone(),
                    position,
                    visual: MarkerVisual::Idle,
                })
            })
            .collect();
        Self { markers }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, station_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.station_id == station_id)
    }

    /// Click-select: the picked marker becomes `Selected`, the previously
    /// selected one (if any, and if different) drops to `Idle`.
    pub fn select(&mut self, station_id: &str) {
        for marker in &mut self.markers {
            if marker.station_id == station_id {
                marker.visual = MarkerVisual::Selected;
            } else if marker.visual == MarkerVisual::Selected {
                marker.visual = MarkerVisual::Idle;
            }
        }
    }

    pub fn pointer_enter(&mut self, station_id: &str) {
        if let Some(marker) = self.markers.iter_mut().find(|m| m.station_id == station_id) {
            marker.visual = marker.visual.pointer_enter();
        }
    }

    pub fn pointer_leave(&mut self, station_id: &str) {
        if let Some(marker) = self.markers.iter_mut().find(|m| m.station_id == station_id) {
            marker.visual = marker.visual.pointer_leave();
        }
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| m.visual == MarkerVisual::Selected)
    }
}
