//! GlobeFrame — single-owner rotation state for the render loop.
//!
//! One accumulator drives both the sphere mesh and the marker container.
//! Markers are projected once into the sphere's local frame and only ever
//! carried by the container transform, so there is no second rotation
//! accumulator that could drift away from the surface over long runtimes.
//! The cloud shell keeps its own angle because it intentionally turns at a
//! different rate.
//!
//! Only the render loop mutates a `GlobeFrame`; everything else reads the
//! per-tick transforms it hands out.

use terradio_proto::config::GlobeConfig;

use super::projection::Point3;

/// Rotation about the sphere's polar (y) axis, in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationY {
    pub angle: f64,
}

impl RotationY {
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }

    /// Applies the rotation to a point in the sphere's local frame.
    pub fn apply(self, p: Point3) -> Point3 {
        let (sin, cos) = self.angle.sin_cos();
        Point3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
    }
}

/// Per-tick rotation state shared by every transform consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeFrame {
    /// Shared angle for the sphere mesh AND the marker container.
    angle: f64,
    /// The atmosphere shell turns at its own rate.
    cloud_angle: f64,
    /// Wall-clock seconds accumulated across ticks, drives pulse animation.
    elapsed: f64,
    rotation_per_frame: f64,
    cloud_rotation_per_frame: f64,
}

impl GlobeFrame {
    pub fn new(config: &GlobeConfig) -> Self {
        Self {
            angle: 0.0,
            cloud_angle: 0.0,
            elapsed: 0.0,
            rotation_per_frame: config.rotation_per_frame,
            cloud_rotation_per_frame: config.cloud_rotation_per_frame,
        }
    }

    /// Advances one render tick: fixed angular increments plus the tick's
    /// wall-clock duration for time-based animation.
    pub fn advance(&mut self, dt_seconds: f64) {
        self.angle += self.rotation_per_frame;
        self.cloud_angle += self.cloud_rotation_per_frame;
        self.elapsed += dt_seconds;
    }

    /// Transform for the sphere mesh this tick.
    pub fn sphere_transform(&self) -> RotationY {
        RotationY::new(self.angle)
    }

    /// Transform for the container parenting all projected markers this tick.
    /// Identical to [`Self::sphere_transform`] by construction — both read
    /// the same accumulator, which is what keeps markers locked to the
    /// surface frame-over-frame.
    pub fn marker_container_transform(&self) -> RotationY {
        RotationY::new(self.angle)
    }

    /// Transform for the cloud/atmosphere shell this tick.
    pub fn cloud_transform(&self) -> RotationY {
        RotationY::new(self.cloud_angle)
    }

    /// Seconds elapsed since the frame loop started, for pulse animation.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::projection::project;

    fn config() -> GlobeConfig {
        GlobeConfig {
            sphere_radius: 1.0,
            rotation_per_frame: 0.0008,
            cloud_rotation_per_frame: 0.0011,
        }
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn sphere_and_marker_container_share_one_angle() {
        let mut frame = GlobeFrame::new(&config());
        for _ in 0..10_000 {
            frame.advance(1.0 / 60.0);
            assert_eq!(
                frame.sphere_transform(),
                frame.marker_container_transform()
            );
        }
    }

    #[test]
    fn markers_never_diverge_from_surface_features() {
        // A surface texture point and the marker projected onto it start at
        // the same local position; after N ticks the two composed transforms
        // must still agree exactly.
        let mut frame = GlobeFrame::new(&config());
        let local = project(35.68, 139.69, 1.0);
        for _ in 0..100_000 {
            frame.advance(1.0 / 60.0);
        }
        let surface = frame.sphere_transform().apply(local);
        let marker = frame.marker_container_transform().apply(local);
        assert_eq!(surface, marker);
    }

    #[test]
    fn cloud_shell_turns_at_its_own_rate() {
        let mut frame = GlobeFrame::new(&config());
        frame.advance(1.0 / 60.0);
        assert!(frame.cloud_transform().angle > frame.sphere_transform().angle);
    }

    #[test]
    fn rotation_preserves_radius() {
        let p = project(-33.87, 151.21, 2.0);
        let rotated = RotationY::new(1.234).apply(p);
        assert_close(rotated.length(), 2.0, 1e-12);
    }

    #[test]
    fn elapsed_accumulates_tick_durations() {
        let mut frame = GlobeFrame::new(&config());
        for _ in 0..60 {
            frame.advance(1.0 / 60.0);
        }
        assert_close(frame.elapsed_seconds(), 1.0, 1e-9);
    }
}
