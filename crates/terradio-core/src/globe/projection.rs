//! Geographic → Cartesian projection for the station sphere.
//!
//! Pure geometry. Rotation is never baked into a projected point: points live
//! in the sphere's local (unrotated) frame and are carried by the rotating
//! marker container (see [`crate::globe::frame`]).

use terradio_proto::station::StationRecord;
use tracing::debug;

/// Longitude offset aligning projected points with the surface texture.
///
/// The globe texture is equirectangular with its seam on the antimeridian,
/// so longitude 0 sits in the middle of the image and the projection must
/// shift by 180° to land markers on the geography the texture actually shows.
/// Changing the texture asset means revisiting this constant.
pub const TEXTURE_SEAM_OFFSET_DEG: f64 = 180.0;

/// A point in the sphere's local Cartesian frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Projects a geographic coordinate onto a sphere of the given radius.
///
/// Standard geographic convention: latitude from the equator, longitude from
/// the reference meridian shifted by [`TEXTURE_SEAM_OFFSET_DEG`]. The result
/// is always at exactly distance `radius` from the origin.
pub fn project(lat: f64, lon: f64, radius: f64) -> Point3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + TEXTURE_SEAM_OFFSET_DEG).to_radians();

    Point3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Projects a station record, declining records without a complete coordinate
/// pair. Geo-invalid records are filtered upstream by reconciliation; one
/// arriving here is rendered as nothing rather than as undefined geometry.
pub fn project_station(record: &StationRecord, radius: f64) -> Option<Point3> {
    let Some((lat, lon)) = record.coordinates() else {
        debug!(station = %record.id, "declining to project station without coordinates");
        return None;
    };
    Some(project(lat, lon, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn projected_point_lies_on_sphere() {
        for &(lat, lon) in &[
            (0.0, 0.0),
            (90.0, 0.0),
            (-90.0, 0.0),
            (35.68, 139.69),
            (-33.87, 151.21),
            (51.5, -0.12),
            (0.0, 180.0),
            (0.0, -180.0),
        ] {
            let p = project(lat, lon, 2.5);
            assert_close(p.length(), 2.5, 1e-12);
        }
    }

    #[test]
    fn poles_sit_on_the_y_axis() {
        let north = project(90.0, 0.0, 1.0);
        assert_close(north.x, 0.0, 1e-12);
        assert_close(north.y, 1.0, 1e-12);
        assert_close(north.z, 0.0, 1e-12);

        let south = project(-90.0, 123.0, 1.0);
        assert_close(south.y, -1.0, 1e-12);
    }

    #[test]
    fn seam_offset_places_prime_meridian_opposite_the_seam() {
        // lat 0, lon 0 → theta = 180°, so the point lands at +x.
        let p = project(0.0, 0.0, 1.0);
        assert_close(p.x, 1.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn projection_is_deterministic() {
        let a = project(35.68, 139.69, 1.0);
        let b = project(35.68, 139.69, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn station_without_coordinates_is_declined() {
        let mut record = test_record();
        record.longitude = None;
        assert!(project_station(&record, 1.0).is_none());
    }

    #[test]
    fn station_with_coordinates_projects_like_raw_pair() {
        let record = test_record();
        let via_record = project_station(&record, 1.0).unwrap();
        let via_pair = project(35.68, 139.69, 1.0);
        assert_eq!(via_record, via_pair);
    }

    fn test_record() -> StationRecord {
        StationRecord {
            id: "t".to_string(),
            name: "Tokyo FM".to_string(),
            stream_url: String::new(),
            stream_url_resolved: String::new(),
            icon_url: String::new(),
            tags: String::new(),
            country: "Japan".to_string(),
            country_code: "JP".to_string(),
            language: String::new(),
            popularity: 0,
            codec: String::new(),
            bitrate: 0,
            latitude: Some(35.68),
            longitude: Some(139.69),
        }
    }
}
