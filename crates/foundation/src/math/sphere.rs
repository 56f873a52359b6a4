//! Latitude/longitude placement on the scene's unit globe.
//!
//! Frame convention: latitude +90 maps to +Y, longitude 0 sits on
//! the +X axis and longitude -180/180 on -X. Inputs are not validated; values
//! outside the geographic range still produce a point at the requested radius.

use super::Vec3;

/// Radius of the globe mesh in scene units.
pub const GLOBE_RADIUS: f64 = 1.0;

/// Radius markers are projected to. Slightly above the globe so marker
/// meshes never z-fight with the sphere surface.
pub const MARKER_SURFACE_RADIUS: f64 = 1.05;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    pub fn project(self, radius: f64) -> Vec3 {
        project(self.lat_deg, self.lon_deg, radius)
    }

    /// Unit direction from the globe center.
    pub fn direction(self) -> Vec3 {
        project(self.lat_deg, self.lon_deg, 1.0)
    }
}

/// Spherical-to-Cartesian projection using colatitude.
pub fn project(lat_deg: f64, lon_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// [`project`] at [`MARKER_SURFACE_RADIUS`].
pub fn project_marker(lat_deg: f64, lon_deg: f64) -> Vec3 {
    project(lat_deg, lon_deg, MARKER_SURFACE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, MARKER_SURFACE_RADIUS, project, project_marker};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn projected_points_lie_on_the_requested_radius() {
        for radius in [0.5, 1.0, MARKER_SURFACE_RADIUS, 7.25] {
            let mut lat = -90.0;
            while lat <= 90.0 {
                let mut lon = -180.0;
                while lon <= 180.0 {
                    let p = project(lat, lon, radius);
                    assert_close(p.length(), radius, 1e-6);
                    lon += 15.0;
                }
                lat += 7.5;
            }
        }
    }

    #[test]
    fn north_pole_ignores_longitude() {
        for lon in [-180.0, -97.5, 0.0, 42.0, 180.0] {
            let p = project(90.0, lon, 2.0);
            assert_close(p.x, 0.0, 1e-12);
            assert_close(p.y, 2.0, 1e-12);
            assert_close(p.z, 0.0, 1e-12);
        }
    }

    #[test]
    fn antimeridian_wraps() {
        for lat in [-60.0, -12.5, 0.0, 33.3, 89.0] {
            let west = project(lat, -180.0, 1.0);
            let east = project(lat, 180.0, 1.0);
            assert_close(west.x, east.x, 1e-12);
            assert_close(west.y, east.y, 1e-12);
            assert_close(west.z, east.z, 1e-12);
        }
    }

    #[test]
    fn equator_axes() {
        let p = project(0.0, 0.0, 1.0);
        assert_close(p.x, 1.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);

        let p = project(0.0, 90.0, 1.0);
        assert_close(p.x, 0.0, 1e-12);
        assert_close(p.z, -1.0, 1e-12);
    }

    #[test]
    fn india_height_matches_colatitude_cosine() {
        let p = project_marker(20.6, 78.96);
        let expected = ((90.0_f64 - 20.6).to_radians()).cos() * MARKER_SURFACE_RADIUS;
        assert_close(p.y, expected, 1e-12);
        // cos(69.4 deg) = 0.351842...
        assert_close(p.y / MARKER_SURFACE_RADIUS, 0.351842, 1e-5);
    }

    #[test]
    fn direction_is_the_unit_projection() {
        let geo = GeoPoint::new(-25.2744, 133.775);
        let dir = geo.direction();
        assert_close(dir.length(), 1.0, 1e-12);
        let p = geo.project(MARKER_SURFACE_RADIUS);
        assert_close(dir.x * MARKER_SURFACE_RADIUS, p.x, 1e-12);
        assert_close(dir.y * MARKER_SURFACE_RADIUS, p.y, 1e-12);
        assert_close(dir.z * MARKER_SURFACE_RADIUS, p.z, 1e-12);
    }

    #[test]
    fn out_of_range_input_is_accepted() {
        let p = GeoPoint::new(135.0, 400.0).project(1.0);
        assert!(p.is_finite());
        assert_close(p.length(), 1.0, 1e-9);
    }
}
