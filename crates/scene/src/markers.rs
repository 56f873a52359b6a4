use foundation::math::{GeoPoint, MARKER_SURFACE_RADIUS, Vec3};

/// Radius of a marker's spherical hit-volume (scene units).
pub const DEFAULT_HIT_RADIUS: f64 = 0.08;

/// Stable marker handle: the marker's position in the input list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl MarkerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Startup description of a point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub name: String,
    pub geo: GeoPoint,
}

impl MarkerSpec {
    pub fn new(name: impl Into<String>, lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            name: name.into(),
            geo: GeoPoint::new(lat_deg, lon_deg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub name: String,
    pub geo: GeoPoint,
    /// Projected position; fixed for the lifetime of the registry.
    pub position: Vec3,
    pub hit_radius: f64,
}

/// Ordered, immutable set of markers.
///
/// Registry order is the tie-break order for picking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
}

impl MarkerRegistry {
    pub fn build(specs: &[MarkerSpec]) -> Self {
        Self::build_with(specs, MARKER_SURFACE_RADIUS, DEFAULT_HIT_RADIUS)
    }

    pub fn build_with(specs: &[MarkerSpec], surface_radius: f64, hit_radius: f64) -> Self {
        let markers = specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| Marker {
                id: MarkerId(idx as u32),
                name: spec.name.clone(),
                geo: spec.geo,
                position: spec.geo.project(surface_radius),
                hit_radius,
            })
            .collect();
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.index())
    }

    /// First marker with the given name.
    pub fn find(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_HIT_RADIUS, MarkerId, MarkerRegistry, MarkerSpec};
    use foundation::math::MARKER_SURFACE_RADIUS;

    #[test]
    fn build_preserves_order_and_projects_positions() {
        let registry = MarkerRegistry::build(&[
            MarkerSpec::new("India", 20.6, 78.96),
            MarkerSpec::new("Russia", 61.524, 105.3188),
        ]);

        assert_eq!(registry.len(), 2);
        let india = registry.get(MarkerId(0)).expect("india");
        assert_eq!(india.name, "India");
        assert_eq!(india.hit_radius, DEFAULT_HIT_RADIUS);
        assert!((india.position.length() - MARKER_SURFACE_RADIUS).abs() < 1e-9);
        assert_eq!(registry.find("Russia").map(|m| m.id), Some(MarkerId(1)));
        assert!(registry.find("Atlantis").is_none());
    }

    #[test]
    fn every_marker_sits_on_the_surface_radius() {
        let specs: Vec<MarkerSpec> = (0..24)
            .map(|i| {
                let (lat, lon) = (-88.0 + 7.5 * i as f64, -175.0 + 15.0 * i as f64);
                MarkerSpec::new(format!("m{i}"), lat, lon)
            })
            .collect();
        let registry = MarkerRegistry::build(&specs);
        for marker in registry.iter() {
            assert!((marker.position.length() - MARKER_SURFACE_RADIUS).abs() < 1e-9);
        }
    }
}
