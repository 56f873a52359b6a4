use foundation::math::{Vec3, stable_total_cmp_f64};

use crate::markers::{Marker, MarkerId, MarkerRegistry};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub marker: MarkerId,
    /// Distance along the normalized ray to the hit-volume entry point.
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// When set, hits farther than the ray's entry into a sphere of this
    /// radius at the origin are rejected (markers behind the globe).
    pub occluder_radius: Option<f64>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            occluder_radius: None,
        }
    }
}

/// Deterministic ray picking against marker hit-volumes.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple markers are hit at the same distance, the lower `MarkerId` wins.
///
/// A ray with a zero or non-finite direction never hits.
pub fn hit_test(registry: &MarkerRegistry, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    pick_markers(registry.as_slice(), ray, opts)
}

pub fn pick_markers(markers: &[Marker], ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let ray = Ray::new(ray.origin, ray.dir.normalized()?);
    let dir = ray.dir;

    let mut max_distance = opts.max_distance;
    if let Some(r) = opts.occluder_radius {
        if let Some(t) = ray_sphere_entry(ray.origin, dir, Vec3::ZERO, r) {
            max_distance = max_distance.min(t);
        }
    }

    let mut best: Option<(f64, MarkerId)> = None;

    for marker in markers {
        let Some(t) = ray_sphere_entry(ray.origin, dir, marker.position, marker.hit_radius) else {
            continue;
        };
        if t > max_distance {
            continue;
        }

        best = match best {
            None => Some((t, marker.id)),
            Some((bt, bid)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| marker.id.cmp(&bid));
                if ord.is_lt() {
                    Some((t, marker.id))
                } else {
                    Some((bt, bid))
                }
            }
        };
    }

    let (t, marker) = best?;
    Some(PickHit {
        marker,
        distance: t,
        point: ray.at(t),
    })
}

/// Entry distance of a unit-direction ray into a sphere.
///
/// Returns `Some(0.0)` when the origin is inside the sphere and `None` when the
/// sphere is missed or lies entirely behind the origin.
pub fn ray_sphere_entry(origin: Vec3, dir: Vec3, center: Vec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if !(disc >= 0.0) {
        return None;
    }

    let sq = disc.sqrt();
    let t_far = -b + sq;
    if t_far < 0.0 {
        return None;
    }
    let t_near = -b - sq;
    Some(t_near.max(0.0))
}
