//! Scene-level helpers shared by the bypass evaluator, the actual-path
//! tracer, and ghost construction: "what does this ray hit first".

use crate::geometry::{ray_segment_intersection, Float, RaySegmentHit, Ray};
use crate::surface::{Surface, SurfaceId};

/// The closest surface in `scene` that `ray` hits at a parameter greater
/// than `min_t`, excluding `exclude` (typically the surface the ray just
/// left, to avoid an immediate self-hit).
pub fn closest_hit<'a>(
    ray: &Ray,
    scene: &[&'a dyn Surface],
    exclude: Option<SurfaceId>,
    min_t: Float,
) -> Option<(RaySegmentHit, &'a dyn Surface)> {
    let mut best: Option<(RaySegmentHit, &dyn Surface)> = None;
    for &s in scene {
        if Some(s.id()) == exclude {
            continue;
        }
        if let Some(hit) = ray_segment_intersection(ray, &s.segment(), min_t) {
            if best.as_ref().map_or(true, |(b, _)| hit.t < b.t) {
                best = Some((hit, s));
            }
        }
    }
    best
}
