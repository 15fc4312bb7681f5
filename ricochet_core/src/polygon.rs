//! The per-sector polygon builder (the "build" step of the propagation
//! pipeline's trim/block/merge/build/reflect loop). For one sector: gather
//! candidate target points, cast a direct ray plus two grazing rays at
//! each, keep the closest hit, sort the results around the origin, and
//! collapse near-duplicates.

use alloc::vec::Vec;

use crate::config::Config;
use crate::geometry::{line_line_intersection_with_params, ray_segment_intersection, Float, Ray, Rect, Segment, Vector};
use crate::provenance::{SegmentEnd, SourcePoint};
use crate::sector::LightSector;
use crate::surface::Surface;

/// Builds one polygon per sector, each already deduplicated by on-screen
/// proximity (the 0.5px visual tolerance); the coarser provenance-aware
/// dedup (component J) still needs to run on top of this before the result
/// is final.
pub fn build_polygons(
    sectors: &[LightSector],
    scene: &[&dyn Surface],
    exclude: Option<crate::surface::SurfaceId>,
    bounds: Rect,
    config: &Config,
) -> Vec<Vec<SourcePoint>> {
    sectors.iter().map(|s| build_single_polygon(s, scene, exclude, bounds, config)).collect()
}

fn build_single_polygon(
    sector: &LightSector,
    scene: &[&dyn Surface],
    exclude: Option<crate::surface::SurfaceId>,
    bounds: Rect,
    config: &Config,
) -> Vec<SourcePoint> {
    let obstacles: Vec<&dyn Surface> = scene.iter().copied().filter(|s| Some(s.id()) != exclude).collect();

    let mut candidates: Vec<Vector> = Vec::new();
    for o in &obstacles {
        let seg = o.segment();
        candidates.push(seg.start);
        candidates.push(seg.end);
    }
    candidates.extend_from_slice(&bounds.corners());
    candidates.push(sector.right);
    candidates.push(sector.left);
    if let Some(sl) = sector.start_line {
        candidates.push(sl.start);
        candidates.push(sl.end);
    }
    candidates.retain(|&p| sector.is_in(p));

    let mut hits: Vec<SourcePoint> = Vec::new();
    for &target in &candidates {
        for ray in grazing_rays(sector.origin, target) {
            if let Some(sp) = cast_for_far_hit(sector, &ray, &obstacles, bounds, config) {
                hits.push(sp);
            }
        }
    }

    hits.sort_by(|a, b| {
        angle_from(sector.origin, a.compute_xy())
            .partial_cmp(&angle_from(sector.origin, b.compute_xy()))
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    dedup_adjacent_proximity(&mut hits, config.visual_dedup_epsilon);
    hits
}

fn angle_from(origin: Vector, p: Vector) -> Float {
    let d = p - origin;
    atan2(d.y, d.x)
}

#[cfg(feature = "std")]
fn atan2(y: Float, x: Float) -> Float {
    y.atan2(x)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn atan2(y: Float, x: Float) -> Float {
    libm::atan2(y, x)
}

fn dedup_adjacent_proximity(points: &mut Vec<SourcePoint>, eps: Float) {
    let mut result: Vec<SourcePoint> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        if let Some(last) = result.last() {
            if (p.compute_xy() - last.compute_xy()).length() < eps {
                continue;
            }
        }
        result.push(p);
    }
    if result.len() > 1 && (result[0].compute_xy() - result.last().unwrap().compute_xy()).length() < eps {
        result.pop();
    }
    *points = result;
}

/// The direct ray to `target` plus two rays offset perpendicular to it, so a
/// target sitting exactly on an obstacle's edge still resolves a hit just
/// past that edge rather than landing exactly astride it.
fn grazing_rays(origin: Vector, target: Vector) -> [Option<Ray>; 3] {
    let to_target = target - origin;
    let len = to_target.length();
    let Some(dir) = to_target.normalized() else {
        return [None, None, None];
    };
    let perp = dir.rotate90_ccw();
    let offset = (0.001 * len).max(0.5);
    let direct = Ray { origin, direction: dir };
    let g1 = Ray::new(origin, (target + perp.scale(offset)) - origin);
    let g2 = Ray::new(origin, (target - perp.scale(offset)) - origin);
    [Some(direct), g1, g2]
}

const JUNCTION_EPSILON: Float = 1e-6;

fn cast_for_far_hit(
    sector: &LightSector,
    ray: &Ray,
    obstacles: &[&dyn Surface],
    bounds: Rect,
    config: &Config,
) -> Option<SourcePoint> {
    let max_t = (config.exhaustion_limit.max(bounds.diagonal_length())) * 10.0;

    let min_t = if let Some(start_line) = sector.start_line {
        match line_line_intersection_with_params(Segment::new(ray.origin, ray.at(max_t)), start_line) {
            Some((_, t, s)) if (0.0..=1.0).contains(&s) => t.max(0.0),
            _ => 0.0,
        }
    } else {
        0.0
    };

    let mut best: Option<(Float, Vector)> = None;
    for o in obstacles {
        if let Some(hit) = ray_segment_intersection(ray, &o.segment(), min_t - config.self_hit_epsilon) {
            if hit.t >= min_t && best.map_or(true, |(t, _)| hit.t < t) {
                best = Some((hit.t, hit.point));
            }
        }
    }
    for edge in bounds.edges() {
        if let Some(hit) = ray_segment_intersection(ray, &edge, min_t - config.self_hit_epsilon) {
            if hit.t >= min_t && best.map_or(true, |(t, _)| hit.t < t) {
                best = Some((hit.t, hit.point));
            }
        }
    }
    let (_, point_best) = best?;

    if (point_best - sector.origin).length() < config.visual_dedup_epsilon {
        return Some(SourcePoint::OriginPoint { position: point_best });
    }

    // Collect every obstacle whose endpoint coincides with the winning
    // point, to tell a plain Endpoint apart from a shared-vertex Junction.
    let mut endpoint_hits: Vec<(crate::surface::SurfaceId, Float)> = Vec::new();
    for o in obstacles {
        if let Some(hit) = ray_segment_intersection(ray, &o.segment(), min_t - config.self_hit_epsilon) {
            let is_endpoint = hit.s <= JUNCTION_EPSILON || hit.s >= 1.0 - JUNCTION_EPSILON;
            if is_endpoint && (hit.point - point_best).length() < config.visual_dedup_epsilon {
                endpoint_hits.push((o.id(), hit.s));
            }
        }
    }
    endpoint_hits.dedup_by_key(|(id, _)| *id);

    if endpoint_hits.len() >= 2 {
        return Some(SourcePoint::JunctionPoint {
            position: point_best,
            before: endpoint_hits[0].0,
            after: endpoint_hits[1].0,
        });
    }

    for o in obstacles {
        if let Some(hit) = ray_segment_intersection(ray, &o.segment(), min_t - config.self_hit_epsilon) {
            if (hit.point - point_best).length() < config.visual_dedup_epsilon {
                if hit.s <= JUNCTION_EPSILON {
                    return Some(SourcePoint::Endpoint { position: point_best, surface: o.id(), end: SegmentEnd::Start });
                }
                if hit.s >= 1.0 - JUNCTION_EPSILON {
                    return Some(SourcePoint::Endpoint { position: point_best, surface: o.id(), end: SegmentEnd::End });
                }
                return Some(SourcePoint::HitPoint {
                    position: point_best,
                    ray_origin: ray.origin,
                    hit_surface: Some(o.id()),
                    s: hit.s,
                    t: hit.t,
                });
            }
        }
    }

    Some(SourcePoint::HitPoint { position: point_best, ray_origin: ray.origin, hit_surface: None, s: 0.0, t: min_t })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn empty_scene_stays_within_the_screen_rectangle() {
        let origin = Vector::new(960.0, 540.0);
        let bounds = Rect::new(Vector::new(0.0, 0.0), Vector::new(1920.0, 1080.0));
        let config = Config::default();
        let sector = LightSector::full(origin);
        let polygons = build_polygons(&[sector], &[], None, bounds, &config);
        assert_eq!(polygons.len(), 1);
        assert!(!polygons[0].is_empty());
        for p in &polygons[0] {
            let xy = p.compute_xy();
            assert!(xy.x >= -1e-6 && xy.x <= bounds.max.x + 1e-6);
            assert!(xy.y >= -1e-6 && xy.y <= bounds.max.y + 1e-6);
        }
    }
}
