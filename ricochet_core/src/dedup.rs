//! Rendering prep: two passes over the provenance-tagged vertices a
//! visibility polygon produced. Collapse bit-identical points, then
//! collapse a run of consecutive hits on the same surface down to just its
//! first and last point.

use alloc::vec::Vec;

use crate::provenance::SourcePoint;

pub fn dedup_provenance(points: &[SourcePoint]) -> Vec<SourcePoint> {
    let mut exact: Vec<SourcePoint> = Vec::with_capacity(points.len());
    for &p in points {
        let xy = p.compute_xy();
        if let Some(last) = exact.last() {
            if last.compute_xy() == xy {
                continue;
            }
        }
        exact.push(p);
    }

    let mut result: Vec<SourcePoint> = Vec::with_capacity(exact.len());
    let mut i = 0;
    while i < exact.len() {
        let id = exact[i].surface_identity();
        if id.is_none() {
            result.push(exact[i]);
            i += 1;
            continue;
        }
        let mut j = i;
        while j + 1 < exact.len() && exact[j + 1].surface_identity() == id {
            j += 1;
        }
        result.push(exact[i]);
        if j > i {
            result.push(exact[j]);
        }
        i = j + 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use crate::surface::SurfaceId;

    #[test]
    fn exact_duplicates_collapse_to_one() {
        let p = SourcePoint::OriginPoint { position: Vector::new(1.0, 1.0) };
        let deduped = dedup_provenance(&[p, p, p]);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn a_run_of_same_surface_hits_keeps_only_first_and_last() {
        let a = SourcePoint::HitPoint {
            position: Vector::new(0.0, 0.0),
            ray_origin: Vector::ZERO,
            hit_surface: Some(SurfaceId(1)),
            s: 0.1,
            t: 1.0,
        };
        let b = SourcePoint::HitPoint {
            position: Vector::new(0.0, 0.1),
            ray_origin: Vector::ZERO,
            hit_surface: Some(SurfaceId(1)),
            s: 0.2,
            t: 1.1,
        };
        let c = SourcePoint::HitPoint {
            position: Vector::new(0.0, 0.2),
            ray_origin: Vector::ZERO,
            hit_surface: Some(SurfaceId(1)),
            s: 0.3,
            t: 1.2,
        };
        let deduped = dedup_provenance(&[a, b, c]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].compute_xy(), a.compute_xy());
        assert_eq!(deduped[1].compute_xy(), c.compute_xy());
    }

    #[test]
    fn origin_point_breaks_a_run() {
        let a = SourcePoint::HitPoint {
            position: Vector::new(0.0, 0.0),
            ray_origin: Vector::ZERO,
            hit_surface: Some(SurfaceId(1)),
            s: 0.1,
            t: 1.0,
        };
        let origin = SourcePoint::OriginPoint { position: Vector::new(5.0, 5.0) };
        let b = SourcePoint::HitPoint {
            position: Vector::new(0.0, 0.2),
            ray_origin: Vector::ZERO,
            hit_surface: Some(SurfaceId(1)),
            s: 0.3,
            t: 1.2,
        };
        let deduped = dedup_provenance(&[a, origin, b]);
        assert_eq!(deduped.len(), 3);
    }
}
