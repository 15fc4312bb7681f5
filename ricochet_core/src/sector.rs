//! The light-sector engine. Every predicate here is exact — cross products
//! only, no epsilon — so that trimming, blocking, and merging sectors never
//! accumulates floating-point drift the way a tolerance-based version would.

use alloc::vec::Vec;

use crate::geometry::{cross3, reflect_point, Segment, Vector};
use crate::surface::Surface;

/// An angular region of visibility, fanning out from `origin` between the
/// boundary points `right` and `left` (traced counter-clockwise from
/// `right` to `left`). `left == right` represents the unbounded, full
/// 360-degree sector. `start_line`, when set, is the surface this sector
/// was last reflected off — used downstream to keep visibility rays from
/// counting hits on the near side of that surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSector {
    pub origin: Vector,
    pub right: Vector,
    pub left: Vector,
    pub start_line: Option<Segment>,
}

impl LightSector {
    pub fn full(origin: Vector) -> Self {
        // Any single point works as the degenerate left==right marker; the
        // actual position is never consulted while the sector is full.
        Self { origin, right: origin, left: origin, start_line: None }
    }

    pub fn is_full(&self) -> bool {
        self.left == self.right
    }

    /// The sector a surface casts, viewed from `origin`: traced
    /// counter-clockwise from `right` to `left` so that `cross(origin,
    /// right, left) >= 0`.
    pub fn create_from_surface(origin: Vector, surface: &dyn Surface) -> Self {
        let seg = surface.segment();
        let (right, left) = if cross3(origin, seg.start, seg.end) >= 0.0 {
            (seg.start, seg.end)
        } else {
            (seg.end, seg.start)
        };
        Self { origin, right, left, start_line: None }
    }

    /// Whether `p` falls within this sector's angular span, as seen from
    /// `origin`.
    pub fn is_in(&self, p: Vector) -> bool {
        if self.is_full() {
            return true;
        }
        let in_right = cross3(self.origin, self.right, p) >= 0.0;
        let in_left = cross3(self.origin, self.left, p) <= 0.0;
        if cross3(self.origin, self.right, self.left) >= 0.0 {
            in_right && in_left
        } else {
            in_right || in_left
        }
    }

    /// The overlap of two sectors sharing an origin. `None` when they don't
    /// overlap at all.
    pub fn intersect(&self, other: &LightSector) -> Option<LightSector> {
        if self.is_full() {
            return Some(*other);
        }
        if other.is_full() {
            return Some(*self);
        }

        let new_left = if other.is_in(self.left) {
            self.left
        } else if self.is_in(other.left) {
            other.left
        } else {
            return None;
        };
        let new_right = if other.is_in(self.right) {
            self.right
        } else if self.is_in(other.right) {
            other.right
        } else {
            return None;
        };

        if cross3(self.origin, new_right, new_left) < 0.0 {
            return None;
        }

        Some(LightSector {
            origin: self.origin,
            right: new_right,
            left: new_left,
            start_line: self.start_line.or(other.start_line),
        })
    }

    /// Removes the angular span an opaque `obstacle` covers from this
    /// sector, returning the remaining piece(s): two when the obstacle sits
    /// entirely within the sector (splitting it), one when it eats into a
    /// single side, the sector unchanged when the obstacle doesn't overlap
    /// it at all, or none when the obstacle covers the whole span.
    pub fn block_by(&self, obstacle: &Segment) -> Vec<LightSector> {
        if self.is_full() {
            // Trimming against the plan's first surface always happens
            // before any block_by call reaches a real scene, so a still-full
            // sector here has nothing meaningful to block against.
            return alloc::vec![*self];
        }

        let a_in = self.is_in(obstacle.start);
        let b_in = self.is_in(obstacle.end);

        match (a_in, b_in) {
            (true, true) => {
                let cr_a = cross3(self.origin, self.right, obstacle.start);
                let cr_b = cross3(self.origin, self.right, obstacle.end);
                let (near_right, near_left) =
                    if cr_a <= cr_b { (obstacle.start, obstacle.end) } else { (obstacle.end, obstacle.start) };
                let piece1 = LightSector { origin: self.origin, right: self.right, left: near_right, start_line: self.start_line };
                let piece2 = LightSector { origin: self.origin, right: near_left, left: self.left, start_line: self.start_line };
                alloc::vec![piece1, piece2]
            }
            (true, false) | (false, true) => {
                let (p_in, p_out) = if a_in { (obstacle.start, obstacle.end) } else { (obstacle.end, obstacle.start) };
                let beyond_right = cross3(self.origin, self.right, p_out) < 0.0;
                let survivor = if beyond_right {
                    LightSector { origin: self.origin, right: p_in, left: self.left, start_line: self.start_line }
                } else {
                    LightSector { origin: self.origin, right: self.right, left: p_in, start_line: self.start_line }
                };
                alloc::vec![survivor]
            }
            (false, false) => {
                let hits_right = self
                    .right_ray()
                    .map(|ray| crate::geometry::ray_segment_intersection(&ray, obstacle, 0.0).is_some())
                    .unwrap_or(false);
                let hits_left = self
                    .left_ray()
                    .map(|ray| crate::geometry::ray_segment_intersection(&ray, obstacle, 0.0).is_some())
                    .unwrap_or(false);
                if hits_right && hits_left {
                    Vec::new()
                } else {
                    alloc::vec![*self]
                }
            }
        }
    }

    fn right_ray(&self) -> Option<crate::geometry::Ray> {
        crate::geometry::Ray::new(self.origin, self.right - self.origin)
    }
    fn left_ray(&self) -> Option<crate::geometry::Ray> {
        crate::geometry::Ray::new(self.origin, self.left - self.origin)
    }

    /// Reflects this sector through `surface`'s line: the new origin is the
    /// reflected origin, and `right`/`left` swap (reflection reverses
    /// winding) while each is itself reflected.
    pub fn reflect(&self, surface: &dyn Surface) -> LightSector {
        let seg = surface.segment();
        LightSector {
            origin: reflect_point(self.origin, seg),
            right: reflect_point(self.left, seg),
            left: reflect_point(self.right, seg),
            start_line: Some(seg),
        }
    }

    /// Fixed-point pass over a list of sectors: two adjacent sectors where
    /// one's `left` equals the next's `right` collapse into one spanning
    /// sector.
    pub fn merge(mut sectors: Vec<LightSector>) -> Vec<LightSector> {
        loop {
            let mut merged_any = false;
            let mut result = Vec::with_capacity(sectors.len());
            let mut i = 0;
            while i < sectors.len() {
                if i + 1 < sectors.len() && sectors[i].left == sectors[i + 1].right {
                    let a = sectors[i];
                    let b = sectors[i + 1];
                    result.push(LightSector {
                        origin: a.origin,
                        right: a.right,
                        left: b.left,
                        start_line: a.start_line.or(b.start_line),
                    });
                    i += 2;
                    merged_any = true;
                } else {
                    result.push(sectors[i]);
                    i += 1;
                }
            }
            sectors = result;
            if !merged_any {
                break;
            }
        }
        sectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceId;

    struct Wall {
        id: u64,
        seg: Segment,
    }
    impl Surface for Wall {
        fn id(&self) -> SurfaceId {
            SurfaceId(self.id)
        }
        fn segment(&self) -> Segment {
            self.seg
        }
        fn is_plannable(&self) -> bool {
            true
        }
    }

    #[test]
    fn full_sector_contains_every_point() {
        let s = LightSector::full(Vector::new(0.0, 0.0));
        assert!(s.is_in(Vector::new(100.0, -100.0)));
        assert!(s.is_in(Vector::new(-1.0, 0.0)));
    }

    #[test]
    fn create_from_surface_contains_its_own_midpoint() {
        let origin = Vector::new(0.0, 0.0);
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-1.0, 5.0), Vector::new(1.0, 5.0)) };
        let sector = LightSector::create_from_surface(origin, &wall);
        assert!(sector.is_in(wall.seg.midpoint()));
        assert!(cross3(sector.origin, sector.right, sector.left) >= 0.0);
    }

    #[test]
    fn block_by_obstacle_inside_sector_splits_into_two() {
        let origin = Vector::new(0.0, 0.0);
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-10.0, 10.0), Vector::new(10.0, 10.0)) };
        let sector = LightSector::create_from_surface(origin, &wall);
        let obstacle = Segment::new(Vector::new(-1.0, 5.0), Vector::new(1.0, 5.0));
        let pieces = sector.block_by(&obstacle);
        assert_eq!(pieces.len(), 2);
    }

    #[test]
    fn merge_recombines_adjacent_sectors() {
        let origin = Vector::new(0.0, 0.0);
        let a = LightSector { origin, right: Vector::new(1.0, 0.0), left: Vector::new(0.0, 1.0), start_line: None };
        let b = LightSector { origin, right: Vector::new(0.0, 1.0), left: Vector::new(-1.0, 0.0), start_line: None };
        let merged = LightSector::merge(alloc::vec![a, b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].right, a.right);
        assert_eq!(merged[0].left, b.left);
    }

    #[test]
    fn reflect_swaps_and_mirrors_boundaries() {
        let origin = Vector::new(0.0, -5.0);
        let sector =
            LightSector { origin, right: Vector::new(-1.0, 0.0), left: Vector::new(1.0, 0.0), start_line: None };
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-10.0, 0.0), Vector::new(10.0, 0.0)) };
        let reflected = sector.reflect(&wall);
        assert!((reflected.origin - Vector::new(0.0, 5.0)).length() < 1e-9);
        assert!((reflected.right - Vector::new(1.0, 0.0)).length() < 1e-9);
        assert!((reflected.left - Vector::new(-1.0, 0.0)).length() < 1e-9);
    }
}
