//! The image-reflection planned-path constructor: builds the geometric path
//! a plan *intends*, independent of what the scene actually contains, in
//! the same declarative, allocation-light style as the rest of this crate.

use alloc::vec;
use alloc::vec::Vec;

use crate::bypass::ActiveSurface;
use crate::geometry::{line_line_intersection_with_params, reflect_point, Segment, Vector};

/// `points` is `[player, H_0, ..., H_{n-1}, cursor]`; `on_segment[k]` says
/// whether `H_k` actually landed within the bounds of active surface `k`
/// (false means the image construction put it on the surface's infinite
/// line but off the physical segment).
pub struct PlannedPath {
    pub points: Vec<Vector>,
    pub on_segment: Vec<bool>,
}

impl PlannedPath {
    /// The planned targets `H_0..H_{n-1}`, i.e. `points` with the player and
    /// cursor endpoints stripped off.
    pub fn targets(&self) -> &[Vector] {
        let len = self.points.len();
        if len <= 2 {
            &[]
        } else {
            &self.points[1..len - 1]
        }
    }
}

/// Builds the planned path by reflecting the player forward through each
/// active surface (in order) and the cursor backward through each active
/// surface (in reverse order), then intersecting the player-image/
/// cursor-image chord against each surface's own line in turn.
pub fn build_planned_path(player: Vector, cursor: Vector, active: &[ActiveSurface]) -> PlannedPath {
    let n = active.len();

    let mut player_images = Vec::with_capacity(n + 1);
    player_images.push(player);
    for a in active {
        let prev = *player_images.last().unwrap();
        player_images.push(reflect_point(prev, a.surface.segment()));
    }

    let mut cursor_images = vec![Vector::ZERO; n + 1];
    cursor_images[n] = cursor;
    for k in (0..n).rev() {
        cursor_images[k] = reflect_point(cursor_images[k + 1], active[k].surface.segment());
    }

    let mut points = Vec::with_capacity(n + 2);
    points.push(player);
    let mut on_segment = Vec::with_capacity(n);

    for k in 0..n {
        let seg = active[k].surface.segment();
        let chord = Segment::new(player_images[k], cursor_images[k]);
        let (hit, within) = match line_line_intersection_with_params(chord, seg) {
            Some((pt, _, s)) => (pt, (0.0..=1.0).contains(&s)),
            // Parallel chord/surface line: fall back to the surface's own
            // midpoint rather than leaving a hole in the path.
            None => (seg.midpoint(), true),
        };
        on_segment.push(within);
        points.push(hit);
    }
    points.push(cursor);

    PlannedPath { points, on_segment }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Surface, SurfaceId};

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
    fn empty_plan_is_a_straight_line_to_cursor() {
        let player = Vector::new(0.0, 0.0);
        let cursor = Vector::new(10.0, 0.0);
        let path = build_planned_path(player, cursor, &[]);
        assert_eq!(path.points, alloc::vec![player, cursor]);
        assert!(path.targets().is_empty());
    }

    #[test]
    fn single_bounce_reflects_through_the_surface() {
        // Mirror along x-axis; player below, cursor below — a single bounce
        // should land the path's apex on y = 0.
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-10.0, 0.0), Vector::new(10.0, 0.0)) };
        let active = alloc::vec![ActiveSurface { index: 0, surface: &wall }];
        let player = Vector::new(-3.0, -4.0);
        let cursor = Vector::new(3.0, -4.0);
        let path = build_planned_path(player, cursor, &active);
        assert_eq!(path.points.len(), 3);
        assert!(path.points[1].y.abs() < 1e-9);
        assert!(path.on_segment[0]);
    }
}
