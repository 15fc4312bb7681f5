//! The bypass evaluator. Walks a planned surface list once, in order,
//! deciding which surfaces are actually reachable and which are skipped
//! (and why), before any path is built.

use alloc::vec::Vec;

use crate::config::Config;
use crate::geometry::{ray_segment_intersection, reflect_point, Float, Ray, Vector};
use crate::surface::{Surface, SurfaceId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BypassReason {
    PlayerWrongSide,
    CursorWrongSide,
    ReflectionChainWrongSide,
    Obstructed,
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BypassRecord {
    /// Index into the original plan slice.
    pub index: usize,
    pub surface_id: SurfaceId,
    pub reason: BypassReason,
}

/// A surface that survived bypass evaluation, carrying its index in the
/// original plan so later stages can report indices the caller recognizes.
#[derive(Clone, Copy)]
pub struct ActiveSurface<'a> {
    pub index: usize,
    pub surface: &'a dyn Surface,
}

pub struct BypassOutcome<'a> {
    pub active: Vec<ActiveSurface<'a>>,
    pub bypassed: Vec<BypassRecord>,
}

/// Evaluates which surfaces in `plan` are reachable, in order, from
/// `player`. `cursor` is `None` when no cursor is available (the
/// visibility-only `propagate` entry point) — the cursor-side test for the
/// final planned surface is simply skipped in that case.
pub fn evaluate_bypass<'a>(
    player: Vector,
    cursor: Option<Vector>,
    plan: &[&'a dyn Surface],
    scene: &[&dyn Surface],
    config: &Config,
) -> BypassOutcome<'a> {
    let mut active = Vec::new();
    let mut bypassed = Vec::new();

    let mut current_point = player;
    let mut accumulated_distance = 0.0;
    let mut exhausted = false;
    let mut forced_next: Option<BypassReason> = None;

    for (k, &surface) in plan.iter().enumerate() {
        let is_last = k + 1 == plan.len();

        if exhausted {
            bypassed.push(BypassRecord { index: k, surface_id: surface.id(), reason: BypassReason::Exhausted });
            continue;
        }
        if accumulated_distance > config.exhaustion_limit {
            exhausted = true;
            bypassed.push(BypassRecord { index: k, surface_id: surface.id(), reason: BypassReason::Exhausted });
            continue;
        }
        if let Some(reason) = forced_next.take() {
            bypassed.push(BypassRecord { index: k, surface_id: surface.id(), reason });
            continue;
        }

        let seg = surface.segment();
        let normal = surface.normal();

        // Player-side: the player must be on the reflective side of S.
        if (current_point - seg.start).dot(normal) < 0.0 {
            bypassed.push(BypassRecord { index: k, surface_id: surface.id(), reason: BypassReason::PlayerWrongSide });
            continue;
        }

        // Cursor-side: only checked for the final surface in the plan, and
        // only when a cursor was actually given.
        if is_last {
            if let Some(cursor) = cursor {
                if (cursor - seg.start).dot(normal) < 0.0 {
                    bypassed.push(BypassRecord {
                        index: k,
                        surface_id: surface.id(),
                        reason: BypassReason::CursorWrongSide,
                    });
                    continue;
                }
            }
        }

        // Reflection chain: the image of the current point through S must
        // land on the reflective side of the *next* planned surface, or
        // that next surface is bypassed (S itself still stands).
        if let Some(&next_surface) = plan.get(k + 1) {
            let reflected = reflect_point(current_point, seg);
            let next_seg = next_surface.segment();
            if (reflected - next_seg.start).dot(next_surface.normal()) < 0.0 {
                forced_next = Some(BypassReason::ReflectionChainWrongSide);
            }
        }

        // Obstruction: cast toward S's midpoint; an intervening surface
        // that isn't plannable, or can't reflect from this direction,
        // bypasses S. An intervening surface that could legitimately
        // reflect this ray does not bypass S — any resulting divergence
        // shows up later, in the actual path.
        let midpoint = seg.midpoint();
        if let Some(dir) = (midpoint - current_point).normalized() {
            let dist_to_s = (midpoint - current_point).length();
            let ray = Ray { origin: current_point, direction: dir };
            let mut blocked_by: Option<&dyn Surface> = None;
            let mut closest_t = Float::INFINITY;
            for &obstacle in scene {
                if obstacle.id() == surface.id() {
                    continue;
                }
                if let Some(hit) = ray_segment_intersection(&ray, &obstacle.segment(), config.self_hit_epsilon) {
                    if hit.t < dist_to_s - config.self_hit_epsilon && hit.t < closest_t {
                        closest_t = hit.t;
                        blocked_by = Some(obstacle);
                    }
                }
            }
            if let Some(obstacle) = blocked_by {
                if !obstacle.is_plannable() || !obstacle.can_reflect_from(dir) {
                    bypassed.push(BypassRecord { index: k, surface_id: surface.id(), reason: BypassReason::Obstructed });
                    continue;
                }
            }
        }

        accumulated_distance += (midpoint - current_point).length();
        current_point = reflect_point(current_point, seg);
        active.push(ActiveSurface { index: k, surface });
    }

    BypassOutcome { active, bypassed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;

    struct Wall {
        id: u64,
        seg: Segment,
        plannable: bool,
    }

    impl Surface for Wall {
        fn id(&self) -> SurfaceId {
            SurfaceId(self.id)
        }
        fn segment(&self) -> Segment {
            self.seg
        }
        fn is_plannable(&self) -> bool {
            self.plannable
        }
    }

    #[test]
    fn empty_plan_has_no_active_or_bypassed_surfaces() {
        let player = Vector::new(0.0, 0.0);
        let cursor = Vector::new(10.0, 0.0);
        let config = Config::default();
        let outcome = evaluate_bypass(player, Some(cursor), &[], &[], &config);
        assert!(outcome.active.is_empty());
        assert!(outcome.bypassed.is_empty());
    }

    #[test]
    fn surface_on_wrong_side_of_player_is_bypassed() {
        // Normal points +y (segment runs left-to-right along y=0); the
        // player standing at y = -5 is on the non-reflective side.
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-1.0, 0.0), Vector::new(1.0, 0.0)), plannable: true };
        let plan: Vec<&dyn Surface> = alloc::vec![&wall];
        let player = Vector::new(0.0, -5.0);
        let cursor = Vector::new(0.0, -3.0);
        let config = Config::default();
        let outcome = evaluate_bypass(player, Some(cursor), &plan, &[], &config);
        assert!(outcome.active.is_empty());
        assert_eq!(outcome.bypassed.len(), 1);
        assert_eq!(outcome.bypassed[0].reason, BypassReason::PlayerWrongSide);
    }

    #[test]
    fn reachable_surface_on_correct_side_is_active() {
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-1.0, 0.0), Vector::new(1.0, 0.0)), plannable: true };
        let plan: Vec<&dyn Surface> = alloc::vec![&wall];
        let player = Vector::new(0.0, 5.0);
        let cursor = Vector::new(0.0, 3.0);
        let config = Config::default();
        let outcome = evaluate_bypass(player, Some(cursor), &plan, &[], &config);
        assert_eq!(outcome.active.len(), 1);
        assert!(outcome.bypassed.is_empty());
    }
}
