//! The physical ray-marching path tracer: advance, find the closest hit,
//! reflect, repeat, bounded by a bounce cap and an exhaustion budget.

use alloc::vec;
use alloc::vec::Vec;

use crate::bypass::ActiveSurface;
use crate::config::Config;
use crate::geometry::{reflect_direction, Ray, Vector};
use crate::scene::closest_hit;
use crate::surface::{Surface, SurfaceId};

pub struct ActualPathResult {
    pub points: Vec<Vector>,
    pub reached_cursor: bool,
    pub obstruction: Option<SurfaceId>,
    /// The direction of travel at the end of the path, used to seed the
    /// actual-path ghost. `None` only when player and cursor coincide and
    /// there is nothing to trace.
    pub terminal_direction: Option<Vector>,
    pub last_surface: Option<SurfaceId>,
}

struct Leg {
    dest: Vector,
    reflect_normal: Option<Vector>,
    surface_id: Option<SurfaceId>,
}

/// Traces the physical path from `player`, aiming first at each of
/// `planned_targets` (the planned path's `H_0..H_{n-1}`, reflecting off the
/// corresponding active surface on arrival) and finally at `cursor`. An
/// obstruction encountered before a planned target switches the tracer into
/// free-flight mode for the remainder of the trace: it keeps bouncing
/// physically, ignoring the rest of the plan, until it runs out of budget
/// or hits a non-reflective surface.
pub fn trace_actual_path(
    player: Vector,
    cursor: Vector,
    planned_targets: &[Vector],
    active: &[ActiveSurface],
    scene: &[&dyn Surface],
    config: &Config,
) -> ActualPathResult {
    let mut legs = Vec::with_capacity(planned_targets.len() + 1);
    for (target, a) in planned_targets.iter().zip(active.iter()) {
        legs.push(Leg { dest: *target, reflect_normal: Some(a.surface.normal()), surface_id: Some(a.surface.id()) });
    }
    legs.push(Leg { dest: cursor, reflect_normal: None, surface_id: None });

    let mut points = vec![player];
    let mut current_pos = player;
    let mut current_dir: Option<Vector> = None;
    let mut accumulated = 0.0;
    let mut bounces = 0usize;
    let mut last_surface: Option<SurfaceId> = None;
    let mut reached_cursor = false;
    let mut obstruction = None;
    let mut switched_to_forward = false;

    for leg in &legs {
        if bounces >= config.max_bounces || accumulated >= config.exhaustion_limit {
            break;
        }
        let Some(dir) = (leg.dest - current_pos).normalized() else {
            // Degenerate leg: destination coincides with where we already
            // are. Accept it and move on rather than stalling.
            current_pos = leg.dest;
            last_surface = leg.surface_id;
            if leg.reflect_normal.is_none() {
                reached_cursor = true;
            }
            continue;
        };
        current_dir = Some(dir);
        let dist_to_leg = (leg.dest - current_pos).length();
        let ray = Ray { origin: current_pos, direction: dir };

        match closest_hit(&ray, scene, last_surface, config.self_hit_epsilon) {
            Some((hit, surf)) if hit.t < dist_to_leg - config.self_hit_epsilon => {
                points.push(hit.point);
                accumulated += hit.t;
                if !surf.is_plannable() || !surf.can_reflect_from(dir) {
                    obstruction = Some(surf.id());
                    break;
                }
                current_pos = hit.point;
                current_dir = Some(reflect_direction(dir, surf.normal()));
                last_surface = Some(surf.id());
                bounces += 1;
                switched_to_forward = true;
                break;
            }
            _ => {
                points.push(leg.dest);
                accumulated += dist_to_leg;
                current_pos = leg.dest;
                last_surface = leg.surface_id;
                if let Some(normal) = leg.reflect_normal {
                    current_dir = Some(reflect_direction(dir, normal));
                } else {
                    reached_cursor = true;
                }
            }
        }
    }

    if switched_to_forward && obstruction.is_none() {
        loop {
            if bounces >= config.max_bounces || accumulated >= config.exhaustion_limit {
                break;
            }
            let dir = current_dir.unwrap();
            let ray = Ray { origin: current_pos, direction: dir };
            match closest_hit(&ray, scene, last_surface, config.self_hit_epsilon) {
                Some((hit, surf)) => {
                    points.push(hit.point);
                    accumulated += hit.t;
                    if !surf.is_plannable() || !surf.can_reflect_from(dir) {
                        obstruction = Some(surf.id());
                        break;
                    }
                    current_pos = hit.point;
                    current_dir = Some(reflect_direction(dir, surf.normal()));
                    last_surface = Some(surf.id());
                    bounces += 1;
                }
                None => break,
            }
        }
    }

    ActualPathResult { points, reached_cursor, obstruction, terminal_direction: current_dir, last_surface }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bypass::evaluate_bypass;
    use crate::geometry::Segment;
    use crate::planned_path::build_planned_path;

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
    fn unobstructed_path_matches_the_plan_exactly() {
        // Normal points +y; keep player and cursor on that side so the
        // bypass evaluator's player/cursor-side checks both pass.
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(-10.0, 0.0), Vector::new(10.0, 0.0)), plannable: true };
        let plan: Vec<&dyn Surface> = alloc::vec![&wall];
        let scene: Vec<&dyn Surface> = alloc::vec![&wall];
        let player = Vector::new(-3.0, 4.0);
        let cursor = Vector::new(3.0, 4.0);
        let config = Config::default();

        let outcome = evaluate_bypass(player, Some(cursor), &plan, &scene, &config);
        let planned = build_planned_path(player, cursor, &outcome.active);
        let actual = trace_actual_path(player, cursor, planned.targets(), &outcome.active, &scene, &config);

        assert!(actual.reached_cursor);
        assert!(actual.obstruction.is_none());
        assert_eq!(actual.points.len(), planned.points.len());
        for (p, a) in planned.points.iter().zip(actual.points.iter()) {
            assert!((*p - *a).length() < 1e-6);
        }
    }

    #[test]
    fn obstruction_before_a_non_plannable_wall_stops_the_path() {
        let target_wall =
            Wall { id: 1, seg: Segment::new(Vector::new(-10.0, 10.0), Vector::new(10.0, 10.0)), plannable: true };
        let blocker = Wall { id: 2, seg: Segment::new(Vector::new(-1.0, 5.0), Vector::new(1.0, 5.0)), plannable: false };
        let plan: Vec<&dyn Surface> = alloc::vec![&target_wall];
        let scene: Vec<&dyn Surface> = alloc::vec![&target_wall, &blocker];
        let player = Vector::new(0.0, 0.0);
        let cursor = Vector::new(0.0, 20.0);
        let config = Config::default();

        let active = alloc::vec![ActiveSurface { index: 0, surface: &target_wall as &dyn Surface }];
        let planned = build_planned_path(player, cursor, &active);
        let actual = trace_actual_path(player, cursor, planned.targets(), &active, &scene, &config);

        assert_eq!(actual.obstruction, Some(SurfaceId(2)));
        assert!(!actual.reached_cursor);
        assert_eq!(actual.points.len(), 2);
    }
}
