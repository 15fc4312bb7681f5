//! The `compute_dual_trajectory` entry point: wires the bypass evaluator,
//! the planned-path constructor, the physical tracer, the alignment
//! comparator, and ghost construction into one canonical pipeline.

use alloc::vec::Vec;

use crate::actual_path::trace_actual_path;
use crate::alignment::{compute_alignment, AlignmentResult};
use crate::bypass::{evaluate_bypass, BypassRecord};
use crate::config::Config;
use crate::geometry::Vector;
use crate::ghost::build_ghost;
pub use crate::ghost::GhostPoint;
use crate::planned_path::build_planned_path;
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub struct PathOutput {
    pub points: Vec<Vector>,
    pub ghost: Vec<GhostPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DualTrajectory {
    pub planned: PathOutput,
    pub actual: PathOutput,
    pub alignment: AlignmentResult,
    /// Whether the planned path reaches the cursor *and* the actual path
    /// reproduces it exactly — i.e. the shot, as aimed, is truly makeable.
    pub cursor_reachable: bool,
    pub bypassed: Vec<BypassRecord>,
}

pub fn compute_dual_trajectory(
    player: Vector,
    cursor: Vector,
    plan: &[&dyn Surface],
    scene: &[&dyn Surface],
    config: &Config,
) -> DualTrajectory {
    let outcome = evaluate_bypass(player, Some(cursor), plan, scene, config);
    let planned = build_planned_path(player, cursor, &outcome.active);
    let targets = planned.targets();
    let actual = trace_actual_path(player, cursor, targets, &outcome.active, scene, config);

    let planned_last_point = *planned.points.get(planned.points.len().wrapping_sub(2)).unwrap_or(&player);
    let planned_last_dir = (cursor - planned_last_point).normalized().unwrap_or(Vector::new(1.0, 0.0));
    let planned_ghost = build_ghost(cursor, planned_last_dir, scene, None, config);

    let actual_ghost = if actual.obstruction.is_some() {
        Vec::new()
    } else if let (Some(terminal), Some(dir)) = (actual.points.last().copied(), actual.terminal_direction) {
        build_ghost(terminal, dir, scene, actual.last_surface, config)
    } else {
        Vec::new()
    };

    let alignment = compute_alignment(&planned.points, &actual.points, actual.reached_cursor, config);
    let cursor_reachable = alignment.fully_aligned;

    DualTrajectory {
        planned: PathOutput { points: planned.points, ghost: planned_ghost },
        actual: PathOutput { points: actual.points, ghost: actual_ghost },
        alignment,
        cursor_reachable,
        bypassed: outcome.bypassed,
    }
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
        fn id(&self) -> crate::surface::SurfaceId {
            crate::surface::SurfaceId(self.id)
        }
        fn segment(&self) -> Segment {
            self.seg
        }
        fn is_plannable(&self) -> bool {
            self.plannable
        }
    }

    #[test]
    fn direct_shot_with_no_plan_is_cursor_reachable() {
        let player = Vector::new(0.0, 0.0);
        let cursor = Vector::new(10.0, 0.0);
        let config = Config::default();
        let dual = compute_dual_trajectory(player, cursor, &[], &[], &config);
        assert!(dual.cursor_reachable);
        assert!(dual.bypassed.is_empty());
        assert_eq!(dual.planned.points, dual.actual.points);
    }

    #[test]
    fn blocked_direct_shot_is_not_cursor_reachable() {
        let wall = Wall { id: 1, seg: Segment::new(Vector::new(5.0, -5.0), Vector::new(5.0, 5.0)), plannable: false };
        let scene: Vec<&dyn Surface> = alloc::vec![&wall];
        let player = Vector::new(0.0, 0.0);
        let cursor = Vector::new(10.0, 0.0);
        let config = Config::default();
        let dual = compute_dual_trajectory(player, cursor, &[], &scene, &config);
        assert!(!dual.cursor_reachable);
        assert_eq!(dual.actual.points.len(), 2);
    }
}
