//! The visibility propagation pipeline. One stage per active plan surface
//! (plus an initial stage at the player), each trimming the running sector
//! list to the next surface's span, removing whatever the rest of the scene
//! occludes, merging adjacent remainders, building a render-ready polygon
//! per sector, then reflecting the whole sector list through that surface
//! for the next stage.
//!
//! `propagate` takes no cursor: it shares the bypass evaluator with
//! `compute_dual_trajectory`, just without the cursor-side check, since
//! there is no cursor to check a side against here.

use alloc::vec;
use alloc::vec::Vec;

use crate::bypass::evaluate_bypass;
use crate::config::Config;
use crate::dedup::dedup_provenance;
use crate::geometry::{Float, Rect, Vector};
use crate::polygon::build_polygons;
use crate::sector::LightSector;
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub struct PropagationStage {
    pub origin: Vector,
    pub sectors: Vec<LightSector>,
    /// Final, deduplicated polygons, ready to hand to a renderer.
    pub polygons: Vec<Vec<Vector>>,
    /// `None` for the initial stage (at the player, before any bounce);
    /// `Some(index)` for the stage after bouncing off `plan[index]`.
    pub surface_index: Option<usize>,
    pub opacity: Float,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropagationResult {
    pub stages: Vec<PropagationStage>,
    /// Whether at least one stage produced a non-degenerate (>= 3 vertex)
    /// polygon.
    pub valid: bool,
}

pub fn propagate(
    player: Vector,
    plan: &[&dyn Surface],
    scene: &[&dyn Surface],
    bounds: Rect,
    config: &Config,
) -> PropagationResult {
    let outcome = evaluate_bypass(player, None, plan, scene, config);
    let active = outcome.active;
    let n = active.len();

    let mut stages = Vec::with_capacity(n + 1);
    let mut has_valid_polygon = false;

    let initial_sector = LightSector::full(player);
    let initial_polygons = finalize_polygons(build_polygons(&[initial_sector], scene, None, bounds, config));
    has_valid_polygon |= initial_polygons.iter().any(|p| p.len() >= 3);
    stages.push(PropagationStage {
        origin: player,
        sectors: vec![initial_sector],
        polygons: initial_polygons,
        surface_index: None,
        opacity: opacity_for(0, n),
    });

    let mut current_sectors = vec![initial_sector];
    let mut current_origin = player;

    for (position, a) in active.iter().enumerate() {
        let surf = a.surface;

        let window = LightSector::create_from_surface(current_origin, surf);
        let trimmed: Vec<LightSector> = current_sectors.iter().filter_map(|s| s.intersect(&window)).collect();
        if trimmed.is_empty() {
            break;
        }

        let mut blocked = trimmed;
        for obstacle in scene.iter().filter(|o| o.id() != surf.id()) {
            blocked = blocked.iter().flat_map(|s| s.block_by(&obstacle.segment())).collect();
            if blocked.is_empty() {
                break;
            }
        }
        if blocked.is_empty() {
            break;
        }

        let merged = LightSector::merge(blocked);

        let polygons = finalize_polygons(build_polygons(&merged, scene, Some(surf.id()), bounds, config));
        has_valid_polygon |= polygons.iter().any(|p| p.len() >= 3);

        stages.push(PropagationStage {
            origin: current_origin,
            sectors: merged.clone(),
            polygons,
            surface_index: Some(a.index),
            opacity: opacity_for(position + 1, n),
        });

        let reflected: Vec<LightSector> = merged.iter().map(|s| s.reflect(surf)).collect();
        current_origin = crate::geometry::reflect_point(current_origin, surf.segment());
        current_sectors = reflected;
    }

    PropagationResult { stages, valid: has_valid_polygon }
}

fn finalize_polygons(raw: Vec<Vec<crate::provenance::SourcePoint>>) -> Vec<Vec<Vector>> {
    raw.iter().map(|poly| dedup_provenance(poly).iter().map(|sp| sp.compute_xy()).collect()).collect()
}

fn opacity_for(stage_position: usize, n_active: usize) -> Float {
    let total_stages = n_active + 1;
    if total_stages >= 2 {
        0.2 + 0.8 * (stage_position as Float) / ((total_stages - 1) as Float)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stage_with_no_active_plan_is_fully_opaque() {
        let player = Vector::new(0.0, 0.0);
        let bounds = Rect::new(Vector::new(-100.0, -100.0), Vector::new(100.0, 100.0));
        let config = Config::default();
        let result = propagate(player, &[], &[], bounds, &config);
        assert_eq!(result.stages.len(), 1);
        assert_eq!(result.stages[0].opacity, 1.0);
        assert!(result.valid);
    }

    #[test]
    fn opacity_increases_monotonically_across_stages() {
        assert!((opacity_for(0, 2) - 0.2).abs() < 1e-9);
        assert!((opacity_for(1, 2) - 0.6).abs() < 1e-9);
        assert!((opacity_for(2, 2) - 1.0).abs() < 1e-9);
    }
}
