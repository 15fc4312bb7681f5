//! Shared continuation tracer used by both planned and actual ghosts
//! (component G): keep ray-marching with reflections past a path's
//! terminal point until exhaustion, the bounce cap, or a non-reflective
//! hit.

use alloc::vec::Vec;

use crate::config::Config;
use crate::geometry::{reflect_direction, Ray, Vector};
use crate::scene::closest_hit;
use crate::surface::{Surface, SurfaceId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostPoint {
    pub position: Vector,
    pub surface_id: Option<SurfaceId>,
    /// True when the ghost stopped because it hit a surface it cannot pass
    /// through (a wall); false when it simply ran out of budget.
    pub will_stick: bool,
}

pub fn build_ghost(
    mut origin: Vector,
    mut direction: Vector,
    scene: &[&dyn Surface],
    exclude: Option<SurfaceId>,
    config: &Config,
) -> Vec<GhostPoint> {
    let mut ghost = Vec::new();
    let mut last_surface = exclude;
    let mut accumulated = 0.0;
    let mut bounces = 0usize;

    loop {
        if bounces >= config.max_bounces || accumulated >= config.exhaustion_limit {
            let remaining = (config.exhaustion_limit - accumulated).max(0.0);
            ghost.push(GhostPoint {
                position: origin + direction.scale(remaining),
                surface_id: None,
                will_stick: false,
            });
            break;
        }

        let ray = Ray { origin, direction };
        match closest_hit(&ray, scene, last_surface, config.self_hit_epsilon) {
            Some((hit, surf)) if accumulated + hit.t <= config.exhaustion_limit => {
                accumulated += hit.t;
                if !surf.is_plannable() || !surf.can_reflect_from(direction) {
                    ghost.push(GhostPoint { position: hit.point, surface_id: Some(surf.id()), will_stick: true });
                    break;
                }
                ghost.push(GhostPoint { position: hit.point, surface_id: Some(surf.id()), will_stick: false });
                direction = reflect_direction(direction, surf.normal());
                origin = hit.point;
                last_surface = Some(surf.id());
                bounces += 1;
            }
            _ => {
                let remaining = (config.exhaustion_limit - accumulated).max(0.0);
                ghost.push(GhostPoint {
                    position: origin + direction.scale(remaining),
                    surface_id: None,
                    will_stick: false,
                });
                break;
            }
        }
    }

    ghost
}
