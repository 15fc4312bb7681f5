//! Construction-time configuration. Every entry point takes `&Config`
//! explicitly rather than reading a global, so two callers in the same
//! process can use different tolerances without stepping on each other.

use crate::geometry::{Rect, Vector};
use crate::geometry::Float;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Total accumulated path length, across every bounce, before a trace
    /// gives up and is treated as exhausted.
    pub exhaustion_limit: Float,
    /// Maximum number of reflections a single trace (actual path or ghost)
    /// may take before it is cut off.
    pub max_bounces: usize,
    /// Ray-march self-hit guard: hits at or before this ray parameter are
    /// ignored so a ray doesn't immediately re-hit the surface it just left.
    pub self_hit_epsilon: Float,
    /// Screen-space distance below which adjacent visibility-polygon
    /// vertices are collapsed into one, purely for render quality.
    pub visual_dedup_epsilon: Float,
    /// Screen-space distance below which two points are considered the same
    /// point for alignment purposes.
    pub pixel_tolerance: Float,
    /// Minimum dot product between two unit directions for them to be
    /// considered "the same direction" during alignment.
    pub direction_alignment_threshold: Float,
    /// The visible screen area; visibility polygons never extend past it.
    pub screen_bounds: Rect,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exhaustion_limit: 10_000.0,
            max_bounces: 50,
            self_hit_epsilon: 1e-3,
            visual_dedup_epsilon: 0.5,
            pixel_tolerance: 1e-3,
            direction_alignment_threshold: 0.99,
            screen_bounds: Rect::new(Vector::new(0.0, 0.0), Vector::new(1920.0, 1080.0)),
        }
    }
}
