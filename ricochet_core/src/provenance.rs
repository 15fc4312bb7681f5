//! Provenance tags carried by visibility-polygon vertices, so the dedup
//! pass (component J) can tell a genuine shared corner apart from two
//! independent hits that merely landed on the same pixel.

use crate::geometry::Float;
use crate::surface::SurfaceId;
use crate::geometry::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentEnd {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourcePoint {
    /// The sector's own vantage point.
    OriginPoint { position: Vector },
    /// A literal endpoint of some surface.
    Endpoint { position: Vector, surface: SurfaceId, end: SegmentEnd },
    /// A point where two active-plan surfaces meet (a shared vertex seen
    /// from both sides at once).
    JunctionPoint { position: Vector, before: SurfaceId, after: SurfaceId },
    /// A ray/obstacle intersection at neither endpoint. `hit_surface` is
    /// `None` for a screen-bound hit (there is no surface to name).
    HitPoint { position: Vector, ray_origin: Vector, hit_surface: Option<SurfaceId>, s: Float, t: Float },
}

impl SourcePoint {
    pub fn compute_xy(&self) -> Vector {
        match *self {
            SourcePoint::OriginPoint { position } => position,
            SourcePoint::Endpoint { position, .. } => position,
            SourcePoint::JunctionPoint { position, .. } => position,
            SourcePoint::HitPoint { position, .. } => position,
        }
    }

    /// The surface identity used to detect a run of consecutive hits on the
    /// same surface. `None` for the origin and for screen-bound hits —
    /// both always break a run.
    pub fn surface_identity(&self) -> Option<SurfaceId> {
        match *self {
            SourcePoint::OriginPoint { .. } => None,
            SourcePoint::Endpoint { surface, .. } => Some(surface),
            SourcePoint::JunctionPoint { after, .. } => Some(after),
            SourcePoint::HitPoint { hit_surface, .. } => hit_surface,
        }
    }
}
