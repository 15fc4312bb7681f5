use ricochet_core::{Segment, Surface, SurfaceId};
use ricochet_random::Random;
use std::error::Error;

use crate::{segment_from_json, segment_to_json, JsonDes, JsonSer, JsonType};

/// A non-reflective segment: blocks rays and visibility but can never appear
/// in a plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSurface {
    id: SurfaceId,
    segment: Segment,
}

impl WallSurface {
    pub fn new(id: SurfaceId, segment: Segment) -> Self {
        Self { id, segment }
    }

    pub fn with_id(mut self, id: SurfaceId) -> Self {
        self.id = id;
        self
    }
}

impl Surface for WallSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }
    fn segment(&self) -> Segment {
        self.segment
    }
    fn is_plannable(&self) -> bool {
        false
    }
}

impl JsonType for WallSurface {
    fn json_type() -> String {
        "wall".into()
    }
}

impl JsonSer for WallSurface {
    fn to_json(&self) -> serde_json::Value {
        segment_to_json(self.segment)
    }
}

impl JsonDes for WallSurface {
    /// Same `{ "start": [x, y], "end": [x, y] }` layout as
    /// [`crate::RicochetSurface`]; `id` is assigned by the caller.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        Ok(Self { id: SurfaceId(0), segment: segment_from_json(json)? })
    }
}

impl Random for WallSurface {
    fn random(rng: &mut (impl ricochet_random::rand::Rng + ?Sized)) -> Self {
        Self { id: SurfaceId(0), segment: Segment::random(rng) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricochet_core::Vector;

    #[test]
    fn wall_surfaces_are_never_plannable() {
        let s = WallSurface::new(SurfaceId(4), Segment::new(Vector::new(0.0, 0.0), Vector::new(1.0, 1.0)));
        assert!(!s.is_plannable());
    }
}
