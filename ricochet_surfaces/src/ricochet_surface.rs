use ricochet_core::{Segment, Surface, SurfaceId};
use ricochet_random::Random;
use std::error::Error;

use crate::{segment_from_json, segment_to_json, JsonDes, JsonSer, JsonType};

/// A reflective ("ricochet") segment: the only surface kind that can appear
/// in a plan. Plain data — identity plus endpoints — everything else
/// (normal, reflectivity test) comes from `Surface`'s default methods.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RicochetSurface {
    id: SurfaceId,
    segment: Segment,
}

impl RicochetSurface {
    pub fn new(id: SurfaceId, segment: Segment) -> Self {
        Self { id, segment }
    }

    pub fn with_id(mut self, id: SurfaceId) -> Self {
        self.id = id;
        self
    }
}

impl Surface for RicochetSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }
    fn segment(&self) -> Segment {
        self.segment
    }
    fn is_plannable(&self) -> bool {
        true
    }
}

impl JsonType for RicochetSurface {
    fn json_type() -> String {
        "ricochet".into()
    }
}

impl JsonSer for RicochetSurface {
    fn to_json(&self) -> serde_json::Value {
        segment_to_json(self.segment)
    }
}

impl JsonDes for RicochetSurface {
    /// The JSON object must follow:
    ///
    /// ```json
    /// { "start": [x, y], "end": [x, y] }
    /// ```
    ///
    /// `id` is assigned by the caller (see [`crate::deserialize_scene`]'s use
    /// of [`crate::IdAllocator`]) rather than read from the file, since
    /// scene files don't (and shouldn't) carry surface identity.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        Ok(Self { id: SurfaceId(0), segment: segment_from_json(json)? })
    }
}

impl Random for RicochetSurface {
    fn random(rng: &mut (impl ricochet_random::rand::Rng + ?Sized)) -> Self {
        Self { id: SurfaceId(0), segment: Segment::random(rng) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricochet_core::Vector;

    #[test]
    fn ricochet_surfaces_are_always_plannable() {
        let s = RicochetSurface::new(SurfaceId(3), Segment::new(Vector::new(0.0, 0.0), Vector::new(1.0, 1.0)));
        assert!(s.is_plannable());
    }
}
