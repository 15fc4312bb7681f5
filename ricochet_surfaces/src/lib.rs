//! Concrete `Surface` implementations plus their JSON (de)serialization.
//! This system only has two surface shapes (reflective and wall), so one
//! crate carries both the shapes and their JSON loader.
//!
//! JSON (de)serialization uses a hand-rolled `JsonType`/`JsonSer`/`JsonDes`
//! trait style rather than `serde` derive, so that each surface kind
//! declares its own `"type"` tag and can be dispatched on dynamically when
//! loading a scene of mixed surface kinds.

mod ricochet_surface;
mod wall_surface;

pub use ricochet_surface::RicochetSurface;
pub use wall_surface::WallSurface;

pub use serde_json;

use ricochet_core::{Segment, Surface, SurfaceId, Vector};
use std::error::Error;

/// A string, unique to the type, found in the `"type"` field of the JSON
/// representation of a dynamically-typed surface.
pub trait JsonType {
    fn json_type() -> String;
}

pub trait JsonSer {
    fn to_json(&self) -> serde_json::Value;
}

pub trait JsonDes {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

pub(crate) fn json_array_to_vector(json: &serde_json::Value) -> Option<Vector> {
    let array = json.as_array()?;
    let [x, y]: &[serde_json::Value; 2] = array.as_slice().try_into().ok()?;
    Some(Vector::new(x.as_f64()?, y.as_f64()?))
}

pub(crate) fn vector_to_json(v: Vector) -> serde_json::Value {
    serde_json::json!([v.x, v.y])
}

pub(crate) fn segment_from_json(json: &serde_json::Value) -> Result<Segment, Box<dyn Error>> {
    let start = json
        .get("start")
        .and_then(json_array_to_vector)
        .ok_or("missing or invalid \"start\"")?;
    let end = json
        .get("end")
        .and_then(json_array_to_vector)
        .ok_or("missing or invalid \"end\"")?;
    Ok(Segment::new(start, end))
}

pub(crate) fn segment_to_json(seg: Segment) -> serde_json::Value {
    serde_json::json!({
        "start": vector_to_json(seg.start),
        "end": vector_to_json(seg.end),
    })
}

/// Deserializes a whole scene: a JSON array of `{"type": ..., "data": ...}`
/// objects, one per surface, dispatching on `"type"` to the matching
/// surface kind's own `JsonDes` impl.
pub fn deserialize_scene(json: &serde_json::Value) -> Result<Vec<Box<dyn Surface>>, Box<dyn Error>> {
    let array = json.as_array().ok_or("scene json must be an array")?;
    let mut ids = IdAllocator::default();
    array.iter().map(|s| deserialize_surface(s, &mut ids)).collect()
}

fn deserialize_surface(json: &serde_json::Value, ids: &mut IdAllocator) -> Result<Box<dyn Surface>, Box<dyn Error>> {
    let kind = json.get("type").and_then(serde_json::Value::as_str).ok_or("missing surface \"type\"")?;
    let data = json.get("data").ok_or("missing surface \"data\"")?;
    let id = ids.next();
    match kind {
        _ if kind == RicochetSurface::json_type() => Ok(Box::new(RicochetSurface::from_json(data)?.with_id(id))),
        _ if kind == WallSurface::json_type() => Ok(Box::new(WallSurface::from_json(data)?.with_id(id))),
        other => Err(format!("unknown surface type: {other}").into()),
    }
}

/// Serializes a scene back into the same `{"type", "data"}`-tagged array
/// format `deserialize_scene` reads. Each surface must know its own
/// `json_type()`/`to_json()`, so callers pass a slice of a sum type (or, in
/// this crate's own tests, one of the two concrete surfaces directly) rather
/// than trait objects — JSON serialization isn't part of the `Surface`
/// capability set itself, only of the concrete surface kinds.
pub fn serialize_surface<T: JsonType + JsonSer>(surface: &T) -> serde_json::Value {
    serde_json::json!({
        "type": T::json_type(),
        "data": surface.to_json(),
    })
}

/// A unique id source for surfaces built up from a scene file or a random
/// generator. Surface identity only needs to be distinct within one scene,
/// so a simple counter is enough.
#[derive(Default)]
pub struct IdAllocator(u64);

impl IdAllocator {
    pub fn next(&mut self) -> SurfaceId {
        let id = SurfaceId(self.0);
        self.0 += 1;
        id
    }
}

/// Builds a random scene of `num_ricochet` reflective surfaces and
/// `num_walls` walls, each a random segment, with sequential ids. Backs
/// seeded-scenario property tests and the `ricochet_demo` random-scene
/// generator mode.
pub fn random_scene(
    rng: &mut (impl ricochet_random::rand::Rng + ?Sized),
    num_ricochet: usize,
    num_walls: usize,
) -> Vec<Box<dyn Surface>> {
    let mut ids = IdAllocator::default();
    let mut scene: Vec<Box<dyn Surface>> = Vec::with_capacity(num_ricochet + num_walls);
    for _ in 0..num_ricochet {
        scene.push(Box::new(RicochetSurface::random(rng).with_id(ids.next())));
    }
    for _ in 0..num_walls {
        scene.push(Box::new(WallSurface::random(rng).with_id(ids.next())));
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_round_trips_through_json() {
        let ricochet = RicochetSurface::new(SurfaceId(0), Segment::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)));
        let wall = WallSurface::new(SurfaceId(1), Segment::new(Vector::new(2.0, 2.0), Vector::new(3.0, 3.0)));

        let json = serde_json::Value::Array(vec![serialize_surface(&ricochet), serialize_surface(&wall)]);
        let scene = deserialize_scene(&json).unwrap();

        assert_eq!(scene.len(), 2);
        assert!(scene[0].is_plannable());
        assert!(!scene[1].is_plannable());
        assert_eq!(scene[0].id(), SurfaceId(0));
        assert_eq!(scene[1].id(), SurfaceId(1));
    }

    #[test]
    fn unknown_surface_type_is_rejected() {
        let json = serde_json::json!([{"type": "mystery", "data": {}}]);
        assert!(deserialize_scene(&json).is_err());
    }
}
