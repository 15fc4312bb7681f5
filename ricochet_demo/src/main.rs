//! A tiny scene runner with no windowing of its own: it loads or generates
//! a scene, calls `compute_dual_trajectory`/`propagate`, and prints a
//! summary. Drawing the result is an external renderer's job.
//!
//! Two subcommands:
//!
//! - `ricochet_demo run <scene.json>` loads a scene and prints the dual
//!   trajectory and visibility-propagation summary for it.
//! - `ricochet_demo gen <out.json> [num_ricochet] [num_walls]` writes a
//!   random scene (plus a player, cursor, and plan) to a file, the same
//!   shape `run` expects.

use std::{env, error::Error, fs::File};

use ricochet_core::{compute_dual_trajectory, propagate, Config, Surface, Vector};
use ricochet_surfaces::{deserialize_scene, serde_json};

fn vector_from_json(json: &serde_json::Value, field: &str) -> Result<Vector, Box<dyn Error>> {
    let array = json
        .get(field)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| format!("missing or invalid \"{field}\""))?;
    let [x, y]: &[serde_json::Value; 2] =
        array.as_slice().try_into().map_err(|_| format!("\"{field}\" must have exactly 2 elements"))?;
    Ok(Vector::new(
        x.as_f64().ok_or("coordinate must be a number")?,
        y.as_f64().ok_or("coordinate must be a number")?,
    ))
}

fn load_scene(json: &serde_json::Value) -> Result<(Vector, Vector, Vec<Box<dyn Surface>>, Vec<usize>), Box<dyn Error>> {
    let player = vector_from_json(json, "player")?;
    let cursor = vector_from_json(json, "cursor")?;
    let scene = deserialize_scene(json.get("scene").ok_or("missing \"scene\"")?)?;
    let plan: Vec<usize> = json
        .get("plan")
        .and_then(serde_json::Value::as_array)
        .ok_or("missing \"plan\"")?
        .iter()
        .map(|v| v.as_u64().map(|n| n as usize).ok_or_else(|| "plan entries must be scene indices".into()))
        .collect::<Result<_, Box<dyn Error>>>()?;
    for &index in &plan {
        if index >= scene.len() {
            return Err(format!("plan index {index} out of bounds for a scene of {} surfaces", scene.len()).into());
        }
    }
    Ok((player, cursor, scene, plan))
}

fn run(path: &str) -> Result<(), Box<dyn Error>> {
    let json: serde_json::Value = serde_json::from_reader(File::open(path)?)?;
    let (player, cursor, scene, plan_indices) = load_scene(&json)?;

    let scene_refs: Vec<&dyn Surface> = scene.iter().map(|s| s.as_ref()).collect();
    let plan_refs: Vec<&dyn Surface> = plan_indices.iter().map(|&i| scene[i].as_ref()).collect();
    let config = Config::default();

    let dual = compute_dual_trajectory(player, cursor, &plan_refs, &scene_refs, &config);
    println!("planned path ({} points):", dual.planned.points.len());
    for p in &dual.planned.points {
        println!("  ({:.2}, {:.2})", p.x, p.y);
    }
    println!("actual path ({} points):", dual.actual.points.len());
    for p in &dual.actual.points {
        println!("  ({:.2}, {:.2})", p.x, p.y);
    }
    println!(
        "fully_aligned={} aligned_segments={} cursor_reachable={}",
        dual.alignment.fully_aligned, dual.alignment.aligned_segment_count, dual.cursor_reachable
    );
    if !dual.bypassed.is_empty() {
        println!("bypassed:");
        for b in &dual.bypassed {
            println!("  plan[{}] surface {:?}: {:?}", b.index, b.surface_id, b.reason);
        }
    }

    let result = propagate(player, &plan_refs, &scene_refs, config.screen_bounds, &config);
    println!(
        "propagation: {} stages, valid={}",
        result.stages.len(),
        result.valid
    );
    for stage in &result.stages {
        let vertex_count: usize = stage.polygons.iter().map(Vec::len).sum();
        println!(
            "  stage surface_index={:?} opacity={:.2} polygons={} vertices={}",
            stage.surface_index,
            stage.opacity,
            stage.polygons.len(),
            vertex_count
        );
    }

    Ok(())
}

fn generate(path: &str, num_ricochet: usize, num_walls: usize) -> Result<(), Box<dyn Error>> {
    let mut rng = ricochet_random::rand::thread_rng();
    let scene = ricochet_surfaces::random_scene(&mut rng, num_ricochet, num_walls);

    let player = Vector::new(0.0, 0.0);
    let cursor = Vector::new(400.0, 0.0);

    // A plan over the first couple of plannable surfaces generated, in scene
    // order; the bypass evaluator is perfectly happy to bypass all of them
    // if the randomly drawn geometry doesn't line up.
    let plan: Vec<usize> = scene
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_plannable())
        .take(2)
        .map(|(i, _)| i)
        .collect();

    let scene_json: Vec<serde_json::Value> = scene
        .iter()
        .map(|s| {
            if s.is_plannable() {
                ricochet_surfaces::serialize_surface(&ricochet_surfaces::RicochetSurface::new(s.id(), s.segment()))
            } else {
                ricochet_surfaces::serialize_surface(&ricochet_surfaces::WallSurface::new(s.id(), s.segment()))
            }
        })
        .collect();

    let json = serde_json::json!({
        "player": [player.x, player.y],
        "cursor": [cursor.x, cursor.y],
        "scene": scene_json,
        "plan": plan,
    });

    serde_json::to_writer_pretty(File::create(path)?, &json)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().ok_or("expected a subcommand: \"run\" or \"gen\"")?;

    match command.as_str() {
        "run" => {
            let path = args.next().ok_or("expected a scene json path")?;
            run(&path)
        }
        "gen" => {
            let path = args.next().ok_or("expected an output json path")?;
            let num_ricochet = args.next().and_then(|a| a.parse().ok()).unwrap_or(6);
            let num_walls = args.next().and_then(|a| a.parse().ok()).unwrap_or(6);
            generate(&path, num_ricochet, num_walls)
        }
        other => Err(format!("unknown subcommand: {other} (expected \"run\" or \"gen\")").into()),
    }
}
