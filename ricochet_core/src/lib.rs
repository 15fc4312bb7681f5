//! Geometric core for a 2D ricochet aiming/visibility assistant.
//!
//! This crate owns no window, no input, and no level data. It is pure
//! geometry: given a player position, a cursor position, an ordered list of
//! surfaces the player intends to bounce off (the "plan"), and the full
//! scene, it computes where a planned shot actually goes, whether physics
//! agrees with the plan, and how far light reaches through the scene after
//! each bounce. Everything here is synchronous and allocates only through
//! `Vec` — no threads, no interior mutability, no globals.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
pub mod geometry;
pub mod surface;
pub mod scene;
pub mod bypass;
pub mod planned_path;
pub mod actual_path;
pub mod ghost;
pub mod alignment;
pub mod sector;
pub mod provenance;
pub mod polygon;
pub mod dedup;
pub mod propagation;
pub mod trajectory;
pub mod render;

pub use config::Config;
pub use geometry::{Float, Ray, Rect, Segment, Vector};
pub use surface::{Surface, SurfaceId};
pub use bypass::{BypassOutcome, BypassReason, BypassRecord};
pub use alignment::AlignmentResult;
pub use sector::LightSector;
pub use provenance::SourcePoint;
pub use propagation::{propagate, PropagationResult, PropagationStage};
pub use trajectory::{compute_dual_trajectory, DualTrajectory, GhostPoint, PathOutput};
pub use render::SegmentColor;

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn sqrt(x: Float) -> Float {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(x: Float) -> Float {
    x.sqrt()
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("ricochet_core requires the \"std\" or \"libm\" feature");
