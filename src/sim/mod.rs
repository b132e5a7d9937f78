//! Deterministic walk simulation
//!
//! All walk logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by walk creation)
//! - No rendering or platform dependencies

pub mod collision;
pub mod marker;
pub mod state;
pub mod tick;
pub mod walk;

pub use collision::circles_overlap;
pub use marker::{Marker, MarkerSet};
pub use state::{
    EngineState, Playback, RngState, RunSummary, Segment, SpawnCommand, SpawnRecord, StepEvent,
};
pub use tick::{TickReport, run_to_completion, tick};
pub use walk::{Direction, Walk, WalkStyle, next_point, raw_step};
