//! Random Walk - branching random walks on a fixed canvas
//!
//! Core modules:
//! - `sim`: Deterministic walk generation, marker touches and spawning
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Playback preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration constants
pub mod consts {
    /// Canvas dimensions (logical units, fixed and non-resizable)
    pub const CANVAS_WIDTH: f32 = 950.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Window / document title
    pub const TITLE: &str = "Random Walk";

    /// Points generated per walk
    pub const WALK_STEPS: usize = 2000;
    /// Step distance range (inclusive)
    pub const STEP_MIN: u32 = 5;
    pub const STEP_MAX: u32 = 19;

    /// Walk point footprint radius
    pub const POINT_RADIUS: f32 = 3.0;
    /// Marker footprint radius (twice the walk point radius)
    pub const MARKER_RADIUS: f32 = 2.0 * POINT_RADIUS;
    /// Number of markers placed at start-up
    pub const MARKER_COUNT: usize = 10;

    /// Full playback time of one walk (ms)
    pub const PLAYBACK_DURATION_MS: f64 = 180_000.0;
    /// Time between two revealed points (90 ms)
    pub const STEP_INTERVAL_MS: f64 = PLAYBACK_DURATION_MS / WALK_STEPS as f64;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 64;
}

/// Rectangular area every walk is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT)
    }
}

impl Canvas {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp x to [0, width] and y to [0, height]
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_center() {
        let canvas = Canvas::default();
        assert_eq!(canvas.center(), Vec2::new(475.0, 250.0));
    }

    #[test]
    fn test_canvas_clamp() {
        let canvas = Canvas::default();
        assert_eq!(canvas.clamp(Vec2::new(-17.0, -17.0)), Vec2::ZERO);
        assert_eq!(canvas.clamp(Vec2::new(960.0, 510.0)), Vec2::new(950.0, 500.0));
        assert_eq!(canvas.clamp(Vec2::new(12.5, 40.0)), Vec2::new(12.5, 40.0));
    }

    #[test]
    fn test_step_interval() {
        assert_eq!(consts::STEP_INTERVAL_MS, 90.0);
        assert_eq!(consts::MARKER_RADIUS, 6.0);
    }
}
