//! Walk generation
//!
//! A walk is 2000 points computed eagerly from a start point. Each point is
//! one compass step away from the previous one, clamped to the canvas.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Canvas;
use crate::consts::{STEP_MAX, STEP_MIN, WALK_STEPS};

/// The eight compass directions a step can take (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Per-axis unit offsets. Diagonals are not normalized.
    pub const fn unit(self) -> (f32, f32) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::NorthEast => (1.0, -1.0),
            Direction::East => (1.0, 0.0),
            Direction::SouthEast => (1.0, 1.0),
            Direction::South => (0.0, 1.0),
            Direction::SouthWest => (-1.0, 1.0),
            Direction::West => (-1.0, 0.0),
            Direction::NorthWest => (-1.0, -1.0),
        }
    }

    /// Offset for a step of `distance` in this direction
    pub fn offset(self, distance: u32) -> Vec2 {
        let (dx, dy) = self.unit();
        Vec2::new(dx, dy) * distance as f32
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.unit();
        dx != 0.0 && dy != 0.0
    }

    /// Uniformly pick one of the eight directions
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Uniformly pick a step distance in [STEP_MIN, STEP_MAX]
pub fn sample_distance<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(STEP_MIN..=STEP_MAX)
}

/// Unclamped position after one step
#[inline]
pub fn raw_step(current: Vec2, direction: Direction, distance: u32) -> Vec2 {
    current + direction.offset(distance)
}

/// Position after one step, clamped to the canvas
#[inline]
pub fn next_point(current: Vec2, direction: Direction, distance: u32, canvas: &Canvas) -> Vec2 {
    canvas.clamp(raw_step(current, direction, distance))
}

/// Visual tag distinguishing the first walk from the ones spawned by markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkStyle {
    Initial,
    Spawned,
}

/// An immutable, fully generated walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walk {
    pub id: u32,
    pub style: WalkStyle,
    /// Where the walk started (not part of `points`)
    pub origin: Vec2,
    points: Vec<Vec2>,
}

impl Walk {
    /// Generate a walk of `WALK_STEPS` points starting from `origin`
    pub fn generate<R: Rng>(
        id: u32,
        style: WalkStyle,
        origin: Vec2,
        canvas: &Canvas,
        rng: &mut R,
    ) -> Self {
        Self::generate_with_len(id, style, origin, canvas, WALK_STEPS, rng)
    }

    pub fn generate_with_len<R: Rng>(
        id: u32,
        style: WalkStyle,
        origin: Vec2,
        canvas: &Canvas,
        len: usize,
        rng: &mut R,
    ) -> Self {
        let mut points = Vec::with_capacity(len);
        let mut current = origin;
        for _ in 0..len {
            let direction = Direction::sample(rng);
            let distance = sample_distance(rng);
            current = next_point(current, direction, distance, canvas);
            points.push(current);
        }

        log::debug!(
            "Generated {:?} walk #{} from ({:.1}, {:.1})",
            style,
            id,
            origin.x,
            origin.y
        );

        Self {
            id,
            style,
            origin,
            points,
        }
    }

    /// Build a walk from explicit points (used for scripted scenarios)
    pub fn from_points(id: u32, style: WalkStyle, origin: Vec2, points: Vec<Vec2>) -> Self {
        Self {
            id,
            style,
            origin,
            points,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
