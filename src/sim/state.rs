//! Engine state and playback types
//!
//! Everything the driver needs to advance walks lives here. The engine owns
//! the marker set, every walk created so far and a FIFO of pending spawns.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::marker::MarkerSet;
use super::walk::{Walk, WalkStyle};
use crate::Canvas;
use crate::consts::POINT_RADIUS;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// A trail line from the previous rendered coordinate to the new one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub style: WalkStyle,
}

/// What happened when a walk advanced by one point
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent {
    pub walk_id: u32,
    /// Index of the new leading point
    pub step: usize,
    pub point: Vec2,
    /// Markers touched for the first time by this step
    pub touched: Vec<usize>,
    /// Trail line to draw, absent when the point did not move
    pub segment: Option<Segment>,
}

/// Request to start a walk from a just-touched marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnCommand {
    pub marker: usize,
    pub origin: Vec2,
    /// Walk whose leading point touched the marker
    pub parent: u32,
}

/// Record of a spawn that happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRecord {
    pub walk_id: u32,
    pub parent: u32,
    pub marker: usize,
    pub tick: u64,
}

/// Stepper revealing one walk point by point
#[derive(Debug, Clone)]
pub struct Playback {
    walk: Walk,
    cursor: usize,
    last_rendered: Vec2,
}

impl Playback {
    pub fn new(walk: Walk) -> Self {
        let last_rendered = walk.points().first().copied().unwrap_or(walk.origin);
        Self {
            walk,
            cursor: 0,
            last_rendered,
        }
    }

    #[inline]
    pub fn walk(&self) -> &Walk {
        &self.walk
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Point currently being animated
    pub fn leading_point(&self) -> Option<Vec2> {
        self.walk.points().get(self.cursor).copied()
    }

    /// Points revealed so far, leading point included
    pub fn revealed(&self) -> &[Vec2] {
        let points = self.walk.points();
        if points.is_empty() {
            points
        } else {
            &points[..=self.cursor]
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor + 1 >= self.walk.len()
    }

    /// Move the leading point forward and test it against the markers.
    ///
    /// Returns None once the walk is exhausted.
    pub fn advance(&mut self, markers: &mut MarkerSet) -> Option<StepEvent> {
        if self.is_finished() {
            return None;
        }
        self.cursor += 1;
        let point = self.walk.points()[self.cursor];

        let touched = markers.touch_overlapping(point, POINT_RADIUS);

        let segment = if point != self.last_rendered {
            let segment = Segment {
                from: self.last_rendered,
                to: point,
                style: self.walk.style,
            };
            self.last_rendered = point;
            Some(segment)
        } else {
            None
        };

        Some(StepEvent {
            walk_id: self.walk.id,
            step: self.cursor,
            point,
            touched,
            segment,
        })
    }
}

/// Summary of a finished (or in-progress) run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub walks_created: usize,
    pub markers_touched: usize,
    pub spawns: Vec<SpawnRecord>,
}

/// The walk engine: markers, walks and the spawn queue
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub canvas: Canvas,
    pub markers: MarkerSet,
    /// One playback per walk ever created, in creation order
    pub playbacks: Vec<Playback>,
    /// Spawns waiting to be generated
    pub pending: VecDeque<SpawnCommand>,
    pub spawn_log: Vec<SpawnRecord>,
    /// Driver tick counter
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl EngineState {
    /// Create an engine on the default canvas with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_canvas(seed, Canvas::default())
    }

    /// Place random markers, then start the initial walk at the canvas center
    pub fn with_canvas(seed: u64, canvas: Canvas) -> Self {
        let mut rng = RngState::new(seed).to_rng();
        let markers = MarkerSet::place(&mut rng, &canvas);
        let mut state = Self::empty(seed, canvas, markers, rng);
        state.spawn_walk(canvas.center(), WalkStyle::Initial);
        state
    }

    /// Start the initial walk at the canvas center with the given markers
    pub fn with_markers(seed: u64, canvas: Canvas, markers: MarkerSet) -> Self {
        let rng = RngState::new(seed).to_rng();
        let mut state = Self::empty(seed, canvas, markers, rng);
        state.spawn_walk(canvas.center(), WalkStyle::Initial);
        state
    }

    /// Use a prebuilt initial walk. Spawned walks are still generated from `seed`.
    pub fn with_initial_walk(seed: u64, canvas: Canvas, markers: MarkerSet, initial: Walk) -> Self {
        let rng = RngState::new(seed).to_rng();
        let mut state = Self::empty(seed, canvas, markers, rng);
        state.next_id = initial.id + 1;
        state.playbacks.push(Playback::new(initial));
        state
    }

    fn empty(seed: u64, canvas: Canvas, markers: MarkerSet, rng: Pcg32) -> Self {
        Self {
            seed,
            canvas,
            markers,
            playbacks: Vec::new(),
            pending: VecDeque::new(),
            spawn_log: Vec::new(),
            time_ticks: 0,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new walk ID
    fn next_walk_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Generate a walk from `origin` and start its playback. Returns its ID.
    pub fn spawn_walk(&mut self, origin: Vec2, style: WalkStyle) -> u32 {
        let id = self.next_walk_id();
        let walk = Walk::generate(id, style, origin, &self.canvas, &mut self.rng);
        self.playbacks.push(Playback::new(walk));
        id
    }

    /// Generate every queued spawn in FIFO order. Returns the new walk IDs.
    pub fn process_spawns(&mut self) -> Vec<u32> {
        let mut spawned = Vec::with_capacity(self.pending.len());
        while let Some(cmd) = self.pending.pop_front() {
            let id = self.spawn_walk(cmd.origin, WalkStyle::Spawned);
            log::info!(
                "Walk #{} touched marker {} at ({:.1}, {:.1}); spawned walk #{}",
                cmd.parent,
                cmd.marker,
                cmd.origin.x,
                cmd.origin.y,
                id
            );
            self.spawn_log.push(SpawnRecord {
                walk_id: id,
                parent: cmd.parent,
                marker: cmd.marker,
                tick: self.time_ticks,
            });
            spawned.push(id);
        }
        spawned
    }

    pub fn walks_created(&self) -> usize {
        self.playbacks.len()
    }

    pub fn walk(&self, id: u32) -> Option<&Walk> {
        self.playbacks
            .iter()
            .map(Playback::walk)
            .find(|w| w.id == id)
    }

    /// True when every walk has played out and nothing is queued
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.playbacks.iter().all(Playback::is_finished)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            ticks: self.time_ticks,
            walks_created: self.walks_created(),
            markers_touched: self.markers.touched_count(),
            spawns: self.spawn_log.clone(),
        }
    }
}
