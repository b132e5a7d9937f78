//! Scene assembly
//!
//! Trails and revealed points only ever grow, so they are tessellated once per
//! step event and kept in a cache. Markers and leading points change state and
//! are appended on top when a frame is composed. A frame is only composed after
//! a tick changed something.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Vertex, colors, walk_color};
use crate::Settings;
use crate::consts::POINT_RADIUS;
use crate::sim::{EngineState, Segment, TickReport, WalkStyle};

/// Trail line width in canvas units
pub const TRAIL_WIDTH: f32 = 1.0;
/// Revealed points use fewer segments; there can be thousands of them
const DOT_SEGMENTS: u32 = 6;

/// Cached trail geometry plus a dirty flag
#[derive(Debug, Clone)]
pub struct SceneCache {
    trails: Vec<Vertex>,
    show_points: bool,
    show_leading_point: bool,
    dirty: bool,
}

impl SceneCache {
    /// Tessellate everything already revealed in `state`
    pub fn new(state: &EngineState, settings: &Settings) -> Self {
        let mut cache = Self {
            trails: Vec::new(),
            show_points: settings.show_points,
            show_leading_point: settings.show_leading_point,
            dirty: true,
        };
        for playback in &state.playbacks {
            let style = playback.walk().style;
            cache
                .trails
                .extend(shapes::polyline(playback.revealed(), TRAIL_WIDTH, walk_color(style)));
            for &p in playback.revealed() {
                cache.push_dot(p, style);
            }
        }
        cache
    }

    /// Append the geometry produced by one tick
    pub fn apply(&mut self, state: &EngineState, report: &TickReport) {
        for event in &report.events {
            if let Some(segment) = event.segment {
                self.push_segment(&segment);
            }
            if let Some(style) = state.walk(event.walk_id).map(|w| w.style) {
                self.push_dot(event.point, style);
            }
        }
        // A new walk shows its first point before it advances
        for walk in report.spawned.iter().filter_map(|&id| state.walk(id)) {
            if let Some(&first) = walk.points().first() {
                self.push_dot(first, walk.style);
            }
        }
        if !report.events.is_empty() || !report.spawned.is_empty() {
            self.dirty = true;
        }
    }

    fn push_segment(&mut self, segment: &Segment) {
        self.trails.extend(shapes::line(
            segment.from,
            segment.to,
            TRAIL_WIDTH,
            walk_color(segment.style),
        ));
    }

    fn push_dot(&mut self, p: Vec2, style: WalkStyle) {
        if self.show_points {
            self.trails
                .extend(shapes::circle(p, POINT_RADIUS, walk_color(style), DOT_SEGMENTS));
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next frame to be composed (e.g. after the surface was lost)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Vertices of the next frame, or None when nothing changed since the last one
    pub fn take_frame(&mut self, state: &EngineState) -> Option<Vec<Vertex>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.compose(state))
    }

    /// Cached trails followed by markers and leading points
    pub fn compose(&self, state: &EngineState) -> Vec<Vertex> {
        let mut vertices = self.trails.clone();

        for marker in state.markers.iter() {
            if marker.touched() {
                vertices.extend(shapes::circle(
                    marker.center,
                    marker.radius,
                    colors::MARKER_TOUCHED,
                    CIRCLE_SEGMENTS,
                ));
                vertices.extend(shapes::ring(
                    marker.center,
                    marker.radius,
                    marker.radius + 1.5,
                    colors::MARKER,
                    CIRCLE_SEGMENTS,
                ));
            } else {
                vertices.extend(shapes::circle(
                    marker.center,
                    marker.radius,
                    colors::MARKER,
                    CIRCLE_SEGMENTS,
                ));
            }
        }

        if self.show_leading_point {
            for playback in state.playbacks.iter().filter(|p| !p.is_finished()) {
                if let Some(p) = playback.leading_point() {
                    let color = walk_color(playback.walk().style);
                    vertices.extend(shapes::circle(p, POINT_RADIUS, color, CIRCLE_SEGMENTS));
                }
            }
        }

        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Canvas;
    use crate::sim::{MarkerSet, Walk, tick};

    fn state() -> EngineState {
        let markers = MarkerSet::from_centers([Vec2::new(20.0, 10.0), Vec2::new(400.0, 400.0)]);
        let points = vec![Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)];
        let walk = Walk::from_points(1, WalkStyle::Initial, points[0], points);
        EngineState::with_initial_walk(1, Canvas::default(), markers, walk)
    }

    fn bare() -> Settings {
        Settings {
            show_points: false,
            show_leading_point: false,
            ..Settings::default()
        }
    }

    fn count(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_markers_only_at_start() {
        let state = state();
        let vertices = SceneCache::new(&state, &bare()).compose(&state);
        assert_eq!(vertices.len(), 2 * (CIRCLE_SEGMENTS * 3) as usize);
        assert!(vertices.iter().all(|v| v.color == colors::MARKER));
    }

    #[test]
    fn test_no_frame_without_tick() {
        let mut state = state();
        let mut scene = SceneCache::new(&state, &bare());
        assert!(scene.take_frame(&state).is_some());
        assert!(scene.take_frame(&state).is_none());

        scene.apply(&state, &TickReport::default());
        assert!(!scene.is_dirty());
        assert!(scene.take_frame(&state).is_none());

        let report = tick(&mut state);
        scene.apply(&state, &report);
        assert!(scene.take_frame(&state).is_some());
        assert!(scene.take_frame(&state).is_none());
    }

    #[test]
    fn test_mark_dirty_forces_frame() {
        let state = state();
        let mut scene = SceneCache::new(&state, &bare());
        let _ = scene.take_frame(&state);
        scene.mark_dirty();
        assert!(scene.take_frame(&state).is_some());
    }

    #[test]
    fn test_trail_grows_with_step_segments() {
        let mut state = state();
        let mut scene = SceneCache::new(&state, &bare());
        let report = tick(&mut state);
        scene.apply(&state, &report);
        let vertices = scene.compose(&state);
        assert_eq!(count(&vertices, colors::INITIAL_WALK), 6);
    }

    #[test]
    fn test_incremental_trail_matches_rebuild() {
        let markers = MarkerSet::from_centers([Vec2::ZERO; 0]);
        let points: Vec<Vec2> = [(10.0, 10.0), (15.0, 10.0), (15.0, 10.0), (20.0, 15.0), (5.0, 0.0)]
            .iter()
            .map(|&(x, y)| Vec2::new(x, y))
            .collect();
        let walk = Walk::from_points(1, WalkStyle::Initial, points[0], points);
        let mut state = EngineState::with_initial_walk(1, Canvas::default(), markers, walk);

        let mut scene = SceneCache::new(&state, &bare());
        while !state.is_finished() {
            let report = tick(&mut state);
            scene.apply(&state, &report);
        }
        let rebuilt = SceneCache::new(&state, &bare());
        assert_eq!(scene.compose(&state), rebuilt.compose(&state));
    }

    #[test]
    fn test_touched_marker_turns_red() {
        let mut state = state();
        let mut scene = SceneCache::new(&state, &bare());
        for _ in 0..2 {
            let report = tick(&mut state);
            scene.apply(&state, &report);
        }
        assert_eq!(state.markers.touched_count(), 1);
        let vertices = scene.compose(&state);
        assert!(count(&vertices, colors::MARKER_TOUCHED) > 0);
    }

    #[test]
    fn test_points_and_leading_point() {
        let state = state();
        let vertices = SceneCache::new(&state, &Settings::default()).compose(&state);
        // One revealed dot plus the leading point
        assert_eq!(
            count(&vertices, colors::INITIAL_WALK),
            (DOT_SEGMENTS * 3 + CIRCLE_SEGMENTS * 3) as usize
        );
    }

    #[test]
    fn test_spawned_walk_first_point_gets_a_dot() {
        let mut state = state();
        let settings = Settings {
            show_leading_point: false,
            ..Settings::default()
        };
        let mut scene = SceneCache::new(&state, &settings);
        for _ in 0..2 {
            let report = tick(&mut state);
            scene.apply(&state, &report);
        }
        assert_eq!(state.walks_created(), 2);
        // Cached trails hold no markers, so red here can only be walk #2
        assert_eq!(
            count(&scene.trails, colors::SPAWNED_WALK),
            (DOT_SEGMENTS * 3) as usize
        );
    }
}
