//! Target markers
//!
//! Ten fixed circles placed once at start-up. The first time any walk's
//! leading point overlaps a marker, the marker is marked touched and a new
//! walk spawns from its center.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use crate::Canvas;
use crate::consts::{MARKER_COUNT, MARKER_RADIUS};

/// A circular target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub center: Vec2,
    pub radius: f32,
    touched: bool,
}

impl Marker {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: MARKER_RADIUS,
            touched: false,
        }
    }

    #[inline]
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Whether a point footprint overlaps this marker
    #[inline]
    pub fn overlaps(&self, point: Vec2, point_radius: f32) -> bool {
        circles_overlap(point, point_radius, self.center, self.radius)
    }
}

/// Fixed-size collection of markers, never resized after placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    /// Place `MARKER_COUNT` markers uniformly at random in [0, W) x [0, H)
    pub fn place<R: Rng>(rng: &mut R, canvas: &Canvas) -> Self {
        Self::place_n(rng, canvas, MARKER_COUNT)
    }

    /// Place `count` markers. Overlapping markers are allowed.
    pub fn place_n<R: Rng>(rng: &mut R, canvas: &Canvas, count: usize) -> Self {
        let markers = (0..count)
            .map(|_| {
                let x = if canvas.width > 0.0 {
                    rng.random_range(0.0..canvas.width)
                } else {
                    0.0
                };
                let y = if canvas.height > 0.0 {
                    rng.random_range(0.0..canvas.height)
                } else {
                    0.0
                };
                Marker::new(Vec2::new(x, y))
            })
            .collect();
        Self { markers }
    }

    /// Build a set from explicit centers
    pub fn from_centers(centers: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            markers: centers.into_iter().map(Marker::new).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn touched_count(&self) -> usize {
        self.markers.iter().filter(|m| m.touched).count()
    }

    pub fn all_touched(&self) -> bool {
        self.markers.iter().all(|m| m.touched)
    }

    /// Mark a marker touched.
    ///
    /// Returns true only on the first touch, which is when a spawn must occur.
    /// Out-of-range indices and already touched markers return false.
    pub fn try_touch(&mut self, index: usize) -> bool {
        match self.markers.get_mut(index) {
            Some(marker) if !marker.touched => {
                marker.touched = true;
                true
            }
            _ => false,
        }
    }

    /// Touch every untouched marker overlapped by the given footprint.
    ///
    /// Returns the indices that flipped to touched, in marker order.
    pub fn touch_overlapping(&mut self, point: Vec2, point_radius: f32) -> Vec<usize> {
        let hits: Vec<usize> = self
            .markers
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.touched && m.overlaps(point, point_radius))
            .map(|(i, _)| i)
            .collect();
        hits.into_iter().filter(|&i| self.try_touch(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POINT_RADIUS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_place_count_and_bounds() {
        let canvas = Canvas::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let set = MarkerSet::place(&mut rng, &canvas);
        assert_eq!(set.len(), MARKER_COUNT);
        for m in set.iter() {
            assert!(m.center.x >= 0.0 && m.center.x < canvas.width);
            assert!(m.center.y >= 0.0 && m.center.y < canvas.height);
            assert_eq!(m.radius, 2.0 * POINT_RADIUS);
            assert!(!m.touched());
        }
    }

    #[test]
    fn test_place_is_seeded() {
        let canvas = Canvas::default();
        let a = MarkerSet::place(&mut Pcg32::seed_from_u64(5), &canvas);
        let b = MarkerSet::place(&mut Pcg32::seed_from_u64(5), &canvas);
        let ca: Vec<Vec2> = a.iter().map(|m| m.center).collect();
        let cb: Vec<Vec2> = b.iter().map(|m| m.center).collect();
        assert_eq!(ca, cb);
    }

    #[test]
    fn test_try_touch_is_idempotent() {
        let mut set = MarkerSet::from_centers([Vec2::new(100.0, 100.0)]);
        assert!(set.try_touch(0));
        assert!(!set.try_touch(0));
        assert!(!set.try_touch(0));
        assert!(set.get(0).is_some_and(|m| m.touched()));
        assert_eq!(set.touched_count(), 1);
    }

    #[test]
    fn test_try_touch_out_of_range() {
        let mut set = MarkerSet::from_centers([Vec2::ZERO]);
        assert!(!set.try_touch(3));
    }

    #[test]
    fn test_point_through_marker_touches_once() {
        let mut set = MarkerSet::from_centers([Vec2::new(100.0, 100.0)]);
        assert_eq!(set.touch_overlapping(Vec2::new(100.0, 100.0), POINT_RADIUS), vec![0]);
        // Later steps still overlapping do not touch again
        assert!(set.touch_overlapping(Vec2::new(101.0, 100.0), POINT_RADIUS).is_empty());
        assert!(set.touch_overlapping(Vec2::new(100.0, 100.0), POINT_RADIUS).is_empty());
        assert!(set.all_touched());
    }

    #[test]
    fn test_one_step_touches_every_overlapping_marker() {
        let mut set = MarkerSet::from_centers([
            Vec2::new(100.0, 100.0),
            Vec2::new(500.0, 400.0),
            Vec2::new(104.0, 100.0),
            Vec2::new(100.0, 100.0),
        ]);
        assert_eq!(
            set.touch_overlapping(Vec2::new(102.0, 100.0), POINT_RADIUS),
            vec![0, 2, 3]
        );
        assert_eq!(set.touched_count(), 3);
    }

    #[test]
    fn test_marker_on_boundary() {
        let mut set = MarkerSet::from_centers([Vec2::ZERO]);
        // A walk hugging the corner touches a corner marker immediately
        assert_eq!(set.touch_overlapping(Vec2::ZERO, POINT_RADIUS), vec![0]);
    }
}
