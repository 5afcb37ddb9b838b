//! Geometry and path utilities: segment distance, box overlap, path interpolation.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_PATH;

/// Reasons a waypoint list cannot form a path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("a path needs at least 2 waypoints, got {count}")]
    TooShort { count: usize },
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Ordered sequence of 2D waypoints enemies follow. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DVec2>", into = "Vec<DVec2>")]
pub struct Path {
    waypoints: Vec<DVec2>,
    /// Cumulative length up to each waypoint; `cumulative[0] == 0`.
    cumulative: Vec<f64>,
}

impl Path {
    pub fn new(waypoints: Vec<DVec2>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooShort {
                count: waypoints.len(),
            });
        }
        if let Some(index) = waypoints.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFinite { index });
        }
        Ok(Self::build(waypoints))
    }

    /// Precompute cumulative lengths for already validated waypoints.
    fn build(waypoints: Vec<DVec2>) -> Self {
        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in waypoints.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Self {
            waypoints,
            cumulative,
        }
    }

    /// Build a path from `(x, y)` tuples.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, PathError> {
        Self::new(points.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    pub fn waypoints(&self) -> &[DVec2] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> Option<DVec2> {
        self.waypoints.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false: a path holds at least two waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> DVec2 {
        self.waypoints[0]
    }

    pub fn end(&self) -> DVec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Consecutive waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.waypoints.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Point at fraction `t` of the total path length (clamped to `0..=1`).
    pub fn point_at(&self, t: f64) -> DVec2 {
        let total = self.total_length();
        if total <= 0.0 {
            return self.start();
        }
        let target = t.clamp(0.0, 1.0) * total;

        // First segment whose end lies at or beyond the target distance.
        let seg = self
            .cumulative
            .iter()
            .skip(1)
            .position(|&d| d >= target)
            .unwrap_or(self.waypoints.len() - 2);

        let seg_start = self.cumulative[seg];
        let seg_len = self.cumulative[seg + 1] - seg_start;
        if seg_len <= 0.0 {
            return self.waypoints[seg];
        }
        let local = (target - seg_start) / seg_len;
        self.waypoints[seg].lerp(self.waypoints[seg + 1], local)
    }

    /// Fraction of the path covered by a walker at `position` that last passed
    /// waypoint `index`.
    pub fn progress(&self, index: usize, position: DVec2) -> f64 {
        let total = self.total_length();
        if total <= 0.0 {
            return 1.0;
        }
        let index = index.min(self.last_index());
        let travelled = self.cumulative[index] + self.waypoints[index].distance(position);
        (travelled / total).clamp(0.0, 1.0)
    }

    /// Shortest distance from `point` to any segment of the path.
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.segments()
            .map(|(a, b)| distance_to_segment(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for Path {
    /// The reference playfield path.
    fn default() -> Self {
        Self::build(DEFAULT_PATH.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }
}

impl TryFrom<Vec<DVec2>> for Path {
    type Error = PathError;

    fn try_from(waypoints: Vec<DVec2>) -> Result<Self, Self::Error> {
        Path::new(waypoints)
    }
}

impl From<Path> for Vec<DVec2> {
    fn from(path: Path) -> Self {
        path.waypoints
    }
}

/// Shortest distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Strict overlap of two axis-aligned squares given by center and edge length.
/// Touching edges do not overlap.
pub fn squares_overlap(a: DVec2, a_size: f64, b: DVec2, b_size: f64) -> bool {
    let reach = (a_size + b_size) * 0.5;
    let d = (a - b).abs();
    d.x < reach && d.y < reach
}

/// Whether an axis-aligned square contains `point` (edges inclusive).
pub fn square_contains(center: DVec2, size: f64, point: DVec2) -> bool {
    let d = (point - center).abs();
    let half = size * 0.5;
    d.x <= half && d.y <= half
}

/// Whether an axis-aligned square strictly overlaps the rectangle of `width`
/// laid along segment `a..b` (separating-axis test).
pub fn square_overlaps_corridor(center: DVec2, size: f64, a: DVec2, b: DVec2, width: f64) -> bool {
    let along = b - a;
    let length = along.length();
    let u = if length > f64::EPSILON {
        along / length
    } else {
        DVec2::X
    };
    let v = u.perp();
    let corridor_center = (a + b) * 0.5;
    let half_len = length * 0.5;
    let half_width = width * 0.5;
    let half_size = size * 0.5;
    let offset = center - corridor_center;

    [DVec2::X, DVec2::Y, u, v].into_iter().all(|axis| {
        let distance = offset.dot(axis).abs();
        let square_radius = half_size * (axis.x.abs() + axis.y.abs());
        let corridor_radius = half_len * u.dot(axis).abs() + half_width * v.dot(axis).abs();
        distance < square_radius + corridor_radius
    })
}
