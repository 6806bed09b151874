//! The ring of board cells.

use boardwalk_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A 2-D board coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `target`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }
}

/// Immutable ordered ring of `N` cell coordinates.
///
/// Positions are indices into the ring; all position arithmetic is modulo
/// `N`. The coordinates come from an external layout generator (see
/// [`crate::layout`]) and are only read here.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardTopology {
    points: Vec<Point>,
}

impl BoardTopology {
    /// Builds a ring from its ordered cell coordinates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `points` is empty.
    pub fn new(points: Vec<Point>) -> Result<Self, DomainError> {
        if points.is_empty() {
            return Err(DomainError::Configuration(
                "board must have at least one cell".to_owned(),
            ));
        }
        Ok(Self { points })
    }

    /// Number of cells `N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a ring has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinate of cell `index`, or `None` if `index >= N`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// The position reached by moving `offset` cells forward from `position`.
    #[must_use]
    pub fn wrap(&self, position: usize, offset: usize) -> usize {
        (position % self.len() + offset % self.len()) % self.len()
    }

    /// Coordinate of the cell `offset` cells forward from `position`.
    #[must_use]
    pub fn point_after(&self, position: usize, offset: usize) -> Point {
        self.points[self.wrap(position, offset)]
    }

    /// All cell coordinates in ring order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
