//! Geometric primitives for diagram layout and positioning.
//!
//! # Coordinate System
//!
//! Rampart uses a coordinate system consistent with SVG and most screen
//! coordinate systems:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Node positions are top-left anchored; the layout engine works with node
//! centers internally and converts to this anchoring before committing.

use serde::Serialize;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use rampart_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let offset = Point::new(10.0, -5.0);
///
/// let moved = position.add_point(offset);
/// assert_eq!(moved.x(), 110.0);
/// assert_eq!(moved.y(), 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Width and height dimensions of a rendered or to-be-rendered node.
///
/// A size is "measured" once the rendering widget reports a non-zero width;
/// the layout orchestrator polls for exactly this condition before submitting
/// nodes to the layout engine.
///
/// # Examples
///
/// ```
/// # use rampart_core::geometry::Size;
/// let measured = Size::new(330.0, 75.0);
/// assert!(measured.is_measured());
///
/// let pending = Size::new(0.0, 75.0);
/// assert!(!pending.is_measured());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns `true` once the width is known and non-zero.
    pub fn is_measured(self) -> bool {
        self.width > 0.0
    }
}
