//! Geometric primitives and edge routing for relationship graphs.
//!
//! This module provides the fundamental geometric types used throughout Liaison
//! together with the pure functions that route a curved relationship between
//! two circular node glyphs.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box
//! - [`Insets`] - Padding values for four sides
//! - [`distance_and_angle`], [`point_on_edge`], [`rim_adjusted`],
//!   [`quadratic_midpoint`] - edge geometry helpers
//! - [`EdgeRoute`] - the complete geometry of one drawn relationship
//!
//! # Coordinate System
//!
//! Liaison uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are measured with `atan2(dy, dx)` in this system, so a positive
//! angle turns clockwise on screen.

/// A 2D point representing a position in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use liaison_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean length of this point treated as a vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Converts a point and size into a bounds rectangle centered on the point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds of the given size centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates bounds of the given size with its top-left corner at `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the center of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns true if the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Expands the bounds by adding insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// Represents spacing around an element with potentially different values
/// for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with one value for top/bottom and one for left/right
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

// =============================================================================
// Edge geometry
// =============================================================================

/// Distance and bearing from one point to another.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bearing {
    distance: f32,
    angle: f32,
}

impl Bearing {
    /// Euclidean distance between the two points.
    pub fn distance(self) -> f32 {
        self.distance
    }

    /// `atan2` bearing in radians; zero for coincident points.
    pub fn angle(self) -> f32 {
        self.angle
    }
}

/// Computes the Euclidean distance and `atan2` bearing from `a` to `b`.
///
/// Coincident points yield a distance of zero and an angle of zero.
///
/// ```
/// # use liaison_core::geometry::{Point, distance_and_angle};
/// let bearing = distance_and_angle(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
/// assert_eq!(bearing.distance(), 5.0);
///
/// let degenerate = distance_and_angle(Point::new(7.0, 7.0), Point::new(7.0, 7.0));
/// assert_eq!(degenerate.angle(), 0.0);
/// ```
pub fn distance_and_angle(a: Point, b: Point) -> Bearing {
    let delta = b.sub_point(a);
    let distance = delta.hypot();
    let angle = if distance == 0.0 {
        0.0
    } else {
        delta.y.atan2(delta.x)
    };
    Bearing { distance, angle }
}

/// Returns the point `radius` away from `center` along `angle`.
pub fn point_on_edge(center: Point, angle: f32, radius: f32) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Moves both endpoints of the center-to-center segment onto the node rims.
///
/// The start point lies `radius` from `source` along the source→target
/// bearing, the end point lies `radius` from `target` against it.
pub fn rim_adjusted(source: Point, target: Point, radius: f32) -> (Point, Point) {
    let angle = distance_and_angle(source, target).angle();
    let start = point_on_edge(source, angle, radius);
    let end = point_on_edge(target, angle, -radius);
    (start, end)
}

/// Control point and visual midpoint of a quadratic edge curve.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurveGeometry {
    control_point: Point,
    midpoint: Point,
}

impl CurveGeometry {
    pub fn control_point(self) -> Point {
        self.control_point
    }

    /// The point on the curve at `t = 0.5`, used to anchor relation labels.
    pub fn midpoint(self) -> Point {
        self.midpoint
    }
}

/// Computes the bend of a quadratic curve between two rim-adjusted endpoints.
///
/// The control point sits on the perpendicular through the chord midpoint,
/// `curvature * chord length` away from the chord. The midpoint is the point
/// of the resulting quadratic Bézier at `t = 0.5`.
///
/// ```
/// # use liaison_core::geometry::{Point, quadratic_midpoint};
/// let curve = quadratic_midpoint(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.15);
/// assert_eq!(curve.control_point().x(), 50.0);
/// assert!((curve.control_point().y() - 15.0).abs() < 1e-4);
/// assert!((curve.midpoint().y() - 7.5).abs() < 1e-4);
/// ```
pub fn quadratic_midpoint(source: Point, target: Point, curvature: f32) -> CurveGeometry {
    bend(source, target, distance_and_angle(source, target), curvature)
}

/// Bends the chord `source`→`target` using an externally supplied bearing.
fn bend(source: Point, target: Point, bearing: Bearing, curvature: f32) -> CurveGeometry {
    let offset = bearing.distance() * curvature;
    let chord_mid = source.midpoint(target);
    let control_point = Point::new(
        chord_mid.x - offset * bearing.angle().sin(),
        chord_mid.y + offset * bearing.angle().cos(),
    );
    let midpoint = source
        .scale(0.25)
        .add_point(control_point.scale(0.5))
        .add_point(target.scale(0.25));

    CurveGeometry {
        control_point,
        midpoint,
    }
}

/// Number of straight segments used to approximate a curve for hit testing.
const HIT_TEST_SEGMENTS: usize = 24;

/// Complete geometry of one drawn relationship.
///
/// Derived purely from the two node centers, the glyph radius, and the
/// curvature, so the same inputs always yield the same path. The bend is
/// measured from the center-to-center bearing, so overlapping glyphs never
/// flip the curve to the other side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeRoute {
    start: Point,
    control: Point,
    end: Point,
    midpoint: Point,
}

impl EdgeRoute {
    /// Routes a curved edge between two node centers.
    pub fn between(source: Point, target: Point, radius: f32, curvature: f32) -> Self {
        let (start, end) = rim_adjusted(source, target, radius);
        let curve = bend(start, end, distance_and_angle(source, target), curvature);
        Self {
            start,
            control: curve.control_point(),
            end,
            midpoint: curve.midpoint(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn control(&self) -> Point {
        self.control
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    /// Evaluates the quadratic Bézier at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        self.start
            .scale(u * u)
            .add_point(self.control.scale(2.0 * u * t))
            .add_point(self.end.scale(t * t))
    }

    /// SVG path data for the curve.
    pub fn to_path_data(&self) -> String {
        format!(
            "M {} {} Q {} {}, {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }

    /// Approximate shortest distance from `point` to the curve.
    pub fn distance_to(&self, point: Point) -> f32 {
        let mut previous = self.start;
        let mut best = point.distance(previous);
        for step in 1..=HIT_TEST_SEGMENTS {
            let current = self.point_at(step as f32 / HIT_TEST_SEGMENTS as f32);
            best = best.min(distance_to_segment(point, previous, current));
            previous = current;
        }
        best
    }
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f32 {
    let ab = b.sub_point(a);
    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq == 0.0 {
        return point.distance(a);
    }
    let ap = point.sub_point(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_sq).clamp(0.0, 1.0);
    point.distance(a.add_point(ab.scale(t)))
}
