use crate::result::{GeometryError, GeometryErrorKind};
use crate::types::{Float, NativeRect, Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Tolerance used by [`Rectangle::approx_eq`]
pub const FLOAT_EPSILON: Float = 0.0001;

/// An axis-aligned rectangle described by its top-left corner (x, y) and its width and height.
///
/// Width and height may be negative, in which case the rectangle is un-normalized and most
/// predicates will not behave as expected until [`Rectangle::normalize`] is called.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rectangle {
    pub x: Float,
    pub y: Float,
    pub width: Float,
    pub height: Float,
}

impl Rectangle {
    pub const fn new(x: Float, y: Float, width: Float, height: Float) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_native_rect(rect: &NativeRect) -> Self {
        Self::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
    }

    pub fn to_native_rect(&self) -> NativeRect {
        NativeRect::new(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }

    pub fn set(&mut self, x: Float, y: Float, width: Float, height: Float) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    /// Sets width and height to zero, keeping the origin
    pub fn set_empty(&mut self) {
        self.width = 0.0;
        self.height = 0.0;
    }

    pub fn copy_from(&mut self, other: &Rectangle) {
        *self = *other;
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn left(&self) -> Float {
        self.x
    }

    pub fn top(&self) -> Float {
        self.y
    }

    pub fn right(&self) -> Float {
        self.x + self.width
    }

    pub fn bottom(&self) -> Float {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Moves the left edge, the right edge stays in place
    pub fn set_left(&mut self, value: Float) {
        self.width += self.x - value;
        self.x = value;
    }

    /// Moves the top edge, the bottom edge stays in place
    pub fn set_top(&mut self, value: Float) {
        self.height += self.y - value;
        self.y = value;
    }

    pub fn set_right(&mut self, value: Float) {
        self.width = value - self.x;
    }

    pub fn set_bottom(&mut self, value: Float) {
        self.height = value - self.y;
    }

    /// Moves the origin, the size stays the same
    pub fn set_top_left(&mut self, point: Point) {
        self.x = point.x;
        self.y = point.y;
    }

    pub fn set_bottom_right(&mut self, point: Point) {
        self.set_right(point.x);
        self.set_bottom(point.y);
    }

    pub fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    /// Inclusive on all four edges
    pub fn contains_xy(&self, x: Float, y: Float) -> bool {
        x >= self.x && y >= self.y && x <= self.right() && y <= self.bottom()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains_xy(point.x, point.y)
    }

    pub fn contains_rectangle(&self, other: Option<&Rectangle>) -> bool {
        let Some(other) = other else {
            return false;
        };
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Touching edges count as intersecting
    pub fn intersects_rectangle(&self, other: Option<&Rectangle>) -> bool {
        let Some(other) = other else {
            return false;
        };
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        left <= right && top <= bottom
    }

    /// Returns the overlapping area.
    ///
    /// Without an overlap the result has zero width and height and sits at the larger of the two
    /// left edges and the larger of the two top edges. Without another rectangle it sits at this
    /// rectangle's origin.
    pub fn intersection_with_rectangle(&self, other: Option<&Rectangle>) -> Rectangle {
        let Some(other) = other else {
            return Rectangle::new(self.x, self.y, 0.0, 0.0);
        };
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        if !self.intersects_rectangle(Some(other)) {
            return Rectangle::new(left, top, 0.0, 0.0);
        }
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rectangle::new(left, top, right - left, bottom - top)
    }

    /// Bounding box of both rectangles, whether they overlap or not
    pub fn unite_with_rectangle(&self, other: Option<&Rectangle>) -> Rectangle {
        let Some(other) = other else {
            return *self;
        };
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rectangle::new(left, top, right - left, bottom - top)
    }

    /// Grows the rectangle by `dx` to the left and right and by `dy` to the top and bottom.
    /// Negative values shrink it. The center stays where it is.
    pub fn inflate(&mut self, dx: Float, dy: Float) {
        self.x -= dx;
        self.width += 2.0 * dx;
        self.y -= dy;
        self.height += 2.0 * dy;
    }

    /// Scales all components, including the origin
    pub fn scale_by(&mut self, scale: Float) {
        self.x *= scale;
        self.y *= scale;
        self.width *= scale;
        self.height *= scale;
    }

    pub fn scale_size_by(&mut self, scale: Float) {
        self.width *= scale;
        self.height *= scale;
    }

    /// Flips negative width/height so the rectangle covers the same region with positive values
    pub fn normalize(&mut self) {
        if self.width < 0.0 {
            self.x += self.width;
            self.width = -self.width;
        }
        if self.height < 0.0 {
            self.y += self.height;
            self.height = -self.height;
        }
    }

    pub fn approx_eq(&self, other: &Rectangle) -> bool {
        self.approx_eq_eps(other, FLOAT_EPSILON)
    }

    pub fn approx_eq_eps(&self, other: &Rectangle, epsilon: Float) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

impl From<NativeRect> for Rectangle {
    fn from(rect: NativeRect) -> Self {
        Self::from_native_rect(&rect)
    }
}

impl From<Rectangle> for NativeRect {
    fn from(rect: Rectangle) -> Self {
        rect.to_native_rect()
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Rectangle: x={}, y={}, width={}, height={}]",
            self.x, self.y, self.width, self.height
        )
    }
}

impl FromStr for Rectangle {
    type Err = GeometryError;

    /// Parses `"x y width height"`, separated by whitespace and/or commas
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let values = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<Float>())
            .collect::<Result<Vec<_>, _>>()?;
        let [x, y, width, height] = values[..] else {
            return Err(GeometryError::new(GeometryErrorKind::Parse(format!(
                "Expected 4 values for rectangle, got {} in '{}'",
                values.len(),
                input
            ))));
        };
        Ok(Rectangle::new(x, y, width, height))
    }
}
