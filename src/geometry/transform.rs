use crate::geometry::rectangle::Rectangle;
use crate::types::{Float, Point, Transform};
use itertools::{Itertools, MinMaxResult};

/// Anything that maps points of the plane while keeping lines straight and parallel
pub trait AffineTransform {
    fn transform_point(&self, point: Point) -> Point;
}

impl AffineTransform for Transform {
    fn transform_point(&self, point: Point) -> Point {
        Transform::transform_point(self, point)
    }
}

impl<T: AffineTransform + ?Sized> AffineTransform for &T {
    fn transform_point(&self, point: Point) -> Point {
        (**self).transform_point(point)
    }
}

impl Rectangle {
    /// Axis-aligned bounds of this rectangle after transforming its four corners.
    ///
    /// For rotations the result is larger than the rotated rectangle itself.
    pub fn bounds_after_transformation<T: AffineTransform + ?Sized>(&self, matrix: &T) -> Rectangle {
        let corners = [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.x, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
        .map(|corner| matrix.transform_point(corner));
        let (min_x, max_x) = min_max(corners.map(|corner| corner.x));
        let (min_y, max_y) = min_max(corners.map(|corner| corner.y));
        Rectangle::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

fn min_max(values: [Float; 4]) -> (Float, Float) {
    let MinMaxResult::MinMax(min, max) = values.into_iter().minmax_by(|a, b| a.total_cmp(b)) else {
        unreachable!("four values always have a min and a max");
    };
    (min, max)
}
