pub mod fit;
pub mod rectangle;
pub mod transform;

use crate::arenal::{Arenal, Idx};

pub use fit::ScaleMode;
pub use rectangle::Rectangle;
pub use transform::AffineTransform;

/// Backing store for callers that churn through many short-lived rectangles
pub type RectanglePool = Arenal<Rectangle>;
pub type RectangleIdx = Idx<Rectangle>;
