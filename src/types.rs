pub struct ScreenSpace;
pub type Float = f32;
pub type Point = euclid::Point2D<Float, ScreenSpace>;
pub type Size = euclid::Size2D<Float, ScreenSpace>;
/// Origin + size rectangle as handed out by the rendering host
pub type NativeRect = euclid::Rect<Float, ScreenSpace>;
pub type Transform = euclid::Transform2D<Float, ScreenSpace, ScreenSpace>;
