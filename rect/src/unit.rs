/// Marker for the coordinate space a value is measured in.
pub trait Unit {}

/// Absolute pixel coordinates, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelUnit;

/// Fractions of the image size, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RatioUnit;

impl Unit for PixelUnit {}
impl Unit for RatioUnit {}
