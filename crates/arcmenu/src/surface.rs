use crate::config::Color;
use crate::geometry::{Point, Rect, Size};

/// How newly painted pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Paint only where the destination is already opaque (used for tinting).
    SourceAtop,
    /// Paint behind existing pixels.
    DestinationOver,
    /// Erase the destination where the source is opaque.
    DestinationOut,
}

/// Placement of the drawing surface in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    pub bounds: Rect,
    /// Backing-store pixels per logical pixel.
    pub oversample: f64,
}

impl SurfaceFrame {
    /// Centre of the surface in its own logical coordinates.
    pub fn local_center(&self) -> Point {
        Point::new(self.bounds.width / 2.0, self.bounds.height / 2.0)
    }
}

/// A decoded image whose natural size is known.
pub trait Bitmap {
    fn natural_size(&self) -> Size;
}

/// Immediate-mode 2D rasteriser, modelled on an HTML canvas context.
///
/// `fill` and `stroke` keep the current path so a shape can be stroked and then filled.
/// Angles passed to `arc` are radians, measured clockwise from the positive x axis.
pub trait Canvas {
    type Image: Bitmap;
    type Error: std::error::Error;

    /// Moves and resizes the surface. Resizing always leaves it cleared, with logical
    /// coordinates scaled by `frame.oversample`.
    fn configure(&mut self, frame: SurfaceFrame) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn set_composite(&mut self, composite: Composite);

    fn begin_path(&mut self);

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);

    fn line_to(&mut self, point: Point);

    fn close_path(&mut self);

    fn fill(&mut self, color: Color) -> Result<(), Self::Error>;

    fn stroke(&mut self, color: Color, width: f64) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;

    /// Blits `image` scaled into `rect`, anchored at its top-left corner.
    fn draw_image(&mut self, image: &Self::Image, rect: Rect) -> Result<(), Self::Error>;

    /// Called after every complete paint.
    fn present(&mut self) {}
}

/// Display-refresh clock. Every `request_frame` must be answered by exactly one call to
/// [`crate::MenuController::on_frame`] before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}
