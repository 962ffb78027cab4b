use arcmenu::{Bitmap, Canvas, Color, Composite, Point, Rect, Size, SurfaceFrame};
use cairo::{Context, Format, ImageSurface, Operator};
use derive_more::{Deref, From};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::GdkCairoContextExt;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("PNG export failed: {0}")]
    Png(#[from] cairo::IoError),
    #[error("Canvas used before it was configured")]
    Unconfigured,
}

/// Decoded icon bitmap.
#[derive(Debug, Clone, Deref, From)]
pub struct IconImage(Pixbuf);

impl Bitmap for IconImage {
    fn natural_size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }
}

struct Backing {
    surface: ImageSurface,
    oversample: f64,
}

/// Menu rasteriser: paints into an oversampled image surface that a drawing area blits
/// at logical size.
pub struct CairoCanvas {
    area: Option<gtk::DrawingArea>,
    backing: Rc<RefCell<Option<Backing>>>,
    cr: Option<Context>,
}

impl CairoCanvas {
    pub fn new(area: gtk::DrawingArea) -> Self {
        let backing: Rc<RefCell<Option<Backing>>> = Rc::default();

        let source = backing.clone();
        area.set_draw_func(move |_, cr, _, _| {
            if let Some(backing) = source.borrow().as_ref()
                && let Err(e) = blit(cr, backing)
            {
                log::error!("Drawing error: {}", e);
            }
        });

        Self {
            area: Some(area),
            backing,
            cr: None,
        }
    }

    /// A canvas without a widget, for rendering off screen.
    pub fn offscreen() -> Self {
        Self {
            area: None,
            backing: Rc::default(),
            cr: None,
        }
    }

    /// PNG encoding of the backing surface at its full oversampled resolution.
    pub fn snapshot_png(&self) -> Result<Vec<u8>, CanvasError> {
        let backing = self.backing.borrow();
        let backing = backing.as_ref().ok_or(CanvasError::Unconfigured)?;
        backing.surface.flush();
        let mut png = Vec::new();
        backing.surface.write_to_png(&mut png)?;
        Ok(png)
    }

    fn cr(&self) -> Result<&Context, CanvasError> {
        self.cr.as_ref().ok_or(CanvasError::Unconfigured)
    }

    fn set_source(cr: &Context, color: Color) {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
    }
}

fn blit(cr: &Context, backing: &Backing) -> Result<(), cairo::Error> {
    cr.scale(1.0 / backing.oversample, 1.0 / backing.oversample);
    cr.set_source_surface(&backing.surface, 0.0, 0.0)?;
    cr.paint()
}

fn operator(composite: Composite) -> Operator {
    match composite {
        Composite::SourceOver => Operator::Over,
        Composite::SourceAtop => Operator::Atop,
        Composite::DestinationOver => Operator::DestOver,
        Composite::DestinationOut => Operator::DestOut,
    }
}

impl Canvas for CairoCanvas {
    type Image = IconImage;
    type Error = CanvasError;

    fn configure(&mut self, frame: SurfaceFrame) -> Result<(), CanvasError> {
        let pixels = |logical: f64| (logical * frame.oversample).ceil().max(1.0) as i32;
        let surface = ImageSurface::create(
            Format::ARgb32,
            pixels(frame.bounds.width),
            pixels(frame.bounds.height),
        )?;
        let cr = Context::new(&surface)?;
        cr.scale(frame.oversample, frame.oversample);

        if let Some(area) = &self.area {
            super::document::place(area, frame.bounds);
        }

        *self.backing.borrow_mut() = Some(Backing {
            surface,
            oversample: frame.oversample,
        });
        self.cr = Some(cr);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CanvasError> {
        let Some(cr) = &self.cr else {
            return Ok(());
        };
        cr.save()?;
        cr.set_operator(Operator::Clear);
        cr.paint()?;
        cr.restore()?;
        Ok(())
    }

    fn set_composite(&mut self, composite: Composite) {
        if let Some(cr) = &self.cr {
            cr.set_operator(operator(composite));
        }
    }

    fn begin_path(&mut self) {
        if let Some(cr) = &self.cr {
            cr.new_path();
        }
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        if let Some(cr) = &self.cr {
            cr.arc(center.x, center.y, radius, start, end);
        }
    }

    fn line_to(&mut self, point: Point) {
        if let Some(cr) = &self.cr {
            cr.line_to(point.x, point.y);
        }
    }

    fn close_path(&mut self) {
        if let Some(cr) = &self.cr {
            cr.close_path();
        }
    }

    fn fill(&mut self, color: Color) -> Result<(), CanvasError> {
        let cr = self.cr()?;
        Self::set_source(cr, color);
        cr.fill_preserve()?;
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> Result<(), CanvasError> {
        let cr = self.cr()?;
        Self::set_source(cr, color);
        cr.set_line_width(width);
        cr.stroke_preserve()?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), CanvasError> {
        let cr = self.cr()?;
        Self::set_source(cr, color);
        cr.new_path();
        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        cr.fill()?;
        Ok(())
    }

    fn draw_image(&mut self, image: &IconImage, rect: Rect) -> Result<(), CanvasError> {
        let cr = self.cr()?;
        let natural = image.natural_size();
        if natural.is_empty() {
            return Ok(());
        }

        cr.save()?;
        cr.translate(rect.x, rect.y);
        cr.scale(rect.width / natural.width, rect.height / natural.height);
        cr.set_source_pixbuf(image, 0.0, 0.0);
        cr.paint()?;
        cr.restore()?;
        Ok(())
    }

    fn present(&mut self) {
        if let Some(area) = &self.area {
            area.queue_draw();
        }
    }
}
