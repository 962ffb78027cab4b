use super::OVERSAMPLE;
use super::layout::{IconSlot, IconVisual};
use crate::config::{IconSpec, MenuConfig};
use crate::geometry::{Point, Rect};
use crate::surface::{Bitmap, Canvas, Composite, SurfaceFrame};
use std::f64::consts::PI;

/// Surface placement for a menu centred on `anchor`: a square wide enough for the outer
/// radius plus its stroke.
pub fn surface_frame(config: &MenuConfig, anchor: Point) -> SurfaceFrame {
    SurfaceFrame {
        bounds: Rect::around(anchor, config.surface_half_extent()),
        oversample: OVERSAMPLE,
    }
}

struct SectorRenderer<'a, I> {
    config: &'a MenuConfig,
    spec: &'a IconSpec,
    image: &'a I,
    visual: &'a IconVisual,
    center: Point,
}

impl<'a, I: Bitmap> SectorRenderer<'a, I> {
    fn new(config: &'a MenuConfig, slot: &'a IconSlot<I>, center: Point) -> Option<Self> {
        Some(Self {
            config,
            spec: &slot.spec,
            image: slot.image()?,
            visual: slot.visual()?,
            center,
        })
    }

    fn icon_rect(&self) -> Rect {
        Rect::new(
            self.center.x + self.visual.draw_origin.x,
            self.center.y + self.visual.draw_origin.y,
            self.visual.scaled.width,
            self.visual.scaled.height,
        )
    }

    /// Blits the bitmap, then recolours its opaque pixels with the tint.
    fn draw_icon<C>(&self, canvas: &mut C) -> Result<(), C::Error>
    where
        C: Canvas<Image = I>,
    {
        let rect = self.icon_rect();
        canvas.draw_image(self.image, rect)?;
        canvas.set_composite(Composite::SourceAtop);
        canvas.fill_rect(rect, self.spec.tint)?;
        canvas.set_composite(Composite::SourceOver);
        Ok(())
    }

    fn draw_wedge<C: Canvas>(&self, canvas: &mut C, radius: f64) -> Result<(), C::Error> {
        let sector = self.visual.sector;
        let fill = if self.visual.selected {
            self.config.fill_color_selected()
        } else {
            self.config.fill_color()
        };

        canvas.begin_path();
        canvas.arc(
            self.center,
            radius,
            sector.start.to_radians(),
            sector.end.to_radians(),
        );
        canvas.line_to(self.center);
        canvas.close_path();
        canvas.stroke(self.config.stroke_color(), self.config.stroke_width())?;
        canvas.fill(fill)
    }
}

/// Paints the whole menu with its wedges reaching out to `radius`.
///
/// Icons only appear at full size; while the ring grows or shrinks only the wedges are
/// drawn. Slots whose image has not loaded are skipped.
pub fn paint<C: Canvas>(
    canvas: &mut C,
    config: &MenuConfig,
    slots: &[IconSlot<C::Image>],
    frame: SurfaceFrame,
    radius: f64,
) -> Result<(), C::Error> {
    canvas.configure(frame)?;
    let center = frame.local_center();

    let renderers: Vec<_> = slots
        .iter()
        .filter_map(|slot| SectorRenderer::new(config, slot, center))
        .collect();

    if radius >= config.outer_radius() {
        for renderer in &renderers {
            renderer.draw_icon(canvas)?;
        }
    }

    // wedges go underneath the icons
    canvas.set_composite(Composite::DestinationOver);
    for renderer in &renderers {
        renderer.draw_wedge(canvas, radius)?;
    }
    canvas.set_composite(Composite::SourceOver);

    draw_inner_ring(canvas, config, center)
}

/// Strokes the inner boundary, then punches the centre out of the wedges.
fn draw_inner_ring<C: Canvas>(
    canvas: &mut C,
    config: &MenuConfig,
    center: Point,
) -> Result<(), C::Error> {
    let arc = config.arc();
    canvas.begin_path();
    canvas.arc(
        center,
        config.inner_radius(),
        arc.start.to_radians(),
        arc.end.to_radians(),
    );
    canvas.close_path();
    canvas.stroke(config.stroke_color(), config.stroke_width())?;

    canvas.set_composite(Composite::DestinationOut);
    canvas.begin_path();
    canvas.arc(
        center,
        (config.inner_radius() - config.stroke_width() / 2.0).max(0.0),
        0.0,
        2.0 * PI,
    );
    canvas.close_path();
    canvas.fill(config.fill_color())?;
    canvas.set_composite(Composite::SourceOver);
    Ok(())
}
