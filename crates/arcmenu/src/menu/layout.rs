use crate::config::{IconSpec, MenuConfig};
use crate::geometry::{ArcSpan, Point, Polar, Ring, Size};
use crate::surface::Bitmap;

/// Angular slice of the ring owned by one icon, in degrees. Half-open: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub start: f64,
    pub end: f64,
    pub center: f64,
}

impl Sector {
    /// Slice `index` of `count` equal, contiguous slices of `arc`.
    pub fn of(index: usize, count: usize, arc: ArcSpan) -> Self {
        let span = arc.width() / count as f64;
        let start = arc.start + index as f64 * span;
        Self {
            start,
            end: start + span,
            center: start + span / 2.0,
        }
    }

    pub fn contains(&self, angle: f64) -> bool {
        self.start <= angle && angle < self.end
    }
}

/// Scales `natural` so its larger side equals `icon_size`, keeping the aspect ratio.
pub fn fit(natural: Size, icon_size: f64) -> Option<Size> {
    if natural.is_empty() {
        return None;
    }
    let fitted = if natural.width > natural.height {
        Size::new(icon_size, natural.height / natural.width * icon_size)
    } else {
        Size::new(natural.width / natural.height * icon_size, icon_size)
    };
    Some(fitted)
}

/// Placement of one loaded icon, relative to the menu centre.
#[derive(Debug, Clone, PartialEq)]
pub struct IconVisual {
    pub scaled: Size,
    /// Diagonal of the scaled box: the radial room the icon needs.
    pub bounding_diameter: f64,
    pub bounding_radius: f64,
    pub sector: Sector,
    /// Distance from the menu centre to the icon centre.
    pub center_radius: f64,
    /// Top-left corner of the blit.
    pub draw_origin: Point,
    pub selected: bool,
}

impl IconVisual {
    /// Centres the icon radially in the ring gap and angularly in its sector.
    ///
    /// A gap narrower than the icon's diagonal is not an error: the icon simply overlaps
    /// the ring edges.
    pub fn calculate(
        index: usize,
        count: usize,
        natural: Size,
        icon_size: f64,
        arc: ArcSpan,
        ring: Ring,
    ) -> Option<Self> {
        let scaled = fit(natural, icon_size)?;
        let bounding_diameter = scaled.width.hypot(scaled.height);
        let bounding_radius = bounding_diameter / 2.0;
        let sector = Sector::of(index, count, arc);

        let gap = ring.outer - ring.inner - bounding_diameter;
        let center_radius = ring.inner + gap / 2.0 + bounding_radius;

        let center = Polar::new(sector.center, center_radius).to_point(Point::default());
        let draw_origin = Point::new(
            center.x - scaled.width / 2.0,
            center.y - scaled.height / 2.0,
        );

        Some(Self {
            scaled,
            bounding_diameter,
            bounding_radius,
            sector,
            center_radius,
            draw_origin,
            selected: false,
        })
    }
}

/// Lays out every icon whose natural size is known; `None` entries stay `None`.
pub fn compute_layout(
    natural_sizes: &[Option<Size>],
    icon_size: f64,
    arc: ArcSpan,
    ring: Ring,
) -> Vec<Option<IconVisual>> {
    let count = natural_sizes.len();
    natural_sizes
        .iter()
        .enumerate()
        .map(|(i, natural)| {
            natural.and_then(|n| IconVisual::calculate(i, count, n, icon_size, arc, ring))
        })
        .collect()
}

/// One icon position of the menu. Each slot is written only by its own image load.
#[derive(Debug, Clone)]
pub struct IconSlot<I> {
    pub spec: IconSpec,
    image: Option<I>,
    visual: Option<IconVisual>,
}

impl<I: Bitmap> IconSlot<I> {
    pub fn new(spec: IconSpec) -> Self {
        Self {
            spec,
            image: None,
            visual: None,
        }
    }

    pub fn from_config(config: &MenuConfig) -> Vec<Self> {
        config.icons().iter().cloned().map(Self::new).collect()
    }

    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn visual(&self) -> Option<&IconVisual> {
        self.visual.as_ref()
    }

    pub fn visual_mut(&mut self) -> Option<&mut IconVisual> {
        self.visual.as_mut()
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some() && self.visual.is_some()
    }

    /// Stores a freshly decoded image and lays it out. Selection starts cleared.
    pub fn load(&mut self, image: I, index: usize, count: usize, config: &MenuConfig) {
        self.image = Some(image);
        self.visual = None;
        self.relayout(index, count, config);
    }

    /// Recomputes placement from the current configuration, keeping the selection flag.
    pub fn relayout(&mut self, index: usize, count: usize, config: &MenuConfig) {
        let selected = self.visual.as_ref().is_some_and(|v| v.selected);
        self.visual = self.image.as_ref().and_then(|image| {
            IconVisual::calculate(
                index,
                count,
                image.natural_size(),
                config.icon_size(),
                config.arc(),
                config.ring(),
            )
        });
        if let Some(visual) = &mut self.visual {
            visual.selected = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeImage;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sectors_tile_the_arc() {
        for (start, end) in [(0.0, 360.0), (50.0, 250.0), (10.0, 11.0), (90.0, 90.0)] {
            let arc = ArcSpan::new(start, end);
            for count in 1..=9 {
                let sectors: Vec<_> = (0..count).map(|i| Sector::of(i, count, arc)).collect();
                let width = (end - start) / count as f64;

                assert!((sectors[0].start - start).abs() < EPS);
                assert!((sectors[count - 1].end - end).abs() < EPS);
                for pair in sectors.windows(2) {
                    assert!((pair[0].end - pair[1].start).abs() < EPS);
                }
                for s in &sectors {
                    assert!((s.end - s.start - width).abs() < EPS);
                    assert!((s.center - (s.start + width / 2.0)).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_sector_is_half_open() {
        let sector = Sector::of(0, 4, ArcSpan::new(0.0, 360.0));
        assert!(sector.contains(0.0));
        assert!(sector.contains(89.999));
        assert!(!sector.contains(90.0));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        assert_eq!(fit(Size::new(200.0, 100.0), 30.0), Some(Size::new(30.0, 15.0)));
        assert_eq!(fit(Size::new(50.0, 100.0), 30.0), Some(Size::new(15.0, 30.0)));
        assert_eq!(fit(Size::new(64.0, 64.0), 30.0), Some(Size::new(30.0, 30.0)));
        assert_eq!(fit(Size::new(0.0, 64.0), 30.0), None);
    }

    #[test]
    fn test_icon_is_centred_in_the_ring() {
        let ring = Ring::new(20.0, 80.0);
        let arc = ArcSpan::new(0.0, 360.0);
        for index in 0..4 {
            let visual =
                IconVisual::calculate(index, 4, Size::new(64.0, 32.0), 24.0, arc, ring).unwrap();

            let center = Point::new(
                visual.draw_origin.x + visual.scaled.width / 2.0,
                visual.draw_origin.y + visual.scaled.height / 2.0,
            );
            let polar = Polar::of(center, Point::default());

            assert!((polar.distance - 50.0).abs() < EPS);
            assert!((polar.angle - visual.sector.center).abs() < 1e-6);
            assert!(polar.distance - visual.bounding_radius >= ring.inner);
            assert!(polar.distance + visual.bounding_radius <= ring.outer);
        }
    }

    #[test]
    fn test_bounding_circle_stays_inside_the_annulus() {
        let arc = ArcSpan::new(50.0, 250.0);
        for (inner, outer) in [(0.0, 60.0), (25.0, 80.0), (100.0, 160.0), (10.0, 55.0)] {
            let ring = Ring::new(inner, outer);
            for index in 0..5 {
                let visual =
                    IconVisual::calculate(index, 5, Size::new(48.0, 48.0), 30.0, arc, ring)
                        .unwrap();
                assert!(visual.center_radius - visual.bounding_radius >= inner - EPS);
                assert!(visual.center_radius + visual.bounding_radius <= outer + EPS);
            }
        }
    }

    #[test]
    fn test_narrow_ring_overlaps_instead_of_failing() {
        let ring = Ring::new(20.0, 30.0);
        let visual = IconVisual::calculate(
            0,
            1,
            Size::new(10.0, 10.0),
            30.0,
            ArcSpan::new(0.0, 90.0),
            ring,
        )
        .unwrap();

        assert!(visual.bounding_diameter > ring.outer - ring.inner);
        assert!((visual.center_radius - 25.0).abs() < EPS);
        assert!(visual.center_radius - visual.bounding_radius < ring.inner);
        assert!(visual.center_radius + visual.bounding_radius > ring.outer);
    }

    #[test]
    fn test_compute_layout_skips_unknown_sizes() {
        let sizes = [Some(Size::new(10.0, 10.0)), None, Some(Size::new(20.0, 10.0))];
        let layout = compute_layout(&sizes, 30.0, ArcSpan::new(0.0, 90.0), Ring::new(10.0, 60.0));

        assert_eq!(layout.len(), 3);
        assert!(layout[1].is_none());
        assert_eq!(layout[2].as_ref().unwrap().sector.start, 60.0);
        assert_eq!(layout[2].as_ref().unwrap().scaled, Size::new(30.0, 15.0));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut config = MenuConfig::default();
        config.set_arc(0.0, 180.0).unwrap();
        let mut slot = IconSlot::new(IconSpec::new("a", config.fill_color()));
        slot.load(FakeImage::new(40.0, 20.0), 1, 3, &config);
        let first = slot.visual().cloned();
        slot.relayout(1, 3, &config);
        assert_eq!(slot.visual().cloned(), first);
    }

    #[test]
    fn test_relayout_keeps_selection() {
        let mut config = MenuConfig::default();
        let mut slot = IconSlot::new(IconSpec::new("a", config.fill_color()));
        slot.load(FakeImage::new(40.0, 20.0), 0, 2, &config);
        slot.visual_mut().unwrap().selected = true;

        config.set_radii(40.0, 120.0).unwrap();
        slot.relayout(0, 2, &config);
        let visual = slot.visual().unwrap();
        assert!(visual.selected);
        assert!((visual.center_radius - 80.0).abs() < EPS);
    }

    #[test]
    fn test_unloaded_slot_has_no_visual() {
        let config = MenuConfig::default();
        let mut slot: IconSlot<FakeImage> = IconSlot::new(IconSpec::new("a", config.fill_color()));
        slot.relayout(0, 1, &config);
        assert!(slot.visual().is_none());
        assert!(!slot.is_loaded());
    }
}
