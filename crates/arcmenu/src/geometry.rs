/// A position in surface-local coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * half_extent` centred on `center`.
    pub fn around(center: Point, half_extent: f64) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Configured angular span of the menu, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: f64,
    pub end: f64,
}

impl ArcSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// The annulus between the inner and outer radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub inner: f64,
    pub outer: f64,
}

impl Ring {
    pub fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    /// Strictly between the two radii; a point on either boundary is outside.
    pub fn contains(&self, distance: f64) -> bool {
        distance > self.inner && distance < self.outer
    }
}

/// Polar coordinates around a centre. `angle` is in degrees, normalised to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub angle: f64,
    pub distance: f64,
}

impl Polar {
    pub fn new(angle: f64, distance: f64) -> Self {
        Self { angle, distance }
    }

    pub fn of(point: Point, center: Point) -> Self {
        let (dx, dy) = (point.x - center.x, point.y - center.y);
        let mut angle = dy.atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        // -1e-15 + 360.0 rounds up to 360.0
        if angle >= 360.0 {
            angle = 0.0;
        }
        Self {
            angle,
            distance: dx.hypot(dy),
        }
    }

    pub fn to_point(self, center: Point) -> Point {
        let radians = self.angle.to_radians();
        Point::new(
            center.x + self.distance * radians.cos(),
            center.y + self.distance * radians.sin(),
        )
    }
}
