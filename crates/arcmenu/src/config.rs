use crate::geometry::{ArcSpan, Ring};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use thiserror::Error;

pub type Color = Srgba<f64>;

pub const DEFAULT_ICON_SIZE: f64 = 30.0;
pub const DEFAULT_START_ANGLE: f64 = 50.0;
pub const DEFAULT_END_ANGLE: f64 = 250.0;
pub const DEFAULT_INNER_RADIUS: f64 = 25.0;
pub const DEFAULT_OUTER_RADIUS: f64 = 80.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

const DEGREES: std::ops::RangeInclusive<f64> = 0.0..=360.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "Start angle {0} rejected: it must not exceed the end angle and must lie between 0 and 360 degrees"
    )]
    StartAngle(f64),
    #[error(
        "End angle {0} rejected: it must not be below the start angle and must lie between 0 and 360 degrees"
    )]
    EndAngle(f64),
    #[error(
        "Inner radius {0} rejected: it must not exceed the outer radius and must not be negative"
    )]
    InnerRadius(f64),
    #[error(
        "Outer radius {0} rejected: it must not be below the inner radius and must not be negative"
    )]
    OuterRadius(f64),
    #[error("Stroke width {0} rejected: it must be a finite, non-negative number")]
    StrokeWidth(f64),
    #[error("Icon size {0} rejected: it must be a finite, positive number")]
    IconSize(f64),
    #[error("Invalid colour '{0}': expected #rgb, #rrggbb or a CSS colour name")]
    InvalidColor(String),
}

/// Parses `#rgb`, `#rrggbb` or a CSS colour name into an opaque colour.
pub fn parse_color(text: &str) -> Result<Color, ConfigError> {
    let trimmed = text.trim();
    let invalid = || ConfigError::InvalidColor(text.to_string());

    let rgb: Srgb<u8> = if trimmed.starts_with('#') {
        trimmed.parse().map_err(|_| invalid())?
    } else {
        palette::named::from_str(&trimmed.to_ascii_lowercase()).ok_or_else(invalid)?
    };

    let (r, g, b) = rgb.into_format::<f64>().into_components();
    Ok(Srgba::new(r, g, b, 1.0))
}

/// Textual colour as found in settings files.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into)]
pub struct HexColor(Color);

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).map(HexColor)
    }
}

/// Where an icon bitmap comes from. Interpretation (path, URL, theme name) is up to the host.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconSource(String);

crate::impl_string_newtype!(IconSource);

#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    pub source: IconSource,
    pub tint: Color,
}

impl IconSpec {
    pub fn new(source: impl Into<String>, tint: Color) -> Self {
        Self {
            source: IconSource::new(source),
            tint,
        }
    }
}

fn default_fill_color() -> Color {
    Srgba::new(1.0, 1.0, 1.0, 1.0)
}

fn default_fill_color_selected() -> Color {
    Srgba::new(189.0 / 255.0, 189.0 / 255.0, 189.0 / 255.0, 1.0)
}

fn default_stroke_color() -> Color {
    Srgba::new(201.0 / 255.0, 184.0 / 255.0, 184.0 / 255.0, 1.0)
}

/// Menu configuration. Fields are only reachable through validated setters, so the
/// ordering invariants (`start <= end`, `inner <= outer`) always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    icons: Vec<IconSpec>,
    icon_size: f64,
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
    stroke_width: f64,
    fill_color: Color,
    fill_color_selected: Color,
    stroke_color: Color,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            icons: Vec::new(),
            icon_size: DEFAULT_ICON_SIZE,
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill_color: default_fill_color(),
            fill_color_selected: default_fill_color_selected(),
            stroke_color: default_stroke_color(),
        }
    }
}

impl MenuConfig {
    pub fn new(icons: Vec<IconSpec>, icon_size: f64) -> Result<Self, ConfigError> {
        if !(icon_size.is_finite() && icon_size > 0.0) {
            return Err(ConfigError::IconSize(icon_size));
        }
        Ok(Self {
            icons,
            icon_size,
            ..Self::default()
        })
    }

    pub fn icons(&self) -> &[IconSpec] {
        &self.icons
    }

    pub fn icon_size(&self) -> f64 {
        self.icon_size
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn fill_color_selected(&self) -> Color {
        self.fill_color_selected
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn arc(&self) -> ArcSpan {
        ArcSpan::new(self.start_angle, self.end_angle)
    }

    pub fn ring(&self) -> Ring {
        Ring::new(self.inner_radius, self.outer_radius)
    }

    /// Half the side of the drawing surface: the outer radius plus room for the stroke.
    pub fn surface_half_extent(&self) -> f64 {
        self.outer_radius + self.stroke_width
    }

    pub fn set_start_angle(&mut self, degrees: f64) -> Result<&mut Self, ConfigError> {
        if !DEGREES.contains(&degrees) || degrees > self.end_angle {
            return Err(ConfigError::StartAngle(degrees));
        }
        self.start_angle = degrees;
        Ok(self)
    }

    pub fn set_end_angle(&mut self, degrees: f64) -> Result<&mut Self, ConfigError> {
        if !DEGREES.contains(&degrees) || degrees < self.start_angle {
            return Err(ConfigError::EndAngle(degrees));
        }
        self.end_angle = degrees;
        Ok(self)
    }

    /// Sets both angles at once, so a move past the current opposite bound is possible.
    pub fn set_arc(&mut self, start: f64, end: f64) -> Result<&mut Self, ConfigError> {
        if !DEGREES.contains(&end) {
            return Err(ConfigError::EndAngle(end));
        }
        if !DEGREES.contains(&start) || start > end {
            return Err(ConfigError::StartAngle(start));
        }
        self.start_angle = start;
        self.end_angle = end;
        Ok(self)
    }

    pub fn set_inner_radius(&mut self, radius: f64) -> Result<&mut Self, ConfigError> {
        if !(radius.is_finite() && radius >= 0.0 && radius <= self.outer_radius) {
            return Err(ConfigError::InnerRadius(radius));
        }
        self.inner_radius = radius;
        Ok(self)
    }

    pub fn set_outer_radius(&mut self, radius: f64) -> Result<&mut Self, ConfigError> {
        if !(radius.is_finite() && radius >= 0.0 && radius >= self.inner_radius) {
            return Err(ConfigError::OuterRadius(radius));
        }
        self.outer_radius = radius;
        Ok(self)
    }

    pub fn set_radii(&mut self, inner: f64, outer: f64) -> Result<&mut Self, ConfigError> {
        if !(outer.is_finite() && outer >= 0.0) {
            return Err(ConfigError::OuterRadius(outer));
        }
        if !(inner.is_finite() && inner >= 0.0 && inner <= outer) {
            return Err(ConfigError::InnerRadius(inner));
        }
        self.inner_radius = inner;
        self.outer_radius = outer;
        Ok(self)
    }

    pub fn set_stroke_width(&mut self, width: f64) -> Result<&mut Self, ConfigError> {
        if !(width.is_finite() && width >= 0.0) {
            return Err(ConfigError::StrokeWidth(width));
        }
        self.stroke_width = width;
        Ok(self)
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.fill_color = color;
        self
    }

    pub fn set_fill_color_selected(&mut self, color: Color) -> &mut Self {
        self.fill_color_selected = color;
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.stroke_color = color;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconSettings {
    pub src: IconSource,
    pub color: HexColor,
}

/// Serialised form of a [`MenuConfig`], validated on conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub icons: Vec<IconSettings>,
    pub icon_size: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stroke_width: f64,
    pub fill_color: HexColor,
    pub fill_color_selected: HexColor,
    pub stroke_color: HexColor,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            icons: Vec::new(),
            icon_size: DEFAULT_ICON_SIZE,
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill_color: HexColor(default_fill_color()),
            fill_color_selected: HexColor(default_fill_color_selected()),
            stroke_color: HexColor(default_stroke_color()),
        }
    }
}

impl TryFrom<MenuSettings> for MenuConfig {
    type Error = ConfigError;

    fn try_from(settings: MenuSettings) -> Result<Self, Self::Error> {
        let icons = settings
            .icons
            .into_iter()
            .map(|icon| IconSpec {
                source: icon.src,
                tint: *icon.color,
            })
            .collect();

        let mut config = MenuConfig::new(icons, settings.icon_size)?;
        config
            .set_arc(settings.start_angle, settings.end_angle)?
            .set_radii(settings.inner_radius, settings.outer_radius)?
            .set_stroke_width(settings.stroke_width)?
            .set_fill_color(*settings.fill_color)
            .set_fill_color_selected(*settings.fill_color_selected)
            .set_stroke_color(*settings.stroke_color);
        Ok(config)
    }
}
