//! Radial ("pie-slice") selection menu engine.
//!
//! The crate lays out a ring of icon sectors around a target element, animates the ring
//! open and closed one frame at a time, paints it through a [`surface::Canvas`] and turns
//! pointer input into sector selection. Everything platform specific (rasteriser, frame
//! clock, element tree and event delivery, image decoding) is reached through the traits
//! in [`surface`] and [`document`].

pub mod config;
pub mod controller;
pub mod document;
pub mod geometry;
pub mod macros;
pub mod menu;
pub mod surface;

#[cfg(test)]
mod testing;

pub use config::{Color, ConfigError, IconSource, IconSpec, MenuConfig, MenuSettings};
pub use controller::MenuController;
pub use document::{Cursor, Document, Listener};
pub use geometry::{ArcSpan, Point, Polar, Rect, Ring, Size};
pub use menu::{AnimationState, IconVisual};
pub use surface::{Bitmap, Canvas, Composite, FrameScheduler, SurfaceFrame};
