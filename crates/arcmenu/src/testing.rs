//! In-memory collaborators for unit tests.

use crate::config::Color;
use crate::document::{Cursor, Document, Listener};
use crate::geometry::{Point, Rect, Size};
use crate::surface::{Bitmap, Canvas, Composite, FrameScheduler, SurfaceFrame};
use std::collections::HashMap;
use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeImage(pub Size);

impl FakeImage {
    pub fn new(width: f64, height: f64) -> Self {
        Self(Size::new(width, height))
    }
}

impl Bitmap for FakeImage {
    fn natural_size(&self) -> Size {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Configure(SurfaceFrame),
    Clear,
    Composite(Composite),
    BeginPath,
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    LineTo(Point),
    ClosePath,
    Fill(Color),
    Stroke(Color, f64),
    FillRect(Rect, Color),
    DrawImage(Rect),
}

/// Records draw calls since the last `configure`, like a canvas that is wiped on resize.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    pub presents: usize,
}

impl RecordingCanvas {
    pub fn count(&self, predicate: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }

    pub fn is_blank(&self) -> bool {
        self.ops == [Op::Clear] || self.ops.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    type Image = FakeImage;
    type Error = Infallible;

    fn configure(&mut self, frame: SurfaceFrame) -> Result<(), Infallible> {
        self.ops.clear();
        self.ops.push(Op::Configure(frame));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.ops.clear();
        self.ops.push(Op::Clear);
        Ok(())
    }

    fn set_composite(&mut self, composite: Composite) {
        self.ops.push(Op::Composite(composite));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.ops.push(Op::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    fn line_to(&mut self, point: Point) {
        self.ops.push(Op::LineTo(point));
    }

    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }

    fn fill(&mut self, color: Color) -> Result<(), Infallible> {
        self.ops.push(Op::Fill(color));
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Stroke(color, width));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Infallible> {
        self.ops.push(Op::FillRect(rect, color));
        Ok(())
    }

    fn draw_image(&mut self, _image: &FakeImage, rect: Rect) -> Result<(), Infallible> {
        self.ops.push(Op::DrawImage(rect));
        Ok(())
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}

pub const BODY: u32 = 1;
pub const TARGET: u32 = 10;
pub const TARGET_LABEL: u32 = 11;
pub const OVERLAY: u32 = 20;
pub const ELSEWHERE: u32 = 30;

/// A tiny element tree: body > {overlay, target > label, elsewhere}.
#[derive(Debug)]
pub struct FakeDocument {
    pub parents: HashMap<u32, u32>,
    pub bounds: HashMap<u32, Rect>,
    pub overlay_visible: bool,
    pub overlay_bounds: Option<Rect>,
    pub cursor: Cursor,
    pub active: Vec<(u64, Listener)>,
    pub subscribed: usize,
    pub unsubscribed: usize,
    next_subscription: u64,
}

impl Default for FakeDocument {
    fn default() -> Self {
        let parents = HashMap::from([(TARGET, BODY), (TARGET_LABEL, TARGET), (ELSEWHERE, BODY)]);
        let bounds = HashMap::from([(TARGET, Rect::new(100.0, 100.0, 40.0, 20.0))]);
        Self {
            parents,
            bounds,
            overlay_visible: false,
            overlay_bounds: None,
            cursor: Cursor::Default,
            active: Vec::new(),
            subscribed: 0,
            unsubscribed: 0,
            next_subscription: 0,
        }
    }
}

impl Document for FakeDocument {
    type Node = u32;
    type Subscription = u64;

    fn create_overlay(&mut self) -> u32 {
        OVERLAY
    }

    fn insert_overlay_before(&mut self, overlay: &u32, target: &u32) {
        if let Some(&parent) = self.parents.get(target) {
            self.parents.insert(*overlay, parent);
        }
    }

    fn parent(&self, node: &u32) -> Option<u32> {
        self.parents.get(node).copied()
    }

    fn bounds(&self, node: &u32) -> Option<Rect> {
        self.bounds.get(node).copied()
    }

    fn place_overlay(&mut self, _overlay: &u32, bounds: Rect) {
        self.overlay_bounds = Some(bounds);
    }

    fn set_overlay_visible(&mut self, _overlay: &u32, visible: bool) {
        self.overlay_visible = visible;
    }

    fn set_cursor(&mut self, _overlay: &u32, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn subscribe(&mut self, listener: Listener) -> u64 {
        self.next_subscription += 1;
        self.subscribed += 1;
        self.active.push((self.next_subscription, listener));
        self.next_subscription
    }

    fn unsubscribe(&mut self, subscription: u64) {
        let before = self.active.len();
        self.active.retain(|(id, _)| *id != subscription);
        assert_eq!(before, self.active.len() + 1, "unknown subscription");
        self.unsubscribed += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeFrames {
    pub pending: usize,
    pub requested: usize,
}

impl FrameScheduler for FakeFrames {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.requested += 1;
    }
}
