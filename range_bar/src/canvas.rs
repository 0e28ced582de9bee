// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

//! The drawing surface the range bar paints onto.
//!
//! Every drawing call receives a complete description of how to paint its shape.
//! Implementations must not carry paint state from one call to the next.
//!
//! All calls happen on the thread which owns the range bar, during a single paint pass.
//! Implementations don't need to be reentrant.

use kurbo::{Circle, Line, Point, Rect, Size, Stroke};
use peniko::{Brush, Color};

/// Horizontal placement of text relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// The origin is the start of the text's baseline.
    #[default]
    Start,
    /// The origin is the middle of the text's baseline.
    Center,
}

/// How to paint a run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size, in text units.
    pub font_size: f32,
    /// Brush used to fill the glyphs.
    pub brush: Brush,
    /// Where the text sits relative to its origin.
    pub align: TextAlign,
}

impl TextStyle {
    /// Creates a start-aligned text style.
    pub fn new(font_size: f32, brush: impl Into<Brush>) -> Self {
        Self {
            font_size,
            brush: brush.into(),
            align: TextAlign::Start,
        }
    }

    /// Sets the alignment of the text.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// Identifies an icon which the host has already loaded.
///
/// The range bar only uses this to draw pins, and never inspects the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconId(pub u64);

/// A 2D surface supporting the primitives the range bar needs.
pub trait Canvas {
    /// Fills a circle.
    fn fill_circle(&mut self, circle: Circle, brush: &Brush);

    /// Strokes the outline of a circle.
    ///
    /// The stroke is centered on the circle's outline.
    fn stroke_circle(&mut self, circle: Circle, stroke: &Stroke, brush: &Brush);

    /// Strokes a line segment.
    fn stroke_line(&mut self, line: Line, stroke: &Stroke, brush: &Brush);

    /// Returns the size of the ink bounds of `text` at `font_size`.
    fn measure_text(&self, text: &str, font_size: f32) -> Size;

    /// Draws `text` with its baseline anchored at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Draws `icon` scaled into `rect`, tinted with `tint`.
    fn draw_icon(&mut self, icon: IconId, rect: Rect, tint: Color);
}
