// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

//! Helpers for writing tests against the range bar.
//!
//! [`RecordingCanvas`] stands in for a real renderer: it keeps every drawing call
//! as a [`DrawCommand`], and measures text with a fixed-pitch model so that
//! layout results are predictable.
//!
//! ```
//! use range_bar::TickGeometry;
//! use range_bar::testing::{DrawCommand, RecordingCanvas};
//!
//! let geometry = TickGeometry::new(0.0, 100.0, 10.0, 3).unwrap();
//! let mut canvas = RecordingCanvas::new();
//! geometry.draw_bar(&mut canvas);
//! assert!(matches!(canvas.commands(), [DrawCommand::StrokeLine { .. }]));
//! ```

use kurbo::{Circle, Line, Point, Rect, Size, Stroke};
use peniko::{Brush, Color};

use crate::canvas::{Canvas, IconId, TextStyle};

/// A drawing call made on a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Canvas::fill_circle`].
    FillCircle {
        /// The filled circle.
        circle: Circle,
        /// The fill brush.
        brush: Brush,
    },
    /// [`Canvas::stroke_circle`].
    StrokeCircle {
        /// The outlined circle.
        circle: Circle,
        /// The stroke style.
        stroke: Stroke,
        /// The stroke brush.
        brush: Brush,
    },
    /// [`Canvas::stroke_line`].
    StrokeLine {
        /// The stroked line.
        line: Line,
        /// The stroke style.
        stroke: Stroke,
        /// The stroke brush.
        brush: Brush,
    },
    /// [`Canvas::draw_text`].
    Text {
        /// The drawn text.
        text: String,
        /// The baseline anchor.
        origin: Point,
        /// The text style.
        style: TextStyle,
    },
    /// [`Canvas::draw_icon`].
    Icon {
        /// The drawn icon.
        icon: IconId,
        /// The bounds the icon is scaled into.
        rect: Rect,
        /// The tint color.
        tint: Color,
    },
}

/// A [`Canvas`] which records drawing calls instead of rendering them.
///
/// Text is measured as `char_width * font_size` per character, and `font_size` tall.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    char_width: f64,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    /// Creates an empty recording, measuring each character as half an em wide.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            char_width: 0.5,
        }
    }

    /// Sets the width of each character, as a fraction of the font size.
    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self
    }

    /// The commands recorded so far, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the commands recorded so far, and clears the recording.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The strings drawn so far, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_circle(&mut self, circle: Circle, brush: &Brush) {
        self.commands.push(DrawCommand::FillCircle {
            circle,
            brush: brush.clone(),
        });
    }

    fn stroke_circle(&mut self, circle: Circle, stroke: &Stroke, brush: &Brush) {
        self.commands.push(DrawCommand::StrokeCircle {
            circle,
            stroke: stroke.clone(),
            brush: brush.clone(),
        });
    }

    fn stroke_line(&mut self, line: Line, stroke: &Stroke, brush: &Brush) {
        self.commands.push(DrawCommand::StrokeLine {
            line,
            stroke: stroke.clone(),
            brush: brush.clone(),
        });
    }

    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        let font_size = f64::from(font_size);
        let chars = text.chars().count() as f64;
        Size::new(chars * self.char_width * font_size, font_size)
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn draw_icon(&mut self, icon: IconId, rect: Rect, tint: Color) {
        self.commands.push(DrawCommand::Icon { icon, rect, tint });
    }
}
