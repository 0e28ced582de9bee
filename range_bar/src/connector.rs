// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Cap, Line, Point, Stroke};
use peniko::color::DynamicColor;
use peniko::{Brush, Color, ColorStop, Extend, Gradient};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::canvas::Canvas;
use crate::error::{RangeBarError, Result};
use crate::thumb::ThumbHandle;

/// One color in the connector's gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorStop {
    /// Position along the gradient, from `0.0` to `1.0`.
    pub offset: f32,
    /// Color at that position.
    pub color: Color,
}

/// Paints the line joining the thumbs of a range bar.
///
/// The line is filled with a horizontal gradient which spans the whole canvas,
/// so a thumb's section of the connector keeps its color as the thumb moves.
#[derive(Clone, Debug)]
pub struct ConnectorRenderer {
    stops: SmallVec<[ConnectorStop; 4]>,
    line_weight: f64,
    y: f64,
    /// The gradient brush, and the canvas width it was built for.
    cached: Option<(f64, Brush)>,
}

impl ConnectorRenderer {
    /// Creates a connector at height `y`, whose gradient passes evenly through `colors`.
    ///
    /// A single color gives a solid line. At least one color is required.
    pub fn new(y: f64, line_weight: f64, colors: &[Color]) -> Result<Self> {
        Ok(Self {
            stops: stops_for(colors)?,
            line_weight,
            y,
            cached: None,
        })
    }

    /// The gradient's color stops, in order. There are always at least two.
    pub fn stops(&self) -> &[ConnectorStop] {
        &self.stops
    }

    /// The thickness of the line.
    pub fn line_weight(&self) -> f64 {
        self.line_weight
    }

    /// Replaces the gradient colors.
    pub fn set_colors(&mut self, colors: &[Color]) -> Result<()> {
        self.stops = stops_for(colors)?;
        self.cached = None;
        Ok(())
    }

    /// Moves the connector to height `y`, for layout changes.
    pub fn set_y(&mut self, y: f64) {
        if self.y != y {
            self.y = y;
            self.cached = None;
        }
    }

    /// Builds the gradient brush for a canvas `canvas_width` wide.
    ///
    /// The gradient repeats past the canvas edges.
    pub fn gradient(&self, canvas_width: f64) -> Brush {
        let stops: SmallVec<[ColorStop; 4]> = self
            .stops
            .iter()
            .map(|stop| ColorStop {
                offset: stop.offset,
                color: DynamicColor::from_alpha_color(stop.color),
            })
            .collect();
        Gradient::new_linear((0., self.y), (canvas_width, self.y))
            .with_stops(&stops[..])
            .with_extend(Extend::Repeat)
            .into()
    }

    /// Draws a round-capped line from `start` to `end`.
    pub fn render(&mut self, canvas: &mut dyn Canvas, start: Point, end: Point, canvas_width: f64) {
        let brush = match self.cached.take() {
            Some((width, brush)) if width == canvas_width => brush,
            _ => {
                debug!(canvas_width, "Rebuilding connector gradient");
                self.gradient(canvas_width)
            }
        };
        trace!(?start, ?end, "Drawing connector");
        canvas.stroke_line(
            Line::new(start, end),
            &Stroke::new(self.line_weight).with_caps(Cap::Round),
            &brush,
        );
        self.cached = Some((canvas_width, brush));
    }

    /// Draws the connector between two thumbs.
    pub fn draw_between(
        &mut self,
        canvas: &mut dyn Canvas,
        left: &ThumbHandle,
        right: &ThumbHandle,
        canvas_width: f64,
    ) {
        let start = Point::new(left.x(), self.y);
        let end = Point::new(right.x(), self.y);
        self.render(canvas, start, end, canvas_width);
    }

    /// Draws the connector from a fixed `margin` to a single thumb.
    pub fn draw_from_margin(
        &mut self,
        canvas: &mut dyn Canvas,
        margin: f64,
        thumb: &ThumbHandle,
        canvas_width: f64,
    ) {
        let start = Point::new(margin, self.y);
        let end = Point::new(thumb.x(), self.y);
        self.render(canvas, start, end, canvas_width);
    }
}

/// Spreads `colors` evenly over `0.0..=1.0`, duplicating a lone color.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Gradient offsets are stored as f32."
)]
fn stops_for(colors: &[Color]) -> Result<SmallVec<[ConnectorStop; 4]>> {
    let colors: SmallVec<[Color; 4]> = match colors {
        [] => {
            return Err(RangeBarError::invalid(
                "a connector needs at least one color",
            ));
        }
        [color] => SmallVec::from_slice(&[*color, *color]),
        colors => SmallVec::from_slice(colors),
    };
    let last = (colors.len() - 1) as f64;
    Ok(colors
        .iter()
        .enumerate()
        .map(|(index, &color)| ConnectorStop {
            offset: (index as f64 / last) as f32,
            color,
        })
        .collect())
}

// --- MARK: TESTS
#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::testing::{DrawCommand, RecordingCanvas};

    const RED: Color = Color::from_rgb8(255, 0, 0);
    const GREEN: Color = Color::from_rgb8(0, 255, 0);
    const BLUE: Color = Color::from_rgb8(0, 0, 255);

    #[test]
    fn single_color_is_duplicated() {
        let connector = ConnectorRenderer::new(0., 4., &[RED]).unwrap();
        assert_eq!(
            connector.stops(),
            [
                ConnectorStop {
                    offset: 0.,
                    color: RED
                },
                ConnectorStop {
                    offset: 1.,
                    color: RED
                },
            ]
        );
    }

    #[test]
    fn stops_are_evenly_spaced() {
        let connector = ConnectorRenderer::new(0., 4., &[RED, GREEN, BLUE, RED, GREEN]).unwrap();
        let offsets: Vec<f32> = connector.stops().iter().map(|stop| stop.offset).collect();
        for (offset, expected) in offsets.iter().zip([0., 0.25, 0.5, 0.75, 1.]) {
            assert_approx_eq!(f32, *offset, expected);
        }
        assert_eq!(connector.stops()[2].color, BLUE);
    }

    #[test]
    fn empty_colors_are_rejected() {
        assert_matches!(
            ConnectorRenderer::new(0., 4., &[]),
            Err(RangeBarError::InvalidConfiguration(_))
        );
        let mut connector = ConnectorRenderer::new(0., 4., &[RED]).unwrap();
        assert_matches!(
            connector.set_colors(&[]),
            Err(RangeBarError::InvalidConfiguration(_))
        );
        assert_eq!(connector.stops().len(), 2);
    }

    #[test]
    fn gradient_spans_canvas_and_repeats() {
        let connector = ConnectorRenderer::new(30., 4., &[RED, BLUE]).unwrap();
        assert_matches!(
            connector.gradient(640.),
            Brush::Gradient(gradient)
                if gradient.stops.len() == 2 && gradient.extend == Extend::Repeat
        );
    }

    #[test]
    fn render_draws_round_capped_line() {
        let mut canvas = RecordingCanvas::new();
        let mut connector = ConnectorRenderer::new(50., 6., &[RED, BLUE]).unwrap();
        connector.render(&mut canvas, Point::new(10., 50.), Point::new(90., 50.), 100.);
        assert_matches!(
            canvas.commands(),
            [DrawCommand::StrokeLine { line, stroke, brush: Brush::Gradient(_) }]
                if *line == Line::new((10., 50.), (90., 50.))
                    && stroke.width == 6.
                    && stroke.start_cap == Cap::Round
                    && stroke.end_cap == Cap::Round
        );
    }

    #[test]
    fn gradient_follows_canvas_width() {
        let mut canvas = RecordingCanvas::new();
        let mut connector = ConnectorRenderer::new(50., 6., &[RED, BLUE]).unwrap();
        let (start, end) = (Point::new(0., 50.), Point::new(10., 50.));
        connector.render(&mut canvas, start, end, 100.);
        connector.render(&mut canvas, start, end, 100.);
        connector.render(&mut canvas, start, end, 200.);

        let brushes: Vec<Brush> = canvas
            .take_commands()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::StrokeLine { brush, .. } => Some(brush),
                _ => None,
            })
            .collect();
        assert_eq!(brushes[0], brushes[1]);
        assert_eq!(brushes[0], connector.gradient(100.));
        assert_eq!(brushes[2], connector.gradient(200.));
        assert_ne!(brushes[1], brushes[2]);
    }

    #[test]
    fn new_colors_and_height_rebuild_gradient() {
        let mut canvas = RecordingCanvas::new();
        let mut connector = ConnectorRenderer::new(50., 6., &[RED]).unwrap();
        let (start, end) = (Point::new(0., 50.), Point::new(10., 50.));
        connector.render(&mut canvas, start, end, 100.);

        connector.set_colors(&[RED, GREEN, BLUE]).unwrap();
        let recolored = connector.gradient(100.);
        connector.render(&mut canvas, start, end, 100.);

        connector.set_y(70.);
        let moved = connector.gradient(100.);
        connector.render(&mut canvas, start, end, 100.);

        let brushes: Vec<Brush> = canvas
            .take_commands()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::StrokeLine { brush, .. } => Some(brush),
                _ => None,
            })
            .collect();
        assert_matches!(&brushes[1], Brush::Gradient(gradient) if gradient.stops.len() == 3);
        assert_eq!(brushes[1], recolored);
        assert_eq!(brushes[2], moved);
        assert_ne!(recolored, moved);
    }

    #[test]
    fn draw_between_and_from_margin() {
        let mut canvas = RecordingCanvas::new();
        let mut connector = ConnectorRenderer::new(50., 4., &[RED]).unwrap();
        let left = ThumbHandle::new(Point::new(100., 50.), 0., 0., None).unwrap();
        let right = ThumbHandle::new(Point::new(200., 50.), 0., 0., None).unwrap();

        connector.draw_between(&mut canvas, &left, &right, 300.);
        connector.draw_from_margin(&mut canvas, 16., &right, 300.);

        let lines: Vec<Line> = canvas
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::StrokeLine { line, .. } => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            [
                Line::new((100., 50.), (200., 50.)),
                Line::new((16., 50.), (200., 50.)),
            ]
        );
    }
}
