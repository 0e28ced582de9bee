// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Cap, Circle, Line, Point, Stroke};
use peniko::{Brush, Color};
use tracing::{debug, trace_span};

use crate::canvas::{Canvas, TextStyle};
use crate::error::{RangeBarError, Result};
use crate::theme;

/// Positions closer than this to a tick are considered to be on it.
const TICK_EPSILON: f64 = 1e-6;

/// Which side of the bar a tick label is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPosition {
    /// Above the bar.
    Top,
    /// Below the bar.
    Bottom,
}

/// The segment model of a range bar.
///
/// The bar runs horizontally from `left_x` to `right_x` at height `y`,
/// and is divided into `tick_count - 1` equal segments.
/// Ticks are indexed from `0` (at `left_x`) to [`num_segments`](Self::num_segments) (at `right_x`).
#[derive(Clone, Debug)]
pub struct TickGeometry {
    left_x: f64,
    right_x: f64,
    y: f64,
    num_segments: usize,
    tick_spacing: f64,

    bar_weight: f64,
    bar_color: Color,
    rounded_ends: bool,

    tick_radius: f64,
    tick_color: Color,
    tick_colors: Vec<Color>,

    label_color: Color,
    label_selected_color: Color,
    label_size: f32,
    label_offset: f64,
    top_labels: Vec<String>,
    bottom_labels: Vec<String>,
    default_label: String,
}

// --- MARK: BUILDERS
impl TickGeometry {
    /// Creates the geometry for a bar spanning `left_x..=right_x` at height `y`.
    ///
    /// Fails if the bounds are inverted or not finite, or if `tick_count` is less than two.
    pub fn new(left_x: f64, right_x: f64, y: f64, tick_count: usize) -> Result<Self> {
        check_bounds(left_x, right_x)?;
        let num_segments = segments_for(tick_count)?;
        Ok(Self {
            left_x,
            right_x,
            y,
            num_segments,
            tick_spacing: (right_x - left_x) / num_segments as f64,
            bar_weight: theme::BAR_WEIGHT,
            bar_color: theme::BAR_COLOR,
            rounded_ends: false,
            tick_radius: theme::TICK_RADIUS,
            tick_color: theme::TICK_COLOR,
            tick_colors: Vec::new(),
            label_color: theme::TICK_LABEL_COLOR,
            label_selected_color: theme::TICK_LABEL_SELECTED_COLOR,
            label_size: theme::TICK_LABEL_SIZE,
            label_offset: theme::PIN_RADIUS,
            top_labels: Vec::new(),
            bottom_labels: Vec::new(),
            default_label: String::new(),
        })
    }

    /// Sets the thickness and color of the bar line.
    pub fn with_bar(mut self, weight: f64, color: impl Into<Color>) -> Self {
        self.bar_weight = weight;
        self.bar_color = color.into();
        self
    }

    /// Sets whether the ends of the bar line are rounded.
    pub fn with_rounded_ends(mut self, rounded: bool) -> Self {
        self.rounded_ends = rounded;
        self
    }

    /// Sets the radius of the dot drawn for each tick.
    ///
    /// Labels on the first and last tick are pulled inwards by this amount.
    pub fn with_tick_radius(mut self, radius: f64) -> Self {
        self.tick_radius = radius;
        self
    }

    /// Sets the color used for ticks without an override.
    pub fn with_tick_color(mut self, color: impl Into<Color>) -> Self {
        self.tick_color = color.into();
        self
    }

    /// Sets per-tick color overrides.
    ///
    /// Entry `i` colors tick `i`. Ticks past the end of `colors` use the default tick color.
    pub fn with_tick_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.tick_colors = colors.into_iter().collect();
        self
    }

    /// Sets the label colors, for ticks without and with a thumb on them.
    pub fn with_label_colors(mut self, color: impl Into<Color>, selected: impl Into<Color>) -> Self {
        self.label_color = color.into();
        self.label_selected_color = selected.into();
        self
    }

    /// Sets the font size of the tick labels.
    pub fn with_label_size(mut self, size: f32) -> Self {
        self.label_size = size;
        self
    }

    /// Sets the extra distance between the bar and its labels.
    ///
    /// This is usually the pin radius, so that labels clear the thumbs.
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    /// Sets the labels drawn above the bar.
    pub fn with_top_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.top_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the labels drawn below the bar.
    pub fn with_bottom_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.bottom_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the label used for ticks past the end of a non-empty label sequence.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }
}

// --- MARK: QUERIES
impl TickGeometry {
    /// The x coordinate of the first tick.
    pub fn left_x(&self) -> f64 {
        self.left_x
    }

    /// The x coordinate of the last tick.
    pub fn right_x(&self) -> f64 {
        self.right_x
    }

    /// The y coordinate of the bar.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// The number of ticks on the bar. Always at least two.
    pub fn tick_count(&self) -> usize {
        self.num_segments + 1
    }

    /// The number of segments between ticks, which is also the index of the last tick.
    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    /// The distance in pixels between adjacent ticks.
    pub fn tick_spacing(&self) -> f64 {
        self.tick_spacing
    }

    /// Returns the index of the tick nearest to `x`.
    ///
    /// A position exactly halfway between two ticks resolves to the higher one.
    /// Positions outside the bar resolve to the closest end tick.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The index is clamped to the segment range first."
    )]
    pub fn nearest_tick_index(&self, x: f64) -> usize {
        if self.tick_spacing <= 0. {
            return 0;
        }
        let index = ((x - self.left_x + self.tick_spacing / 2.) / self.tick_spacing).floor();
        if index.is_nan() {
            return 0;
        }
        index.clamp(0., self.num_segments as f64) as usize
    }

    /// Returns the x coordinate of the tick nearest to `x`.
    pub fn nearest_tick_pixel(&self, x: f64) -> f64 {
        self.tick_pixel(self.nearest_tick_index(x))
    }

    /// Returns the x coordinate of the tick at `index`.
    ///
    /// `index` must be at most [`num_segments`](Self::num_segments).
    pub fn tick_pixel(&self, index: usize) -> f64 {
        debug_assert!(
            index <= self.num_segments,
            "tick index {index} is past the last tick {}",
            self.num_segments
        );
        if index == self.num_segments {
            // Exact, rather than accumulating the spacing's rounding error.
            return self.right_x;
        }
        self.left_x + (self.right_x - self.left_x) / self.num_segments as f64 * index as f64
    }

    /// Returns the label for the tick at `index`.
    ///
    /// When no labels were configured for `position`, this is empty.
    /// When labels were configured but none covers `index`, this is the default label.
    pub fn label_for(&self, index: usize, position: LabelPosition) -> &str {
        let labels = match position {
            LabelPosition::Top => &self.top_labels,
            LabelPosition::Bottom => &self.bottom_labels,
        };
        if labels.is_empty() {
            return "";
        }
        labels.get(index).unwrap_or(&self.default_label)
    }

    /// Whether any of the thumbs at `thumb_xs` sits on the tick at `index`.
    pub fn is_tick_selected(&self, index: usize, thumb_xs: &[f64]) -> bool {
        let tick_x = self.tick_pixel(index);
        thumb_xs
            .iter()
            .any(|thumb_x| (thumb_x - tick_x).abs() <= TICK_EPSILON)
    }

    /// Returns the color of the tick at `index`.
    pub fn tick_color(&self, index: usize) -> Color {
        self.tick_colors
            .get(index)
            .copied()
            .unwrap_or(self.tick_color)
    }
}

// --- MARK: MUTATORS
impl TickGeometry {
    /// Changes the number of ticks, keeping the bar's bounds.
    pub fn set_tick_count(&mut self, tick_count: usize) -> Result<()> {
        self.num_segments = segments_for(tick_count)?;
        self.recompute_spacing();
        debug!(
            tick_count,
            spacing = self.tick_spacing,
            "Tick count changed"
        );
        Ok(())
    }

    /// Moves the bar to span `left_x..=right_x`, keeping the tick count.
    pub fn set_bounds(&mut self, left_x: f64, right_x: f64) -> Result<()> {
        check_bounds(left_x, right_x)?;
        self.left_x = left_x;
        self.right_x = right_x;
        self.recompute_spacing();
        debug!(left_x, right_x, spacing = self.tick_spacing, "Bar bounds changed");
        Ok(())
    }

    /// Moves the bar to height `y`.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Replaces the labels drawn above the bar.
    pub fn set_top_labels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.top_labels = labels.into_iter().map(Into::into).collect();
    }

    /// Replaces the labels drawn below the bar.
    pub fn set_bottom_labels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.bottom_labels = labels.into_iter().map(Into::into).collect();
    }

    fn recompute_spacing(&mut self) {
        self.tick_spacing = (self.right_x - self.left_x) / self.num_segments as f64;
    }
}

// --- MARK: PAINT
impl TickGeometry {
    /// Draws the bar line.
    pub fn draw_bar(&self, canvas: &mut dyn Canvas) {
        let cap = if self.rounded_ends {
            Cap::Round
        } else {
            Cap::Butt
        };
        canvas.stroke_line(
            Line::new((self.left_x, self.y), (self.right_x, self.y)),
            &Stroke::new(self.bar_weight).with_caps(cap),
            &Brush::Solid(self.bar_color),
        );
    }

    /// Draws a dot for every tick, and the tick labels.
    ///
    /// Labels under one of the `thumb_xs` are drawn in the selected label color.
    pub fn draw_ticks(&self, canvas: &mut dyn Canvas, thumb_xs: &[f64]) {
        let _span = trace_span!("TickGeometry::draw_ticks", ticks = self.tick_count()).entered();
        for index in 0..=self.num_segments {
            let x = self.tick_pixel(index);
            canvas.fill_circle(
                Circle::new((x, self.y), self.tick_radius),
                &Brush::Solid(self.tick_color(index)),
            );
            if !self.top_labels.is_empty() {
                self.draw_tick_label(canvas, index, x, LabelPosition::Top, thumb_xs);
            }
            if !self.bottom_labels.is_empty() {
                self.draw_tick_label(canvas, index, x, LabelPosition::Bottom, thumb_xs);
            }
        }
    }

    fn draw_tick_label(
        &self,
        canvas: &mut dyn Canvas,
        index: usize,
        tick_x: f64,
        position: LabelPosition,
        thumb_xs: &[f64],
    ) {
        let label = self.label_for(index, position);
        if label.trim().is_empty() {
            return;
        }
        let bounds = canvas.measure_text(label, self.label_size);

        let mut x = tick_x - bounds.width / 2.;
        if index == 0 {
            x += self.tick_radius;
        } else if index == self.num_segments {
            x -= self.tick_radius;
        }
        let y = match position {
            LabelPosition::Top => self.y - bounds.height - self.label_offset,
            LabelPosition::Bottom => self.y + bounds.height + self.label_offset,
        };

        let color = if self.is_tick_selected(index, thumb_xs) {
            self.label_selected_color
        } else {
            self.label_color
        };
        canvas.draw_text(
            label,
            Point::new(x, y),
            &TextStyle::new(self.label_size, color),
        );
    }
}

fn check_bounds(left_x: f64, right_x: f64) -> Result<()> {
    if !left_x.is_finite() || !right_x.is_finite() {
        return Err(RangeBarError::invalid(format!(
            "bar bounds must be finite, got {left_x}..={right_x}"
        )));
    }
    if right_x < left_x {
        return Err(RangeBarError::invalid(format!(
            "bar bounds are inverted: right {right_x} is left of {left_x}"
        )));
    }
    Ok(())
}

fn segments_for(tick_count: usize) -> Result<usize> {
    if tick_count < 2 {
        return Err(RangeBarError::invalid(format!(
            "a bar needs at least two ticks, got {tick_count}"
        )));
    }
    Ok(tick_count - 1)
}
