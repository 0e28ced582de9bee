// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

use std::rc::Rc;

use kurbo::Point;
use peniko::Color;
use tracing::{debug, trace_span, warn};

use crate::canvas::{Canvas, IconId};
use crate::connector::ConnectorRenderer;
use crate::error::{RangeBarError, Result};
use crate::thumb::{PinFormatter, ThumbHandle};
use crate::theme;
use crate::tick_geometry::TickGeometry;

/// The values a range bar's ticks stand for.
///
/// Tick `i` has the value `start + i * interval`. Ticks stop at the last one which doesn't pass `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickRange {
    /// The value of the first tick.
    pub start: f64,
    /// The largest value a tick may have.
    pub end: f64,
    /// The difference in value between adjacent ticks.
    pub interval: f64,
}

impl Default for TickRange {
    fn default() -> Self {
        Self::new(0., 5., 1.)
    }
}

impl TickRange {
    /// Creates a tick range.
    pub const fn new(start: f64, end: f64, interval: f64) -> Self {
        Self {
            start,
            end,
            interval,
        }
    }

    /// The number of ticks in this range.
    ///
    /// Fails unless the range is finite, increasing, and holds at least two ticks.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The segment count is checked to be finite and non-negative first."
    )]
    pub fn tick_count(&self) -> Result<usize> {
        let Self {
            start,
            end,
            interval,
        } = *self;
        if !start.is_finite() || !end.is_finite() || !interval.is_finite() {
            return Err(RangeBarError::invalid(format!(
                "tick range must be finite, got {start}..={end} by {interval}"
            )));
        }
        if interval <= 0. {
            return Err(RangeBarError::invalid(format!(
                "tick interval must be positive, got {interval}"
            )));
        }
        if end < start {
            return Err(RangeBarError::invalid(format!(
                "tick range is inverted: end {end} is below start {start}"
            )));
        }
        let segments = ((end - start) / interval).floor();
        if segments < 1. {
            return Err(RangeBarError::invalid(format!(
                "tick range {start}..={end} by {interval} holds fewer than two ticks"
            )));
        }
        Ok(segments as usize + 1)
    }

    /// The value of the tick at `index`.
    pub fn value_at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.interval
    }
}

/// Construction parameters for a [`RangeBar`].
///
/// The defaults show pins, so [`pin_icon`](Self::pin_icon) must be set
/// unless [`pin_radius`](Self::pin_radius) is zero.
#[derive(Clone, Debug)]
pub struct RangeBarOptions {
    /// The values of the ticks.
    pub ticks: TickRange,
    /// Whether the bar has two thumbs. A single-thumb bar selects a value between its start and its thumb.
    pub is_range: bool,

    /// The thickness of the bar line.
    pub bar_weight: f64,
    /// The color of the bar line.
    pub bar_color: Color,
    /// Whether the bar line has round caps.
    pub rounded_ends: bool,

    /// The radius of each tick's dot.
    pub tick_radius: f64,
    /// The color of ticks without an override.
    pub tick_color: Color,
    /// Per-tick color overrides, by index.
    pub tick_colors: Vec<Color>,
    /// Labels drawn above the ticks, by index.
    pub top_labels: Vec<String>,
    /// Labels drawn below the ticks, by index.
    pub bottom_labels: Vec<String>,
    /// The label for ticks past the end of a non-empty label list.
    pub default_label: String,
    /// The font size of tick labels.
    pub label_size: f32,
    /// The color of labels on ticks without a thumb.
    pub label_color: Color,
    /// The color of labels on ticks under a thumb.
    pub label_selected_color: Color,

    /// The radius of each thumb's circle.
    pub thumb_radius: f64,
    /// The fill color of each thumb's circle.
    pub thumb_color: Color,
    /// The color and width of a ring around each thumb.
    pub thumb_boundary: Option<(Color, f64)>,

    /// The resting pin radius. Zero disables pins.
    pub pin_radius: f64,
    /// The pin radius while a thumb is held.
    pub expanded_pin_radius: f64,
    /// The gap between a thumb's center and the bottom of its pin.
    pub pin_padding: f64,
    /// The icon drawn as the pin's background.
    pub pin_icon: Option<IconId>,
    /// The tint of the pin icon.
    pub pin_color: Color,
    /// The color of the value text in the pin.
    pub pin_text_color: Color,
    /// The offset of the pin text's baseline below the middle of the pin.
    pub pin_text_y_padding: f64,
    /// Whether pins stay hidden until their thumb is first pressed.
    pub pins_are_temporary: bool,

    /// The thickness of the connector line.
    pub connector_weight: f64,
    /// The colors the connector's gradient passes through. Must not be empty.
    pub connector_colors: Vec<Color>,

    /// The host's pixels per density-independent unit.
    pub density: f64,
}

impl Default for RangeBarOptions {
    fn default() -> Self {
        Self {
            ticks: TickRange::default(),
            is_range: true,
            bar_weight: theme::BAR_WEIGHT,
            bar_color: theme::BAR_COLOR,
            rounded_ends: false,
            tick_radius: theme::TICK_RADIUS,
            tick_color: theme::TICK_COLOR,
            tick_colors: Vec::new(),
            top_labels: Vec::new(),
            bottom_labels: Vec::new(),
            default_label: String::new(),
            label_size: theme::TICK_LABEL_SIZE,
            label_color: theme::TICK_LABEL_COLOR,
            label_selected_color: theme::TICK_LABEL_SELECTED_COLOR,
            thumb_radius: theme::THUMB_CIRCLE_RADIUS,
            thumb_color: theme::THUMB_COLOR,
            thumb_boundary: None,
            pin_radius: theme::PIN_RADIUS,
            expanded_pin_radius: theme::EXPANDED_PIN_RADIUS,
            pin_padding: theme::PIN_PADDING,
            pin_icon: None,
            pin_color: theme::PIN_COLOR,
            pin_text_color: theme::PIN_TEXT_COLOR,
            pin_text_y_padding: theme::PIN_TEXT_Y_PADDING,
            pins_are_temporary: false,
            connector_weight: theme::CONNECTOR_WEIGHT,
            connector_colors: vec![theme::CONNECTOR_COLOR],
            density: 1.,
        }
    }
}

/// One of the thumbs of a [`RangeBar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Thumb {
    /// The lower thumb. Only present on bars with two thumbs.
    Left,
    /// The upper thumb, which every bar has.
    Right,
}

/// The tick indices a range bar selects, after they've changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeChanged {
    /// The index of the left thumb's tick. Always `0` on a single-thumb bar.
    pub left: usize,
    /// The index of the right thumb's tick.
    pub right: usize,
}

/// A complete range-selection bar.
///
/// This composes a [`TickGeometry`], the thumbs, and a [`ConnectorRenderer`],
/// and turns pointer events into thumb movements.
///
/// Every thumb rests on a tick, except while it's being dragged.
/// The left thumb never passes the right one.
pub struct RangeBar {
    geometry: TickGeometry,
    ticks: TickRange,
    is_range: bool,
    left: ThumbHandle,
    right: ThumbHandle,
    left_index: usize,
    right_index: usize,
    connector: ConnectorRenderer,

    pin_radius: f64,
    expanded_pin_radius: f64,
    pin_padding: f64,

    pressed: Option<Thumb>,
    /// The indices when the pointer went down.
    gesture_start: RangeChanged,
}

impl std::fmt::Debug for RangeBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeBar")
            .field("geometry", &self.geometry)
            .field("ticks", &self.ticks)
            .field("is_range", &self.is_range)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("left_index", &self.left_index)
            .field("right_index", &self.right_index)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

// --- MARK: BUILDERS
impl RangeBar {
    /// Creates a bar spanning `left_x..=right_x` at height `y`.
    ///
    /// The thumbs start on the first and last ticks. A single-thumb bar starts on the last tick.
    pub fn new(left_x: f64, right_x: f64, y: f64, options: RangeBarOptions) -> Result<Self> {
        let tick_count = options.ticks.tick_count()?;
        let geometry = TickGeometry::new(left_x, right_x, y, tick_count)?
            .with_bar(options.bar_weight, options.bar_color)
            .with_rounded_ends(options.rounded_ends)
            .with_tick_radius(options.tick_radius)
            .with_tick_color(options.tick_color)
            .with_tick_colors(options.tick_colors)
            .with_label_colors(options.label_color, options.label_selected_color)
            .with_label_size(options.label_size)
            .with_label_offset(options.pin_radius)
            .with_top_labels(options.top_labels)
            .with_bottom_labels(options.bottom_labels)
            .with_default_label(options.default_label);

        let make_thumb = |x: f64| -> Result<ThumbHandle> {
            let thumb = ThumbHandle::new(
                Point::new(x, y),
                options.pin_radius,
                options.pin_padding,
                options.pin_icon,
            )?
            .with_circle(options.thumb_radius, options.thumb_color)
            .with_pin_colors(options.pin_color, options.pin_text_color)
            .with_text_y_padding(options.pin_text_y_padding)
            .with_pins_are_temporary(options.pins_are_temporary)
            .with_density(options.density);
            Ok(match options.thumb_boundary {
                Some((color, width)) => thumb.with_boundary(color, width),
                None => thumb,
            })
        };
        let left = make_thumb(left_x)?;
        let right = make_thumb(right_x)?;
        let connector =
            ConnectorRenderer::new(y, options.connector_weight, &options.connector_colors)?;

        let right_index = geometry.num_segments();
        let mut bar = Self {
            geometry,
            ticks: options.ticks,
            is_range: options.is_range,
            left,
            right,
            left_index: 0,
            right_index,
            connector,
            pin_radius: options.pin_radius,
            expanded_pin_radius: options.expanded_pin_radius,
            pin_padding: options.pin_padding,
            pressed: None,
            gesture_start: RangeChanged {
                left: 0,
                right: right_index,
            },
        };
        bar.update_value_texts();
        Ok(bar)
    }

    /// Sets the formatter used for the text in both pins.
    pub fn with_formatter(mut self, formatter: Rc<dyn PinFormatter>) -> Self {
        self.set_formatter(Some(formatter));
        self
    }
}

// --- MARK: QUERIES
impl RangeBar {
    /// The bar's tick layout.
    pub fn geometry(&self) -> &TickGeometry {
        &self.geometry
    }

    /// The values of the bar's ticks.
    pub fn tick_range(&self) -> TickRange {
        self.ticks
    }

    /// Whether the bar has two thumbs.
    pub fn is_range(&self) -> bool {
        self.is_range
    }

    /// The left thumb. On a single-thumb bar, this is never drawn and stays on the first tick.
    pub fn left_thumb(&self) -> &ThumbHandle {
        &self.left
    }

    /// The right thumb.
    pub fn right_thumb(&self) -> &ThumbHandle {
        &self.right
    }

    /// The tick index of the left thumb.
    pub fn left_index(&self) -> usize {
        self.left_index
    }

    /// The tick index of the right thumb.
    pub fn right_index(&self) -> usize {
        self.right_index
    }

    /// The value of the left thumb's tick.
    pub fn left_value(&self) -> f64 {
        self.ticks.value_at(self.left_index)
    }

    /// The value of the right thumb's tick.
    pub fn right_value(&self) -> f64 {
        self.ticks.value_at(self.right_index)
    }

    /// The thumb currently held by the pointer, if any.
    pub fn pressed_thumb(&self) -> Option<Thumb> {
        self.pressed
    }

    fn indices(&self) -> RangeChanged {
        RangeChanged {
            left: self.left_index,
            right: self.right_index,
        }
    }

    fn thumb_mut(&mut self, thumb: Thumb) -> &mut ThumbHandle {
        match thumb {
            Thumb::Left => &mut self.left,
            Thumb::Right => &mut self.right,
        }
    }
}

// --- MARK: MUTATORS
impl RangeBar {
    /// Moves the thumbs to the ticks at `left` and `right`.
    ///
    /// On a single-thumb bar, `left` is ignored.
    pub fn set_thumb_indices(&mut self, left: usize, right: usize) -> Result<()> {
        let left = if self.is_range { left } else { 0 };
        let last = self.geometry.num_segments();
        if left > right || right > last {
            return Err(RangeBarError::invalid(format!(
                "thumb indices {left}..={right} are not an ordered range within 0..={last}"
            )));
        }
        self.left_index = left;
        self.right_index = right;
        self.snap_thumbs();
        debug!(left, right, "Thumb indices set");
        Ok(())
    }

    /// Changes the values of the ticks, and so the number of ticks.
    ///
    /// Thumbs past the new last tick are moved onto it.
    pub fn set_tick_range(&mut self, ticks: TickRange) -> Result<()> {
        let tick_count = ticks.tick_count()?;
        self.geometry.set_tick_count(tick_count)?;
        self.ticks = ticks;

        let last = self.geometry.num_segments();
        if self.right_index > last {
            warn!(
                right = self.right_index,
                last, "Thumbs past the last tick were moved onto it"
            );
            self.right_index = last;
            self.left_index = self.left_index.min(last);
        }
        self.snap_thumbs();
        Ok(())
    }

    /// Moves the bar to span `left_x..=right_x`, keeping the thumbs on their ticks.
    pub fn set_bounds(&mut self, left_x: f64, right_x: f64) -> Result<()> {
        self.geometry.set_bounds(left_x, right_x)?;
        self.snap_thumbs();
        Ok(())
    }

    /// Moves the bar, its thumbs and the connector to height `y`.
    pub fn set_y(&mut self, y: f64) {
        self.geometry.set_y(y);
        self.left.set_y(y);
        self.right.set_y(y);
        self.connector.set_y(y);
        debug!(y, "Bar moved vertically");
    }

    /// Replaces the labels drawn above the ticks.
    pub fn set_top_labels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.geometry.set_top_labels(labels);
    }

    /// Replaces the labels drawn below the ticks.
    pub fn set_bottom_labels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.geometry.set_bottom_labels(labels);
    }

    /// Replaces the connector's gradient colors.
    pub fn set_connector_colors(&mut self, colors: &[Color]) -> Result<()> {
        self.connector.set_colors(colors)
    }

    /// Sets the formatter used for the text in both pins.
    pub fn set_formatter(&mut self, formatter: Option<Rc<dyn PinFormatter>>) {
        self.left.set_formatter(formatter.clone());
        self.right.set_formatter(formatter);
    }

    fn snap_thumbs(&mut self) {
        self.left.set_x(self.geometry.tick_pixel(self.left_index));
        self.right.set_x(self.geometry.tick_pixel(self.right_index));
        self.update_value_texts();
    }

    fn update_value_texts(&mut self) {
        self.left.set_value_text(value_text(self.left_value()));
        self.right.set_value_text(value_text(self.right_value()));
    }
}

// --- MARK: POINTER
impl RangeBar {
    /// Handles the pointer going down at `point`.
    ///
    /// A thumb whose touch target contains `point` is picked up.
    /// Otherwise the nearest thumb jumps to the tick nearest `point` and is picked up,
    /// and the new indices are returned if they changed.
    ///
    /// A thumb still held from an earlier press is settled on its tick and released first.
    pub fn pointer_down(&mut self, point: Point) -> Option<RangeChanged> {
        if let Some(held) = self.pressed.take() {
            warn!(?held, "Pointer went down twice without going up");
            self.settle(held);
        }
        self.gesture_start = self.indices();
        let left_hit = self.is_range && self.left.is_in_target_zone(point);
        let right_hit = self.right.is_in_target_zone(point);
        let thumb = match (left_hit, right_hit) {
            (true, false) => Thumb::Left,
            (false, true) => Thumb::Right,
            _ => self.nearest_thumb(point.x),
        };

        self.pressed = Some(thumb);
        let expanded = self.expanded_pin_radius;
        let padding = self.pin_padding;
        let pins = self.pin_radius > 0.;
        let handle = self.thumb_mut(thumb);
        handle.mark_pressed();
        if pins {
            handle.set_size(expanded, padding);
        }
        debug!(?thumb, left_hit, right_hit, "Thumb pressed");

        if left_hit || right_hit {
            return None;
        }
        let change = self.drag_to(thumb, point.x);
        self.snap_thumbs();
        change
    }

    /// Handles the pointer moving to `point`.
    ///
    /// The held thumb follows the pointer, within the bar and without passing the other thumb.
    /// Returns the new indices when the held thumb moves nearer a different tick.
    pub fn pointer_move(&mut self, point: Point) -> Option<RangeChanged> {
        let thumb = self.pressed?;
        self.drag_to(thumb, point.x)
    }

    /// Handles the pointer going up at `point`.
    ///
    /// The held thumb moves to `point`, then settles on the nearest tick.
    /// Returns the indices if they differ from when the pointer went down.
    pub fn pointer_up(&mut self, point: Point) -> Option<RangeChanged> {
        let thumb = self.pressed.take()?;
        self.drag_to(thumb, point.x);
        self.settle(thumb);

        let indices = self.indices();
        debug!(?thumb, left = indices.left, right = indices.right, "Thumb released");
        (indices != self.gesture_start).then_some(indices)
    }

    /// Snaps the thumbs to their ticks, and returns `thumb` to its resting size.
    fn settle(&mut self, thumb: Thumb) {
        self.snap_thumbs();
        let resting = self.pin_radius;
        let padding = self.pin_padding;
        let handle = self.thumb_mut(thumb);
        handle.release();
        handle.set_size(resting, padding);
    }

    /// Picks the thumb nearer to `x`.
    ///
    /// Coincident thumbs resolve to the one which can still move apart from the other.
    fn nearest_thumb(&self, x: f64) -> Thumb {
        if !self.is_range {
            return Thumb::Right;
        }
        let to_left = (x - self.left.x()).abs();
        let to_right = (x - self.right.x()).abs();
        if to_left < to_right {
            Thumb::Left
        } else if to_right < to_left || self.right_index < self.geometry.num_segments() {
            Thumb::Right
        } else {
            Thumb::Left
        }
    }

    fn drag_to(&mut self, thumb: Thumb, x: f64) -> Option<RangeChanged> {
        let (min, max) = match thumb {
            Thumb::Left => (self.geometry.left_x(), self.right.x()),
            Thumb::Right if self.is_range => (self.left.x(), self.geometry.right_x()),
            Thumb::Right => (self.geometry.left_x(), self.geometry.right_x()),
        };
        let x = x.clamp(min, max);
        let index = self.geometry.nearest_tick_index(x);
        self.thumb_mut(thumb).set_x(x);

        let slot = match thumb {
            Thumb::Left => &mut self.left_index,
            Thumb::Right => &mut self.right_index,
        };
        if *slot == index {
            return None;
        }
        *slot = index;
        self.update_value_texts();
        debug!(?thumb, index, "Thumb moved to new tick");
        Some(self.indices())
    }
}

// --- MARK: PAINT
impl RangeBar {
    /// Draws the whole bar onto a canvas `canvas_width` wide.
    ///
    /// The bar is drawn first, then the connector, the ticks, and finally the thumbs.
    /// A held thumb is drawn above the other.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, canvas_width: f64) {
        let _span = trace_span!("RangeBar::draw", canvas_width).entered();
        self.geometry.draw_bar(canvas);
        if self.is_range {
            self.connector
                .draw_between(canvas, &self.left, &self.right, canvas_width);
            self.geometry
                .draw_ticks(canvas, &[self.left.x(), self.right.x()]);
            if self.pressed == Some(Thumb::Left) {
                self.right.render(canvas);
                self.left.render(canvas);
            } else {
                self.left.render(canvas);
                self.right.render(canvas);
            }
        } else {
            self.connector.draw_from_margin(
                canvas,
                self.geometry.left_x(),
                &self.right,
                canvas_width,
            );
            self.geometry.draw_ticks(canvas, &[self.right.x()]);
            self.right.render(canvas);
        }
    }
}

/// Formats a tick value for a pin, dropping the noise of multiplying by the interval.
fn value_text(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    // Avoid printing "-0".
    if rounded == 0. {
        return "0".to_string();
    }
    format!("{rounded}")
}
