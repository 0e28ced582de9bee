// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::rc::Rc;

use kurbo::{Circle, Point, Rect, Stroke};
use peniko::{Brush, Color};
use tracing::trace;

use crate::canvas::{Canvas, IconId, TextAlign, TextStyle};
use crate::error::{RangeBarError, Result};
use crate::theme;

/// Turns a thumb's value text into the text shown in its pin.
pub trait PinFormatter {
    /// Formats `value` for display.
    fn format(&self, value: &str) -> String;
}

impl<F: Fn(&str) -> String> PinFormatter for F {
    fn format(&self, value: &str) -> String {
        self(value)
    }
}

/// One draggable thumb of a range bar.
///
/// A thumb is drawn as a circle at `(x, y)`, optionally with a pin above it showing its value.
///
/// Its touch target is a square reaching [`target_radius`](Self::target_radius) from a point
/// `padding` above its center, where the pin extends.
/// The target radius is fixed when the thumb is created, so it stays stable
/// while the host animates the pin with [`set_size`](Self::set_size).
pub struct ThumbHandle {
    position: Point,
    target_radius: f64,
    pin_radius: f64,
    padding: f64,
    pressed_once: bool,
    is_pressed: bool,
    pins_are_temporary: bool,

    circle_radius: f64,
    circle_color: Color,
    boundary: Option<(Color, f64)>,

    pin_icon: Option<IconId>,
    pin_color: Color,
    text_color: Color,
    text_y_padding: f64,
    min_font: f32,
    max_font: f32,
    density: f64,

    value: String,
    formatter: Option<Rc<dyn PinFormatter>>,
}

impl fmt::Debug for ThumbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbHandle")
            .field("position", &self.position)
            .field("target_radius", &self.target_radius)
            .field("pin_radius", &self.pin_radius)
            .field("padding", &self.padding)
            .field("pressed_once", &self.pressed_once)
            .field("is_pressed", &self.is_pressed)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

// --- MARK: BUILDERS
impl ThumbHandle {
    /// Creates a thumb at `position`, with a pin of `pin_radius` floating `padding` above it.
    ///
    /// The touch target radius is the larger of `pin_radius` and [`theme::MIN_TARGET_RADIUS`].
    /// A pin radius of zero disables pins; otherwise `pin_icon` is required.
    pub fn new(
        position: Point,
        pin_radius: f64,
        padding: f64,
        pin_icon: Option<IconId>,
    ) -> Result<Self> {
        if pin_radius > 0. && pin_icon.is_none() {
            return Err(RangeBarError::MissingIcon);
        }
        Ok(Self {
            position,
            target_radius: theme::MIN_TARGET_RADIUS.max(pin_radius),
            pin_radius,
            padding,
            pressed_once: false,
            is_pressed: false,
            pins_are_temporary: false,
            circle_radius: theme::THUMB_CIRCLE_RADIUS,
            circle_color: theme::THUMB_COLOR,
            boundary: None,
            pin_icon,
            pin_color: theme::PIN_COLOR,
            text_color: theme::PIN_TEXT_COLOR,
            text_y_padding: theme::PIN_TEXT_Y_PADDING,
            min_font: theme::MIN_PIN_FONT,
            max_font: theme::MAX_PIN_FONT,
            density: 1.,
            value: String::new(),
            formatter: None,
        })
    }

    /// Sets the minimum touch target radius, replacing [`theme::MIN_TARGET_RADIUS`].
    ///
    /// This may lower the target below the default.
    /// The target radius is never smaller than the pin radius the thumb was created with.
    pub fn with_min_target_radius(mut self, radius: f64) -> Self {
        self.target_radius = radius.max(self.pin_radius);
        self
    }

    /// Sets the radius and color of the thumb's circle.
    pub fn with_circle(mut self, radius: f64, color: impl Into<Color>) -> Self {
        self.circle_radius = radius;
        self.circle_color = color.into();
        self
    }

    /// Adds a ring of `width` drawn inside the edge of the thumb's circle.
    pub fn with_boundary(mut self, color: impl Into<Color>, width: f64) -> Self {
        self.boundary = Some((color.into(), width));
        self
    }

    /// Sets the pin tint and the color of the pin text.
    pub fn with_pin_colors(mut self, pin: impl Into<Color>, text: impl Into<Color>) -> Self {
        self.pin_color = pin.into();
        self.text_color = text.into();
        self
    }

    /// Sets whether the pin stays hidden until the thumb is first pressed.
    pub fn with_pins_are_temporary(mut self, temporary: bool) -> Self {
        self.pins_are_temporary = temporary;
        self
    }

    /// Sets the range the pin font size is calibrated within, at a density of 1.
    pub fn with_font_range(mut self, min: f32, max: f32) -> Self {
        self.min_font = min;
        self.max_font = max;
        self
    }

    /// Sets the vertical offset of the pin text from the middle of the pin.
    pub fn with_text_y_padding(mut self, padding: f64) -> Self {
        self.text_y_padding = padding;
        self
    }

    /// Sets the host's pixels per density-independent unit.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the formatter applied to the value text before it's drawn.
    pub fn with_formatter(mut self, formatter: Rc<dyn PinFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

// --- MARK: STATE
impl ThumbHandle {
    /// The thumb's center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The x coordinate of the thumb's center.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// The y coordinate of the thumb's center.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Moves the thumb horizontally.
    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    /// Moves the thumb vertically, for layout changes.
    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    /// The half-size of the touch-sensitive square.
    pub fn target_radius(&self) -> f64 {
        self.target_radius
    }

    /// The current pin radius.
    pub fn pin_radius(&self) -> f64 {
        self.pin_radius
    }

    /// The current gap between the thumb's center and the bottom of its pin.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Updates the pin radius and padding, for press animations.
    ///
    /// This doesn't change the touch target.
    pub fn set_size(&mut self, pin_radius: f64, padding: f64) {
        self.pin_radius = pin_radius;
        self.padding = padding;
    }

    /// Whether `point` is inside the thumb's touch target.
    pub fn is_in_target_zone(&self, point: Point) -> bool {
        let hit = (point.x - self.position.x).abs() <= self.target_radius
            && (point.y - self.position.y + self.padding).abs() <= self.target_radius;
        trace!(?point, hit, "Thumb hit test");
        hit
    }

    /// Marks the thumb as pressed.
    ///
    /// Once a thumb has been pressed, its pin is shown even if pins are temporary.
    pub fn mark_pressed(&mut self) {
        self.pressed_once = true;
        self.is_pressed = true;
    }

    /// Marks the thumb as released. It is still remembered as having been pressed.
    pub fn release(&mut self) {
        self.is_pressed = false;
    }

    /// Whether the thumb is currently held.
    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// Whether the thumb has ever been pressed.
    pub fn pressed_once(&self) -> bool {
        self.pressed_once
    }

    /// Sets the raw value text shown in the pin.
    pub fn set_value_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The raw value text.
    pub fn value_text(&self) -> &str {
        &self.value
    }

    /// The text drawn in the pin: the value text after formatting.
    pub fn pin_text(&self) -> String {
        match &self.formatter {
            Some(formatter) => formatter.format(&self.value),
            None => self.value.clone(),
        }
    }

    /// Replaces the pin formatter.
    pub fn set_formatter(&mut self, formatter: Option<Rc<dyn PinFormatter>>) {
        self.formatter = formatter;
    }

    /// The bounds of the pin, which sits directly above the thumb.
    pub fn pin_rect(&self) -> Rect {
        let Point { x, y } = self.position;
        let r = self.pin_radius;
        Rect::new(x - r, y - 2. * r - self.padding, x + r, y - self.padding)
    }

    fn shows_pin(&self) -> bool {
        self.pin_radius > 0. && (self.pressed_once || !self.pins_are_temporary)
    }
}

// --- MARK: PAINT
impl ThumbHandle {
    /// Draws the thumb, and its pin if it's visible.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(
            Circle::new(self.position, self.circle_radius),
            &Brush::Solid(self.circle_color),
        );
        if let Some((color, width)) = self.boundary {
            // Inset by half the stroke, so the ring's outer edge meets the circle's.
            canvas.stroke_circle(
                Circle::new(self.position, self.circle_radius - width / 2.),
                &Stroke::new(width),
                &Brush::Solid(color),
            );
        }

        if !self.shows_pin() {
            return;
        }
        // Checked when the thumb was created.
        let Some(icon) = self.pin_icon else {
            return;
        };

        let pin = self.pin_rect();
        let text = self.pin_text();
        let font_size = self.calibrate_text_size(canvas, &text, pin.width());

        canvas.draw_icon(icon, pin, self.pin_color);
        let baseline = Point::new(
            self.position.x,
            self.position.y - self.pin_radius - self.padding + self.text_y_padding,
        );
        canvas.draw_text(
            &text,
            baseline,
            &TextStyle::new(font_size, self.text_color).with_align(TextAlign::Center),
        );
    }

    /// Estimates a font size at which `text` fits a box `box_width` wide.
    ///
    /// This is a single measurement at a probe size, scaled and clamped to the
    /// configured font range. It doesn't guarantee an exact fit.
    pub fn calibrate_text_size(&self, canvas: &dyn Canvas, text: &str, box_width: f64) -> f32 {
        let measured = canvas.measure_text(text, theme::PIN_PROBE_FONT).width;
        let estimate = box_width * theme::PIN_CALIBRATION_SCALE / measured / self.density;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Font sizes are small, and clamped straight after."
        )]
        let estimate = estimate as f32;
        // An empty label measures zero wide, and its estimate overflows to the maximum.
        let clamped = if estimate.is_nan() {
            self.max_font
        } else {
            estimate.clamp(self.min_font, self.max_font)
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Densities are small positive numbers."
        )]
        let density = self.density as f32;
        clamped * density
    }
}
