// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

//! Default sizes and colors for the range bar.
//!
//! Sizes are in pixels at a density of 1.0.

#![allow(missing_docs, reason = "Names are self-explanatory.")]

use peniko::Color;

// Bar
pub const BAR_WEIGHT: f64 = 2.;
pub const BAR_COLOR: Color = Color::from_rgb8(0xee, 0xee, 0xee);

// Ticks
pub const TICK_RADIUS: f64 = 1.;
pub const TICK_COLOR: Color = Color::from_rgb8(0x00, 0x00, 0x00);
pub const TICK_LABEL_COLOR: Color = Color::from_rgb8(0x77, 0x77, 0x77);
pub const TICK_LABEL_SELECTED_COLOR: Color = Color::from_rgb8(0x00, 0x00, 0x00);
pub const TICK_LABEL_SIZE: f32 = 12.;

// Thumbs
pub const THUMB_CIRCLE_RADIUS: f64 = 12.;
pub const THUMB_COLOR: Color = Color::from_rgb8(0x00, 0x96, 0x88);

/// Touch targets never shrink below this radius, whatever the pin size.
pub const MIN_TARGET_RADIUS: f64 = 24.;

// Pins
pub const PIN_RADIUS: f64 = 12.;
pub const EXPANDED_PIN_RADIUS: f64 = 16.;
pub const PIN_PADDING: f64 = 16.;
pub const PIN_COLOR: Color = Color::from_rgb8(0x00, 0x96, 0x88);
pub const PIN_TEXT_COLOR: Color = Color::from_rgb8(0xff, 0xff, 0xff);
pub const PIN_TEXT_Y_PADDING: f64 = 3.5;
pub const MIN_PIN_FONT: f32 = 8.;
pub const MAX_PIN_FONT: f32 = 24.;

/// Text size used to measure a pin label before calibrating it to the pin.
pub const PIN_PROBE_FONT: f32 = 10.;
/// Converts a measurement at [`PIN_PROBE_FONT`] into a font size which fits the pin.
pub const PIN_CALIBRATION_SCALE: f64 = 8.;

// Connector
pub const CONNECTOR_WEIGHT: f64 = 4.;
pub const CONNECTOR_COLOR: Color = Color::from_rgb8(0x00, 0x96, 0x88);
