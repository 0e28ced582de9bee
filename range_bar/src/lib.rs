// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

//! Range Bar is the layout, hit-testing and painting core of a draggable range-selection bar.
//!
//! The bar is a horizontal line with a fixed number of discrete ticks, and one or two
//! movable thumbs which always come to rest on a tick.
//! Each thumb can show a "pin", a floating label above it which displays its current value,
//! and the thumbs are joined by a gradient connector line.
//!
//! The crate is split into three concrete components, which a host widget drives explicitly:
//!
//! - [`TickGeometry`] owns the pixel extent of the bar and its tick count.
//!   It converts between tick indices and pixel positions, snaps arbitrary positions
//!   to the nearest tick, and paints the bar, ticks and tick labels.
//! - [`ThumbHandle`] owns the position, touch target and pin state of one thumb.
//! - [`ConnectorRenderer`] paints the gradient line between two thumbs,
//!   or between the bar's start and a single thumb.
//!
//! [`RangeBar`] composes these into a complete control, translating pointer events
//! into thumb movements and [`RangeChanged`] notifications.
//!
//! None of the types here know about a window system.
//! Painting goes through the [`Canvas`] trait, which the host implements on top of
//! its own renderer, and geometry is expressed with [`kurbo`] and [`peniko`] types.
//!
//! ```
//! use range_bar::{RangeBar, RangeBarOptions, TickRange};
//! use range_bar::kurbo::Point;
//!
//! let options = RangeBarOptions {
//!     ticks: TickRange::new(0.0, 3.0, 1.0),
//!     pin_radius: 0.0,
//!     ..Default::default()
//! };
//! let mut bar = RangeBar::new(0.0, 300.0, 50.0, options).unwrap();
//! assert_eq!(bar.geometry().tick_pixel(1), 100.0);
//!
//! // Grab the right thumb, which starts on the last tick, and drop it near the third tick.
//! bar.pointer_down(Point::new(300.0, 50.0));
//! bar.pointer_move(Point::new(190.0, 50.0));
//! bar.pointer_up(Point::new(190.0, 50.0));
//! assert_eq!(bar.right_index(), 2);
//! assert_eq!(bar.right_thumb().x(), 200.0);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use kurbo;
pub use peniko;

pub mod canvas;
pub mod testing;
pub mod theme;
pub mod tracing_backend;

mod connector;
mod controller;
mod error;
mod thumb;
mod tick_geometry;

pub use canvas::{Canvas, IconId, TextAlign, TextStyle};
pub use connector::{ConnectorRenderer, ConnectorStop};
pub use controller::{RangeBar, RangeBarOptions, RangeChanged, Thumb, TickRange};
pub use error::{RangeBarError, Result};
pub use thumb::{PinFormatter, ThumbHandle};
pub use tick_geometry::{LabelPosition, TickGeometry};
