// Copyright 2026 the Range Bar Authors
// SPDX-License-Identifier: Apache-2.0

//! Tests driving a complete [`RangeBar`] through pointer gestures and paint passes.

use std::rc::Rc;

use assert_matches::assert_matches;
use range_bar::kurbo::{Point, Rect};
use range_bar::peniko::{Brush, Color};
use range_bar::testing::{DrawCommand, RecordingCanvas};
use range_bar::tracing_backend::try_init_test_tracing;
use range_bar::{IconId, RangeBar, RangeBarOptions, RangeChanged, Thumb, TickRange, theme};

const PIN: IconId = IconId(42);

/// Four ticks, valued 0 to 3.
fn four_ticks() -> RangeBarOptions {
    RangeBarOptions {
        ticks: TickRange::new(0., 3., 1.),
        ..RangeBarOptions::default()
    }
}

/// A bar from x = 0 to 300 at y = 50, with pins.
fn bar(options: RangeBarOptions) -> RangeBar {
    let _ = try_init_test_tracing();
    RangeBar::new(
        0.,
        300.,
        50.,
        RangeBarOptions {
            pin_icon: Some(PIN),
            ..options
        },
    )
    .unwrap()
}

fn icons(canvas: &RecordingCanvas) -> Vec<Rect> {
    canvas
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Icon { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn dragging_across_every_tick_reports_each_once() {
    let mut bar = bar(four_ticks());
    assert_eq!(bar.pointer_down(Point::new(300., 40.)), None);

    let mut events = Vec::new();
    let mut x = 300.;
    while x >= -50. {
        events.extend(bar.pointer_move(Point::new(x, 40.)));
        x -= 10.;
    }
    assert_eq!(
        events,
        [
            RangeChanged { left: 0, right: 2 },
            RangeChanged { left: 0, right: 1 },
            RangeChanged { left: 0, right: 0 },
        ]
    );
    assert_eq!(
        bar.pointer_up(Point::new(-50., 40.)),
        Some(RangeChanged { left: 0, right: 0 })
    );
    assert_eq!(bar.right_thumb().x(), 0.);
    assert_eq!(bar.right_value(), 0.);
}

#[test]
fn labels_under_thumbs_are_emphasised() {
    let mut bar = bar(RangeBarOptions {
        top_labels: ["a", "b", "c", "d"].map(String::from).to_vec(),
        label_color: Color::BLACK,
        label_selected_color: Color::WHITE,
        ..four_ticks()
    });
    bar.set_thumb_indices(1, 3).unwrap();

    let mut canvas = RecordingCanvas::new();
    bar.draw(&mut canvas, 300.);
    assert_eq!(canvas.texts(), ["a", "b", "c", "d", "1", "3"]);

    let label_brushes: Vec<(String, Brush)> = canvas
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, style, .. } if text.chars().all(char::is_alphabetic) => {
                Some((text.clone(), style.brush.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        label_brushes,
        [
            ("a".to_string(), Brush::Solid(Color::BLACK)),
            ("b".to_string(), Brush::Solid(Color::WHITE)),
            ("c".to_string(), Brush::Solid(Color::BLACK)),
            ("d".to_string(), Brush::Solid(Color::WHITE)),
        ]
    );
}

#[test]
fn held_pin_is_expanded() {
    let mut bar = bar(four_ticks());
    bar.pointer_down(Point::new(300., 40.));

    let mut canvas = RecordingCanvas::new();
    bar.draw(&mut canvas, 300.);
    let r = theme::EXPANDED_PIN_RADIUS;
    let padding = theme::PIN_PADDING;
    assert_eq!(
        icons(&canvas).last(),
        Some(&Rect::new(
            300. - r,
            50. - 2. * r - padding,
            300. + r,
            50. - padding
        ))
    );

    bar.pointer_up(Point::new(300., 40.));
    canvas.take_commands();
    bar.draw(&mut canvas, 300.);
    assert_eq!(icons(&canvas)[1].width(), 2. * theme::PIN_RADIUS);
}

#[test]
fn temporary_pins_are_revealed_by_first_press() {
    let mut bar = bar(RangeBarOptions {
        pins_are_temporary: true,
        ..four_ticks()
    });

    let mut canvas = RecordingCanvas::new();
    bar.draw(&mut canvas, 300.);
    assert!(icons(&canvas).is_empty());

    bar.pointer_down(Point::new(300., 40.));
    assert_eq!(bar.pressed_thumb(), Some(Thumb::Right));
    assert_eq!(bar.pointer_up(Point::new(300., 40.)), None);

    canvas.take_commands();
    bar.draw(&mut canvas, 300.);
    assert_eq!(icons(&canvas).len(), 1);
    assert_eq!(canvas.texts(), ["3"]);
}

#[test]
fn single_thumb_bar_with_formatter() {
    let mut bar = bar(RangeBarOptions {
        ticks: TickRange::new(10., 40., 10.),
        is_range: false,
        ..four_ticks()
    })
    .with_formatter(Rc::new(|value: &str| format!("{value}%")));

    // Tapping the track moves the only thumb.
    assert_eq!(
        bar.pointer_down(Point::new(90., 50.)),
        Some(RangeChanged { left: 0, right: 1 })
    );
    bar.pointer_up(Point::new(90., 50.));
    assert_eq!(bar.right_value(), 20.);

    let mut canvas = RecordingCanvas::new();
    bar.draw(&mut canvas, 320.);
    assert_eq!(canvas.texts(), ["20%"]);
    assert_matches!(
        &canvas.commands()[1],
        DrawCommand::StrokeLine { line, brush: Brush::Gradient(_), .. }
            if line.p0.x == 0. && line.p1.x == 100.
    );
}

#[test]
fn resizing_keeps_selection() {
    let mut bar = bar(four_ticks());
    bar.set_thumb_indices(1, 2).unwrap();
    bar.set_bounds(0., 600.).unwrap();
    assert_eq!(bar.left_thumb().x(), 200.);
    assert_eq!(bar.right_thumb().x(), 400.);
    assert!(bar.right_thumb().is_in_target_zone(Point::new(400., 34.)));
}
