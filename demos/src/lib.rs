// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.
//!
//! Run:
//! - `cargo run -p understory_demos --example wheel_picker`

use std::fmt::Write as _;

use kurbo::Rect;
use understory_wheel_picker::{ItemShaper, Orientation, SlotViewport, WheelPickerState};

/// Draws the visible window of `picker` as text, one row per slot.
///
/// Rows inside the focus rect are marked with `>`. Opacity is shown as a bar
/// so fades are visible in a terminal.
pub fn render_text<V: SlotViewport>(
    picker: &WheelPickerState<V>,
    shaper: &impl ItemShaper,
    label: impl Fn(usize) -> String,
) -> String {
    let geometry = picker.geometry();
    let orientation = geometry.orientation();
    let focus = main_span(geometry.focus_rect(), orientation);
    let mut out = String::new();
    for rendered in picker.render_items(shaper, label) {
        let item = rendered.item;
        let span = item.rect.map(|rect| main_span(rect, orientation));
        let in_focus = span.is_some_and(|(start, end)| {
            let center = (start + end) * 0.5;
            center >= focus.0 && center < focus.1
        });
        let marker = if in_focus { '>' } else { ' ' };
        let bar_len = (item.transform.alpha * 10.0).round().clamp(0.0, 10.0) as usize;
        let bar = "#".repeat(bar_len);
        let top = span.map_or(f64::NAN, |(start, _)| start);
        let _ = writeln!(
            out,
            "{marker} {top:7.1}  {bar:<10}  {:>5.2}°  {}",
            item.transform.rotation_degrees, rendered.content
        );
    }
    out
}

/// Start and end of `rect` along the scroll axis.
fn main_span(rect: Rect, orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (rect.y0, rect.y1),
        Orientation::Horizontal => (rect.x0, rect.x1),
    }
}
