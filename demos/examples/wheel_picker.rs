// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives an hour picker through a drag, a fling, and programmatic scrolls.
//!
//! Run:
//! - `cargo run -p understory_demos --example wheel_picker`
//! - `RUST_LOG=understory_wheel_picker=debug cargo run -p understory_demos --example wheel_picker`

use understory_demos::render_text;
use understory_wheel_picker::{DefaultShaper, PickerConfig, PickerEvent, WheelPickerState};

const FRAME: f64 = 1.0 / 60.0;

fn label(index: usize) -> String {
    format!("{index:02}:00")
}

fn settle(picker: &mut WheelPickerState, title: &str) {
    let mut frames = 0;
    while picker.is_moving() && frames < 600 {
        picker.tick(FRAME);
        frames += 1;
    }
    println!(
        "\n== {title} ({frames} frames, settled on {:?}) ==",
        picker.settled_index()
    );
    print!("{}", render_text(picker, &DefaultShaper::WHEEL, label));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = PickerConfig::new(24, 2).expect("24 hours fit the slot space");
    let mut picker = WheelPickerState::new(config, 9);
    picker.subscribe(|event| match event {
        PickerEvent::SettledIndexChanged { previous, index } => {
            tracing::info!(?previous, ?index, "selection committed");
        }
        PickerEvent::AnimationCancelled(id) => {
            tracing::info!(id = id.get(), "animation cancelled");
        }
        _ => {}
    });
    settle(&mut picker, "start");

    // Drag up by two and a bit items, then let go slowly.
    picker.begin_drag();
    for _ in 0..10 {
        picker.drag_by(-9.0);
    }
    print!("\n-- mid-drag, live {:?} --\n", picker.live_index());
    print!("{}", render_text(&picker, &DefaultShaper::WHEEL, label));
    picker.end_drag(120.0);
    settle(&mut picker, "slow release");

    // A fast downward fling travels back through the wrap.
    picker.begin_drag();
    picker.drag_by(30.0);
    let plan = picker.plan_fling(3_000.0);
    println!("\nfling plan: {plan:?}");
    picker.end_drag(3_000.0);
    settle(&mut picker, "fast fling");

    // Re-targeting mid-flight cancels the first animation.
    picker.animate_scroll_to_index(23);
    picker.tick(FRAME);
    picker.tick(FRAME);
    picker.animate_scroll_to_index(0);
    settle(&mut picker, "retargeted to midnight");

    picker.scroll_to_index(12);
    settle(&mut picker, "jump to noon");

    let snapshot = picker.snapshot();
    println!("\nsnapshot: {snapshot:?}");
}
