//! # Level Out Demo
//!
//! A row of water cups joined by pipes, driven from the terminal:
//!
//! - Cups start uneven with the pipes closed
//! - Opening the pipes lets each frame ripple water toward the mean
//! - `sync()` shows the instant version of the same leveling
//!
//! Run with: `cargo run --example level_out`

use fairshare::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

fn render(model: &LevelOutModel) {
    for cup in model.active_cups() {
        let filled = (cup.level * 20.0).round() as usize;
        println!(
            "  cup {} |{:<20}| {:.3}",
            cup.index(),
            "=".repeat(filled),
            cup.level
        );
    }
    println!("  mean {:.3}, total {:.3}", model.mean(), model.total_water());
}

fn main() {
    env_logger::init();

    let mut model = LevelOutModel::new();
    model.set_active_count(5).unwrap();

    // Pour an uneven setup while the cups are independent.
    for (cup, level) in [(0, 1.0), (1, 0.1), (2, 0.8), (3, 0.2), (4, 0.4)] {
        model.drag_water_level(cup, level).unwrap();
    }
    println!("pipes closed:");
    render(&model);

    model.open_pipes();
    println!("\npipes open, leveling:");
    for second in 1..=3 {
        for _ in 0..60 {
            model.step(FRAME);
        }
        println!("after {}s:", second);
        render(&model);
    }

    // Start over and compare with the instant version.
    model.reset();
    model.set_active_count(5).unwrap();
    for (cup, level) in [(0, 1.0), (1, 0.1), (2, 0.8), (3, 0.2), (4, 0.4)] {
        model.drag_water_level(cup, level).unwrap();
    }
    model.sync();
    println!("\nsame setup, synced instantly:");
    render(&model);
}
