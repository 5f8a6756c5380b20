//! # Fair Share Demo
//!
//! Snacks on table plates, redrawn on a notepad in three modes:
//!
//! - `Sync` mirrors each plate as it is
//! - `Collect` gathers everything on one stack
//! - `Share` deals the total out evenly, fractional piece included
//!
//! Run with: `cargo run --example fair_share`

use fairshare::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

fn settle(model: &mut FairShareModel) {
    let mut frames = 0;
    while model.is_settling() {
        model.step(FRAME);
        frames += 1;
    }
    if frames > 0 {
        println!("  (settled in {} frames)", frames);
    }
}

fn render(model: &FairShareModel) {
    let arrangement = model.arrangement();
    for (index, &whole) in arrangement.whole.iter().enumerate() {
        let piece = if arrangement.piece.is_zero() {
            String::new()
        } else {
            format!(" + {}", arrangement.piece)
        };
        println!("  plate {}: {}{}", index, "o".repeat(whole), piece);
    }
    if arrangement.collection > 0 {
        println!("  collected: {}", "o".repeat(arrangement.collection));
    }
    println!("  mean {:.2} snacks per plate", model.mean());
}

fn main() {
    env_logger::init();

    let mut model = FairShareModel::new();
    println!("table: {:?}, {} snacks total", model.table_counts(), model.total_snacks());

    for mode in [NotepadMode::Sync, NotepadMode::Collect, NotepadMode::Share] {
        model.set_mode(mode);
        settle(&mut model);
        println!("\nnotepad in {:?}:", mode);
        render(&model);
    }

    // One more snack makes the share uneven.
    model.add_snack(1).unwrap();
    settle(&mut model);
    println!("\nafter one more snack on plate 1:");
    render(&model);
}
