//! # Distribute Demo
//!
//! Candy bars dealt by hand: a seeded random table, then a greedy
//! leveling pass on the notepad that moves bars from the fullest plate to
//! the emptiest until the arrangement is as level as whole bars allow.
//!
//! Run with: `cargo run --example distribute`

use fairshare::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

fn settle(model: &mut DistributeModel) {
    while model.is_settling() {
        model.step(FRAME);
    }
}

fn render(model: &DistributeModel) {
    for (index, count) in model.notepad_counts().into_iter().enumerate() {
        println!("  plate {}: {}", index, "#".repeat(count));
    }
}

fn main() {
    env_logger::init();

    let mut model = DistributeModel::new();
    model.set_active_count(4).unwrap();
    model.randomize_table(2026);
    println!("table: {:?}, mean {:.2}", model.table_counts(), model.mean());
    println!("\nnotepad before leveling:");
    render(&model);

    let mut moves = 0;
    loop {
        let counts = model.notepad_counts();
        let (fullest, &max) = counts.iter().enumerate().max_by_key(|(_, &c)| c).unwrap();
        let (emptiest, &min) = counts.iter().enumerate().min_by_key(|(_, &c)| c).unwrap();
        if max - min <= 1 {
            break;
        }
        model.move_bar(fullest, emptiest).unwrap();
        settle(&mut model);
        moves += 1;
    }

    println!("\nnotepad after {} moves:", moves);
    render(&model);
    println!("every plate within one bar of the mean {:.2}", model.mean());
}
