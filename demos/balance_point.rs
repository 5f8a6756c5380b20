//! # Balance Point Demo
//!
//! Soccer balls kicked onto a number line, then a hunt for the fulcrum
//! position that balances the beam:
//!
//! - Kicked balls fly in and land as data points
//! - The beam's tilt reports which way to slide the fulcrum
//! - Balance lands exactly on the mean
//!
//! Run with: `cargo run --example balance_point`

use fairshare::balance::{LINE_MAX, LINE_MIN};
use fairshare::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

fn describe(tilt: &BeamTilt) -> &'static str {
    match tilt.direction {
        TiltDirection::Left => "tips left",
        TiltDirection::Balanced => "BALANCED",
        TiltDirection::Right => "tips right",
    }
}

fn main() {
    env_logger::init();

    let mut model = BalancePointModel::new();
    for x in [1.0, 3.0, 4.0, 8.0] {
        model.kick(x).unwrap();
    }
    while model.is_settling() {
        model.step(FRAME);
    }
    println!("balls landed at {:?}", model.points());

    // Walk the fulcrum across the line in half-unit steps.
    let mut x = LINE_MIN;
    while x <= LINE_MAX {
        model.move_fulcrum(x);
        let tilt = model.tilt();
        println!(
            "fulcrum {:>4.1}: torque {:>6.2}, {}",
            x,
            tilt.torque,
            describe(&tilt)
        );
        x += 0.5;
    }

    let mean = model.mean().unwrap();
    model.move_fulcrum(mean);
    println!(
        "\nmean is {:.2}; fulcrum there leaves torque {:.2} ({})",
        mean,
        model.tilt().torque,
        describe(&model.tilt())
    );
}
