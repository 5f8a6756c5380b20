//! Integration tests across the screen models.
//!
//! These drive the models the way a host application would: through the
//! public API only, stepping with frame-sized deltas, and checking the
//! quantities the screens teach (conservation, the mean, balance).

use fairshare::{
    BalancePointModel, DistributeModel, FairShareModel, Fraction, LevelOutModel, NotepadMode,
    RippleDistributor, TiltDirection, WaterCup,
};

const FRAME: f64 = 1.0 / 60.0;

// ============================================================================
// Ripple distributor, through the public API
// ============================================================================

#[test]
fn test_documented_ripple_scenario() {
    let mut cups: Vec<WaterCup> = (0..5).map(|i| WaterCup::new(i, 0.0)).collect();
    cups[2].level = 1.0;

    let leftover = RippleDistributor::default().distribute(&mut cups, 2, 1.0);

    let expected = [0.06, 0.2, 1.0, 0.2, 0.06];
    for (cup, want) in cups.iter().zip(expected) {
        assert!((cup.level - want).abs() < 1e-8);
    }
    assert!((leftover - 0.48).abs() < 1e-8);
}

// ============================================================================
// Level Out
// ============================================================================

#[test]
fn test_level_out_session_conserves_water() {
    let mut model = LevelOutModel::new();
    model.set_active_count(6).unwrap();
    model.open_pipes();
    let total = model.total_water();

    // A user fidgeting with several cups over a few seconds.
    for (cup, target) in [(0, 1.0), (5, 0.0), (2, 0.9), (3, 0.1), (0, 0.3)] {
        model.drag_water_level(cup, target).unwrap();
        for _ in 0..30 {
            model.step(FRAME);
        }
        assert!((model.total_water() - total).abs() < 1e-9);
    }

    // Left alone, everything converges to the mean.
    for _ in 0..1200 {
        model.step(FRAME);
    }
    let mean = model.mean();
    for cup in model.active_cups() {
        assert!((cup.level - mean).abs() < 1e-5);
    }
}

#[test]
fn test_level_out_sync_equals_settled_step() {
    let mut stepped = LevelOutModel::new();
    stepped.set_active_count(4).unwrap();
    for (cup, target) in [(0, 0.9), (1, 0.1), (2, 0.7), (3, 0.3)] {
        stepped.drag_water_level(cup, target).unwrap();
    }
    let mut synced = LevelOutModel::new();
    synced.set_active_count(4).unwrap();
    for (cup, target) in [(0, 0.9), (1, 0.1), (2, 0.7), (3, 0.3)] {
        synced.drag_water_level(cup, target).unwrap();
    }

    stepped.open_pipes();
    for _ in 0..1200 {
        stepped.step(FRAME);
    }
    synced.sync();

    for (a, b) in stepped.active_cups().iter().zip(synced.active_cups()) {
        assert!((a.level - b.level).abs() < 1e-5);
    }
}

// ============================================================================
// Fair Share
// ============================================================================

#[test]
fn test_fair_share_arrangement_value_is_the_mean() {
    let mut model = FairShareModel::new();
    // Table [4, 1, 4, 3]: total 12 over 4 plates, an exact split.
    model.add_snack(0).unwrap();
    model.add_snack(0).unwrap();
    model.set_mode(NotepadMode::Share);
    while model.is_settling() {
        model.step(FRAME);
    }

    let arrangement = model.arrangement();
    assert_eq!(arrangement.whole, vec![3, 3, 3, 3]);
    assert!(arrangement.piece.is_zero());

    // Make it uneven; every plate now shows whole + piece = mean.
    model.add_snack(1).unwrap();
    while model.is_settling() {
        model.step(FRAME);
    }
    let arrangement = model.arrangement();
    assert_eq!(arrangement.piece, Fraction::new(1, 4));
    let shown = arrangement.whole[0] as f64 + arrangement.piece.value();
    assert!((shown - model.mean()).abs() < 1e-12);
}

#[test]
fn test_fair_share_round_trip_restores_sync() {
    let mut model = FairShareModel::new();
    let before = model.arrangement();

    for mode in [NotepadMode::Collect, NotepadMode::Share, NotepadMode::Sync] {
        model.set_mode(mode);
        while model.is_settling() {
            model.step(FRAME);
        }
    }

    assert_eq!(model.arrangement(), before);
}

// ============================================================================
// Distribute
// ============================================================================

#[test]
fn test_distribute_leveling_reaches_the_mean() {
    let mut model = DistributeModel::new();
    model.set_active_count(4).unwrap();
    // Table [5, 3, 4, 2]: total 14, not an integer split.
    assert!((model.mean() - 3.5).abs() < 1e-12);

    // Hand-level: two moves make [4, 4, 3, 3].
    model.move_bar(0, 1).unwrap();
    while model.is_settling() {
        model.step(FRAME);
    }
    model.move_bar(2, 3).unwrap();
    while model.is_settling() {
        model.step(FRAME);
    }

    let counts = model.notepad_counts();
    assert_eq!(counts, vec![4, 4, 3, 3]);
    // As level as whole bars allow: every plate within one of the mean.
    for &count in &counts {
        assert!((count as f64 - model.mean()).abs() < 1.0);
    }
    let total: usize = counts.iter().sum();
    assert_eq!(total, model.total_bars());
}

// ============================================================================
// Balance Point
// ============================================================================

#[test]
fn test_balance_point_mean_balances_the_beam() {
    let mut model = BalancePointModel::new();
    for x in [1.0, 2.0, 6.0, 7.0] {
        model.kick(x).unwrap();
    }
    while model.is_settling() {
        model.step(FRAME);
    }

    // Anywhere else the beam tips toward the mean.
    model.move_fulcrum(3.0);
    assert_eq!(model.tilt().direction, TiltDirection::Right);
    model.move_fulcrum(6.0);
    assert_eq!(model.tilt().direction, TiltDirection::Left);

    let mean = model.mean().unwrap();
    model.move_fulcrum(mean);
    assert!(model.is_balanced());
    assert!(model.tilt().torque.abs() < 1e-9);
}

// ============================================================================
// The same mean, four ways
// ============================================================================

#[test]
fn test_screens_agree_on_the_mean() {
    // The same data set on every screen: [2, 1, 4, 3].
    let data = [2.0, 1.0, 4.0, 3.0];
    let expected = 2.5;

    let mut cups = LevelOutModel::new();
    cups.set_active_count(4).unwrap();
    for (i, &v) in data.iter().enumerate() {
        // Scaled into cup range: a count of 4 is a full cup.
        cups.drag_water_level(i, v / 4.0).unwrap();
    }
    assert!((cups.mean() * 4.0 - expected).abs() < 1e-12);

    let snacks = FairShareModel::new();
    assert!((snacks.mean() - expected).abs() < 1e-12);

    let mut balls = BalancePointModel::new();
    for &v in &data {
        balls.kick(v).unwrap();
    }
    while balls.is_settling() {
        balls.step(FRAME);
    }
    assert!((balls.mean().unwrap() - expected).abs() < 1e-12);
}
