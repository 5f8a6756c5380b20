//! Water-level ripple redistribution.
//!
//! When one cup in a connected row changes level, the water it shed (or drew)
//! has to show up somewhere. [`RippleDistributor`] performs one redistribution
//! pass: it walks away from the source cup in expanding index-distance rings
//! and deposits a decaying share of the outstanding amount into each cup it
//! visits, so the nearest cups absorb the most and the change visibly
//! "ripples" outward. One call is one ripple step, not full equilibration:
//! hosts call it once per drag update (or once per animation frame) and the
//! row converges over repeated calls.
//!
//! # Contract
//!
//! - `delta` is the signed amount that *left* the source cup: positive when
//!   the source dropped (neighbors gain), negative when it rose (neighbors
//!   supply).
//! - The source cup itself is never touched; the caller owns its level.
//! - Every resulting level stays inside `[0, 1]`. Share that a full (or
//!   empty) cup cannot take is not discarded: it stays in the pool and flows
//!   to the next ring.
//! - The signed undistributed remainder is returned. Callers that need the
//!   row's total conserved exactly fold it back into the source cup, as
//!   [`crate::LevelOutModel`] does.
//!
//! Inputs are preconditions, not recoverable errors: the cup slice must be
//! non-empty, `source` in bounds, and the source cup enabled. Violations
//! panic.
//!
//! # Example
//!
//! ```ignore
//! let distributor = RippleDistributor::default();
//! let mut cups: Vec<WaterCup> = (0..5).map(|i| WaterCup::new(i, 0.0)).collect();
//! cups[2].level = 1.0;
//!
//! // One unit just left the center cup; ripple it outward.
//! let leftover = distributor.distribute(&mut cups, 2, 1.0);
//!
//! // Nearest cups took 0.2 each, the outer pair 0.06 each.
//! assert!((cups[1].level - 0.2).abs() < 1e-8);
//! assert!((cups[0].level - 0.06).abs() < 1e-8);
//! assert!((leftover - 0.48).abs() < 1e-8);
//! ```

use crate::cups::{WaterCup, MAX_LEVEL, MIN_LEVEL};

/// Share each ring of cups takes from the outstanding pool.
///
/// The profile answers one question: standing `distance` cups away from the
/// source with `remaining` water still looking for a home, how much does one
/// cup take? Larger takes level the row faster but make the motion look less
/// like a ripple and more like a jump cut.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RippleProfile {
    /// Take `remaining * take / distance`: the calibrated default.
    ///
    /// With `take = 0.2` this reproduces the tuned behavior the Level Out
    /// screen ships with: a unit shed by the center of five empty cups lands
    /// as `0.2` on each direct neighbor and `0.06` on each outer cup in a
    /// single pass.
    Harmonic {
        /// Per-cup take fraction at distance 1. Sensible range `(0, 0.5]`.
        take: f64,
    },

    /// Take `remaining * take^distance`: falls off faster with distance.
    Geometric {
        /// Per-cup take fraction at distance 1. Sensible range `(0, 0.5]`.
        take: f64,
    },

    /// Take `remaining * take` regardless of distance.
    ///
    /// Not a ripple: every ring bites equally hard. Useful for comparing
    /// against the decaying profiles in tests and calibration sessions.
    Uniform {
        /// Per-cup take fraction. Sensible range `(0, 0.5]`.
        take: f64,
    },
}

/// The take fraction the Level Out screen was calibrated with.
pub const CALIBRATED_TAKE: f64 = 0.2;

impl Default for RippleProfile {
    fn default() -> Self {
        RippleProfile::Harmonic {
            take: CALIBRATED_TAKE,
        }
    }
}

impl RippleProfile {
    /// How much one cup at `distance` takes from `remaining`.
    #[inline]
    pub fn share(&self, remaining: f64, distance: usize) -> f64 {
        match self {
            RippleProfile::Harmonic { take } => remaining * take / distance as f64,
            RippleProfile::Geometric { take } => remaining * take.powi(distance as i32),
            RippleProfile::Uniform { take } => remaining * take,
        }
    }
}

/// One-pass ripple redistribution over a row of cups.
///
/// Stateless apart from its [`RippleProfile`]; cheap to copy and safe to call
/// from any single-threaded update loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RippleDistributor {
    /// Decay profile used for every pass.
    pub profile: RippleProfile,
}

impl RippleDistributor {
    /// Create a distributor with the given profile.
    pub fn new(profile: RippleProfile) -> Self {
        Self { profile }
    }

    /// Perform one ripple pass.
    ///
    /// `delta` is the signed amount that left `cups[source]` (see the module
    /// docs for the full contract). Mutates the other enabled cups in place
    /// and returns the signed remainder that found no home this pass.
    pub fn distribute(&self, cups: &mut [WaterCup], source: usize, delta: f64) -> f64 {
        assert!(!cups.is_empty(), "Cannot distribute over an empty cup row");
        assert!(
            source < cups.len(),
            "Source index {} out of range for {} cups",
            source,
            cups.len()
        );
        assert!(cups[source].enabled, "Source cup {} is disabled", source);

        if delta == 0.0 {
            return 0.0;
        }

        let sign = delta.signum();
        let mut remaining = delta.abs();
        let max_distance = source.max(cups.len() - 1 - source);

        for distance in 1..=max_distance {
            if remaining <= 0.0 {
                break;
            }

            // Shares within a ring come off the pool as it stood when the
            // ring was entered, so the two cups of a ring take equally.
            let ring_pool = remaining;

            let below = source.checked_sub(distance);
            let above = (source + distance < cups.len()).then_some(source + distance);

            for index in [below, above].into_iter().flatten() {
                let cup = &mut cups[index];
                if !cup.enabled {
                    continue;
                }

                let share = self.profile.share(ring_pool, distance).min(remaining);
                // Room left in the direction the water is moving.
                let room = if sign > 0.0 {
                    cup.headroom()
                } else {
                    cup.level - MIN_LEVEL
                };
                let deposit = share.min(room).max(0.0);

                cup.level = (cup.level + sign * deposit).clamp(MIN_LEVEL, MAX_LEVEL);
                remaining -= deposit;
            }
        }

        let leftover = sign * remaining.max(0.0);
        log::trace!(
            "rippled {:.4} of {:.4} outward from cup {}",
            delta - leftover,
            delta,
            source
        );
        leftover
    }
}
