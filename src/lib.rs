//! # Fair Share Balance Engine
//!
//! Model layer for interactive "share and balance" math simulations: four
//! small screen models that all teach the mean, each from a different angle.
//!
//! The crate owns the numbers, not the pixels. Models hold plain data, mutate
//! through explicit operations, advance through explicit `step(dt)` calls,
//! and report changes through a simple callback registry; rendering, input,
//! sound, and accessibility stay in the host.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fairshare::prelude::*;
//!
//! fn main() {
//!     let mut model = LevelOutModel::new();
//!     model.set_active_count(5).unwrap();
//!     model.open_pipes();
//!
//!     // User drags the center cup; the pipes push back.
//!     model.drag_water_level(2, 1.0).unwrap();
//!
//!     // Host frame loop: the row ripples toward the mean.
//!     for _ in 0..240 {
//!         model.step(1.0 / 60.0);
//!     }
//!     assert!((model.cups()[2].level - model.mean()).abs() < 1e-3);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The ripple distributor
//!
//! Water leveling runs on [`RippleDistributor`]: one pass spreads a level
//! change outward from its source in expanding rings, nearest cups first,
//! clamped to `[0, 1]`, with the undistributed remainder returned to the
//! caller. [`LevelOutModel`] folds that remainder back into the source cup,
//! which makes the group's total water exactly conserved under any drag.
//!
//! ### Stepping and settling
//!
//! Nothing moves on its own. Hosts call `step(dt)` once per frame; models
//! advance their equalization or in-flight [`Transit`]s and land what
//! completed. `is_settling()` reports whether anything is still moving.
//!
//! ### Events
//!
//! Each model exposes `events()`, a [`Notifier`] of plain enums emitted
//! after mutations. Callbacks get the event by reference and read model
//! state back once the mutating call returns.
//!
//! ## Screen Overview
//!
//! | Screen | Model | The mean as |
//! |--------|-------|-------------|
//! | Level Out | [`LevelOutModel`] | the leveled water line of connected cups |
//! | Distribute | [`DistributeModel`] | the even hand-arrangement of candy bars |
//! | Fair Share | [`FairShareModel`] | an even split of snacks, fraction and all |
//! | Balance Point | [`BalancePointModel`] | the fulcrum where the beam balances |

pub mod animate;
pub mod balance;
pub mod cups;
pub mod distribute;
mod error;
pub mod fairshare;
pub mod levelout;
pub mod mean;
mod notify;
pub mod plate;
pub mod ripple;

pub use animate::{Transit, DEFAULT_TRANSIT_DURATION};
pub use balance::{BalanceEvent, BalancePointModel, BeamTilt, KickFlight, TiltDirection};
pub use cups::{Pipe, WaterCup};
pub use distribute::{BarFlight, DistributeEvent, DistributeModel};
pub use error::ModelError;
pub use fairshare::{
    Arrangement, FairShareEvent, FairShareModel, FlightDestination, NotepadMode, SnackFlight,
};
pub use glam::Vec2;
pub use levelout::{LevelOutEvent, LevelOutModel};
pub use mean::Fraction;
pub use notify::{Notifier, SubscriptionId};
pub use plate::{Plate, SnackId};
pub use ripple::{RippleDistributor, RippleProfile};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use fairshare::prelude::*;
/// ```
///
/// This imports:
/// - The four screen models and their event enums
/// - [`RippleDistributor`] and [`RippleProfile`] - the leveling core
/// - [`WaterCup`], [`Plate`], [`Fraction`] - the data they hand back
/// - [`ModelError`] - every fallible operation's error
/// - [`Vec2`] - the layout vector type
pub mod prelude {
    pub use crate::balance::{BalanceEvent, BalancePointModel, BeamTilt, TiltDirection};
    pub use crate::cups::WaterCup;
    pub use crate::distribute::{DistributeEvent, DistributeModel};
    pub use crate::fairshare::{FairShareEvent, FairShareModel, NotepadMode};
    pub use crate::levelout::{LevelOutEvent, LevelOutModel};
    pub use crate::mean::Fraction;
    pub use crate::plate::Plate;
    pub use crate::ripple::{RippleDistributor, RippleProfile};
    pub use crate::ModelError;
    pub use crate::Vec2;
}
