//! The Level Out screen model: a row of cups joined by valved pipes.
//!
//! Each cup holds a water level in `[0, 1]`. While the pipes are closed the
//! cups are independent and a drag simply sets the dragged cup's level. While
//! the pipes are open the row is one connected body of water: drags *transfer*
//! water between the dragged cup and its neighbors through the
//! [`RippleDistributor`], and every [`LevelOutModel::step`] nudges the row
//! toward its mean, so the water visibly levels out over a second or two
//! instead of snapping.
//!
//! The group total is the model's conserved quantity: with pipes open, no
//! sequence of drags and steps changes the total water in the active cups.
//! The distributor alone does not promise that (it returns what it could not
//! place); this model closes the loop by folding the returned remainder back
//! into the cup that initiated the transfer.
//!
//! # Example
//!
//! ```ignore
//! let mut model = LevelOutModel::new();
//! model.set_active_count(3)?;
//! model.open_pipes();
//!
//! // User drags cup 0 upward; the water has to come from somewhere.
//! let reached = model.drag_water_level(0, 1.0)?;
//! assert!(reached < 1.0);
//!
//! // Left alone, the row settles to the mean.
//! for _ in 0..240 {
//!     model.step(1.0 / 60.0);
//! }
//! ```

use crate::cups::{Pipe, WaterCup};
use crate::error::ModelError;
use crate::mean;
use crate::notify::Notifier;
use crate::ripple::RippleDistributor;

/// Most cups the screen ever shows.
pub const MAX_CUPS: usize = 7;

/// Active cups when the model is created or reset.
pub const DEFAULT_CUPS: usize = 2;

/// Water level a cup starts (and re-enters) with.
pub const DEFAULT_LEVEL: f64 = 0.5;

/// Cup-heights per second the most deviant cup sheds toward the mean while
/// the pipes are open.
pub const EQUALIZE_RATE: f64 = 1.0;

/// Deviation below which the row counts as level and stepping stops.
const SETTLE_EPSILON: f64 = 1e-9;

/// What changed, reported through [`LevelOutModel::events`] after the fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelOutEvent {
    /// A cup's level changed through an explicit operation (drag or sync).
    /// Per-frame equalization does not emit; hosts stepping the model read
    /// levels back each frame anyway.
    WaterLevelChanged {
        /// Which cup.
        index: usize,
        /// Level before the operation.
        old: f64,
        /// Level after the operation.
        new: f64,
    },
    /// The pipe valves flipped.
    PipesToggled {
        /// New valve state.
        open: bool,
    },
    /// The number of active cups changed.
    ActiveCountChanged {
        /// New active count.
        count: usize,
    },
}

/// Model state for the Level Out screen.
#[derive(Debug)]
pub struct LevelOutModel {
    cups: Vec<WaterCup>,
    pipes: Vec<Pipe>,
    active_count: usize,
    distributor: RippleDistributor,
    events: Notifier<LevelOutEvent>,
}

impl LevelOutModel {
    /// Create the model with [`DEFAULT_CUPS`] active cups at
    /// [`DEFAULT_LEVEL`] and the pipes closed.
    pub fn new() -> Self {
        let cups = (0..MAX_CUPS)
            .map(|i| {
                let mut cup = WaterCup::new(i, DEFAULT_LEVEL);
                cup.enabled = i < DEFAULT_CUPS;
                cup
            })
            .collect();
        Self {
            cups,
            pipes: vec![Pipe::default(); MAX_CUPS - 1],
            active_count: DEFAULT_CUPS,
            distributor: RippleDistributor::default(),
            events: Notifier::new(),
        }
    }

    // ===== Accessors =====

    /// All cups, active or not, in row order.
    #[inline]
    pub fn cups(&self) -> &[WaterCup] {
        &self.cups
    }

    /// The active prefix of the row.
    #[inline]
    pub fn active_cups(&self) -> &[WaterCup] {
        &self.cups[..self.active_count]
    }

    /// Number of active cups.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// The pipes between adjacent cup positions.
    #[inline]
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Whether the valves are currently open.
    ///
    /// All pipes switch together; per-pipe state is kept so a future
    /// per-valve control can drive them individually.
    #[inline]
    pub fn pipes_open(&self) -> bool {
        self.pipes.first().is_some_and(|p| p.open)
    }

    /// Mean level of the active cups.
    pub fn mean(&self) -> f64 {
        mean::mean(self.active_cups().iter().map(|c| c.level)).unwrap_or(0.0)
    }

    /// Total water in the active cups, in cup-heights.
    pub fn total_water(&self) -> f64 {
        mean::total(self.active_cups().iter().map(|c| c.level))
    }

    /// Event registry for this model.
    pub fn events(&mut self) -> &mut Notifier<LevelOutEvent> {
        &mut self.events
    }

    // ===== Operations =====

    /// Set how many cups participate, `1..=`[`MAX_CUPS`].
    ///
    /// Growing enables cups at [`DEFAULT_LEVEL`]; shrinking disables from the
    /// right and discards the disabled cups' water (their levels reset).
    pub fn set_active_count(&mut self, count: usize) -> Result<(), ModelError> {
        if !(1..=MAX_CUPS).contains(&count) {
            return Err(ModelError::CountOutOfRange {
                requested: count,
                min: 1,
                max: MAX_CUPS,
            });
        }
        if count == self.active_count {
            return Ok(());
        }
        for (i, cup) in self.cups.iter_mut().enumerate() {
            let enabled = i < count;
            if cup.enabled != enabled {
                cup.enabled = enabled;
                cup.level = DEFAULT_LEVEL;
            }
        }
        self.active_count = count;
        log::debug!("active cups set to {}", count);
        self.events.emit(&LevelOutEvent::ActiveCountChanged { count });
        Ok(())
    }

    /// Handle one drag update on cup `index` toward `target` (clamped to the
    /// valid level range).
    ///
    /// Pipes closed: the cup takes the target level directly. Pipes open: the
    /// drag transfers water between the cup and the rest of the row. The
    /// distributor moves the opposing amount nearest-first, and whatever the
    /// row could not exchange this pass stays in the dragged cup, so the drag
    /// falls short of the target but the group total is conserved exactly.
    /// Repeated updates let the user keep pulling as the pipes keep up.
    ///
    /// Returns the level the cup actually reached. Errors with
    /// [`ModelError::CupInactive`] if the cup is disabled or out of range.
    pub fn drag_water_level(&mut self, index: usize, target: f64) -> Result<f64, ModelError> {
        if index >= self.active_count {
            return Err(ModelError::CupInactive(index));
        }
        let target = target.clamp(crate::cups::MIN_LEVEL, crate::cups::MAX_LEVEL);
        let old = self.cups[index].level;

        let reached = if self.pipes_open() {
            let change = target - old;
            // The drag asks neighbors for `change`; negated because the
            // distributor's delta is the amount leaving its source.
            let remainder =
                self.distributor
                    .distribute(&mut self.cups[..self.active_count], index, -change);
            self.cups[index].set_level(target + remainder)
        } else {
            self.cups[index].set_level(target)
        };

        if (reached - old).abs() > f64::EPSILON {
            self.events.emit(&LevelOutEvent::WaterLevelChanged {
                index,
                old,
                new: reached,
            });
        }
        Ok(reached)
    }

    /// Open all pipe valves. Equalization runs on subsequent steps.
    pub fn open_pipes(&mut self) {
        self.set_pipes(true);
    }

    /// Close all pipe valves. Cups keep their current levels.
    pub fn close_pipes(&mut self) {
        self.set_pipes(false);
    }

    fn set_pipes(&mut self, open: bool) {
        if self.pipes.iter().all(|p| p.open == open) {
            return;
        }
        for pipe in &mut self.pipes {
            pipe.open = open;
        }
        log::debug!("pipes {}", if open { "opened" } else { "closed" });
        self.events.emit(&LevelOutEvent::PipesToggled { open });
    }

    /// Advance equalization by `dt` seconds.
    ///
    /// No-op unless the pipes are open and at least two cups are active. Each
    /// step the most deviant cup sheds up to `EQUALIZE_RATE * dt` toward the
    /// group mean through the distributor; repeated steps converge every cup
    /// to the mean. Does not emit events (see [`LevelOutEvent`]).
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 || !self.pipes_open() || self.active_count < 2 {
            return;
        }
        let target = self.mean();

        let mut index = 0;
        let mut deviation = 0.0_f64;
        for cup in self.active_cups() {
            let dev = cup.level - target;
            if dev.abs() > deviation.abs() {
                index = cup.index();
                deviation = dev;
            }
        }
        if deviation.abs() < SETTLE_EPSILON {
            return;
        }

        let shed = (EQUALIZE_RATE * dt).min(deviation.abs());
        let delta = shed.copysign(deviation);
        let remainder =
            self.distributor
                .distribute(&mut self.cups[..self.active_count], index, delta);
        // Only what the neighbors actually exchanged leaves the source.
        let level = self.cups[index].level - (delta - remainder);
        self.cups[index].set_level(level);
    }

    /// Snap every active cup to the group mean at once.
    pub fn sync(&mut self) {
        let target = self.mean();
        for i in 0..self.active_count {
            let old = self.cups[i].level;
            if (old - target).abs() > f64::EPSILON {
                self.cups[i].level = target;
                self.events.emit(&LevelOutEvent::WaterLevelChanged {
                    index: i,
                    old,
                    new: target,
                });
            }
        }
        log::debug!("synced {} cups to mean {:.4}", self.active_count, target);
    }

    /// Return to the freshly created state. Emits no events; callers treat a
    /// reset as a full refresh.
    pub fn reset(&mut self) {
        for (i, cup) in self.cups.iter_mut().enumerate() {
            cup.level = DEFAULT_LEVEL;
            cup.enabled = i < DEFAULT_CUPS;
        }
        for pipe in &mut self.pipes {
            pipe.open = false;
        }
        self.active_count = DEFAULT_CUPS;
    }
}

impl Default for LevelOutModel {
    fn default() -> Self {
        Self::new()
    }
}
