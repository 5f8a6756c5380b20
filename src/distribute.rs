//! The Distribute screen model: candy bars reallocated by hand.
//!
//! The table holds the ground truth as plain per-plate counts driven by
//! spinners. The notepad holds an identified copy of every bar, and the user
//! predicts the mean by dragging bars between notepad plates:
//! [`DistributeModel::move_bar`] launches one bar on a [`Transit`] and lands
//! it on the destination plate. Moving bars around never changes the total,
//! so the leveled-out arrangement the user is hunting for sits exactly at the
//! table's mean.
//!
//! Editing the table invalidates the prediction: any table change resets the
//! notepad to mirror the table again, dropping in-flight bars. Capacity
//! checks count in-flight arrivals, so a plate can never be promised more
//! bars than it can hold.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::animate::{Transit, DEFAULT_TRANSIT_DURATION};
use crate::error::ModelError;
use crate::notify::Notifier;
use crate::plate::{plate_position, Plate, SnackId, MAX_PLATES, PLATE_CAPACITY};

/// Active plates when the model is created or reset.
pub const DEFAULT_PLATES: usize = 2;

/// Candy bars each table plate starts (and re-enters) with.
pub const INITIAL_TABLE_BARS: [usize; MAX_PLATES] = [5, 3, 4, 2, 6, 1, 3];

/// One candy bar in flight between notepad plates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarFlight {
    bar: SnackId,
    transit: Transit,
    to: usize,
}

impl BarFlight {
    /// Which bar is flying.
    #[inline]
    pub fn bar(&self) -> SnackId {
        self.bar
    }

    /// The flight's motion state.
    #[inline]
    pub fn transit(&self) -> &Transit {
        &self.transit
    }

    /// The notepad plate the bar lands on.
    #[inline]
    pub fn destination(&self) -> usize {
        self.to
    }
}

/// What changed, reported through [`DistributeModel::events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributeEvent {
    /// A table plate's bar count changed (and the notepad was reset).
    TableChanged {
        /// Which plate.
        index: usize,
        /// Its new count.
        count: usize,
    },
    /// An in-flight bar landed on its notepad plate.
    BarLanded {
        /// Which plate it landed on.
        index: usize,
    },
    /// The number of active plates changed.
    ActiveCountChanged {
        /// New active count.
        count: usize,
    },
}

/// Model state for the Distribute screen.
#[derive(Debug)]
pub struct DistributeModel {
    /// Ground-truth bar counts per table plate.
    table: Vec<usize>,
    /// Hand-arranged identified bars.
    notepad: Vec<Plate>,
    active_count: usize,
    transits: Vec<BarFlight>,
    next_bar: u32,
    events: Notifier<DistributeEvent>,
}

impl DistributeModel {
    /// Create the model with [`DEFAULT_PLATES`] active plates carrying
    /// [`INITIAL_TABLE_BARS`], notepad mirroring the table.
    pub fn new() -> Self {
        let mut model = Self {
            table: vec![0; MAX_PLATES],
            notepad: (0..MAX_PLATES).map(Plate::new).collect(),
            active_count: DEFAULT_PLATES,
            transits: Vec::new(),
            next_bar: 0,
            events: Notifier::new(),
        };
        for index in 0..MAX_PLATES {
            if index < DEFAULT_PLATES {
                model.table[index] = INITIAL_TABLE_BARS[index];
            }
            model.notepad[index].enabled = index < DEFAULT_PLATES;
        }
        model.reset_notepad();
        model
    }

    /// Create the model with the active table counts drawn from a seeded
    /// generator, for hosts that want a fresh puzzle per session.
    pub fn with_random_arrangement(seed: u64) -> Self {
        let mut model = Self::new();
        model.randomize_table(seed);
        model
    }

    /// Re-roll every active table plate's count from a seeded generator and
    /// reset the notepad.
    pub fn randomize_table(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for index in 0..self.active_count {
            self.table[index] = rng.gen_range(0..=PLATE_CAPACITY);
        }
        self.reset_notepad();
        log::debug!("table randomized with seed {}", seed);
    }

    // ===== Accessors =====

    /// Number of active plates.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Bar counts of the active table plates.
    pub fn table_counts(&self) -> Vec<usize> {
        self.table[..self.active_count].to_vec()
    }

    /// Settled bar counts of the active notepad plates. In-flight bars are
    /// not on any plate; see [`DistributeModel::transits`].
    pub fn notepad_counts(&self) -> Vec<usize> {
        self.notepad[..self.active_count]
            .iter()
            .map(|p| p.count())
            .collect()
    }

    /// The notepad plates themselves, bars identified.
    #[inline]
    pub fn notepad(&self) -> &[Plate] {
        &self.notepad
    }

    /// Total bars on the active table plates.
    pub fn total_bars(&self) -> usize {
        self.table[..self.active_count].iter().sum()
    }

    /// Mean bars per active table plate, the value the user is predicting.
    pub fn mean(&self) -> f64 {
        self.total_bars() as f64 / self.active_count as f64
    }

    /// Bars currently flying between notepad plates.
    #[inline]
    pub fn transits(&self) -> &[BarFlight] {
        &self.transits
    }

    /// Whether any bar is still in flight.
    #[inline]
    pub fn is_settling(&self) -> bool {
        !self.transits.is_empty()
    }

    /// Event registry for this model.
    pub fn events(&mut self) -> &mut Notifier<DistributeEvent> {
        &mut self.events
    }

    // ===== Operations =====

    /// Set how many plates participate, `1..=`[`MAX_PLATES`].
    ///
    /// Entering plates arrive with their initial bars; leaving plates take
    /// their bars with them. The notepad resets to mirror the new table.
    pub fn set_active_count(&mut self, count: usize) -> Result<(), ModelError> {
        if !(1..=MAX_PLATES).contains(&count) {
            return Err(ModelError::CountOutOfRange {
                requested: count,
                min: 1,
                max: MAX_PLATES,
            });
        }
        if count == self.active_count {
            return Ok(());
        }
        for index in 0..MAX_PLATES {
            if index < count {
                if index >= self.active_count {
                    self.table[index] = INITIAL_TABLE_BARS[index];
                }
            } else {
                self.table[index] = 0;
            }
            self.notepad[index].enabled = index < count;
        }
        self.active_count = count;
        self.reset_notepad();
        log::debug!("active plates set to {}", count);
        self.events.emit(&DistributeEvent::ActiveCountChanged { count });
        Ok(())
    }

    /// Put one more bar on table plate `index`. Resets the notepad; the
    /// hand-made prediction is stale once ground truth moves. Returns the
    /// plate's new count.
    pub fn add_bar(&mut self, index: usize) -> Result<usize, ModelError> {
        self.active_plate(index)?;
        if self.table[index] >= PLATE_CAPACITY {
            return Err(ModelError::PlateFull(index));
        }
        self.table[index] += 1;
        self.reset_notepad();
        let count = self.table[index];
        self.events
            .emit(&DistributeEvent::TableChanged { index, count });
        Ok(count)
    }

    /// Take one bar off table plate `index`. Resets the notepad. Returns the
    /// plate's new count.
    pub fn remove_bar(&mut self, index: usize) -> Result<usize, ModelError> {
        self.active_plate(index)?;
        if self.table[index] == 0 {
            return Err(ModelError::PlateEmpty(index));
        }
        self.table[index] -= 1;
        self.reset_notepad();
        let count = self.table[index];
        self.events
            .emit(&DistributeEvent::TableChanged { index, count });
        Ok(count)
    }

    /// Fly the top bar of notepad plate `from` over to plate `to`.
    ///
    /// Moving a bar onto its own plate is a no-op. Errors when either plate
    /// is inactive, `from` has no settled bar to give, or `to` cannot hold
    /// another bar once in-flight arrivals are counted.
    pub fn move_bar(&mut self, from: usize, to: usize) -> Result<(), ModelError> {
        self.active_plate(from)?;
        self.active_plate(to)?;
        if from == to {
            return Ok(());
        }
        if self.notepad[to].count() + self.in_flight_to(to) >= PLATE_CAPACITY {
            return Err(ModelError::PlateFull(to));
        }
        let Some(bar) = self.notepad[from].pop() else {
            return Err(ModelError::PlateEmpty(from));
        };

        self.transits.push(BarFlight {
            bar,
            transit: Transit::new(
                plate_position(from),
                plate_position(to),
                DEFAULT_TRANSIT_DURATION,
            ),
            to,
        });
        log::trace!("bar {:?} moving from plate {} to {}", bar, from, to);
        Ok(())
    }

    /// Advance in-flight bars by `dt` seconds, landing completed ones.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let mut landed = Vec::new();
        self.transits.retain_mut(|flight| {
            if flight.transit.step(dt) {
                landed.push((flight.bar, flight.to));
                false
            } else {
                true
            }
        });
        for (bar, index) in landed {
            // Capacity was reserved when the flight launched.
            let _ = self.notepad[index].push(bar);
            self.events.emit(&DistributeEvent::BarLanded { index });
        }
    }

    /// Return to the freshly created state. Emits no events; callers treat a
    /// reset as a full refresh.
    pub fn reset(&mut self) {
        self.active_count = DEFAULT_PLATES;
        for index in 0..MAX_PLATES {
            self.table[index] = if index < DEFAULT_PLATES {
                INITIAL_TABLE_BARS[index]
            } else {
                0
            };
            self.notepad[index].enabled = index < DEFAULT_PLATES;
        }
        self.reset_notepad();
    }

    // ===== Internals =====

    fn active_plate(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.active_count {
            return Err(ModelError::PlateInactive(index));
        }
        Ok(())
    }

    fn in_flight_to(&self, index: usize) -> usize {
        self.transits.iter().filter(|f| f.to == index).count()
    }

    /// Drop any flights and rebuild the notepad as a fresh copy of the
    /// table, new bar ids included.
    fn reset_notepad(&mut self) {
        self.transits.clear();
        for index in 0..MAX_PLATES {
            self.notepad[index].clear();
            for _ in 0..self.table[index].min(PLATE_CAPACITY) {
                let id = SnackId(self.next_bar);
                self.next_bar += 1;
                // Table counts never exceed capacity.
                let _ = self.notepad[index].push(id);
            }
        }
    }
}

impl Default for DistributeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(model: &mut DistributeModel) {
        for _ in 0..120 {
            model.step(1.0 / 60.0);
            if !model.is_settling() {
                return;
            }
        }
        panic!("notepad did not settle");
    }

    #[test]
    fn test_new_mirrors_table() {
        let model = DistributeModel::new();
        assert_eq!(model.table_counts(), vec![5, 3]);
        assert_eq!(model.notepad_counts(), vec![5, 3]);
        assert!((model.mean() - 4.0).abs() < 1e-12);
        assert!(!model.is_settling());
    }

    #[test]
    fn test_move_bar_conserves_total() {
        let mut model = DistributeModel::new();
        model.move_bar(0, 1).unwrap();

        assert!(model.is_settling());
        let settled: usize = model.notepad_counts().iter().sum();
        assert_eq!(settled + model.transits().len(), model.total_bars());

        settle(&mut model);
        assert_eq!(model.notepad_counts(), vec![4, 4]);
        // The table never moves.
        assert_eq!(model.table_counts(), vec![5, 3]);
    }

    #[test]
    fn test_move_bar_tracks_identity() {
        let mut model = DistributeModel::new();
        let top = *model.notepad()[0].snacks().last().unwrap();

        model.move_bar(0, 1).unwrap();
        assert_eq!(model.transits()[0].bar(), top);

        settle(&mut model);
        assert_eq!(model.notepad()[1].snacks().last(), Some(&top));
    }

    #[test]
    fn test_move_bar_validation() {
        let mut model = DistributeModel::new();

        assert!(model.move_bar(1, 1).is_ok());
        assert!(!model.is_settling());

        assert!(matches!(
            model.move_bar(0, DEFAULT_PLATES),
            Err(ModelError::PlateInactive(_))
        ));

        for _ in 0..3 {
            model.move_bar(1, 0).unwrap();
        }
        settle(&mut model);
        assert!(matches!(
            model.move_bar(1, 0),
            Err(ModelError::PlateEmpty(1))
        ));
    }

    #[test]
    fn test_capacity_counts_in_flight_bars() {
        let mut model = DistributeModel::new();
        // Table [2, 9]: three off plate 0, six onto plate 1.
        for _ in 0..3 {
            model.remove_bar(0).unwrap();
        }
        for _ in 0..6 {
            model.add_bar(1).unwrap();
        }
        assert_eq!(model.table_counts(), vec![2, 9]);

        model.move_bar(0, 1).unwrap();
        assert!(matches!(model.move_bar(0, 1), Err(ModelError::PlateFull(1))));

        settle(&mut model);
        assert_eq!(model.notepad_counts(), vec![1, 10]);
    }

    #[test]
    fn test_table_edit_resets_prediction() {
        let mut model = DistributeModel::new();
        model.move_bar(0, 1).unwrap();
        settle(&mut model);
        assert_eq!(model.notepad_counts(), vec![4, 4]);

        model.add_bar(0).unwrap();

        assert!(!model.is_settling());
        assert_eq!(model.table_counts(), vec![6, 3]);
        assert_eq!(model.notepad_counts(), vec![6, 3]);
    }

    #[test]
    fn test_table_bounds() {
        let mut model = DistributeModel::new();
        while model.table_counts()[0] < PLATE_CAPACITY {
            model.add_bar(0).unwrap();
        }
        assert!(matches!(model.add_bar(0), Err(ModelError::PlateFull(0))));

        while model.table_counts()[1] > 0 {
            model.remove_bar(1).unwrap();
        }
        assert!(matches!(
            model.remove_bar(1),
            Err(ModelError::PlateEmpty(1))
        ));
    }

    #[test]
    fn test_set_active_count_brings_initial_bars() {
        let mut model = DistributeModel::new();
        model.set_active_count(4).unwrap();
        assert_eq!(model.table_counts(), vec![5, 3, 4, 2]);
        assert_eq!(model.notepad_counts(), vec![5, 3, 4, 2]);

        model.set_active_count(1).unwrap();
        assert_eq!(model.table_counts(), vec![5]);
        assert!(matches!(
            model.set_active_count(0),
            Err(ModelError::CountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_random_arrangement_is_reproducible() {
        let a = DistributeModel::with_random_arrangement(42);
        let b = DistributeModel::with_random_arrangement(42);

        assert_eq!(a.table_counts(), b.table_counts());
        for &count in &a.table_counts() {
            assert!(count <= PLATE_CAPACITY);
        }
        assert_eq!(a.notepad_counts(), a.table_counts());
    }
}
