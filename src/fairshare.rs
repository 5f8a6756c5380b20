//! The Fair Share screen model: snacks on table plates, re-drawn three ways
//! on a notepad.
//!
//! The table is ground truth: each active plate holds whole snacks the user
//! adjusts one at a time. The notepad redraws that ground truth in one of
//! three modes:
//!
//! | Mode      | Notepad shows                                              |
//! |-----------|------------------------------------------------------------|
//! | `Sync`    | each plate's own snacks, as they are                       |
//! | `Collect` | every snack gathered on one central stack                  |
//! | `Share`   | the total split evenly, a fractional piece making up slack |
//!
//! Switching modes (or editing the table while in `Collect`/`Share`) does not
//! teleport the drawing: the model diffs the settled arrangement against the
//! new target and launches a [`Transit`] per moving snack, landing them over
//! [`DEFAULT_TRANSIT_DURATION`]. Snack count is conserved through any walk of
//! modes and edits: settled pieces plus in-flight pieces always equal the
//! table total.
//!
//! In `Share` mode with an uneven total, each active plate gets `total / n`
//! whole snacks plus one fractional piece worth `(total % n) / n`; the
//! remainder snacks being divided sit on the collection stack.

use glam::Vec2;

use crate::animate::{Transit, DEFAULT_TRANSIT_DURATION};
use crate::error::ModelError;
use crate::mean::{share_evenly, Fraction};
use crate::notify::Notifier;
use crate::plate::{
    plate_position, table_position, Plate, SnackId, COLLECTION_POSITION, MAX_PLATES,
};

/// Active plates when the model is created or reset.
pub const DEFAULT_PLATES: usize = 4;

/// Snacks each table plate starts (and re-enters) with.
pub const INITIAL_TABLE_SNACKS: [usize; MAX_PLATES] = [2, 1, 4, 3, 2, 1, 4];

/// How the notepad redraws the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotepadMode {
    /// Mirror each plate's own snacks.
    Sync,
    /// Gather every snack on the central collection stack.
    Collect,
    /// Split the total evenly across the active plates.
    Share,
}

impl Default for NotepadMode {
    fn default() -> Self {
        NotepadMode::Sync
    }
}

/// Where an in-flight snack will land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightDestination {
    /// A notepad plate.
    Plate(usize),
    /// The collection stack.
    Collection,
}

impl FlightDestination {
    fn position(self) -> Vec2 {
        match self {
            FlightDestination::Plate(index) => plate_position(index),
            FlightDestination::Collection => COLLECTION_POSITION,
        }
    }
}

/// One whole snack in flight between notepad locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnackFlight {
    transit: Transit,
    destination: FlightDestination,
}

impl SnackFlight {
    /// The flight's motion state.
    #[inline]
    pub fn transit(&self) -> &Transit {
        &self.transit
    }

    /// Where the snack lands.
    #[inline]
    pub fn destination(&self) -> FlightDestination {
        self.destination
    }

    /// Current position, for rendering.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transit.position()
    }
}

/// The settled notepad drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    /// Whole snacks settled on each active plate.
    pub whole: Vec<usize>,
    /// Fractional piece shown on every active plate (zero outside `Share`).
    pub piece: Fraction,
    /// Snacks settled on the collection stack.
    pub collection: usize,
}

/// What changed, reported through [`FairShareModel::events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FairShareEvent {
    /// A table plate's snack count changed.
    TableChanged {
        /// Which plate.
        index: usize,
        /// Its new count.
        count: usize,
    },
    /// The notepad mode switched.
    ModeChanged {
        /// The new mode.
        mode: NotepadMode,
    },
    /// The number of active plates changed.
    ActiveCountChanged {
        /// New active count.
        count: usize,
    },
    /// An in-flight snack landed.
    SnackLanded {
        /// Where it landed.
        destination: FlightDestination,
    },
}

/// Model state for the Fair Share screen.
#[derive(Debug)]
pub struct FairShareModel {
    table: Vec<Plate>,
    active_count: usize,
    mode: NotepadMode,
    /// Settled whole snacks per notepad plate.
    notepad: Vec<usize>,
    /// Settled snacks on the collection stack.
    collection: usize,
    transits: Vec<SnackFlight>,
    next_snack: u32,
    events: Notifier<FairShareEvent>,
}

impl FairShareModel {
    /// Create the model with [`DEFAULT_PLATES`] active plates carrying
    /// [`INITIAL_TABLE_SNACKS`], notepad in `Sync`.
    pub fn new() -> Self {
        let mut model = Self {
            table: (0..MAX_PLATES).map(Plate::new).collect(),
            active_count: DEFAULT_PLATES,
            mode: NotepadMode::Sync,
            notepad: vec![0; MAX_PLATES],
            collection: 0,
            transits: Vec::new(),
            next_snack: 0,
            events: Notifier::new(),
        };
        for index in 0..MAX_PLATES {
            model.table[index].enabled = index < DEFAULT_PLATES;
            if model.table[index].enabled {
                model.refill_table_plate(index);
            }
        }
        model.rebuild_notepad();
        model
    }

    // ===== Accessors =====

    /// Current notepad mode.
    #[inline]
    pub fn mode(&self) -> NotepadMode {
        self.mode
    }

    /// Number of active plates.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// All table plates, active or not, in row order.
    #[inline]
    pub fn table(&self) -> &[Plate] {
        &self.table
    }

    /// Snack counts of the active table plates.
    pub fn table_counts(&self) -> Vec<usize> {
        self.table[..self.active_count]
            .iter()
            .map(|p| p.count())
            .collect()
    }

    /// Total snacks on the active table plates.
    pub fn total_snacks(&self) -> usize {
        self.table[..self.active_count]
            .iter()
            .map(|p| p.count())
            .sum()
    }

    /// Mean snacks per active plate.
    pub fn mean(&self) -> f64 {
        self.total_snacks() as f64 / self.active_count as f64
    }

    /// The settled notepad drawing for the active plates.
    pub fn arrangement(&self) -> Arrangement {
        Arrangement {
            whole: self.notepad[..self.active_count].to_vec(),
            piece: self.fraction(),
            collection: self.collection,
        }
    }

    /// The fractional piece each active plate shows.
    pub fn fraction(&self) -> Fraction {
        match self.mode {
            NotepadMode::Share => share_evenly(self.total_snacks(), self.active_count).1,
            _ => Fraction::new(0, 1),
        }
    }

    /// Snacks currently flying between notepad locations.
    #[inline]
    pub fn transits(&self) -> &[SnackFlight] {
        &self.transits
    }

    /// Whether the notepad is still animating toward its target.
    #[inline]
    pub fn is_settling(&self) -> bool {
        !self.transits.is_empty()
    }

    /// Event registry for this model.
    pub fn events(&mut self) -> &mut Notifier<FairShareEvent> {
        &mut self.events
    }

    // ===== Operations =====

    /// Set how many plates participate, `1..=`[`MAX_PLATES`].
    ///
    /// Entering plates arrive with their initial snacks; leaving plates take
    /// their snacks with them. A structure change is a re-deal, so the
    /// notepad rebuilds instantly rather than animating.
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
            let enabled = index < count;
            if self.table[index].enabled != enabled {
                self.table[index].enabled = enabled;
                if enabled {
                    self.refill_table_plate(index);
                } else {
                    self.table[index].clear();
                }
            }
        }
        self.active_count = count;
        self.rebuild_notepad();
        log::debug!("active plates set to {}", count);
        self.events.emit(&FairShareEvent::ActiveCountChanged { count });
        Ok(())
    }

    /// Put one more snack on table plate `index`. Returns the plate's new
    /// count.
    ///
    /// In `Collect` and `Share` the new snack enters the notepad from the
    /// table row and flies to wherever the new target needs it.
    pub fn add_snack(&mut self, index: usize) -> Result<usize, ModelError> {
        self.active_plate(index)?;
        let id = SnackId(self.next_snack);
        self.table[index].push(id)?;
        self.next_snack += 1;

        let count = self.table[index].count();
        self.retarget_notepad(Some(index));
        self.events
            .emit(&FairShareEvent::TableChanged { index, count });
        Ok(count)
    }

    /// Take one snack off table plate `index`. Returns the plate's new count.
    pub fn remove_snack(&mut self, index: usize) -> Result<usize, ModelError> {
        self.active_plate(index)?;
        if self.table[index].pop().is_none() {
            return Err(ModelError::PlateEmpty(index));
        }

        let count = self.table[index].count();
        self.retarget_notepad(None);
        self.events
            .emit(&FairShareEvent::TableChanged { index, count });
        Ok(count)
    }

    /// Switch the notepad mode, launching transits from the settled
    /// arrangement to the new target.
    pub fn set_mode(&mut self, mode: NotepadMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.retarget_notepad(None);
        log::debug!("notepad mode set to {:?}", mode);
        self.events.emit(&FairShareEvent::ModeChanged { mode });
    }

    /// Advance in-flight snacks by `dt` seconds, landing completed ones.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let mut landed = Vec::new();
        self.transits.retain_mut(|flight| {
            if flight.transit.step(dt) {
                landed.push(flight.destination);
                false
            } else {
                true
            }
        });
        for destination in landed {
            match destination {
                FlightDestination::Plate(index) => self.notepad[index] += 1,
                FlightDestination::Collection => self.collection += 1,
            }
            self.events.emit(&FairShareEvent::SnackLanded { destination });
        }
    }

    /// Return to the freshly created state. Emits no events; callers treat a
    /// reset as a full refresh.
    pub fn reset(&mut self) {
        self.mode = NotepadMode::Sync;
        self.active_count = DEFAULT_PLATES;
        for index in 0..MAX_PLATES {
            self.table[index].enabled = index < DEFAULT_PLATES;
            if self.table[index].enabled {
                self.refill_table_plate(index);
            } else {
                self.table[index].clear();
            }
        }
        self.rebuild_notepad();
    }

    // ===== Internals =====

    fn active_plate(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.active_count {
            return Err(ModelError::PlateInactive(index));
        }
        Ok(())
    }

    fn refill_table_plate(&mut self, index: usize) {
        self.table[index].clear();
        for _ in 0..INITIAL_TABLE_SNACKS[index] {
            let id = SnackId(self.next_snack);
            self.next_snack += 1;
            // Initial counts sit below capacity.
            let _ = self.table[index].push(id);
        }
    }

    /// Per-plate and collection targets for the current mode.
    fn targets(&self) -> (Vec<usize>, usize) {
        let mut plates = vec![0; MAX_PLATES];
        let collection;
        match self.mode {
            NotepadMode::Sync => {
                for index in 0..self.active_count {
                    plates[index] = self.table[index].count();
                }
                collection = 0;
            }
            NotepadMode::Collect => {
                collection = self.total_snacks();
            }
            NotepadMode::Share => {
                let total = self.total_snacks();
                let (whole, piece) = share_evenly(total, self.active_count);
                for target in plates.iter_mut().take(self.active_count) {
                    *target = whole;
                }
                // The snacks being divided wait on the collection stack.
                collection = piece.numerator;
            }
        }
        (plates, collection)
    }

    /// Land any in-flight snacks and redraw the notepad at its target.
    fn rebuild_notepad(&mut self) {
        self.transits.clear();
        let (plates, collection) = self.targets();
        self.notepad = plates;
        self.collection = collection;
    }

    /// Diff the settled arrangement against the target and launch one flight
    /// per snack that has to move.
    ///
    /// `entry` names the table plate a brand-new snack came from; removals
    /// and mode switches pass `None`. Pieces the shrunk total no longer needs
    /// are dropped without a flight.
    fn retarget_notepad(&mut self, entry: Option<usize>) {
        // A retarget during a retarget finishes the first one instantly.
        for flight in self.transits.drain(..) {
            match flight.destination {
                FlightDestination::Plate(index) => self.notepad[index] += 1,
                FlightDestination::Collection => self.collection += 1,
            }
        }

        let (plate_targets, collection_target) = self.targets();

        let mut sources: Vec<Vec2> = Vec::new();
        let mut sinks: Vec<FlightDestination> = Vec::new();

        for index in 0..MAX_PLATES {
            let have = self.notepad[index];
            let want = plate_targets[index];
            if have > want {
                self.notepad[index] = want;
                sources.extend((0..have - want).map(|_| plate_position(index)));
            } else {
                sinks.extend((0..want - have).map(|_| FlightDestination::Plate(index)));
            }
        }
        if self.collection > collection_target {
            let surplus = self.collection - collection_target;
            self.collection = collection_target;
            sources.extend((0..surplus).map(|_| COLLECTION_POSITION));
        } else {
            sinks.extend(
                (0..collection_target - self.collection).map(|_| FlightDestination::Collection),
            );
        }

        let mut sinks = sinks.into_iter();
        for source in sources {
            // Extra sources mean the total shrank; those pieces just go.
            let Some(destination) = sinks.next() else {
                break;
            };
            self.launch(source, destination);
        }
        // Extra sinks mean the total grew; feed them from the table row.
        for destination in sinks {
            let from = match (entry, destination) {
                (Some(index), _) => table_position(index),
                (None, FlightDestination::Plate(index)) => table_position(index),
                (None, FlightDestination::Collection) => table_position(0),
            };
            self.launch(from, destination);
        }

        debug_assert_eq!(
            self.notepad.iter().sum::<usize>() + self.collection + self.transits.len(),
            self.total_snacks(),
        );
    }

    fn launch(&mut self, from: Vec2, destination: FlightDestination) {
        self.transits.push(SnackFlight {
            transit: Transit::new(from, destination.position(), DEFAULT_TRANSIT_DURATION),
            destination,
        });
    }
}

impl Default for FairShareModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::PLATE_CAPACITY;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn settle(model: &mut FairShareModel) {
        for _ in 0..120 {
            model.step(1.0 / 60.0);
            if !model.is_settling() {
                return;
            }
        }
        panic!("notepad did not settle");
    }

    fn settled_total(model: &FairShareModel) -> usize {
        let arrangement = model.arrangement();
        arrangement.whole.iter().sum::<usize>() + arrangement.collection
    }

    #[test]
    fn test_new_mirrors_table_in_sync() {
        let model = FairShareModel::new();
        let arrangement = model.arrangement();

        assert_eq!(model.mode(), NotepadMode::Sync);
        assert_eq!(arrangement.whole, vec![2, 1, 4, 3]);
        assert_eq!(arrangement.collection, 0);
        assert!(arrangement.piece.is_zero());
        assert!(!model.is_settling());
        assert_eq!(model.total_snacks(), 10);
    }

    #[test]
    fn test_collect_gathers_everything() {
        let mut model = FairShareModel::new();
        model.set_mode(NotepadMode::Collect);
        assert!(model.is_settling());

        settle(&mut model);

        let arrangement = model.arrangement();
        assert!(arrangement.whole.iter().all(|&w| w == 0));
        assert_eq!(arrangement.collection, 10);
    }

    #[test]
    fn test_share_splits_evenly_with_fraction() {
        let mut model = FairShareModel::new();
        model.set_mode(NotepadMode::Share);
        settle(&mut model);

        let arrangement = model.arrangement();
        assert_eq!(arrangement.whole, vec![2, 2, 2, 2]);
        assert_eq!(arrangement.collection, 2);
        assert_eq!(arrangement.piece, Fraction::new(2, 4));

        // Whole share plus the piece is exactly the mean.
        let per_plate = arrangement.whole[0] as f64 + arrangement.piece.value();
        assert!((per_plate - model.mean()).abs() < 1e-12);
    }

    #[test]
    fn test_share_with_even_total_has_no_piece() {
        let mut model = FairShareModel::new();
        model.remove_snack(2).unwrap();
        model.remove_snack(2).unwrap();
        model.set_mode(NotepadMode::Share);
        settle(&mut model);

        let arrangement = model.arrangement();
        assert_eq!(arrangement.whole, vec![2, 2, 2, 2]);
        assert_eq!(arrangement.collection, 0);
        assert!(arrangement.piece.is_zero());
    }

    #[test]
    fn test_table_edit_in_share_retargets() {
        let mut model = FairShareModel::new();
        model.set_mode(NotepadMode::Share);
        settle(&mut model);

        // 11 across 4 plates: wholes stay at 2, the new snack joins the
        // remainder being divided.
        model.add_snack(0).unwrap();
        assert!(model.is_settling());
        settle(&mut model);

        let arrangement = model.arrangement();
        assert_eq!(arrangement.whole, vec![2, 2, 2, 2]);
        assert_eq!(arrangement.collection, 3);
        assert_eq!(arrangement.piece, Fraction::new(3, 4));
    }

    #[test]
    fn test_count_conserved_through_random_walk() {
        let mut model = FairShareModel::new();
        let mut rng = SmallRng::seed_from_u64(7);
        let modes = [NotepadMode::Sync, NotepadMode::Collect, NotepadMode::Share];

        for _ in 0..200 {
            match rng.gen_range(0..4) {
                0 => {
                    let _ = model.add_snack(rng.gen_range(0..model.active_count()));
                }
                1 => {
                    let _ = model.remove_snack(rng.gen_range(0..model.active_count()));
                }
                2 => model.set_mode(modes[rng.gen_range(0..modes.len())]),
                _ => model.step(rng.gen_range(0.0..0.3)),
            }
            assert_eq!(
                settled_total(&model) + model.transits().len(),
                model.total_snacks(),
            );
        }
    }

    #[test]
    fn test_plate_bounds_errors() {
        let mut model = FairShareModel::new();
        assert!(matches!(
            model.add_snack(DEFAULT_PLATES),
            Err(ModelError::PlateInactive(_))
        ));

        while model.table()[1].count() > 0 {
            model.remove_snack(1).unwrap();
        }
        assert!(matches!(
            model.remove_snack(1),
            Err(ModelError::PlateEmpty(1))
        ));

        while model.table()[0].count() < PLATE_CAPACITY {
            model.add_snack(0).unwrap();
        }
        assert!(matches!(model.add_snack(0), Err(ModelError::PlateFull(0))));
    }

    #[test]
    fn test_structure_change_rebuilds_instantly() {
        let mut model = FairShareModel::new();
        model.set_mode(NotepadMode::Collect);
        settle(&mut model);

        model.set_active_count(5).unwrap();

        assert!(!model.is_settling());
        // Plate 4 re-enters with its initial 2 snacks.
        assert_eq!(model.total_snacks(), 12);
        assert_eq!(model.arrangement().collection, 12);
    }

    #[test]
    fn test_mode_change_event_fires_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let mut model = FairShareModel::new();
        let switches = Arc::new(AtomicUsize::new(0));
        let s = switches.clone();
        model.events().subscribe(move |event| {
            if matches!(event, FairShareEvent::ModeChanged { .. }) {
                s.fetch_add(1, Ordering::SeqCst);
            }
        });

        model.set_mode(NotepadMode::Share);
        model.set_mode(NotepadMode::Share);
        assert_eq!(switches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut model = FairShareModel::new();
        model.set_active_count(6).unwrap();
        model.set_mode(NotepadMode::Collect);
        model.add_snack(0).unwrap();

        model.reset();

        assert_eq!(model.mode(), NotepadMode::Sync);
        assert_eq!(model.active_count(), DEFAULT_PLATES);
        assert_eq!(model.table_counts(), vec![2, 1, 4, 3]);
        assert!(!model.is_settling());
    }
}
