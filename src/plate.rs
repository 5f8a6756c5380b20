//! Plate and snack primitives shared by the sharing screen models.
//!
//! A [`Plate`] is a bounded stack of identified snack pieces. Identity is a
//! small opaque id ([`SnackId`]) rather than a bare count so hosts can keep a
//! sprite glued to one particular piece while it travels between plates.
//!
//! The module also fixes the model-space layout the transit animations run
//! in: plates sit one unit apart on two rows (notepad above, table below)
//! with a collection point above the notepad. Hosts map these coordinates to
//! view space however they like; the models only need consistent endpoints.

use glam::Vec2;

use crate::error::ModelError;

/// Most plates either sharing screen ever shows.
pub const MAX_PLATES: usize = 7;

/// Most snacks (or candy bars) one plate can hold.
pub const PLATE_CAPACITY: usize = 10;

/// Horizontal distance between adjacent plate centers, model units.
pub const PLATE_SPACING: f32 = 1.0;

/// Vertical position of the notepad plate row.
pub const NOTEPAD_ROW_Y: f32 = 0.0;

/// Vertical position of the table plate row.
pub const TABLE_ROW_Y: f32 = -1.0;

/// Where collected snacks stack up, centered above the notepad row.
pub const COLLECTION_POSITION: Vec2 = Vec2::new(3.0, 1.0);

/// Center of the notepad plate at `index`.
#[inline]
pub fn plate_position(index: usize) -> Vec2 {
    Vec2::new(index as f32 * PLATE_SPACING, NOTEPAD_ROW_Y)
}

/// Center of the table plate at `index`.
#[inline]
pub fn table_position(index: usize) -> Vec2 {
    Vec2::new(index as f32 * PLATE_SPACING, TABLE_ROW_Y)
}

/// Stable identity of one snack piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnackId(pub u32);

/// A bounded stack of snacks at a fixed placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    /// Fixed placement in the row, 0-based.
    index: usize,
    /// Whether the plate currently participates in the model.
    pub enabled: bool,
    snacks: Vec<SnackId>,
}

impl Plate {
    /// Create an enabled, empty plate at the given placement.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            enabled: true,
            snacks: Vec::new(),
        }
    }

    /// The plate's fixed placement in the row.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of snacks on the plate.
    #[inline]
    pub fn count(&self) -> usize {
        self.snacks.len()
    }

    /// Whether the plate holds [`PLATE_CAPACITY`] snacks.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.snacks.len() >= PLATE_CAPACITY
    }

    /// Whether the plate holds nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snacks.is_empty()
    }

    /// The snacks on the plate, bottom first.
    #[inline]
    pub fn snacks(&self) -> &[SnackId] {
        &self.snacks
    }

    /// Stack a snack on top. Errors with [`ModelError::PlateFull`] at
    /// capacity.
    pub fn push(&mut self, snack: SnackId) -> Result<(), ModelError> {
        if self.is_full() {
            return Err(ModelError::PlateFull(self.index));
        }
        self.snacks.push(snack);
        Ok(())
    }

    /// Take the top snack, if any.
    pub fn pop(&mut self) -> Option<SnackId> {
        self.snacks.pop()
    }

    /// Remove every snack.
    pub(crate) fn clear(&mut self) {
        self.snacks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_respects_capacity() {
        let mut plate = Plate::new(2);
        for i in 0..PLATE_CAPACITY {
            plate.push(SnackId(i as u32)).unwrap();
        }
        assert!(plate.is_full());
        assert!(matches!(
            plate.push(SnackId(99)),
            Err(ModelError::PlateFull(2))
        ));
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut plate = Plate::new(0);
        plate.push(SnackId(1)).unwrap();
        plate.push(SnackId(2)).unwrap();

        assert_eq!(plate.pop(), Some(SnackId(2)));
        assert_eq!(plate.pop(), Some(SnackId(1)));
        assert_eq!(plate.pop(), None);
        assert!(plate.is_empty());
    }

    #[test]
    fn test_layout_rows() {
        assert!(plate_position(3).x > plate_position(2).x);
        assert_eq!(plate_position(1).x, table_position(1).x);
        assert!(table_position(0).y < plate_position(0).y);
        assert!(COLLECTION_POSITION.y > NOTEPAD_ROW_Y);
    }
}
