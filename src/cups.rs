//! Cup and pipe primitives for the leveling model.
//!
//! A [`WaterCup`] holds a scalar water level in `[0, 1]` (one cup-height).
//! Cups sit in a fixed row; a [`Pipe`] joins each adjacent pair and lets water
//! move between them while open. Cups are created by [`crate::LevelOutModel`]
//! and enabled or disabled as the active count changes, never reordered.

/// Lowest valid water level (an empty cup).
pub const MIN_LEVEL: f64 = 0.0;

/// Highest valid water level (a full cup).
pub const MAX_LEVEL: f64 = 1.0;

/// A vessel holding a scalar water level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterCup {
    /// Fixed placement in the row, 0-based. Never changes once created.
    index: usize,
    /// Current water level in `[MIN_LEVEL, MAX_LEVEL]`.
    pub level: f64,
    /// Whether the cup currently participates in the model.
    pub enabled: bool,
}

impl WaterCup {
    /// Create an enabled cup at the given placement and level.
    pub fn new(index: usize, level: f64) -> Self {
        assert!(
            (MIN_LEVEL..=MAX_LEVEL).contains(&level),
            "Water level {} outside [{}, {}]",
            level,
            MIN_LEVEL,
            MAX_LEVEL
        );
        Self {
            index,
            level,
            enabled: true,
        }
    }

    /// The cup's fixed placement in the row.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// How much more water the cup can hold.
    #[inline]
    pub fn headroom(&self) -> f64 {
        MAX_LEVEL - self.level
    }

    /// Set the level, clamped to the valid range. Returns the level actually
    /// stored.
    pub fn set_level(&mut self, level: f64) -> f64 {
        self.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.level
    }
}

/// A valve-controlled connection between two adjacent cups.
///
/// Valves start closed and are driven through [`crate::LevelOutModel`]'s
/// pipe operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipe {
    /// Whether water may currently flow through.
    pub open: bool,
}
