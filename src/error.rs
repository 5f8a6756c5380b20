//! Error types for model operations.
//!
//! Numeric preconditions of the ripple distributor are asserted, not returned
//! (see [`crate::ripple`]); this module covers the fallible model surface:
//! count ranges, plate capacity, and activity checks.

use std::fmt;

/// Errors that can occur when mutating a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// Requested active count is outside the supported range.
    CountOutOfRange {
        /// The count that was requested.
        requested: usize,
        /// Smallest allowed count.
        min: usize,
        /// Largest allowed count.
        max: usize,
    },
    /// The plate at this index is not currently active.
    PlateInactive(usize),
    /// The plate at this index already holds its maximum number of snacks.
    PlateFull(usize),
    /// The plate at this index has no snack to take.
    PlateEmpty(usize),
    /// The cup at this index is not currently active.
    CupInactive(usize),
    /// Every ball slot on the number line is already in use.
    FieldFull,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::CountOutOfRange { requested, min, max } => write!(
                f,
                "Active count {} is out of range ({}..={} supported)",
                requested, min, max
            ),
            ModelError::PlateInactive(i) => write!(f, "Plate {} is not active", i),
            ModelError::PlateFull(i) => write!(f, "Plate {} is full", i),
            ModelError::PlateEmpty(i) => write!(f, "Plate {} is empty", i),
            ModelError::CupInactive(i) => write!(f, "Cup {} is not active", i),
            ModelError::FieldFull => write!(f, "No ball slots left on the number line"),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_range() {
        let err = ModelError::CountOutOfRange {
            requested: 9,
            min: 1,
            max: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains("1..=7"));
    }
}
