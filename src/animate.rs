//! Eased point-to-point motion for redistribution animations.
//!
//! When a sharing model rearranges snacks, each moving piece gets a
//! [`Transit`]: a fixed-duration flight from one layout point to another with
//! a smoothstep ease, advanced by the owning model's `step(dt)`. The model
//! keeps the piece out of all plate counts while its transit is in flight and
//! lands it on completion, so "where is everything" always has one answer:
//! settled pieces are on plates, moving pieces are in transits.

use glam::Vec2;

/// How long one snack flight takes, seconds.
pub const DEFAULT_TRANSIT_DURATION: f64 = 0.4;

/// A fixed-duration eased flight between two layout points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit {
    start: Vec2,
    end: Vec2,
    duration: f64,
    elapsed: f64,
}

impl Transit {
    /// Begin a flight. Panics if `duration` is not positive.
    pub fn new(start: Vec2, end: Vec2, duration: f64) -> Self {
        assert!(duration > 0.0, "Transit duration must be positive");
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
        }
    }

    /// Where the flight began.
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Where the flight lands.
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Unfiltered time fraction in `[0, 1]`.
    #[inline]
    pub fn elapsed_fraction(&self) -> f64 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`: slow out of the start, slow into the end.
    pub fn progress(&self) -> f64 {
        smoothstep(self.elapsed_fraction())
    }

    /// Current position along the flight.
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, self.progress() as f32)
    }

    /// Whether the flight has landed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds (negative `dt` is ignored). Returns `true`
    /// once the flight is complete.
    pub fn step(&mut self, dt: f64) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.is_complete()
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
