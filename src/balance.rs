//! The Balance Point screen model: data points on a beam over a movable
//! fulcrum.
//!
//! The user kicks soccer balls onto a number line and hunts for the spot
//! where the beam balances. Each landed ball is one data point; the beam's
//! net torque about the fulcrum is `Σ (xᵢ − fulcrum)`, which is zero exactly
//! when the fulcrum sits at the mean (the screen's teaching point). Kicked
//! balls fly in on a [`Transit`] and only count once they land.
//!
//! [`BalancePointModel::tilt`] reports the torque both raw and as a clamped
//! visual angle, so a wildly lopsided beam still renders at a sane slope.

use glam::Vec2;

use crate::animate::Transit;
use crate::error::ModelError;
use crate::mean;
use crate::notify::Notifier;

/// Most balls the beam can carry.
pub const MAX_POINTS: usize = 7;

/// Left end of the number line.
pub const LINE_MIN: f64 = 0.0;

/// Right end of the number line.
pub const LINE_MAX: f64 = 10.0;

/// Where the fulcrum starts, the middle of the line.
pub const DEFAULT_FULCRUM: f64 = 5.0;

/// How long a kicked ball is in the air, seconds.
pub const KICK_DURATION: f64 = 0.6;

/// How close the fulcrum must sit to the mean to count as balanced.
pub const BALANCE_TOLERANCE: f64 = 1e-9;

/// Visual beam angle per unit of torque, radians.
pub const TILT_PER_TORQUE: f64 = 0.05;

/// Largest visual beam angle either way, radians.
pub const MAX_TILT_ANGLE: f64 = 0.35;

/// Where kicked balls launch from, left of the line.
const KICK_ORIGIN: Vec2 = Vec2::new(-1.0, 0.0);

/// Which way the beam tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltDirection {
    /// The mean sits left of the fulcrum.
    Left,
    /// The fulcrum sits at the mean (within [`BALANCE_TOLERANCE`]).
    Balanced,
    /// The mean sits right of the fulcrum.
    Right,
}

/// The beam's attitude about the fulcrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamTilt {
    /// Net signed torque `Σ (xᵢ − fulcrum)` over landed balls. Positive
    /// means the right side is heavier.
    pub torque: f64,
    /// Visual angle in radians, positive tipping right, clamped to
    /// [`MAX_TILT_ANGLE`].
    pub angle: f64,
    /// Which way the beam tips.
    pub direction: TiltDirection,
}

/// One kicked ball still in the air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickFlight {
    target: f64,
    transit: Transit,
}

impl KickFlight {
    /// Number-line position the ball will land on.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The flight's motion state.
    #[inline]
    pub fn transit(&self) -> &Transit {
        &self.transit
    }

    /// Current position, for rendering.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transit.position()
    }
}

/// What changed, reported through [`BalancePointModel::events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceEvent {
    /// A kicked ball landed and became a data point.
    BallLanded {
        /// Where it landed.
        position: f64,
    },
    /// A ball (in flight or landed) was removed.
    BallRemoved {
        /// The position it held or was headed for.
        position: f64,
    },
    /// The fulcrum moved.
    FulcrumMoved {
        /// Its new position.
        x: f64,
    },
}

/// Model state for the Balance Point screen.
#[derive(Debug)]
pub struct BalancePointModel {
    /// Landed ball positions, in landing order.
    points: Vec<f64>,
    flights: Vec<KickFlight>,
    fulcrum: f64,
    events: Notifier<BalanceEvent>,
}

impl BalancePointModel {
    /// Create the model with an empty line and the fulcrum centered.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            flights: Vec::new(),
            fulcrum: DEFAULT_FULCRUM,
            events: Notifier::new(),
        }
    }

    // ===== Accessors =====

    /// Landed ball positions, in landing order.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Kicked balls still in the air.
    #[inline]
    pub fn flights(&self) -> &[KickFlight] {
        &self.flights
    }

    /// Whether any ball is still in the air.
    #[inline]
    pub fn is_settling(&self) -> bool {
        !self.flights.is_empty()
    }

    /// Current fulcrum position.
    #[inline]
    pub fn fulcrum(&self) -> f64 {
        self.fulcrum
    }

    /// Mean of the landed balls, `None` with nothing landed.
    pub fn mean(&self) -> Option<f64> {
        mean::mean(self.points.iter().copied())
    }

    /// Sum of absolute deviations of landed balls from their mean, `None`
    /// with nothing landed.
    pub fn total_deviation(&self) -> Option<f64> {
        mean::total_deviation(&self.points)
    }

    /// The beam's attitude. An empty beam is balanced.
    pub fn tilt(&self) -> BeamTilt {
        let torque: f64 = self.points.iter().map(|x| x - self.fulcrum).sum();
        let direction = match self.mean() {
            None => TiltDirection::Balanced,
            Some(mu) => {
                let deviation = mu - self.fulcrum;
                if deviation.abs() <= BALANCE_TOLERANCE {
                    TiltDirection::Balanced
                } else if deviation > 0.0 {
                    TiltDirection::Right
                } else {
                    TiltDirection::Left
                }
            }
        };
        BeamTilt {
            torque,
            angle: (torque * TILT_PER_TORQUE).clamp(-MAX_TILT_ANGLE, MAX_TILT_ANGLE),
            direction,
        }
    }

    /// Whether the fulcrum sits at the mean.
    pub fn is_balanced(&self) -> bool {
        matches!(self.tilt().direction, TiltDirection::Balanced)
    }

    /// Event registry for this model.
    pub fn events(&mut self) -> &mut Notifier<BalanceEvent> {
        &mut self.events
    }

    // ===== Operations =====

    /// Kick a ball toward `position` (clamped to the line).
    ///
    /// The ball is in the air for [`KICK_DURATION`] and contributes nothing
    /// until it lands. Errors with [`ModelError::FieldFull`] when landed and
    /// in-flight balls together already reach [`MAX_POINTS`].
    pub fn kick(&mut self, position: f64) -> Result<(), ModelError> {
        if self.points.len() + self.flights.len() >= MAX_POINTS {
            return Err(ModelError::FieldFull);
        }
        let target = position.clamp(LINE_MIN, LINE_MAX);
        self.flights.push(KickFlight {
            target,
            transit: Transit::new(
                KICK_ORIGIN,
                Vec2::new(target as f32, 0.0),
                KICK_DURATION,
            ),
        });
        log::trace!("ball kicked toward {:.2}", target);
        Ok(())
    }

    /// Remove the most recent ball: a flight if one is up, otherwise the
    /// last landed point. Returns the position it held or was headed for.
    pub fn remove_last(&mut self) -> Option<f64> {
        let position = match self.flights.pop() {
            Some(flight) => flight.target,
            None => self.points.pop()?,
        };
        self.events.emit(&BalanceEvent::BallRemoved { position });
        Some(position)
    }

    /// Move the fulcrum to `x` (clamped to the line). Returns the position
    /// actually taken.
    pub fn move_fulcrum(&mut self, x: f64) -> f64 {
        let x = x.clamp(LINE_MIN, LINE_MAX);
        if (x - self.fulcrum).abs() > f64::EPSILON {
            self.fulcrum = x;
            self.events.emit(&BalanceEvent::FulcrumMoved { x });
        }
        self.fulcrum
    }

    /// Advance in-flight balls by `dt` seconds, landing completed ones.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let mut landed = Vec::new();
        self.flights.retain_mut(|flight| {
            if flight.transit.step(dt) {
                landed.push(flight.target);
                false
            } else {
                true
            }
        });
        for position in landed {
            self.points.push(position);
            self.events.emit(&BalanceEvent::BallLanded { position });
        }
    }

    /// Return to the freshly created state. Emits no events; callers treat a
    /// reset as a full refresh.
    pub fn reset(&mut self) {
        self.points.clear();
        self.flights.clear();
        self.fulcrum = DEFAULT_FULCRUM;
    }
}

impl Default for BalancePointModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn land(model: &mut BalancePointModel) {
        for _ in 0..120 {
            model.step(1.0 / 60.0);
            if !model.is_settling() {
                return;
            }
        }
        panic!("balls did not land");
    }

    fn kicked(positions: &[f64]) -> BalancePointModel {
        let mut model = BalancePointModel::new();
        for &x in positions {
            model.kick(x).unwrap();
        }
        land(&mut model);
        model
    }

    #[test]
    fn test_kick_lands_after_flight() {
        let mut model = BalancePointModel::new();
        model.kick(3.0).unwrap();

        assert!(model.is_settling());
        assert!(model.points().is_empty());
        assert_eq!(model.mean(), None);

        land(&mut model);
        assert_eq!(model.points(), &[3.0]);
        assert_eq!(model.mean(), Some(3.0));
    }

    #[test]
    fn test_kick_clamps_to_line() {
        let model = kicked(&[12.0, -3.0]);
        assert_eq!(model.points(), &[LINE_MAX, LINE_MIN]);
    }

    #[test]
    fn test_field_capacity_counts_flights() {
        let mut model = BalancePointModel::new();
        for i in 0..MAX_POINTS {
            model.kick(i as f64).unwrap();
        }
        assert!(matches!(model.kick(5.0), Err(ModelError::FieldFull)));

        // Still full after landing.
        land(&mut model);
        assert!(matches!(model.kick(5.0), Err(ModelError::FieldFull)));
    }

    #[test]
    fn test_balanced_exactly_at_mean() {
        let mut model = kicked(&[2.0, 4.0, 6.0]);

        model.move_fulcrum(4.0);
        let tilt = model.tilt();
        assert!(model.is_balanced());
        assert!(tilt.torque.abs() < 1e-9);

        model.move_fulcrum(3.0);
        let tilt = model.tilt();
        assert_eq!(tilt.direction, TiltDirection::Right);
        assert!((tilt.torque - 3.0).abs() < 1e-12);
        assert!(tilt.angle > 0.0);

        model.move_fulcrum(5.0);
        assert_eq!(model.tilt().direction, TiltDirection::Left);
    }

    #[test]
    fn test_tilt_angle_is_clamped() {
        let mut model = kicked(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]);
        model.move_fulcrum(0.0);

        let tilt = model.tilt();
        assert!((tilt.torque - 70.0).abs() < 1e-12);
        assert!((tilt.angle - MAX_TILT_ANGLE).abs() < 1e-12);
    }

    #[test]
    fn test_empty_beam_is_balanced() {
        let model = BalancePointModel::new();
        assert!(model.is_balanced());
        assert_eq!(model.tilt().torque, 0.0);
        assert_eq!(model.total_deviation(), None);
    }

    #[test]
    fn test_remove_last_prefers_flights() {
        let mut model = kicked(&[2.0]);
        model.kick(8.0).unwrap();

        assert_eq!(model.remove_last(), Some(8.0));
        assert!(!model.is_settling());
        assert_eq!(model.points(), &[2.0]);

        assert_eq!(model.remove_last(), Some(2.0));
        assert_eq!(model.remove_last(), None);
    }

    #[test]
    fn test_total_deviation() {
        let model = kicked(&[2.0, 4.0, 6.0]);
        let deviation = model.total_deviation().unwrap();
        assert!((deviation - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_fulcrum_clamps_and_reports() {
        let mut model = BalancePointModel::new();
        assert_eq!(model.move_fulcrum(-2.0), LINE_MIN);
        assert_eq!(model.move_fulcrum(99.0), LINE_MAX);
    }
}
