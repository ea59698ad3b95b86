//! Spinning and settling the rendered pose of the primary die.
//!
//! The two recurrences are plain functions of the current pose so they can
//! be tested without a render loop. [`OrientationResolver`] wraps them with
//! the die's face table and the state of the current motion.

use dt_core::{AngularVelocity, DiceResult, DieKind, Orientation};
use tracing::warn;

use crate::config::EngineConfig;

/// One free-spin tick: integrate the velocity over `dt` seconds, then
/// decay it by `decay`.
pub fn spin_step(
    orientation: Orientation,
    velocity: AngularVelocity,
    dt: f32,
    decay: f32,
) -> (Orientation, AngularVelocity) {
    (orientation.integrate(velocity, dt), velocity.scaled(decay))
}

/// One settle tick: cover `rate` of the remaining angle to `target`.
///
/// Once the step is too small to change the pose in f32, the pose snaps onto
/// `target`, so settling always finishes.
pub fn settle_step(orientation: Orientation, target: Orientation, rate: f32) -> Orientation {
    let next = orientation.approach(target, rate);
    if next == orientation { target } else { next }
}

/// What the die is currently doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Holding still.
    Resting,
    /// Spinning freely with a decaying velocity.
    FreeSpin(AngularVelocity),
    /// Converging on a face-up pose.
    Settling(Orientation),
}

/// Drives the rendered orientation of the primary die.
#[derive(Debug, Clone)]
pub struct OrientationResolver {
    die: DieKind,
    orientation: Orientation,
    motion: Motion,
    target: Option<Orientation>,
    spin_decay: f32,
    settle_rate: f32,
    tolerance: f32,
}

impl OrientationResolver {
    /// Pose of a die before its first roll.
    pub const REST_POSE: Orientation = Orientation::new(0.2, 0.2, 0.0);

    /// A resting resolver for `die` with explicit tuning.
    pub fn new(die: DieKind, spin_decay: f32, settle_rate: f32, tolerance: f32) -> Self {
        Self {
            die,
            orientation: Self::REST_POSE,
            motion: Motion::Resting,
            target: None,
            spin_decay,
            settle_rate,
            tolerance,
        }
    }

    /// A resting resolver for `die` tuned from an engine config.
    pub fn from_config(die: DieKind, config: &EngineConfig) -> Self {
        Self::new(
            die,
            config.spin_decay,
            config.settle_rate,
            config.tolerance,
        )
    }

    /// The die whose face table targets are read from.
    pub fn die(&self) -> DieKind {
        self.die
    }

    /// Current pose.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current motion.
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// The last valid settle target, if any.
    pub fn target(&self) -> Option<Orientation> {
        self.target
    }

    /// Switch to another die's face table, keeping the current pose.
    pub fn set_die(&mut self, die: DieKind) {
        if die != self.die {
            self.die = die;
            self.target = None;
        }
    }

    /// Start spinning freely with `velocity`, dropping any settle target.
    pub fn begin_free_spin(&mut self, velocity: AngularVelocity) {
        self.motion = Motion::FreeSpin(velocity);
        self.target = None;
    }

    /// Start settling onto `face`.
    ///
    /// An unknown face is an error and the previous target is kept. With no
    /// previous target the current pose is held instead, so the settle still
    /// converges.
    pub fn set_target_face(&mut self, face: u32) -> DiceResult<Orientation> {
        match self.die.spec().orientation_for(face) {
            Ok(target) => {
                self.orientation = self.orientation.unwrapped_toward(target);
                self.target = Some(target);
                self.motion = Motion::Settling(target);
                Ok(target)
            }
            Err(err) => {
                let held = self.target.unwrap_or(self.orientation);
                warn!(die = %self.die, face, "no orientation for face, holding {held}");
                self.target = Some(held);
                self.motion = Motion::Settling(held);
                Err(err)
            }
        }
    }

    /// Advance the current motion by `dt` seconds and return the new pose.
    pub fn step(&mut self, dt: f32) -> Orientation {
        match self.motion {
            Motion::Resting => {}
            Motion::FreeSpin(velocity) => {
                let (orientation, velocity) =
                    spin_step(self.orientation, velocity, dt, self.spin_decay);
                self.orientation = orientation;
                self.motion = Motion::FreeSpin(velocity);
            }
            Motion::Settling(target) => {
                self.orientation = settle_step(self.orientation, target, self.settle_rate);
            }
        }
        self.orientation
    }

    /// Largest per-axis angle left to the settle target.
    pub fn remaining_distance(&self) -> Option<f32> {
        match self.motion {
            Motion::Settling(target) => Some(self.orientation.distance_to(target)),
            _ => None,
        }
    }

    /// Whether the pose is within tolerance of its target on every axis.
    /// A free-spinning die has not converged; a resting one has.
    pub fn has_converged(&self) -> bool {
        match self.motion {
            Motion::Resting => true,
            Motion::FreeSpin(_) => false,
            Motion::Settling(target) => self.orientation.distance_to(target) < self.tolerance,
        }
    }

    /// Snap onto the settle target and stop.
    pub fn come_to_rest(&mut self) {
        if let Motion::Settling(target) = self.motion {
            self.orientation = target;
        }
        self.motion = Motion::Resting;
    }

    /// Stop wherever the die is, forgetting any target.
    pub fn halt(&mut self) {
        self.motion = Motion::Resting;
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use dt_core::DiceError;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn resolver(die: DieKind) -> OrientationResolver {
        OrientationResolver::from_config(die, &EngineConfig::default())
    }

    #[test]
    fn spin_step_integrates_then_decays() {
        let (o, v) = spin_step(
            Orientation::IDENTITY,
            AngularVelocity::new(6.0, 0.0, -3.0),
            0.5,
            0.992,
        );
        assert!((o.x - 3.0).abs() < 1e-6);
        assert!((o.z + 1.5).abs() < 1e-6);
        assert!((v.x - 6.0 * 0.992).abs() < 1e-6);
    }

    #[test]
    fn free_spin_winds_down() {
        let mut r = resolver(DieKind::D20);
        r.begin_free_spin(AngularVelocity::new(4.0, -4.0, 2.0));
        let start = AngularVelocity::new(4.0, -4.0, 2.0).magnitude();
        for _ in 0..120 {
            r.step(DT);
        }
        let Motion::FreeSpin(v) = r.motion() else {
            panic!("expected free spin");
        };
        assert!(v.magnitude() < start * 0.4);
        assert!(v.magnitude() > 0.0);
        assert!(!r.has_converged());
    }

    #[test]
    fn settle_distance_strictly_decreases_until_converged() {
        let config = EngineConfig::default();
        for die in DieKind::ALL {
            for face in die.spec().values() {
                let mut r = resolver(die);
                r.begin_free_spin(AngularVelocity::new(3.5, -2.0, 1.0));
                for _ in 0..90 {
                    r.step(DT);
                }
                r.set_target_face(face).unwrap();

                let start = r.remaining_distance().unwrap();
                // Geometric decay: (1 - rate)^n * start < tolerance.
                let bound = ((config.tolerance / start.max(config.tolerance)).ln()
                    / (1.0 - config.settle_rate).ln())
                .ceil() as u32
                    + 2;

                let mut previous = start;
                let mut ticks = 0;
                while !r.has_converged() {
                    r.step(DT);
                    ticks += 1;
                    let remaining = r.remaining_distance().unwrap();
                    assert!(remaining < previous, "{die} face {face} stalled at {remaining}");
                    previous = remaining;
                    assert!(ticks <= bound, "{die} face {face} took more than {bound} ticks");
                }
            }
        }
    }

    #[test]
    fn settle_step_snaps_when_step_underflows() {
        let target = Orientation::new(2.5, -0.8, 0.0);
        let near = Orientation::new(2.5 + 1e-6, -0.8, 0.0);
        assert_ne!(near, target);
        assert_eq!(settle_step(near, target, 0.05), target);

        let far = Orientation::new(1.5, -0.8, 0.0);
        let next = settle_step(far, target, 0.05);
        assert!((next.x - 1.55).abs() < 1e-6);
    }

    #[test]
    fn converges_at_smallest_tolerance() {
        let config = EngineConfig::default().with_tolerance(EngineConfig::MIN_TOLERANCE);
        let mut r = OrientationResolver::from_config(DieKind::D20, &config);
        r.begin_free_spin(AngularVelocity::new(3.5, -2.0, 1.0));
        for _ in 0..90 {
            r.step(DT);
        }
        let target = r.set_target_face(8).unwrap();
        let mut ticks = 0;
        while !r.has_converged() {
            r.step(DT);
            ticks += 1;
            assert!(ticks < 1_000, "stuck at {}", r.orientation());
        }
        r.come_to_rest();
        assert_eq!(r.orientation(), target);
    }

    #[test]
    fn settle_starts_within_half_turn() {
        let mut r = resolver(DieKind::D6);
        r.begin_free_spin(AngularVelocity::new(4.0, 4.0, 4.0));
        for _ in 0..600 {
            r.step(DT);
        }
        r.set_target_face(5).unwrap();
        assert!(r.remaining_distance().unwrap() <= std::f32::consts::PI + 1e-4);
    }

    #[test]
    fn lands_on_face_pose() {
        let mut r = resolver(DieKind::D20);
        let target = r.set_target_face(17).unwrap();
        while !r.has_converged() {
            r.step(DT);
        }
        r.come_to_rest();
        assert_eq!(r.orientation(), target);
        assert_eq!(r.motion(), Motion::Resting);
    }

    #[test]
    fn unknown_face_keeps_previous_target() {
        let mut r = resolver(DieKind::D6);
        let target = r.set_target_face(3).unwrap();
        let err = r.set_target_face(9).unwrap_err();
        assert_eq!(
            err,
            DiceError::UnknownFace {
                die: DieKind::D6,
                face: 9
            }
        );
        assert_eq!(r.target(), Some(target));
        assert_eq!(r.motion(), Motion::Settling(target));
    }

    #[test]
    fn unknown_face_without_target_holds_pose() {
        let mut r = resolver(DieKind::D100);
        r.begin_free_spin(AngularVelocity::new(1.0, 1.0, 1.0));
        r.step(DT);
        let pose = r.orientation();
        assert!(r.set_target_face(5).is_err());
        assert_eq!(r.target(), Some(pose));
        assert!(r.has_converged());
    }

    #[test]
    fn set_die_switches_face_table() {
        let mut r = resolver(DieKind::D4);
        assert!(r.set_target_face(20).is_err());
        r.set_die(DieKind::D20);
        assert!(r.set_target_face(20).is_ok());
        assert_eq!(r.die(), DieKind::D20);
    }

    #[test]
    fn halt_stops_motion() {
        let mut r = resolver(DieKind::D8);
        r.begin_free_spin(AngularVelocity::new(2.0, 0.0, 0.0));
        r.step(DT);
        r.halt();
        let pose = r.orientation();
        r.step(DT);
        assert_eq!(r.orientation(), pose);
        assert!(r.has_converged());
    }
}
