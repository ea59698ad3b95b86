use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// A 3D rotational pose as XYZ Euler angles in radians.
///
/// This is the value a renderer receives through "set rotation". Each axis is
/// `TAU`-periodic, so two orientations whose axes differ by whole turns show
/// the same pose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation about the X axis.
    pub x: f32,
    /// Rotation about the Y axis.
    pub y: f32,
    /// Rotation about the Z axis.
    pub z: f32,
}

impl Orientation {
    /// The identity pose.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Create an orientation from per-axis angles.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The inverse rotation on every axis.
    pub const fn negated(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Largest per-axis angular distance to `other`.
    pub fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }

    /// The same pose, with each axis shifted by whole turns so it lies
    /// within half a turn of `target`.
    pub fn unwrapped_toward(self, target: Self) -> Self {
        Self::new(
            target.x + wrap_angle(self.x - target.x),
            target.y + wrap_angle(self.y - target.y),
            target.z + wrap_angle(self.z - target.z),
        )
    }

    /// Move `rate` of the remaining way toward `target` on every axis.
    ///
    /// Equivalent to `self * (1 - rate) + target * rate`, written as a step
    /// along the gap so an axis already on target stays exactly there.
    pub fn approach(self, target: Self, rate: f32) -> Self {
        Self::new(
            self.x + (target.x - self.x) * rate,
            self.y + (target.y - self.y) * rate,
            self.z + (target.z - self.z) * rate,
        )
    }

    /// Advance the pose by `velocity` over `dt` seconds.
    pub fn integrate(self, velocity: AngularVelocity, dt: f32) -> Self {
        Self::new(
            self.x + velocity.x * dt,
            self.y + velocity.y * dt,
            self.z + velocity.z * dt,
        )
    }

    /// Whether every axis is a finite number.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Per-axis spin rate in radians per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngularVelocity {
    /// Rate about the X axis.
    pub x: f32,
    /// Rate about the Y axis.
    pub y: f32,
    /// Rate about the Z axis.
    pub z: f32,
}

impl AngularVelocity {
    /// No rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a velocity from per-axis rates.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Every axis multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Euclidean magnitude of the rate vector.
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Wrap an angle into `[-PI, PI)`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
