//! Position/rotation offset pair produced by shakes

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Offsets for one tick
///
/// `rotation` is in Euler degrees, matching how influence vectors are authored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShakeResult {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ShakeResult {
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    /// Both offsets multiplied by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            position: self.position * factor,
            rotation: self.rotation * factor,
        }
    }

    /// Rotation offset as a quaternion (Y, then X, then Z intrinsic)
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }
}

impl Add for ShakeResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            position: self.position + rhs.position,
            rotation: self.rotation + rhs.rotation,
        }
    }
}

impl AddAssign for ShakeResult {
    fn add_assign(&mut self, rhs: Self) {
        self.position += rhs.position;
        self.rotation += rhs.rotation;
    }
}

impl Sum for ShakeResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, r| acc + r)
    }
}
