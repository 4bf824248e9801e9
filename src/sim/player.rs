//! Player physics
//!
//! Velocity is upward speed (positive = rising) while positions are in
//! screen space, so integration subtracts from y.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::tuning::Tuning;

/// The controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the hitbox
    pub pos: Vec2,
    /// Upward speed (pixels/s)
    pub vel: f32,
    /// Rotation in radians (positive = nose up)
    pub angle: f32,
    pub size: Vec2,
    /// Resting point used by reset and idle bobbing
    pub anchor: Vec2,
}

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Airborne,
    /// Clamped to the ground top this step
    Grounded,
}

impl Player {
    pub fn new(anchor: Vec2, size: Vec2) -> Self {
        Self {
            pos: anchor,
            vel: 0.0,
            angle: 0.0,
            size,
            anchor,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Back to the anchor, level and at rest
    pub fn reset(&mut self) {
        self.pos = self.anchor;
        self.vel = 0.0;
        self.angle = 0.0;
    }

    /// Instantaneous velocity reset, not additive thrust
    #[inline]
    pub fn flap(&mut self, impulse: f32) {
        self.vel = impulse;
    }

    /// Idle hover around the anchor
    pub fn bob(&mut self, elapsed: f32, tuning: &Tuning) {
        self.pos.x = self.anchor.x;
        self.pos.y = self.anchor.y + tuning.bob_amplitude * (elapsed / tuning.bob_period).cos();
        self.angle = 0.0;
    }

    /// Apply gravity and move, clamping to `ground_top`.
    ///
    /// `steer` recomputes the tilt from the velocity; a dead player keeps
    /// whatever tilt it had until it lands.
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning, ground_top: f32, steer: bool) -> Motion {
        self.vel -= tuning.gravity * dt;
        if steer {
            self.angle = tilt(self.vel, tuning.flap_impulse);
        }

        let next_y = self.pos.y - self.vel * dt;
        if next_y >= ground_top {
            self.pos.y = ground_top;
            self.vel = 0.0;
            self.angle = -FRAC_PI_2;
            return Motion::Grounded;
        }

        self.pos.y = next_y;
        Motion::Airborne
    }
}

/// Nose-up right after a flap, nose-down while falling
#[inline]
pub fn tilt(vel: f32, flap_impulse: f32) -> f32 {
    ((flap_impulse + vel) / flap_impulse).clamp(-FRAC_PI_2, FRAC_PI_4)
}
