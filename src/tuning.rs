//! Game balance parameters
//!
//! Every constant the simulation reads comes from here so tests and hosts can
//! override them. Loaded from JSON; missing fields fall back to `consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::is_positive;

/// Overridable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World motion ===
    /// Leftward speed of ground and obstacles (pixels/s)
    pub scroll_speed: f32,
    /// Downward acceleration applied to the player (pixels/s²)
    pub gravity: f32,
    /// Upward speed assigned on flap (pixels/s)
    pub flap_impulse: f32,

    // === Obstacles ===
    /// Seconds between spawned pairs
    pub spawn_period: f32,
    /// Vertical gap inside a pair
    pub opening: f32,
    /// Width and height of one obstacle
    pub obstacle_size: Vec2,
    /// Distance past the right edge where obstacles appear
    pub spawn_margin: f32,
    /// Fraction of scene height the opening center is drawn from
    pub spawn_band: f32,

    // === Player ===
    /// Hitbox size, centered on the player position
    pub player_size: Vec2,
    /// Idle bob amplitude (pixels)
    pub bob_amplitude: f32,
    /// Idle bob period divisor (seconds)
    pub bob_period: f32,

    // === Ground ===
    pub ground_height: f32,
    pub seam_correction: f32,

    /// Deltas above this are clamped before integration
    pub max_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_speed: SCROLL_SPEED,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            spawn_period: SPAWN_PERIOD,
            opening: OPENING,
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            spawn_margin: SPAWN_MARGIN,
            spawn_band: SPAWN_BAND,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            bob_amplitude: BOB_AMPLITUDE,
            bob_period: BOB_PERIOD,

            ground_height: GROUND_HEIGHT,
            seam_correction: SEAM_CORRECTION,

            max_delta: MAX_DELTA,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace unusable values with defaults.
    ///
    /// Magnitudes must be finite and positive; the bob amplitude, spawn band,
    /// margin and seam correction may be zero but not negative.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive(name: &str, value: &mut f32, fallback: f32) {
            if !is_positive(*value) {
                log::warn!("tuning.{name} = {value} is unusable, using {fallback}");
                *value = fallback;
            }
        }

        fn non_negative(name: &str, value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value >= 0.0) {
                log::warn!("tuning.{name} = {value} is unusable, using {fallback}");
                *value = fallback;
            }
        }

        positive(
            "scroll_speed",
            &mut self.scroll_speed,
            defaults.scroll_speed,
        );
        positive("gravity", &mut self.gravity, defaults.gravity);
        positive(
            "flap_impulse",
            &mut self.flap_impulse,
            defaults.flap_impulse,
        );
        positive(
            "spawn_period",
            &mut self.spawn_period,
            defaults.spawn_period,
        );
        positive("opening", &mut self.opening, defaults.opening);
        positive(
            "obstacle_size.x",
            &mut self.obstacle_size.x,
            defaults.obstacle_size.x,
        );
        positive(
            "obstacle_size.y",
            &mut self.obstacle_size.y,
            defaults.obstacle_size.y,
        );
        positive(
            "player_size.x",
            &mut self.player_size.x,
            defaults.player_size.x,
        );
        positive(
            "player_size.y",
            &mut self.player_size.y,
            defaults.player_size.y,
        );
        positive("bob_period", &mut self.bob_period, defaults.bob_period);
        positive(
            "ground_height",
            &mut self.ground_height,
            defaults.ground_height,
        );
        positive("max_delta", &mut self.max_delta, defaults.max_delta);

        non_negative(
            "spawn_margin",
            &mut self.spawn_margin,
            defaults.spawn_margin,
        );
        non_negative("spawn_band", &mut self.spawn_band, defaults.spawn_band);
        non_negative(
            "bob_amplitude",
            &mut self.bob_amplitude,
            defaults.bob_amplitude,
        );
        non_negative(
            "seam_correction",
            &mut self.seam_correction,
            defaults.seam_correction,
        );

        self
    }
}
