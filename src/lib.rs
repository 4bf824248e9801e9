//! Flap Runner - simulation core of a side-scrolling flap-and-dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `game`: Host-facing lifecycle facade (ready/tick/tap/timer entry points)
//! - `platform`: Collaborator traits for rendering, audio and score display
//! - `audio`: Sound effect vocabulary
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use audio::SoundEffect;
pub use game::Game;
pub use platform::{NullPresenter, Presenter, PresenterError, RecordingPresenter};
pub use tuning::Tuning;

use std::fmt;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Horizontal scroll speed shared by ground and obstacles (pixels/s)
    pub const SCROLL_SPEED: f32 = 96.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1100.0;
    /// Upward speed assigned on every flap (pixels/s)
    pub const FLAP_IMPULSE: f32 = 320.0;
    /// Seconds between obstacle pair spawns
    pub const SPAWN_PERIOD: f32 = 2.6;
    /// Vertical gap between a Top and a Bottom obstacle
    pub const OPENING: f32 = 120.0;
    /// Height of the ground strip at the bottom of the scene
    pub const GROUND_HEIGHT: f32 = 64.0;

    /// Obstacle sprite size
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_HEIGHT: f32 = 320.0;
    /// Obstacles spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 26.0;
    /// Fraction of the scene height the opening center may wander over
    pub const SPAWN_BAND: f32 = 0.2;

    /// Player hitbox (narrower than the 36px sprite)
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 26.0;
    /// Player anchor as a fraction of the scene width
    pub const PLAYER_ANCHOR_X: f32 = 0.2;

    /// Idle bobbing
    pub const BOB_AMPLITUDE: f32 = 8.0;
    pub const BOB_PERIOD: f32 = 0.2;

    /// Overlap subtracted when a ground tile is moved behind its sibling
    pub const SEAM_CORRECTION: f32 = 1.55;

    /// Largest delta a single tick integrates (seconds)
    pub const MAX_DELTA: f32 = 0.1;
}

/// Errors returned by the host-facing entry points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimError {
    /// Tick or timer delivered before `on_ready`
    NotReady,
    /// `on_ready` delivered twice
    AlreadyReady,
    /// Frame delta was zero, negative or not finite
    InvalidDelta(f32),
    /// Scene bounds were zero, negative or not finite
    InvalidBounds { width: f32, height: f32 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NotReady => write!(f, "simulation is not ready yet"),
            SimError::AlreadyReady => write!(f, "simulation was already initialized"),
            SimError::InvalidDelta(dt) => write!(f, "invalid frame delta: {dt}"),
            SimError::InvalidBounds { width, height } => {
                write!(f, "invalid scene bounds: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Size of the visible scene, handed over by the host once assets are loaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub width: f32,
    pub height: f32,
}

impl SceneBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and positive
    pub fn is_valid(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Finite and strictly greater than zero
#[inline]
pub fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
