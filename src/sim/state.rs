//! Game state and core simulation types
//!
//! `GameSession` is the single aggregate the state machine mutates. It is
//! created once the scene bounds are known and reset in place between runs;
//! the obstacle arena and its dead lists survive resets.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ground::GroundStrip;
use super::player::Player;
use super::pool::{Obstacle, ObstacleId, ObstacleKind, ObstaclePool};
use super::timer::SpawnTimer;
use crate::SceneBounds;
use crate::consts::PLAYER_ANCHOR_X;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player hovers, waiting for the first tap
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; player drops to the ground
    GameOver,
}

/// Something that happened during a tick or an input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First tap of a run
    Started,
    Flapped,
    /// Score went up; carries the new total
    Scored {
        score: u32,
        obstacle: ObstacleId,
    },
    Collided { obstacle: ObstacleId },
    HitGround,
    /// Session returned to Idle
    Reset,
    ObstacleSpawned {
        obstacle: ObstacleId,
        kind: ObstacleKind,
        recycled: bool,
    },
    /// Scrolled off the left edge and went back to the pool
    ObstacleRecycled { obstacle: ObstacleId },
}

/// Serializable view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub ground: [f32; 2],
}

/// Complete mutable game state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub bounds: SceneBounds,
    pub phase: GamePhase,
    pub score: u32,
    /// Seconds since the last reset (drives idle bobbing)
    pub elapsed: f32,
    /// Accepted ticks since creation
    pub time_ticks: u64,
    pub player: Player,
    pub pool: ObstaclePool,
    pub ground: GroundStrip,
    pub timer: SpawnTimer,
    pub rng: Pcg32,
    /// Pending events (drained by the host facade)
    pub events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session in the Idle phase
    pub fn new(tuning: Tuning, bounds: SceneBounds, seed: u64) -> Self {
        let anchor = Vec2::new(bounds.width * PLAYER_ANCHOR_X, bounds.height / 2.0);
        Self {
            player: Player::new(anchor, tuning.player_size),
            ground: GroundStrip::new(bounds, &tuning),
            timer: SpawnTimer::new(tuning.spawn_period),
            pool: ObstaclePool::new(),
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            elapsed: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
            bounds,
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Idle
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Back to Idle without reallocating anything.
    ///
    /// Live obstacles are released into the dead lists, which persist.
    pub fn reset(&mut self) {
        if let Some(handle) = self.timer.disarm() {
            log::debug!("reset cancelled spawn timer {handle:?}");
        }
        let released = self.pool.release_all();
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.elapsed = 0.0;
        self.player.reset();
        self.events.push(GameEvent::Reset);
        log::info!(
            "session reset ({released} obstacles pooled, {} allocated)",
            self.pool.allocated()
        );
    }

    /// Ground top in screen space
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.ground.top
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            time_ticks: self.time_ticks,
            player: self.player.clone(),
            obstacles: self.pool.live().cloned().collect(),
            ground: self.ground.segments,
        }
    }
}
