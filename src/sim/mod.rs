//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (live order of the obstacle pool)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geom;
pub mod ground;
pub mod player;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{advance_obstacles, collect_passes, first_collision};
pub use geom::Aabb;
pub use ground::GroundStrip;
pub use player::{Motion, Player};
pub use pool::{Membership, Obstacle, ObstacleId, ObstacleKind, ObstaclePool};
pub use spawner::{PairSpawn, spawn_pair, spawn_pair_at};
pub use state::{GameEvent, GamePhase, GameSession, Snapshot};
pub use tick::{advance_spawn_clock, fire_spawn_timer, primary_action, tick};
pub use timer::{SpawnTimer, TimerHandle, TimerRequest};
