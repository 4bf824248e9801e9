//! Frame tick, input and spawn timer handling
//!
//! The game state machine. Frame ticks and spawn firings arrive on the same
//! thread in any interleaving; both only touch the session through these
//! functions.

use super::collision::{advance_obstacles, collect_passes, first_collision};
use super::player::Motion;
use super::pool::ObstacleKind;
use super::spawner::{PairSpawn, spawn_pair};
use super::state::{GameEvent, GamePhase, GameSession};
use super::timer::TimerHandle;
use crate::SimError;

/// Advance the session by one frame of `dt` seconds.
///
/// Zero, negative or non-finite deltas are rejected without touching state.
/// Deltas above `max_delta` are clamped.
pub fn tick(state: &mut GameSession, dt: f32) -> Result<(), SimError> {
    if !(dt.is_finite() && dt > 0.0) {
        log::warn!("rejected tick with delta {dt}");
        return Err(SimError::InvalidDelta(dt));
    }
    let dt = dt.min(state.tuning.max_delta);

    state.time_ticks += 1;
    state.elapsed += dt;

    // Obstacles keep scrolling in every phase, including after a crash
    advance_obstacles(&mut state.pool, dt);

    match state.phase {
        GamePhase::Idle => {
            state.player.bob(state.elapsed, &state.tuning);
        }

        GamePhase::Playing => {
            let player_box = state.player.bounds();
            let hit = first_collision(&state.pool, &player_box);

            for obstacle in collect_passes(&mut state.pool, state.player.pos.x) {
                state.score += 1;
                log::debug!("passed obstacle {obstacle:?}, score {}", state.score);
                state.events.push(GameEvent::Scored {
                    score: state.score,
                    obstacle,
                });
            }

            // The crash frame still steers; the tilt freezes from the next tick
            let ground_top = state.ground_top();
            let motion = state.player.integrate(dt, &state.tuning, ground_top, true);

            if let Some(obstacle) = hit {
                enter_game_over(state, GameEvent::Collided { obstacle });
            } else if motion == Motion::Grounded {
                enter_game_over(state, GameEvent::HitGround);
            }
        }

        GamePhase::GameOver => {
            let ground_top = state.ground_top();
            state.player.integrate(dt, &state.tuning, ground_top, false);
        }
    }

    // The ground freezes with the player
    if state.phase != GamePhase::GameOver {
        state.ground.scroll(state.tuning.scroll_speed * dt);
    }

    log::trace!(
        "tick {} dt={dt:.4} phase={:?} y={:.1} vel={:.1}",
        state.time_ticks,
        state.phase,
        state.player.pos.y,
        state.player.vel
    );
    Ok(())
}

/// The single input entry point (tap / key press)
pub fn primary_action(state: &mut GameSession) {
    match state.phase {
        GamePhase::Idle => start_run(state),
        GamePhase::Playing => flap(state),
        GamePhase::GameOver => {
            // one tap both resets and starts the next run
            state.reset();
            start_run(state);
        }
    }
}

/// Deliver a spawn timer firing. Stale or unarmed handles are ignored.
pub fn fire_spawn_timer(state: &mut GameSession, handle: TimerHandle) -> Option<PairSpawn> {
    if !state.timer.accepts(handle) {
        log::warn!("ignoring stale spawn timer firing {handle:?}");
        return None;
    }
    Some(spawn(state))
}

/// Feed host time into the spawn timer. Spawns at most one pair per call.
pub fn advance_spawn_clock(state: &mut GameSession, elapsed: f32) -> Option<PairSpawn> {
    if !state.timer.advance(elapsed) {
        return None;
    }
    Some(spawn(state))
}

fn spawn(state: &mut GameSession) -> PairSpawn {
    let spawned = spawn_pair(&mut state.pool, &mut state.rng, state.bounds, &state.tuning);

    for &obstacle in &spawned.swept {
        state.events.push(GameEvent::ObstacleRecycled { obstacle });
    }
    state.events.push(GameEvent::ObstacleSpawned {
        obstacle: spawned.bottom,
        kind: ObstacleKind::Bottom,
        recycled: spawned.bottom_recycled,
    });
    state.events.push(GameEvent::ObstacleSpawned {
        obstacle: spawned.top,
        kind: ObstacleKind::Top,
        recycled: spawned.top_recycled,
    });

    log::debug!(
        "spawned pair at open_pos={:.1} ({} recycled, {} swept, {} live)",
        spawned.open_pos,
        spawned.recycled(),
        spawned.swept.len(),
        state.pool.live_count()
    );
    spawned
}

fn start_run(state: &mut GameSession) {
    state.phase = GamePhase::Playing;
    match state.timer.arm() {
        Some(handle) => log::info!("run started, spawn timer {handle:?}"),
        None => log::warn!("run started with spawn timer already armed"),
    }
    state.events.push(GameEvent::Started);
    flap(state);
}

fn flap(state: &mut GameSession) {
    state.player.flap(state.tuning.flap_impulse);
    state.events.push(GameEvent::Flapped);
}

fn enter_game_over(state: &mut GameSession, cause: GameEvent) {
    state.phase = GamePhase::GameOver;
    state.timer.disarm();
    log::info!("game over ({cause:?}), score {}", state.score);
    state.events.push(cause);
}
