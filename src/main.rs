//! Flap Runner headless entry point
//!
//! Runs the simulation without a renderer: an autopilot taps whenever the
//! player sinks below the next opening, the spawn timer is driven from its
//! own clock, and a JSON snapshot is printed at the end.
//!
//! Usage: `flap-runner [tuning.json] [seconds] [seed]`

use flap_runner::platform::EntityId;
use flap_runner::sim::{GamePhase, ObstacleKind};
use flap_runner::{Game, RecordingPresenter, SceneBounds, Tuning};

/// Host frame rate for the headless run
const FRAME_DT: f32 = 1.0 / 60.0;
const SCENE: SceneBounds = SceneBounds {
    width: 400.0,
    height: 640.0,
};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Flap Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) if path != "-" => load_tuning(&path),
        _ => Tuning::default(),
    };
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut game = Game::new(tuning, seed, RecordingPresenter::new());
    if let Err(err) = game.on_ready(SCENE) {
        log::error!("failed to start: {err}");
        std::process::exit(1);
    }

    let frames = (seconds / FRAME_DT).ceil() as u32;
    let mut runs = 1;
    let mut best = 0;
    game.on_primary_action();

    for frame in 0..frames {
        if let Err(err) = game.advance_spawn_clock(FRAME_DT) {
            log::warn!("spawn clock: {err}");
        }

        if should_flap(&game) {
            game.on_primary_action();
        }

        game.presenter_mut().begin_frame();
        if let Err(err) = game.on_tick(FRAME_DT) {
            log::warn!("frame {frame}: {err}");
            continue;
        }

        best = best.max(game.score());
        if game.phase() == Some(GamePhase::GameOver) {
            let score = game.score();
            log::info!("run {runs} ended at frame {frame} with score {score}");
            runs += 1;
            game.on_primary_action();
        }
    }

    let presenter = game.presenter();
    let sounds = presenter.sounds.len();
    println!("runs: {runs}, best score: {best}, sounds played: {sounds}");
    if let Some(player) = presenter.presented(EntityId::Player) {
        let pos = player.position;
        println!("player at ({:.1}, {:.1})", pos.x, pos.y);
    }
    if let Some(snapshot) = game.snapshot() {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("snapshot serialization failed: {err}"),
        }
    }
}

fn load_tuning(path: &str) -> Tuning {
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(err) => {
                log::warn!("Invalid tuning file {path}: {err}, using defaults");
                Tuning::default()
            }
        },
        Err(err) => {
            log::warn!("Cannot read {path}: {err}, using defaults");
            Tuning::default()
        }
    }
}

/// Tap when falling below the center of the nearest opening ahead
fn should_flap(game: &Game<RecordingPresenter>) -> bool {
    let Some(session) = game.session() else {
        return false;
    };
    if session.phase != GamePhase::Playing || session.player.vel > 0.0 {
        return false;
    }

    let player = &session.player;
    let target = session
        .pool
        .live()
        .filter(|o| o.kind == ObstacleKind::Bottom && o.right_edge() > player.pos.x - player.size.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|o| o.pos.y - session.tuning.opening / 2.0)
        .unwrap_or(SCENE.height / 2.0);

    player.pos.y > target + 10.0
}
