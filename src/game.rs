//! Host-facing game facade
//!
//! Wraps a `GameSession` with the lifecycle the host drives:
//! `on_ready` once assets are loaded, then `on_tick` per frame,
//! `on_primary_action` per tap and spawn timer firings on their own cadence.
//! After every entry point the recorded events are turned into collaborator
//! calls on the `Presenter`.

use crate::audio::SoundEffect;
use crate::platform::{EntityId, Presenter};
use crate::sim::{
    self, GameEvent, GamePhase, GameSession, PairSpawn, Snapshot, TimerHandle, TimerRequest,
};
use crate::tuning::Tuning;
use crate::{SceneBounds, SimError};

pub struct Game<P: Presenter> {
    tuning: Tuning,
    seed: u64,
    native_timer: bool,
    /// `None` until `on_ready`
    session: Option<GameSession>,
    presenter: P,
}

impl<P: Presenter> Game<P> {
    /// Create a game waiting for `on_ready`. Tuning is sanitized first.
    pub fn new(tuning: Tuning, seed: u64, presenter: P) -> Self {
        Self {
            tuning: tuning.sanitized(),
            seed,
            native_timer: false,
            session: None,
            presenter,
        }
    }

    /// Queue `TimerRequest`s for a host that backs the spawn timer with its
    /// own facility. Drain them with `take_timer_requests`.
    pub fn with_native_timer(mut self) -> Self {
        self.native_timer = true;
        if let Some(session) = self.session.as_mut() {
            session.timer.set_record_requests(true);
        }
        self
    }

    /// Host finished loading; build the session in the Idle phase
    pub fn on_ready(&mut self, bounds: SceneBounds) -> Result<(), SimError> {
        if self.session.is_some() {
            return Err(SimError::AlreadyReady);
        }
        if !bounds.is_valid() {
            return Err(SimError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }

        log::info!(
            "scene ready: {}x{} (seed {})",
            bounds.width,
            bounds.height,
            self.seed
        );
        let mut session = GameSession::new(self.tuning.clone(), bounds, self.seed);
        session.timer.set_record_requests(self.native_timer);
        session.reset();
        self.session = Some(session);
        self.dispatch_events();
        self.present();
        Ok(())
    }

    /// One rendered frame
    pub fn on_tick(&mut self, delta_seconds: f32) -> Result<(), SimError> {
        let session = self.session.as_mut().ok_or(SimError::NotReady)?;
        sim::tick(session, delta_seconds)?;
        self.dispatch_events();
        self.present();
        Ok(())
    }

    /// Tap / press. Ignored before `on_ready`.
    pub fn on_primary_action(&mut self) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("input before ready, ignored");
            return;
        };
        sim::primary_action(session);
        self.dispatch_events();
    }

    /// Deliver a firing of the spawn timer armed with `handle`.
    ///
    /// Returns what was spawned, or `None` for a stale firing.
    pub fn on_spawn_timer(&mut self, handle: TimerHandle) -> Result<Option<PairSpawn>, SimError> {
        let session = self.session.as_mut().ok_or(SimError::NotReady)?;
        let spawned = sim::fire_spawn_timer(session, handle);
        self.dispatch_events();
        Ok(spawned)
    }

    /// Feed host time to the spawn timer (for hosts without a native timer)
    pub fn advance_spawn_clock(&mut self, elapsed: f32) -> Result<Option<PairSpawn>, SimError> {
        let session = self.session.as_mut().ok_or(SimError::NotReady)?;
        let spawned = sim::advance_spawn_clock(session, elapsed);
        self.dispatch_events();
        Ok(spawned)
    }

    /// Pending arm/disarm requests for a native host timer
    pub fn take_timer_requests(&mut self) -> Vec<TimerRequest> {
        self.session
            .as_mut()
            .map(|s| s.timer.take_requests())
            .unwrap_or_default()
    }

    /// Drop the session; the game waits for `on_ready` again
    pub fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.timer.disarm();
            let released = session.pool.release_all();
            log::info!("teardown: {released} live obstacles released");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.session.as_ref().map(|s| s.phase)
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn play(&mut self, effect: SoundEffect) {
        if let Err(err) = self.presenter.play_sound(effect) {
            log::warn!("sound '{effect}' failed: {err}");
        }
    }

    fn dispatch_events(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for event in session.drain_events() {
            match event {
                GameEvent::Flapped => self.play(SoundEffect::Flap),
                GameEvent::Scored { score, .. } => {
                    self.presenter.report_score(score);
                    self.play(SoundEffect::Score);
                }
                GameEvent::Collided { .. } | GameEvent::HitGround => {
                    self.play(SoundEffect::Collide)
                }
                GameEvent::Reset => self.presenter.report_score(0),
                GameEvent::Started
                | GameEvent::ObstacleSpawned { .. }
                | GameEvent::ObstacleRecycled { .. } => log::debug!("{event:?}"),
            }
        }
    }

    /// Push the current pose of every visible entity to the presenter
    fn present(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let presenter = &mut self.presenter;

        presenter.present_entity_at(EntityId::Player, session.player.pos, session.player.angle);
        for obstacle in session.pool.live() {
            presenter.present_entity_at(EntityId::Obstacle(obstacle.id.0), obstacle.pos, 0.0);
        }
        for (index, &x) in session.ground.segments.iter().enumerate() {
            presenter.present_entity_at(
                EntityId::Ground(index as u8),
                glam::Vec2::new(x, session.ground.top),
                0.0,
            );
        }
    }
}
