//! Platform abstraction layer
//!
//! Everything the core needs from the host, expressed as one trait:
//! - Sound playback (fallible, failures never reach gameplay)
//! - Per-entity presentation updates
//! - Score display

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;

/// Identifies the visual proxy the host keeps for a logic entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Player,
    /// Slot in the obstacle arena (stable across recycling)
    Obstacle(u32),
    /// Ground tile index (0 or 1)
    Ground(u8),
}

/// Failure reported by a collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterError {
    pub message: String,
}

impl PresenterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PresenterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PresenterError {}

/// Host-side collaborator (renderer + audio + HUD)
pub trait Presenter {
    /// Fire-and-forget sound request
    fn play_sound(&mut self, effect: SoundEffect) -> Result<(), PresenterError>;

    /// Update the proxy for one entity
    fn present_entity_at(&mut self, id: EntityId, position: Vec2, rotation: f32);

    /// Score changed
    fn report_score(&mut self, score: u32);
}

/// Presenter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn play_sound(&mut self, _effect: SoundEffect) -> Result<(), PresenterError> {
        Ok(())
    }

    fn present_entity_at(&mut self, _id: EntityId, _position: Vec2, _rotation: f32) {}

    fn report_score(&mut self, _score: u32) {}
}

/// One presentation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presented {
    pub id: EntityId,
    pub position: Vec2,
    pub rotation: f32,
}

/// Presenter that records every call (headless runs and tests)
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub sounds: Vec<SoundEffect>,
    pub scores: Vec<u32>,
    /// Updates from the most recent frame only
    pub frame: Vec<Presented>,
    /// Make `play_sound` fail, to exercise the error path
    pub fail_sounds: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame's presentation updates
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    /// Last reported score (if any)
    pub fn last_score(&self) -> Option<u32> {
        self.scores.last().copied()
    }

    /// Most recent presentation of an entity in the current frame
    pub fn presented(&self, id: EntityId) -> Option<&Presented> {
        self.frame.iter().rev().find(|p| p.id == id)
    }
}

impl Presenter for RecordingPresenter {
    fn play_sound(&mut self, effect: SoundEffect) -> Result<(), PresenterError> {
        if self.fail_sounds {
            return Err(PresenterError::new(format!("no sound loaded for '{effect}'")));
        }
        self.sounds.push(effect);
        Ok(())
    }

    fn present_entity_at(&mut self, id: EntityId, position: Vec2, rotation: f32) {
        self.frame.push(Presented {
            id,
            position,
            rotation,
        });
    }

    fn report_score(&mut self, score: u32) {
        self.scores.push(score);
    }
}
