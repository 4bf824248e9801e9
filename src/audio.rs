//! Sound effect vocabulary
//!
//! The core never mixes audio itself; it only names which effect should play
//! and hands that to the host's `Presenter`.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundEffect {
    /// Player flapped
    Flap,
    /// Obstacle pair cleared
    Score,
    /// Player hit an obstacle or the ground
    Collide,
}

impl SoundEffect {
    /// Event name the host's sound bank is keyed by
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Flap => "flap",
            SoundEffect::Score => "score",
            SoundEffect::Collide => "collide",
        }
    }
}

impl std::fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
