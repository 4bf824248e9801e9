//! Looping ground strip
//!
//! Two tiles, each one scene wide, leapfrog each other: once a tile has
//! scrolled a full width off the left edge it is moved directly behind its
//! sibling. Their offsets always differ by `width - seam_correction`.

use serde::{Deserialize, Serialize};

use crate::SceneBounds;
use crate::tuning::Tuning;

/// Horizontal offsets of the two ground tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStrip {
    pub segments: [f32; 2],
    /// Tile width (scene width)
    pub width: f32,
    pub seam_correction: f32,
    /// Screen y of the ground's upper edge
    pub top: f32,
}

impl GroundStrip {
    pub fn new(bounds: SceneBounds, tuning: &Tuning) -> Self {
        let mut strip = Self {
            segments: [0.0, 0.0],
            width: bounds.width,
            seam_correction: tuning.seam_correction,
            top: bounds.height - tuning.ground_height,
        };
        strip.reset();
        strip
    }

    /// Distance from one tile to the next
    #[inline]
    pub fn stride(&self) -> f32 {
        self.width - self.seam_correction
    }

    /// First tile at the origin, second queued behind it
    pub fn reset(&mut self) {
        self.segments = [0.0, self.stride()];
    }

    /// Scroll left by `distance`, then leapfrog tiles that left the screen.
    ///
    /// Returns how many relocations happened.
    pub fn scroll(&mut self, distance: f32) -> u32 {
        for x in &mut self.segments {
            *x -= distance;
        }

        let stride = self.stride();
        if stride <= 0.0 {
            return 0;
        }

        let mut relocations = 0;
        loop {
            let (lead, trail) = if self.segments[0] <= self.segments[1] {
                (0, 1)
            } else {
                (1, 0)
            };
            if self.segments[lead] >= -self.width {
                break;
            }
            self.segments[lead] = self.segments[trail] + stride;
            relocations += 1;
        }
        relocations
    }

    /// Absolute offset difference between the tiles
    #[inline]
    pub fn spacing(&self) -> f32 {
        (self.segments[0] - self.segments[1]).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strip() -> GroundStrip {
        GroundStrip::new(SceneBounds::new(400.0, 400.0), &Tuning::default())
    }

    #[test]
    fn test_initial_layout() {
        let ground = strip();
        assert_eq!(ground.segments[0], 0.0);
        assert!((ground.segments[1] - 398.45).abs() < 1e-3);
        assert_eq!(ground.top, 336.0);
    }

    #[test]
    fn test_leapfrog_behind_sibling() {
        let mut ground = strip();
        assert_eq!(ground.scroll(400.0), 0);
        assert_eq!(ground.segments[0], -400.0);

        assert_eq!(ground.scroll(1.0), 1);
        let [a, b] = ground.segments;
        assert!((b - -2.55).abs() < 1e-3);
        assert!((a - (b + 398.45)).abs() < 1e-3);
    }

    #[test]
    fn test_huge_jump_still_covers_screen() {
        let mut ground = strip();
        ground.scroll(2000.0);
        assert!(ground.segments.iter().all(|&x| x >= -400.0));
        assert!((ground.spacing() - ground.stride()).abs() < 1e-2);
    }

    proptest! {
        #[test]
        fn prop_spacing_is_constant(steps in prop::collection::vec(0.0f32..20.0, 1..400)) {
            let mut ground = strip();
            for step in steps {
                ground.scroll(step);
                prop_assert!((ground.spacing() - ground.stride()).abs() < 1e-2);
                // one tile always overlaps the visible area
                let width = ground.width;
                prop_assert!(ground.segments.iter().any(|&x| x <= 0.0 && x >= -width));
            }
        }
    }
}
