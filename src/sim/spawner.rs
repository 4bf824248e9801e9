//! Obstacle pair spawning
//!
//! Each spawn first recycles obstacles that scrolled off the left edge, then
//! places a Top/Bottom pair around one random opening center just past the
//! right edge.

use glam::Vec2;
use rand::Rng;

use super::pool::{ObstacleId, ObstacleKind, ObstaclePool};
use crate::SceneBounds;
use crate::tuning::Tuning;

/// What one spawn did
#[derive(Debug, Clone, PartialEq)]
pub struct PairSpawn {
    /// Vertical center of the opening
    pub open_pos: f32,
    pub top: ObstacleId,
    pub bottom: ObstacleId,
    pub top_recycled: bool,
    pub bottom_recycled: bool,
    /// Obstacles released by the off-screen sweep
    pub swept: Vec<ObstacleId>,
}

impl PairSpawn {
    /// How many of the two came from the dead lists
    pub fn recycled(&self) -> usize {
        usize::from(self.top_recycled) + usize::from(self.bottom_recycled)
    }
}

/// Release live obstacles whose right edge is left of `left_bound`
pub fn sweep_offscreen(pool: &mut ObstaclePool, left_bound: f32) -> Vec<ObstacleId> {
    pool.release_where(|o| o.right_edge() < left_bound)
}

/// Draw an opening center from the middle band of the scene
pub fn random_open_pos<R: Rng + ?Sized>(rng: &mut R, bounds: SceneBounds, tuning: &Tuning) -> f32 {
    let offset = rng.random::<f32>() - 0.5;
    bounds.height / 2.0 + offset * bounds.height * tuning.spawn_band
}

/// Top-left corners of the Top and Bottom obstacle for an opening
pub fn pair_positions(open_pos: f32, spawn_x: f32, tuning: &Tuning) -> (Vec2, Vec2) {
    let half_opening = tuning.opening / 2.0;
    let top = Vec2::new(spawn_x, open_pos - half_opening - tuning.obstacle_size.y);
    let bottom = Vec2::new(spawn_x, open_pos + half_opening);
    (top, bottom)
}

/// Sweep, then spawn a pair around a given opening center
pub fn spawn_pair_at(
    pool: &mut ObstaclePool,
    bounds: SceneBounds,
    tuning: &Tuning,
    open_pos: f32,
) -> PairSpawn {
    let swept = sweep_offscreen(pool, 0.0);

    let spawn_x = bounds.width + tuning.spawn_margin;
    let (top_pos, bottom_pos) = pair_positions(open_pos, spawn_x, tuning);
    let vel = -tuning.scroll_speed;

    let (bottom, bottom_recycled) =
        pool.acquire(ObstacleKind::Bottom, bottom_pos, tuning.obstacle_size, vel);
    let (top, top_recycled) = pool.acquire(ObstacleKind::Top, top_pos, tuning.obstacle_size, vel);

    PairSpawn {
        open_pos,
        top,
        bottom,
        top_recycled,
        bottom_recycled,
        swept,
    }
}

/// Sweep, then spawn a pair around a random opening center
pub fn spawn_pair<R: Rng + ?Sized>(
    pool: &mut ObstaclePool,
    rng: &mut R,
    bounds: SceneBounds,
    tuning: &Tuning,
) -> PairSpawn {
    let open_pos = random_open_pos(rng, bounds, tuning);
    spawn_pair_at(pool, bounds, tuning, open_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bounds() -> SceneBounds {
        SceneBounds::new(400.0, 400.0)
    }

    #[test]
    fn test_pair_positions_straddle_opening() {
        let tuning = Tuning::default();
        let (top, bottom) = pair_positions(200.0, 426.0, &tuning);
        assert_eq!(top, Vec2::new(426.0, -180.0));
        assert_eq!(bottom, Vec2::new(426.0, 260.0));
        // Top's lower edge and Bottom's upper edge are exactly one opening apart
        assert_eq!(bottom.y - (top.y + tuning.obstacle_size.y), tuning.opening);
    }

    #[test]
    fn test_spawn_pair_at_places_both_past_right_edge() {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new();
        let spawn = spawn_pair_at(&mut pool, bounds(), &tuning, 200.0);

        let top = pool.get(spawn.top).unwrap();
        let bottom = pool.get(spawn.bottom).unwrap();
        assert_eq!(top.kind, ObstacleKind::Top);
        assert_eq!(bottom.kind, ObstacleKind::Bottom);
        assert_eq!(top.pos, Vec2::new(426.0, -180.0));
        assert_eq!(bottom.pos, Vec2::new(426.0, 260.0));
        assert_eq!(top.vel, -tuning.scroll_speed);
        assert_eq!(bottom.vel, -tuning.scroll_speed);
        assert_eq!(spawn.recycled(), 0);
        assert!(spawn.swept.is_empty());
    }

    #[test]
    fn test_spawn_recycles_offscreen_pair() {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new();
        let first = spawn_pair_at(&mut pool, bounds(), &tuning, 200.0);

        // Scroll the first pair fully past the left edge
        pool.for_each_live_mut(|o| o.pos.x = -60.0);

        let second = spawn_pair_at(&mut pool, bounds(), &tuning, 180.0);
        assert_eq!(second.swept.len(), 2);
        assert_eq!(second.recycled(), 2);
        assert_eq!(second.top, first.top);
        assert_eq!(second.bottom, first.bottom);
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.live_count(), 2);
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_partially_visible_obstacle_is_kept() {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new();
        spawn_pair_at(&mut pool, bounds(), &tuning, 200.0);
        // right edge at +2, still on screen
        pool.for_each_live_mut(|o| o.pos.x = -50.0);

        let spawn = spawn_pair_at(&mut pool, bounds(), &tuning, 200.0);
        assert!(spawn.swept.is_empty());
        assert_eq!(pool.live_count(), 4);
    }

    #[test]
    fn test_random_open_pos_stays_in_band() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let open = random_open_pos(&mut rng, bounds(), &tuning);
            assert!((160.0..=240.0).contains(&open), "open_pos {open}");
        }
    }

    #[test]
    fn test_spawn_pair_is_seed_deterministic() {
        let tuning = Tuning::default();
        let mut pool_a = ObstaclePool::new();
        let mut pool_b = ObstaclePool::new();
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        for _ in 0..5 {
            let a = spawn_pair(&mut pool_a, &mut rng_a, bounds(), &tuning);
            let b = spawn_pair(&mut pool_b, &mut rng_b, bounds(), &tuning);
            assert_eq!(a, b);
        }
    }
}
