//! Obstacle motion, hit detection and pass-through scoring

use super::geom::Aabb;
use super::pool::{ObstacleId, ObstacleKind, ObstaclePool};

/// Move every live obstacle by its own velocity
pub fn advance_obstacles(pool: &mut ObstaclePool, dt: f32) {
    pool.for_each_live_mut(|o| o.advance(dt));
}

/// First live obstacle (in live order) overlapping the player's box
pub fn first_collision(pool: &ObstaclePool, player_box: &Aabb) -> Option<ObstacleId> {
    pool.live()
        .find(|o| o.bounds().intersects(player_box))
        .map(|o| o.id)
}

/// Mark Bottom obstacles whose left edge moved behind `player_x` as passed.
///
/// Returns the newly passed ids; each one is worth one point. An obstacle can
/// only be returned again after it has been recycled.
pub fn collect_passes(pool: &mut ObstaclePool, player_x: f32) -> Vec<ObstacleId> {
    let mut passed = Vec::new();
    pool.for_each_live_mut(|o| {
        if o.kind == ObstacleKind::Bottom && !o.passed && o.pos.x < player_x {
            o.passed = true;
            passed.push(o.id);
        }
    });
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const SIZE: Vec2 = Vec2::new(52.0, 320.0);

    fn player_box(y: f32) -> Aabb {
        Aabb::from_center(Vec2::new(100.0, y), Vec2::new(20.0, 26.0))
    }

    #[test]
    fn test_top_obstacle_hit_depends_on_height() {
        let mut pool = ObstaclePool::new();
        // box [95,147] x [-180,140]
        let (top, _) = pool.acquire(ObstacleKind::Top, Vec2::new(95.0, -180.0), SIZE, -96.0);

        assert_eq!(first_collision(&pool, &player_box(100.0)), Some(top));
        // player box [140,166] touches the bottom edge only
        assert_eq!(first_collision(&pool, &player_box(153.0)), None);
        assert_eq!(first_collision(&pool, &player_box(152.5)), Some(top));
        // inside the opening
        assert_eq!(first_collision(&pool, &player_box(200.0)), None);
    }

    #[test]
    fn test_no_hit_when_x_disjoint() {
        let mut pool = ObstaclePool::new();
        // player spans x [90,110], obstacle starts at 110
        pool.acquire(ObstacleKind::Top, Vec2::new(110.0, -180.0), SIZE, -96.0);
        assert_eq!(first_collision(&pool, &player_box(100.0)), None);
    }

    #[test]
    fn test_dead_obstacles_never_collide() {
        let mut pool = ObstaclePool::new();
        let (id, _) = pool.acquire(ObstacleKind::Top, Vec2::new(95.0, -180.0), SIZE, -96.0);
        pool.release(id);
        assert_eq!(first_collision(&pool, &player_box(100.0)), None);
    }

    #[test]
    fn test_only_bottom_scores_once() {
        let mut pool = ObstaclePool::new();
        let (top, _) = pool.acquire(ObstacleKind::Top, Vec2::new(90.0, -180.0), SIZE, -96.0);
        let (bottom, _) = pool.acquire(ObstacleKind::Bottom, Vec2::new(90.0, 260.0), SIZE, -96.0);

        assert_eq!(collect_passes(&mut pool, 100.0), vec![bottom]);
        assert!(collect_passes(&mut pool, 100.0).is_empty());
        assert!(!pool.get(top).unwrap().passed);
    }

    #[test]
    fn test_recycled_obstacle_scores_again() {
        let mut pool = ObstaclePool::new();
        let pos = Vec2::new(50.0, 260.0);
        let (bottom, _) = pool.acquire(ObstacleKind::Bottom, pos, SIZE, -96.0);
        assert_eq!(collect_passes(&mut pool, 100.0).len(), 1);

        pool.release(bottom);
        let (revived, recycled) = pool.acquire(ObstacleKind::Bottom, pos, SIZE, -96.0);
        assert!(recycled);
        assert_eq!(collect_passes(&mut pool, 100.0), vec![revived]);
    }

    #[test]
    fn test_advance_moves_live_only() {
        let mut pool = ObstaclePool::new();
        let (live, _) = pool.acquire(ObstacleKind::Top, Vec2::new(100.0, 0.0), SIZE, -100.0);
        let (dead, _) = pool.acquire(ObstacleKind::Top, Vec2::new(100.0, 0.0), SIZE, -100.0);
        pool.release(dead);
        advance_obstacles(&mut pool, 0.5);
        assert_eq!(pool.get(live).unwrap().pos.x, 50.0);
        assert_eq!(pool.get(dead).unwrap().pos.x, 100.0);
    }

    proptest! {
        #[test]
        fn prop_each_pair_scores_at_most_once(dts in prop::collection::vec(0.001f32..0.5, 1..200)) {
            let mut pool = ObstaclePool::new();
            pool.acquire(ObstacleKind::Top, Vec2::new(426.0, -180.0), SIZE, -96.0);
            pool.acquire(ObstacleKind::Bottom, Vec2::new(426.0, 260.0), SIZE, -96.0);

            let mut score = 0;
            for dt in dts {
                advance_obstacles(&mut pool, dt);
                score += collect_passes(&mut pool, 80.0).len();
                prop_assert!(score <= 1);
            }
        }
    }
}
