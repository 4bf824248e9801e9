//! Obstacle entities and their recycling pool
//!
//! Obstacles live in an arena that only ever grows. Each slot is in exactly
//! one of three lists: live, dead-top or dead-bottom. Acquiring prefers the
//! dead list of the matching kind (LIFO) over allocating a new slot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;

/// Which half of a pair an obstacle forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Hangs from above the opening
    Top,
    /// Rises from below the opening; the one that scores
    Bottom,
}

/// Index into the obstacle arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl ObstacleId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (pixels/s, negative = leftward)
    pub vel: f32,
    pub alive: bool,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Move by the stored velocity
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.vel * dt;
    }
}

/// Which list an arena slot currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Live,
    DeadTop,
    DeadBottom,
}

/// Arena + per-kind free lists
#[derive(Debug, Clone, Default)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    live: Vec<ObstacleId>,
    dead_top: Vec<ObstacleId>,
    dead_bottom: Vec<ObstacleId>,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    fn dead_list_mut(&mut self, kind: ObstacleKind) -> &mut Vec<ObstacleId> {
        match kind {
            ObstacleKind::Top => &mut self.dead_top,
            ObstacleKind::Bottom => &mut self.dead_bottom,
        }
    }

    /// Revive a dead obstacle of `kind` or allocate a new one.
    ///
    /// Returns the id and whether it was recycled.
    pub fn acquire(
        &mut self,
        kind: ObstacleKind,
        pos: Vec2,
        size: Vec2,
        vel: f32,
    ) -> (ObstacleId, bool) {
        if let Some(id) = self.dead_list_mut(kind).pop() {
            let obstacle = &mut self.obstacles[id.index()];
            obstacle.pos = pos;
            obstacle.size = size;
            obstacle.vel = vel;
            obstacle.passed = false;
            obstacle.alive = true;
            self.live.push(id);
            return (id, true);
        }

        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle {
            id,
            kind,
            pos,
            size,
            vel,
            alive: true,
            passed: false,
        });
        self.live.push(id);
        (id, false)
    }

    /// Kill a live obstacle and push it onto its kind's dead list.
    ///
    /// Returns `false` (and changes nothing) if `id` is not live.
    pub fn release(&mut self, id: ObstacleId) -> bool {
        let Some(slot) = self.live.iter().position(|&live| live == id) else {
            return false;
        };
        self.live.remove(slot);

        let obstacle = &mut self.obstacles[id.index()];
        obstacle.alive = false;
        let kind = obstacle.kind;
        self.dead_list_mut(kind).push(id);
        true
    }

    /// Release every live obstacle matching `pred`, in live order
    pub fn release_where(&mut self, mut pred: impl FnMut(&Obstacle) -> bool) -> Vec<ObstacleId> {
        let doomed: Vec<ObstacleId> = self
            .live
            .iter()
            .copied()
            .filter(|id| pred(&self.obstacles[id.index()]))
            .collect();
        for &id in &doomed {
            self.release(id);
        }
        doomed
    }

    /// Release everything (session reset). Returns how many were live.
    pub fn release_all(&mut self) -> usize {
        self.release_where(|_| true).len()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    /// Live obstacles in live order
    pub fn live(&self) -> impl Iterator<Item = &Obstacle> {
        self.live.iter().map(|id| &self.obstacles[id.index()])
    }

    /// Visit live obstacles mutably, in live order
    pub fn for_each_live_mut(&mut self, mut f: impl FnMut(&mut Obstacle)) {
        let Self {
            obstacles, live, ..
        } = self;
        for id in live.iter() {
            f(&mut obstacles[id.index()]);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn dead_count(&self, kind: ObstacleKind) -> usize {
        match kind {
            ObstacleKind::Top => self.dead_top.len(),
            ObstacleKind::Bottom => self.dead_bottom.len(),
        }
    }

    /// Total slots ever allocated
    pub fn allocated(&self) -> usize {
        self.obstacles.len()
    }

    /// Where `id` currently lives (None for an unknown id)
    pub fn membership(&self, id: ObstacleId) -> Option<Membership> {
        if self.live.contains(&id) {
            Some(Membership::Live)
        } else if self.dead_top.contains(&id) {
            Some(Membership::DeadTop)
        } else if self.dead_bottom.contains(&id) {
            Some(Membership::DeadBottom)
        } else {
            None
        }
    }

    /// Every slot is in exactly one list, the list matches its kind, and
    /// `alive` agrees with membership
    pub fn is_consistent(&self) -> bool {
        self.obstacles.iter().all(|o| {
            let lists = [
                self.live.iter().filter(|&&id| id == o.id).count(),
                self.dead_top.iter().filter(|&&id| id == o.id).count(),
                self.dead_bottom.iter().filter(|&&id| id == o.id).count(),
            ];
            if lists.iter().sum::<usize>() != 1 {
                return false;
            }
            match self.membership(o.id) {
                Some(Membership::Live) => o.alive,
                Some(Membership::DeadTop) => !o.alive && o.kind == ObstacleKind::Top,
                Some(Membership::DeadBottom) => !o.alive && o.kind == ObstacleKind::Bottom,
                None => false,
            }
        })
    }
}
