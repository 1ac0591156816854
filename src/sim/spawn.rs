//! Time-based spawn decisions
//!
//! Two independent cooldowns: a frequent one for collectibles and obstacles,
//! and a rare one for power-ups. The scheduler only decides *what* goes in
//! *which lane*; `GameState` turns the requests into entities.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::entities::{CollectibleKind, ObstacleVariant, PowerUpKind};
use crate::tuning::Tuning;

/// A single spawn decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnRequest {
    Collectible {
        lane: usize,
        kind: CollectibleKind,
    },
    Obstacle {
        lane: usize,
        variant: ObstacleVariant,
        anim_phase: f32,
    },
    PowerUp {
        lane: usize,
        kind: PowerUpKind,
    },
}

impl SpawnRequest {
    pub fn lane(&self) -> usize {
        match *self {
            SpawnRequest::Collectible { lane, .. }
            | SpawnRequest::Obstacle { lane, .. }
            | SpawnRequest::PowerUp { lane, .. } => lane,
        }
    }
}

/// Cooldown counters driving spawns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub object_cooldown: u32,
    pub powerup_cooldown: u32,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both cooldowns by one tick and push any spawns that fire
    pub fn tick(&mut self, rng: &mut impl Rng, tuning: &Tuning, out: &mut Vec<SpawnRequest>) {
        self.object_cooldown += 1;
        self.powerup_cooldown += 1;

        if self.object_cooldown >= tuning.object_spawn_interval {
            self.object_cooldown = 0;
            spawn_batch(rng, tuning, out);
        }

        if self.powerup_cooldown >= tuning.powerup_spawn_interval {
            self.powerup_cooldown = 0;
            if rng.random_bool(tuning.powerup_chance) {
                let lane = rng.random_range(0..tuning.lane_count());
                let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
                out.push(SpawnRequest::PowerUp { lane, kind });
            }
        }
    }
}

/// One primary spawn: 1-2 collectibles plus an optional obstacle, all in distinct lanes
fn spawn_batch(rng: &mut impl Rng, tuning: &Tuning, out: &mut Vec<SpawnRequest>) {
    let mut lanes: Vec<usize> = (0..tuning.lane_count()).collect();
    lanes.shuffle(rng);
    let mut free = lanes.into_iter();

    let wanted = if rng.random_bool(tuning.single_collectible_chance) {
        1
    } else {
        2
    };
    for lane in free.by_ref().take(wanted) {
        let kind = CollectibleKind::ALL[rng.random_range(0..CollectibleKind::ALL.len())];
        out.push(SpawnRequest::Collectible { lane, kind });
    }

    if rng.random_bool(tuning.obstacle_chance) {
        if let Some(lane) = free.next() {
            let variant = ObstacleVariant::ALL[rng.random_range(0..ObstacleVariant::ALL.len())];
            let anim_phase = rng.random::<f32>() * std::f32::consts::TAU;
            out.push(SpawnRequest::Obstacle {
                lane,
                variant,
                anim_phase,
            });
        }
    }
}
