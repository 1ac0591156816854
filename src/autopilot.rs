//! Demo/idle mode - a simple bot that plays the game
//!
//! Produces the same `TickInput` edges a keyboard would. It dodges obstacles
//! approaching in its lane and drifts toward lanes with pickups.

use crate::sim::{GameState, Obstacle, TickInput};

/// How far ahead (in ticks of travel at current speed) the bot looks
const LOOKAHEAD_TICKS: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub lookahead_ticks: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead_ticks: LOOKAHEAD_TICKS,
        }
    }
}

impl Autopilot {
    /// Pick this tick's input
    pub fn decide(&self, state: &GameState) -> TickInput {
        let player = &state.player;
        if !state.is_running() || player.pos.x != player.target_x {
            return TickInput::default();
        }

        let lane_count = state.tuning.lane_count();
        let horizon = player.bounds().min.y - state.speed * self.lookahead_ticks;
        let bottom = player.bounds().max.y;

        let danger = |lane: usize| {
            !player.is_invincible()
                && state.obstacles.iter().any(|o| {
                    o.lane == lane
                        && o.pos.y + Obstacle::SIZE.y / 2.0 > horizon
                        && o.pos.y - Obstacle::SIZE.y / 2.0 < bottom
                })
        };
        let value = |lane: usize| {
            let in_reach = |y: f32| y > horizon && y < bottom;
            let collectibles = state
                .collectibles
                .iter()
                .filter(|c| c.lane == lane && in_reach(c.pos.y))
                .count();
            let powerups = state
                .powerups
                .iter()
                .filter(|p| p.lane == lane && in_reach(p.pos.y))
                .count();
            collectibles + 2 * powerups
        };

        let here = player.lane;
        let neighbours = [here.checked_sub(1), Some(here + 1).filter(|&l| l < lane_count)];
        let best = neighbours
            .into_iter()
            .flatten()
            .filter(|&lane| !danger(lane))
            .max_by_key(|&lane| value(lane));

        let target = match best {
            Some(lane) if danger(here) => Some(lane),
            Some(lane) if value(lane) > value(here) => Some(lane),
            _ => None,
        };

        match target {
            Some(lane) if lane < here => TickInput {
                move_left: true,
                ..Default::default()
            },
            Some(_) => TickInput {
                move_right: true,
                ..Default::default()
            },
            None => TickInput::default(),
        }
    }
}
