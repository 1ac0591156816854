//! Data-driven game balance
//!
//! `Tuning::default()` is the reference balance from `consts`. A JSON file may
//! override any subset of fields; the rest keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_height: f32,
    /// Lane centers, left to right
    pub lane_positions: Vec<f32>,
    pub ticks_per_second: u32,

    pub base_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub distance_factor: f32,

    pub start_lane: usize,
    pub player_y: f32,
    pub lateral_step: f32,
    pub tongue_ticks: u32,

    pub invincible_ticks: u32,
    pub magnet_ticks: u32,
    pub speed_boost_ticks: u32,
    pub magnet_radius: f32,
    pub magnet_pull: f32,

    pub object_spawn_interval: u32,
    pub powerup_spawn_interval: u32,
    pub single_collectible_chance: f64,
    pub obstacle_chance: f64,
    pub powerup_chance: f64,

    pub six_points: u32,
    pub seven_points: u32,
    pub milestone_step: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_height: PLAYFIELD_HEIGHT,
            lane_positions: LANE_POSITIONS.to_vec(),
            ticks_per_second: TICKS_PER_SECOND,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,
            distance_factor: DISTANCE_FACTOR,

            start_lane: PLAYER_START_LANE,
            player_y: PLAYER_Y,
            lateral_step: PLAYER_LATERAL_STEP,
            tongue_ticks: TONGUE_TICKS,

            invincible_ticks: INVINCIBLE_TICKS,
            magnet_ticks: MAGNET_TICKS,
            speed_boost_ticks: SPEED_BOOST_TICKS,
            magnet_radius: MAGNET_RADIUS,
            magnet_pull: MAGNET_PULL,

            object_spawn_interval: OBJECT_SPAWN_INTERVAL,
            powerup_spawn_interval: POWERUP_SPAWN_INTERVAL,
            single_collectible_chance: SINGLE_COLLECTIBLE_CHANCE,
            obstacle_chance: OBSTACLE_CHANCE,
            powerup_chance: POWERUP_CHANCE,

            six_points: SIX_POINTS,
            seven_points: SEVEN_POINTS,
            milestone_step: MILESTONE_STEP,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn lane_count(&self) -> usize {
        self.lane_positions.len()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.lane_positions.is_empty() {
            return Err(invalid("lane_positions", "at least one lane is required"));
        }
        if self.start_lane >= self.lane_count() {
            return Err(invalid(
                "start_lane",
                format!("{} is outside 0..{}", self.start_lane, self.lane_count()),
            ));
        }
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second", "must be positive"));
        }
        if self.object_spawn_interval == 0 {
            return Err(invalid("object_spawn_interval", "must be positive"));
        }
        if self.powerup_spawn_interval == 0 {
            return Err(invalid("powerup_spawn_interval", "must be positive"));
        }
        if self.milestone_step == 0 {
            return Err(invalid("milestone_step", "must be positive"));
        }
        if self.base_speed > self.max_speed {
            return Err(invalid(
                "base_speed",
                format!("{} exceeds max_speed {}", self.base_speed, self.max_speed),
            ));
        }
        if self.speed_increment < 0.0 {
            return Err(invalid("speed_increment", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.magnet_pull) {
            return Err(invalid("magnet_pull", "must lie in [0, 1]"));
        }
        for (field, p) in [
            ("single_collectible_chance", self.single_collectible_chance),
            ("obstacle_chance", self.obstacle_chance),
            ("powerup_chance", self.powerup_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("probability {p} outside [0, 1]")));
            }
        }
        Ok(())
    }
}
