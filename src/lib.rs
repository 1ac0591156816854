//! Lane Runner - a three-lane arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game phase)
//! - `tuning`: Data-driven game balance
//! - `hud`: Read-only display values for the presentation layer
//! - `runner`: Fixed-rate frame driver
//! - `autopilot`: Scripted input source for demo/headless runs

pub mod autopilot;
pub mod hud;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use hud::HudReadout;
pub use runner::FixedTimestep;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (reference balance, mirrored by `Tuning::default`)
pub mod consts {
    /// Simulation rate; every timer below is expressed in ticks at this rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Lane centers, left to right
    pub const LANE_POSITIONS: [f32; 3] = [200.0, 400.0, 600.0];

    /// Scroll speed ramp
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_INCREMENT: f32 = 0.001;
    pub const MAX_SPEED: f32 = 15.0;
    /// Distance gained per unit of scroll speed each tick
    pub const DISTANCE_FACTOR: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_START_LANE: usize = 1;
    pub const PLAYER_Y: f32 = 400.0;
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_LATERAL_STEP: f32 = 15.0;
    pub const PLAYER_ANIM_STEP: f32 = 0.2;
    pub const TONGUE_TICKS: u32 = 30;

    /// Power-up durations (ticks)
    pub const INVINCIBLE_TICKS: u32 = 300;
    pub const MAGNET_TICKS: u32 = 360;
    pub const SPEED_BOOST_TICKS: u32 = 240;

    /// Magnet pull
    pub const MAGNET_RADIUS: f32 = 200.0;
    pub const MAGNET_PULL: f32 = 0.1;

    /// Spawn cadence
    pub const OBJECT_SPAWN_INTERVAL: u32 = 100;
    pub const POWERUP_SPAWN_INTERVAL: u32 = 400;
    pub const SINGLE_COLLECTIBLE_CHANCE: f64 = 0.7;
    pub const OBSTACLE_CHANCE: f64 = 0.6;
    pub const POWERUP_CHANCE: f64 = 0.7;

    /// Points per collectible class
    pub const SIX_POINTS: u32 = 60;
    pub const SEVEN_POINTS: u32 = 70;
    /// A milestone message fires whenever the score enters a new bucket of this size
    pub const MILESTONE_STEP: u32 = 100;

    /// Particle bursts
    pub const COLLECTIBLE_BURST: usize = 15;
    pub const POWERUP_BURST: usize = 20;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    pub const MAX_PARTICLES: usize = 512;

    /// Floating "you go twin" message
    pub const MESSAGE_TICKS: u32 = 120;
    pub const MESSAGE_RISE: f32 = 2.0;
    pub const MESSAGE_Y: f32 = 150.0;

    /// Road markers scrolling behind the lanes
    pub const ROAD_LINE_COUNT: usize = 10;
    pub const ROAD_LINE_SPACING: f32 = 80.0;
    pub const ROAD_LINE_RESET_Y: f32 = -100.0;
}

/// Step `current` toward `target` by at most `max_step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    if current < target {
        (current + max_step).min(target)
    } else if current > target {
        (current - max_step).max(target)
    } else {
        current
    }
}
