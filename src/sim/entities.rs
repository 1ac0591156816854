//! Entity models and their per-tick motion rules
//!
//! Entities never look at each other. Anything that involves two entities at
//! once (magnet pull, pickups, crashes) happens in `tick`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::timer::EffectTimer;
use crate::approach;
use crate::consts::*;
use crate::tuning::Tuning;

/// Collectible reward classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Six,
    Seven,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 2] = [CollectibleKind::Six, CollectibleKind::Seven];

    pub fn points(self, tuning: &Tuning) -> u32 {
        match self {
            CollectibleKind::Six => tuning.six_points,
            CollectibleKind::Seven => tuning.seven_points,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollectibleKind::Six => "6",
            CollectibleKind::Seven => "7",
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincible,
    Magnet,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Invincible,
        PowerUpKind::Magnet,
        PowerUpKind::SpeedBoost,
    ];

    pub fn duration(self, tuning: &Tuning) -> u32 {
        match self {
            PowerUpKind::Invincible => tuning.invincible_ticks,
            PowerUpKind::Magnet => tuning.magnet_ticks,
            PowerUpKind::SpeedBoost => tuning.speed_boost_ticks,
        }
    }

    /// Burst color when picked up (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Invincible => 0x00ffff,
            PowerUpKind::Magnet => 0xff00ff,
            PowerUpKind::SpeedBoost => 0xffff00,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Invincible => "INVINCIBLE",
            PowerUpKind::Magnet => "MAGNET",
            PowerUpKind::SpeedBoost => "SPEED",
        }
    }
}

/// Obstacle looks. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleVariant {
    Skibidi,
    Grimace,
    Huggy,
}

impl ObstacleVariant {
    pub const ALL: [ObstacleVariant; 3] = [
        ObstacleVariant::Skibidi,
        ObstacleVariant::Grimace,
        ObstacleVariant::Huggy,
    ];
}

/// The player, sliding between lanes near the bottom of the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lane: usize,
    pub pos: Vec2,
    /// Lane center the player is sliding toward
    pub target_x: f32,
    pub size: Vec2,
    /// Bounce/idle animation phase
    pub anim_phase: f32,
    pub tongue: EffectTimer,
    pub invincible: EffectTimer,
    pub magnet: EffectTimer,
    pub speed_boost: EffectTimer,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let lane = tuning.start_lane;
        let x = tuning.lane_positions[lane];
        Self {
            lane,
            pos: Vec2::new(x, tuning.player_y),
            target_x: x,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            anim_phase: 0.0,
            tongue: EffectTimer::default(),
            invincible: EffectTimer::default(),
            magnet: EffectTimer::default(),
            speed_boost: EffectTimer::default(),
        }
    }

    /// Shift one lane left. Ignored at the leftmost lane.
    pub fn move_left(&mut self, lanes: &[f32]) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        self.target_x = lanes[self.lane];
        true
    }

    /// Shift one lane right. Ignored at the rightmost lane.
    pub fn move_right(&mut self, lanes: &[f32]) -> bool {
        if self.lane + 1 >= lanes.len() {
            return false;
        }
        self.lane += 1;
        self.target_x = lanes[self.lane];
        true
    }

    /// Slide toward the target lane and count down every timer
    pub fn update(&mut self, lateral_step: f32) {
        self.pos.x = approach(self.pos.x, self.target_x, lateral_step);
        self.anim_phase += PLAYER_ANIM_STEP;

        self.tongue.tick();
        for kind in PowerUpKind::ALL {
            if self.effect_mut(kind).tick() {
                log::debug!("{} wore off", kind.label());
            }
        }
    }

    /// Activate (or refresh) a power-up effect for its full duration
    pub fn activate(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        self.effect_mut(kind).start(kind.duration(tuning));
    }

    pub fn show_tongue(&mut self, ticks: u32) {
        self.tongue.start(ticks);
    }

    pub fn effect(&self, kind: PowerUpKind) -> &EffectTimer {
        match kind {
            PowerUpKind::Invincible => &self.invincible,
            PowerUpKind::Magnet => &self.magnet,
            PowerUpKind::SpeedBoost => &self.speed_boost,
        }
    }

    fn effect_mut(&mut self, kind: PowerUpKind) -> &mut EffectTimer {
        match kind {
            PowerUpKind::Invincible => &mut self.invincible,
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::SpeedBoost => &mut self.speed_boost,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible.is_active()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A number floating down a lane, worth points when grabbed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
    pub kind: CollectibleKind,
    /// Terminal: once set the collectible is never tested again
    pub collected: bool,
    pub rotation: f32,
}

impl Collectible {
    pub const SIZE: Vec2 = Vec2::new(40.0, 50.0);
    pub const SPAWN_Y: f32 = -50.0;

    pub fn new(id: u32, lane: usize, x: f32, kind: CollectibleKind) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(x, Self::SPAWN_Y),
            kind,
            collected: false,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, speed: f32) {
        self.pos.y += speed;
        self.rotation += 0.1;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::SIZE)
    }
}

/// A power-up capsule scrolling down a lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    pub rotation: f32,
    pub pulse: f32,
}

impl PowerUp {
    pub const SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const SPAWN_Y: f32 = -50.0;

    pub fn new(id: u32, lane: usize, x: f32, kind: PowerUpKind) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(x, Self::SPAWN_Y),
            kind,
            collected: false,
            rotation: 0.0,
            pulse: 0.0,
        }
    }

    pub fn update(&mut self, speed: f32) {
        self.pos.y += speed;
        self.rotation += 0.05;
        self.pulse += 0.1;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
    pub variant: ObstacleVariant,
    pub anim_phase: f32,
}

impl Obstacle {
    pub const SIZE: Vec2 = Vec2::new(80.0, 100.0);
    pub const SPAWN_Y: f32 = -100.0;

    pub fn new(id: u32, lane: usize, x: f32, variant: ObstacleVariant, anim_phase: f32) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(x, Self::SPAWN_Y),
            variant,
            anim_phase,
        }
    }

    pub fn update(&mut self, speed: f32) {
        self.pos.y += speed;
        self.anim_phase += 0.1;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::SIZE)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32, // 0xRRGGBB
    pub life: f32,  // 0-1, decreases over time
    pub size: f32,
}

impl Particle {
    /// A spark flying out of `pos` in a random direction
    pub fn spark(rng: &mut impl Rng, pos: Vec2, color: u32) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 8.0,
            (rng.random::<f32>() - 0.5) * 8.0,
        );
        Self {
            pos,
            vel,
            color,
            life: 1.0,
            size: rng.random::<f32>() * 8.0 + 4.0,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = (self.life - PARTICLE_DECAY).max(0.0);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Celebration text rising and fading after a score milestone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingMessage {
    pub pos: Vec2,
    pub text: String,
    pub timer: EffectTimer,
}

impl FloatingMessage {
    pub const MILESTONE_TEXT: &'static str = "YOU GO TWIN!";

    pub fn new(pos: Vec2, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
            timer: EffectTimer::started(MESSAGE_TICKS),
        }
    }

    pub fn milestone() -> Self {
        Self::new(
            Vec2::new(PLAYFIELD_WIDTH / 2.0, MESSAGE_Y),
            Self::MILESTONE_TEXT,
        )
    }

    pub fn update(&mut self) {
        self.pos.y -= MESSAGE_RISE;
        self.timer.tick();
    }

    pub fn opacity(&self) -> f32 {
        self.timer.fraction_of(MESSAGE_TICKS)
    }

    pub fn is_alive(&self) -> bool {
        self.timer.is_active()
    }
}

/// Road marker scrolling behind the lanes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadLine {
    pub y: f32,
}

impl RoadLine {
    pub fn initial_set() -> Vec<RoadLine> {
        (0..ROAD_LINE_COUNT)
            .map(|i| RoadLine {
                y: i as f32 * ROAD_LINE_SPACING + ROAD_LINE_RESET_Y,
            })
            .collect()
    }

    pub fn update(&mut self, speed: f32, playfield_height: f32) {
        self.y += speed;
        if self.y > playfield_height {
            self.y = ROAD_LINE_RESET_Y;
        }
    }
}
