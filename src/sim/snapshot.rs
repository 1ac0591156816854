//! Read-only view handed to the renderer once per tick

use serde::Serialize;

use super::entities::{
    Collectible, FloatingMessage, Obstacle, Particle, Player, PowerUp, RoadLine,
};
use super::state::{GamePhase, GameState};

/// One drawable entity, tagged by kind
#[derive(Debug, Clone, Copy, Serialize)]
pub enum EntityKind<'a> {
    Obstacle(&'a Obstacle),
    Collectible(&'a Collectible),
    PowerUp(&'a PowerUp),
    Particle(&'a Particle),
    Message(&'a FloatingMessage),
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub paused: bool,
    pub tick: u64,
    pub speed: f32,
    pub player: &'a Player,
    pub road_lines: &'a [RoadLine],
    /// Back-to-front draw order; the player goes between particles and messages
    pub entities: Vec<EntityKind<'a>>,
}

impl<'a> Snapshot<'a> {
    /// Entities drawn beneath the player
    pub fn below_player(&self) -> impl Iterator<Item = &EntityKind<'a>> {
        self.entities
            .iter()
            .filter(|e| !matches!(e, EntityKind::Message(_)))
    }

    /// Entities drawn on top of the player
    pub fn above_player(&self) -> impl Iterator<Item = &EntityKind<'a>> {
        self.entities
            .iter()
            .filter(|e| matches!(e, EntityKind::Message(_)))
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        let entities = self
            .obstacles
            .iter()
            .map(EntityKind::Obstacle)
            .chain(self.collectibles.iter().map(EntityKind::Collectible))
            .chain(self.powerups.iter().map(EntityKind::PowerUp))
            .chain(self.particles.iter().map(EntityKind::Particle))
            .chain(self.messages.iter().map(EntityKind::Message))
            .collect();

        Snapshot {
            phase: self.phase,
            paused: self.is_paused(),
            tick: self.time_ticks,
            speed: self.speed,
            player: &self.player,
            road_lines: &self.road_lines,
            entities,
        }
    }
}
