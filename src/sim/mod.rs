//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entities;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, check_collision};
pub use entities::{
    Collectible, CollectibleKind, FloatingMessage, Obstacle, ObstacleVariant, Particle, Player,
    PowerUp, PowerUpKind, RoadLine,
};
pub use snapshot::{EntityKind, Snapshot};
pub use spawn::{SpawnRequest, SpawnScheduler};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, magnet_pull, step, tick};
pub use timer::EffectTimer;
