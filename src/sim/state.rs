//! Game state and the run lifecycle
//!
//! `GameState` owns every entity collection. Hosts drive it through `tick`,
//! read it through `snapshot`, and drain `events` for audio cues.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::entities::{
    Collectible, CollectibleKind, FloatingMessage, Obstacle, Particle, Player, PowerUp,
    PowerUpKind, RoadLine,
};
use super::spawn::{SpawnRequest, SpawnScheduler};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Before the first start; nothing simulates
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Run ended by a crash; waits for an explicit start
    GameOver,
}

/// Notifications for the host (audio cues, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    PauseEntered,
    PauseExited,
    GameOver { score: u64, distance: u64 },
    CollectiblePicked { kind: CollectibleKind, points: u32 },
    PowerUpActivated(PowerUpKind),
    Milestone { score: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    #[serde(skip)]
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Scroll speed (units per tick)
    pub speed: f32,
    pub score: u64,
    pub distance: f32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub spawner: SpawnScheduler,
    pub player: Player,
    pub collectibles: Vec<Collectible>,
    pub powerups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub messages: Vec<FloatingMessage>,
    pub road_lines: Vec<RoadLine>,
    /// Pending host notifications, oldest first
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the reference tuning
    pub fn new(seed: u64) -> Self {
        Self::from_valid_tuning(seed, Tuning::default())
    }

    /// Create an idle game with custom tuning, rejecting values it cannot run with
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_valid_tuning(seed, tuning))
    }

    fn from_valid_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            speed: tuning.base_speed,
            score: 0,
            distance: 0.0,
            time_ticks: 0,
            spawner: SpawnScheduler::new(),
            player: Player::new(&tuning),
            collectibles: Vec::new(),
            powerups: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            messages: Vec::new(),
            road_lines: RoadLine::initial_set(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Wipe the session back to construction-time defaults and go idle.
    /// The RNG stream keeps advancing so consecutive runs differ.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.speed = self.tuning.base_speed;
        self.score = 0;
        self.distance = 0.0;
        self.time_ticks = 0;
        self.spawner = SpawnScheduler::new();
        self.player = Player::new(&self.tuning);
        self.collectibles.clear();
        self.powerups.clear();
        self.obstacles.clear();
        self.particles.clear();
        self.messages.clear();
        self.road_lines = RoadLine::initial_set();
    }

    /// Begin a fresh run. Only valid from `Idle` or `GameOver`.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.reset();
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Started);
                log::info!("Run started (seed {})", self.seed);
                true
            }
            GamePhase::Running | GamePhase::Paused => {
                log::trace!("Start ignored while {:?}", self.phase);
                false
            }
        }
    }

    /// Flip between `Running` and `Paused`. No-op in any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::PauseEntered);
                log::info!("Paused at tick {}", self.time_ticks);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::PauseExited);
                log::info!("Resumed at tick {}", self.time_ticks);
                true
            }
            GamePhase::Idle | GamePhase::GameOver => {
                log::trace!("Pause toggle ignored while {:?}", self.phase);
                false
            }
        }
    }

    /// End the run after a fatal crash
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        let event = GameEvent::GameOver {
            score: self.score,
            distance: self.distance_floor(),
        };
        self.events.push(event);
        log::info!(
            "Game over: score {} distance {}m after {} ticks",
            self.score,
            self.distance_floor(),
            self.time_ticks
        );
    }

    pub fn move_left(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.player.move_left(&self.tuning.lane_positions)
    }

    pub fn move_right(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.player.move_right(&self.tuning.lane_positions)
    }

    pub fn distance_floor(&self) -> u64 {
        self.distance.floor() as u64
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Turn a scheduler decision into a live entity at the top of its lane
    pub fn apply_spawn(&mut self, request: SpawnRequest) {
        let lane = request.lane();
        let Some(&x) = self.tuning.lane_positions.get(lane) else {
            log::warn!("Dropping spawn for unknown lane {lane}");
            return;
        };
        let id = self.next_entity_id();
        match request {
            SpawnRequest::Collectible { kind, .. } => {
                self.collectibles.push(Collectible::new(id, lane, x, kind));
            }
            SpawnRequest::Obstacle {
                variant, anim_phase, ..
            } => {
                self.obstacles
                    .push(Obstacle::new(id, lane, x, variant, anim_phase));
            }
            SpawnRequest::PowerUp { kind, .. } => {
                self.powerups.push(PowerUp::new(id, lane, x, kind));
            }
        }
        log::debug!("Spawned {request:?} as #{id}");
    }
}
