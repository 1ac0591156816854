//! Fixed timestep simulation tick
//!
//! One call to `step` advances a running game by exactly one frame, in a fixed
//! order: player, spawns, collectibles, power-ups, obstacles, particles,
//! messages, road, speed ramp, distance. A crash ends the tick on the spot.

use glam::Vec2;

use super::collision::check_collision;
use super::entities::{CollectibleKind, FloatingMessage, Particle, PowerUpKind};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Orange spark color for collectible pickups
const PICKUP_COLOR: u32 = 0xff6600;

/// Input edges for a single tick (each applied at most once)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start a new run (from idle or after game over)
    pub start: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Pause/resume
    pub toggle_pause: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply this tick's input edges, then advance the simulation if running
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start {
        state.start();
    }
    if input.toggle_pause {
        state.toggle_pause();
    }
    if input.move_left {
        state.move_left();
    }
    if input.move_right {
        state.move_right();
    }
    step(state);
}

/// Advance the game state by one fixed timestep. No-op unless `Running`.
pub fn step(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    state.player.update(state.tuning.lateral_step);

    let mut spawns = Vec::new();
    state
        .spawner
        .tick(&mut state.rng, &state.tuning, &mut spawns);
    for request in spawns {
        state.apply_spawn(request);
    }

    update_collectibles(state);
    update_powerups(state);
    if update_obstacles(state) {
        state.end_run();
        return;
    }

    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.is_alive());

    for message in state.messages.iter_mut() {
        message.update();
    }
    state.messages.retain(|m| m.is_alive());

    let speed = state.speed;
    let height = state.tuning.playfield_height;
    for line in state.road_lines.iter_mut() {
        line.update(speed, height);
    }

    state.speed = (state.speed + state.tuning.speed_increment).min(state.tuning.max_speed);
    state.distance += state.speed * state.tuning.distance_factor;
}

/// Pull `pos` a fixed fraction of the way toward `target` when within `radius`
pub fn magnet_pull(pos: Vec2, target: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = target - pos;
    if delta.length() < radius {
        pos + delta * strength
    } else {
        pos
    }
}

/// Which hundred-point bucket a score falls in
#[inline]
pub fn milestone_bucket(score: u64, step: u32) -> u64 {
    score / u64::from(step.max(1))
}

fn update_collectibles(state: &mut GameState) {
    let speed = state.speed;
    let height = state.tuning.playfield_height;
    let player_box = state.player.bounds();
    let player_pos = state.player.pos;
    let magnet = state.player.magnet.is_active();
    let (radius, strength) = (state.tuning.magnet_radius, state.tuning.magnet_pull);

    let mut picked: Vec<(Vec2, CollectibleKind)> = Vec::new();
    for collectible in state.collectibles.iter_mut().filter(|c| !c.collected) {
        collectible.update(speed);
        if magnet {
            collectible.pos = magnet_pull(collectible.pos, player_pos, radius, strength);
        }
        if check_collision(&player_box, &collectible.bounds()) {
            collectible.collected = true;
            picked.push((collectible.pos, collectible.kind));
        }
    }

    let step = state.tuning.milestone_step;
    for (pos, kind) in picked {
        let score_before = state.score;
        let points = kind.points(&state.tuning);
        state.score += u64::from(points);
        state.player.show_tongue(state.tuning.tongue_ticks);
        emit_burst(state, pos, PICKUP_COLOR, COLLECTIBLE_BURST);
        state
            .events
            .push(GameEvent::CollectiblePicked { kind, points });
        log::debug!("Picked {} for {points} (score {})", kind.label(), state.score);

        // At most one message per pickup, however many buckets it spans
        if milestone_bucket(state.score, step) > milestone_bucket(score_before, step) {
            state.messages.push(FloatingMessage::milestone());
            state.events.push(GameEvent::Milestone { score: state.score });
        }
    }

    state
        .collectibles
        .retain(|c| !c.collected && c.pos.y <= height);
}

fn update_powerups(state: &mut GameState) {
    let speed = state.speed;
    let height = state.tuning.playfield_height;
    let player_box = state.player.bounds();

    let mut picked: Vec<(Vec2, PowerUpKind)> = Vec::new();
    for powerup in state.powerups.iter_mut().filter(|p| !p.collected) {
        powerup.update(speed);
        if check_collision(&player_box, &powerup.bounds()) {
            powerup.collected = true;
            picked.push((powerup.pos, powerup.kind));
        }
    }

    for (pos, kind) in picked {
        state.player.activate(kind, &state.tuning);
        emit_burst(state, pos, kind.color(), POWERUP_BURST);
        state.events.push(GameEvent::PowerUpActivated(kind));
        log::debug!("{} activated", kind.label());
    }

    state.powerups.retain(|p| !p.collected && p.pos.y <= height);
}

/// Move obstacles, newest first. Returns true if the player crashed into one;
/// older obstacles are then left unmoved for this tick.
fn update_obstacles(state: &mut GameState) -> bool {
    let speed = state.speed;
    let height = state.tuning.playfield_height;
    let player_box = state.player.bounds();
    let invincible = state.player.is_invincible();

    for obstacle in state.obstacles.iter_mut().rev() {
        obstacle.update(speed);
        if !invincible && check_collision(&player_box, &obstacle.bounds()) {
            log::debug!("Crashed into obstacle #{} ({:?})", obstacle.id, obstacle.variant);
            return true;
        }
    }

    state.obstacles.retain(|o| o.pos.y <= height);
    false
}

fn emit_burst(state: &mut GameState, pos: Vec2, color: u32, count: usize) {
    let room = MAX_PARTICLES.saturating_sub(state.particles.len());
    for _ in 0..count.min(room) {
        let particle = Particle::spark(&mut state.rng, pos, color);
        state.particles.push(particle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Collectible, Obstacle, ObstacleVariant, PowerUp};
    use crate::sim::state::GamePhase;

    /// A running game with both spawn cooldowns far from firing
    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.start();
        state.drain_events();
        state
    }

    fn place_collectible(state: &mut GameState, pos: Vec2, kind: CollectibleKind) -> u32 {
        let id = state.next_entity_id();
        let mut collectible = Collectible::new(id, 1, pos.x, kind);
        collectible.pos = pos;
        state.collectibles.push(collectible);
        id
    }

    fn place_obstacle(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, 1, pos.x, ObstacleVariant::Grimace, 0.0);
        obstacle.pos = pos;
        state.obstacles.push(obstacle);
        id
    }

    #[test]
    fn test_step_noop_unless_running() {
        let mut state = GameState::new(1);
        step(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.speed, BASE_SPEED);

        state.start();
        state.toggle_pause();
        step(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_pickup_scoring_crosses_hundred() {
        let mut state = running_state();
        state.score = 40;
        // Directly on the player after this tick's scroll
        let y = state.player.pos.y - state.speed;
        let id = place_collectible(&mut state, Vec2::new(400.0, y), CollectibleKind::Six);

        step(&mut state);

        assert_eq!(state.score, 100);
        assert_eq!(state.messages.len(), 1);
        assert!(state.collectibles.iter().all(|c| c.id != id));
        assert_eq!(state.particles.len(), COLLECTIBLE_BURST);
        assert!(state.player.tongue.is_active());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::CollectiblePicked {
            kind: CollectibleKind::Six,
            points: 60
        }));
        assert!(events.contains(&GameEvent::Milestone { score: 100 }));
    }

    #[test]
    fn test_pickup_without_crossing_has_no_message() {
        let mut state = running_state();
        state.score = 100;
        let y = state.player.pos.y - state.speed;
        place_collectible(&mut state, Vec2::new(400.0, y), CollectibleKind::Six);

        step(&mut state);

        assert_eq!(state.score, 160);
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_two_crossing_pickups_in_one_tick_fire_two_messages() {
        let mut state = running_state();
        state.score = 95;
        let y = state.player.pos.y - state.speed;
        place_collectible(&mut state, Vec2::new(400.0, y), CollectibleKind::Seven);
        place_collectible(&mut state, Vec2::new(410.0, y), CollectibleKind::Seven);

        step(&mut state);

        // 95 -> 165 crosses 100, then 165 -> 235 crosses 200
        assert_eq!(state.score, 235);
        assert_eq!(state.messages.len(), 2);
        let milestones: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Milestone { .. }))
            .collect();
        assert_eq!(
            milestones,
            vec![
                GameEvent::Milestone { score: 165 },
                GameEvent::Milestone { score: 235 }
            ]
        );
    }

    #[test]
    fn test_second_pickup_without_crossing_adds_no_message() {
        let mut state = running_state();
        state.score = 40;
        let y = state.player.pos.y - state.speed;
        place_collectible(&mut state, Vec2::new(400.0, y), CollectibleKind::Six);
        place_collectible(&mut state, Vec2::new(410.0, y), CollectibleKind::Six);

        step(&mut state);

        // 40 -> 100 crosses, 100 -> 160 stays in the same bucket
        assert_eq!(state.score, 160);
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_single_pickup_from_95_to_165() {
        let mut state = running_state();
        state.score = 95;
        let y = state.player.pos.y - state.speed;
        place_collectible(&mut state, Vec2::new(400.0, y), CollectibleKind::Seven);

        step(&mut state);

        assert_eq!(state.score, 165);
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_collected_items_are_never_tested_again() {
        let mut state = running_state();
        let y = state.player.pos.y - state.speed;
        place_collectible(&mut state, Vec2::new(400.0, y), CollectibleKind::Six);
        state.collectibles[0].collected = true;

        step(&mut state);

        assert_eq!(state.score, 0);
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_fatal_collision_stops_tick() {
        let mut state = running_state();
        let y = state.player.pos.y - state.speed;
        place_obstacle(&mut state, Vec2::new(400.0, y));
        state.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, 1.0),
            color: 0,
            life: 0.5,
            size: 4.0,
        });
        let speed_before = state.speed;
        let road_before = state.road_lines.clone();

        step(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.speed, speed_before);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.road_lines, road_before);
        assert_eq!(state.particles[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.particles[0].life, 0.5);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                score: 0,
                distance: 0
            }]
        );

        // Game over freezes the simulation
        let ticks = state.time_ticks;
        step(&mut state);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_crash_leaves_older_obstacles_unmoved() {
        let mut state = running_state();
        let older = place_obstacle(&mut state, Vec2::new(200.0, 100.0));
        let y = state.player.pos.y - state.speed;
        let fatal = place_obstacle(&mut state, Vec2::new(400.0, y));
        let newer = place_obstacle(&mut state, Vec2::new(600.0, 100.0));
        let speed = state.speed;

        step(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        let y_of = |id: u32| state.obstacles.iter().find(|o| o.id == id).map(|o| o.pos.y);
        assert_eq!(y_of(newer), Some(100.0 + speed));
        assert_eq!(y_of(fatal), Some(y + speed));
        assert_eq!(y_of(older), Some(100.0));
    }

    #[test]
    fn test_invincible_passes_through_obstacle() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        state.player.activate(PowerUpKind::Invincible, &tuning);
        let y = state.player.pos.y - state.speed;
        let id = place_obstacle(&mut state, Vec2::new(400.0, y));

        step(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.iter().any(|o| o.id == id));

        // It stays until it scrolls off the bottom
        let mut ticks = 0;
        while state.obstacles.iter().any(|o| o.id == id) {
            let o = state.obstacles.iter().find(|o| o.id == id).unwrap();
            assert!(o.pos.y <= PLAYFIELD_HEIGHT);
            step(&mut state);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_touching_obstacle_is_not_fatal() {
        let mut state = running_state();
        // Player box ends at x = 440, obstacle box starts at x = 440
        let y = state.player.pos.y - state.speed;
        place_obstacle(&mut state, Vec2::new(480.0, y));

        step(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_powerup_pickup_activates_effect() {
        let mut state = running_state();
        let y = state.player.pos.y - state.speed;
        let id = state.next_entity_id();
        let mut powerup = PowerUp::new(id, 1, 400.0, PowerUpKind::Magnet);
        powerup.pos.y = y;
        state.powerups.push(powerup);

        step(&mut state);

        assert!(state.powerups.is_empty());
        assert!(state.player.magnet.is_active());
        assert_eq!(state.player.magnet.remaining(), MAGNET_TICKS);
        assert_eq!(state.particles.len(), POWERUP_BURST);
        assert!(state.particles.iter().all(|p| p.color == 0xff00ff));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpActivated(PowerUpKind::Magnet))
        );
    }

    #[test]
    fn test_magnet_pull_is_ten_percent() {
        let player = Vec2::new(400.0, 400.0);
        let item = Vec2::new(400.0 - 90.0, 400.0 - 120.0); // 150 away
        let gap = (player - item).length();
        assert!((gap - 150.0).abs() < 1e-4);

        let pulled = magnet_pull(item, player, MAGNET_RADIUS, MAGNET_PULL);
        let new_gap = (player - pulled).length();
        assert!((gap - new_gap - 15.0).abs() < 1e-3);
        assert!(new_gap > 1.0);

        let far = Vec2::new(400.0, 100.0);
        assert_eq!(magnet_pull(far, player, MAGNET_RADIUS, MAGNET_PULL), far);
    }

    #[test]
    fn test_magnet_in_step_applies_after_scroll() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        state.player.activate(PowerUpKind::Magnet, &tuning);
        // Inside the magnet radius but clear of the player box
        place_collectible(&mut state, Vec2::new(520.0, 330.0), CollectibleKind::Six);
        let speed = state.speed;

        step(&mut state);

        let scrolled = Vec2::new(520.0, 330.0 + speed);
        let expected = scrolled + (state.player.pos - scrolled) * MAGNET_PULL;
        let c = &state.collectibles[0];
        assert!((c.pos - expected).length() < 1e-3);
        // Not snapped onto the player
        assert!((c.pos - state.player.pos).length() > 100.0);
    }

    #[test]
    fn test_offscreen_entities_are_pruned() {
        let mut state = running_state();
        place_collectible(&mut state, Vec2::new(200.0, PLAYFIELD_HEIGHT - 1.0), CollectibleKind::Six);
        place_obstacle(&mut state, Vec2::new(200.0, PLAYFIELD_HEIGHT - 1.0));

        step(&mut state);

        assert!(state.collectibles.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_speed_ramp_and_distance() {
        let mut state = running_state();
        step(&mut state);
        assert!((state.speed - (BASE_SPEED + SPEED_INCREMENT)).abs() < 1e-6);
        assert!((state.distance - state.speed * DISTANCE_FACTOR).abs() < 1e-6);

        state.speed = MAX_SPEED - 0.0005;
        step(&mut state);
        assert_eq!(state.speed, MAX_SPEED);
        step(&mut state);
        assert_eq!(state.speed, MAX_SPEED);
    }

    #[test]
    fn test_tick_applies_input_edges() {
        let mut state = GameState::new(9);
        tick(&mut state, &TickInput { move_left: true, ..Default::default() });
        assert_eq!(state.player.lane, 1);

        tick(&mut state, &TickInput { start: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, 1);

        tick(&mut state, &TickInput { move_left: true, ..Default::default() });
        assert_eq!(state.player.lane, 0);
        tick(&mut state, &TickInput { move_left: true, ..Default::default() });
        assert_eq!(state.player.lane, 0);

        tick(&mut state, &TickInput { toggle_pause: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.time_ticks;
        tick(&mut state, &TickInput { move_right: true, ..Default::default() });
        assert_eq!(state.player.lane, 0);
        assert_eq!(state.time_ticks, frozen);

        tick(&mut state, &TickInput { toggle_pause: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, frozen + 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let start = TickInput { start: true, ..Default::default() };
        tick(&mut state1, &start);
        tick(&mut state2, &start);

        for i in 0..3000 {
            let input = TickInput {
                move_left: i % 97 == 0,
                move_right: i % 131 == 0,
                ..Default::default()
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.collectibles.len(), state2.collectibles.len());
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert!((state1.player.pos.x - state2.player.pos.x).abs() < 0.0001);
    }
}
