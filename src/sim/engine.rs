//! Frame-driven simulation engine
//!
//! The caller owns an [`Engine`], feeds it input changes and frame deltas
//! through `set_input`/`update`, and reads the result back for rendering.
//! One `update` runs these stages in order:
//!
//! 1. round timer (stops the frame when it expires)
//! 2. background snow
//! 3. player input, physics, bounds and ground
//! 4. enemies
//! 5. projectiles
//! 6. spawner
//! 7. collisions

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision;
use super::entity::{Enemy, Player, Projectile};
use super::profile::CharacterProfile;
use super::state::{Action, GameEvent, RoundPhase, RoundState, SnowParticle};
use crate::tuning::Tuning;

/// Borrowed view of everything a renderer needs
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub score: u64,
    pub time_remaining: f32,
    pub phase: RoundPhase,
    pub player: Option<&'a Player>,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub snow: &'a [SnowParticle],
}

/// Owns one round of the game and advances it frame by frame
pub struct Engine {
    tuning: Tuning,
    profile: CharacterProfile,
    round: RoundState,
    player: Option<Player>,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    snow: Vec<SnowParticle>,
    events: Vec<GameEvent>,
    /// Cosmetic randomness only
    rng: Pcg32,
}

impl Engine {
    /// Engine with default tuning. No player exists until [`Engine::reset`].
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snow = (0..tuning.snow.count)
            .map(|_| SnowParticle::scatter(&mut rng, &tuning.world, &tuning.snow))
            .collect();
        Self {
            round: RoundState::new(&tuning),
            profile: CharacterProfile::default(),
            player: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            snow,
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Choose the character. Applies immediately if a round is in progress.
    pub fn set_character_profile(&mut self, profile: CharacterProfile) {
        self.profile = profile;
        if let Some(player) = self.player.as_mut() {
            player.set_character_profile(&profile);
        }
    }

    /// Start a fresh round
    pub fn reset(&mut self) {
        self.round = RoundState::new(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.events.clear();

        let start = Vec2::new(self.tuning.player.start_x, self.tuning.world.ground_level);
        let mut player = Player::new(start, &self.tuning.player, &self.tuning.projectile);
        player.set_character_profile(&self.profile);
        self.player = Some(player);

        log::info!(
            "Round started: {}s, speed x{}, cooldown x{}",
            self.round.time_remaining,
            self.profile.speed,
            self.profile.throw_cooldown
        );
    }

    pub fn set_input(&mut self, action: Action, active: bool) {
        self.round.input.set(action, active);
    }

    /// String-keyed input for UI glue. Unknown names are ignored.
    pub fn set_input_named(&mut self, action: &str, active: bool) {
        match Action::from_str(action) {
            Some(action) => self.set_input(action, active),
            None => log::debug!("Ignoring unknown input action {:?}", action),
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Events left over from the previous call are discarded.
    pub fn update(&mut self, dt: f32) {
        self.events.clear();
        if self.round.phase == RoundPhase::Ended {
            return;
        }

        if self.round.run_clock(dt) {
            log::info!("Round over, final score {}", self.round.score);
            self.events.push(GameEvent::RoundEnded {
                score: self.round.score,
            });
            return;
        }

        self.update_snow(dt);
        self.update_player(dt);
        self.update_enemies(dt);
        self.update_projectiles(dt);
        self.update_spawning(dt);
        self.check_collisions();
    }

    fn update_snow(&mut self, dt: f32) {
        for flake in &mut self.snow {
            flake.fall(dt, &mut self.rng, &self.tuning.world);
        }
    }

    fn update_player(&mut self, dt: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let input = &mut self.round.input;

        if input.left {
            player.move_left();
        }
        if input.right {
            player.move_right();
        }
        if input.jump {
            player.jump();
        }
        if input.take_throw() {
            if let Some(snowball) = player.throw(self.round.clock) {
                self.events.push(GameEvent::ProjectileThrown {
                    x: snowball.pos.x,
                    y: snowball.pos.y,
                });
                self.projectiles.push(snowball);
            }
        }

        player.advance(dt);
        player.clamp_to(&self.tuning.world);
        player.settle(self.tuning.world.ground_level);
    }

    fn update_enemies(&mut self, dt: f32) {
        let ground = self.tuning.world.ground_level;
        for enemy in &mut self.enemies {
            enemy.advance(dt);
            enemy.settle(ground);
        }
        self.enemies.retain(|e| !e.is_off_screen());
    }

    fn update_projectiles(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.advance(dt);
        }
        let world = &self.tuning.world;
        self.projectiles.retain(|p| !p.is_spent(world));
    }

    fn update_spawning(&mut self, dt: f32) {
        let time_remaining = self.round.time_remaining as f32;
        if let Some(enemy) = self
            .round
            .spawner
            .tick(dt, time_remaining, &self.tuning)
        {
            log::debug!("Enemy spawned ({} on field)", self.enemies.len() + 1);
            self.events.push(GameEvent::EnemySpawned { x: enemy.pos.x });
            self.enemies.push(enemy);
        }
    }

    fn check_collisions(&mut self) {
        let result = collision::resolve(
            self.player.as_ref(),
            &mut self.projectiles,
            &mut self.enemies,
        );

        if result.hits > 0 {
            let points = self.tuning.hit_score;
            self.round.score += points * u64::from(result.hits);
            log::debug!("{} hit(s), score {}", result.hits, self.round.score);
            for _ in 0..result.hits {
                self.events.push(GameEvent::EnemyHit { points });
            }
        }
        for _ in 0..result.player_contacts {
            self.events.push(GameEvent::PlayerContact);
        }
    }

    /// Take the events produced by the most recent `update`
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> u64 {
        self.round.score
    }

    pub fn time_remaining(&self) -> f32 {
        self.round.time_remaining as f32
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    /// Simulated seconds since the last reset
    pub fn clock(&self) -> f64 {
        self.round.clock
    }

    pub fn spawn_interval(&self) -> f32 {
        self.round.spawner.interval
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn snow(&self) -> &[SnowParticle] {
        &self.snow
    }

    pub fn profile(&self) -> &CharacterProfile {
        &self.profile
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            score: self.round.score,
            time_remaining: self.round.time_remaining as f32,
            phase: self.round.phase,
            player: self.player.as_ref(),
            enemies: &self.enemies,
            projectiles: &self.projectiles,
            snow: &self.snow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn started() -> Engine {
        let mut engine = Engine::new(12345);
        engine.reset();
        engine
    }

    fn enemy_at(x: f32) -> Enemy {
        Enemy::new(Vec2::new(x, GROUND_LEVEL), &Tuning::default().enemy)
    }

    #[test]
    fn test_no_player_before_reset() {
        let mut engine = Engine::new(1);
        assert!(engine.player().is_none());
        assert_eq!(engine.snow().len(), SNOW_PARTICLES);
        engine.update(FRAME_DT);
        assert!(engine.player().is_none());
        assert!(engine.time_remaining() < ROUND_SECONDS);
    }

    #[test]
    fn test_reset_state() {
        let mut engine = started();
        engine.set_input(Action::Right, true);
        for _ in 0..200 {
            engine.update(FRAME_DT);
        }
        engine.reset();

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.time_remaining(), ROUND_SECONDS);
        assert_eq!(engine.phase(), RoundPhase::Running);
        assert_eq!(engine.clock(), 0.0);
        assert!(engine.enemies().is_empty());
        assert!(engine.projectiles().is_empty());
        assert_eq!(engine.spawn_interval(), SPAWN_BASE_INTERVAL);
        let player = engine.player().unwrap();
        assert_eq!(player.pos, Vec2::new(PLAYER_START_X, GROUND_LEVEL));
        assert!(player.grounded);
    }

    #[test]
    fn test_idle_player_stays_grounded() {
        let mut engine = started();
        for _ in 0..120 {
            engine.update(FRAME_DT);
            let player = engine.player().unwrap();
            assert_eq!(player.pos.y, GROUND_LEVEL);
            assert!(player.grounded);
            assert_eq!(player.vel.y, 0.0);
        }
    }

    #[test]
    fn test_profile_before_and_after_reset() {
        let mut engine = Engine::new(3);
        engine.set_character_profile(CharacterProfile {
            speed: 1.5,
            ..Default::default()
        });
        engine.reset();
        assert_eq!(engine.player().unwrap().speed, PLAYER_SPEED * 1.5);

        engine.set_character_profile(CharacterProfile::default());
        assert_eq!(engine.player().unwrap().speed, PLAYER_SPEED);
        engine.reset();
        assert_eq!(engine.player().unwrap().speed, PLAYER_SPEED);
    }

    #[test]
    fn test_moving_right() {
        let mut engine = started();
        engine.set_input(Action::Right, true);
        for _ in 0..10 {
            engine.update(FRAME_DT);
        }
        let x = engine.player().unwrap().pos.x;
        assert!((x - (PLAYER_START_X + 10.0 * PLAYER_SPEED * FRAME_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_player_clamped_at_left_edge() {
        let mut engine = started();
        engine.set_input(Action::Left, true);
        for _ in 0..120 {
            engine.update(FRAME_DT);
        }
        assert_eq!(engine.player().unwrap().pos.x, BOUND_MARGIN);
    }

    #[test]
    fn test_jump_and_land() {
        let mut engine = started();
        engine.set_input(Action::Jump, true);
        engine.update(FRAME_DT);
        engine.set_input(Action::Jump, false);
        let player = engine.player().unwrap();
        assert!(!player.grounded);
        assert!(player.pos.y > GROUND_LEVEL);

        // Airtime is about 2 * 400 / 800 = 1s
        for _ in 0..90 {
            engine.update(FRAME_DT);
        }
        let player = engine.player().unwrap();
        assert!(player.grounded);
        assert_eq!(player.pos.y, GROUND_LEVEL);
    }

    #[test]
    fn test_throw_is_edge_triggered() {
        let mut engine = started();
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        assert_eq!(engine.projectiles().len(), 1);
        assert!(matches!(
            engine.drain_events().as_slice(),
            [GameEvent::ProjectileThrown { .. }]
        ));

        // Flag was consumed: no second snowball even after the cooldown
        let mut thrown = 0;
        for _ in 0..90 {
            engine.update(FRAME_DT);
            thrown += engine
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ProjectileThrown { .. }))
                .count();
        }
        assert_eq!(thrown, 0);
        assert!(engine.projectiles().is_empty());
    }

    #[test]
    fn test_throw_during_cooldown_is_consumed() {
        let mut engine = started();
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        assert_eq!(engine.projectiles().len(), 1);

        // The rejected request does not linger until the cooldown passes
        for _ in 0..90 {
            engine.update(FRAME_DT);
        }
        assert!(engine.projectiles().is_empty());
    }

    #[test]
    fn test_throw_exactly_at_cooldown() {
        let mut engine = started();
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        for _ in 0..58 {
            engine.update(FRAME_DT);
        }

        // 59 frames after the first throw: still cooling down
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        assert!(engine.drain_events().is_empty());

        // 60 frames = 1.0s: allowed
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        assert!(matches!(
            engine.drain_events().as_slice(),
            [GameEvent::ProjectileThrown { .. }]
        ));
        assert_eq!(engine.player().unwrap().last_throw, Some(engine.clock()));
    }

    #[test]
    fn test_unknown_named_input_ignored() {
        let mut engine = started();
        engine.set_input_named("moonwalk", true);
        engine.set_input_named("right", true);
        engine.update(FRAME_DT);
        assert!(engine.player().unwrap().pos.x > PLAYER_START_X);
    }

    #[test]
    fn test_hit_scores_and_removes() {
        let mut engine = started();
        let ball = Projectile::new(
            Vec2::new(400.0, 130.0),
            Vec2::ZERO,
            &engine.tuning.projectile,
        );
        engine.projectiles.push(ball);
        engine.enemies.push(enemy_at(400.0));
        engine.enemies.push(enemy_at(700.0));

        engine.update(FRAME_DT);
        assert_eq!(engine.score(), HIT_SCORE);
        assert!(engine.projectiles().is_empty());
        assert_eq!(engine.enemies().len(), 1);
        assert!(engine.drain_events().contains(&GameEvent::EnemyHit { points: HIT_SCORE }));

        engine.update(FRAME_DT);
        assert_eq!(engine.score(), HIT_SCORE);
    }

    #[test]
    fn test_two_snowballs_on_one_enemy_both_score() {
        let mut engine = started();
        for x in [400.0, 402.0] {
            let ball = Projectile::new(Vec2::new(x, 130.0), Vec2::ZERO, &engine.tuning.projectile);
            engine.projectiles.push(ball);
        }
        engine.enemies.push(enemy_at(400.0));

        engine.update(FRAME_DT);
        assert_eq!(engine.score(), 2 * HIT_SCORE);
        assert!(engine.projectiles().is_empty());
        assert!(engine.enemies().is_empty());
        let hits = engine
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyHit { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_round_ends_on_frame_3600() {
        let mut engine = started();
        for frame in 1..3600 {
            engine.update(FRAME_DT);
            assert_eq!(engine.phase(), RoundPhase::Running, "ended early at {frame}");
        }
        engine.update(FRAME_DT);
        assert_eq!(engine.phase(), RoundPhase::Ended);
        assert_eq!(engine.time_remaining(), 0.0);
        assert!(
            engine
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::RoundEnded { .. }))
        );
    }

    #[test]
    fn test_offscreen_enemy_dropped() {
        let mut engine = started();
        let mut gone = enemy_at(0.0);
        gone.pos.x = -ENEMY_WIDTH - 1.0;
        engine.enemies.push(gone);
        engine.enemies.push(enemy_at(500.0));
        engine.update(FRAME_DT);
        assert_eq!(engine.enemies().len(), 1);
        assert!(engine.enemies()[0].pos.x > 400.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut engine = started();
        // 2s at 60 Hz plus slack for float accumulation
        for _ in 0..125 {
            engine.update(FRAME_DT);
        }
        assert_eq!(engine.enemies().len(), 1);
        let enemy = &engine.enemies()[0];
        assert!(enemy.pos.x < WORLD_WIDTH + ENEMY_SPAWN_OFFSET);
        assert_eq!(enemy.pos.y, GROUND_LEVEL);
    }

    #[test]
    fn test_round_ends_and_freezes() {
        let mut engine = started();
        engine.enemies.push(enemy_at(600.0));
        engine.update(ROUND_SECONDS);
        assert_eq!(engine.time_remaining(), 0.0);
        assert_eq!(engine.phase(), RoundPhase::Ended);
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::RoundEnded { score: 0 }]
        );

        let x = engine.enemies()[0].pos.x;
        engine.set_input(Action::Throw, true);
        engine.update(FRAME_DT);
        engine.update(1.0);
        engine.update(-1.0);
        assert_eq!(engine.time_remaining(), 0.0);
        assert_eq!(engine.enemies()[0].pos.x, x);
        assert!(engine.projectiles().is_empty());
        assert!(engine.drain_events().is_empty());

        engine.reset();
        assert_eq!(engine.phase(), RoundPhase::Running);
    }

    #[test]
    fn test_player_contact_has_no_effect() {
        let mut engine = started();
        engine.enemies.push(enemy_at(PLAYER_START_X + 10.0));
        engine.update(FRAME_DT);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.enemies().len(), 1);
        assert!(engine.drain_events().contains(&GameEvent::PlayerContact));
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine = started();
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"phase\":\"Running\""));
    }

    #[test]
    fn test_determinism() {
        let mut a = Engine::new(99);
        let mut b = Engine::new(99);
        a.reset();
        b.reset();
        for i in 0..600 {
            let throw = i % 45 == 0;
            for engine in [&mut a, &mut b] {
                engine.set_input(Action::Right, i % 120 < 60);
                engine.set_input(Action::Throw, throw);
                engine.update(FRAME_DT);
            }
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.enemies().len(), b.enemies().len());
        assert_eq!(a.player().unwrap().pos, b.player().unwrap().pos);
        assert_eq!(a.snow()[0].pos, b.snow()[0].pos);
    }
}
