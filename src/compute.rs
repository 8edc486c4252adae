/// The arena: owner of every entity population and the per-tick driver.
///
/// A tick runs in a fixed order: commands, asteroid top-up, UFO spawn, UFO
/// fire, shield bookkeeping, physics, collisions, terminal check.  The order
/// decides which collisions can happen within the same tick, so the phases
/// below must not be reshuffled.  All randomness comes through the injected
/// RNG so callers control determinism (tests use a seeded `StdRng`).

use rand::Rng;
use tracing::{debug, trace};

use crate::command::{AudioCue, Command, Outcome, TickReport};
use crate::entities::{
    Asteroid, Body, Owner, Powerup, PowerupKind, Projectile, Shield, Ship, Ufo,
};
use crate::field::Field;
use crate::score::ScoreKeeper;

// ── Rules ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_TICK_RATE: u32 = 30;
pub const MIN_ASTEROIDS: usize = 5;
/// UFOs only show up once the player has proven themselves.
pub const UFO_SCORE_THRESHOLD: u32 = 250;
/// The UFO may spawn during every tenth second of play.
pub const UFO_SPAWN_PERIOD_SECS: u64 = 10;
/// Ticks between UFO fire decisions (500 ms at 30 Hz).
pub const UFO_FIRE_INTERVAL: u64 = 15;
/// Shield can only be raised with strictly more than this much charge.
pub const SHIELD_ACTIVATION_THRESHOLD: f32 = 50.0;

pub const POINTS_PER_ASTEROID_SIZE: u32 = 10;
pub const POINTS_UFO: u32 = 50;
pub const POINTS_BONUS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    Quit,
}

// ── Arena ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Arena {
    pub field: Field,
    pub tick_rate: u32,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    /// At most one UFO is ever alive.
    pub ufo: Option<Ufo>,
    /// Friendly and hostile shots together; `owner` tells them apart.
    pub projectiles: Vec<Projectile>,
    pub shield: Option<Shield>,
    pub powerups: Vec<Powerup>,
    pub score: ScoreKeeper,
    pub status: GameStatus,
    /// Ticks simulated so far.  Paused ticks do not count.
    pub frame: u64,
    thrust_held: bool,
    engine_running: bool,
    cues: Vec<AudioCue>,
}

impl Arena {
    pub fn new(tick_rate: u32) -> Self {
        Self::with_field(Field::default(), tick_rate)
    }

    pub fn with_field(field: Field, tick_rate: u32) -> Self {
        Arena {
            field,
            tick_rate: tick_rate.max(1),
            ship: Ship::new(&field),
            asteroids: Vec::new(),
            ufo: None,
            projectiles: Vec::new(),
            shield: None,
            powerups: Vec::new(),
            score: ScoreKeeper::new(),
            status: GameStatus::Playing,
            frame: 0,
            thrust_held: false,
            engine_running: false,
            cues: Vec::new(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.status {
            GameStatus::Playing => Outcome::Running,
            GameStatus::Paused => Outcome::Paused,
            GameStatus::GameOver => Outcome::GameOver {
                final_score: self.score.score,
            },
            GameStatus::Quit => Outcome::Quit {
                final_score: self.score.score,
            },
        }
    }

    pub fn friendly_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.owner.is_friendly())
    }

    pub fn hostile_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| !p.owner.is_friendly())
    }

    /// Advance the simulation by one tick.
    ///
    /// Once the session has ended every further call is a no-op that
    /// repeats the final outcome.
    pub fn step(&mut self, commands: &[Command], rng: &mut impl Rng) -> TickReport {
        self.cues.clear();

        match self.status {
            GameStatus::GameOver | GameStatus::Quit => return self.report(),
            GameStatus::Paused => {
                self.poll_paused(commands);
                return self.report();
            }
            GameStatus::Playing => {}
        }

        // ── 1. Input ─────────────────────────────────────────────────────────
        self.apply_commands(commands);
        if self.status != GameStatus::Playing {
            return self.report();
        }

        self.frame += 1;
        trace!(frame = self.frame, "tick");

        // ── 2. Asteroid top-up ───────────────────────────────────────────────
        self.top_up_asteroids(rng);

        // ── 3. UFO spawn ─────────────────────────────────────────────────────
        self.maybe_spawn_ufo(rng);

        // ── 4. UFO fire decision ─────────────────────────────────────────────
        self.ufo_fire();

        // ── 5. Shield energy ─────────────────────────────────────────────────
        self.update_shield_energy();

        // ── 6. Physics ───────────────────────────────────────────────────────
        self.advance_physics();

        // ── 7. Collisions ────────────────────────────────────────────────────
        self.resolve_collisions(rng);

        // ── 8. Terminal check ────────────────────────────────────────────────
        if self.score.is_out_of_lives() {
            debug!(score = self.score.score, frame = self.frame, "game over");
            self.status = GameStatus::GameOver;
            self.finish();
        }

        self.report()
    }

    fn report(&mut self) -> TickReport {
        TickReport {
            outcome: self.outcome(),
            cues: std::mem::take(&mut self.cues),
        }
    }

    /// Raise a cue.  Laser, explosion and pickup sounds cut the engine loop;
    /// it restarts on the next tick thrust is still held.
    fn cue(&mut self, cue: AudioCue) {
        if self.engine_running
            && matches!(cue, AudioCue::Explosion | AudioCue::Laser | AudioCue::Powerup)
        {
            self.engine_running = false;
            self.cues.push(AudioCue::EngineStop);
        }
        self.cues.push(cue);
    }

    fn finish(&mut self) {
        if self.engine_running {
            self.engine_running = false;
            self.cues.push(AudioCue::EngineStop);
        }
        self.cues.push(AudioCue::MusicFade);
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// While paused only unpause and quit are honoured; nothing else moves.
    fn poll_paused(&mut self, commands: &[Command]) {
        for command in commands {
            match command {
                Command::PauseToggle => {
                    debug!(frame = self.frame, "resumed");
                    self.status = GameStatus::Playing;
                    return;
                }
                Command::Quit => {
                    self.status = GameStatus::Quit;
                    self.finish();
                    return;
                }
                _ => {}
            }
        }
    }

    fn apply_commands(&mut self, commands: &[Command]) {
        for command in commands {
            match *command {
                Command::Quit => {
                    debug!(score = self.score.score, "quit");
                    self.status = GameStatus::Quit;
                    self.finish();
                    return;
                }
                Command::PauseToggle => {
                    debug!(frame = self.frame, "paused");
                    self.status = GameStatus::Paused;
                    if self.engine_running {
                        self.engine_running = false;
                        self.cues.push(AudioCue::EngineStop);
                    }
                    return;
                }
                Command::RotateLeft if self.ship.alive => self.ship.rotate_left(),
                Command::RotateRight if self.ship.alive => self.ship.rotate_right(),
                Command::Thrust(held) => self.thrust_held = held,
                Command::Fire if self.ship.alive => self.fire(),
                Command::ToggleShield if self.ship.alive => self.toggle_shield(),
                _ => {}
            }
        }

        if self.thrust_held && self.ship.alive {
            self.ship.thrust();
            if !self.engine_running {
                self.engine_running = true;
                self.cues.push(AudioCue::EngineStart);
            }
        } else if self.engine_running {
            self.engine_running = false;
            self.cues.push(AudioCue::EngineStop);
        }
    }

    fn fire(&mut self) {
        self.projectiles.push(Projectile::new(
            self.ship.angle,
            self.ship.x,
            self.ship.y,
            Owner::Player,
        ));
        self.cue(AudioCue::Laser);
    }

    fn toggle_shield(&mut self) {
        if self.shield.take().is_some() {
            debug!(charge = self.score.shield_charge, "shield lowered");
            return;
        }
        if self.score.shield_charge > SHIELD_ACTIVATION_THRESHOLD {
            debug!(charge = self.score.shield_charge, "shield raised");
            self.shield = Some(Shield::new(
                self.ship.x,
                self.ship.y,
                self.score.shield_charge,
            ));
        }
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    /// Bring the asteroid count back up to the minimum in one pass.
    pub fn top_up_asteroids(&mut self, rng: &mut impl Rng) {
        let missing = MIN_ASTEROIDS.saturating_sub(self.asteroids.len());
        for _ in 0..missing {
            self.asteroids.push(Asteroid::spawn(&self.field, rng));
        }
    }

    /// Whole seconds of simulated play.
    pub fn elapsed_secs(&self) -> u64 {
        self.frame / self.tick_rate as u64
    }

    pub fn ufo_spawn_window_open(&self) -> bool {
        self.elapsed_secs() % UFO_SPAWN_PERIOD_SECS == 0
    }

    /// Independent of the spawn window: both are plain modulo checks on the
    /// same tick counter.
    pub fn ufo_fire_window_open(&self) -> bool {
        self.frame % UFO_FIRE_INTERVAL == 0
    }

    fn maybe_spawn_ufo(&mut self, rng: &mut impl Rng) {
        if self.ufo.is_none()
            && self.ufo_spawn_window_open()
            && self.score.score >= UFO_SCORE_THRESHOLD
        {
            let ufo = Ufo::spawn(&self.field, rng);
            debug!(x = ufo.x, y = ufo.y, frame = self.frame, "ufo spawned");
            self.ufo = Some(ufo);
        }
    }

    fn ufo_fire(&mut self) {
        if !self.ufo_fire_window_open() || !self.ship.alive {
            return;
        }
        let Some(ufo) = &self.ufo else {
            return;
        };
        if let Some(angle) = ufo.firing_angle(self.ship.x, self.ship.y) {
            trace!(angle, "ufo fires");
            self.projectiles
                .push(Projectile::new(angle, ufo.x, ufo.y, Owner::Ufo));
            self.cue(AudioCue::Laser);
        }
    }

    // ── Shield energy ────────────────────────────────────────────────────────

    fn update_shield_energy(&mut self) {
        let Some(shield) = self.shield.as_mut() else {
            self.score.recharge_shield();
            return;
        };
        self.score.drain_shield();
        shield.set_capacity(self.score.shield_charge);
        if self.score.shield_charge <= 0.0 {
            debug!("shield depleted");
            self.shield = None;
        }
    }

    // ── Physics ──────────────────────────────────────────────────────────────

    pub fn advance_physics(&mut self) {
        let field = self.field;

        if self.ship.alive {
            self.ship.tick_physics(&field);
        }
        for asteroid in &mut self.asteroids {
            asteroid.tick_physics(&field);
        }
        if let Some(ufo) = self.ufo.as_mut() {
            ufo.tick_physics(&field);
        }
        for projectile in &mut self.projectiles {
            projectile.tick_physics(&field);
        }
        self.projectiles.retain(|p| p.alive);

        if let Some(shield) = self.shield.as_mut() {
            shield.follow(self.ship.x, self.ship.y);
            shield.tick_physics(&field);
        }
        if self.shield.as_ref().is_some_and(|s| !s.alive) {
            self.shield = None;
        }
    }

    // ── Collisions ───────────────────────────────────────────────────────────

    /// Resolve every overlap for this tick in priority order: shield,
    /// asteroid hits, UFO hit, ship hit, pickups.
    pub fn resolve_collisions(&mut self, rng: &mut impl Rng) {
        self.collide_shield();
        self.collide_asteroids_with_shots(rng);
        self.collide_ufo_with_shots(rng);
        self.collide_ship_with_hazards(rng);
        self.collect_powerups();
    }

    /// Anything hostile touching the shield destroys itself and the shield.
    fn collide_shield(&mut self) {
        let Some(shield) = &self.shield else {
            return;
        };
        let zone = shield.bounds();

        let before = self.projectiles.len() + self.asteroids.len();
        self.projectiles
            .retain(|p| p.owner.is_friendly() || !p.bounds().overlaps(&zone));
        self.asteroids.retain(|a| !a.bounds().overlaps(&zone));
        let mut hit = self.projectiles.len() + self.asteroids.len() < before;

        if self
            .ufo
            .as_ref()
            .is_some_and(|ufo| ufo.bounds().overlaps(&zone))
        {
            self.ufo = None;
            hit = true;
        }

        if hit {
            debug!("shield absorbed a hit");
            self.shield = None;
            self.cue(AudioCue::Explosion);
        }
    }

    /// Each asteroid takes at most one hit per tick, consuming every friendly
    /// shot that overlaps it.
    fn collide_asteroids_with_shots(&mut self, rng: &mut impl Rng) {
        let mut points = 0;
        let mut hits = 0;

        for asteroid in &mut self.asteroids {
            let target = asteroid.bounds();
            let before = self.projectiles.len();
            self.projectiles
                .retain(|p| !(p.owner.is_friendly() && p.bounds().overlaps(&target)));
            if self.projectiles.len() < before {
                points += POINTS_PER_ASTEROID_SIZE * asteroid.size as u32;
                hits += 1;
                asteroid.on_hit(rng);
            }
        }
        self.asteroids.retain(|a| a.alive);

        if hits > 0 {
            trace!(hits, points, "asteroids hit");
            self.score.add_score(points);
            for _ in 0..hits {
                self.cue(AudioCue::Explosion);
            }
        }
    }

    fn collide_ufo_with_shots(&mut self, rng: &mut impl Rng) {
        let Some(ufo) = &self.ufo else {
            return;
        };
        let target = ufo.bounds();
        let (x, y) = (ufo.x, ufo.y);

        let before = self.projectiles.len();
        self.projectiles
            .retain(|p| !(p.owner.is_friendly() && p.bounds().overlaps(&target)));
        if self.projectiles.len() == before {
            return;
        }

        self.cue(AudioCue::Explosion);
        self.score.add_score(POINTS_UFO);
        let roll: u8 = rng.gen_range(1..=5);
        self.drop_loot(roll, x, y);
        self.ufo = None;
    }

    /// Spawn the powerup a UFO kill rolled, if the roll earned one.
    pub fn drop_loot(&mut self, roll: u8, x: f32, y: f32) {
        match PowerupKind::from_roll(roll) {
            Some(kind) => {
                debug!(roll, ?kind, "ufo destroyed, powerup dropped");
                self.powerups.push(Powerup { x, y, kind });
            }
            None => debug!(roll, "ufo destroyed"),
        }
    }

    fn collide_ship_with_hazards(&mut self, rng: &mut impl Rng) {
        if !self.ship.alive {
            return;
        }
        let hull = self.ship.bounds();

        let before = self.projectiles.len() + self.asteroids.len();
        self.projectiles
            .retain(|p| p.owner.is_friendly() || !p.bounds().overlaps(&hull));
        self.asteroids.retain(|a| !a.bounds().overlaps(&hull));
        let mut hit = self.projectiles.len() + self.asteroids.len() < before;

        if self
            .ufo
            .as_ref()
            .is_some_and(|ufo| ufo.bounds().overlaps(&hull))
        {
            self.ufo = None;
            hit = true;
        }

        if !hit {
            return;
        }

        self.score.lose_life();
        self.cue(AudioCue::Explosion);
        debug!(lives = self.score.lives, "ship hit");

        if self.score.is_out_of_lives() {
            self.ship.kill();
            return;
        }

        let field = self.field;
        self.ship.reset(&field);
        for asteroid in &mut self.asteroids {
            asteroid.respawn(&field, rng);
        }
        if let Some(ufo) = self.ufo.as_mut() {
            ufo.respawn(&field, rng);
        }
        self.projectiles.clear();
    }

    fn collect_powerups(&mut self) {
        if !self.ship.alive {
            return;
        }
        let hull = self.ship.bounds();

        let mut collected = Vec::new();
        self.powerups.retain(|p| {
            if p.bounds().overlaps(&hull) {
                collected.push(p.kind);
                false
            } else {
                true
            }
        });

        for kind in collected {
            match kind {
                PowerupKind::ShieldCapacity => self.score.add_capacity(),
                PowerupKind::ExtraLife => self.score.add_life(),
                PowerupKind::ScoreBonus => self.score.add_score(POINTS_BONUS),
            }
            debug!(?kind, "powerup collected");
            self.cue(AudioCue::Powerup);
        }
    }
}
