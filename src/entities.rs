/// Entity types and the motion rules each one owns.
///
/// Every moving object implements [`Body`]: a bounding box for overlap tests
/// and a one-tick physics step that applies the field's wrap policy.  The
/// entities never reference each other; the arena passes positions in by
/// value whenever one entity needs to know about another.

use rand::Rng;

use crate::field::{heading, normalize_angle, Bounds, Field};

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const SHIP_START_ANGLE: i32 = 90;
pub const SHIP_MAX_SPEED: f32 = 5.0;
pub const SHIP_THRUST_STEP: f32 = 1.0;
pub const SHIP_DECAY: f32 = 0.25;
pub const SHIP_EXTENT: (f32, f32) = (30.0, 30.0);

/// Asteroids enter just below the visible field.
pub const ASTEROID_SPAWN_Y: f32 = 500.0;
/// Box of a fresh (size 1) asteroid; each later size is 10 units smaller.
pub const ASTEROID_BASE_EXTENT: (f32, f32) = (69.0, 65.0);
pub const ASTEROID_SHRINK: f32 = 10.0;
pub const ASTEROID_LAST_SIZE: u8 = 3;

pub const UFO_SPAWN_Y: f32 = 20.0;
pub const UFO_MAX_SPEED: i32 = 5;
pub const UFO_EXTENT: (f32, f32) = (50.0, 30.0);
/// Horizontal/vertical distance under which the UFO considers the ship lined up.
pub const UFO_ALIGN_RANGE: f32 = 75.0;

pub const PROJECTILE_SPEED: f32 = 8.0;
/// A projectile dies on the first tick its travel counter exceeds this.
pub const PROJECTILE_RANGE: u32 = 50;
pub const PROJECTILE_EXTENT: (f32, f32) = (10.0, 10.0);

pub const SHIELD_EXTENT: (f32, f32) = (60.0, 60.0);
pub const POWERUP_EXTENT: (f32, f32) = (20.0, 20.0);

// ── Common contract ───────────────────────────────────────────────────────────

pub trait Body {
    fn center(&self) -> (f32, f32);

    /// Full width and height of the collision box.
    fn extent(&self) -> (f32, f32);

    fn bounds(&self) -> Bounds {
        let (cx, cy) = self.center();
        let (w, h) = self.extent();
        Bounds::new(cx, cy, w, h)
    }

    fn tick_physics(&mut self, field: &Field);
}

/// Draw a velocity with both axes in `[-limit, limit]` and neither zero.
/// Rejected pairs are simply re-drawn.
pub fn roll_velocity(rng: &mut impl Rng, limit: i32) -> (i32, i32) {
    loop {
        let dx = rng.gen_range(-limit..=limit);
        let dy = rng.gen_range(-limit..=limit);
        if dx != 0 && dy != 0 {
            return (dx, dy);
        }
    }
}

fn random_x(field: &Field, rng: &mut impl Rng) -> f32 {
    rng.gen_range(0..=field.width as i32) as f32
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    /// Always one of 0, 90, 180, 270.
    pub angle: i32,
    pub speed: f32,
    pub alive: bool,
}

impl Ship {
    pub fn new(field: &Field) -> Self {
        let (x, y) = field.center();
        Ship {
            x,
            y,
            angle: SHIP_START_ANGLE,
            speed: 0.0,
            alive: true,
        }
    }

    /// Counter-clockwise quarter turn.
    pub fn rotate_left(&mut self) {
        self.angle = normalize_angle(self.angle + 90);
    }

    /// Clockwise quarter turn.
    pub fn rotate_right(&mut self) {
        self.angle = normalize_angle(self.angle - 90);
    }

    pub fn thrust(&mut self) {
        self.speed = (self.speed + SHIP_THRUST_STEP).min(SHIP_MAX_SPEED);
    }

    /// Back to the middle of the field, nose up, at rest.
    pub fn reset(&mut self, field: &Field) {
        let (x, y) = field.center();
        self.x = x;
        self.y = y;
        self.angle = SHIP_START_ANGLE;
        self.speed = 0.0;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Body for Ship {
    fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn extent(&self) -> (f32, f32) {
        SHIP_EXTENT
    }

    fn tick_physics(&mut self, field: &Field) {
        let (hx, hy) = heading(self.angle);
        (self.x, self.y) = field.wrap(self.x + hx * self.speed, self.y + hy * self.speed);
        self.speed = (self.speed - SHIP_DECAY).max(0.0);
    }
}

// ── Asteroid ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub dx: i32,
    pub dy: i32,
    /// 1 is the freshest, largest rock; 3 is the last fragment.
    pub size: u8,
    pub alive: bool,
}

impl Asteroid {
    pub fn spawn(field: &Field, rng: &mut impl Rng) -> Self {
        let mut asteroid = Asteroid {
            x: 0.0,
            y: 0.0,
            dx: 0,
            dy: 0,
            size: 1,
            alive: true,
        };
        asteroid.respawn(field, rng);
        asteroid
    }

    /// Re-enter below the field at a random column.  Size is kept.
    pub fn respawn(&mut self, field: &Field, rng: &mut impl Rng) {
        self.x = random_x(field, rng);
        self.y = ASTEROID_SPAWN_Y;
        self.reroll(rng);
    }

    /// Take one hit: shrink in place, or break up entirely at the last size.
    pub fn on_hit(&mut self, rng: &mut impl Rng) {
        if self.size >= ASTEROID_LAST_SIZE {
            self.alive = false;
            return;
        }
        self.size += 1;
        self.reroll(rng);
    }

    /// Smaller fragments may move faster: the limit is `2 * size`.
    fn reroll(&mut self, rng: &mut impl Rng) {
        (self.dx, self.dy) = roll_velocity(rng, 2 * self.size as i32);
    }
}

impl Body for Asteroid {
    fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn extent(&self) -> (f32, f32) {
        let shrink = ASTEROID_SHRINK * (self.size.saturating_sub(1)) as f32;
        (
            ASTEROID_BASE_EXTENT.0 - shrink,
            ASTEROID_BASE_EXTENT.1 - shrink,
        )
    }

    fn tick_physics(&mut self, field: &Field) {
        (self.x, self.y) = field.wrap(self.x + self.dx as f32, self.y + self.dy as f32);
    }
}

// ── UFO ───────────────────────────────────────────────────────────────────────

/// Result of the UFO's line-of-fire check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    /// Ship is roughly in the same column.
    Vertical,
    /// Ship is roughly in the same row.
    Horizontal,
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ufo {
    pub x: f32,
    pub y: f32,
    pub dx: i32,
    pub dy: i32,
}

impl Ufo {
    pub fn spawn(field: &Field, rng: &mut impl Rng) -> Self {
        let mut ufo = Ufo {
            x: 0.0,
            y: 0.0,
            dx: 0,
            dy: 0,
        };
        ufo.respawn(field, rng);
        ufo
    }

    pub fn respawn(&mut self, field: &Field, rng: &mut impl Rng) {
        self.x = random_x(field, rng);
        self.y = UFO_SPAWN_Y;
        (self.dx, self.dy) = roll_velocity(rng, UFO_MAX_SPEED);
    }

    /// Column alignment wins over row alignment.
    pub fn alignment(&self, ship_x: f32, ship_y: f32) -> Alignment {
        if (self.x - ship_x).abs() < UFO_ALIGN_RANGE {
            Alignment::Vertical
        } else if (self.y - ship_y).abs() < UFO_ALIGN_RANGE {
            Alignment::Horizontal
        } else {
            Alignment::None
        }
    }

    /// Heading of the shot the UFO would take at the ship, if any.
    pub fn firing_angle(&self, ship_x: f32, ship_y: f32) -> Option<i32> {
        match self.alignment(ship_x, ship_y) {
            Alignment::Vertical if ship_y < self.y => Some(90),
            Alignment::Vertical => Some(270),
            Alignment::Horizontal if ship_x < self.x => Some(180),
            Alignment::Horizontal => Some(0),
            Alignment::None => None,
        }
    }
}

impl Body for Ufo {
    fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn extent(&self) -> (f32, f32) {
        UFO_EXTENT
    }

    fn tick_physics(&mut self, field: &Field) {
        (self.x, self.y) = field.wrap(self.x + self.dx as f32, self.y + self.dy as f32);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Owner {
    Player,
    Ufo,
}

impl Owner {
    /// Friendly shots hit hazards; hostile ones hit the ship.
    pub fn is_friendly(&self) -> bool {
        matches!(self, Owner::Player)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub angle: i32,
    /// Ticks travelled so far.
    pub distance: u32,
    pub owner: Owner,
    pub alive: bool,
}

impl Projectile {
    pub fn new(angle: i32, x: f32, y: f32, owner: Owner) -> Self {
        Projectile {
            x,
            y,
            angle: normalize_angle(angle),
            distance: 0,
            owner,
            alive: true,
        }
    }
}

impl Body for Projectile {
    fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn extent(&self) -> (f32, f32) {
        PROJECTILE_EXTENT
    }

    fn tick_physics(&mut self, field: &Field) {
        let (hx, hy) = heading(self.angle);
        (self.x, self.y) = field.wrap(
            self.x + hx * PROJECTILE_SPEED,
            self.y + hy * PROJECTILE_SPEED,
        );
        self.distance += 1;
        if self.distance > PROJECTILE_RANGE {
            self.alive = false;
        }
    }
}

// ── Shield ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    pub x: f32,
    pub y: f32,
    pub capacity: f32,
    pub alive: bool,
}

impl Shield {
    pub fn new(x: f32, y: f32, capacity: f32) -> Self {
        Shield {
            x,
            y,
            capacity,
            alive: capacity > 0.0,
        }
    }

    pub fn follow(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_capacity(&mut self, capacity: f32) {
        self.capacity = capacity;
    }
}

impl Body for Shield {
    fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn extent(&self) -> (f32, f32) {
        SHIELD_EXTENT
    }

    /// The shield does not move on its own; it only collapses once empty.
    fn tick_physics(&mut self, _field: &Field) {
        if self.capacity <= 0.0 {
            self.alive = false;
        }
    }
}

// ── Powerups ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PowerupKind {
    /// Raises the shield maximum by 10.
    ShieldCapacity,
    /// One more life.
    ExtraLife,
    /// Flat 100 points.
    ScoreBonus,
}

impl PowerupKind {
    /// Map a 1..=5 drop roll to a powerup; 4 and 5 drop nothing.
    pub fn from_roll(roll: u8) -> Option<PowerupKind> {
        match roll {
            1 => Some(PowerupKind::ShieldCapacity),
            2 => Some(PowerupKind::ExtraLife),
            3 => Some(PowerupKind::ScoreBonus),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            PowerupKind::ShieldCapacity => 1,
            PowerupKind::ExtraLife => 2,
            PowerupKind::ScoreBonus => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Powerup {
    pub x: f32,
    pub y: f32,
    pub kind: PowerupKind,
}

impl Body for Powerup {
    fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn extent(&self) -> (f32, f32) {
        POWERUP_EXTENT
    }

    fn tick_physics(&mut self, _field: &Field) {}
}
