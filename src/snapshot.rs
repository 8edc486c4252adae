/// Render-ready views of the arena.  The renderer only ever sees these.

use crate::compute::{Arena, GameStatus};
use crate::entities::{Body, PowerupKind};

/// One population, in back-to-front draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Powerups,
    Asteroids,
    Shield,
    Ship,
    Ufo,
    FriendlyShots,
    HostileShots,
}

impl Layer {
    pub const DRAW_ORDER: [Layer; 7] = [
        Layer::Powerups,
        Layer::Asteroids,
        Layer::Shield,
        Layer::Ship,
        Layer::Ufo,
        Layer::FriendlyShots,
        Layer::HostileShots,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpriteKind {
    Ship { angle: i32 },
    Asteroid { size: u8 },
    Ufo,
    Shot { friendly: bool, angle: i32 },
    Shield { capacity: f32 },
    Powerup(PowerupKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub kind: SpriteKind,
    pub alive: bool,
}

impl Sprite {
    fn of(body: &impl Body, kind: SpriteKind, alive: bool) -> Self {
        let b = body.bounds();
        Sprite {
            x: b.cx,
            y: b.cy,
            w: b.w,
            h: b.h,
            kind,
            alive,
        }
    }
}

/// Status readout for the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub shield_charge: f32,
    pub shield_max: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Populations in `Layer::DRAW_ORDER`.
    pub layers: Vec<(Layer, Vec<Sprite>)>,
    pub hud: Hud,
    pub field_width: f32,
    pub field_height: f32,
    pub status: GameStatus,
}

impl Arena {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score.score,
            lives: self.score.lives,
            shield_charge: self.score.shield_charge,
            shield_max: self.score.shield_max,
        }
    }

    pub fn sprites(&self, layer: Layer) -> Vec<Sprite> {
        match layer {
            Layer::Powerups => self
                .powerups
                .iter()
                .map(|p| Sprite::of(p, SpriteKind::Powerup(p.kind), true))
                .collect(),
            Layer::Asteroids => self
                .asteroids
                .iter()
                .map(|a| Sprite::of(a, SpriteKind::Asteroid { size: a.size }, a.alive))
                .collect(),
            Layer::Shield => self
                .shield
                .iter()
                .map(|s| {
                    let kind = SpriteKind::Shield {
                        capacity: s.capacity,
                    };
                    Sprite::of(s, kind, s.alive)
                })
                .collect(),
            Layer::Ship => {
                let kind = SpriteKind::Ship {
                    angle: self.ship.angle,
                };
                vec![Sprite::of(&self.ship, kind, self.ship.alive)]
            }
            Layer::Ufo => self
                .ufo
                .iter()
                .map(|u| Sprite::of(u, SpriteKind::Ufo, true))
                .collect(),
            Layer::FriendlyShots => self
                .friendly_projectiles()
                .map(|p| {
                    let kind = SpriteKind::Shot {
                        friendly: true,
                        angle: p.angle,
                    };
                    Sprite::of(p, kind, p.alive)
                })
                .collect(),
            Layer::HostileShots => self
                .hostile_projectiles()
                .map(|p| {
                    let kind = SpriteKind::Shot {
                        friendly: false,
                        angle: p.angle,
                    };
                    Sprite::of(p, kind, p.alive)
                })
                .collect(),
        }
    }

    pub fn snapshot(&self) -> Frame {
        Frame {
            layers: Layer::DRAW_ORDER
                .iter()
                .map(|&layer| (layer, self.sprites(layer)))
                .collect(),
            hud: self.hud(),
            field_width: self.field.width,
            field_height: self.field.height,
            status: self.status,
        }
    }
}
