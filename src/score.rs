/// Score, lives and shield energy for one session.

pub const START_LIVES: u32 = 3;
pub const START_SHIELD: f32 = 100.0;
pub const START_SHIELD_MAX: u32 = 100;
pub const SHIELD_CAPACITY_STEP: u32 = 10;
pub const SHIELD_DRAIN: f32 = 1.0;
pub const SHIELD_RECHARGE: f32 = 0.25;

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreKeeper {
    pub score: u32,
    pub lives: u32,
    /// Kept within `[0, shield_max]`.
    pub shield_charge: f32,
    pub shield_max: u32,
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        ScoreKeeper {
            score: 0,
            lives: START_LIVES,
            shield_charge: START_SHIELD,
            shield_max: START_SHIELD_MAX,
        }
    }
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_score(&mut self, value: u32) {
        self.score += value;
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
    }

    pub fn add_capacity(&mut self) {
        self.shield_max += SHIELD_CAPACITY_STEP;
    }

    /// One tick of an active shield.
    pub fn drain_shield(&mut self) {
        self.shield_charge = (self.shield_charge - SHIELD_DRAIN).max(0.0);
    }

    /// One tick with the shield down.
    pub fn recharge_shield(&mut self) {
        self.shield_charge = (self.shield_charge + SHIELD_RECHARGE).min(self.shield_max as f32);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}
