/// The vocabulary the core shares with its collaborators: decoded input
/// going in, sound cues and the session outcome coming out.

/// One discrete, already-decoded input for a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    /// Whether the thrust control is currently held.
    Thrust(bool),
    Fire,
    ToggleShield,
    PauseToggle,
    Quit,
}

/// A sound the audio collaborator should play.  The core never plays audio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    EngineStart,
    EngineStop,
    Explosion,
    Laser,
    Powerup,
    MusicFade,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Running,
    Paused,
    /// Lives ran out this tick or earlier.
    GameOver { final_score: u32 },
    Quit { final_score: u32 },
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Outcome::GameOver { .. } | Outcome::Quit { .. })
    }
}

/// Everything a tick hands back to its caller.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub outcome: Outcome,
    /// Cues in the order they were raised.
    pub cues: Vec<AudioCue>,
}
