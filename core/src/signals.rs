//! Target-lifecycle signals that start and stop tracking.

use std::fmt;

/// What the game-state layer knows about the player's current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetValidity {
    pub exists: bool,
    pub attackable: bool,
    pub alive: bool,
}

impl TargetValidity {
    /// A live, attackable target
    pub const VALID: Self = Self {
        exists: true,
        attackable: true,
        alive: true,
    };

    /// No target at all
    pub const NONE: Self = Self {
        exists: false,
        attackable: false,
        alive: false,
    };

    pub fn is_valid(&self) -> bool {
        self.exists && self.attackable && self.alive
    }
}

/// Target-lifecycle events delivered by the host.
/// Each one makes the engine start or stop tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSignal {
    /// The player selected a new target (may be unattackable)
    TargetAcquired { validity: TargetValidity },
    /// The player cleared their target
    TargetLost,
    /// The current target died
    TargetDied,
    /// The player died
    PlayerDied,
    /// Loading screen finished; re-check whatever is targeted
    WorldEntered { validity: TargetValidity },
    /// Player returned from a death or control effect
    IncapacitationEnded { validity: TargetValidity },
}

impl TargetSignal {
    /// Validity reported with the signal. Loss and death signals imply no valid target.
    pub fn validity(&self) -> TargetValidity {
        match self {
            Self::TargetAcquired { validity }
            | Self::WorldEntered { validity }
            | Self::IncapacitationEnded { validity } => *validity,
            Self::TargetLost => TargetValidity::NONE,
            Self::TargetDied => TargetValidity {
                exists: true,
                attackable: false,
                alive: false,
            },
            Self::PlayerDied => TargetValidity::NONE,
        }
    }

    /// Whether this signal should (re)start tracking
    pub fn starts_tracking(&self) -> bool {
        match self {
            Self::TargetLost | Self::TargetDied | Self::PlayerDied => false,
            _ => self.validity().is_valid(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetAcquired { .. } => "target_acquired",
            Self::TargetLost => "target_lost",
            Self::TargetDied => "target_died",
            Self::PlayerDied => "player_died",
            Self::WorldEntered { .. } => "world_entered",
            Self::IncapacitationEnded { .. } => "incapacitation_ended",
        }
    }

    /// Build a signal from its snake_case name. `target_valid` is used by the
    /// variants that carry a validity.
    pub fn from_name(name: &str, target_valid: bool) -> Option<Self> {
        let validity = if target_valid {
            TargetValidity::VALID
        } else {
            TargetValidity::NONE
        };
        match name {
            "target_acquired" => Some(Self::TargetAcquired { validity }),
            "target_lost" => Some(Self::TargetLost),
            "target_died" => Some(Self::TargetDied),
            "player_died" => Some(Self::PlayerDied),
            "world_entered" => Some(Self::WorldEntered { validity }),
            "incapacitation_ended" => Some(Self::IncapacitationEnded { validity }),
            _ => None,
        }
    }
}

impl fmt::Display for TargetSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that reacts to target-lifecycle signals
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &TargetSignal);
}
