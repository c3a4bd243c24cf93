//! Range and facing queries against the host game.
//!
//! The engine never talks to the game directly. The host supplies a [`Probe`]
//! and the engine asks it two questions about the current target on each poll.

use thiserror::Error;

/// Unit token naming whose position is probed (the host decides what it means)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef(pub String);

impl TargetRef {
    /// The player's current target
    pub fn current() -> Self {
        Self("target".to_string())
    }
}

impl Default for TargetRef {
    fn default() -> Self {
        Self::current()
    }
}

/// A probe query could not produce an answer this tick
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("no target to probe")]
    NoTarget,
    #[error("target is out of query range")]
    OutOfQueryRange,
    #[error("probe unavailable: {0}")]
    Unavailable(String),
}

impl ProbeError {
    /// Parse a snake_case error kind (`no_target`, `out_of_query_range`, `unavailable`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "no_target" => Some(Self::NoTarget),
            "out_of_query_range" => Some(Self::OutOfQueryRange),
            "unavailable" => Some(Self::Unavailable("scripted".to_string())),
            _ => None,
        }
    }
}

/// Host-side range and facing queries.
pub trait Probe {
    /// Distance to the target in melee units. Anything below the engine's melee
    /// tolerance counts as in melee range.
    fn melee_distance(&mut self, target: &TargetRef) -> Result<f32, ProbeError>;

    /// Whether the player stands behind the target.
    fn is_behind(&mut self, target: &TargetRef) -> Result<bool, ProbeError>;
}

/// Probe that replays fixed readings until told otherwise.
///
/// Used by scenario replay and tests. `None` readings fail with the error set
/// by [`ScriptedProbe::set_failure`], [`ProbeError::Unavailable`] by default.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
    pub distance: Option<f32>,
    pub behind: Option<bool>,
    failure: Option<ProbeError>,
    distance_queries: u32,
    facing_queries: u32,
}

impl ScriptedProbe {
    pub fn new(distance: Option<f32>, behind: Option<bool>) -> Self {
        Self {
            distance,
            behind,
            ..Self::default()
        }
    }

    pub fn set(&mut self, distance: Option<f32>, behind: Option<bool>) {
        self.distance = distance;
        self.behind = behind;
    }

    /// Error reported for missing readings
    pub fn set_failure(&mut self, failure: ProbeError) {
        self.failure = Some(failure);
    }

    fn failure(&self, query: &str) -> ProbeError {
        self.failure
            .clone()
            .unwrap_or_else(|| ProbeError::Unavailable(format!("scripted {}", query)))
    }

    /// Number of distance queries answered (or failed) so far
    pub fn distance_queries(&self) -> u32 {
        self.distance_queries
    }

    /// Number of facing queries answered (or failed) so far
    pub fn facing_queries(&self) -> u32 {
        self.facing_queries
    }
}

impl Probe for ScriptedProbe {
    fn melee_distance(&mut self, _target: &TargetRef) -> Result<f32, ProbeError> {
        self.distance_queries += 1;
        self.distance.ok_or_else(|| self.failure("distance"))
    }

    fn is_behind(&mut self, _target: &TargetRef) -> Result<bool, ProbeError> {
        self.facing_queries += 1;
        self.behind.ok_or_else(|| self.failure("facing"))
    }
}
