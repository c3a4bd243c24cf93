//! Scripted scenario replay.
//!
//! A scenario is a TOML file of `[[step]]` tables run in order against a
//! fresh engine backed by a [`ScriptedProbe`]:
//!
//! ```toml
//! [[step]]
//! distance = 5.0
//! signal = "target_acquired"
//! ticks = 10
//! expect = "out_of_range"
//! ```
//!
//! Leaving `distance` or `behind` out of a step that sets `probe = true`
//! makes that query fail, which is how probe errors are scripted. `error`
//! picks the failure kind (`no_target`, `out_of_query_range`, `unavailable`).

use std::fs;
use std::path::Path;

use meleeguard_core::{
    ProbeError, ProximityEngine, ScriptedProbe, SignalHandler, TargetSignal, VisualState,
};
use meleeguard_types::formatting::{format_distance, format_opacity};
use meleeguard_types::IndicatorConfig;
use serde::Deserialize;

use crate::commands::{self, Applied};

/// One host frame at 60 fps
const DEFAULT_DELTA_SECS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: Option<String>,
    /// Starting settings; defaults when absent
    pub config: IndicatorConfig,
    #[serde(rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Replace the probe readings with `distance`/`behind` (absent = error)
    pub probe: bool,
    pub distance: Option<f32>,
    pub behind: Option<bool>,
    /// Error kind reported for missing readings from this step on
    pub error: Option<String>,
    pub signal: Option<String>,
    /// Validity attached to `target_acquired`, `world_entered` and `incapacitation_ended`
    pub target_valid: bool,
    pub command: Option<String>,
    pub ticks: u32,
    pub delta: f64,
    pub expect: Option<String>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            probe: false,
            distance: None,
            behind: None,
            error: None,
            signal: None,
            target_valid: true,
            command: None,
            ticks: 0,
            delta: DEFAULT_DELTA_SECS,
            expect: None,
        }
    }
}

impl Step {
    /// Whether this step rewrites the probe readings
    fn sets_probe(&self) -> bool {
        self.probe || self.distance.is_some() || self.behind.is_some()
    }
}

/// Engine state after a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub state: VisualState,
    pub fading: bool,
    pub incoming_opacity: f32,
    pub outgoing_opacity: f32,
    pub distance_queries: u32,
}

impl Scenario {
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let scenario: Self = toml::from_str(contents).map_err(|e| e.to_string())?;
        Ok(Self {
            config: scenario.config.clone().sanitized(),
            ..scenario
        })
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("failed to read {:?}: {}", path, e))?;
        Self::from_toml(&contents)
    }

    /// Run every step, failing on the first unmet `expect`.
    pub fn run(&self) -> Result<Vec<StepReport>, String> {
        let mut config = self.config.clone();
        let mut engine = ProximityEngine::new(ScriptedProbe::default(), &config);
        let mut reports = Vec::with_capacity(self.steps.len());

        tracing::info!(
            name = self.name.as_deref().unwrap_or("unnamed"),
            steps = self.steps.len(),
            "Replaying scenario"
        );

        for (index, step) in self.steps.iter().enumerate() {
            run_step(index, step, &mut config, &mut engine)?;

            let frame = engine.render();
            let report = StepReport {
                index,
                state: engine.displayed_state(),
                fading: engine.is_fading(),
                incoming_opacity: frame.incoming.effective_opacity(),
                outgoing_opacity: frame.outgoing.effective_opacity(),
                distance_queries: engine.probe().distance_queries(),
            };
            tracing::info!(
                step = index,
                state = %report.state,
                fading = report.fading,
                incoming = %format_opacity(report.incoming_opacity),
                outgoing = %format_opacity(report.outgoing_opacity),
                "Step complete"
            );

            if let Some(expected) = &step.expect {
                let expected_state = VisualState::from_name(expected)
                    .ok_or_else(|| format!("step {}: unknown state {:?}", index, expected))?;
                if expected_state != report.state {
                    return Err(format!(
                        "step {}: expected {}, got {}",
                        index, expected_state, report.state
                    ));
                }
            }
            reports.push(report);
        }

        Ok(reports)
    }
}

fn run_step(
    index: usize,
    step: &Step,
    config: &mut IndicatorConfig,
    engine: &mut ProximityEngine<ScriptedProbe>,
) -> Result<(), String> {
    if let Some(kind) = &step.error {
        let failure = ProbeError::from_name(kind)
            .ok_or_else(|| format!("step {}: unknown probe error {:?}", index, kind))?;
        engine.probe_mut().set_failure(failure);
    }

    if step.sets_probe() {
        tracing::debug!(
            step = index,
            distance = %format_distance(step.distance),
            behind = ?step.behind,
            "Probe readings"
        );
        engine.probe_mut().set(step.distance, step.behind);
    }

    if let Some(name) = &step.signal {
        let signal = TargetSignal::from_name(name, step.target_valid)
            .ok_or_else(|| format!("step {}: unknown signal {:?}", index, name))?;
        engine.handle_signal(&signal);
    }

    if let Some(line) = &step.command {
        let command = commands::parse(line).map_err(|e| format!("step {}: {}", index, e))?;
        match commands::apply(&command, config) {
            Applied::Changed(message) => {
                tracing::info!(step = index, "{}", message);
                engine.apply_config(config);
            }
            Applied::Status => {
                tracing::info!(step = index, "{}", commands::describe_config(config));
                tracing::info!(step = index, "{}", commands::describe_engine(engine));
            }
        }
    }

    for _ in 0..step.ticks {
        engine.on_tick(step.delta);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MELEE_CYCLE: &str = include_str!("../../scenarios/melee_cycle.toml");

    #[test]
    fn test_bundled_melee_cycle_passes() {
        let scenario = Scenario::from_toml(MELEE_CYCLE).unwrap();
        let reports = scenario.run().unwrap();
        assert_eq!(reports.last().unwrap().state, VisualState::Hidden);
    }

    #[test]
    fn test_probe_errors_hold_state() {
        let toml = r#"
[[step]]
distance = 0.0
behind = true
signal = "target_acquired"
ticks = 30
expect = "in_range_behind"

[[step]]
probe = true
ticks = 30
expect = "in_range_behind"
"#;
        let reports = Scenario::from_toml(toml).unwrap().run().unwrap();
        assert!(reports[1].distance_queries > reports[0].distance_queries);
        assert!(!reports[1].fading);
    }

    #[test]
    fn test_scripted_error_kinds_hold_state() {
        let toml = r#"
[[step]]
distance = 0.0
behind = false
signal = "target_acquired"
ticks = 30
expect = "in_range_front"

[[step]]
probe = true
error = "out_of_query_range"
ticks = 30
expect = "in_range_front"

[[step]]
error = "no_target"
ticks = 30
expect = "in_range_front"
"#;
        let reports = Scenario::from_toml(toml).unwrap().run().unwrap();
        assert!(reports[2].distance_queries > reports[1].distance_queries);
    }

    #[test]
    fn test_unknown_error_kind_is_an_error() {
        let toml = r#"
[[step]]
error = "timeout"
"#;
        let err = Scenario::from_toml(toml).unwrap().run().unwrap_err();
        assert!(err.contains("unknown probe error"), "{err}");
    }

    #[test]
    fn test_failed_expectation_reports_step() {
        let toml = r#"
[[step]]
distance = 5.0
signal = "target_acquired"
ticks = 30
expect = "in_range_front"
"#;
        let err = Scenario::from_toml(toml).unwrap().run().unwrap_err();
        assert!(err.contains("step 0"), "{err}");
    }

    #[test]
    fn test_off_command_hides_indicator() {
        let toml = r#"
[config]
poll_interval_secs = 0.05

[[step]]
distance = 0.0
signal = "target_acquired"
ticks = 30
expect = "in_range_front"

[[step]]
command = "/mg off"
ticks = 30
expect = "hidden"
"#;
        let scenario = Scenario::from_toml(toml).unwrap();
        assert_eq!(scenario.config.poll_interval_secs, 0.05);
        let reports = scenario.run().unwrap();
        assert_eq!(reports[1].incoming_opacity, 0.0);
    }

    #[test]
    fn test_unknown_signal_is_an_error() {
        let toml = r#"
[[step]]
signal = "target_exploded"
"#;
        assert!(Scenario::from_toml(toml).unwrap().run().is_err());
    }
}
