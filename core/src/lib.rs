//! Melee position indicator engine.
//!
//! Tracks whether the player's target is out of melee range, in range and
//! facing the player, or in range with the player behind it, and crossfades
//! the indicator between the matching images.
//!
//! # Architecture
//!
//! ```text
//! host tick ──► PollTimer ──► classifier::poll ──► TrackingContext
//!                                     │ (probe)              │
//!                                     ▼                      ▼
//!                                   Probe              classify()
//!                                                            │
//! host tick ─────────────────────────────────► CrossfadeAnimator ──► RenderFrame
//! ```
//!
//! Target-lifecycle signals start and stop tracking through
//! [`ProximityEngine`], which owns all of the above.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod fade;
pub mod poll;
pub mod probe;
pub mod signals;
pub mod state;

#[cfg(test)]
mod engine_tests;

pub use classifier::{PollOutcome, MELEE_EPSILON};
pub use config::ConfigError;
pub use engine::ProximityEngine;
pub use fade::{CrossfadeAnimator, FadeTransition, Layer, RenderFrame, FADE_DURATION_SECS};
pub use poll::PollTimer;
pub use probe::{Probe, ProbeError, ScriptedProbe, TargetRef};
pub use signals::{SignalHandler, TargetSignal, TargetValidity};
pub use state::{classify, IndicatorTexture, TrackingContext, VisualState};
