//! Tests for the proximity engine
//!
//! Drives the engine through full target lifecycles with a scripted probe.

use meleeguard_types::IndicatorConfig;

use crate::engine::ProximityEngine;
use crate::fade::FADE_DURATION_SECS;
use crate::probe::ScriptedProbe;
use crate::signals::{SignalHandler, TargetSignal, TargetValidity};
use crate::state::{IndicatorTexture, VisualState};

/// Comfortably longer than a fade
const SETTLE_SECS: f64 = FADE_DURATION_SECS * 2.0;

fn config(interval: f64) -> IndicatorConfig {
    IndicatorConfig {
        poll_interval_secs: interval,
        ..IndicatorConfig::default()
    }
}

fn make_engine(distance: Option<f32>, behind: Option<bool>) -> ProximityEngine<ScriptedProbe> {
    ProximityEngine::new(ScriptedProbe::new(distance, behind), &config(0.1))
}

fn acquired() -> TargetSignal {
    TargetSignal::TargetAcquired {
        validity: TargetValidity::VALID,
    }
}

/// Tick long enough for one poll and for any fade it starts to finish
fn settle(engine: &mut ProximityEngine<ScriptedProbe>) {
    engine.on_tick(0.0);
    engine.on_tick(SETTLE_SECS);
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_new_engine_is_idle_and_hidden() {
    let engine = make_engine(Some(5.0), Some(false));
    assert!(!engine.context().is_tracking());
    assert_eq!(engine.displayed_state(), VisualState::Hidden);
    assert!(!engine.is_fading());
}

#[test]
fn test_start_presets_immediate_poll() {
    let mut engine = make_engine(Some(0.0), Some(false));
    engine.start();
    assert_eq!(engine.displayed_state(), VisualState::OutOfRange);
    assert_eq!(engine.probe().distance_queries(), 0);

    engine.on_tick(0.001);
    assert_eq!(engine.probe().distance_queries(), 1);
    assert_eq!(engine.displayed_state(), VisualState::InRangeFront);
}

#[test]
fn test_start_is_ignored_while_disabled() {
    let mut engine = ProximityEngine::new(
        ScriptedProbe::new(Some(5.0), None),
        &IndicatorConfig {
            enabled: false,
            ..IndicatorConfig::default()
        },
    );
    engine.start();
    assert!(!engine.context().is_tracking());
    engine.on_tick(1.0);
    assert_eq!(engine.probe().distance_queries(), 0);
    assert_eq!(engine.displayed_state(), VisualState::Hidden);
}

#[test]
fn test_full_melee_cycle() {
    let mut engine = make_engine(Some(5.0), Some(false));

    engine.handle_signal(&acquired());
    settle(&mut engine);
    assert!(!engine.context().in_melee());
    assert_eq!(engine.displayed_state(), VisualState::OutOfRange);

    engine.probe_mut().set(Some(0.0), Some(false));
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::InRangeFront);

    engine.probe_mut().set(Some(0.0), Some(true));
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::InRangeBehind);
    assert_eq!(
        engine.render().incoming.texture,
        Some(IndicatorTexture::InRangeBehind)
    );

    engine.handle_signal(&TargetSignal::TargetLost);
    assert_eq!(engine.displayed_state(), VisualState::Hidden);
    engine.on_tick(SETTLE_SECS);
    assert!(!engine.render().visible);
    assert!(!engine.context().is_tracking());
    assert!(!engine.context().has_valid_target());
}

#[test]
fn test_probe_errors_keep_last_state() {
    let mut engine = make_engine(Some(0.0), Some(true));
    engine.handle_signal(&acquired());
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::InRangeBehind);
    let ctx_before = *engine.context();

    engine.probe_mut().set(None, None);
    let queries_before = engine.probe().distance_queries();
    for _ in 0..3 {
        engine.on_tick(0.1);
        assert_eq!(*engine.context(), ctx_before);
        assert_eq!(engine.displayed_state(), VisualState::InRangeBehind);
        assert!(!engine.is_fading());
    }
    assert_eq!(engine.probe().distance_queries(), queries_before + 3);
}

#[test]
fn test_poll_cadence_with_short_ticks() {
    let mut engine = make_engine(Some(5.0), None);
    engine.handle_signal(&acquired());
    engine.on_tick(0.0);
    assert_eq!(engine.probe().distance_queries(), 1);

    engine.on_tick(0.03);
    engine.on_tick(0.03);
    engine.on_tick(0.03);
    assert_eq!(engine.probe().distance_queries(), 1);
    engine.on_tick(0.03);
    assert_eq!(engine.probe().distance_queries(), 2);
    assert_eq!(engine.timer().accumulated_secs(), 0.0);
}

#[test]
fn test_no_polls_when_not_tracking() {
    let mut engine = make_engine(Some(0.0), Some(true));
    for _ in 0..10 {
        engine.on_tick(0.5);
    }
    assert_eq!(engine.probe().distance_queries(), 0);
}

#[test]
fn test_stop_while_fading_ends_hidden() {
    let mut engine = make_engine(Some(0.0), Some(false));
    engine.handle_signal(&acquired());
    engine.on_tick(0.0);
    engine.on_tick(0.05);
    assert!(engine.is_fading());

    engine.stop();
    assert_eq!(engine.displayed_state(), VisualState::Hidden);
    engine.on_tick(SETTLE_SECS);
    assert_eq!(engine.displayed_state(), VisualState::Hidden);
    assert!(!engine.is_fading());
    assert!(!engine.render().visible);
}

#[test]
fn test_death_and_revive() {
    let mut engine = make_engine(Some(0.0), Some(false));
    engine.handle_signal(&acquired());
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::InRangeFront);

    engine.handle_signal(&TargetSignal::PlayerDied);
    assert_eq!(engine.displayed_state(), VisualState::Hidden);

    engine.handle_signal(&TargetSignal::IncapacitationEnded {
        validity: TargetValidity::VALID,
    });
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::InRangeFront);
}

#[test]
fn test_unattackable_target_stays_hidden() {
    let mut engine = make_engine(Some(0.0), Some(false));
    engine.handle_signal(&TargetSignal::TargetAcquired {
        validity: TargetValidity {
            exists: true,
            attackable: false,
            alive: true,
        },
    });
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::Hidden);
    assert_eq!(engine.probe().distance_queries(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_disable_while_tracking_stops() {
    let mut engine = make_engine(Some(0.0), Some(true));
    engine.handle_signal(&acquired());
    settle(&mut engine);

    engine.set_enabled(false);
    assert!(!engine.context().is_tracking());
    assert_eq!(engine.displayed_state(), VisualState::Hidden);

    // Re-enabling resumes against the last reported target
    engine.set_enabled(true);
    assert!(engine.context().is_tracking());
    settle(&mut engine);
    assert_eq!(engine.displayed_state(), VisualState::InRangeBehind);
}

#[test]
fn test_enable_without_target_stays_idle() {
    let mut engine = make_engine(Some(0.0), Some(true));
    engine.set_enabled(false);
    engine.handle_signal(&acquired());
    assert!(!engine.context().is_tracking());

    engine.handle_signal(&TargetSignal::TargetLost);
    engine.set_enabled(true);
    assert!(!engine.context().is_tracking());
}

#[test]
fn test_poll_interval_is_clamped() {
    let mut engine = make_engine(Some(5.0), None);
    engine.set_poll_interval(10.0);
    assert_eq!(engine.timer().interval_secs(), meleeguard_types::POLL_INTERVAL_MAX);
    engine.set_poll_interval(0.0);
    assert_eq!(engine.timer().interval_secs(), meleeguard_types::POLL_INTERVAL_MIN);
}

#[test]
fn test_interrupted_fade_never_pops_to_full() {
    let mut engine = make_engine(Some(5.0), Some(false));
    engine.handle_signal(&acquired());
    settle(&mut engine);

    // Start fading to front, then interrupt with behind mid-fade
    engine.probe_mut().set(Some(0.0), Some(false));
    engine.on_tick(0.1);
    let incoming = engine.render().incoming.opacity;
    assert!(incoming > 0.0 && incoming < 1.0);

    let outgoing_before = engine.render().outgoing.opacity;

    engine.probe_mut().set(Some(0.0), Some(true));
    engine.on_tick(0.1);
    let frame = engine.render();
    assert_eq!(engine.displayed_state(), VisualState::InRangeBehind);
    assert_eq!(frame.outgoing.texture, Some(IndicatorTexture::OutOfRange));
    assert!(frame.outgoing.opacity <= outgoing_before);
    for layer in [frame.incoming, frame.outgoing] {
        assert!((0.0..=1.0).contains(&layer.opacity));
    }
}
