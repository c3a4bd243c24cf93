//! Proximity engine: ties the poll scheduler, classifier and animator together.
//!
//! The host drives everything through explicit calls on one engine value:
//! - `on_tick` once per rendered frame
//! - `handle_signal` for target-lifecycle events
//! - `set_enabled` / `set_poll_interval` when settings change
//!
//! Within a tick the poll (and any transition it triggers) runs before the fade
//! update, so a new transition already contributes to that tick's opacities.

use meleeguard_types::{clamp_poll_interval, IndicatorConfig};

use crate::classifier::{self, PollOutcome};
use crate::fade::{CrossfadeAnimator, FadeTransition, RenderFrame};
use crate::poll::PollTimer;
use crate::probe::{Probe, TargetRef};
use crate::signals::{SignalHandler, TargetSignal, TargetValidity};
use crate::state::{classify, TrackingContext, VisualState};

pub struct ProximityEngine<P: Probe> {
    enabled: bool,
    context: TrackingContext,
    timer: PollTimer,
    animator: CrossfadeAnimator,
    probe: P,
    target: TargetRef,
    /// Validity carried by the most recent lifecycle signal, re-checked on enable
    last_validity: TargetValidity,
}

impl<P: Probe> ProximityEngine<P> {
    /// Create an idle engine probing the player's current target
    pub fn new(probe: P, config: &IndicatorConfig) -> Self {
        Self::with_target(probe, config, TargetRef::current())
    }

    pub fn with_target(probe: P, config: &IndicatorConfig, target: TargetRef) -> Self {
        Self {
            enabled: config.enabled,
            context: TrackingContext::default(),
            timer: PollTimer::new(clamp_poll_interval(config.poll_interval_secs)),
            animator: CrossfadeAnimator::new(),
            probe,
            target,
            last_validity: TargetValidity::NONE,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Begin tracking the target. Ignored while disabled.
    pub fn start(&mut self) {
        if !self.enabled {
            tracing::debug!("Engine disabled, not starting");
            return;
        }

        tracing::info!(unit = %self.target.0, "[TRACKING] Started");
        self.context.begin();
        self.timer.preset();
        self.reclassify();
    }

    /// Stop tracking and fade to hidden.
    pub fn stop(&mut self) {
        if self.context.is_tracking() {
            tracing::info!("[TRACKING] Stopped");
        }
        self.context.reset();
        self.timer.clear();
        self.animator.begin_transition(VisualState::Hidden);
    }

    /// Advance by one host frame.
    pub fn on_tick(&mut self, delta_secs: f64) {
        if self.context.is_tracking() && self.timer.tick(delta_secs) {
            self.poll();
        }
        self.animator.tick(delta_secs);
    }

    fn poll(&mut self) {
        match classifier::poll(&mut self.context, &mut self.probe, &self.target) {
            PollOutcome::Changed => self.reclassify(),
            PollOutcome::Unchanged | PollOutcome::NoData => {}
        }
    }

    /// Hand the state implied by the current flags to the animator
    fn reclassify(&mut self) {
        let state = classify(self.enabled, &self.context);
        self.animator.begin_transition(state);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Enable or disable the indicator.
    ///
    /// Disabling mid-track stops immediately. Enabling resumes tracking if the
    /// last reported target was valid.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        tracing::info!(enabled, "[SETTINGS] Indicator toggled");

        if !enabled {
            if self.context.is_tracking() {
                self.stop();
            }
        } else if self.last_validity.is_valid() {
            self.start();
        }
    }

    /// Change the poll cadence. Out-of-range values are clamped.
    pub fn set_poll_interval(&mut self, secs: f64) {
        let secs = clamp_poll_interval(secs);
        tracing::debug!(interval_secs = secs, "[SETTINGS] Poll interval");
        self.timer.set_interval(secs);
    }

    pub fn apply_config(&mut self, config: &IndicatorConfig) {
        self.set_poll_interval(config.poll_interval_secs);
        self.set_enabled(config.enabled);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn context(&self) -> &TrackingContext {
        &self.context
    }

    pub fn timer(&self) -> &PollTimer {
        &self.timer
    }

    pub fn displayed_state(&self) -> VisualState {
        self.animator.displayed()
    }

    pub fn is_fading(&self) -> bool {
        self.animator.is_fading()
    }

    pub fn fade(&self) -> Option<&FadeTransition> {
        self.animator.fade()
    }

    /// Layers to draw for the current tick
    pub fn render(&self) -> RenderFrame {
        self.animator.frame()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }
}

impl<P: Probe> SignalHandler for ProximityEngine<P> {
    fn handle_signal(&mut self, signal: &TargetSignal) {
        tracing::debug!(signal = %signal, "Target signal");
        self.last_validity = signal.validity();

        if signal.starts_tracking() {
            self.start();
        } else {
            self.stop();
        }
    }
}

impl<P: Probe + std::fmt::Debug> std::fmt::Debug for ProximityEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityEngine")
            .field("enabled", &self.enabled)
            .field("context", &self.context)
            .field("timer", &self.timer)
            .field("displayed", &self.animator.displayed())
            .field("fade", &self.animator.fade())
            .field("probe", &self.probe)
            .finish()
    }
}
