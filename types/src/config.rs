//! Indicator settings and their bounds.
//!
//! `IndicatorConfig::sanitized` is the single place out-of-range values are
//! clamped. Everything downstream assumes a sanitized config.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Fastest allowed probe cadence (seconds)
pub const POLL_INTERVAL_MIN: f64 = 0.05;
/// Slowest allowed probe cadence (seconds)
pub const POLL_INTERVAL_MAX: f64 = 0.5;
pub const POLL_INTERVAL_DEFAULT: f64 = 0.1;

/// Indicator edge length in pixels
pub const SIZE_MIN: u32 = 16;
pub const SIZE_MAX: u32 = 256;
pub const SIZE_DEFAULT: u32 = 64;

/// Clamp a poll interval into `[POLL_INTERVAL_MIN, POLL_INTERVAL_MAX]`.
///
/// Non-finite input falls back to [`POLL_INTERVAL_DEFAULT`].
pub fn clamp_poll_interval(secs: f64) -> f64 {
    if !secs.is_finite() {
        return POLL_INTERVAL_DEFAULT;
    }
    secs.clamp(POLL_INTERVAL_MIN, POLL_INTERVAL_MAX)
}

/// Clamp an indicator size into `[SIZE_MIN, SIZE_MAX]`.
pub fn clamp_size(size: u32) -> u32 {
    size.clamp(SIZE_MIN, SIZE_MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

/// Screen offset of the indicator, relative to screen center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPosition {
    pub x: f32,
    pub y: f32,
}

impl Default for IndicatorPosition {
    fn default() -> Self {
        Self { x: 0.0, y: -120.0 }
    }
}

/// User-facing indicator settings.
///
/// The engine only reads `enabled` and `poll_interval_secs`; the rest belongs
/// to whatever draws and drags the indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub enabled: bool,
    pub poll_interval_secs: f64,
    pub size: u32,
    pub position: IndicatorPosition,
    /// Locked indicators ignore drag input
    pub locked: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: POLL_INTERVAL_DEFAULT,
            size: SIZE_DEFAULT,
            position: IndicatorPosition::default(),
            locked: false,
        }
    }
}

impl IndicatorConfig {
    /// Return a copy with every bounded field clamped into range
    pub fn sanitized(mut self) -> Self {
        self.poll_interval_secs = clamp_poll_interval(self.poll_interval_secs);
        self.size = clamp_size(self.size);
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            self.position = IndicatorPosition::default();
        }
        self
    }

    /// True if `sanitized()` would change anything
    pub fn needs_sanitizing(&self) -> bool {
        self.clone().sanitized() != *self
    }

    /// Set the poll interval, clamping it. Returns the value actually stored.
    pub fn set_poll_interval(&mut self, secs: f64) -> f64 {
        self.poll_interval_secs = clamp_poll_interval(secs);
        self.poll_interval_secs
    }

    /// Set the indicator size, clamping it. Returns the value actually stored.
    pub fn set_size(&mut self, size: u32) -> u32 {
        self.size = clamp_size(size);
        self.size
    }

    /// Restore position, size and poll interval defaults.
    /// `enabled` and `locked` are left untouched.
    pub fn reset_layout(&mut self) {
        *self = Self {
            enabled: self.enabled,
            locked: self.locked,
            ..Self::default()
        };
    }
}
