//! Proximity classifier: turns probe readings into tracking flags.
//!
//! A poll that fails to read distance changes nothing, so a flaky probe keeps
//! showing the last known state instead of flickering.

use crate::probe::{Probe, TargetRef};
use crate::state::TrackingContext;

/// Distances below this count as melee range (absorbs engine quantization at zero)
pub const MELEE_EPSILON: f32 = 0.01;

/// Result of a single poll step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Distance query failed; flags untouched
    NoData,
    /// Readings matched the stored flags
    Unchanged,
    /// `in_melee` or `is_behind` changed; the state needs reclassifying
    Changed,
}

/// Query the probe and fold the result into `ctx`.
pub fn poll<P: Probe>(ctx: &mut TrackingContext, probe: &mut P, target: &TargetRef) -> PollOutcome {
    let distance = match probe.melee_distance(target) {
        Ok(distance) => distance,
        Err(e) => {
            tracing::trace!(error = %e, "Distance query failed, keeping last reading");
            return PollOutcome::NoData;
        }
    };

    let in_melee = distance < MELEE_EPSILON;
    let is_behind = in_melee
        && probe.is_behind(target).unwrap_or_else(|e| {
            tracing::trace!(error = %e, "Facing query failed, assuming front");
            false
        });

    if ctx.update_position(in_melee, is_behind) {
        tracing::debug!(distance, in_melee, is_behind, "Target position changed");
        PollOutcome::Changed
    } else {
        PollOutcome::Unchanged
    }
}
