//! Crossfade animator for the indicator's two image layers.
//!
//! The discrete [`VisualState`] flips the moment a transition begins; only the
//! layer opacities blend over [`FADE_DURATION_SECS`]. The incoming layer holds
//! the new state's image and the outgoing layer holds whatever was on screen
//! when the transition began.

use crate::state::{IndicatorTexture, VisualState};

/// Length of a crossfade
pub const FADE_DURATION_SECS: f64 = 0.15;

/// One of the two stacked indicator images
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layer {
    pub texture: Option<IndicatorTexture>,
    pub opacity: f32,
    pub visible: bool,
}

impl Layer {
    fn show(texture: Option<IndicatorTexture>, opacity: f32) -> Self {
        Self {
            texture,
            opacity: opacity.clamp(0.0, 1.0),
            visible: texture.is_some(),
        }
    }

    /// Opacity actually on screen (zero when hidden or empty)
    pub fn effective_opacity(&self) -> f32 {
        if self.visible && self.texture.is_some() {
            self.opacity
        } else {
            0.0
        }
    }
}

/// What the host should draw this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderFrame {
    /// Whole-indicator visibility
    pub visible: bool,
    pub incoming: Layer,
    pub outgoing: Layer,
}

/// An in-flight crossfade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTransition {
    pub from: Option<IndicatorTexture>,
    pub to: Option<IndicatorTexture>,
    /// Opacity of `from` when the fade began (below 1 after an interruption)
    pub from_opacity: f32,
    pub elapsed_secs: f64,
    pub duration_secs: f64,
}

impl FadeTransition {
    pub fn progress(&self) -> f64 {
        self.elapsed_secs / self.duration_secs
    }
}

/// Owns the displayed state and blends between state images.
#[derive(Debug, Clone, Default)]
pub struct CrossfadeAnimator {
    displayed: VisualState,
    fade: Option<FadeTransition>,
    frame: RenderFrame,
}

impl CrossfadeAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displayed(&self) -> VisualState {
        self.displayed
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn fade(&self) -> Option<&FadeTransition> {
        self.fade.as_ref()
    }

    pub fn frame(&self) -> RenderFrame {
        self.frame
    }

    /// Start fading toward `new_state`. Returns false if it is already displayed.
    ///
    /// An in-flight fade is replaced. The image it was fading out becomes the
    /// new outgoing layer at its current opacity, so nothing pops back to full
    /// strength.
    pub fn begin_transition(&mut self, new_state: VisualState) -> bool {
        if new_state == self.displayed {
            return false;
        }

        let (from, from_opacity) = self.snapshot_outgoing();
        let to = new_state.texture();

        tracing::debug!(
            from = %self.displayed,
            to = %new_state,
            from_opacity,
            interrupted = self.fade.is_some(),
            "Indicator transition"
        );

        self.fade = Some(FadeTransition {
            from,
            to,
            from_opacity,
            elapsed_secs: 0.0,
            duration_secs: FADE_DURATION_SECS,
        });
        self.frame = RenderFrame {
            visible: true,
            incoming: Layer::show(to, 0.0),
            outgoing: Layer::show(from, from_opacity),
        };
        self.displayed = new_state;
        true
    }

    /// Advance the active fade, if any.
    pub fn tick(&mut self, delta_secs: f64) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        fade.elapsed_secs += delta_secs.max(0.0);
        let progress = fade.progress();

        if progress < 1.0 {
            let p = progress as f32;
            let fade = *fade;
            self.frame.incoming.opacity = if fade.to.is_some() { p } else { 0.0 };
            self.frame.outgoing.opacity = if fade.from.is_some() {
                (fade.from_opacity * (1.0 - p)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            return;
        }

        let to = fade.to;
        self.fade = None;
        self.frame = match to {
            Some(texture) => RenderFrame {
                visible: true,
                incoming: Layer::show(Some(texture), 1.0),
                outgoing: Layer::default(),
            },
            None => RenderFrame::default(),
        };
    }

    /// Pick the image and opacity the next fade starts from.
    fn snapshot_outgoing(&self) -> (Option<IndicatorTexture>, f32) {
        let Some(fade) = self.fade else {
            return match self.displayed.texture() {
                Some(texture) => (Some(texture), 1.0),
                None => (None, 0.0),
            };
        };

        // Mid-fade: the image fading out carries over at its current opacity.
        // A fade in from Hidden has no such image, so the incoming one is kept.
        let layer = if fade.from.is_some() {
            self.frame.outgoing
        } else {
            self.frame.incoming
        };
        (layer.texture, layer.effective_opacity())
    }
}
