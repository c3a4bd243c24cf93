//! Discrete indicator states and the tracking context they are derived from.

use std::fmt;

/// What the indicator is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    #[default]
    Hidden,
    OutOfRange,
    InRangeFront,
    InRangeBehind,
}

/// The three images the indicator can display.
///
/// `Hidden` has no image, which is why this is a separate type from
/// [`VisualState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorTexture {
    OutOfRange,
    InRangeFront,
    InRangeBehind,
}

impl VisualState {
    /// Image shown for this state, `None` for `Hidden`
    pub fn texture(self) -> Option<IndicatorTexture> {
        match self {
            Self::Hidden => None,
            Self::OutOfRange => Some(IndicatorTexture::OutOfRange),
            Self::InRangeFront => Some(IndicatorTexture::InRangeFront),
            Self::InRangeBehind => Some(IndicatorTexture::InRangeBehind),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::OutOfRange => "out_of_range",
            Self::InRangeFront => "in_range_front",
            Self::InRangeBehind => "in_range_behind",
        }
    }

    /// Parse the snake_case name produced by [`VisualState::as_str`]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hidden" => Some(Self::Hidden),
            "out_of_range" => Some(Self::OutOfRange),
            "in_range_front" => Some(Self::InRangeFront),
            "in_range_behind" => Some(Self::InRangeBehind),
            _ => None,
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IndicatorTexture {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OutOfRange => "out_of_range",
            Self::InRangeFront => "in_range_front",
            Self::InRangeBehind => "in_range_behind",
        }
    }
}

impl fmt::Display for IndicatorTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracking flags for the current target.
///
/// Invariants (upheld by the mutators, fields are read-only outside the crate):
/// - `has_valid_target` implies `is_tracking`
/// - `in_melee` and `is_behind` are false without a valid target
/// - `is_behind` implies `in_melee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingContext {
    pub(crate) is_tracking: bool,
    pub(crate) has_valid_target: bool,
    pub(crate) in_melee: bool,
    pub(crate) is_behind: bool,
}

impl TrackingContext {
    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    pub fn has_valid_target(&self) -> bool {
        self.has_valid_target
    }

    pub fn in_melee(&self) -> bool {
        self.in_melee
    }

    pub fn is_behind(&self) -> bool {
        self.is_behind
    }

    /// Begin tracking a freshly acquired target with no range information yet
    pub(crate) fn begin(&mut self) {
        *self = Self {
            is_tracking: true,
            has_valid_target: true,
            in_melee: false,
            is_behind: false,
        };
    }

    /// Drop everything
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Store a new positional reading. Returns true if anything changed.
    pub(crate) fn update_position(&mut self, in_melee: bool, is_behind: bool) -> bool {
        if !self.has_valid_target {
            return false;
        }
        let is_behind = in_melee && is_behind;
        if self.in_melee == in_melee && self.is_behind == is_behind {
            return false;
        }
        self.in_melee = in_melee;
        self.is_behind = is_behind;
        true
    }
}

/// Map the tracking flags to the state the indicator should show.
///
/// Total over every combination of inputs.
pub fn classify(enabled: bool, ctx: &TrackingContext) -> VisualState {
    match (enabled && ctx.has_valid_target, ctx.in_melee, ctx.is_behind) {
        (false, _, _) => VisualState::Hidden,
        (true, false, _) => VisualState::OutOfRange,
        (true, true, true) => VisualState::InRangeBehind,
        (true, true, false) => VisualState::InRangeFront,
    }
}
