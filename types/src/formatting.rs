//! Number formatting for status output.
//!
//! Replay logs and the `status` command print through these helpers so the
//! same value always renders the same way.

/// Format a duration in seconds with two decimals and an `s` suffix.
///
/// # Examples
/// ```
/// use meleeguard_types::formatting::format_secs;
/// assert_eq!(format_secs(0.1), "0.10s");
/// ```
pub fn format_secs(secs: f64) -> String {
    format!("{:.2}s", secs)
}

/// Format an opacity in `[0, 1]` as a whole percentage.
///
/// Values outside the range are clamped first.
///
/// # Examples
/// ```
/// use meleeguard_types::formatting::format_opacity;
/// assert_eq!(format_opacity(0.0), "0%");
/// assert_eq!(format_opacity(0.333), "33%");
/// assert_eq!(format_opacity(1.2), "100%");
/// ```
pub fn format_opacity(opacity: f32) -> String {
    format!("{:.0}%", opacity.clamp(0.0, 1.0) * 100.0)
}

/// Format a probe distance in melee units.
///
/// # Examples
/// ```
/// use meleeguard_types::formatting::format_distance;
/// assert_eq!(format_distance(Some(5.0)), "5.00");
/// assert_eq!(format_distance(None), "n/a");
/// ```
pub fn format_distance(distance: Option<f32>) -> String {
    match distance {
        Some(d) => format!("{:.2}", d),
        None => "n/a".to_string(),
    }
}

/// Render a boolean as `yes`/`no`.
#[inline]
pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
