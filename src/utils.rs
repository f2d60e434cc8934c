//! Small shared utilities.

/// Render seconds-from-midnight as `HH:MM:SS`, or `HH:MM:SS.ffffff` with
/// `display_micros`.
#[must_use]
pub fn format_timestamp(seconds_from_midnight: f64, display_micros: bool) -> String {
    let whole = seconds_from_midnight as u64;
    let hours = whole / 3600;
    let mins = (whole % 3600) / 60;
    let secs = whole % 60;
    if display_micros {
        let micros = ((seconds_from_midnight - whole as f64) * 1_000_000.0) as u64;
        format!("{hours:02}:{mins:02}:{secs:02}.{micros:06}")
    } else {
        format!("{hours:02}:{mins:02}:{secs:02}")
    }
}
