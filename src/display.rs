/// Render a second count as `HH:MM:SS` when there is at least one hour,
/// otherwise `MM:SS`.
pub fn format_countdown(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Fraction of the session already elapsed, in `[0, 1]`.
pub fn progress_ratio(original_secs: u64, remaining_secs: u64) -> f64 {
    if original_secs == 0 {
        return 0.0;
    }
    let elapsed = original_secs.saturating_sub(remaining_secs);
    (elapsed as f64 / original_secs as f64).clamp(0.0, 1.0)
}

/// Accumulated focus time for the stats panel: `"2h 5m"` or `"45m"`.
pub fn format_total_time(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
