//! Clock-style rendering of log durations for timeline and playback displays.

/// Format a millisecond duration as `MM:SS`, or `H:MM:SS` once it reaches an
/// hour. Sub-second remainders are truncated.
pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
