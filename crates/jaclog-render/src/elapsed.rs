//! Human-readable durations for gap markers and session separators

use std::time::Duration;

const MS_PER_SECOND: u128 = 1_000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u128 = 24 * MS_PER_HOUR;

/// Format a duration with the precision that still matters at its scale.
///
/// ```
/// use std::time::Duration;
/// use jaclog_render::humanize;
///
/// assert_eq!(humanize(Duration::from_millis(3_250)), "3.250s");
/// assert_eq!(humanize(Duration::from_secs(125)), "2m 05.000s");
/// ```
pub fn humanize(duration: Duration) -> String {
    let total = duration.as_millis();

    let days = total / MS_PER_DAY;
    let hours = total % MS_PER_DAY / MS_PER_HOUR;
    let minutes = total % MS_PER_HOUR / MS_PER_MINUTE;
    let seconds = total % MS_PER_MINUTE / MS_PER_SECOND;
    let millis = total % MS_PER_SECOND;

    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}.{millis:03}s")
    } else {
        format!("{seconds}.{millis:03}s")
    }
}
