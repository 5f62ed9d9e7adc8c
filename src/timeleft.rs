use std::error::Error;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Recommended recomputation cadence for on-screen time-left displays.
///
/// Minute-granularity text does not need finer ticking. The UI layer owns
/// its own timer; this module schedules nothing.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Progress ratio reported when the elapsed fraction cannot be computed
/// (no `created_at`, or `created_at` not before the deadline).
pub const UNKNOWN_PROGRESS: f64 = 0.5;

/// Snapshot of a task's deadline state at a given instant.
///
/// Pure value: recomputed on demand from `(deadline, created_at, now)`,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStatus {
    /// Signed milliseconds until the deadline; negative means overdue.
    pub remaining_ms: i64,
    /// True iff `remaining_ms <= 0`.
    pub is_overdue: bool,
    /// Human-readable description, e.g. `"2d 3h 10m left"` or `"Late by 1d 4h"`.
    pub display_text: String,
    /// Elapsed fraction of the `created_at`..`deadline` window, clamped to [0,1].
    pub progress_ratio: f64,
}

/// Computes the time-remaining state for a deadline.
///
/// `now` is injected rather than read internally so the function is
/// deterministic and safe to call at any rate. Days, hours, and minutes
/// are all extracted from one captured difference; deriving them from
/// separate clock reads makes the units drift apart.
///
/// # Returns
/// - Overdue (`deadline <= now`): `"Late by ..."` text listing the
///   non-zero units, `progress_ratio` pinned to 1.0.
/// - Remaining: `"... left"` text (minutes always shown), `progress_ratio`
///   from `created_at`, or [`UNKNOWN_PROGRESS`] when that window is unknown.
pub fn compute_time_status(
    deadline: DateTime<Utc>,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TimeStatus {
    let diff = (deadline - now).num_milliseconds();

    if diff <= 0 {
        // At the deadline exactly counts as late.
        let late = diff.abs();
        let days = late / MS_PER_DAY;
        let hours = (late % MS_PER_DAY) / MS_PER_HOUR;
        let minutes = (late % MS_PER_HOUR) / MS_PER_MINUTE;

        let mut parts = Vec::new();
        if days > 0 {
            parts.push(format!("{}d", days));
        }
        if hours > 0 {
            parts.push(format!("{}h", hours));
        }
        // Minutes keep the text non-empty when nothing larger applies.
        if minutes > 0 || parts.is_empty() {
            parts.push(format!("{}m", minutes));
        }

        return TimeStatus {
            remaining_ms: diff,
            is_overdue: true,
            display_text: format!("Late by {}", parts.join(" ")),
            progress_ratio: 1.0,
        };
    }

    let days = diff / MS_PER_DAY;
    let hours = (diff % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (diff % MS_PER_HOUR) / MS_PER_MINUTE;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    parts.push(format!("{}m", minutes));

    let progress_ratio = match created_at {
        Some(created) if deadline > created => {
            let window = (deadline - created).num_milliseconds() as f64;
            let elapsed = (now - created).num_milliseconds() as f64;
            (elapsed / window).clamp(0.0, 1.0)
        }
        _ => UNKNOWN_PROGRESS,
    };

    TimeStatus {
        remaining_ms: diff,
        is_overdue: false,
        display_text: format!("{} left", parts.join(" ")),
        progress_ratio,
    }
}

/// A string that could not be read as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimestamp(pub String);

impl fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a recognized timestamp", self.0)
    }
}

impl Error for InvalidTimestamp {}

/// Parses a user-supplied deadline into a UTC timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`,
/// `YYYY-MM-DD HH:MM:SS`, and bare `YYYY-MM-DD` (taken as the end of
/// that day, 23:59). Naive inputs are treated as UTC; no timezone
/// inference or partial-string recovery is attempted.
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>, InvalidTimestamp> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        // A bare date means "due that day", not the preceding midnight.
        let end_of_day = date.and_hms_opt(23, 59, 0).unwrap();
        return Ok(Utc.from_utc_datetime(&end_of_day));
    }

    Err(InvalidTimestamp(input.to_string()))
}
