//! Timezone-aware timestamps for filenames and notifications

use chrono::Utc;
use chrono_tz::Tz;
use tracing::warn;

/// Resolve an IANA timezone name, falling back to UTC with a warning.
pub fn resolve_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        warn!("Unknown timezone '{}', defaulting to UTC", name);
        chrono_tz::UTC
    })
}

/// Timestamp for backup filenames: `dd-mm-yyyy-hh-mm-ss`.
pub fn file_timestamp(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format("%d-%m-%Y-%H-%M-%S").to_string()
}

/// Human-readable timestamp for webhook messages.
pub fn readable_timestamp(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

/// ISO-8601 timestamp for webhook embeds.
pub fn iso_timestamp(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).to_rfc3339()
}
