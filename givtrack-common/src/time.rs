//! Time formatting helpers

use chrono::{DateTime, Utc};

/// Render a story timestamp the way the reader screens show it, e.g. "Nov 16 2021"
pub fn format_story_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d %Y").to_string()
}
