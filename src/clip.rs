use chrono::{DateTime, NaiveDateTime, Utc};

use crate::text::ClipTruncator;

pub type ClipId = i64;

/// Identity of a clip that has not been stored yet.
pub const UNSET_ID: ClipId = 0;

pub const TITLE_MAX_CHARS: usize = 30;
pub const CONTENT_MAX_CHARS: usize = 5000;

/// Storage format for timestamps. Fixed width so text order matches time order.
pub const STORED_TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const LEGACY_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub id: ClipId,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl Clip {
    /// A new, unsaved, active clip with every timestamp set to `now`.
    pub fn new(title: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: UNSET_ID,
            title: title.into(),
            content: content.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_used_at: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == UNSET_ID
    }

    /// Copy of this clip's title, content and status under fresh timestamps.
    pub fn duplicated(&self, now: DateTime<Utc>) -> Self {
        Self {
            is_active: self.is_active,
            ..Self::new(self.title.clone(), self.content.clone(), now)
        }
    }

    pub fn preview(&self, truncator: &ClipTruncator, max_lines: usize, width: usize) -> String {
        truncator.truncate(&self.content, max_lines, width)
    }

    /// First non-blank line of the content, trimmed.
    pub fn first_line(&self) -> &str {
        self.content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn format_stored(ts: &DateTime<Utc>) -> String {
    ts.format(STORED_TIME_FMT).to_string()
}

pub fn parse_stored(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(ts).map(|dt| dt.with_timezone(&Utc)))
        .or_else(|_| DateTime::parse_from_str(ts, LEGACY_TIME_FMT).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn new_clip_is_active_and_unsaved() {
        let clip = Clip::new("T", "C", at(0));
        assert!(clip.is_new());
        assert!(clip.is_active);
        assert_eq!(clip.created_at, clip.updated_at);
        assert_eq!(clip.updated_at, clip.last_used_at);
    }

    #[test]
    fn duplicated_keeps_status_and_resets_identity() {
        let mut clip = Clip::new("T", "C", at(0));
        clip.id = 7;
        clip.is_active = false;
        let copy = clip.duplicated(at(60));
        assert!(copy.is_new());
        assert!(!copy.is_active);
        assert_eq!(copy.title, "T");
        assert_eq!(copy.content, "C");
        assert_eq!(copy.created_at, at(60));
        assert_eq!(copy.last_used_at, at(60));
    }

    #[test]
    fn first_line_skips_blank_lines() {
        let clip = Clip::new("T", "\n  \n  body line \nmore", at(0));
        assert_eq!(clip.first_line(), "body line");
    }

    #[test]
    fn stored_timestamps_round_trip_and_sort() {
        let early = at(0) + Duration::microseconds(5);
        let late = at(1);
        let (a, b) = (format_stored(&early), format_stored(&late));
        assert!(a < b);
        assert_eq!(a.len(), b.len());
        assert_eq!(parse_stored(&a), Some(early));
    }

    #[test]
    fn parse_stored_accepts_legacy_formats() {
        assert_eq!(parse_stored("2023-11-14T22:13:20+00:00"), Some(at(0)));
        assert_eq!(parse_stored("2023-11-14 22:13:20.000+00:00"), Some(at(0)));
        assert_eq!(parse_stored("yesterday"), None);
    }
}
