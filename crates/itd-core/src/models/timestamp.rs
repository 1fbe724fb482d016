//! Timestamp decoding.
//!
//! The API emits Postgres-style timestamps: a space or `T` separator and an
//! offset that may be abbreviated to hours (`+03`). Both are normalized
//! before RFC 3339 parsing. Timestamps without an offset are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// A timestamp with the offset the server sent.
pub type Timestamp = DateTime<FixedOffset>;

/// Parse an API timestamp.
pub fn parse(raw: &str) -> Option<Timestamp> {
    let normalized = normalize(raw);
    if let Ok(ts) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(ts);
    }
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

fn normalize(raw: &str) -> String {
    let mut s = raw.trim().replacen(' ', "T", 1);
    if let Some(idx) = s.rfind('+') {
        let offset = &s[idx + 1..];
        if !offset.is_empty() && offset.len() <= 2 && offset.bytes().all(|b| b.is_ascii_digit()) {
            let hours = format!("{offset:0>2}:00");
            s.truncate(idx + 1);
            s.push_str(&hours);
        }
    }
    s
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339())
}

/// `Option<Timestamp>` variant for `#[serde(with = ...)]`.
pub mod option {
    use super::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(ts: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn short_offset_is_expanded() {
        let ts = parse("2026-01-15 12:30:00.123+03").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn single_digit_offset_is_padded() {
        let ts = parse("2026-01-15T12:30:00+3").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn rfc3339_passes_through() {
        let ts = parse("2026-01-15T12:30:00Z").unwrap();
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.offset().local_minus_utc(), 0);

        let ts = parse("2026-01-15T12:30:00+05:30").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 5 * 3600 + 1800);
    }

    #[test]
    fn missing_offset_is_utc() {
        let ts = parse("2026-01-15T12:30:00.5").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("yesterday").is_none());
    }
}
