use chrono::{DateTime, Utc};

/// Single typed boundary parse for every instant that arrives as a string
/// (QR payloads, stored event documents). Anything that is not a valid
/// ISO-8601 timestamp becomes `None`; downstream rules only ever see
/// `Option<DateTime<Utc>>`.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Whole minutes from `now` until `instant`, rounded up so "29 minutes and
/// 40 seconds" reads as 30.
pub fn minutes_until(now: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    let seconds = (instant - now).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + 59) / 60
}

/// Serde adapter for optional instants crossing the storage/wire boundary.
/// Serializes as an RFC 3339 string; deserializes leniently, mapping
/// missing, null, or unparseable values to `None` via [`parse_instant`].
pub mod lenient_instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::parse_instant;

    pub fn serialize<S>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => serializer.serialize_str(&instant.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_instant))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn parse_instant_accepts_rfc3339() {
        let parsed = parse_instant("2026-03-14T09:30:00Z").expect("parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap());
    }

    #[test]
    fn parse_instant_accepts_offset_timestamps() {
        let parsed = parse_instant("2026-03-14T17:30:00+08:00").expect("parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap());
    }

    #[test]
    fn parse_instant_rejects_garbage() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("   ").is_none());
        assert!(parse_instant("not-a-date").is_none());
        assert!(parse_instant("2026-13-40T99:00:00Z").is_none());
    }

    #[test]
    fn minutes_until_rounds_up() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        assert_eq!(minutes_until(now, start), 30);

        let start = Utc.with_ymd_and_hms(2026, 3, 14, 9, 29, 40).unwrap();
        assert_eq!(minutes_until(now, start), 30);

        let past = Utc.with_ymd_and_hms(2026, 3, 14, 8, 0, 0).unwrap();
        assert_eq!(minutes_until(now, past), 0);
    }
}
