use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Timestamp strings from form inputs may be
/// `"YYYY-MM-DDTHH:MM"` (no seconds); normalize to a full `DateTime<Utc>`
/// before it reaches the store.
pub fn parse_form_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    for format in formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minute_precision_input() {
        let parsed = parse_form_timestamp("2026-01-15T08:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-01-15T08:30:00+00:00");
    }

    #[test]
    fn parses_full_rfc3339() {
        assert!(parse_form_timestamp("2026-01-15T08:30:00Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_form_timestamp("not-a-date").is_none());
    }
}
