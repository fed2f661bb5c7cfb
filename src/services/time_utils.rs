use chrono::{DateTime, Utc};

/// Converts a USGS millisecond timestamp into a UTC datetime.
///
/// Missing values stay missing, as do timestamps outside chrono's range.
pub fn parse_unix_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_unix_millis() {
        let parsed = parse_unix_millis(Some(1_700_000_000_123)).unwrap();

        assert_eq!(parsed.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(
            parsed,
            Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap()
        );
    }

    #[test]
    fn test_parse_unix_millis_epoch() {
        assert_eq!(
            parse_unix_millis(Some(0)),
            Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_unix_millis_round_trips() {
        for millis in [1, 999, 1_000, 86_400_000, 1_577_836_800_001, 4_102_444_800_000] {
            let parsed = parse_unix_millis(Some(millis)).unwrap();
            assert_eq!(parsed.timestamp_millis(), millis);
        }
    }

    #[test]
    fn test_parse_unix_millis_none() {
        assert_eq!(parse_unix_millis(None), None);
    }

    #[test]
    fn test_parse_unix_millis_out_of_range() {
        assert_eq!(parse_unix_millis(Some(i64::MAX)), None);
    }
}
