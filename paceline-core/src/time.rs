use crate::error::{Error, Result};

/// Parses an "mm:ss" start offset into whole seconds. Exactly two
/// colon-separated base-10 fields; surrounding whitespace is tolerated.
pub fn parse_time(text: &str) -> Result<u64> {
    let mut fields = text.split(':');
    let (mins, secs) = match (fields.next(), fields.next(), fields.next()) {
        (Some(m), Some(s), None) => (m, s),
        _ => return Err(Error::InvalidTime(text.to_string())),
    };
    let mins: u64 = mins
        .trim()
        .parse()
        .map_err(|_| Error::InvalidTime(text.to_string()))?;
    let secs: u64 = secs
        .trim()
        .parse()
        .map_err(|_| Error::InvalidTime(text.to_string()))?;
    mins.checked_mul(60)
        .and_then(|m| m.checked_add(secs))
        .ok_or_else(|| Error::InvalidTime(text.to_string()))
}

/// Formats whole seconds as zero-padded "mm:ss". There is no hour field;
/// the minute field just grows past 99.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_time("02:30").unwrap(), 150);
        assert_eq!(parse_time("0:90").unwrap(), 90);
    }

    #[test]
    fn tolerates_field_whitespace() {
        assert_eq!(parse_time(" 1 : 05 ").unwrap(), 65);
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_time("90").is_err());
        assert!(parse_time("1:2:3").is_err());
        assert!(parse_time("aa:bb").is_err());
        assert!(parse_time("").is_err());
    }

    #[test]
    fn rejects_times_that_overflow() {
        // u64::MAX minutes overflows the multiply
        assert!(parse_time("18446744073709551615:00").is_err());
        // largest minute count whose multiply fits, pushed over by seconds
        assert!(parse_time("307445734561825860:16").is_err());
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn round_trips_canonical_strings() {
        for s in ["00:00", "00:10", "02:05", "59:59"] {
            assert_eq!(format_time(parse_time(s).unwrap()), s);
        }
    }
}
