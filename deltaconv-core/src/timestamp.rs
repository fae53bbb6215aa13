//! Parsing user timestamps and converting them to the endpoint's epoch format.

use crate::source::FetchError;
use chrono::{Local, NaiveDateTime, TimeZone, Timelike, Utc};

/// Accepted input format for `--start` / `--end`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How naive wall-clock timestamps map to instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeBasis {
    /// The host's local time zone.
    #[default]
    Local,
    Utc,
}

impl TimeBasis {
    /// Milliseconds since the Unix epoch, with sub-second precision dropped
    /// before scaling (the endpoint only sees whole seconds).
    pub fn epoch_millis(&self, ts: NaiveDateTime) -> Result<i64, FetchError> {
        let secs = match self {
            TimeBasis::Utc => Utc.from_utc_datetime(&ts).timestamp(),
            TimeBasis::Local => zoned_epoch_secs(&Local, ts)?,
        };
        Ok(secs * 1000)
    }

    /// Current wall-clock time under this basis, truncated to whole seconds.
    pub fn now(&self) -> NaiveDateTime {
        let now = match self {
            TimeBasis::Local => Local::now().naive_local(),
            TimeBasis::Utc => Utc::now().naive_utc(),
        };
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Seconds since the epoch for a wall-clock time in `tz`. A time skipped by a
/// DST jump is an error; a repeated one resolves to its earlier instant.
fn zoned_epoch_secs<Tz: TimeZone>(tz: &Tz, ts: NaiveDateTime) -> Result<i64, FetchError> {
    tz.from_local_datetime(&ts)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or(FetchError::NonexistentLocalTime(ts))
}

/// Parse a `YYYY-MM-DD HH:MM:SS` value; `field` names the argument in the
/// error message.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, FetchError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        FetchError::InvalidTimestamp {
            field,
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowPlan;
    use chrono::NaiveDate;
    use chrono_tz::America::Sao_Paulo;
    use chrono_tz::Europe::Berlin;

    fn at(value: &str) -> NaiveDateTime {
        parse_timestamp("start", value).unwrap()
    }

    #[test]
    fn parses_full_timestamp() {
        let ts = parse_timestamp("start", "2018-01-05 00:30:00").unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2018, 1, 5)
                .unwrap()
                .and_hms_opt(0, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn date_only_is_rejected() {
        let err = parse_timestamp("start", "2018-01-05").unwrap_err();
        assert!(matches!(
            err,
            FetchError::InvalidTimestamp { field: "start", .. }
        ));
    }

    #[test]
    fn iso_t_separator_is_rejected() {
        assert!(parse_timestamp("end", "2018-01-05T00:30:00").is_err());
    }

    #[test]
    fn utc_epoch_millis() {
        let ts = parse_timestamp("start", "2018-01-05 00:00:00").unwrap();
        assert_eq!(TimeBasis::Utc.epoch_millis(ts).unwrap(), 1_515_110_400_000);
    }

    #[test]
    fn epoch_millis_drops_subseconds() {
        let ts = parse_timestamp("start", "2018-01-05 00:00:00").unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(TimeBasis::Utc.epoch_millis(ts).unwrap(), 1_515_110_400_000);
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(TimeBasis::Utc.now().nanosecond(), 0);
    }

    #[test]
    fn dst_gap_is_an_error() {
        // Sao Paulo jumped from 00:00 to 01:00 on 2018-11-04.
        let err = zoned_epoch_secs(&Sao_Paulo, at("2018-11-04 00:30:00")).unwrap_err();
        assert!(matches!(err, FetchError::NonexistentLocalTime(ts) if ts == at("2018-11-04 00:30:00")));
    }

    #[test]
    fn times_around_dst_gap_convert() {
        assert_eq!(
            zoned_epoch_secs(&Sao_Paulo, at("2018-11-03 23:59:59")).unwrap(),
            1_541_300_399
        );
        assert_eq!(
            zoned_epoch_secs(&Sao_Paulo, at("2018-11-04 01:00:00")).unwrap(),
            1_541_300_400
        );
    }

    #[test]
    fn repeated_hour_resolves_to_earlier_instant() {
        // Sao Paulo fell back from 00:00 to 23:00 on 2019-02-17, so 23:30 on
        // the 16th happened twice: at -02 and again at -03.
        assert_eq!(
            zoned_epoch_secs(&Sao_Paulo, at("2019-02-16 23:30:00")).unwrap(),
            1_550_367_000
        );
    }

    #[test]
    fn midnight_boundary_on_gap_day_converts() {
        // Berlin skipped 02:00..03:00 on 2018-03-25.
        assert_eq!(
            zoned_epoch_secs(&Berlin, at("2018-03-25 00:00:00")).unwrap(),
            1_521_932_400
        );
        assert!(zoned_epoch_secs(&Berlin, at("2018-03-25 02:30:00")).is_err());
    }

    #[test]
    fn window_boundaries_across_gap_convert() {
        let plan = WindowPlan::new(at("2018-03-20 15:00:00"), at("2018-05-01 00:00:00")).unwrap();
        for window in plan {
            zoned_epoch_secs(&Berlin, window.start).unwrap();
            zoned_epoch_secs(&Berlin, window.end).unwrap();
        }
    }
}
