//! Clock-time helpers.
//!
//! Configuration stores clock times as `"HH:MM"` strings; the serde adapters
//! here keep the TOML readable and accept `"HH:MM:SS"` as well.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Build a clock time from hours and minutes, falling back to midnight for
/// out-of-range input.
pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Truncate a timestamp down to the previous `grid_minutes` boundary,
/// dropping seconds.
pub fn snap_to_grid(dt: NaiveDateTime, grid_minutes: u32) -> NaiveDateTime {
    let grid = grid_minutes.max(1);
    let minute = (dt.minute() / grid) * grid;
    dt.date().and_time(hm(dt.hour(), minute))
}

/// Format a clock time as `h:mm AM`, without a leading zero.
pub fn fmt_ampm(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Parse `"HH:MM"` or `"HH:MM:SS"`.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Combine a date and a clock time.
pub fn at(date: NaiveDate, t: NaiveTime) -> NaiveDateTime {
    date.and_time(t)
}

/// Serde adapter for `NaiveTime` as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid clock time '{raw}', expected HH:MM")))
    }
}

/// Serde adapter for `Option<NaiveTime>` as `"HH:MM"`.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_some(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => super::parse_hhmm(&raw).map(Some).ok_or_else(|| {
                de::Error::custom(format!("invalid clock time '{raw}', expected HH:MM"))
            }),
            None => Ok(None),
        }
    }
}

/// Serde adapter for `Vec<NaiveTime>` as a list of `"HH:MM"` strings.
pub mod hhmm_list {
    use chrono::NaiveTime;
    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(times: &[NaiveTime], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(times.len()))?;
        for t in times {
            seq.serialize_element(&t.format("%H:%M").to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<NaiveTime>, D::Error> {
        Vec::<String>::deserialize(d)?
            .into_iter()
            .map(|raw| {
                super::parse_hhmm(&raw).ok_or_else(|| {
                    de::Error::custom(format!("invalid clock time '{raw}', expected HH:MM"))
                })
            })
            .collect()
    }
}
