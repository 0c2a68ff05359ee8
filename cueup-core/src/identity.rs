//! Identity and timestamp types for cueup records.

use chrono::{NaiveDateTime, Timelike, Utc};
use uuid::Uuid;

/// Record identifier: 32 lowercase hex characters (a hyphenless UUIDv4).
/// Stored and transported as a plain string, matching the document store's
/// native id representation.
pub type RecordId = String;

/// Timestamp type for score records. Wall-clock date/time with no zone,
/// truncated to minute precision everywhere it is produced.
pub type Timestamp = NaiveDateTime;

/// Wire format for score timestamps, e.g. `25/03/2025 19:04`.
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Generate a new random RecordId.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().simple().to_string()
}

/// Drop seconds and sub-second precision from a timestamp.
pub fn truncate_to_minute(at: Timestamp) -> Timestamp {
    // with_second(0)/with_nanosecond(0) cannot fail for zero values.
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

/// Current UTC wall-clock time at minute precision.
pub fn now_to_minute() -> Timestamp {
    truncate_to_minute(Utc::now().naive_utc())
}

/// Serde module for `Timestamp` fields using [`DATE_TIME_FORMAT`].
pub mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, DATE_TIME_FORMAT};

    pub fn serialize<S>(at: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&at.format(DATE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde module for `Option<Timestamp>` fields using [`DATE_TIME_FORMAT`].
/// Pair with `#[serde(default)]` so absent fields deserialize to `None`.
pub mod datetime_format_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, DATE_TIME_FORMAT};

    pub fn serialize<S>(at: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match at {
            Some(at) => serializer.serialize_some(&at.format(DATE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|r| {
            NaiveDateTime::parse_from_str(&r, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
