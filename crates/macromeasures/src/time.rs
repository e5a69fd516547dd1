//! Unix-seconds timestamp codec.
//!
//! Every time value in a Macromeasures payload travels as a base-10 count of
//! seconds since the Unix epoch. The API quotes them (`"1472083200"`), but a
//! bare integer literal is accepted too. Encoding always emits the quoted
//! form so that a decoded response can be re-serialized unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MacromeasuresError;

/// An absolute UTC instant carried as Unix seconds on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Builds a timestamp from whole Unix seconds. Returns `None` when the
    /// value is outside the range `chrono` can represent.
    #[must_use]
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    #[must_use]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds since the epoch, clamped to zero for earlier instants.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp().max(0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

/// Parses a base-10 Unix-seconds string into a [`Timestamp`].
///
/// # Errors
///
/// Returns [`MacromeasuresError::TimestampFormat`] if `raw` is not a base-10
/// integer or the value is out of range.
pub fn parse_unix_timestamp(raw: &str) -> Result<Timestamp, MacromeasuresError> {
    let secs = raw
        .parse::<i64>()
        .map_err(|e| MacromeasuresError::TimestampFormat(format!("{raw:?}: {e}")))?;
    Timestamp::from_unix(secs).ok_or_else(|| out_of_range(format!("{raw:?}")))
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.unix_seconds().to_string())
    }
}

fn out_of_range(v: impl fmt::Display) -> MacromeasuresError {
    MacromeasuresError::TimestampFormat(format!("{v}: out of range"))
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unix seconds as a quoted or bare base-10 integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        parse_unix_timestamp(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Timestamp::from_unix(v).ok_or_else(|| E::custom(out_of_range(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        let secs = i64::try_from(v).map_err(|_| E::custom(out_of_range(v)))?;
        self.visit_i64(secs)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}
