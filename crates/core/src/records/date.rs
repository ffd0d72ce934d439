//! Record dates as they arrive from the backend.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const DAY_FORMAT: &str = "%Y-%m-%d";
const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// A record date.
///
/// Unparseable input is kept verbatim so it survives a round trip, but it never
/// resolves to a calendar day and therefore never lands in a date bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDate {
    /// An instant with an explicit offset (RFC 3339).
    Instant(DateTime<FixedOffset>),
    /// A wall-clock time without offset, interpreted in the business timezone.
    Local(NaiveDateTime),
    /// A bare calendar day.
    Day(NaiveDate),
    /// Input that could not be parsed.
    Invalid(String),
}

impl RecordDate {
    /// Parses a date string, never failing.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Instant(instant);
        }
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, DAY_FORMAT) {
            return Self::Day(day);
        }
        LOCAL_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map_or_else(|| Self::Invalid(raw.to_string()), Self::Local)
    }

    /// Returns the calendar day this date falls on in `tz`, if it is valid.
    #[must_use]
    pub fn local_day(&self, tz: Tz) -> Option<NaiveDate> {
        match self {
            Self::Instant(instant) => Some(instant.with_timezone(&tz).date_naive()),
            Self::Local(naive) => Some(naive.date()),
            Self::Day(day) => Some(*day),
            Self::Invalid(_) => None,
        }
    }

    /// Returns true if the date resolves to a calendar day.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

impl Default for RecordDate {
    fn default() -> Self {
        Self::Invalid(String::new())
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl<T: TimeZone> From<DateTime<T>> for RecordDate {
    fn from(instant: DateTime<T>) -> Self {
        Self::Instant(instant.fixed_offset())
    }
}

impl std::fmt::Display for RecordDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instant(instant) => {
                write!(f, "{}", instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Local(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.3f")),
            Self::Day(day) => write!(f, "{}", day.format(DAY_FORMAT)),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(raw) => Self::parse(&raw),
            // Epoch milliseconds.
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map_or_else(|| Self::Invalid(n.to_string()), Self::from),
            Value::Null => Self::default(),
            other => Self::Invalid(other.to_string()),
        })
    }
}
