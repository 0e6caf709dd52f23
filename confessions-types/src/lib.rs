//! Persisted record types for the confessions board.
//!
//! The on-disk slot holds a JSON array of [`Confession`] values in
//! newest-first order:
//!
//! ```json
//! [{"id":"…","text":"…","createdAt":"2024-05-01T12:30:00.123Z","read":false}]
//! ```

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque confession identifier.
///
/// New ids are random UUIDs; ids read back from an existing slot are kept
/// verbatim, so older timestamp-style ids stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfessionId(String);

impl ConfessionId {
    /// Generate a fresh, collision-free id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConfessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ConfessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConfessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single anonymous confession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confession {
    pub id: ConfessionId,
    pub text: String,
    /// Creation time, millisecond precision, never changes after insertion.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Confession {
    /// Build an unread confession stamped with the current time.
    ///
    /// `text` is stored as given; trimming and emptiness checks belong to
    /// the store.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ConfessionId::generate(),
            text: text.into(),
            created_at: Utc::now().trunc_subsecs(3),
            read: false,
        }
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix. Input in
/// any offset or precision is normalised to that form on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(serde::de::Error::custom)
    }
}
