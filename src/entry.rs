//! Leaderboard entries and house tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// House a team belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum House {
    Green,
    Blue,
    Yellow,
    Red,
}

impl House {
    /// All houses in menu order
    pub const ALL: [House; 4] = [House::Green, House::Blue, House::Yellow, House::Red];

    /// Stored tag
    pub fn as_str(&self) -> &'static str {
        match self {
            House::Green => "green",
            House::Blue => "blue",
            House::Yellow => "yellow",
            House::Red => "red",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            House::Green => "Green",
            House::Blue => "Blue",
            House::Yellow => "Yellow",
            House::Red => "Red",
        }
    }

    /// Row/menu color
    pub fn color(&self) -> &'static str {
        match self {
            House::Green => "#4caf50",
            House::Blue => "#2196f3",
            House::Yellow => "#ffeb3b",
            House::Red => "#f44336",
        }
    }

    /// Parse a tag, case-insensitive. Empty means "no house" and yields None.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "green" => Some(House::Green),
            "blue" => Some(House::Blue),
            "yellow" => Some(House::Yellow),
            "red" => Some(House::Red),
            _ => None,
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A saved time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Team name
    pub name: String,
    /// Elapsed milliseconds, stored as a decimal string
    #[serde(with = "time_text")]
    pub time: u64,
    /// Optional house tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<House>,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, time: u64, house: Option<House>) -> Self {
        Self {
            name: name.into(),
            time,
            house,
        }
    }

    /// Row color, if tagged
    pub fn color(&self) -> Option<&'static str> {
        self.house.map(|h| h.color())
    }
}

/// `time` is written as a string; older blobs may hold a bare integer.
mod time_text {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(time)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(TimeVisitor)
    }

    struct TimeVisitor;

    impl Visitor<'_> for TimeVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or integer string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}
