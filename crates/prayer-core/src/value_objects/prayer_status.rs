//! Lifecycle status of a prayer request

use serde::{Deserialize, Serialize};
use std::fmt;

/// `Pending` is the initial state and `Answered` is terminal.
/// `Closed` is stored and rendered but no operation moves a request into it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerStatus {
    #[default]
    Pending,
    Answered,
    Closed,
}

impl PrayerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Answered => "answered",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "answered" => Some(Self::Answered),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for PrayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_as_str() {
        for status in [
            PrayerStatus::Pending,
            PrayerStatus::Answered,
            PrayerStatus::Closed,
        ] {
            assert_eq!(PrayerStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PrayerStatus::parse("Pending"), None);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PrayerStatus::Answered).unwrap(),
            "\"answered\""
        );
        assert_eq!(PrayerStatus::default(), PrayerStatus::Pending);
    }
}
