//! Identifiers shared between the host and the providers.

use serde::{Deserialize, Serialize};

/// Identifier the host assigns to one complication slot on a watch face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub i32);

impl InstanceId {
    /// Raw value, used as the request code of generated tap targets.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for InstanceId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Display capability requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplicationType {
    /// A short text with an optional tap action
    ShortText,
    /// A bounded numeric value drawn as a ring, with a label
    RangedValue,
}

impl ComplicationType {
    /// Kebab-case name used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortText => "short-text",
            Self::RangedValue => "ranged-value",
        }
    }
}

impl std::fmt::Display for ComplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplicationType {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short-text" | "short_text" => Ok(Self::ShortText),
            "ranged-value" | "ranged_value" => Ok(Self::RangedValue),
            _ => Err(ParseIdError::ComplicationType(s.to_string())),
        }
    }
}

/// Identity of a complication data source.
///
/// The host addresses refresh requests by this identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    /// Tappable emoji opening the exercise screen
    ExerciseShortcut,
    /// Ring of today's progress against the adjusted daily goal
    DailyProgress,
    /// Ring of today's worn minutes against a fixed goal
    WearTime,
    /// Restart prompt shown while the background service heartbeat is stale
    ServiceAlive,
}

impl ProviderId {
    /// All providers, in registration order.
    pub const ALL: [ProviderId; 4] = [
        ProviderId::ExerciseShortcut,
        ProviderId::DailyProgress,
        ProviderId::WearTime,
        ProviderId::ServiceAlive,
    ];

    /// Kebab-case name used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExerciseShortcut => "exercise-shortcut",
            Self::DailyProgress => "daily-progress",
            Self::WearTime => "wear-time",
            Self::ServiceAlive => "service-alive",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| ParseIdError::Provider(s.to_string()))
    }
}

/// Failure to parse an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    /// Unknown provider name
    #[error("unknown provider: {0}")]
    Provider(String),

    /// Unknown complication type
    #[error("unknown complication type: {0}")]
    ComplicationType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_parse() {
        assert_eq!("wear-time".parse::<ProviderId>().unwrap(), ProviderId::WearTime);
        assert_eq!("SERVICE_ALIVE".parse::<ProviderId>().unwrap(), ProviderId::ServiceAlive);
        assert!("clock".parse::<ProviderId>().is_err());
    }

    #[test]
    fn test_provider_id_display_matches_parse() {
        for id in ProviderId::ALL {
            assert_eq!(id.to_string().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn test_complication_type_parse() {
        assert_eq!("ranged-value".parse::<ComplicationType>().unwrap(), ComplicationType::RangedValue);
        assert_eq!("short_text".parse::<ComplicationType>().unwrap(), ComplicationType::ShortText);
        assert_eq!(
            "long-text".parse::<ComplicationType>(),
            Err(ParseIdError::ComplicationType("long-text".to_string()))
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ProviderId::DailyProgress).unwrap();
        assert_eq!(json, "\"daily-progress\"");
        let json = serde_json::to_string(&ComplicationType::ShortText).unwrap();
        assert_eq!(json, "\"short-text\"");
    }
}
