use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A value read back from the store that is expected to be one of a closed set
/// of variants. Anything the app does not recognise is kept verbatim instead
/// of failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lenient<T> {
    Known(T),
    Unrecognized(String),
}

impl<T> Lenient<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl<T: PartialEq> Lenient<T> {
    pub fn is(&self, other: &T) -> bool {
        self.known().map_or(false, |value| value == other)
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: FromStr> Lenient<T> {
    pub fn parse(raw: &str) -> Self {
        raw.parse::<T>()
            .map(Self::Known)
            .unwrap_or_else(|_| Self::Unrecognized(raw.to_string()))
    }
}

impl<T: fmt::Display> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl<T: fmt::Display> Serialize for Lenient<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Parse error for the closed enums of the feedback model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Lower-cases and folds `_` and spaces into `-` so `In Progress`,
/// `in_progress` and `in-progress` compare equal.
pub(crate) fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackStatus, FeedbackType};

    #[test]
    fn parses_known_values_case_insensitively() {
        let status: Lenient<FeedbackStatus> = serde_json::from_str("\"Resolved\"").unwrap();
        assert_eq!(status, Lenient::Known(FeedbackStatus::Resolved));

        let status: Lenient<FeedbackStatus> = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, Lenient::Known(FeedbackStatus::InProgress));

        let kind: Lenient<FeedbackType> = serde_json::from_str("\"BUG\"").unwrap();
        assert!(kind.is(&FeedbackType::Bug));
    }

    #[test]
    fn keeps_unrecognized_values_verbatim() {
        let kind: Lenient<FeedbackType> = serde_json::from_str("\"Praise\"").unwrap();
        assert_eq!(kind, Lenient::Unrecognized("Praise".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"Praise\"");
        assert!(!kind.is_known());
    }

    #[test]
    fn serializes_known_values_canonically() {
        let status = Lenient::Known(FeedbackStatus::InProgress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in-progress\"");
    }
}
