use crate::models::lenient::{normalize, UnknownVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    #[serde(alias = "Bug")]
    Bug, // something is broken
    #[serde(alias = "Feature")]
    Feature, // a request for something new
    #[default]
    #[serde(alias = "General")]
    General,
    #[serde(alias = "Other")]
    Other,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 4] = [Self::General, Self::Bug, Self::Feature, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::General => "general",
            Self::Other => "other",
        }
    }

    /// Label shown in the type picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bug => "Bug Report",
            Self::Feature => "Feature Request",
            Self::General => "General",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "general" => Ok(Self::General),
            "other" => Ok(Self::Other),
            _ => Err(UnknownVariant {
                kind: "feedback type",
                value: s.to_string(),
            }),
        }
    }
}
