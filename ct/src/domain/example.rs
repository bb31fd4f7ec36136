//! Example posts, one per category

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of an example post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExampleCategory {
    Professional,
    PolicyAlert,
    MinorIssues,
}

impl ExampleCategory {
    /// All categories, in button order
    pub const ALL: [ExampleCategory; 3] = [
        ExampleCategory::PolicyAlert,
        ExampleCategory::MinorIssues,
        ExampleCategory::Professional,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            ExampleCategory::Professional => "Professional",
            ExampleCategory::PolicyAlert => "Policy Alert",
            ExampleCategory::MinorIssues => "Minor Issues",
        }
    }

    /// Wire field name
    pub fn key(self) -> &'static str {
        match self {
            ExampleCategory::Professional => "professional",
            ExampleCategory::PolicyAlert => "policyAlert",
            ExampleCategory::MinorIssues => "minorIssues",
        }
    }
}

impl fmt::Display for ExampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Why an example payload was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExampleSetError {
    #[error("missing or empty example: {0}")]
    Missing(&'static str),
}

/// Example payload as it appears on the wire, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExampleSet {
    #[serde(default)]
    pub professional: Option<String>,
    #[serde(default)]
    pub policy_alert: Option<String>,
    #[serde(default)]
    pub minor_issues: Option<String>,
}

/// A validated set of three example posts
///
/// Every field is guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExampleSet", rename_all = "camelCase")]
pub struct ExampleSet {
    professional: String,
    policy_alert: String,
    minor_issues: String,
}

impl ExampleSet {
    pub fn new(
        professional: impl Into<String>,
        policy_alert: impl Into<String>,
        minor_issues: impl Into<String>,
    ) -> Result<Self, ExampleSetError> {
        Self::try_from(RawExampleSet {
            professional: Some(professional.into()),
            policy_alert: Some(policy_alert.into()),
            minor_issues: Some(minor_issues.into()),
        })
    }

    pub fn get(&self, category: ExampleCategory) -> &str {
        match category {
            ExampleCategory::Professional => &self.professional,
            ExampleCategory::PolicyAlert => &self.policy_alert,
            ExampleCategory::MinorIssues => &self.minor_issues,
        }
    }
}

impl TryFrom<RawExampleSet> for ExampleSet {
    type Error = ExampleSetError;

    fn try_from(raw: RawExampleSet) -> Result<Self, Self::Error> {
        fn require(value: Option<String>, category: ExampleCategory) -> Result<String, ExampleSetError> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(ExampleSetError::Missing(category.key()))
        }

        Ok(Self {
            professional: require(raw.professional, ExampleCategory::Professional)?,
            policy_alert: require(raw.policy_alert, ExampleCategory::PolicyAlert)?,
            minor_issues: require(raw.minor_issues, ExampleCategory::MinorIssues)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_set_get() {
        let set = ExampleSet::new("Grew revenue 40%", "Buy now!!!", "I has a idea").unwrap();
        assert_eq!(set.get(ExampleCategory::Professional), "Grew revenue 40%");
        assert_eq!(set.get(ExampleCategory::PolicyAlert), "Buy now!!!");
        assert_eq!(set.get(ExampleCategory::MinorIssues), "I has a idea");
    }

    #[test]
    fn test_example_set_rejects_blank() {
        let err = ExampleSet::new("ok", "  ", "ok").unwrap_err();
        assert_eq!(err, ExampleSetError::Missing("policyAlert"));
    }

    #[test]
    fn test_example_set_deserialize_camel_case() {
        let json = r#"{"professional":"a","policyAlert":"b","minorIssues":"c"}"#;
        let set: ExampleSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.get(ExampleCategory::PolicyAlert), "b");

        let back = serde_json::to_value(&set).unwrap();
        assert_eq!(back["minorIssues"], "c");
    }

    #[test]
    fn test_example_set_deserialize_missing_field() {
        let json = r#"{"professional":"a","policyAlert":"b"}"#;
        assert!(serde_json::from_str::<ExampleSet>(json).is_err());
    }

    #[test]
    fn test_example_set_deserialize_non_string() {
        let json = r#"{"professional":"a","policyAlert":7,"minorIssues":"c"}"#;
        assert!(serde_json::from_str::<ExampleSet>(json).is_err());
    }

    #[test]
    fn test_category_keys_match_wire_names() {
        for category in ExampleCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.key());
        }
    }
}
