//! Post draft and published post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    text: String,
}

impl PostDraft {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// True when there is nothing worth analyzing or publishing
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Take the text out, leaving the draft empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

/// A post that passed the publish gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPost {
    pub text: String,
    pub published_at: DateTime<Utc>,
    /// Whether the post went out over an acknowledged policy alert
    pub over_alert: bool,
}
