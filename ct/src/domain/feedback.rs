//! Feedback classification
//!
//! The feedback service answers in free text following one of two shapes:
//!
//! ```text
//! ⚠️ Policy Alert: This content may violate hate speech guidelines.
//!
//! Consider rephrasing to focus on the idea rather than the group.
//! ```
//!
//! or a short list of bullet suggestions. [`classify`] turns that text into a
//! [`FeedbackResult`] so nothing downstream has to look at raw strings.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Marker that identifies a policy alert
pub const POLICY_ALERT_MARKER: &str = "⚠️ Policy Alert:";

/// Preamble some models emit before their bullet list
pub const SUGGESTIONS_PREAMBLE: &str = "Here are some suggestions to improve this post:";

/// Feedback shown when the analysis service could not be reached
pub const RETRY_MESSAGE: &str = "Error analyzing post. Please try again.";

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[•-]\s*(.+)$").expect("valid bullet regex"));

/// One rendered line of non-alert feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackLine {
    /// A bullet item, marker stripped
    Bullet(String),
    /// Any other text line
    Paragraph(String),
}

impl FeedbackLine {
    pub fn text(&self) -> &str {
        match self {
            FeedbackLine::Bullet(text) | FeedbackLine::Paragraph(text) => text,
        }
    }
}

/// Classification of a feedback text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Possible content-policy violation; publishing requires acknowledgment
    PolicyAlert {
        /// The sentence following the marker on the first line
        sentence: String,
        /// Follow-up advice from the second line on, hidden until requested
        suggestion: String,
    },
    /// Writing suggestions; never blocks publishing
    Suggestions(Vec<FeedbackLine>),
}

/// Feedback text as returned by the service, plus its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackResult {
    raw: String,
    kind: FeedbackKind,
}

impl FeedbackResult {
    /// Synthetic non-alert feedback used when analysis fails
    pub fn retry() -> Self {
        classify(RETRY_MESSAGE)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &FeedbackKind {
        &self.kind
    }

    pub fn is_policy_alert(&self) -> bool {
        matches!(self.kind, FeedbackKind::PolicyAlert { .. })
    }

    /// Alert sentence, empty for non-alert feedback
    pub fn alert_sentence(&self) -> &str {
        match &self.kind {
            FeedbackKind::PolicyAlert { sentence, .. } => sentence,
            FeedbackKind::Suggestions(_) => "",
        }
    }

    /// Hidden suggestion attached to a policy alert, empty otherwise
    pub fn alert_suggestion(&self) -> &str {
        match &self.kind {
            FeedbackKind::PolicyAlert { suggestion, .. } => suggestion,
            FeedbackKind::Suggestions(_) => "",
        }
    }

    /// Suggestion lines, empty for policy alerts
    pub fn suggestion_lines(&self) -> &[FeedbackLine] {
        match &self.kind {
            FeedbackKind::PolicyAlert { .. } => &[],
            FeedbackKind::Suggestions(lines) => lines,
        }
    }
}

/// Classify raw feedback text
///
/// Never fails: malformed input degrades to empty fields.
pub fn classify(raw: &str) -> FeedbackResult {
    debug!(raw_len = raw.len(), "classify: called");
    let kind = match raw.find(POLICY_ALERT_MARKER) {
        Some(idx) => {
            debug!("classify: policy alert marker found");
            // The sentence ends at the line break or at a repeated marker
            let after = &raw[idx + POLICY_ALERT_MARKER.len()..];
            let after = after.split(POLICY_ALERT_MARKER).next().unwrap_or("");
            let sentence = after.lines().next().unwrap_or("").trim().to_string();
            let suggestion = raw.split_once('\n').map(|(_, rest)| rest.trim()).unwrap_or("").to_string();
            FeedbackKind::PolicyAlert { sentence, suggestion }
        }
        None => {
            debug!("classify: no marker, parsing suggestions");
            FeedbackKind::Suggestions(parse_suggestions(raw))
        }
    };

    FeedbackResult {
        raw: raw.to_string(),
        kind,
    }
}

fn parse_suggestions(raw: &str) -> Vec<FeedbackLine> {
    raw.replacen(SUGGESTIONS_PREAMBLE, "", 1)
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match BULLET_RE.captures(line) {
            Some(caps) => FeedbackLine::Bullet(caps[1].to_string()),
            None => FeedbackLine::Paragraph(line.to_string()),
        })
        .collect()
}
