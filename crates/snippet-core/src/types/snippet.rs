//! Snippet types

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Language tag applied when a snippet is created without one.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// A stored text snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub language: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub modified_at: DateTime<Utc>,
}

impl Snippet {
    /// Build a fresh record from creation fields. Both timestamps are set to
    /// the current instant at millisecond precision, the resolution used on
    /// the wire and in the database.
    pub fn new(id: String, fields: NewSnippet) -> Self {
        let now = now_millis();
        Self {
            id,
            title: fields.title,
            content: fields.content,
            language: fields
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            created_at: now,
            modified_at: now,
        }
    }

    /// Apply the supplied fields and refresh `modified_at`. The id and
    /// `created_at` never change.
    pub fn apply(&mut self, changes: SnippetChanges) {
        if let Some(title) = changes.title {
            self.title = Some(title);
        }
        if let Some(content) = changes.content {
            self.content = Some(content);
        }
        if let Some(language) = changes.language {
            self.language = language;
        }
        self.modified_at = now_millis();
    }
}

/// Fields accepted when creating a snippet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSnippet {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

/// Fields accepted when updating a snippet. Absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

/// Current instant truncated to milliseconds.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, content: &str) -> NewSnippet {
        NewSnippet {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            language: None,
        }
    }

    #[test]
    fn test_new_applies_default_language() {
        let snippet = Snippet::new("abcdEFGH".to_string(), fields("t", "c"));

        assert_eq!(snippet.language, DEFAULT_LANGUAGE);
        assert_eq!(snippet.title.as_deref(), Some("t"));
        assert_eq!(snippet.content.as_deref(), Some("c"));
        assert_eq!(snippet.created_at, snippet.modified_at);
    }

    #[test]
    fn test_new_keeps_explicit_language() {
        let mut new = fields("t", "c");
        new.language = Some("rust".to_string());

        let snippet = Snippet::new("abcdEFGH".to_string(), new);
        assert_eq!(snippet.language, "rust");
    }

    #[test]
    fn test_apply_replaces_title_and_content() {
        let mut snippet = Snippet::new("abcdEFGH".to_string(), fields("old", "old body"));
        let created_at = snippet.created_at;
        std::thread::sleep(std::time::Duration::from_millis(5));

        snippet.apply(SnippetChanges {
            title: Some("new".to_string()),
            content: Some("new body".to_string()),
            language: None,
        });

        assert_eq!(snippet.id, "abcdEFGH");
        assert_eq!(snippet.title.as_deref(), Some("new"));
        assert_eq!(snippet.content.as_deref(), Some("new body"));
        assert_eq!(snippet.language, DEFAULT_LANGUAGE);
        assert_eq!(snippet.created_at, created_at);
        assert!(snippet.modified_at > created_at);
    }

    #[test]
    fn test_apply_merges_language() {
        let mut snippet = Snippet::new("abcdEFGH".to_string(), fields("t", "c"));

        snippet.apply(SnippetChanges {
            language: Some("python".to_string()),
            ..Default::default()
        });

        assert_eq!(snippet.language, "python");
        assert_eq!(snippet.title.as_deref(), Some("t"));
    }

    #[test]
    fn test_json_shape() {
        let snippet = Snippet::new("abcdEFGH".to_string(), fields("t", "c"));
        let value = serde_json::to_value(&snippet).unwrap();

        assert_eq!(value["id"], "abcdEFGH");
        assert_eq!(value["language"], "plaintext");
        assert_eq!(
            value["createdAt"].as_i64(),
            Some(snippet.created_at.timestamp_millis())
        );
        assert!(value.get("modifiedAt").is_some());

        let parsed: Snippet = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, snippet);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let snippet = Snippet::new("abcdEFGH".to_string(), NewSnippet::default());
        let value = serde_json::to_value(&snippet).unwrap();

        assert!(value.get("title").is_none());
        assert!(value.get("content").is_none());
    }
}
