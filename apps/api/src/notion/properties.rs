//! Type-tagged Notion property values: the read-side shapes returned by
//! queries and the write-side shapes sent on create/update.

use serde::{Deserialize, Serialize};

/// Marker for property types the normalizer does not understand.
pub const UNSUPPORTED: &str = "[Unsupported]";

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichTextValue> },
    RichText { rich_text: Vec<RichTextValue> },
    Status { status: Option<StatusValue> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichTextValue {
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusValue {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    pub start: String,
}

impl PropertyValue {
    /// Flattens a type-tagged value to a plain scalar string: first text
    /// run's content, status name, or date start. Empty string when the
    /// field holds no value, sentinel for unsupported types.
    pub fn as_scalar(&self) -> String {
        match self {
            PropertyValue::Title { title } => first_run_content(title),
            PropertyValue::RichText { rich_text } => first_run_content(rich_text),
            PropertyValue::Status { status } => {
                status.as_ref().map(|s| s.name.clone()).unwrap_or_default()
            }
            PropertyValue::Date { date } => {
                date.as_ref().map(|d| d.start.clone()).unwrap_or_default()
            }
            PropertyValue::Unsupported => UNSUPPORTED.to_string(),
        }
    }
}

fn first_run_content(runs: &[RichTextValue]) -> String {
    runs.first()
        .and_then(|run| run.text.as_ref())
        .map(|text| text.content.clone())
        .unwrap_or_default()
}

/// Write-side property shapes, mirroring what the Notion API accepts on
/// page create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropertyWrite {
    Title { title: Vec<TextRunWrite> },
    RichText { rich_text: Vec<TextRunWrite> },
    Status { status: StatusWrite },
    Date { date: DateWrite },
}

#[derive(Debug, Clone, Serialize)]
pub struct TextRunWrite {
    pub text: TextContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusWrite {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateWrite {
    pub start: String,
}

impl PropertyWrite {
    pub fn title(content: impl Into<String>) -> Self {
        PropertyWrite::Title {
            title: vec![text_run(content)],
        }
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        PropertyWrite::RichText {
            rich_text: vec![text_run(content)],
        }
    }

    pub fn status(name: impl Into<String>) -> Self {
        PropertyWrite::Status {
            status: StatusWrite { name: name.into() },
        }
    }

    pub fn date(start: impl Into<String>) -> Self {
        PropertyWrite::Date {
            date: DateWrite {
                start: start.into(),
            },
        }
    }
}

fn text_run(content: impl Into<String>) -> TextRunWrite {
    TextRunWrite {
        text: TextContent {
            content: content.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_scalar_takes_first_run() {
        let value: PropertyValue = serde_json::from_value(json!({
            "type": "title",
            "title": [
                {"text": {"content": "Backend Engineer"}},
                {"text": {"content": " (remote)"}}
            ]
        }))
        .unwrap();
        assert_eq!(value.as_scalar(), "Backend Engineer");
    }

    #[test]
    fn test_empty_rich_text_scalar_is_empty_string() {
        let value: PropertyValue =
            serde_json::from_value(json!({"type": "rich_text", "rich_text": []})).unwrap();
        assert_eq!(value.as_scalar(), "");
    }

    #[test]
    fn test_status_scalar_is_status_name() {
        let value: PropertyValue =
            serde_json::from_value(json!({"type": "status", "status": {"name": "Applied"}}))
                .unwrap();
        assert_eq!(value.as_scalar(), "Applied");
    }

    #[test]
    fn test_null_status_scalar_is_empty_string() {
        let value: PropertyValue =
            serde_json::from_value(json!({"type": "status", "status": null})).unwrap();
        assert_eq!(value.as_scalar(), "");
    }

    #[test]
    fn test_date_scalar_is_start() {
        let value: PropertyValue =
            serde_json::from_value(json!({"type": "date", "date": {"start": "2025-06-09"}}))
                .unwrap();
        assert_eq!(value.as_scalar(), "2025-06-09");
    }

    #[test]
    fn test_unknown_type_normalizes_to_sentinel() {
        let value: PropertyValue =
            serde_json::from_value(json!({"type": "checkbox", "checkbox": true})).unwrap();
        assert_eq!(value.as_scalar(), UNSUPPORTED);
    }

    #[test]
    fn test_write_shapes_match_notion_api() {
        assert_eq!(
            serde_json::to_value(PropertyWrite::title("Backend Engineer")).unwrap(),
            json!({"title": [{"text": {"content": "Backend Engineer"}}]})
        );
        assert_eq!(
            serde_json::to_value(PropertyWrite::rich_text("Amazon")).unwrap(),
            json!({"rich_text": [{"text": {"content": "Amazon"}}]})
        );
        assert_eq!(
            serde_json::to_value(PropertyWrite::status("Applied")).unwrap(),
            json!({"status": {"name": "Applied"}})
        );
        assert_eq!(
            serde_json::to_value(PropertyWrite::date("2025-06-09")).unwrap(),
            json!({"date": {"start": "2025-06-09"}})
        );
    }
}
