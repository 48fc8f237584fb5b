//! Intent extraction: one model call that classifies the request and pulls
//! out whatever structured fields it mentions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agent::error::AgentError;
use crate::agent::prompts;
use crate::llm_client::{parse_json_payload, ModelClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Query,
    Create,
    Update,
    Unknown,
}

impl Intent {
    /// Maps the model's string tag to an intent. Anything unrecognized
    /// (including a missing tag) is `Unknown`, which routes to the error
    /// sink rather than a handler.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "query" => Intent::Query,
            "create" => Intent::Create,
            "update" => Intent::Update,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Query => "query",
            Intent::Create => "create",
            Intent::Update => "update",
            Intent::Unknown => "unknown",
        }
    }
}

/// Fields the classifier may extract. All optional at this stage; the
/// validator decides what each intent actually requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPayload {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub reference: Option<String>,
    pub last_updated_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Classification {
    intent: Option<String>,
    #[serde(flatten)]
    payload: ExtractedPayload,
}

pub async fn extract_intent(
    model: &dyn ModelClient,
    input: &str,
    today: NaiveDate,
) -> Result<(Intent, ExtractedPayload), AgentError> {
    let prompt = prompts::intent_prompt(input, today);
    let response = model.invoke(&prompt).await?;
    let parsed: Classification = parse_json_payload(&response)?;
    let intent = parsed
        .intent
        .as_deref()
        .map(Intent::from_tag)
        .unwrap_or(Intent::Unknown);
    Ok((intent, parsed.payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known_intents() {
        assert_eq!(Intent::from_tag("query"), Intent::Query);
        assert_eq!(Intent::from_tag("create"), Intent::Create);
        assert_eq!(Intent::from_tag("update"), Intent::Update);
    }

    #[test]
    fn test_from_tag_unrecognized_is_unknown() {
        assert_eq!(Intent::from_tag("bogus"), Intent::Unknown);
        assert_eq!(Intent::from_tag(""), Intent::Unknown);
        assert_eq!(Intent::from_tag("Create"), Intent::Unknown);
    }

    #[test]
    fn test_classification_parses_with_partial_fields() {
        let parsed: Classification = parse_json_payload(
            r#"{"intent": "update", "job_title": "Software Engineer", "company": "Google", "status": "Rejected"}"#,
        )
        .unwrap();
        assert_eq!(parsed.intent.as_deref(), Some("update"));
        assert_eq!(parsed.payload.job_title.as_deref(), Some("Software Engineer"));
        assert_eq!(parsed.payload.date, None);
        assert_eq!(parsed.payload.reference, None);
    }

    #[test]
    fn test_classification_parses_fenced_response() {
        let parsed: Classification = parse_json_payload(
            "```json\n{\"intent\": \"query\"}\n```",
        )
        .unwrap();
        assert_eq!(parsed.intent.as_deref(), Some("query"));
        assert_eq!(parsed.payload, ExtractedPayload::default());
    }

    #[test]
    fn test_classification_without_intent_tag() {
        let parsed: Classification = parse_json_payload(r#"{"company": "Citi"}"#).unwrap();
        let intent = parsed
            .intent
            .as_deref()
            .map(Intent::from_tag)
            .unwrap_or(Intent::Unknown);
        assert_eq!(intent, Intent::Unknown);
    }
}
