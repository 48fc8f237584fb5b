//! Natural-language → Notion filter translation. The model's output must be
//! directly valid as the store's query argument; it is parsed into the typed
//! grammar here and not re-validated afterwards.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::agent::error::AgentError;
use crate::agent::prompts;
use crate::llm_client::{parse_json_payload, ModelClient};
use crate::notion::FilterExpression;

/// The model answers with a `{"filter": ...}` wrapper, mirroring the shape
/// the store's query endpoint takes. Extra top-level keys are ignored.
#[derive(Debug, Deserialize)]
struct FilterEnvelope {
    filter: FilterExpression,
}

pub async fn translate_filter(
    model: &dyn ModelClient,
    input: &str,
    today: NaiveDate,
) -> Result<FilterExpression, AgentError> {
    let prompt = prompts::filter_prompt(input, today);
    let response = model.invoke(&prompt).await?;
    let envelope: FilterEnvelope = parse_json_payload(&response)?;
    Ok(envelope.filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::filter::{
        DateCondition, PropertyCondition, PropertyPredicate, StatusCondition, TextCondition,
    };

    #[test]
    fn test_envelope_parses_combinator_filter() {
        let envelope: FilterEnvelope = parse_json_payload(
            r#"{
                "filter": {
                    "and": [
                        {"property": "Status", "status": {"is_not_empty": true}},
                        {"property": "Job", "title": {"contains": "Analyst"}},
                        {"property": "Company", "rich_text": {"equals": "Citi"}}
                    ]
                }
            }"#,
        )
        .unwrap();

        let FilterExpression::And { and } = envelope.filter else {
            panic!("expected an `and` combinator");
        };
        assert_eq!(
            and[1],
            FilterExpression::Predicate(PropertyPredicate {
                property: "Job".to_string(),
                condition: PropertyCondition::Title(TextCondition::Contains(
                    "Analyst".to_string()
                )),
            })
        );
    }

    #[test]
    fn test_envelope_parses_fenced_bare_predicate() {
        let envelope: FilterEnvelope = parse_json_payload(
            "```json\n{\"filter\": {\"property\": \"Status\", \"status\": {\"is_not_empty\": true}}}\n```",
        )
        .unwrap();
        assert_eq!(
            envelope.filter,
            FilterExpression::Predicate(PropertyPredicate {
                property: "Status".to_string(),
                condition: PropertyCondition::Status(StatusCondition::IsNotEmpty(true)),
            })
        );
    }

    #[test]
    fn test_envelope_parses_date_range() {
        let envelope: FilterEnvelope = parse_json_payload(
            r#"{
                "filter": {
                    "and": [
                        {"property": "Date of application", "date": {"on_or_after": "2025-06-03"}},
                        {"property": "Date of application", "date": {"before": "2025-06-10"}}
                    ]
                }
            }"#,
        )
        .unwrap();
        let FilterExpression::And { and } = envelope.filter else {
            panic!("expected an `and` combinator");
        };
        assert_eq!(
            and[1],
            FilterExpression::Predicate(PropertyPredicate {
                property: "Date of application".to_string(),
                condition: PropertyCondition::Date(DateCondition::Before(
                    "2025-06-10".to_string()
                )),
            })
        );
    }

    #[test]
    fn test_prose_response_is_malformed_output() {
        let err =
            parse_json_payload::<FilterEnvelope>("I could not build a filter for that request.")
                .unwrap_err();
        assert!(err.to_string().contains("I could not build a filter"));
    }
}
