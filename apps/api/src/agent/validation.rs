//! Payload validation, via fallible typed-command constructors. The
//! validator is a dry run of the same constructors the handlers consume,
//! so a payload that validates can never fail a field lookup later.

use crate::agent::error::AgentError;
use crate::agent::intent::{ExtractedPayload, Intent};

/// A validated create request. Required fields are owned strings; the rest
/// keep their defaults-at-write semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateJob {
    pub job_title: String,
    pub company: String,
    pub status: Option<String>,
    pub date: Option<String>,
    pub reference: Option<String>,
}

/// A validated update request: the two lookup keys plus the new status.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateJob {
    pub job_title: String,
    pub company: String,
    pub status: String,
}

impl CreateJob {
    pub fn from_payload(payload: &ExtractedPayload) -> Result<Self, AgentError> {
        match (present(&payload.job_title), present(&payload.company)) {
            (Some(job_title), Some(company)) => Ok(CreateJob {
                job_title,
                company,
                status: payload.status.clone(),
                date: payload.date.clone(),
                reference: payload.reference.clone(),
            }),
            (job_title, company) => Err(missing_fields(&[
                ("company", company.is_none()),
                ("job_title", job_title.is_none()),
            ])),
        }
    }
}

impl UpdateJob {
    pub fn from_payload(payload: &ExtractedPayload) -> Result<Self, AgentError> {
        match (
            present(&payload.job_title),
            present(&payload.company),
            present(&payload.status),
        ) {
            (Some(job_title), Some(company), Some(status)) => Ok(UpdateJob {
                job_title,
                company,
                status,
            }),
            (job_title, company, status) => Err(missing_fields(&[
                ("company", company.is_none()),
                ("job_title", job_title.is_none()),
                ("status", status.is_none()),
            ])),
        }
    }
}

/// Checks the extracted payload carries the fields its intent requires.
/// `query` and `unknown` accept any payload.
pub fn validate(intent: Intent, payload: &ExtractedPayload) -> Result<(), AgentError> {
    match intent {
        Intent::Create => CreateJob::from_payload(payload).map(|_| ()),
        Intent::Update => UpdateJob::from_payload(payload).map(|_| ()),
        Intent::Query | Intent::Unknown => Ok(()),
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn missing_fields(checks: &[(&str, bool)]) -> AgentError {
    let missing: Vec<&str> = checks
        .iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| *name)
        .collect();
    AgentError::MissingRequiredField(missing.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(job_title: Option<&str>, company: Option<&str>, status: Option<&str>) -> ExtractedPayload {
        ExtractedPayload {
            job_title: job_title.map(String::from),
            company: company.map(String::from),
            status: status.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_with_both_required_fields_passes() {
        let p = payload(Some("Backend Engineer"), Some("Amazon"), None);
        assert!(validate(Intent::Create, &p).is_ok());
    }

    #[test]
    fn test_create_missing_company_fails() {
        let p = payload(Some("Backend Engineer"), None, None);
        let err = validate(Intent::Create, &p).unwrap_err();
        assert!(matches!(err, AgentError::MissingRequiredField(ref f) if f == "company"));
    }

    #[test]
    fn test_create_missing_job_title_fails() {
        let p = payload(None, Some("Amazon"), None);
        let err = validate(Intent::Create, &p).unwrap_err();
        assert!(matches!(err, AgentError::MissingRequiredField(ref f) if f == "job_title"));
    }

    #[test]
    fn test_create_empty_strings_count_as_missing() {
        let p = payload(Some("  "), Some(""), None);
        let err = validate(Intent::Create, &p).unwrap_err();
        assert!(
            matches!(err, AgentError::MissingRequiredField(ref f) if f == "company, job_title")
        );
    }

    #[test]
    fn test_update_requires_lookup_keys_and_status() {
        let p = payload(Some("Software Engineer"), Some("Google"), Some("Rejected"));
        assert!(validate(Intent::Update, &p).is_ok());

        let p = payload(Some("Software Engineer"), Some("Google"), None);
        let err = validate(Intent::Update, &p).unwrap_err();
        assert!(matches!(err, AgentError::MissingRequiredField(ref f) if f == "status"));
    }

    #[test]
    fn test_query_accepts_empty_payload() {
        assert!(validate(Intent::Query, &ExtractedPayload::default()).is_ok());
    }

    #[test]
    fn test_unknown_accepts_empty_payload() {
        assert!(validate(Intent::Unknown, &ExtractedPayload::default()).is_ok());
    }

    #[test]
    fn test_create_job_keeps_optional_fields() {
        let p = ExtractedPayload {
            job_title: Some("Backend Engineer".to_string()),
            company: Some("Amazon".to_string()),
            status: Some("Applied".to_string()),
            date: Some("2025-06-09".to_string()),
            reference: Some("https://amazon.jobs/".to_string()),
            last_updated_time: None,
        };
        let job = CreateJob::from_payload(&p).unwrap();
        assert_eq!(job.status.as_deref(), Some("Applied"));
        assert_eq!(job.date.as_deref(), Some("2025-06-09"));
        assert_eq!(job.reference.as_deref(), Some("https://amazon.jobs/"));
    }
}
