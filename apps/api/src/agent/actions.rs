//! The three action handlers. Each performs one record-store operation
//! (the update path: one lookup query, then one write) and converts any
//! collaborator fault into a typed pipeline error.

use chrono::NaiveDate;
use tracing::info;

use crate::agent::error::AgentError;
use crate::agent::filter::translate_filter;
use crate::agent::validation::{CreateJob, UpdateJob};
use crate::llm_client::ModelClient;
use crate::notion::record::sort_by_application_date;
use crate::notion::{
    FilterExpression, PropertyMap, PropertyWrite, Record, RecordStore, FIELD_COMPANY,
    FIELD_DATE_OF_APPLICATION, FIELD_JOB, FIELD_LAST_UPDATED, FIELD_REFERENCE, FIELD_STATUS,
};

const DEFAULT_STATUS: &str = "Applied";

pub struct QueryOutcome {
    pub filter: FilterExpression,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Full (untruncated) job title from the matched page, for confirmation
    /// messaging; the request may only contain a fragment of it.
    pub job_title: String,
    pub company: String,
    pub status: String,
}

/// Translates the request into a filter, queries the store, and normalizes
/// the result set, newest application first.
pub async fn handle_query(
    model: &dyn ModelClient,
    store: &dyn RecordStore,
    input: &str,
    today: NaiveDate,
) -> Result<QueryOutcome, AgentError> {
    let filter = translate_filter(model, input, today).await?;
    let pages = store.query(&filter).await.map_err(AgentError::StoreQuery)?;
    let mut records: Vec<Record> = pages.iter().map(Record::from_page).collect();
    sort_by_application_date(&mut records);
    info!("query returned {} records", records.len());
    Ok(QueryOutcome { filter, records })
}

/// Creates one application entry. Absent fields default at write time:
/// status "Applied", empty reference, today's date.
pub async fn handle_create(
    store: &dyn RecordStore,
    job: CreateJob,
    today: NaiveDate,
) -> Result<(), AgentError> {
    let mut properties = PropertyMap::new();
    properties.insert(FIELD_JOB.to_string(), PropertyWrite::title(job.job_title));
    properties.insert(
        FIELD_COMPANY.to_string(),
        PropertyWrite::rich_text(job.company),
    );
    properties.insert(
        FIELD_REFERENCE.to_string(),
        PropertyWrite::rich_text(job.reference.unwrap_or_default()),
    );
    properties.insert(
        FIELD_STATUS.to_string(),
        PropertyWrite::status(job.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
    );
    properties.insert(
        FIELD_DATE_OF_APPLICATION.to_string(),
        PropertyWrite::date(job.date.unwrap_or_else(|| today.to_string())),
    );

    let page = store
        .create(properties)
        .await
        .map_err(AgentError::StoreWrite)?;
    info!("created application entry {}", page.id);
    Ok(())
}

/// Finds the entry whose job title and company contain the given fragments
/// and sets its status. Zero matches is a definite, reported error. With
/// multiple matches the first page in the store's native order wins; the
/// confirmation strings make the chosen record visible to the caller.
pub async fn handle_update(
    store: &dyn RecordStore,
    job: UpdateJob,
    today: NaiveDate,
) -> Result<UpdateOutcome, AgentError> {
    let lookup = FilterExpression::and(vec![
        FilterExpression::title_contains(FIELD_JOB, &job.job_title),
        FilterExpression::rich_text_contains(FIELD_COMPANY, &job.company),
    ]);
    let pages = store.query(&lookup).await.map_err(AgentError::StoreQuery)?;

    let Some(page) = pages.first() else {
        return Err(AgentError::NoMatchingRecord {
            job_title: job.job_title,
            company: job.company,
        });
    };

    let full_job_title = page
        .scalar(FIELD_JOB)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "(unknown job title)".to_string());
    let full_company = page
        .scalar(FIELD_COMPANY)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "(unknown company)".to_string());

    let mut properties = PropertyMap::new();
    properties.insert(
        FIELD_STATUS.to_string(),
        PropertyWrite::status(job.status.clone()),
    );
    properties.insert(
        FIELD_LAST_UPDATED.to_string(),
        PropertyWrite::date(today.to_string()),
    );

    store
        .update(&page.id, properties)
        .await
        .map_err(AgentError::StoreWrite)?;
    info!("updated {} to status {}", page.id, job.status);

    Ok(UpdateOutcome {
        job_title: full_job_title,
        company: full_company,
        status: job.status,
    })
}
