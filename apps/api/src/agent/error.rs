use thiserror::Error;

use crate::llm_client::{LlmError, MalformedOutput};
use crate::notion::StoreError;

/// Terminal pipeline errors. Exactly one of these can occupy the pipeline
/// state's error slot; none crosses the orchestrator boundary as a panic
/// or a propagated exception.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error(transparent)]
    MalformedModelOutput(#[from] MalformedOutput),

    #[error("missing required field(s): {0}")]
    MissingRequiredField(String),

    #[error("no entry found with job title containing '{job_title}' and company containing '{company}'")]
    NoMatchingRecord { job_title: String, company: String },

    #[error("record store query failed: {0}")]
    StoreQuery(#[source] StoreError),

    #[error("record store write failed: {0}")]
    StoreWrite(#[source] StoreError),
}
