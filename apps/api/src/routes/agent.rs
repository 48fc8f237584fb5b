//! Axum handler for the agent pipeline. Front-end concerns (collecting
//! input, rendering exactly one of success/error) stop here; the pipeline
//! itself knows nothing about HTTP.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::agent::{ActionTaken, PipelineState};
use crate::agent::intent::Intent;
use crate::errors::AppError;
use crate::notion::{FilterExpression, Record};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub intent: Option<Intent>,
    pub action_taken: Option<ActionTaken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<UpdateConfirmation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateConfirmation {
    pub job_title: String,
    pub company: String,
    pub status: String,
    pub message: String,
}

impl RunResponse {
    fn from_state(state: PipelineState) -> Self {
        let error = state.error_message();
        RunResponse {
            intent: state.intent,
            action_taken: state.action_taken,
            filter: state.filter,
            records: state.records,
            summary: state.summary,
            update: state.update.map(|outcome| UpdateConfirmation {
                message: format!(
                    "Status for {} at {} has been updated to {}.",
                    outcome.job_title, outcome.company, outcome.status
                ),
                job_title: outcome.job_title,
                company: outcome.company,
                status: outcome.status,
            }),
            error,
        }
    }
}

/// POST /api/v1/agent/run
///
/// Runs one request through the pipeline and returns the terminal state.
/// Exactly one of `action_taken`/`error` is populated, or neither when
/// the intent could not be determined.
pub async fn handle_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>, AppError> {
    if request.input.trim().is_empty() {
        return Err(AppError::Validation("input cannot be empty".to_string()));
    }

    let terminal = state.agent.run(&request.input).await;

    Ok(Json(RunResponse::from_state(terminal)))
}
