//! The request pipeline: classify → validate → route → one handler →
//! terminal state. Data flows strictly forward; the first error is
//! terminal and no handler invokes another.

pub mod actions;
pub mod analyze;
pub mod error;
pub mod filter;
pub mod intent;
pub mod prompts;
pub mod router;
pub mod validation;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::agent::actions::UpdateOutcome;
use crate::agent::error::AgentError;
use crate::agent::intent::{ExtractedPayload, Intent};
use crate::agent::router::HandlerKey;
use crate::agent::validation::{CreateJob, UpdateJob};
use crate::llm_client::ModelClient;
use crate::notion::{FilterExpression, Record, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTaken {
    Query,
    Create,
    Update,
}

/// Accumulator for one pipeline run. Fresh per request, never shared.
/// At termination exactly one of `action_taken`/`error` is set, except for
/// an `unknown` intent, which terminates with neither.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub input: String,
    pub intent: Option<Intent>,
    pub payload: Option<ExtractedPayload>,
    pub filter: Option<FilterExpression>,
    pub records: Option<Vec<Record>>,
    pub summary: Option<String>,
    pub update: Option<UpdateOutcome>,
    pub action_taken: Option<ActionTaken>,
    pub error: Option<AgentError>,
}

impl PipelineState {
    fn new(input: &str) -> Self {
        PipelineState {
            input: input.to_string(),
            ..Default::default()
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// The orchestrator. Owns nothing but handles to the two collaborators;
/// both are injected so tests can script them.
#[derive(Clone)]
pub struct Agent {
    model: Arc<dyn ModelClient>,
    store: Arc<dyn RecordStore>,
}

impl Agent {
    pub fn new(model: Arc<dyn ModelClient>, store: Arc<dyn RecordStore>) -> Self {
        Self { model, store }
    }

    pub async fn run(&self, input: &str) -> PipelineState {
        self.run_with_today(input, Utc::now().date_naive()).await
    }

    pub(crate) async fn run_with_today(&self, input: &str, today: NaiveDate) -> PipelineState {
        let mut state = PipelineState::new(input);

        match intent::extract_intent(self.model.as_ref(), input, today).await {
            Ok((intent, payload)) => {
                debug!(intent = intent.as_str(), "classified request");
                state.intent = Some(intent);
                if let Err(e) = validation::validate(intent, &payload) {
                    state.error = Some(e);
                }
                state.payload = Some(payload);
            }
            Err(e) => state.error = Some(e),
        }

        match router::route(state.intent, state.error.is_some()) {
            HandlerKey::Query => self.run_query(&mut state, today).await,
            HandlerKey::Create => self.run_create(&mut state, today).await,
            HandlerKey::Update => self.run_update(&mut state, today).await,
            HandlerKey::Error => {}
        }

        if let Some(e) = &state.error {
            info!("pipeline terminated with error: {e}");
        }
        state
    }

    async fn run_query(&self, state: &mut PipelineState, today: NaiveDate) {
        match actions::handle_query(self.model.as_ref(), self.store.as_ref(), &state.input, today)
            .await
        {
            Ok(outcome) => {
                state.summary = Some(analyze::analyze_records(&outcome.records));
                state.filter = Some(outcome.filter);
                state.records = Some(outcome.records);
                state.action_taken = Some(ActionTaken::Query);
            }
            Err(e) => state.error = Some(e),
        }
    }

    async fn run_create(&self, state: &mut PipelineState, today: NaiveDate) {
        // Re-runs the conversion validation already dry-ran; it cannot fail
        // here, but the error path keeps the handler total without unwraps.
        let job = match state.payload.as_ref().map(CreateJob::from_payload) {
            Some(Ok(job)) => job,
            Some(Err(e)) => {
                state.error = Some(e);
                return;
            }
            None => {
                state.error = Some(AgentError::MissingRequiredField(
                    "company, job_title".to_string(),
                ));
                return;
            }
        };
        match actions::handle_create(self.store.as_ref(), job, today).await {
            Ok(()) => state.action_taken = Some(ActionTaken::Create),
            Err(e) => state.error = Some(e),
        }
    }

    async fn run_update(&self, state: &mut PipelineState, today: NaiveDate) {
        let job = match state.payload.as_ref().map(UpdateJob::from_payload) {
            Some(Ok(job)) => job,
            Some(Err(e)) => {
                state.error = Some(e);
                return;
            }
            None => {
                state.error = Some(AgentError::MissingRequiredField(
                    "company, job_title, status".to_string(),
                ));
                return;
            }
        };
        match actions::handle_update(self.store.as_ref(), job, today).await {
            Ok(outcome) => {
                state.update = Some(outcome);
                state.action_taken = Some(ActionTaken::Update);
            }
            Err(e) => state.error = Some(e),
        }
    }
}
