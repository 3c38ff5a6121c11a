use crate::decision::DecisionSource;
use crate::run::{WorkflowRun, WorkflowState};
use futures::StreamExt;
use gatekit_core::{
    CONFIRMATION_OP, ConfirmationRequest, Content, Event, EventStream, GatekitConfig, Result,
};
use gatekit_runner::Runner;
use gatekit_session::{CreateRequest, SessionService};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// A detected pause: the confirmation request together with the invocation
/// that raised it. Both identifiers are needed to resume: the invocation id
/// correlates the resumed turn, the request id correlates the decision.
#[derive(Debug, Clone, PartialEq)]
pub struct PausePoint {
    pub invocation_id: String,
    pub request: ConfirmationRequest,
}

/// Orchestrates pausable agent runs: start a turn, scan its events for a
/// pause signal, build the decision message, resume, repeat until the run
/// completes.
///
/// The primitive operations ([`run_once`](Self::run_once),
/// [`scan_for_pause`](Self::scan_for_pause),
/// [`decision_message`](Self::decision_message), [`resume`](Self::resume))
/// are public so callers with their own event loops, interactive prompts
/// for example, can drive the protocol step by step.
/// [`execute`](Self::execute) is the packaged drive loop.
pub struct ApprovalWorkflow {
    config: GatekitConfig,
    runner: Arc<Runner>,
    session_service: Arc<dyn SessionService>,
}

impl ApprovalWorkflow {
    pub fn new(
        config: GatekitConfig,
        runner: Arc<Runner>,
        session_service: Arc<dyn SessionService>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, runner, session_service })
    }

    pub fn config(&self) -> &GatekitConfig {
        &self.config
    }

    /// Creates a fresh session for one workflow run.
    pub async fn create_session(&self) -> Result<String> {
        let session_id = format!("sess_{}", &Uuid::new_v4().simple().to_string()[..6]);
        self.session_service
            .create(CreateRequest {
                app_name: self.config.app_name.clone(),
                user_id: self.config.user_id.clone(),
                session_id: session_id.clone(),
            })
            .await?;
        tracing::debug!(session_id, "session created");
        Ok(session_id)
    }

    /// Runs one fresh turn and collects its events. The turn either
    /// completes or ends on a pause; the caller tells which by scanning.
    pub async fn run_once(&self, query: &str, session_id: &str) -> Result<Vec<Event>> {
        let message = Content::new("user").with_text(query);
        let stream =
            self.runner.run(&self.config.user_id, session_id, message, None).await?;
        collect(stream).await
    }

    /// Finds the first pause signal in a turn's events, if any.
    pub fn scan_for_pause(events: &[Event]) -> Option<PausePoint> {
        events.iter().find_map(|event| {
            event.confirmation_request().map(|request| PausePoint {
                invocation_id: event.invocation_id.clone(),
                request: request.clone(),
            })
        })
    }

    /// Builds the resume message answering a pause. The function response
    /// echoes the request id so the agent can correlate the decision.
    pub fn decision_message(pause: &PausePoint, approved: bool) -> Content {
        Content::new("user").with_function_response(
            &pause.request.id,
            CONFIRMATION_OP,
            json!({ "confirmed": approved }),
        )
    }

    /// Resumes a paused invocation with a decision message and collects the
    /// resumed turn's events. A stale or unknown `invocation_id` surfaces as
    /// a protocol error from the runner.
    pub async fn resume(
        &self,
        message: Content,
        invocation_id: &str,
        session_id: &str,
    ) -> Result<Vec<Event>> {
        let stream = self
            .runner
            .run(&self.config.user_id, session_id, message, Some(invocation_id))
            .await?;
        collect(stream).await
    }

    /// Drives one run to completion: fresh session, initial query, then
    /// resolve every pause through `decisions` until the run no longer
    /// pauses. Chained pauses are handled; each resumed batch is scanned
    /// like the first.
    pub async fn execute(
        &self,
        query: &str,
        decisions: &dyn DecisionSource,
    ) -> Result<WorkflowRun> {
        let session_id = self.create_session().await?;
        tracing::info!(session_id, query, "workflow started");

        let mut pauses = 0usize;
        let mut events = Vec::new();
        let mut batch = self.run_once(query, &session_id).await?;

        loop {
            let pause = Self::scan_for_pause(&batch);
            events.append(&mut batch);
            let Some(pause) = pause else {
                break;
            };

            pauses += 1;
            tracing::info!(
                session_id,
                invocation_id = %pause.invocation_id,
                request_id = %pause.request.id,
                hint = %pause.request.hint,
                "run paused, awaiting decision"
            );

            let approved = decisions.decide(&pause.request).await?;
            let message = Self::decision_message(&pause, approved);
            batch = self.resume(message, &pause.invocation_id, &session_id).await?;
        }

        tracing::info!(session_id, pauses, "workflow completed");
        Ok(WorkflowRun { session_id, state: WorkflowState::Completed, pauses, events })
    }
}

async fn collect(mut stream: EventStream) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    while let Some(result) = stream.next().await {
        events.push(result?);
    }
    Ok(events)
}
