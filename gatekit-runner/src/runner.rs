use crate::TurnContext;
use async_stream::stream;
use gatekit_core::{Agent, Content, Event, EventStream, GatekitError, Result};
use gatekit_session::{GetRequest, SessionService};
use std::sync::Arc;
use uuid::Uuid;

pub struct RunnerConfig {
    pub app_name: String,
    pub agent: Arc<dyn Agent>,
    pub session_service: Arc<dyn SessionService>,
}

/// Drives one agent turn per call against an existing session, appending
/// the user message and every agent event to the session store.
///
/// A turn is either fresh (new invocation id) or a resume of a paused
/// invocation. Resume correlation is validated here: a resume id that does
/// not match the session's recorded pending pause never reaches the agent.
pub struct Runner {
    app_name: String,
    agent: Arc<dyn Agent>,
    session_service: Arc<dyn SessionService>,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            app_name: config.app_name,
            agent: config.agent,
            session_service: config.session_service,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Runs one turn. `resume` carries the invocation identifier of the
    /// paused turn being answered; `None` starts a fresh turn.
    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        new_message: Content,
        resume: Option<&str>,
    ) -> Result<EventStream> {
        let session = self
            .session_service
            .get(GetRequest {
                app_name: self.app_name.clone(),
                user_id: user_id.to_string(),
                session_id: session_id.to_string(),
            })
            .await?;

        let pending = session.pending_approval();
        let (invocation_id, resuming) = match (resume, &pending) {
            (Some(id), Some(p)) if id == p.invocation_id => (id.to_string(), true),
            (Some(id), Some(p)) => {
                return Err(GatekitError::Protocol(format!(
                    "resume invocation '{id}' does not match pending invocation '{}'",
                    p.invocation_id
                )));
            }
            (Some(id), None) => {
                return Err(GatekitError::Protocol(format!(
                    "resume invocation '{id}' submitted but no pause is pending"
                )));
            }
            (None, Some(p)) => {
                return Err(GatekitError::Protocol(format!(
                    "session '{session_id}' is paused on invocation '{}'; resume it before \
                     submitting new input",
                    p.invocation_id
                )));
            }
            (None, None) => (format!("inv-{}", Uuid::new_v4()), false),
        };

        tracing::info!(
            session_id,
            invocation_id = %invocation_id,
            resuming,
            "starting turn"
        );

        let agent = self.agent.clone();
        let session_service = self.session_service.clone();
        let session_id = session_id.to_string();
        let ctx = Arc::new(TurnContext::new(
            invocation_id.clone(),
            self.app_name.clone(),
            user_id.to_string(),
            session_id.clone(),
            new_message.clone(),
            resuming,
            session.state,
        ));

        let s = stream! {
            let user_event = Event::message(&invocation_id, "user", new_message);
            if let Err(e) = session_service.append_event(&session_id, user_event).await {
                yield Err(e);
                return;
            }

            let mut agent_stream = match agent.run(ctx).await {
                Ok(s) => s,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            use futures::StreamExt;
            while let Some(result) = agent_stream.next().await {
                match result {
                    Ok(event) => {
                        if let Err(e) = session_service.append_event(&session_id, event.clone()).await {
                            yield Err(e);
                            return;
                        }
                        tracing::debug!(event_id = %event.id, "event appended");
                        yield Ok(event);
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        };

        Ok(Box::pin(s))
    }
}
