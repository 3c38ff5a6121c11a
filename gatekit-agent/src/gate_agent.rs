use async_stream::stream;
use async_trait::async_trait;
use gatekit_core::{
    Agent, ConfirmationDecision, ConfirmationRequest, ConfirmationState, Content, Event,
    EventStream, GateOutcome, GatedTool, GatekitError, InvocationContext, PENDING_APPROVAL_KEY,
    PendingApproval, Result, Tool,
};
use serde_json::Value;
use std::sync::Arc;

/// Executes one gated tool call per turn, suspending when the gate requests
/// confirmation and completing on the resumed turn.
///
/// The fresh turn reads the gate arguments from the user message (a JSON
/// object in its text part) and calls the gate with
/// [`ConfirmationState::Absent`]. If the gate pauses, the pending
/// bookkeeping travels to the session through the pause event's state delta
/// and the stream ends; suspension is a return-to-caller boundary, no task
/// is held open. The resumed turn replays the recorded arguments with the
/// decision attached and clears the bookkeeping.
///
/// An optional fulfillment tool runs once per approved unit (`count`),
/// mirroring a downstream generation step.
pub struct GateAgent {
    name: String,
    description: String,
    gate: Arc<dyn GatedTool>,
    fulfillment: Option<Arc<dyn Tool>>,
}

pub struct GateAgentBuilder {
    name: String,
    description: String,
    gate: Option<Arc<dyn GatedTool>>,
    fulfillment: Option<Arc<dyn Tool>>,
}

impl GateAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: String::new(), gate: None, fulfillment: None }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn gate(mut self, gate: Arc<dyn GatedTool>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn fulfillment(mut self, tool: Arc<dyn Tool>) -> Self {
        self.fulfillment = Some(tool);
        self
    }

    pub fn build(self) -> Result<GateAgent> {
        let gate = self
            .gate
            .ok_or_else(|| GatekitError::Config("GateAgent requires a gated tool".to_string()))?;
        Ok(GateAgent {
            name: self.name,
            description: self.description,
            gate,
            fulfillment: self.fulfillment,
        })
    }
}

impl GateAgent {
    pub fn builder(name: impl Into<String>) -> GateAgentBuilder {
        GateAgentBuilder::new(name)
    }

    fn parse_args(content: &Content) -> Result<Value> {
        let text = content.text().ok_or_else(|| {
            GatekitError::Execution("user message carries no text payload".to_string())
        })?;
        serde_json::from_str(&text).map_err(|e| {
            GatekitError::Execution(format!("user message is not a JSON object: {e}"))
        })
    }

    fn parse_decision(content: &Content) -> Result<ConfirmationDecision> {
        let (id, data) = content.function_response().ok_or_else(|| {
            GatekitError::Protocol("resume message carries no decision response".to_string())
        })?;
        let request_id = id.ok_or_else(|| {
            GatekitError::Protocol("decision response is missing the request identifier".to_string())
        })?;
        let approved = data.response.get("confirmed").and_then(Value::as_bool).ok_or_else(|| {
            GatekitError::Protocol("decision response is missing the 'confirmed' flag".to_string())
        })?;
        Ok(ConfirmationDecision { request_id: request_id.to_string(), approved })
    }

    fn closing_text(result: &Value) -> String {
        result
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "Request completed.".to_string())
    }

    /// Events for a completed gate call: the gate result, fulfillment
    /// results when approved, and a closing message.
    fn completion_events(
        &self,
        invocation_id: &str,
        result: Value,
        args: &Value,
        clear_pending: bool,
    ) -> (Event, u64, String) {
        let mut gate_event =
            Event::tool_result(invocation_id, &self.name, self.gate.name(), result.clone());
        if clear_pending {
            gate_event = gate_event.with_state_delta(PENDING_APPROVAL_KEY, Value::Null);
        }

        let approved = result.get("status").and_then(Value::as_str) == Some("approved");
        let fulfillment_runs = if approved && self.fulfillment.is_some() {
            args.get("count").and_then(Value::as_u64).unwrap_or(1)
        } else {
            0
        };

        (gate_event, fulfillment_runs, Self::closing_text(&result))
    }
}

#[async_trait]
impl Agent for GateAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, ctx: Arc<dyn InvocationContext>) -> Result<EventStream> {
        let invocation_id = ctx.invocation_id().to_string();

        let (outcome, args, clear_pending) = if ctx.resuming() {
            let pending = ctx
                .session_state()
                .get(PENDING_APPROVAL_KEY)
                .and_then(PendingApproval::from_value)
                .ok_or_else(|| {
                    GatekitError::Protocol(
                        "resumed turn has no pending confirmation recorded".to_string(),
                    )
                })?;
            let decision = Self::parse_decision(ctx.user_content())?;
            if decision.request_id != pending.request.id {
                return Err(GatekitError::Protocol(format!(
                    "decision answers request '{}' but request '{}' is pending",
                    decision.request_id, pending.request.id
                )));
            }
            tracing::info!(request_id = %decision.request_id, approved = decision.approved, "resuming gated call");
            let state = ConfirmationState::Decided { approved: decision.approved };
            let outcome = self.gate.check(pending.args.clone(), &state).await?;
            (outcome, pending.args, true)
        } else {
            let args = Self::parse_args(ctx.user_content())?;
            let outcome = self.gate.check(args.clone(), &ConfirmationState::Absent).await?;
            (outcome, args, false)
        };

        let author = self.name.clone();
        match outcome {
            GateOutcome::Completed(result) => {
                let (gate_event, fulfillment_runs, closing) =
                    self.completion_events(&invocation_id, result, &args, clear_pending);
                let fulfillment = self.fulfillment.clone();
                let s = stream! {
                    yield Ok(gate_event);
                    if let Some(tool) = fulfillment {
                        for _ in 0..fulfillment_runs {
                            match tool.call(args.clone()).await {
                                Ok(result) => {
                                    yield Ok(Event::tool_result(
                                        &invocation_id,
                                        &author,
                                        tool.name(),
                                        result,
                                    ));
                                }
                                Err(e) => {
                                    yield Err(e);
                                    return;
                                }
                            }
                        }
                    }
                    yield Ok(Event::message(
                        &invocation_id,
                        &author,
                        Content::new("model").with_text(closing),
                    ));
                };
                Ok(Box::pin(s))
            }
            GateOutcome::ConfirmationNeeded { hint, payload } => {
                if clear_pending {
                    // A decided call must finish one way or the other.
                    return Err(GatekitError::Tool(
                        "gate requested confirmation on a decided call".to_string(),
                    ));
                }
                let request = ConfirmationRequest::new(hint, payload);
                let pending = PendingApproval {
                    invocation_id: invocation_id.clone(),
                    request: request.clone(),
                    args,
                };
                tracing::info!(request_id = %request.id, "gated call paused for confirmation");
                let s = stream! {
                    yield Ok(Event::confirmation_requested(&invocation_id, &author, request)
                        .with_state_delta(PENDING_APPROVAL_KEY, pending.to_value()));
                };
                Ok(Box::pin(s))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use gatekit_core::{CONFIRMATION_OP, EventKind};
    use serde_json::json;
    use std::collections::HashMap;

    /// Gate that approves small counts and pauses on large ones.
    struct ThresholdGate;

    #[async_trait]
    impl GatedTool for ThresholdGate {
        fn name(&self) -> &str {
            "gate"
        }

        fn description(&self) -> &str {
            "test gate"
        }

        async fn check(
            &self,
            args: Value,
            confirmation: &ConfirmationState,
        ) -> Result<GateOutcome> {
            if let Some(approved) = confirmation.approved() {
                let status = if approved { "approved" } else { "rejected" };
                return Ok(GateOutcome::Completed(
                    json!({"status": status, "message": format!("verdict: {status}")}),
                ));
            }
            let count = args["count"].as_u64().unwrap_or(0);
            if count <= 2 {
                Ok(GateOutcome::Completed(json!({"status": "approved", "message": "auto"})))
            } else {
                Ok(GateOutcome::ConfirmationNeeded {
                    hint: format!("approve {count}?"),
                    payload: args,
                })
            }
        }
    }

    struct StubContext {
        content: Content,
        resuming: bool,
        state: HashMap<String, Value>,
    }

    impl InvocationContext for StubContext {
        fn invocation_id(&self) -> &str {
            "inv-1"
        }
        fn app_name(&self) -> &str {
            "app"
        }
        fn user_id(&self) -> &str {
            "user"
        }
        fn session_id(&self) -> &str {
            "sess-1"
        }
        fn user_content(&self) -> &Content {
            &self.content
        }
        fn resuming(&self) -> bool {
            self.resuming
        }
        fn session_state(&self) -> &HashMap<String, Value> {
            &self.state
        }
    }

    fn agent() -> GateAgent {
        GateAgent::builder("gatekeeper").gate(Arc::new(ThresholdGate)).build().unwrap()
    }

    fn fresh_ctx(args: Value) -> Arc<StubContext> {
        Arc::new(StubContext {
            content: Content::new("user").with_text(args.to_string()),
            resuming: false,
            state: HashMap::new(),
        })
    }

    fn paused_state(request: &ConfirmationRequest, args: Value) -> HashMap<String, Value> {
        let pending = PendingApproval {
            invocation_id: "inv-1".to_string(),
            request: request.clone(),
            args,
        };
        HashMap::from([(PENDING_APPROVAL_KEY.to_string(), pending.to_value())])
    }

    fn decision_ctx(request_id: &str, approved: bool, state: HashMap<String, Value>) -> Arc<StubContext> {
        Arc::new(StubContext {
            content: Content::new("user").with_function_response(
                request_id,
                CONFIRMATION_OP,
                json!({"confirmed": approved}),
            ),
            resuming: true,
            state,
        })
    }

    async fn collect(agent: &GateAgent, ctx: Arc<StubContext>) -> Vec<Event> {
        let stream = agent.run(ctx).await.unwrap();
        stream.map(|r| r.unwrap()).collect().await
    }

    #[tokio::test]
    async fn test_builder_requires_gate() {
        let err = GateAgent::builder("g").build().err().unwrap();
        assert!(matches!(err, GatekitError::Config(_)));
    }

    #[tokio::test]
    async fn test_small_request_completes_without_pause() {
        let events = collect(&agent(), fresh_ctx(json!({"count": 1}))).await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].tool_output().unwrap().1["status"], "approved");
        assert!(events.iter().all(|e| e.confirmation_request().is_none()));
    }

    #[tokio::test]
    async fn test_large_request_pauses_with_bookkeeping() {
        let events = collect(&agent(), fresh_ctx(json!({"count": 5}))).await;
        assert_eq!(events.len(), 1);
        let request = events[0].confirmation_request().unwrap();
        assert!(request.hint.contains('5'));
        let recorded = events[0].actions.state_delta.get(PENDING_APPROVAL_KEY).unwrap();
        let pending = PendingApproval::from_value(recorded).unwrap();
        assert_eq!(pending.invocation_id, "inv-1");
        assert_eq!(pending.request.id, request.id);
    }

    #[tokio::test]
    async fn test_resume_approved_completes_and_clears() {
        let request = ConfirmationRequest::new("approve 5?", json!({"count": 5}));
        let state = paused_state(&request, json!({"count": 5}));
        let events = collect(&agent(), decision_ctx(&request.id, true, state)).await;

        let (_, result) = events[0].tool_output().unwrap();
        assert_eq!(result["status"], "approved");
        assert_eq!(
            events[0].actions.state_delta.get(PENDING_APPROVAL_KEY),
            Some(&Value::Null)
        );
    }

    #[tokio::test]
    async fn test_resume_rejected_is_the_only_other_outcome() {
        let request = ConfirmationRequest::new("approve 5?", json!({"count": 5}));
        let state = paused_state(&request, json!({"count": 5}));
        let events = collect(&agent(), decision_ctx(&request.id, false, state)).await;
        assert_eq!(events[0].tool_output().unwrap().1["status"], "rejected");
    }

    #[tokio::test]
    async fn test_mismatched_request_id_is_protocol_error() {
        let request = ConfirmationRequest::new("approve 5?", json!({"count": 5}));
        let state = paused_state(&request, json!({"count": 5}));
        let err = agent().run(decision_ctx("confirm-other", true, state)).await.err().unwrap();
        assert!(matches!(err, GatekitError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_resume_without_pending_is_protocol_error() {
        let err = agent()
            .run(decision_ctx("confirm-x", true, HashMap::new()))
            .await
            .err().unwrap();
        assert!(matches!(err, GatekitError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_resume_without_decision_part_is_protocol_error() {
        let request = ConfirmationRequest::new("approve 5?", json!({"count": 5}));
        let ctx = Arc::new(StubContext {
            content: Content::new("user").with_text("just text"),
            resuming: true,
            state: paused_state(&request, json!({"count": 5})),
        });
        let err = agent().run(ctx).await.err().unwrap();
        assert!(matches!(err, GatekitError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_non_json_input_is_execution_error() {
        let ctx = Arc::new(StubContext {
            content: Content::new("user").with_text("give me five images"),
            resuming: false,
            state: HashMap::new(),
        });
        let err = agent().run(ctx).await.err().unwrap();
        assert!(matches!(err, GatekitError::Execution(_)));
    }

    #[tokio::test]
    async fn test_fulfillment_runs_once_per_approved_unit() {
        struct CountingTool;

        #[async_trait]
        impl Tool for CountingTool {
            fn name(&self) -> &str {
                "render"
            }
            fn description(&self) -> &str {
                "renders one item"
            }
            async fn call(&self, _args: Value) -> Result<Value> {
                Ok(json!({"status": "success"}))
            }
        }

        let agent = GateAgent::builder("gatekeeper")
            .gate(Arc::new(ThresholdGate))
            .fulfillment(Arc::new(CountingTool))
            .build()
            .unwrap();

        let events = collect(&agent, fresh_ctx(json!({"count": 2}))).await;
        let renders = events
            .iter()
            .filter(|e| matches!(&e.kind, EventKind::ToolResult { name, .. } if name == "render"))
            .count();
        assert_eq!(renders, 2);
        // gate result + 2 renders + closing message
        assert_eq!(events.len(), 4);
    }
}
