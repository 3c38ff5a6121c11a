use gatekit_core::Event;
use serde_json::Value;

/// Lifecycle of one workflow run.
///
/// ```text
/// Started -> Running -> {Completed, Paused}
/// Paused -> Resumed -> {Completed, Paused}
/// ```
///
/// `Resumed` re-enters `Running` semantics, so a resumed path may pause
/// again when a second gated call is chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Started,
    Running,
    Paused,
    Resumed,
    Completed,
}

/// Outcome of a driven workflow run: every event observed, in order, plus
/// how many times the run paused on the way to completion.
#[derive(Debug)]
pub struct WorkflowRun {
    pub session_id: String,
    pub state: WorkflowState,
    pub pauses: usize,
    pub events: Vec<Event>,
}

impl WorkflowRun {
    fn last_tool_result(&self) -> Option<&Value> {
        self.events.iter().rev().find_map(|e| e.tool_output().map(|(_, result)| result))
    }

    /// Status field of the last tool result, e.g. `"approved"` or
    /// `"rejected"`. None when the run produced no tool output; that is a
    /// normal empty completion, not an error.
    pub fn final_status(&self) -> Option<&str> {
        self.last_tool_result()?.get("status")?.as_str()
    }

    /// Ticket issued by the gate, when one was.
    pub fn ticket(&self) -> Option<&str> {
        self.last_tool_result()?.get("ticket")?.as_str()
    }

    /// Text of the last message event.
    pub fn final_message(&self) -> Option<String> {
        self.events.iter().rev().find_map(|e| e.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekit_core::Content;
    use serde_json::json;

    #[test]
    fn test_empty_run_is_a_normal_completion() {
        let run = WorkflowRun {
            session_id: "sess_abc".to_string(),
            state: WorkflowState::Completed,
            pauses: 0,
            events: Vec::new(),
        };
        assert_eq!(run.final_status(), None);
        assert_eq!(run.ticket(), None);
        assert_eq!(run.final_message(), None);
    }

    #[test]
    fn test_result_accessors_use_last_tool_result() {
        let run = WorkflowRun {
            session_id: "sess_abc".to_string(),
            state: WorkflowState::Completed,
            pauses: 1,
            events: vec![
                Event::tool_result("inv-1", "agent", "gate", json!({"status": "pending"})),
                Event::tool_result(
                    "inv-1",
                    "agent",
                    "gate",
                    json!({"status": "approved", "ticket": "batch-12ab34cd-HUMAN"}),
                ),
                Event::message("inv-1", "agent", Content::new("model").with_text("done")),
            ],
        };
        assert_eq!(run.final_status(), Some("approved"));
        assert_eq!(run.ticket(), Some("batch-12ab34cd-HUMAN"));
        assert_eq!(run.final_message(), Some("done".to_string()));
    }
}
