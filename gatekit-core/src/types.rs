use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponseData {
    pub name: String,
    pub response: Value,
}

/// A role-attributed message exchanged between the caller and an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionCall {
        name: String,
        args: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    FunctionResponse {
        function_response: FunctionResponseData,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl Content {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), parts: Vec::new() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text { text: text.into() });
        self
    }

    /// Add a function response keyed by the call id it answers.
    pub fn with_function_response(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        response: Value,
    ) -> Self {
        self.parts.push(Part::FunctionResponse {
            function_response: FunctionResponseData { name: name.into(), response },
            id: Some(id.into()),
        });
        self
    }

    /// Concatenated text of all text parts, or None when there are none.
    pub fn text(&self) -> Option<String> {
        let text: String = self.parts.iter().filter_map(|p| p.text()).collect::<Vec<_>>().join("");
        if text.is_empty() { None } else { Some(text) }
    }

    /// First function-response part, as `(id, data)`.
    pub fn function_response(&self) -> Option<(Option<&str>, &FunctionResponseData)> {
        self.parts.iter().find_map(|p| match p {
            Part::FunctionResponse { function_response, id } => {
                Some((id.as_deref(), function_response))
            }
            _ => None,
        })
    }
}

impl Part {
    /// Returns the text content if this is a Text part, None otherwise
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Create a new text part
    pub fn text_part(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}
