//! HTTP DTOs for the chat endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
///
/// Every field is optional at the wire level so a missing message reaches
/// the handler and fails validation with the usual 400.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Successful chat reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_camel_case_user_id() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","userId":"u-1"}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert_eq!(req.user_id.as_deref(), Some("u-1"));
        assert!(req.context.is_none());
    }

    #[test]
    fn empty_object_deserializes() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());
    }
}
