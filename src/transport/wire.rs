use serde::{Deserialize, Serialize};

use crate::gateway::{GatewayResult, Outcome, Query};
use crate::utils::GatewayError;

/// Current request body: `{"message": .., "model_name": ..}`.
///
/// Extra fields are ignored, except that a bare legacy `model` key
/// without `model_name` is refused.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Shape older web clients still send: `{"message": .., "model": ..}`
#[derive(Debug, Deserialize)]
pub struct LegacyChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Body of every structured reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&GatewayResult> for ChatResponse {
    fn from(result: &GatewayResult) -> Self {
        Self {
            response: result.text.clone(),
            action: result.action_hint.clone(),
            error: match result.outcome {
                Outcome::Failed(kind) => Some(kind.code().to_string()),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub model_name: String,
}

/// One way of turning a frame into a [`Query`]
pub type DecodeStrategy = fn(&[u8]) -> Result<Query, serde_json::Error>;

pub fn decode_current(bytes: &[u8]) -> Result<Query, serde_json::Error> {
    let request: ChatRequest = serde_json::from_slice(bytes)?;
    match (request.model_name, request.model) {
        (Some(model_name), _) => Ok(Query::new(request.message, model_name)),
        (None, Some(_)) => Err(serde::de::Error::custom(
            "`model` is not accepted, send `model_name`",
        )),
        (None, None) => Ok(Query::new(request.message, "")),
    }
}

pub fn decode_legacy(bytes: &[u8]) -> Result<Query, serde_json::Error> {
    let request: LegacyChatRequest = serde_json::from_slice(bytes)?;
    Ok(Query::new(request.message, request.model.unwrap_or_default()))
}

/// Request/response bodies only accept the current shape
pub const HTTP_STRATEGIES: &[DecodeStrategy] = &[decode_current as DecodeStrategy];

/// Sessions fall back to the legacy shape
pub const SESSION_STRATEGIES: &[DecodeStrategy] =
    &[decode_current as DecodeStrategy, decode_legacy];

/// Try each strategy in order; the first success wins.
///
/// On total failure the error of the first strategy is reported, since that
/// is the shape clients are expected to send.
pub fn decode_query(
    bytes: &[u8],
    strategies: &[DecodeStrategy],
) -> Result<Query, GatewayError> {
    let mut first_error = None;
    for (index, strategy) in strategies.iter().enumerate() {
        match strategy(bytes) {
            Ok(query) => {
                if index > 0 {
                    tracing::debug!("Decoded message with fallback strategy #{}", index);
                }
                return Ok(query);
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    Err(GatewayError::Decode(
        first_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no decode strategy configured".to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FailureKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_current_shape() {
        let body = br#"{"message":"hi","model_name":"llama4"}"#;
        let query = decode_query(body, HTTP_STRATEGIES).unwrap();
        assert_eq!(query, Query::new("hi", "llama4"));
    }

    #[test]
    fn test_extra_fields_keep_model_name() {
        let body = br#"{"message":"hi","model_name":"llama4","stream":false}"#;
        assert_eq!(
            decode_query(body, HTTP_STRATEGIES).unwrap(),
            Query::new("hi", "llama4")
        );
        assert_eq!(
            decode_query(body, SESSION_STRATEGIES).unwrap(),
            Query::new("hi", "llama4")
        );
    }

    #[test]
    fn test_model_name_wins_over_legacy_key() {
        let body = br#"{"message":"hi","model_name":"llama4","model":"phi4"}"#;
        assert_eq!(
            decode_query(body, SESSION_STRATEGIES).unwrap(),
            Query::new("hi", "llama4")
        );
    }

    #[test]
    fn test_model_name_is_optional() {
        let query = decode_query(br#"{"message":"hi"}"#, HTTP_STRATEGIES).unwrap();
        assert_eq!(query.requested_model, "");
    }

    #[test]
    fn test_legacy_shape_only_on_sessions() {
        let body = br#"{"message":"hi","model":"phi4"}"#;
        assert!(decode_query(body, HTTP_STRATEGIES).is_err());
        assert_eq!(
            decode_query(body, SESSION_STRATEGIES).unwrap(),
            Query::new("hi", "phi4")
        );
    }

    #[test]
    fn test_garbage_reports_first_strategy_error() {
        let err = decode_query(b"not json", SESSION_STRATEGIES).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
        assert!(err.to_string().starts_with("Error parsing request:"));
    }

    #[test]
    fn test_response_encoding() {
        let suggested = ChatResponse::from(&GatewayResult::install_suggested("llama4"));
        let json = serde_json::to_value(&suggested).unwrap();
        assert_eq!(json["action"], "pull:llama4");
        assert!(json.get("error").is_none());

        let completed = ChatResponse::from(&GatewayResult::completed("ok"));
        let completed = serde_json::to_value(completed).unwrap();
        assert_eq!(completed, serde_json::json!({ "response": "ok" }));

        let timeout = GatewayError::GenerationTimeout("60s".into());
        let failed = ChatResponse::from(&GatewayResult::failed(&timeout));
        assert_eq!(failed.error.as_deref(), Some(FailureKind::Timeout.code()));
    }
}
