//! Uniform tool results.
//!
//! Every tool outcome is an rmcp [`CallToolResult`]: a list of content blocks
//! plus an `is_error` flag. Handlers build results only through the
//! constructors here, so success and failure share one shape and error values
//! of any kind are turned into text in exactly one place ([`error_text`]).

use rmcp::model::{CallToolResult, Content, RawContent};
use serde::Serialize;
use serde_json::Value;

use super::ToolError;
use crate::domains::miro::ApiError;

const REDACTED: &str = "[REDACTED]";
const BEARER: &str = "bearer ";

/// Any error value a handler or remote call can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// A plain message, used as-is.
    Message(String),
    /// A structured error document, serialized to JSON text.
    Structured(Value),
    /// A remote rejection: HTTP status plus the remote error document.
    Remote { status: u16, body: Value },
}

impl From<&str> for ErrorPayload {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<Value> for ErrorPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(msg) => Self::Message(msg),
            other => Self::Structured(other),
        }
    }
}

impl From<&ToolError> for ErrorPayload {
    fn from(err: &ToolError) -> Self {
        match err {
            ToolError::Remote(api) => Self::from(api),
            other => Self::Message(other.to_string()),
        }
    }
}

impl From<ToolError> for ErrorPayload {
    fn from(err: ToolError) -> Self {
        Self::from(&err)
    }
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Status { status, body } => Self::Remote {
                status: *status,
                body: body.clone(),
            },
            other => Self::Message(other.to_string()),
        }
    }
}

impl From<ApiError> for ErrorPayload {
    fn from(err: ApiError) -> Self {
        Self::from(&err)
    }
}

/// Turn an error payload into the text carried by an error result.
pub fn error_text(payload: &ErrorPayload) -> String {
    match payload {
        ErrorPayload::Message(msg) => msg.clone(),
        ErrorPayload::Structured(value) => value.to_string(),
        ErrorPayload::Remote { status, body } => match body {
            Value::Null => format!("Miro API returned {}", status),
            Value::String(text) => format!("Miro API returned {}: {}", status, text),
            other => format!("Miro API returned {}: {}", status, other),
        },
    }
}

/// Success result carrying `text` as its single block.
pub fn success_text(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Success result carrying `payload` as pretty-printed JSON.
pub fn success_json<T: Serialize + ?Sized>(payload: &T) -> CallToolResult {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => success_text(text),
        Err(e) => error(format!("Failed to serialize result: {}", e)),
    }
}

/// Error result carrying the text form of `payload` as its single block.
pub fn error(payload: impl Into<ErrorPayload>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error_text(&payload.into()))])
}

/// Whether a result reports failure. An absent flag means success.
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

/// Text of the first content block, if it is a text block.
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}

/// Guarantee at least one content block.
pub fn ensure_content(mut result: CallToolResult) -> CallToolResult {
    if result.content.is_empty() {
        result.content.push(Content::text(String::new()));
    }
    result
}

/// Scrub secrets from every text block of an error result.
pub fn redact_result(mut result: CallToolResult, secrets: &[String]) -> CallToolResult {
    if !is_error(&result) {
        return result;
    }
    for block in result.content.iter_mut() {
        if let RawContent::Text(ref mut t) = block.raw {
            t.text = redact(&t.text, secrets);
        }
    }
    result
}

/// Replace known secrets and `Bearer <token>` fragments with `[REDACTED]`.
pub fn redact(text: &str, secrets: &[String]) -> String {
    let mut out = text.to_string();
    for secret in secrets.iter().filter(|s| !s.is_empty()) {
        out = out.replace(secret.as_str(), REDACTED);
    }
    redact_bearer(&out)
}

fn redact_bearer(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find(BEARER) {
        let after_keyword = cursor + found + BEARER.len();
        let token_start = text[after_keyword..]
            .find(|c: char| !c.is_whitespace())
            .map_or(text.len(), |skip| after_keyword + skip);
        let token_len = text[token_start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '}'))
            .unwrap_or(text.len() - token_start);

        out.push_str(&text[cursor..token_start]);
        if token_len > 0 && !text[token_start..].starts_with(REDACTED) {
            out.push_str(REDACTED);
        } else {
            out.push_str(&text[token_start..token_start + token_len]);
        }
        cursor = token_start + token_len;
    }

    out.push_str(&text[cursor..]);
    out
}
