//! Load request parsing and validation
//!
//! An inbound body is parsed in two steps: JSON syntax first (a failure
//! there is a bad request, not a validation error), then field validation.
//! Field violations are collected and reported together rather than
//! fail-fast, so the caller sees every problem in one response.

use serde_json::{Map, Value};

use super::error::{FieldIssue, GatewayError, GatewayResult};

/// A validated loader invocation request.
///
/// `limit` stays signed here: the type admits a negative value so the
/// dispatcher can reject it with its own defensive check, which also covers
/// programmatic callers that construct a `LoadRequest` directly.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Name of the loader to run.
    pub loader: String,
    /// Keyword arguments forwarded to the loader.
    pub params: Map<String, Value>,
    /// Optional number of rows to include in the response.
    pub limit: Option<i64>,
}

impl LoadRequest {
    /// Parse and validate a raw request body.
    ///
    /// An empty body is treated as `{}` and then fails field validation
    /// because `loader` is required; it is not a JSON parse error.
    pub fn parse(raw: &[u8]) -> GatewayResult<Self> {
        let raw: &[u8] = if raw.is_empty() { b"{}" } else { raw };

        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| GatewayError::InvalidJson(e.to_string()))?;

        let body = match value {
            Value::Object(map) => map,
            other => {
                return Err(GatewayError::ValidationFailed(vec![FieldIssue::new(
                    "body",
                    format!("expected a JSON object, got {}", json_type_name(&other)),
                )]))
            }
        };

        let mut issues = Vec::new();

        let loader = match body.get("loader") {
            None | Some(Value::Null) => {
                issues.push(FieldIssue::new("loader", "field is required"));
                String::new()
            }
            Some(Value::String(name)) if name.is_empty() => {
                issues.push(FieldIssue::new("loader", "must be a non-empty string"));
                String::new()
            }
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                issues.push(FieldIssue::new(
                    "loader",
                    format!("must be a string, got {}", json_type_name(other)),
                ));
                String::new()
            }
        };

        let params = match body.get("params") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                issues.push(FieldIssue::new(
                    "params",
                    format!("must be an object, got {}", json_type_name(other)),
                ));
                Map::new()
            }
        };

        let limit = match body.get("limit") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_i64() {
                Some(n) => Some(n),
                None => {
                    issues.push(FieldIssue::new(
                        "limit",
                        format!("must be an integer, got {}", json_type_name(value)),
                    ));
                    None
                }
            },
        };

        if !issues.is_empty() {
            return Err(GatewayError::ValidationFailed(issues));
        }

        Ok(Self {
            loader,
            params,
            limit,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
