//! Response envelopes
//!
//! Success payloads for the three endpoints. Error payloads live next to
//! the error taxonomy; the two shapes are never merged.

use serde::Serialize;
use serde_json::Value;

use crate::registry::LoaderDescriptor;

/// Success envelope for a loader invocation.
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub loader: String,
    pub row_count: usize,
    pub data: Vec<Value>,
}

/// Registry introspection envelope.
#[derive(Debug, Serialize)]
pub struct LoadersResponse {
    pub loaders: Vec<LoaderDescriptor>,
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
