//! Result normalization
//!
//! Converts a loader's raw output into a uniform ordered row sequence plus
//! count, one conversion rule per output variant. Ordering is preserved
//! exactly as produced by the loader; nothing is reordered or deduplicated.

use serde_json::Value;

use crate::frame::Frame;
use crate::loaders::LoaderOutput;

use super::error::{GatewayError, GatewayResult};

/// The uniform result shape consumed by the response encoder.
///
/// `row_count` always equals `rows.len()`; when a limit was applied it is
/// at most that limit.
#[derive(Debug)]
pub struct NormalizedResult {
    pub rows: Vec<Value>,
    pub row_count: usize,
}

impl NormalizedResult {
    fn from_rows(rows: Vec<Value>) -> Self {
        Self {
            row_count: rows.len(),
            rows,
        }
    }
}

/// Normalize a loader output, applying the optional row limit.
///
/// A deferred plan is forced here, eagerly and synchronously; this is the
/// one point where that potentially expensive work executes. A scalar is
/// wrapped as a single-element sequence and the limit has no effect on it.
pub fn normalize(output: LoaderOutput, limit: Option<usize>) -> GatewayResult<NormalizedResult> {
    let result = match output {
        LoaderOutput::Deferred(plan) => {
            let frame = plan.collect().map_err(|failure| GatewayError::LoaderFailed {
                detail: failure.to_string(),
            })?;
            frame_rows(frame, limit)
        }
        LoaderOutput::Frame(frame) => frame_rows(frame, limit),
        LoaderOutput::Rows(mut rows) => {
            if let Some(limit) = limit {
                rows.truncate(limit);
            }
            NormalizedResult::from_rows(rows)
        }
        LoaderOutput::Scalar(value) => NormalizedResult::from_rows(vec![value]),
    };

    Ok(result)
}

fn frame_rows(frame: Frame, limit: Option<usize>) -> NormalizedResult {
    let frame = match limit {
        Some(limit) => frame.head(limit),
        None => frame,
    };
    NormalizedResult::from_rows(frame.into_records())
}
