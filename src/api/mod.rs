//! Request-dispatch and result-normalization pipeline
//!
//! A single request moves through the stages strictly in order:
//! parse/validate, dispatch, normalize, encode. Any stage failure maps to
//! exactly one error variant before a byte is written; nothing propagates
//! uncaught to the transport layer.

pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod request;
pub mod response;

pub use dispatch::{execute, Dispatched};
pub use error::{ErrorBody, FieldIssue, GatewayError, GatewayResult};
pub use normalize::{normalize, NormalizedResult};
pub use request::LoadRequest;
pub use response::{HealthResponse, LoadResponse, LoadersResponse};
