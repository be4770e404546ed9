//! Request dispatch
//!
//! Resolves a validated request against the registry, checks the supplied
//! parameters against the loader's declaration, and invokes the loader. A
//! single invocation attempt, no retries, no caching: identical requests
//! re-invoke the loader every time.

use crate::loaders::{LoaderOutput, Params};
use crate::registry::{LoaderEntry, Registry};

use super::error::{GatewayError, GatewayResult};
use super::request::LoadRequest;

/// A successfully dispatched invocation: the loader's raw output plus the
/// coerced row limit to apply during normalization.
#[derive(Debug)]
pub struct Dispatched {
    pub output: LoaderOutput,
    pub limit: Option<usize>,
}

/// Resolve, validate and invoke.
pub fn execute(registry: &Registry, request: &LoadRequest) -> GatewayResult<Dispatched> {
    let entry = registry
        .resolve(&request.loader)
        .ok_or_else(|| GatewayError::UnknownLoader(request.loader.clone()))?;

    // Re-checked here even though the validator rejects non-integers:
    // programmatic callers can construct a request without going through it.
    let limit = coerce_limit(request.limit)?;

    check_params(entry, &request.params)?;

    let output = entry
        .loader
        .call(&request.params)
        .map_err(|failure| GatewayError::LoaderFailed {
            detail: failure.to_string(),
        })?;

    Ok(Dispatched { output, limit })
}

fn coerce_limit(limit: Option<i64>) -> GatewayResult<Option<usize>> {
    match limit {
        None => Ok(None),
        Some(n) if n < 0 => Err(GatewayError::NegativeLimit),
        Some(n) => Ok(Some(n as usize)),
    }
}

/// Validate the supplied parameter map against the loader's declaration.
///
/// Unknown names, missing required parameters and type mismatches are all
/// parameter-shape errors, reported before the loader runs.
fn check_params(entry: &LoaderEntry, params: &Params) -> GatewayResult<()> {
    for name in params.keys() {
        if !entry.params.iter().any(|spec| spec.name == name) {
            return Err(GatewayError::InvalidParams(format!(
                "{}() got an unexpected parameter '{}'",
                entry.name, name
            )));
        }
    }

    for spec in &entry.params {
        match params.get(spec.name) {
            None => {
                if spec.required {
                    return Err(GatewayError::InvalidParams(format!(
                        "{}() is missing required parameter '{}'",
                        entry.name, spec.name
                    )));
                }
            }
            Some(value) if value.is_null() && !spec.required => {}
            Some(value) => {
                if !spec.ty.admits(value) {
                    return Err(GatewayError::InvalidParams(format!(
                        "parameter '{}' of {}() expects {}",
                        spec.name,
                        entry.name,
                        spec.ty.label()
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Datum, Frame};
    use crate::loaders::{Loader, LoaderFailure};
    use crate::registry::{ParamSpec, ParamType};
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    struct TeamsFixture;

    impl Loader for TeamsFixture {
        fn call(&self, _params: &Params) -> Result<LoaderOutput, LoaderFailure> {
            let mut frame = Frame::new(vec!["team".to_string()]);
            frame.push_row(vec![Datum::Str("KC".to_string())]);
            Ok(LoaderOutput::Frame(frame))
        }
    }

    struct FailingFixture;

    impl Loader for FailingFixture {
        fn call(&self, _params: &Params) -> Result<LoaderOutput, LoaderFailure> {
            Err(LoaderFailure::new("upstream unavailable"))
        }
    }

    fn fixture_registry() -> Registry {
        Registry::new(vec![
            crate::registry::LoaderEntry::new(
                "load_teams",
                "Teams fixture.",
                vec![
                    ParamSpec::optional("current", ParamType::Bool, json!(true)),
                    ParamSpec::required("season", ParamType::Int),
                ],
                Arc::new(TeamsFixture),
            ),
            crate::registry::LoaderEntry::new(
                "load_broken",
                "Always fails.",
                Vec::new(),
                Arc::new(FailingFixture),
            ),
        ])
    }

    fn request(loader: &str, params: Value, limit: Option<i64>) -> LoadRequest {
        LoadRequest {
            loader: loader.to_string(),
            params: params.as_object().cloned().unwrap_or_else(Map::new),
            limit,
        }
    }

    #[test]
    fn test_unknown_loader_names_the_loader() {
        let registry = fixture_registry();
        let err = execute(&registry, &request("nonexistent", json!({}), None)).unwrap_err();
        match err {
            GatewayError::UnknownLoader(name) => assert_eq!(name, "nonexistent"),
            other => panic!("expected unknown loader, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_limit_rejected_before_invocation() {
        let registry = fixture_registry();
        let err = execute(
            &registry,
            &request("load_teams", json!({"season": 2024}), Some(-3)),
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::NegativeLimit));
    }

    #[test]
    fn test_unexpected_parameter_rejected() {
        let registry = fixture_registry();
        let err = execute(
            &registry,
            &request("load_teams", json!({"season": 2024, "bogus_kw": 1}), None),
        )
        .unwrap_err();
        match err {
            GatewayError::InvalidParams(detail) => assert!(detail.contains("bogus_kw")),
            other => panic!("expected parameter error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_parameter_rejected() {
        let registry = fixture_registry();
        let err = execute(&registry, &request("load_teams", json!({}), None)).unwrap_err();
        match err {
            GatewayError::InvalidParams(detail) => assert!(detail.contains("season")),
            other => panic!("expected parameter error, got {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let registry = fixture_registry();
        let err = execute(
            &registry,
            &request("load_teams", json!({"season": "2024"}), None),
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidParams(_)));
    }

    #[test]
    fn test_null_is_accepted_for_optional_parameters() {
        let registry = fixture_registry();
        let dispatched = execute(
            &registry,
            &request("load_teams", json!({"season": 2024, "current": null}), None),
        )
        .unwrap();
        assert!(matches!(dispatched.output, LoaderOutput::Frame(_)));
    }

    #[test]
    fn test_loader_failure_becomes_internal_error() {
        let registry = fixture_registry();
        let err = execute(&registry, &request("load_broken", json!({}), None)).unwrap_err();
        match err {
            GatewayError::LoaderFailed { detail } => {
                assert_eq!(detail, "upstream unavailable");
            }
            other => panic!("expected loader failure, got {other:?}"),
        }
    }

    #[test]
    fn test_limit_is_coerced() {
        let registry = fixture_registry();
        let dispatched = execute(
            &registry,
            &request("load_teams", json!({"season": 2024}), Some(5)),
        )
        .unwrap();
        assert_eq!(dispatched.limit, Some(5));
    }
}
