//! Loader contract and the builtin loader table
//!
//! A loader is an opaque data-producing function: it receives a JSON
//! parameter map and returns one of a closed set of output shapes. The
//! gateway never looks inside a loader; it only classifies what comes back.

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::frame::Frame;
use crate::registry::{LoaderEntry, ParamSpec, ParamType, Registry};

mod mappings;
mod nflverse;

pub use mappings::MappingLoader;
pub use nflverse::{current_season, NflverseClient};

/// Keyword parameters forwarded to a loader.
pub type Params = Map<String, Value>;

/// Failure raised by a loader body.
///
/// Carries a human-readable detail string only; the gateway reports it as an
/// internal failure and never exposes anything beyond the message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct LoaderFailure(pub String);

impl LoaderFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

impl From<reqwest::Error> for LoaderFailure {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<csv::Error> for LoaderFailure {
    fn from(err: csv::Error) -> Self {
        Self(err.to_string())
    }
}

/// A deferred tabular plan: the fetch/compute work runs when the plan is
/// collected, not when the loader returns.
pub struct DeferredFrame(Box<dyn FnOnce() -> Result<Frame, LoaderFailure> + Send>);

impl DeferredFrame {
    pub fn new<F>(plan: F) -> Self
    where
        F: FnOnce() -> Result<Frame, LoaderFailure> + Send + 'static,
    {
        Self(Box::new(plan))
    }

    /// Force full evaluation of the plan.
    pub fn collect(self) -> Result<Frame, LoaderFailure> {
        (self.0)()
    }
}

impl std::fmt::Debug for DeferredFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeferredFrame")
    }
}

/// The closed set of shapes a loader may return.
#[derive(Debug)]
pub enum LoaderOutput {
    /// A lazily-evaluated tabular plan, forced at normalization time.
    Deferred(DeferredFrame),
    /// A realized table.
    Frame(Frame),
    /// An ordered sequence of arbitrary JSON elements.
    Rows(Vec<Value>),
    /// A single scalar, string, or mapping.
    Scalar(Value),
}

/// An opaque data-loading function.
pub trait Loader: Send + Sync {
    /// Invoke the loader with validated keyword parameters.
    fn call(&self, params: &Params) -> Result<LoaderOutput, LoaderFailure>;
}

// ==================
// Builtin table
// ==================

/// Build the builtin loader registry.
///
/// The table is fixed for the process lifetime; entries are never added or
/// removed at runtime.
pub fn builtin() -> Registry {
    let client = Arc::new(NflverseClient::default());

    Registry::new(vec![
        LoaderEntry::new(
            "load_schedules",
            "Load game schedules and results.\n\n\
             Covers one row per game with kickoff dates, scores and betting \
             lines sourced from the nflverse games asset.",
            vec![ParamSpec::optional("seasons", ParamType::IntList, Value::Null)],
            Arc::new(nflverse::SchedulesLoader::new(client.clone())),
        ),
        LoaderEntry::new(
            "load_pbp",
            "Load play-by-play data.\n\n\
             One row per play; defaults to the current season when no \
             seasons are supplied.",
            vec![ParamSpec::optional("seasons", ParamType::IntList, Value::Null)],
            Arc::new(nflverse::PlayByPlayLoader::new(client.clone())),
        ),
        LoaderEntry::new(
            "load_injuries",
            "Load weekly injury reports.\n\n\
             One row per listed player and week; defaults to the current \
             season when no seasons are supplied.",
            vec![ParamSpec::optional("seasons", ParamType::IntList, Value::Null)],
            Arc::new(nflverse::InjuriesLoader::new(client.clone())),
        ),
        LoaderEntry::new(
            "load_players",
            "Load the player master table.\n\n\
             One row per player with identifiers, position and roster \
             metadata.",
            Vec::new(),
            Arc::new(nflverse::PlayersLoader::new(client.clone())),
        ),
        LoaderEntry::new(
            "load_teams",
            "Load team descriptions.\n\n\
             One row per franchise; pass current=false to include historical \
             season entries.",
            vec![ParamSpec::optional("current", ParamType::Bool, Value::Bool(true))],
            Arc::new(nflverse::TeamsLoader::new(client)),
        ),
        LoaderEntry::new(
            "team_abbr_mapping",
            "Mapping of alternate team abbreviations to current codes.\n\n\
             Relocated franchises map to their present-day abbreviation.",
            Vec::new(),
            Arc::new(MappingLoader::new(mappings::TEAM_ABBR_MAPPING)),
        ),
        LoaderEntry::new(
            "team_abbr_mapping_norelocate",
            "Mapping of alternate team abbreviations, keeping relocated \
             franchises at their historical codes.",
            Vec::new(),
            Arc::new(MappingLoader::new(mappings::TEAM_ABBR_MAPPING_NORELOCATE)),
        ),
        LoaderEntry::new(
            "player_name_mapping",
            "Mapping of alternate player name spellings to canonical names.",
            Vec::new(),
            Arc::new(MappingLoader::new(mappings::PLAYER_NAME_MAPPING)),
        ),
    ])
}
