//! nflverse-backed frame loaders
//!
//! These loaders fetch CSV assets from the nflverse data releases and parse
//! them into frames. Fetches are synchronous and blocking; callers are
//! expected to run them off the async worker.

use std::sync::{Arc, OnceLock};

use chrono::{Datelike, NaiveDate, Utc};
use serde_json::Value;

use crate::frame::{Datum, Frame};

use super::{DeferredFrame, Loader, LoaderFailure, LoaderOutput, Params};

/// Release asset root for nflverse data.
const NFLVERSE_RELEASE_BASE: &str =
    "https://github.com/nflverse/nflverse-data/releases/download";

/// Blocking HTTP client for nflverse release assets.
///
/// The underlying client is built on first fetch, which always runs on the
/// blocking pool, never on an async worker.
pub struct NflverseClient {
    base: String,
    http: OnceLock<reqwest::blocking::Client>,
}

impl Default for NflverseClient {
    fn default() -> Self {
        Self::new(NFLVERSE_RELEASE_BASE)
    }
}

impl NflverseClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            http: OnceLock::new(),
        }
    }

    /// Fetch a CSV asset and parse it into a frame.
    pub fn fetch_csv(&self, path: &str) -> Result<Frame, LoaderFailure> {
        let http = self.http.get_or_init(reqwest::blocking::Client::new);
        let url = format!("{}/{}", self.base, path);
        let response = http.get(&url).send()?.error_for_status()?;
        let body = response.bytes()?;
        parse_csv(&body)
    }
}

/// Parse CSV bytes into a frame, inferring cell types per value.
pub fn parse_csv(bytes: &[u8]) -> Result<Frame, LoaderFailure> {
    let mut reader = csv::Reader::from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(LoaderFailure::from)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut frame = Frame::new(columns);
    for record in reader.records() {
        let record = record.map_err(LoaderFailure::from)?;
        frame.push_row(record.iter().map(parse_cell).collect());
    }
    Ok(frame)
}

/// Infer a cell value from its CSV text.
///
/// Empty cells become null; integers, floats, booleans and ISO dates are
/// recognized, everything else stays a string.
fn parse_cell(text: &str) -> Datum {
    if text.is_empty() {
        return Datum::Null;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Datum::Int(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        return Datum::Float(f);
    }
    match text {
        "TRUE" | "true" => return Datum::Bool(true),
        "FALSE" | "false" => return Datum::Bool(false),
        _ => {}
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Datum::Date(d);
    }
    Datum::Str(text.to_string())
}

/// The season a given date falls in. Seasons roll over on September 1.
pub fn current_season(today: NaiveDate) -> i32 {
    if today.month() >= 9 {
        today.year()
    } else {
        today.year() - 1
    }
}

fn season_today() -> i32 {
    current_season(Utc::now().date_naive())
}

/// Read the validated `seasons` parameter; explicit null means unset.
fn seasons_param(params: &Params) -> Option<Vec<i64>> {
    params
        .get("seasons")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_i64).collect())
}

/// Keep only rows whose `season` column is in `seasons`.
fn filter_seasons(frame: Frame, seasons: &[i64]) -> Result<Frame, LoaderFailure> {
    let index = frame
        .column_index("season")
        .ok_or_else(|| LoaderFailure::new("asset is missing a 'season' column"))?;
    Ok(frame.retain_rows(|row| matches!(row[index], Datum::Int(s) if seasons.contains(&s))))
}

/// Fetch one asset per season and stack the results.
fn stack_seasons(
    client: &NflverseClient,
    seasons: &[i64],
    path_for: impl Fn(i64) -> String,
) -> Result<Frame, LoaderFailure> {
    let mut combined: Option<Frame> = None;
    for &season in seasons {
        let frame = client.fetch_csv(&path_for(season))?;
        match combined.as_mut() {
            None => combined = Some(frame),
            Some(base) => base.vstack(frame).map_err(LoaderFailure::new)?,
        }
    }
    combined.ok_or_else(|| LoaderFailure::new("no seasons requested"))
}

// ==================
// Loaders
// ==================

/// Game schedules and results, one row per game.
pub struct SchedulesLoader {
    client: Arc<NflverseClient>,
}

impl SchedulesLoader {
    pub fn new(client: Arc<NflverseClient>) -> Self {
        Self { client }
    }
}

impl Loader for SchedulesLoader {
    fn call(&self, params: &Params) -> Result<LoaderOutput, LoaderFailure> {
        let seasons = seasons_param(params);
        let client = self.client.clone();
        Ok(LoaderOutput::Deferred(DeferredFrame::new(move || {
            let frame = client.fetch_csv("schedules/games.csv")?;
            match seasons {
                Some(seasons) => filter_seasons(frame, &seasons),
                None => Ok(frame),
            }
        })))
    }
}

/// Play-by-play data, one asset per season.
pub struct PlayByPlayLoader {
    client: Arc<NflverseClient>,
}

impl PlayByPlayLoader {
    pub fn new(client: Arc<NflverseClient>) -> Self {
        Self { client }
    }
}

impl Loader for PlayByPlayLoader {
    fn call(&self, params: &Params) -> Result<LoaderOutput, LoaderFailure> {
        let seasons =
            seasons_param(params).unwrap_or_else(|| vec![i64::from(season_today())]);
        let client = self.client.clone();
        Ok(LoaderOutput::Deferred(DeferredFrame::new(move || {
            stack_seasons(&client, &seasons, |s| format!("pbp/play_by_play_{s}.csv"))
        })))
    }
}

/// Weekly injury reports, one asset per season.
pub struct InjuriesLoader {
    client: Arc<NflverseClient>,
}

impl InjuriesLoader {
    pub fn new(client: Arc<NflverseClient>) -> Self {
        Self { client }
    }
}

impl Loader for InjuriesLoader {
    fn call(&self, params: &Params) -> Result<LoaderOutput, LoaderFailure> {
        let seasons =
            seasons_param(params).unwrap_or_else(|| vec![i64::from(season_today())]);
        let client = self.client.clone();
        Ok(LoaderOutput::Deferred(DeferredFrame::new(move || {
            stack_seasons(&client, &seasons, |s| format!("injuries/injuries_{s}.csv"))
        })))
    }
}

/// Player master table.
pub struct PlayersLoader {
    client: Arc<NflverseClient>,
}

impl PlayersLoader {
    pub fn new(client: Arc<NflverseClient>) -> Self {
        Self { client }
    }
}

impl Loader for PlayersLoader {
    fn call(&self, _params: &Params) -> Result<LoaderOutput, LoaderFailure> {
        let frame = self.client.fetch_csv("players/players.csv")?;
        Ok(LoaderOutput::Frame(frame))
    }
}

/// Team descriptions; defaults to the most recent season only.
pub struct TeamsLoader {
    client: Arc<NflverseClient>,
}

impl TeamsLoader {
    pub fn new(client: Arc<NflverseClient>) -> Self {
        Self { client }
    }
}

impl Loader for TeamsLoader {
    fn call(&self, params: &Params) -> Result<LoaderOutput, LoaderFailure> {
        let current = params
            .get("current")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        let frame = self.client.fetch_csv("teams/teams.csv")?;
        if !current {
            return Ok(LoaderOutput::Frame(frame));
        }

        // Historical assets carry one row per franchise per season; keep the
        // latest season when only current teams are wanted.
        let frame = match frame.column_index("season") {
            Some(index) => {
                let latest = frame
                    .column_max_int(index)
                    .ok_or_else(|| LoaderFailure::new("teams asset has no season values"))?;
                frame.retain_rows(|row| matches!(row[index], Datum::Int(s) if s == latest))
            }
            None => frame,
        };
        Ok(LoaderOutput::Frame(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEAMS_CSV: &[u8] = b"season,team_abbr,team_name,full\n\
2023,KC,Chiefs,TRUE\n\
2024,KC,Chiefs,TRUE\n\
2024,BUF,Bills,FALSE\n";

    #[test]
    fn test_parse_csv_infers_types() {
        let frame = parse_csv(TEAMS_CSV).unwrap();
        assert_eq!(frame.columns(), ["season", "team_abbr", "team_name", "full"]);
        assert_eq!(frame.len(), 3);

        let records = frame.into_records();
        assert_eq!(records[0]["season"], json!(2023));
        assert_eq!(records[0]["team_abbr"], json!("KC"));
        assert_eq!(records[0]["full"], json!(true));
        assert_eq!(records[2]["full"], json!(false));
    }

    #[test]
    fn test_parse_cell_recognizes_dates_and_nulls() {
        assert_eq!(parse_cell(""), Datum::Null);
        assert_eq!(parse_cell("14"), Datum::Int(14));
        assert_eq!(parse_cell("0.5"), Datum::Float(0.5));
        assert!(matches!(parse_cell("2024-09-05"), Datum::Date(_)));
        assert_eq!(parse_cell("Chiefs"), Datum::Str("Chiefs".to_string()));
    }

    #[test]
    fn test_filter_seasons_keeps_matching_rows() {
        let frame = parse_csv(TEAMS_CSV).unwrap();
        let filtered = filter_seasons(frame, &[2024]).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_seasons_requires_season_column() {
        let frame = parse_csv(b"team\nKC\n").unwrap();
        assert!(filter_seasons(frame, &[2024]).is_err());
    }

    #[test]
    fn test_current_season_rolls_over_in_september() {
        let august = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(current_season(august), 2025);

        let september = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        assert_eq!(current_season(september), 2026);
    }

    #[test]
    fn test_seasons_param_reads_validated_values() {
        let mut params = Params::new();
        assert_eq!(seasons_param(&params), None);

        params.insert("seasons".to_string(), json!(null));
        assert_eq!(seasons_param(&params), None);

        params.insert("seasons".to_string(), json!([2023, 2024]));
        assert_eq!(seasons_param(&params), Some(vec![2023, 2024]));
    }
}
