//! Static mapping loaders
//!
//! Embedded lookup tables served as single-object results. These carry no
//! parameters and never touch the network.

use serde_json::{Map, Value};

use super::{Loader, LoaderFailure, LoaderOutput, Params};

/// Alternate team abbreviations mapped to current franchise codes.
pub(crate) const TEAM_ABBR_MAPPING: &[(&str, &str)] = &[
    ("ARI", "ARI"),
    ("ARZ", "ARI"),
    ("ATL", "ATL"),
    ("BAL", "BAL"),
    ("BLT", "BAL"),
    ("BUF", "BUF"),
    ("CAR", "CAR"),
    ("CHI", "CHI"),
    ("CIN", "CIN"),
    ("CLE", "CLE"),
    ("CLV", "CLE"),
    ("DAL", "DAL"),
    ("DEN", "DEN"),
    ("DET", "DET"),
    ("GB", "GB"),
    ("GNB", "GB"),
    ("HOU", "HOU"),
    ("HST", "HOU"),
    ("IND", "IND"),
    ("JAC", "JAX"),
    ("JAX", "JAX"),
    ("KC", "KC"),
    ("KAN", "KC"),
    ("LA", "LA"),
    ("LAC", "LAC"),
    ("LAR", "LA"),
    ("LV", "LV"),
    ("LVR", "LV"),
    ("MIA", "MIA"),
    ("MIN", "MIN"),
    ("NE", "NE"),
    ("NWE", "NE"),
    ("NO", "NO"),
    ("NOR", "NO"),
    ("NYG", "NYG"),
    ("NYJ", "NYJ"),
    ("OAK", "LV"),
    ("PHI", "PHI"),
    ("PIT", "PIT"),
    ("SD", "LAC"),
    ("SDG", "LAC"),
    ("SEA", "SEA"),
    ("SF", "SF"),
    ("SFO", "SF"),
    ("SL", "LA"),
    ("STL", "LA"),
    ("TB", "TB"),
    ("TAM", "TB"),
    ("TEN", "TEN"),
    ("WAS", "WAS"),
    ("WSH", "WAS"),
];

/// Alternate team abbreviations, keeping relocated franchises at their
/// historical codes.
pub(crate) const TEAM_ABBR_MAPPING_NORELOCATE: &[(&str, &str)] = &[
    ("ARZ", "ARI"),
    ("BLT", "BAL"),
    ("CLV", "CLE"),
    ("GNB", "GB"),
    ("HST", "HOU"),
    ("JAC", "JAX"),
    ("KAN", "KC"),
    ("LAR", "LA"),
    ("LVR", "LV"),
    ("NWE", "NE"),
    ("NOR", "NO"),
    ("OAK", "OAK"),
    ("SD", "SD"),
    ("SDG", "SD"),
    ("SFO", "SF"),
    ("SL", "STL"),
    ("STL", "STL"),
    ("TAM", "TB"),
    ("WSH", "WAS"),
];

/// Alternate player name spellings mapped to canonical names.
pub(crate) const PLAYER_NAME_MAPPING: &[(&str, &str)] = &[
    ("Chigoziem Okonkwo", "Chig Okonkwo"),
    ("Gabriel Davis", "Gabe Davis"),
    ("Gardner Minshew II", "Gardner Minshew"),
    ("Jeffery Wilson", "Jeff Wilson"),
    ("Joshua Palmer", "Josh Palmer"),
    ("Kenneth Walker", "Kenneth Walker III"),
    ("Michael Pittman", "Michael Pittman Jr."),
    ("Mitchell Trubisky", "Mitch Trubisky"),
    ("Nathaniel Dell", "Tank Dell"),
    ("Robbie Anderson", "Robbie Chosen"),
    ("Scott Miller", "Scotty Miller"),
    ("William Fuller", "Will Fuller"),
];

/// Serves an embedded table as a single mapping result.
pub struct MappingLoader {
    table: &'static [(&'static str, &'static str)],
}

impl MappingLoader {
    pub fn new(table: &'static [(&'static str, &'static str)]) -> Self {
        Self { table }
    }
}

impl Loader for MappingLoader {
    fn call(&self, _params: &Params) -> Result<LoaderOutput, LoaderFailure> {
        let mut mapping = Map::with_capacity(self.table.len());
        for (alias, canonical) in self.table {
            mapping.insert((*alias).to_string(), Value::String((*canonical).to_string()));
        }
        Ok(LoaderOutput::Scalar(Value::Object(mapping)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_loader_returns_single_object() {
        let loader = MappingLoader::new(TEAM_ABBR_MAPPING);
        let output = loader.call(&Params::new()).unwrap();

        match output {
            LoaderOutput::Scalar(Value::Object(map)) => {
                assert_eq!(map["OAK"], "LV");
                assert_eq!(map["SD"], "LAC");
            }
            other => panic!("expected scalar mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_norelocate_keeps_historical_codes() {
        let loader = MappingLoader::new(TEAM_ABBR_MAPPING_NORELOCATE);
        let output = loader.call(&Params::new()).unwrap();

        match output {
            LoaderOutput::Scalar(Value::Object(map)) => {
                assert_eq!(map["OAK"], "OAK");
                assert_eq!(map["SD"], "SD");
            }
            other => panic!("expected scalar mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_mapping_keys_are_unique() {
        for table in [TEAM_ABBR_MAPPING, TEAM_ABBR_MAPPING_NORELOCATE, PLAYER_NAME_MAPPING] {
            let mut keys: Vec<_> = table.iter().map(|(k, _)| *k).collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), total);
        }
    }
}
