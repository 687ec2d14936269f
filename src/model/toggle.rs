use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parsing failed. ({0})")]
    Parse(String),
}

/// Describes a feature toggle received from the toggle source.
#[derive(Debug, Clone, Deserialize)]
pub struct Toggle {
    /// The toggle's name, unique within a snapshot.
    pub name: String,
    /// The toggle's own enabled flag. When `false` the toggle is disabled
    /// regardless of its strategy bindings.
    pub enabled: bool,
    /// The toggle's activation strategy bindings, consulted in their defined order.
    #[serde(default)]
    pub strategies: Vec<StrategyBinding>,
    /// Optional description of the toggle.
    #[serde(default)]
    pub description: Option<String>,
}

/// Associates a toggle with an activation strategy and the parameters
/// the strategy receives on each evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyBinding {
    /// Name of the activation strategy to consult.
    pub name: String,
    /// Arguments passed to the strategy.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

#[derive(Deserialize)]
struct Payload {
    #[serde(default)]
    features: Vec<Toggle>,
}

/// The complete set of toggles currently in effect, keyed by toggle name.
///
/// A snapshot is produced wholesale by each successful fetch or backup load
/// and is never mutated afterwards; the refresh cycle replaces the published
/// snapshot as a unit. It retains the raw payload text it was decoded from so
/// the backup write-through stays byte-identical to the fetch response.
#[derive(Debug, Default)]
pub struct Snapshot {
    toggles: HashMap<String, Toggle>,
    payload: String,
}

impl Snapshot {
    pub fn get(&self, name: &str) -> Option<&Toggle> {
        self.toggles.get(name)
    }

    pub fn toggles(&self) -> &HashMap<String, Toggle> {
        &self.toggles
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

pub fn snapshot_from_json(json: &str) -> Result<Snapshot, Error> {
    match serde_json::from_str::<Payload>(json) {
        Ok(parsed) => {
            let mut toggles = HashMap::with_capacity(parsed.features.len());
            for toggle in parsed.features {
                toggles.insert(toggle.name.clone(), toggle);
            }
            Ok(Snapshot {
                toggles,
                payload: json.to_owned(),
            })
        }
        Err(err) => Err(Error::Parse(err.to_string())),
    }
}
