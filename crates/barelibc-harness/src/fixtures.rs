//! Fixture loading and management.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested (`vformat`, `snprintf`, `fprintf`, `fputs`, `itoa`, `atoi`, `reverse`).
    pub function: String,
    /// C standard / POSIX section the behavior is drawn from.
    pub spec_section: String,
    /// Input parameters; shape depends on `function`.
    pub inputs: serde_json::Value,
    /// Expected observable output (device bytes or buffer contents).
    pub expected_output: String,
    /// Expected return value, when the case checks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<i64>,
    /// Render mode the case applies to: `device`, `buffer` or `both`.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    String::from("both")
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Load every `*.json` set in `dir`, sorted by file name.
    ///
    /// Files that fail to parse are returned separately so callers can
    /// report them without aborting the run.
    pub fn load_dir(
        dir: &std::path::Path,
    ) -> Result<(Vec<Self>, Vec<(std::path::PathBuf, HarnessError)>), HarnessError> {
        let mut paths: Vec<std::path::PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut sets = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            match Self::from_file(&path) {
                Ok(set) => sets.push(set),
                Err(err) => skipped.push((path, err)),
            }
        }
        Ok((sets, skipped))
    }
}
