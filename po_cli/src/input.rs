//! Bracket description files.
//!
//! A bracket file is JSON with the seeding (`null` for a bye) and the
//! results recorded so far:
//!
//! ```json
//! { "seeding": [1, null, 3, 4],
//!   "results": [ { "left": 3, "right": 4, "winner": 4 } ] }
//! ```

use play_off::{ParticipantId, ResultMap, Seed};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a bracket file
#[derive(Debug, Error)]
pub enum InputError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not a valid bracket description
    #[error("Invalid bracket file: {0}")]
    Json(#[from] serde_json::Error),

    /// Same pairing recorded with two different winners
    #[error("Conflicting results for ({left}, {right}): {first} and {second}")]
    ConflictingResult {
        left: ParticipantId,
        right: ParticipantId,
        first: ParticipantId,
        second: ParticipantId,
    },
}

impl InputError {
    /// Whether the file contents, rather than the environment, are at fault
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, InputError::Io { .. })
    }
}

/// One recorded match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub left: ParticipantId,
    pub right: ParticipantId,
    pub winner: ParticipantId,
}

/// Seeding and results of one bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketFile {
    pub seeding: Vec<Seed>,
    #[serde(default)]
    pub results: Vec<ResultEntry>,
}

impl BracketFile {
    /// Read and parse a bracket file
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Collect the results into a map keyed by ordered pairing
    ///
    /// Repeated entries with the same winner are accepted.
    pub fn result_map(&self) -> Result<ResultMap, InputError> {
        let mut map = ResultMap::with_capacity(self.results.len());

        for entry in &self.results {
            match map.entry((entry.left, entry.right)) {
                Entry::Vacant(slot) => {
                    slot.insert(entry.winner);
                }
                Entry::Occupied(slot) if *slot.get() == entry.winner => {}
                Entry::Occupied(slot) => {
                    return Err(InputError::ConflictingResult {
                        left: entry.left,
                        right: entry.right,
                        first: *slot.get(),
                        second: entry.winner,
                    });
                }
            }
        }

        Ok(map)
    }
}
