//! Saved draft state.
//!
//! A draft is everything an organizer enters before generating: the roster,
//! pre-selections, exclusions and the clan-mode toggle. The JSON layout is
//! the one the web page keeps in local storage, so a draft exported from the
//! browser loads here unchanged:
//!
//! ```json
//! {
//!   "participants": [{ "id": 1, "name": "Ann", "clan": "Smith" }],
//!   "preSelections": [{ "giver": "1", "receiver": "3" }],
//!   "exclusions": [],
//!   "clanModeEnabled": true
//! }
//! ```
//!
//! Every field is optional; missing lists are empty and clan mode defaults
//! to on.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{MatchResult, MatchingEngine};
use crate::types::{Exclusion, MatchReceipt, Participant, PreSelection};

/// Failure to load a draft.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("failed to read draft {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("draft is not valid JSON")]
    Json(#[from] serde_json::Error),
}

/// A matching request as saved by the organizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub participants: Vec<Participant>,
    pub pre_selections: Vec<PreSelection>,
    pub exclusions: Vec<Exclusion>,
    pub clan_mode_enabled: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            pre_selections: Vec::new(),
            exclusions: Vec::new(),
            clan_mode_enabled: true,
        }
    }
}

impl Draft {
    /// Parse a draft from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DraftError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a draft file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DraftError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DraftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DraftError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run the draft through an engine.
    pub fn generate(&self, engine: &mut MatchingEngine) -> MatchResult {
        engine.generate(
            &self.participants,
            &self.pre_selections,
            &self.exclusions,
            self.clan_mode_enabled,
        )
    }

    /// Fingerprint a matching of this draft would carry.
    pub fn fingerprint(&self) -> [u8; 32] {
        MatchReceipt::compute_fingerprint(
            &self.participants,
            &self.pre_selections,
            &self.exclusions,
            self.clan_mode_enabled,
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
