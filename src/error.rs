//! Error types for matching requests.

use thiserror::Error;

use crate::types::ParticipantId;

/// Hint attached to an unsatisfiable request when clan mode is on.
pub const HINT_CLAN_MODE: &str = "Try adjusting pre-selections or adding more participants";

/// Hint attached to an unsatisfiable request when clan mode is off.
pub const HINT_NO_CLANS: &str = "Try adjusting pre-selections or exclusions";

/// Why a matching request produced no assignments.
///
/// The `Display` output is the short message shown to the organizer;
/// [`MatchError::details`] carries the bullet points under it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Fewer than two participants
    #[error("Need at least 2 participants")]
    InsufficientParticipants { count: usize },

    /// Two roster entries share an id
    #[error("Duplicate participant id")]
    DuplicateParticipant { id: ParticipantId },

    /// Conflicting pre-selections, one detail line per conflict
    #[error("Invalid pre-selections")]
    InvalidPreSelections { details: Vec<String> },

    /// Both search phases exhausted, or the request failed the feasibility check
    #[error("Could not find a valid assignment")]
    Unsatisfiable { hint: &'static str },
}

impl MatchError {
    /// User-facing headline.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Supporting detail lines.
    pub fn details(&self) -> Vec<String> {
        match self {
            MatchError::InsufficientParticipants { .. } => Vec::new(),
            MatchError::DuplicateParticipant { id } => {
                vec![format!("Participant id {id} appears more than once")]
            }
            MatchError::InvalidPreSelections { details } => details.clone(),
            MatchError::Unsatisfiable { hint } => vec![(*hint).to_string()],
        }
    }

    /// Errors that depend only on the request and never resolve on retry.
    pub fn is_validation(&self) -> bool {
        !matches!(self, MatchError::Unsatisfiable { .. })
    }
}
