//! Assignment type: one giver matched to one receiver.

use serde::{Deserialize, Serialize};

use super::participant::Participant;

/// A single giver -> receiver pairing in a completed matching.
///
/// Giver and receiver are copies of the roster entries, so an assignment
/// list stays readable after the roster it came from is dropped.
///
/// ## Example
///
/// ```
/// use santa_matcher::types::{Assignment, Participant};
///
/// let giver = Participant::new(1, "Alice", "Smith");
/// let receiver = Participant::new(2, "Bob", "Jones");
///
/// let assignment = Assignment::new(giver, receiver, false);
/// assert!(!assignment.is_same_clan());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// The participant giving the gift
    pub giver: Participant,

    /// The participant receiving the gift
    pub receiver: Participant,

    /// True when this pairing came from a pre-selection
    pub is_pre_selected: bool,
}

impl Assignment {
    pub fn new(giver: Participant, receiver: Participant, is_pre_selected: bool) -> Self {
        Self {
            giver,
            receiver,
            is_pre_selected,
        }
    }

    /// Whether giver and receiver share a named clan.
    pub fn is_same_clan(&self) -> bool {
        self.giver.same_clan_as(&self.receiver)
    }

    /// Same-clan pairing chosen by the search rather than forced.
    ///
    /// These are the pairings a relaxation warning counts.
    pub fn is_clan_violation(&self) -> bool {
        !self.is_pre_selected && self.is_same_clan()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
