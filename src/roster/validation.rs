//! Pre-selection validation.
//!
//! Runs before any search. Every conflict produces one detail line so the
//! caller can point at each offending participant:
//!
//! - a receiver pre-selected by more than one giver
//! - a giver pre-selected to more than one receiver
//! - a giver pre-selected to themselves
//!
//! Lines are grouped by kind and ordered by participant id.

use std::collections::{BTreeMap, HashMap};

use crate::types::{Participant, ParticipantId, PreSelection};

/// Collect one detail line per conflicting pre-selection.
///
/// An empty result means the pre-selections are consistent.
pub fn pre_selection_conflicts(
    participants: &[Participant],
    pre_selections: &[PreSelection],
) -> Vec<String> {
    let names: HashMap<ParticipantId, &str> =
        participants.iter().map(|p| (p.id, p.name.as_str())).collect();
    let name_of = |id: ParticipantId| -> String {
        names
            .get(&id)
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| format!("#{id}"))
    };

    let mut receiver_counts: BTreeMap<ParticipantId, usize> = BTreeMap::new();
    let mut giver_counts: BTreeMap<ParticipantId, usize> = BTreeMap::new();
    for ps in pre_selections {
        *receiver_counts.entry(ps.receiver).or_default() += 1;
        *giver_counts.entry(ps.giver).or_default() += 1;
    }

    let mut details = Vec::new();

    for (&receiver, &count) in &receiver_counts {
        if count > 1 {
            details.push(format!(
                "{} is pre-selected as receiver {} times",
                name_of(receiver),
                count
            ));
        }
    }

    for (&giver, &count) in &giver_counts {
        if count > 1 {
            details.push(format!(
                "{} is pre-selected as giver {} times",
                name_of(giver),
                count
            ));
        }
    }

    let mut self_gifts: Vec<ParticipantId> = pre_selections
        .iter()
        .filter(|ps| ps.giver == ps.receiver)
        .map(|ps| ps.giver)
        .collect();
    self_gifts.sort_unstable();
    self_gifts.dedup();
    for id in self_gifts {
        details.push(format!(
            "{} cannot be pre-selected to give to themselves",
            name_of(id)
        ));
    }

    details
}

// ============================================================================
// Unit Tests
// ============================================================================
