//! Indexed view of one matching request.
//!
//! The search works on roster positions (`usize`) instead of participant
//! ids: position lookup, pre-selection and exclusion checks are all O(1).
//! Positions follow the caller's participant order, which is also the order
//! results are reported in.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::MatchError;
use crate::roster::validation::pre_selection_conflicts;
use crate::types::{Clan, Exclusion, Participant, ParticipantId, PreSelection};

/// Smallest roster that can form an exchange.
pub const MIN_PARTICIPANTS: usize = 2;

/// A validated matching request, borrowed from the caller's data.
///
/// ## Example
///
/// ```
/// use santa_matcher::roster::Roster;
/// use santa_matcher::types::{Exclusion, Participant, PreSelection};
///
/// let people = vec![
///     Participant::new(10, "A", "Smith"),
///     Participant::new(20, "B", "Jones"),
///     Participant::new(30, "C", "Jones"),
/// ];
/// let ps = [PreSelection::new(10, 20)];
/// let ex = [Exclusion::new(30, 10)];
/// let roster = Roster::build(&people, &ps, &ex).unwrap();
///
/// assert_eq!(roster.position(20), Some(1));
/// assert_eq!(roster.forced_receiver(0), Some(1));
/// assert!(roster.is_excluded(2, 0));
/// assert_eq!(roster.clan_of(1), roster.clan_of(2));
/// ```
#[derive(Debug)]
pub struct Roster<'a> {
    /// Participants in caller order
    participants: &'a [Participant],

    /// Participant id -> roster position
    positions: HashMap<ParticipantId, usize>,

    /// Giver position -> pre-selected receiver position
    forced: Vec<Option<usize>>,

    /// Receiver positions claimed by pre-selections
    claimed: Vec<bool>,

    /// Excluded (giver, receiver) position pairs
    excluded: HashSet<(usize, usize)>,

    /// Position -> clan index; `None` for clanless participants
    clans: Vec<Option<usize>>,

    /// Clan index -> clan name, in order of first appearance
    clan_names: Vec<&'a str>,
}

impl<'a> Roster<'a> {
    /// Validate a request and index it.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InsufficientParticipants`] for fewer than two participants
    /// - [`MatchError::DuplicateParticipant`] when two entries share an id
    /// - [`MatchError::InvalidPreSelections`] for conflicting pre-selections
    ///
    /// Pre-selections and exclusions naming ids outside the roster are
    /// dropped; pre-selections are logged when that happens.
    pub fn build(
        participants: &'a [Participant],
        pre_selections: &[PreSelection],
        exclusions: &[Exclusion],
    ) -> Result<Self, MatchError> {
        if participants.len() < MIN_PARTICIPANTS {
            return Err(MatchError::InsufficientParticipants {
                count: participants.len(),
            });
        }

        let mut positions = HashMap::with_capacity(participants.len());
        for (pos, participant) in participants.iter().enumerate() {
            if positions.insert(participant.id, pos).is_some() {
                return Err(MatchError::DuplicateParticipant { id: participant.id });
            }
        }

        let details = pre_selection_conflicts(participants, pre_selections);
        if !details.is_empty() {
            return Err(MatchError::InvalidPreSelections { details });
        }

        let mut forced = vec![None; participants.len()];
        let mut claimed = vec![false; participants.len()];
        for ps in pre_selections {
            match (positions.get(&ps.giver), positions.get(&ps.receiver)) {
                (Some(&giver), Some(&receiver)) => {
                    forced[giver] = Some(receiver);
                    claimed[receiver] = true;
                }
                _ => warn!(
                    giver = ps.giver,
                    receiver = ps.receiver,
                    "ignoring pre-selection for a participant not in the roster"
                ),
            }
        }

        let excluded = exclusions
            .iter()
            .filter_map(|ex| Some((*positions.get(&ex.giver)?, *positions.get(&ex.receiver)?)))
            .collect();

        let mut clan_names: Vec<&'a str> = Vec::new();
        let mut clan_ids: HashMap<&'a str, usize> = HashMap::new();
        let clans = participants
            .iter()
            .map(|p| match &p.clan {
                Clan::Named(name) => Some(*clan_ids.entry(name.as_str()).or_insert_with(|| {
                    clan_names.push(name.as_str());
                    clan_names.len() - 1
                })),
                Clan::None => None,
            })
            .collect();

        Ok(Self {
            participants,
            positions,
            forced,
            claimed,
            excluded,
            clans,
            clan_names,
        })
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false for a built roster; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participant at a roster position
    pub fn participant(&self, pos: usize) -> &'a Participant {
        &self.participants[pos]
    }

    /// Roster position of a participant id
    pub fn position(&self, id: ParticipantId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Pre-selected receiver for a giver, if any
    pub fn forced_receiver(&self, giver: usize) -> Option<usize> {
        self.forced[giver]
    }

    /// Whether the directed pair is listed as an exclusion
    pub fn is_excluded(&self, giver: usize, receiver: usize) -> bool {
        self.excluded.contains(&(giver, receiver))
    }

    /// Whether the search may place `giver -> receiver`, clans aside.
    pub fn is_admissible(&self, giver: usize, receiver: usize) -> bool {
        giver != receiver && !self.is_excluded(giver, receiver)
    }

    /// Whether `giver -> receiver` is a same-clan pairing
    pub fn is_same_clan(&self, giver: usize, receiver: usize) -> bool {
        matches!((self.clans[giver], self.clans[receiver]), (Some(a), Some(b)) if a == b)
    }

    /// Clan index of the participant at a position
    pub fn clan_of(&self, pos: usize) -> Option<usize> {
        self.clans[pos]
    }

    /// Number of distinct named clans
    pub fn clan_count(&self) -> usize {
        self.clan_names.len()
    }

    /// Name of a clan index
    pub fn clan_name(&self, clan: usize) -> &'a str {
        self.clan_names[clan]
    }

    /// Givers left for the search, in roster order
    pub fn free_givers(&self) -> Vec<usize> {
        (0..self.len()).filter(|&pos| self.forced[pos].is_none()).collect()
    }

    /// Receivers left for the search, in roster order
    pub fn free_receivers(&self) -> Vec<usize> {
        (0..self.len()).filter(|&pos| !self.claimed[pos]).collect()
    }

    /// Number of applied pre-selections
    pub fn pre_selected_count(&self) -> usize {
        self.forced.iter().filter(|slot| slot.is_some()).count()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
