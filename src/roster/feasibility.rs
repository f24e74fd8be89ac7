//! Cheap checks run before any search attempt.
//!
//! ## Degree Check
//!
//! Every free giver needs at least one admissible free receiver, and every
//! free receiver at least one admissible free giver. Clans are ignored here
//! because the relaxed phase may pair within a clan. Passing the check does
//! not prove a matching exists; failing it proves none does, so the engine
//! can answer without spending attempts.
//!
//! ## Clan Balance
//!
//! A strict matching sends every free giver of a named clan to a free
//! receiver outside it. With `open` free slots, a clan holding `g` free
//! givers and `r` free receivers therefore needs `g <= open - r`. Without
//! exclusions this per-clan condition is also sufficient. The engine skips
//! the strict phase when it fails up front, and the strict search re-checks
//! it after every tentative pairing to cut dead branches early.

use std::fmt;

use crate::roster::Roster;
use crate::types::ParticipantId;

/// A participant left with no possible partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeasibilityGap {
    /// Every remaining receiver is self, pre-selected or excluded
    GiverWithoutReceiver { id: ParticipantId, name: String },
    /// No remaining giver may give to this receiver
    ReceiverWithoutGiver { id: ParticipantId, name: String },
    /// A clan has more free givers than free receivers outside it
    ClanOverflow {
        clan: String,
        givers: usize,
        receivers_outside: usize,
    },
}

impl fmt::Display for FeasibilityGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityGap::GiverWithoutReceiver { name, .. } => {
                write!(f, "{name} has nobody left to give to")
            }
            FeasibilityGap::ReceiverWithoutGiver { name, .. } => {
                write!(f, "nobody is left to give to {name}")
            }
            FeasibilityGap::ClanOverflow {
                clan,
                givers,
                receivers_outside,
            } => write!(
                f,
                "clan {clan} has {givers} givers left but only {receivers_outside} \
                 receivers outside it"
            ),
        }
    }
}

/// Check that each free giver and free receiver has a candidate.
pub fn check_feasibility(roster: &Roster<'_>) -> Result<(), FeasibilityGap> {
    let givers = roster.free_givers();
    let receivers = roster.free_receivers();

    for &giver in &givers {
        if !receivers.iter().any(|&r| roster.is_admissible(giver, r)) {
            let p = roster.participant(giver);
            return Err(FeasibilityGap::GiverWithoutReceiver {
                id: p.id,
                name: p.name.clone(),
            });
        }
    }

    for &receiver in &receivers {
        if !givers.iter().any(|&g| roster.is_admissible(g, receiver)) {
            let p = roster.participant(receiver);
            return Err(FeasibilityGap::ReceiverWithoutGiver {
                id: p.id,
                name: p.name.clone(),
            });
        }
    }

    Ok(())
}

/// Check that no clan blocks a strict matching by sheer numbers.
pub fn check_clan_balance(roster: &Roster<'_>) -> Result<(), FeasibilityGap> {
    let balance = ClanBalance::new(roster);
    match balance.overflow() {
        None => Ok(()),
        Some(clan) => Err(FeasibilityGap::ClanOverflow {
            clan: roster.clan_name(clan).to_string(),
            givers: balance.givers[clan],
            receivers_outside: balance.open - balance.receivers[clan],
        }),
    }
}

// ============================================================================
// Clan balance counters
// ============================================================================

/// Free givers and free receivers per named clan.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `givers[c]` | Unpaired givers in clan `c` |
/// | `receivers[c]` | Unclaimed receivers in clan `c` |
/// | `open` | Unpaired givers overall (equal to unclaimed receivers) |
#[derive(Debug, Clone)]
pub struct ClanBalance<'r, 'a> {
    roster: &'r Roster<'a>,
    givers: Vec<usize>,
    receivers: Vec<usize>,
    open: usize,
}

impl<'r, 'a> ClanBalance<'r, 'a> {
    /// Counters for the roster after pre-selections.
    pub fn new(roster: &'r Roster<'a>) -> Self {
        let mut givers = vec![0; roster.clan_count()];
        let mut receivers = vec![0; roster.clan_count()];

        let free_givers = roster.free_givers();
        for &giver in &free_givers {
            if let Some(clan) = roster.clan_of(giver) {
                givers[clan] += 1;
            }
        }
        for receiver in roster.free_receivers() {
            if let Some(clan) = roster.clan_of(receiver) {
                receivers[clan] += 1;
            }
        }

        Self {
            roster,
            givers,
            receivers,
            open: free_givers.len(),
        }
    }

    /// Record a tentative `giver -> receiver` pairing.
    pub fn take(&mut self, giver: usize, receiver: usize) {
        self.open -= 1;
        if let Some(clan) = self.roster.clan_of(giver) {
            self.givers[clan] -= 1;
        }
        if let Some(clan) = self.roster.clan_of(receiver) {
            self.receivers[clan] -= 1;
        }
    }

    /// Undo [`take`](Self::take).
    pub fn restore(&mut self, giver: usize, receiver: usize) {
        self.open += 1;
        if let Some(clan) = self.roster.clan_of(giver) {
            self.givers[clan] += 1;
        }
        if let Some(clan) = self.roster.clan_of(receiver) {
            self.receivers[clan] += 1;
        }
    }

    /// First clan whose members cannot all be paired outside it.
    pub fn overflow(&self) -> Option<usize> {
        (0..self.givers.len()).find(|&c| self.givers[c] + self.receivers[c] > self.open)
    }

    pub fn is_balanced(&self) -> bool {
        self.overflow().is_none()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Exclusion, Participant, PreSelection};

    fn people(n: u64) -> Vec<Participant> {
        (1..=n).map(|i| Participant::unaffiliated(i, format!("P{i}"))).collect()
    }

    #[test]
    fn test_unconstrained_roster_passes() {
        let people = people(4);
        let roster = Roster::build(&people, &[], &[]).unwrap();
        assert_eq!(check_feasibility(&roster), Ok(()));
    }

    #[test]
    fn test_giver_excluded_from_everyone() {
        let people = people(3);
        let ex = [Exclusion::new(1, 2), Exclusion::new(1, 3)];
        let roster = Roster::build(&people, &[], &ex).unwrap();

        let gap = check_feasibility(&roster).unwrap_err();
        assert_eq!(gap, FeasibilityGap::GiverWithoutReceiver { id: 1, name: "P1".into() });
        assert_eq!(gap.to_string(), "P1 has nobody left to give to");
    }

    #[test]
    fn test_receiver_nobody_may_give_to() {
        let people = people(3);
        let ex = [Exclusion::new(1, 3), Exclusion::new(2, 3)];
        let roster = Roster::build(&people, &[], &ex).unwrap();

        assert!(matches!(
            check_feasibility(&roster),
            Err(FeasibilityGap::ReceiverWithoutGiver { id: 3, .. })
        ));
    }

    #[test]
    fn test_pre_selection_leaves_only_self() {
        // 1 -> 2 pinned; 2's only free receiver is 1, 3's only free receiver is 3
        let people = people(3);
        let ps = [PreSelection::new(1, 2), PreSelection::new(2, 1)];
        let roster = Roster::build(&people, &ps, &[]).unwrap();

        assert!(matches!(
            check_feasibility(&roster),
            Err(FeasibilityGap::GiverWithoutReceiver { id: 3, .. })
        ));
    }

    #[test]
    fn test_fully_pre_selected_roster_passes() {
        let people = people(2);
        let ps = [PreSelection::new(1, 2), PreSelection::new(2, 1)];
        let roster = Roster::build(&people, &ps, &[]).unwrap();

        assert_eq!(check_feasibility(&roster), Ok(()));
    }

    fn smiths_and_jones(smiths: u64, jones: u64) -> Vec<Participant> {
        (1..=smiths)
            .map(|i| Participant::new(i, format!("S{i}"), "Smith"))
            .chain((1..=jones).map(|i| Participant::new(smiths + i, format!("J{i}"), "Jones")))
            .collect()
    }

    #[test]
    fn test_even_clans_balanced() {
        let people = smiths_and_jones(3, 3);
        let roster = Roster::build(&people, &[], &[]).unwrap();
        assert_eq!(check_clan_balance(&roster), Ok(()));
    }

    #[test]
    fn test_oversized_clan_overflows() {
        let people = smiths_and_jones(12, 5);
        let roster = Roster::build(&people, &[], &[]).unwrap();

        let gap = check_clan_balance(&roster).unwrap_err();
        assert_eq!(
            gap,
            FeasibilityGap::ClanOverflow {
                clan: "Smith".into(),
                givers: 12,
                receivers_outside: 5,
            }
        );
        assert_eq!(
            gap.to_string(),
            "clan Smith has 12 givers left but only 5 receivers outside it"
        );
        // Clans do not matter once same-clan pairings are allowed
        assert_eq!(check_feasibility(&roster), Ok(()));
    }

    #[test]
    fn test_pre_selection_tips_balance() {
        // S1 -> J1 pinned leaves S2, S3 with only J2 outside their clan
        let people = smiths_and_jones(3, 2);
        let roster = Roster::build(&people, &[PreSelection::new(1, 4)], &[]).unwrap();

        assert!(matches!(
            check_clan_balance(&roster),
            Err(FeasibilityGap::ClanOverflow { givers: 2, receivers_outside: 1, .. })
        ));
    }

    #[test]
    fn test_clanless_participants_relieve_balance() {
        let mut people = smiths_and_jones(3, 1);
        people.push(Participant::unaffiliated(5, "N1"));
        people.push(Participant::unaffiliated(6, "N2"));
        let roster = Roster::build(&people, &[], &[]).unwrap();

        assert_eq!(check_clan_balance(&roster), Ok(()));
    }

    #[test]
    fn test_take_and_restore() {
        let people = smiths_and_jones(2, 2);
        let roster = Roster::build(&people, &[], &[]).unwrap();
        let mut balance = ClanBalance::new(&roster);
        assert!(balance.is_balanced());

        // J1 -> J2 would leave S1, S2 with no Jones receiver left
        balance.take(2, 3);
        assert_eq!(balance.overflow(), Some(0));

        balance.restore(2, 3);
        assert!(balance.is_balanced());

        balance.take(0, 2);
        assert!(balance.is_balanced());
    }
}
