//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use santa_matcher::{Exclusion, Matching, Participant, PreSelection};

/// Build a roster from `(clan, count)` pairs, ids starting at 1.
///
/// Names are `<clan>_<n>`; the clan `"No Clan"` yields clanless participants.
pub fn roster(groups: &[(&str, usize)]) -> Vec<Participant> {
    let mut id = 0;
    let mut people = Vec::new();
    for (clan, count) in groups {
        for i in 0..*count {
            id += 1;
            people.push(Participant::new(id, format!("{clan}_{}", i + 1), clan));
        }
    }
    people
}

/// Check every structural invariant of a successful matching.
pub fn assert_valid_matching(
    matching: &Matching,
    participants: &[Participant],
    pre_selections: &[PreSelection],
    exclusions: &[Exclusion],
    clan_mode_enabled: bool,
) {
    let ids: HashSet<u64> = participants.iter().map(|p| p.id).collect();
    assert_eq!(matching.assignments.len(), participants.len(), "one assignment per participant");

    let givers: HashSet<u64> = matching.assignments.iter().map(|a| a.giver.id).collect();
    let receivers: HashSet<u64> = matching.assignments.iter().map(|a| a.receiver.id).collect();
    assert_eq!(givers, ids, "givers must be the full roster");
    assert_eq!(receivers, ids, "receivers must be the full roster");

    for a in &matching.assignments {
        assert_ne!(a.giver.id, a.receiver.id, "{} gives to themselves", a.giver.name);
    }

    for ps in pre_selections {
        let a = matching.assignment_for(ps.giver).expect("pre-selected giver present");
        assert_eq!(a.receiver.id, ps.receiver, "pre-selection {ps:?} not honored");
        assert!(a.is_pre_selected, "pre-selection {ps:?} not flagged");
    }

    let forbidden: HashSet<(u64, u64)> = exclusions.iter().map(|e| (e.giver, e.receiver)).collect();
    for a in matching.assignments.iter().filter(|a| !a.is_pre_selected) {
        assert!(
            !forbidden.contains(&(a.giver.id, a.receiver.id)),
            "excluded pairing {} -> {} chosen",
            a.giver.name,
            a.receiver.name
        );
    }

    if clan_mode_enabled && matching.warning.is_none() {
        for a in &matching.assignments {
            assert!(
                !a.is_clan_violation(),
                "{} -> {} is same-clan without a warning",
                a.giver.name,
                a.receiver.name
            );
        }
    }
}

/// Number parsed out of a relaxation warning.
pub fn warning_count(warning: &str) -> usize {
    warning
        .split_whitespace()
        .find_map(|word| word.parse().ok())
        .expect("warning names a count")
}
