//! Matching engine: validation, phases, retries and output assembly.
//!
//! ## Phases
//!
//! With clan mode on, the engine first runs a strict phase that forbids
//! same-clan pairings. Only if the strict phase fails does it run a relaxed
//! phase, which allows same-clan pairings as a last resort and reports how
//! many it needed. With clan mode off a single unconstrained phase decides
//! the outcome. The strict phase is skipped outright when one clan
//! outnumbers the receivers outside it.
//!
//! Each phase makes up to `max_attempts` attempts with a fresh shuffle. An
//! attempt that exhausts its search space settles the phase at once; only
//! an attempt that runs out of steps is retried, since how long a search
//! takes depends heavily on the order givers are processed in.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::engine::config::EngineConfig;
use crate::engine::search::{SearchContext, SearchOutcome};
use crate::error::{MatchError, HINT_CLAN_MODE, HINT_NO_CLANS};
use crate::roster::{check_clan_balance, check_feasibility, Roster};
use crate::types::{Assignment, Exclusion, MatchReceipt, Participant, PreSelection, SearchPhase};

/// Outcome of a matching request.
pub type MatchResult = Result<Matching, MatchError>;

/// A complete, valid matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    /// One assignment per participant, in the caller's participant order
    pub assignments: Vec<Assignment>,

    /// Present when the relaxed phase had to pair within a clan
    pub warning: Option<String>,

    /// How the matching was found
    pub receipt: MatchReceipt,
}

impl Matching {
    /// Assignment for a giver id
    pub fn assignment_for(&self, giver: u64) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.giver.id == giver)
    }
}

/// Secret Santa matching engine.
///
/// Holds only its configuration and RNG; every request builds and discards
/// its own search state.
///
/// ## Example
///
/// ```
/// use santa_matcher::engine::{EngineConfig, MatchingEngine};
/// use santa_matcher::types::Participant;
///
/// let people = vec![
///     Participant::new(1, "A", "Smith"),
///     Participant::new(2, "B", "Smith"),
///     Participant::new(3, "C", "Jones"),
///     Participant::new(4, "D", "Jones"),
/// ];
///
/// let mut engine = MatchingEngine::with_config(EngineConfig::default().with_seed(42));
/// let matching = engine.generate(&people, &[], &[], true).unwrap();
///
/// assert_eq!(matching.assignments.len(), 4);
/// assert!(matching.warning.is_none());
/// assert!(matching.assignments.iter().all(|a| !a.is_same_clan()));
/// ```
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    config: EngineConfig,
    rng: ChaCha8Rng,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Engine with default configuration, seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Assign every participant a receiver.
    ///
    /// # Arguments
    ///
    /// * `participants` - The roster; at least two, unique ids
    /// * `pre_selections` - Forced pairings, honored unconditionally
    /// * `exclusions` - Directed pairings the search must not choose
    /// * `clan_mode_enabled` - Whether clans constrain the search at all
    ///
    /// # Errors
    ///
    /// Validation errors from [`Roster::build`], or
    /// [`MatchError::Unsatisfiable`] when no matching was found.
    pub fn generate(
        &mut self,
        participants: &[Participant],
        pre_selections: &[PreSelection],
        exclusions: &[Exclusion],
        clan_mode_enabled: bool,
    ) -> MatchResult {
        let roster = Roster::build(participants, pre_selections, exclusions)?;
        let hint = if clan_mode_enabled { HINT_CLAN_MODE } else { HINT_NO_CLANS };

        if let Err(gap) = check_feasibility(&roster) {
            debug!(%gap, "request failed the feasibility check");
            return Err(MatchError::Unsatisfiable { hint });
        }

        let fingerprint = MatchReceipt::compute_fingerprint(
            participants,
            pre_selections,
            exclusions,
            clan_mode_enabled,
        );

        let phases: &[SearchPhase] = if clan_mode_enabled {
            &[SearchPhase::Strict, SearchPhase::Relaxed]
        } else {
            &[SearchPhase::Unconstrained]
        };

        let mut attempts_used = 0;
        for &phase in phases {
            if phase == SearchPhase::Strict {
                if let Err(gap) = check_clan_balance(&roster) {
                    debug!(%gap, "skipping strict phase");
                    continue;
                }
            }

            let (found, attempts) = self.run_phase(&roster, phase);
            attempts_used += attempts;

            match found {
                Some(receivers) => {
                    debug!(
                        phase = phase.as_str(),
                        attempts,
                        fingerprint = %hex::encode(fingerprint),
                        "matching found"
                    );
                    return Ok(assemble(&roster, &receivers, phase, attempts_used, fingerprint));
                }
                None => debug!(phase = phase.as_str(), attempts, "phase exhausted"),
            }
        }

        Err(MatchError::Unsatisfiable { hint })
    }

    fn run_phase(&mut self, roster: &Roster<'_>, phase: SearchPhase) -> (Option<Vec<usize>>, u32) {
        let budget = self.config.step_budget;
        for attempt in 1..=self.config.max_attempts {
            let context = SearchContext::new(roster, phase, budget, &mut self.rng);
            match context.run(&mut self.rng) {
                SearchOutcome::Found(receivers) => return (Some(receivers), attempt),
                SearchOutcome::Exhausted => {
                    trace!(phase = phase.as_str(), attempt, "search space exhausted");
                    return (None, attempt);
                }
                SearchOutcome::OutOfSteps => {
                    trace!(phase = phase.as_str(), attempt, budget, "attempt ran out of steps");
                }
            }
        }
        (None, self.config.max_attempts)
    }
}

/// Run one request on a fresh entropy-seeded engine.
pub fn generate_matching(
    participants: &[Participant],
    pre_selections: &[PreSelection],
    exclusions: &[Exclusion],
    clan_mode_enabled: bool,
) -> MatchResult {
    MatchingEngine::new().generate(participants, pre_selections, exclusions, clan_mode_enabled)
}

/// Relaxation warning for `count` searched same-clan pairings.
pub fn same_clan_warning(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some(
            "Could not avoid all same-clan pairings. 1 participant matched within their clan."
                .to_string(),
        ),
        n => Some(format!(
            "Could not avoid all same-clan pairings. {n} participants matched within their clan."
        )),
    }
}

fn assemble(
    roster: &Roster<'_>,
    receivers: &[usize],
    phase: SearchPhase,
    attempts: u32,
    fingerprint: [u8; 32],
) -> Matching {
    let assignments: Vec<Assignment> = receivers
        .iter()
        .enumerate()
        .map(|(giver, &receiver)| {
            Assignment::new(
                roster.participant(giver).clone(),
                roster.participant(receiver).clone(),
                roster.forced_receiver(giver).is_some(),
            )
        })
        .collect();

    let same_clan_pairings = match phase {
        SearchPhase::Relaxed => assignments.iter().filter(|a| a.is_clan_violation()).count(),
        SearchPhase::Strict | SearchPhase::Unconstrained => 0,
    };

    Matching {
        warning: same_clan_warning(same_clan_pairings),
        receipt: MatchReceipt::new(
            phase,
            attempts,
            same_clan_pairings,
            roster.pre_selected_count(),
            fingerprint,
        ),
        assignments,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> MatchingEngine {
        MatchingEngine::with_config(EngineConfig::default().with_seed(seed))
    }

    fn clans(groups: &[(&str, usize)]) -> Vec<Participant> {
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

    #[test]
    fn test_warning_text() {
        assert_eq!(same_clan_warning(0), None);
        assert_eq!(
            same_clan_warning(1).unwrap(),
            "Could not avoid all same-clan pairings. 1 participant matched within their clan."
        );
        assert_eq!(
            same_clan_warning(3).unwrap(),
            "Could not avoid all same-clan pairings. 3 participants matched within their clan."
        );
    }

    #[test]
    fn test_strict_phase_receipt() {
        let people = clans(&[("Smith", 2), ("Jones", 2)]);
        let matching = seeded(1).generate(&people, &[], &[], true).unwrap();

        assert_eq!(matching.receipt.phase, SearchPhase::Strict);
        assert_eq!(matching.receipt.same_clan_pairings, 0);
        assert!(matching.receipt.attempts >= 1);
        assert!(matching.warning.is_none());
    }

    #[test]
    fn test_clan_overflow_skips_strict_phase() {
        let people = clans(&[("Smith", 5), ("Jones", 2)]);
        let matching = seeded(9).generate(&people, &[], &[], true).unwrap();

        assert_eq!(matching.receipt.phase, SearchPhase::Relaxed);
        assert_eq!(matching.receipt.attempts, 1);
        assert!(matching.warning.is_some());
    }

    #[test]
    fn test_exhausted_strict_phase_is_not_retried() {
        // Clan counts allow a strict matching, but A's exclusions rule it out
        let people = clans(&[("Smith", 2), ("Jones", 2)]);
        let ex = [Exclusion::new(1, 3), Exclusion::new(1, 4)];
        let matching = seeded(6).generate(&people, &[], &ex, true).unwrap();

        assert_eq!(matching.receipt.phase, SearchPhase::Relaxed);
        // One exhaustive strict attempt, one relaxed attempt
        assert_eq!(matching.receipt.attempts, 2);
        assert_eq!(matching.assignment_for(1).unwrap().receiver.id, 2);
    }

    #[test]
    fn test_step_budget_exhaustion_is_unsatisfiable() {
        let people = clans(&[("No Clan", 4)]);
        let config = EngineConfig::default()
            .with_seed(1)
            .with_max_attempts(3)
            .with_step_budget(2);

        let err = MatchingEngine::with_config(config)
            .generate(&people, &[], &[], false)
            .unwrap_err();
        assert_eq!(err, MatchError::Unsatisfiable { hint: HINT_NO_CLANS });
    }

    #[test]
    fn test_unconstrained_phase() {
        let people = clans(&[("Smith", 4)]);
        let matching = seeded(2).generate(&people, &[], &[], false).unwrap();

        assert_eq!(matching.receipt.phase, SearchPhase::Unconstrained);
        assert!(matching.warning.is_none());
    }

    #[test]
    fn test_infeasible_request_skips_search() {
        let people = clans(&[("No Clan", 3)]);
        let ex = [Exclusion::new(1, 2), Exclusion::new(1, 3)];

        let err = seeded(3).generate(&people, &[], &ex, true).unwrap_err();
        assert_eq!(err, MatchError::Unsatisfiable { hint: HINT_CLAN_MODE });

        let err = seeded(3).generate(&people, &[], &ex, false).unwrap_err();
        assert_eq!(err, MatchError::Unsatisfiable { hint: HINT_NO_CLANS });
    }

    #[test]
    fn test_output_in_participant_order() {
        let people = clans(&[("Smith", 3), ("Jones", 3)]);
        let matching = seeded(4).generate(&people, &[], &[], true).unwrap();

        let givers: Vec<u64> = matching.assignments.iter().map(|a| a.giver.id).collect();
        assert_eq!(givers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_seed_reproducibility() {
        let people = clans(&[("Smith", 4), ("Jones", 3), ("Davis", 2)]);

        let first = seeded(77).generate(&people, &[], &[], true).unwrap();
        let second = seeded(77).generate(&people, &[], &[], true).unwrap();
        assert_eq!(first, second);
    }
}
