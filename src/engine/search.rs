//! Single randomized backtracking attempt.
//!
//! ## Algorithm
//!
//! 1. Pre-selections are applied first and their receivers marked taken.
//! 2. The remaining givers are shuffled.
//! 3. Depth-first, each giver tries every admissible untaken receiver and
//!    recurses; a dead end undoes the tentative pairing and moves on.
//!
//! ## Candidate Order
//!
//! | Phase | Same-clan receivers |
//! |-------|---------------------|
//! | Strict | Removed |
//! | Relaxed | Tried after every different-clan receiver |
//! | Unconstrained | Clans not consulted |
//!
//! Order within a tier is random. The strict phase also keeps a
//! [`ClanBalance`] and drops any pairing that leaves some clan unable to
//! pair its remaining members outside itself.
//!
//! ## Outcomes
//!
//! The search is exhaustive, so [`SearchOutcome::Exhausted`] proves that no
//! matching exists for the phase. Only [`SearchOutcome::OutOfSteps`] is
//! worth retrying with a new shuffle.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::roster::{ClanBalance, Roster};
use crate::types::SearchPhase;

/// How one attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Receiver position for every giver position
    Found(Vec<usize>),
    /// Every ordering was tried; the phase has no solution
    Exhausted,
    /// The step budget ran out first
    OutOfSteps,
}

/// Step budget spent mid-search.
struct BudgetSpent;

/// State for one attempt. Dropped when the attempt ends.
#[derive(Debug)]
pub struct SearchContext<'r, 'a> {
    roster: &'r Roster<'a>,
    phase: SearchPhase,

    /// Free givers in shuffled processing order
    order: Vec<usize>,

    /// Giver position -> receiver position
    assigned: Vec<Option<usize>>,

    /// Receiver positions already given to
    taken: Vec<bool>,

    /// Per-clan counters, strict phase only
    balance: Option<ClanBalance<'r, 'a>>,

    /// Tentative pairings left before the attempt gives up
    steps_left: u64,
}

impl<'r, 'a> SearchContext<'r, 'a> {
    /// Apply pre-selections and shuffle the remaining givers.
    pub fn new<R: Rng + ?Sized>(
        roster: &'r Roster<'a>,
        phase: SearchPhase,
        step_budget: u64,
        rng: &mut R,
    ) -> Self {
        let n = roster.len();
        let mut assigned = vec![None; n];
        let mut taken = vec![false; n];

        for giver in 0..n {
            if let Some(receiver) = roster.forced_receiver(giver) {
                assigned[giver] = Some(receiver);
                taken[receiver] = true;
            }
        }

        let mut order = roster.free_givers();
        order.shuffle(rng);

        let balance = match phase {
            SearchPhase::Strict => Some(ClanBalance::new(roster)),
            SearchPhase::Relaxed | SearchPhase::Unconstrained => None,
        };

        Self {
            roster,
            phase,
            order,
            assigned,
            taken,
            balance,
            steps_left: step_budget,
        }
    }

    /// Run the attempt.
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> SearchOutcome {
        match self.backtrack(0, rng) {
            Ok(true) => match self.assigned.into_iter().collect::<Option<Vec<usize>>>() {
                Some(receivers) => SearchOutcome::Found(receivers),
                None => SearchOutcome::Exhausted,
            },
            Ok(false) => SearchOutcome::Exhausted,
            Err(BudgetSpent) => SearchOutcome::OutOfSteps,
        }
    }

    fn backtrack<R: Rng + ?Sized>(
        &mut self,
        depth: usize,
        rng: &mut R,
    ) -> Result<bool, BudgetSpent> {
        let Some(&giver) = self.order.get(depth) else {
            return Ok(true);
        };

        for receiver in self.candidates(giver, rng) {
            if self.steps_left == 0 {
                return Err(BudgetSpent);
            }
            self.steps_left -= 1;

            if let Some(balance) = &mut self.balance {
                balance.take(giver, receiver);
                if !balance.is_balanced() {
                    balance.restore(giver, receiver);
                    continue;
                }
            }

            self.assigned[giver] = Some(receiver);
            self.taken[receiver] = true;

            if self.backtrack(depth + 1, rng)? {
                return Ok(true);
            }

            self.assigned[giver] = None;
            self.taken[receiver] = false;
            if let Some(balance) = &mut self.balance {
                balance.restore(giver, receiver);
            }
        }

        Ok(false)
    }

    fn candidates<R: Rng + ?Sized>(&self, giver: usize, rng: &mut R) -> Vec<usize> {
        let roster = self.roster;
        let mut candidates: Vec<usize> = (0..roster.len())
            .filter(|&r| !self.taken[r] && roster.is_admissible(giver, r))
            .collect();

        match self.phase {
            SearchPhase::Strict => {
                candidates.retain(|&r| !roster.is_same_clan(giver, r));
                candidates.shuffle(rng);
            }
            SearchPhase::Relaxed => {
                candidates.shuffle(rng);
                // Stable sort keeps the shuffle within each tier
                candidates.sort_by_key(|&r| roster.is_same_clan(giver, r));
            }
            SearchPhase::Unconstrained => candidates.shuffle(rng),
        }

        candidates
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
