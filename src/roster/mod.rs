//! Roster module: the validated, indexed form of a matching request.
//!
//! ## Components
//!
//! - [`Roster`]: Participant positions, pre-selection map and exclusion set
//! - [`pre_selection_conflicts`]: Pre-selection validation
//! - [`check_feasibility`]: Degree check that rejects hopeless requests early
//! - [`check_clan_balance`]: Per-clan count check for the strict phase
//!
//! ## Validation Order
//!
//! | Check | Error |
//! |-------|-------|
//! | At least two participants | `InsufficientParticipants` |
//! | Unique participant ids | `DuplicateParticipant` |
//! | Consistent pre-selections | `InvalidPreSelections` |

pub mod index;
pub mod validation;
pub mod feasibility;

pub use index::{Roster, MIN_PARTICIPANTS};
pub use validation::pre_selection_conflicts;
pub use feasibility::{check_clan_balance, check_feasibility, ClanBalance, FeasibilityGap};
