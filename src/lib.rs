//! # Santa Matcher
//!
//! Secret Santa assignment engine with clan, pre-selection and exclusion
//! constraints.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Participant, Clan, Assignment, MatchReceipt)
//! - **Roster**: Validated, indexed view of one request
//! - **Engine**: Strict/relaxed randomized backtracking search
//! - **Draft**: Saved organizer input, loadable from JSON
//! - **Export**: CSV and plain-text rendering of a matching
//!
//! ## Guarantees
//!
//! Every successful matching is a bijection on the roster with no one giving
//! to themselves. Pre-selections always appear verbatim, exclusions never
//! appear outside them, and same-clan pairings only appear when the strict
//! phase proved unable to avoid them (reported through a warning).
//!
//! ## Example
//!
//! ```
//! use santa_matcher::{generate_matching, Participant};
//!
//! let people = vec![Participant::unaffiliated(1, "Ann"), Participant::unaffiliated(2, "Ben")];
//! let matching = generate_matching(&people, &[], &[], true).unwrap();
//!
//! assert_eq!(matching.assignments[0].receiver.id, 2);
//! assert_eq!(matching.assignments[1].receiver.id, 1);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Participant, Clan, Assignment, MatchReceipt
pub mod types;

/// Request validation and indexing
pub mod roster;

/// Matching engine: strict/relaxed backtracking search
pub mod engine;

/// Error taxonomy
pub mod error;

/// Saved draft state
pub mod draft;

/// CSV and table export
pub mod export;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{
    Assignment, Clan, Exclusion, MatchReceipt, Participant, ParticipantId, PreSelection,
    SearchPhase,
};
pub use roster::{FeasibilityGap, Roster};
pub use engine::{
    generate_matching, EngineConfig, MatchReport, MatchResult, Matching, MatchingEngine,
};
pub use error::MatchError;
pub use draft::{Draft, DraftError};
