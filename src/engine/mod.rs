//! Matching engine module for the Secret Santa matcher.
//!
//! ## Design Principles
//!
//! 1. **Pure requests**: Each call builds its own search state; nothing is shared
//! 2. **Strict before relaxed**: Same-clan pairings only when unavoidable
//! 3. **Bounded retries**: Up to `max_attempts` reshuffled attempts per phase,
//!    each capped at `step_budget` pairings; a finished search is never retried
//! 4. **No partial results**: A full assignment or a structured error
//!
//! ## Constraint Rules
//!
//! - **Pre-selections** are applied first and bypass clan and exclusion policy
//! - **Exclusions** bind every giver the search places
//! - **Clans** are forbidden (strict), de-prioritized (relaxed) or ignored
//!   (clan mode off)
//!
//! ## Example
//!
//! ```
//! use santa_matcher::engine::generate_matching;
//! use santa_matcher::types::{Participant, PreSelection};
//!
//! let people = vec![
//!     Participant::new(1, "A", "Smith"),
//!     Participant::new(2, "B", "Smith"),
//!     Participant::new(3, "C", "Jones"),
//!     Participant::new(4, "D", "Jones"),
//! ];
//!
//! let matching = generate_matching(&people, &[PreSelection::new(1, 3)], &[], true).unwrap();
//!
//! let forced = matching.assignment_for(1).unwrap();
//! assert_eq!(forced.receiver.id, 3);
//! assert!(forced.is_pre_selected);
//! ```

pub mod config;
pub mod search;
pub mod matcher;
pub mod report;

pub use config::{EngineConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_STEP_BUDGET};
pub use search::SearchOutcome;
pub use matcher::{generate_matching, same_clan_warning, MatchResult, Matching, MatchingEngine};
pub use report::{ErrorReport, MatchReport};
