//! Core data types for the Secret Santa matcher
//!
//! ## Types
//!
//! - [`Participant`]: A person in the exchange, with an optional [`Clan`]
//! - [`PreSelection`]: A forced giver -> receiver pairing
//! - [`Exclusion`]: A forbidden giver -> receiver pairing
//! - [`Assignment`]: One giver matched to one receiver
//! - [`MatchReceipt`]: Summary of a successful run

mod participant;
mod constraint;
mod assignment;
mod receipt;

// Re-export all types at module level
pub use participant::{Clan, Participant, ParticipantId, NO_CLAN};
pub use constraint::{Exclusion, PreSelection};
pub use assignment::Assignment;
pub use receipt::{MatchReceipt, SearchPhase};
