//! Pairing constraints: pre-selections and exclusions.
//!
//! Both are directed `giver -> receiver` pairs.
//!
//! - A [`PreSelection`] forces the pairing. It overrides clan policy and any
//!   exclusion naming the same pair.
//! - An [`Exclusion`] forbids the pairing for every giver the search places.
//!   Excluding A -> B says nothing about B -> A.
//!
//! ## Id Encoding
//!
//! Drafts saved from form inputs carry ids as strings (`"17"`) as often as
//! numbers (`17`). Both deserialize to the same [`ParticipantId`].

use serde::{Deserialize, Deserializer, Serialize};

use super::participant::ParticipantId;

/// A forced giver -> receiver pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PreSelection {
    #[serde(deserialize_with = "deserialize_id")]
    pub giver: ParticipantId,

    #[serde(deserialize_with = "deserialize_id")]
    pub receiver: ParticipantId,
}

impl PreSelection {
    pub fn new(giver: ParticipantId, receiver: ParticipantId) -> Self {
        Self { giver, receiver }
    }
}

/// A forbidden giver -> receiver pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Exclusion {
    #[serde(deserialize_with = "deserialize_id")]
    pub giver: ParticipantId,

    #[serde(deserialize_with = "deserialize_id")]
    pub receiver: ParticipantId,
}

impl Exclusion {
    pub fn new(giver: ParticipantId, receiver: ParticipantId) -> Self {
        Self { giver, receiver }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<ParticipantId, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid participant id {text:?}"))),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
