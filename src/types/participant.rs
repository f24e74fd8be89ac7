//! Participant and clan types.
//!
//! ## Clans
//!
//! A clan is the household or family a participant belongs to. Givers are
//! kept away from their own clan whenever the roster allows it.
//!
//! [`Clan::None`] is the exemption: a participant without a clan may give to
//! or receive from anyone, including other clanless participants.
//!
//! ## Wire Format
//!
//! Saved drafts store the clan as a plain string, with the literal
//! `"No Clan"` standing in for the exemption. Both that literal and a blank
//! string decode to [`Clan::None`], and [`Clan::None`] encodes back to
//! `"No Clan"`, so existing drafts round-trip unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Participant identifier, unique within one matching request.
pub type ParticipantId = u64;

/// Wire literal for the clan exemption.
pub const NO_CLAN: &str = "No Clan";

// ============================================================================
// Clan enum
// ============================================================================

/// Clan membership of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Clan {
    /// Exempt from all same-clan restrictions
    #[default]
    None,
    /// A named clan
    Named(String),
}

impl Clan {
    /// Build a clan from user input.
    ///
    /// Input is trimmed; blank input and the `"No Clan"` literal both map to
    /// [`Clan::None`].
    ///
    /// ```
    /// use santa_matcher::types::Clan;
    ///
    /// assert_eq!(Clan::named("  Smith "), Clan::Named("Smith".to_string()));
    /// assert_eq!(Clan::named("No Clan"), Clan::None);
    /// assert_eq!(Clan::named(""), Clan::None);
    /// ```
    pub fn named(name: impl AsRef<str>) -> Self {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || trimmed == NO_CLAN {
            Clan::None
        } else {
            Clan::Named(trimmed.to_string())
        }
    }

    /// Whether a pairing between these two clans counts as same-clan.
    ///
    /// Only two equal named clans conflict; [`Clan::None`] on either side
    /// never does.
    pub fn conflicts_with(&self, other: &Clan) -> bool {
        match (self, other) {
            (Clan::Named(a), Clan::Named(b)) => a == b,
            _ => false,
        }
    }

    /// Display label, `"No Clan"` for the exemption.
    pub fn label(&self) -> &str {
        match self {
            Clan::None => NO_CLAN,
            Clan::Named(name) => name,
        }
    }
}

impl From<Option<String>> for Clan {
    fn from(value: Option<String>) -> Self {
        value.map(Clan::named).unwrap_or_default()
    }
}

impl From<&str> for Clan {
    fn from(value: &str) -> Self {
        Clan::named(value)
    }
}

impl From<Clan> for String {
    fn from(clan: Clan) -> Self {
        match clan {
            Clan::None => NO_CLAN.to_string(),
            Clan::Named(name) => name,
        }
    }
}

impl fmt::Display for Clan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Participant struct
// ============================================================================

/// A person taking part in the exchange.
///
/// The engine only reads participants; `name` is carried through to the
/// results for display and never used for matching.
///
/// ```
/// use santa_matcher::types::{Clan, Participant};
///
/// let alice = Participant::new(1, "Alice", "Smith");
/// assert_eq!(alice.clan, Clan::Named("Smith".to_string()));
///
/// let bob = Participant::new(2, "Bob", "No Clan");
/// assert_eq!(bob.clan, Clan::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier within a run
    pub id: ParticipantId,

    /// Display name
    pub name: String,

    /// Clan membership
    #[serde(default)]
    pub clan: Clan,
}

impl Participant {
    /// Create a participant; `clan` is normalized through [`Clan::named`].
    pub fn new(id: ParticipantId, name: impl Into<String>, clan: impl AsRef<str>) -> Self {
        Self {
            id,
            name: name.into(),
            clan: Clan::named(clan),
        }
    }

    /// Create a participant with no clan.
    pub fn unaffiliated(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            clan: Clan::None,
        }
    }

    /// Whether giving from `self` to `other` is a same-clan pairing.
    pub fn same_clan_as(&self, other: &Participant) -> bool {
        self.clan.conflicts_with(&other.clan)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
