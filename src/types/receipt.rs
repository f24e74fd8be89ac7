//! Match receipt summarizing how a matching was produced.
//!
//! The receipt records which search phase succeeded, how many attempts it
//! took, and a fingerprint of the request, so an organizer can confirm which
//! draft a published matching came from.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::constraint::{Exclusion, PreSelection};
use super::participant::{Clan, Participant};

/// Search phase that produced a matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    /// Clan mode on, same-clan pairings forbidden
    Strict,
    /// Clan mode on, same-clan pairings allowed as a last resort
    Relaxed,
    /// Clan mode off, clans never consulted
    Unconstrained,
}

impl SearchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchPhase::Strict => "strict",
            SearchPhase::Relaxed => "relaxed",
            SearchPhase::Unconstrained => "unconstrained",
        }
    }
}

/// Summary of a successful matching run.
///
/// ## Fingerprint
///
/// The 32-byte fingerprint is a SHA-256 hash over a canonical encoding of
/// the request. Participant, pre-selection and exclusion order do not
/// affect it; any change to ids, names, clans, constraints or the clan-mode
/// flag does.
///
/// ## Example
///
/// ```
/// use santa_matcher::types::{MatchReceipt, Participant, SearchPhase};
///
/// let roster = vec![Participant::new(1, "A", "Smith"), Participant::new(2, "B", "Jones")];
/// let fingerprint = MatchReceipt::compute_fingerprint(&roster, &[], &[], true);
///
/// let receipt = MatchReceipt::new(SearchPhase::Strict, 1, 0, 0, fingerprint);
/// assert_eq!(receipt.fingerprint_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReceipt {
    /// Phase whose search succeeded
    pub phase: SearchPhase,

    /// Backtracking attempts used across all phases, including the winner
    pub attempts: u32,

    /// Searched (non-pre-selected) assignments within a named clan
    pub same_clan_pairings: usize,

    /// Assignments forced by pre-selections
    pub pre_selected: usize,

    /// SHA-256 over the canonical request encoding
    #[serde(with = "hex_bytes")]
    pub fingerprint: [u8; 32],
}

impl MatchReceipt {
    pub fn new(
        phase: SearchPhase,
        attempts: u32,
        same_clan_pairings: usize,
        pre_selected: usize,
        fingerprint: [u8; 32],
    ) -> Self {
        Self {
            phase,
            attempts,
            same_clan_pairings,
            pre_selected,
            fingerprint,
        }
    }

    /// Hash a matching request into a 32-byte fingerprint.
    pub fn compute_fingerprint(
        participants: &[Participant],
        pre_selections: &[PreSelection],
        exclusions: &[Exclusion],
        clan_mode_enabled: bool,
    ) -> [u8; 32] {
        let mut people: Vec<&Participant> = participants.iter().collect();
        people.sort_by_key(|p| p.id);

        let mut forced = pre_selections.to_vec();
        forced.sort_unstable();
        let mut forbidden = exclusions.to_vec();
        forbidden.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update([u8::from(clan_mode_enabled)]);

        hasher.update((people.len() as u64).to_le_bytes());
        for person in people {
            hasher.update(person.id.to_le_bytes());
            update_str(&mut hasher, &person.name);
            match &person.clan {
                Clan::None => hasher.update([0u8]),
                Clan::Named(name) => {
                    hasher.update([1u8]);
                    update_str(&mut hasher, name);
                }
            }
        }

        hasher.update((forced.len() as u64).to_le_bytes());
        for ps in forced {
            hasher.update(ps.giver.to_le_bytes());
            hasher.update(ps.receiver.to_le_bytes());
        }

        hasher.update((forbidden.len() as u64).to_le_bytes());
        for ex in forbidden {
            hasher.update(ex.giver.to_le_bytes());
            hasher.update(ex.receiver.to_le_bytes());
        }

        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the fingerprint as a hex string
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint)
    }
}

// Length-prefixed so ("ab", "c") and ("a", "bc") hash differently.
fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let text = String::deserialize(deserializer)?;
        let mut out = [0u8; 32];
        hex::decode_to_slice(text, &mut out).map_err(D::Error::custom)?;
        Ok(out)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new(1, "A", "Smith"),
            Participant::new(2, "B", "Smith"),
            Participant::new(3, "C", "Jones"),
        ]
    }

    #[test]
    fn test_fingerprint_determinism() {
        let people = roster();
        let ps = [PreSelection::new(1, 3)];
        let ex = [Exclusion::new(2, 1)];

        let hash1 = MatchReceipt::compute_fingerprint(&people, &ps, &ex, true);
        let hash2 = MatchReceipt::compute_fingerprint(&people, &ps, &ex, true);
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, [0u8; 32]);
    }

    #[test]
    fn test_fingerprint_ignores_input_order() {
        let people = roster();
        let mut shuffled = people.clone();
        shuffled.reverse();
        let ex = [Exclusion::new(2, 1), Exclusion::new(3, 2)];
        let ex_reordered = [Exclusion::new(3, 2), Exclusion::new(2, 1)];

        assert_eq!(
            MatchReceipt::compute_fingerprint(&people, &[], &ex, true),
            MatchReceipt::compute_fingerprint(&shuffled, &[], &ex_reordered, true),
        );
    }

    #[test]
    fn test_fingerprint_sensitive_to_request() {
        let people = roster();
        let base = MatchReceipt::compute_fingerprint(&people, &[], &[], true);

        assert_ne!(base, MatchReceipt::compute_fingerprint(&people, &[], &[], false));
        assert_ne!(
            base,
            MatchReceipt::compute_fingerprint(&people, &[PreSelection::new(1, 3)], &[], true)
        );
        assert_ne!(
            base,
            MatchReceipt::compute_fingerprint(&people, &[], &[Exclusion::new(1, 3)], true)
        );

        let mut renamed = people.clone();
        renamed[2].clan = Clan::None;
        assert_ne!(base, MatchReceipt::compute_fingerprint(&renamed, &[], &[], true));
    }

    #[test]
    fn test_fingerprint_hex() {
        let receipt = MatchReceipt::new(SearchPhase::Relaxed, 101, 2, 0, [0xAB; 32]);

        let hex = receipt.fingerprint_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_receipt_json_roundtrip() {
        let receipt = MatchReceipt::new(SearchPhase::Strict, 3, 0, 1, [7u8; 32]);

        let json = serde_json::to_string(&receipt).expect("serializable");
        assert!(json.contains("\"phase\":\"strict\""));

        let decoded: MatchReceipt = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(decoded, receipt);
    }
}
