//! JSON result contract.
//!
//! Renders a [`MatchResult`] in the shape web front ends consume:
//!
//! ```json
//! { "success": true, "assignments": [...], "warning": "..." }
//! { "success": false, "error": { "message": "...", "details": ["..."] } }
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::matcher::MatchResult;
use crate::types::{Assignment, MatchReceipt};

/// Error half of a [`MatchReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub details: Vec<String>,
}

/// Serializable view of a [`MatchResult`].
///
/// ```
/// use santa_matcher::engine::{generate_matching, MatchReport};
/// use santa_matcher::types::Participant;
///
/// let result = generate_matching(&[Participant::new(1, "Solo", "Smith")], &[], &[], true);
/// let report = MatchReport::from(&result);
///
/// assert!(!report.success);
/// assert_eq!(report.error.unwrap().message, "Need at least 2 participants");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<Assignment>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<MatchReceipt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl From<&MatchResult> for MatchReport {
    fn from(result: &MatchResult) -> Self {
        match result {
            Ok(matching) => Self {
                success: true,
                assignments: Some(matching.assignments.clone()),
                warning: matching.warning.clone(),
                receipt: Some(matching.receipt.clone()),
                error: None,
            },
            Err(err) => Self {
                success: false,
                assignments: None,
                warning: None,
                receipt: None,
                error: Some(ErrorReport {
                    message: err.message(),
                    details: err.details(),
                }),
            },
        }
    }
}
