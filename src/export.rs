//! Rendering a matching for organizers.
//!
//! ## CSV
//!
//! With clan mode on:
//!
//! ```text
//! Giver,Giver Clan,Receiver,Receiver Clan,Pre-selected
//! "Ann","Smith","Cat","Jones","Yes"
//! ```
//!
//! With clan mode off the clan columns are dropped. Every data cell is
//! quoted, with embedded quotes doubled.

use crate::types::Assignment;

/// Column headers for the CSV export.
pub fn csv_headers(clan_mode_enabled: bool) -> &'static [&'static str] {
    if clan_mode_enabled {
        &["Giver", "Giver Clan", "Receiver", "Receiver Clan", "Pre-selected"]
    } else {
        &["Giver", "Receiver", "Pre-selected"]
    }
}

/// Render assignments as CSV, rows joined by `\n`.
pub fn to_csv(assignments: &[Assignment], clan_mode_enabled: bool) -> String {
    let mut lines = Vec::with_capacity(assignments.len() + 1);
    lines.push(csv_headers(clan_mode_enabled).join(","));

    for a in assignments {
        let pre_selected = if a.is_pre_selected { "Yes" } else { "No" };
        let cells: Vec<&str> = if clan_mode_enabled {
            vec![
                a.giver.name.as_str(),
                a.giver.clan.label(),
                a.receiver.name.as_str(),
                a.receiver.clan.label(),
                pre_selected,
            ]
        } else {
            vec![a.giver.name.as_str(), a.receiver.name.as_str(), pre_selected]
        };
        lines.push(cells.into_iter().map(quote).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

/// Suggested file name for an export made on `date` (`YYYY-MM-DD`).
pub fn csv_file_name(date: &str) -> String {
    format!("secret-santa-{date}.csv")
}

/// Render assignments as aligned plain text, one pairing per line.
pub fn to_table(assignments: &[Assignment], clan_mode_enabled: bool) -> String {
    let side = |name: &str, clan: &str| {
        if clan_mode_enabled {
            format!("{name} ({clan})")
        } else {
            name.to_string()
        }
    };

    let rows: Vec<(String, String, bool)> = assignments
        .iter()
        .map(|a| {
            (
                side(a.giver.name.as_str(), a.giver.clan.label()),
                side(a.receiver.name.as_str(), a.receiver.clan.label()),
                a.is_pre_selected,
            )
        })
        .collect();

    let width = rows.iter().map(|(giver, _, _)| giver.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|(giver, receiver, pre_selected)| {
            let marker = if *pre_selected { "  [pre-selected]" } else { "" };
            format!("{giver:<width$} -> {receiver}{marker}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

// ============================================================================
// Unit Tests
// ============================================================================
