//! Santa Matcher - command line front end.
//!
//! Loads a saved draft, runs the engine and prints the matching.
//!
//! ```bash
//! santa-matcher generate draft.json
//! santa-matcher generate draft.json --format csv --output exports/
//! santa-matcher check draft.json
//! RUST_LOG=santa_matcher=debug santa-matcher generate draft.json --seed 7
//! ```
//!
//! Exits with 1 when no matching exists and 2 when the draft itself is
//! invalid. Failures go to stderr; `--output` is only written on success.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "CLI tool reports to the terminal"
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use santa_matcher::export::{csv_file_name, to_csv, to_table};
use santa_matcher::roster::{check_clan_balance, check_feasibility, Roster};
use santa_matcher::{Draft, EngineConfig, MatchError, MatchReport, MatchResult, MatchingEngine};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates Secret Santa assignments from a draft
    Generate {
        /// Draft JSON file
        draft: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Fixed RNG seed for a reproducible matching
        #[arg(long)]
        seed: Option<u64>,
        /// Attempts per search phase
        #[arg(long)]
        attempts: Option<u32>,
        /// Ignore clans regardless of the draft's toggle
        #[arg(long)]
        no_clans: bool,
        /// Write to this file, or into this directory under a dated name
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validates a draft without searching and prints its fingerprint
    Check {
        /// Draft JSON file
        draft: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

/// Exit code for a request the engine rejected as invalid.
const EXIT_INVALID: u8 = 2;

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Generate { draft, format, seed, attempts, no_clans, output } => {
            let mut loaded = Draft::from_path(&draft)
                .with_context(|| format!("loading {}", draft.display()))?;
            if no_clans {
                loaded.clan_mode_enabled = false;
            }

            let mut config = EngineConfig::default();
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(attempts) = attempts {
                config = config.with_max_attempts(attempts);
            }

            info!(participants = loaded.participants.len(), "generating matching");
            let result = loaded.generate(&mut MatchingEngine::with_config(config));

            let matching = match &result {
                Ok(matching) => matching,
                Err(err) => {
                    if let Format::Json = format {
                        println!("{}", render_report(&result)?);
                    }
                    eprintln!("error: {err}");
                    for detail in err.details() {
                        eprintln!("  - {detail}");
                    }
                    return Ok(failure_code(err));
                }
            };

            if let Some(warning) = &matching.warning {
                warn!("{warning}");
            }

            let rendered = match format {
                Format::Json => render_report(&result)?,
                Format::Csv => to_csv(&matching.assignments, loaded.clan_mode_enabled),
                Format::Table => {
                    let mut text = to_table(&matching.assignments, loaded.clan_mode_enabled);
                    text.push_str(&format!(
                        "\n\n{} phase, {} attempt(s), fingerprint {}",
                        matching.receipt.phase.as_str(),
                        matching.receipt.attempts,
                        matching.receipt.fingerprint_hex()
                    ));
                    text
                }
            };

            match output {
                Some(path) => write_output(&path, &rendered, format)?,
                None => println!("{rendered}"),
            }

            Ok(ExitCode::SUCCESS)
        },
        Commands::Check { draft } => {
            let loaded = Draft::from_path(&draft)
                .with_context(|| format!("loading {}", draft.display()))?;

            println!("fingerprint {}", hex::encode(loaded.fingerprint()));
            let roster = match Roster::build(
                &loaded.participants,
                &loaded.pre_selections,
                &loaded.exclusions,
            ) {
                Ok(roster) => roster,
                Err(err) => {
                    println!("invalid: {err}");
                    for detail in err.details() {
                        println!("  - {detail}");
                    }
                    return Ok(failure_code(&err));
                }
            };

            if let Err(gap) = check_feasibility(&roster) {
                println!("unsatisfiable: {gap}");
                return Ok(ExitCode::FAILURE);
            }

            println!(
                "ok: {} participants, {} pre-selected",
                roster.len(),
                roster.pre_selected_count()
            );
            if loaded.clan_mode_enabled {
                if let Err(gap) = check_clan_balance(&roster) {
                    println!("note: {gap}; same-clan pairings will be needed");
                }
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn render_report(result: &MatchResult) -> Result<String> {
    serde_json::to_string_pretty(&MatchReport::from(result)).context("serializing result")
}

fn failure_code(err: &MatchError) -> ExitCode {
    if err.is_validation() {
        ExitCode::from(EXIT_INVALID)
    } else {
        ExitCode::FAILURE
    }
}

fn write_output(path: &Path, rendered: &str, format: Format) -> Result<()> {
    let target = if path.is_dir() {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let name = match format {
            Format::Csv => csv_file_name(&date),
            Format::Json => format!("secret-santa-{date}.json"),
            Format::Table => format!("secret-santa-{date}.txt"),
        };
        path.join(name)
    } else {
        path.to_path_buf()
    };

    fs::write(&target, rendered).with_context(|| format!("writing {}", target.display()))?;
    info!("wrote {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory holding a draft and an empty export directory.
    fn scratch(name: &str, draft: &str) -> (PathBuf, PathBuf, PathBuf) {
        let root = std::env::temp_dir()
            .join(format!("santa-matcher-{name}-{}", std::process::id()));
        let exports = root.join("exports");
        fs::create_dir_all(&exports).unwrap();

        let draft_path = root.join("draft.json");
        fs::write(&draft_path, draft).unwrap();
        (root, draft_path, exports)
    }

    fn generate_csv(draft: &Path, exports: &Path) -> ExitCode {
        let cli = Cli::try_parse_from([
            "santa-matcher",
            "generate",
            draft.to_str().unwrap(),
            "--format",
            "csv",
            "--seed",
            "1",
            "--output",
            exports.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap()
    }

    #[test]
    fn test_failed_generate_writes_no_export() {
        let (root, draft, exports) = scratch(
            "failed",
            r#"{"participants": [{"id": 1, "name": "Solo", "clan": "Smith"}]}"#,
        );

        generate_csv(&draft, &exports);
        assert_eq!(fs::read_dir(&exports).unwrap().count(), 0);

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_successful_generate_writes_dated_export() {
        let (root, draft, exports) = scratch(
            "success",
            r#"{"participants": [
                {"id": 1, "name": "Ann", "clan": "Smith"},
                {"id": 2, "name": "Ben", "clan": "Jones"}
            ]}"#,
        );

        generate_csv(&draft, &exports);
        let written: Vec<PathBuf> =
            fs::read_dir(&exports).unwrap().map(|entry| entry.unwrap().path()).collect();
        assert_eq!(written.len(), 1);

        let name = written[0].file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("secret-santa-") && name.ends_with(".csv"));
        let csv = fs::read_to_string(&written[0]).unwrap();
        assert!(csv.starts_with("Giver,Giver Clan,Receiver,Receiver Clan,Pre-selected"));

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_failure_codes() {
        let invalid = MatchError::InsufficientParticipants { count: 1 };
        let unsatisfiable = MatchError::Unsatisfiable { hint: "" };

        assert_eq!(
            format!("{:?}", failure_code(&invalid)),
            format!("{:?}", ExitCode::from(EXIT_INVALID))
        );
        assert_eq!(
            format!("{:?}", failure_code(&unsatisfiable)),
            format!("{:?}", ExitCode::FAILURE)
        );
    }
}
