//! Ratify — verify and apply a proposal folder.
//!
//! # Usage
//!
//! ```text
//! ratify <proposal_folder>
//! ```
//!
//! Verifies the folder's `MANIFEST.sha256`, applies `patches/*.diff` to the
//! working tree (or copies `*-proposal.md` documents when there are none),
//! then regenerates `MANIFEST.sha256` over the destination's markdown files.
//!
//! Exit codes: `0` success; `1` usage error, folder not found, or fatal
//! failure; `2` manifest verification failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;

use ratify_apply::{
    pipeline::{self, RunAction, RunReport},
    ApplyError, GitApply,
};
use ratify_core::MANIFEST_FILE_NAME;

const EXIT_USAGE: u8 = 1;
const EXIT_VERIFICATION: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "ratify",
    version,
    about = "Verify a proposal folder's manifest, then apply its patches or copy its documents",
    long_about = None,
)]
struct Cli {
    /// Path to the proposal folder.
    folder: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let folder = match std::fs::canonicalize(&cli.folder) {
        Ok(folder) => folder,
        Err(_) => {
            eprintln!("proposal folder not found: {}", cli.folder.display());
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };
    let workdir = std::env::current_dir()?;
    let runner = GitApply::new(&workdir);

    println!("verifying proposal folder {}", folder.display());
    match pipeline::run(&folder, &workdir, &runner) {
        Ok(report) => {
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        Err(ApplyError::Verification { issues }) => {
            for issue in &issues {
                eprintln!("  {} {issue}", "✗".red());
            }
            eprintln!(
                "{} manifest verification failed with {} issue(s)",
                "✗".red().bold(),
                issues.len()
            );
            Ok(ExitCode::from(EXIT_VERIFICATION))
        }
        Err(err) => Err(err.into()),
    }
}

fn print_report(report: &RunReport) {
    if report.verification.manifest_found {
        println!(
            "{} proposal manifest verified ({} file(s))",
            "✓".green(),
            report.verification.checked
        );
    } else {
        println!(
            "{} no {MANIFEST_FILE_NAME} in proposal folder; skipping verification",
            "!".yellow()
        );
    }

    match &report.action {
        RunAction::PatchesApplied { patches } => {
            println!("{} applied {} patch(es)", "✓".green(), patches.len());
            for patch in patches {
                println!("  ✎  {}", patch.display());
            }
        }
        RunAction::DocsCopied { docs } => {
            println!(
                "{} no patches found; copied {} proposal document(s)",
                "!".yellow(),
                docs.len()
            );
            for doc in docs {
                println!("  ✎  {} -> {}", doc.source.display(), doc.destination.display());
            }
        }
    }

    println!(
        "{} wrote {} ({} entries)",
        "✓".green(),
        report.manifest_path.display(),
        report.manifest_entries.len()
    );
}
