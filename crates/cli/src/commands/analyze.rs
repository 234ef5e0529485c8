//! Analyze command: classify the tests impacted by a commit

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use testimpact_core::ImpactAnalyzer;

use crate::output::{self, Format};

pub fn run(repo: Option<&Path>, commit: Option<&str>, format: Option<Format>) -> Result<()> {
    let start = Instant::now();
    let repo_path = repo.unwrap_or_else(|| Path::new("."));
    let repo_path = std::fs::canonicalize(repo_path).unwrap_or_else(|_| PathBuf::from("."));
    let commit = commit.unwrap_or("HEAD");

    eprintln!(
        "{}",
        format!(
            "  testimpact v{} — analyzing {}",
            testimpact_core::VERSION,
            commit
        )
        .bold()
    );
    eprintln!();

    // ── 1. Config + repository ───────────────────────────────────
    let analyzer = ImpactAnalyzer::open(&repo_path)?;
    let format = output::resolve_format(format, &analyzer.config().output.format);

    // ── 2. Classification ────────────────────────────────────────
    eprint!("  Classifying impacted tests... ");
    let report = analyzer.analyze(commit)?;
    eprintln!(
        "{} ({} changed file(s), {:.1}s)",
        "done".green(),
        report.files_changed,
        start.elapsed().as_secs_f64()
    );

    // ── 3. Output ────────────────────────────────────────────────
    match format {
        Format::Json => {
            let out = output::json::build(commit, &report);
            match serde_json::to_string_pretty(&out) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to serialize JSON: {}", e),
            }
        }
        Format::Terminal => output::terminal::print_report(commit, &report),
    }

    Ok(())
}
