//! Terminal output formatting

use colored::Colorize;
use testimpact_core::{ImpactReport, ImpactResult, ImpactType};

/// Print one commit's report grouped by impact type
pub fn print_report(commit: &str, report: &ImpactReport) {
    println!();

    if report.results.is_empty() {
        println!(
            "  {}",
            format!("No impacted tests for {}", commit).green()
        );
        print_footer(report);
        return;
    }

    print_group(&"+ added".green().bold().to_string(), report, ImpactType::Added);
    print_group(&"- removed".red().bold().to_string(), report, ImpactType::Removed);
    print_group(
        &"~ modified".yellow().bold().to_string(),
        report,
        ImpactType::Modified,
    );

    print_footer(report);
}

fn print_group(header: &str, report: &ImpactReport, impact_type: ImpactType) {
    let group: Vec<&ImpactResult> = report
        .results
        .iter()
        .filter(|r| r.impact_type == impact_type)
        .collect();

    if group.is_empty() {
        return;
    }

    println!("  {} ({})", header, group.len());
    for result in group {
        let marker = if result.indirect {
            " [indirect]".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "      {} {}{}",
            result.test_name,
            format!("({})", result.file).dimmed(),
            marker
        );
    }
    println!();
}

fn print_footer(report: &ImpactReport) {
    let summary = report.summary();

    for warning in &report.warnings {
        println!("  {}", format!("warning: {}", warning).dimmed());
    }
    if !report.warnings.is_empty() {
        println!();
    }

    println!("  {}", "\u{2500}".repeat(60).dimmed());
    println!(
        "  {} \u{00b7} {} \u{00b7} {} \u{00b7} {} indirect",
        format!("{} added", summary.added).green(),
        format!("{} removed", summary.removed).red(),
        format!("{} modified", summary.modified).yellow(),
        summary.indirect,
    );
    println!("  {} changed file(s) in commit", summary.files_changed);
}
