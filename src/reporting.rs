// Reporting and output for the route tester
// Per-probe lines while the run progresses, then a summary block

use crate::models::Outcome;
use crate::summary::Summary;
use chrono::{DateTime, Local};
use std::io::{self, Write};

const RULE_WIDTH: usize = 80;

/// Shorten `s` to at most `max` characters, ending in "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Successful probes are only shown in verbose mode.
pub fn should_print(outcome: &Outcome, verbose: bool) -> bool {
    verbose || !(200..400).contains(&outcome.status)
}

fn glyph(outcome: &Outcome) -> char {
    if outcome.status >= 400 || outcome.error.is_some() {
        '✗'
    } else if outcome.status == 0 {
        '○'
    } else {
        '✓'
    }
}

/// One line per probe: glyph, service, path, method, status, auth marker, detail.
pub fn format_outcome(outcome: &Outcome) -> String {
    let probe = &outcome.probe;
    let mut line = format!(
        "{} {:<30} {:<40} {:<6} {:>3}{}",
        glyph(outcome),
        probe.service,
        truncate(&probe.path, 40),
        probe.method.to_string(),
        outcome.status,
        if probe.auth_required { " [AUTH]" } else { "" },
    );

    if let Some(err) = &outcome.error {
        line.push_str(&format!(" ERROR: {}", err));
    } else if let Some(msg) = outcome.message.as_deref().filter(|m| !m.is_empty()) {
        line.push_str(&format!(" - {}", truncate(msg, 50)));
    }
    line
}

pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome, verbose: bool) -> io::Result<()> {
    if should_print(outcome, verbose) {
        writeln!(out, "{}", format_outcome(outcome))?;
    }
    Ok(())
}

pub fn write_header<W: Write>(
    out: &mut W,
    base_url: &str,
    dry_run: bool,
    started: DateTime<Local>,
) -> io::Result<()> {
    writeln!(out, "Testing routes against {}", base_url)?;
    writeln!(out, "Started at {}", started.format("%Y-%m-%d %H:%M:%S"))?;
    if dry_run {
        writeln!(out, "Dry run: no requests will be sent")?;
    }
    writeln!(out)
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "Total Endpoints Tested: {}", summary.total)?;
    writeln!(
        out,
        "Successful (2xx/3xx):   {} ({:.1}%)",
        summary.successful,
        summary.percent(summary.successful)
    )?;
    writeln!(
        out,
        "Auth Failed (401):      {} ({:.1}%)",
        summary.auth_failed,
        summary.percent(summary.auth_failed)
    )?;
    writeln!(
        out,
        "Other Errors:           {} ({:.1}%)",
        summary.other_errors,
        summary.percent(summary.other_errors)
    )?;
    if summary.unclassified > 0 {
        writeln!(
            out,
            "Not Classified:         {} ({:.1}%)",
            summary.unclassified,
            summary.percent(summary.unclassified)
        )?;
    }

    writeln!(out, "\nBy Status Code:")?;
    for (code, count) in &summary.by_status_code {
        writeln!(out, "  {}: {}", code, count)?;
    }

    writeln!(out, "\nBy Service:")?;
    for (service, count) in &summary.by_service {
        writeln!(out, "  {:<30}: {}", service, count)?;
    }

    writeln!(out, "\nPotentially Problematic Routes (401 errors on unauthenticated routes):")?;
    for outcome in &summary.anomalies {
        writeln!(
            out,
            "  - {} {} ({})",
            outcome.probe.method, outcome.probe.path, outcome.probe.service
        )?;
    }
    Ok(())
}
