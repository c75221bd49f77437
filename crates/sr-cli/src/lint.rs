//! # Lint Subcommand
//!
//! Lints the four representation files and prints errors, warnings and
//! information grouped by severity. Exits 1 if any error was found.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use sr_schema::{LintReport, SchemaLinter, Severity, SourceLayout};

/// Arguments for the lint subcommand.
#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Print findings as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the lint subcommand.
pub fn run_lint(args: &LintArgs, base_dir: &Path) -> Result<u8> {
    let report = SchemaLinter::new(SourceLayout::new(base_dir)).lint_all();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render_lint(&report, &mut out)?;
    }
    Ok(if report.passed() { 0 } else { 1 })
}

fn heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "❌ ERRORS:",
        Severity::Warning => "⚠️  WARNINGS:",
        Severity::Info => "ℹ️  INFORMATION:",
    }
}

/// Render findings grouped by severity, then the totals.
pub fn render_lint(report: &LintReport, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out, "LINTING RESULTS")?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out)?;

    for severity in Severity::all() {
        let mut findings = report.with_severity(*severity).peekable();
        if findings.peek().is_none() {
            continue;
        }
        writeln!(out, "{}", heading(*severity))?;
        writeln!(out, "{}", "-".repeat(80))?;
        for finding in findings {
            writeln!(out, "  {finding}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Errors:   {}", report.count(Severity::Error))?;
    writeln!(out, "Warnings: {}", report.count(Severity::Warning))?;
    writeln!(out, "Info:     {}", report.count(Severity::Info))?;
    writeln!(out)?;
    if report.passed() {
        writeln!(out, "✅ All schema files passed linting!")
    } else {
        writeln!(out, "❌ Linting failed with errors")
    }
}
