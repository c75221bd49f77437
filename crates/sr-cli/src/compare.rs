//! # Compare Subcommand
//!
//! Runs a comparison and prints either the text report (one presence table
//! per section, then the summary and any issues) or the
//! `ComparisonReport` as JSON.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use sr_core::RepresentationId;
use sr_schema::summary::preview;
use sr_schema::{compare, CompareOptions, ComparisonReport, SectionReport, SourceLayout};

/// Arguments for the compare subcommand.
#[derive(Args, Debug, Default)]
pub struct CompareArgs {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

const RULE_WIDTH: usize = 80;
const TABLE_WIDTH: usize = 85;

/// Execute the compare subcommand.
pub fn run_compare(args: &CompareArgs, base_dir: &Path, config: Option<&Path>) -> Result<u8> {
    let config = crate::load_config(config, base_dir)?;
    let options = CompareOptions::from_config(&config).context("invalid xsd_types in config")?;
    let report = compare(&SourceLayout::new(base_dir), &options);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("failed to serialize report")?;
        writeln!(out)?;
    } else {
        render_report(&report, config.preview_limit, &mut out)?;
    }
    Ok(0)
}

fn mark(present: bool) -> &'static str {
    if present {
        "✅"
    } else {
        "❌"
    }
}

fn banner(title: &str, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)
}

/// Render one section's presence table.
pub fn render_section(section: &SectionReport, out: &mut impl Write) -> std::io::Result<()> {
    banner(&format!("{} SECTION COMPARISON", section.section.as_str().to_uppercase()), out)?;
    writeln!(
        out,
        "{:<25} {:<15} {:<18} {:<15} {:<10}",
        "Field",
        RepresentationId::JsonSchema.column_label(),
        RepresentationId::JsonLdContext.column_label(),
        RepresentationId::MetaSchema.column_label(),
        RepresentationId::Xsd.column_label(),
    )?;
    writeln!(out, "{}", "-".repeat(TABLE_WIDTH))?;
    for row in &section.rows {
        let prefix = if row.mismatch { "⚠️  " } else { "   " };
        writeln!(
            out,
            "{prefix}{:<22} {:<15} {:<18} {:<15} {:<10}",
            row.field,
            mark(row.presence.json_schema),
            mark(row.presence.json_ld_context),
            mark(row.presence.meta_schema),
            mark(row.presence.xsd),
        )?;
    }
    writeln!(out)
}

fn render_list<T: std::fmt::Display>(
    title: &str,
    items: &[T],
    limit: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "{title}:")?;
    if items.is_empty() {
        writeln!(out, "  None")?;
    }
    let shown = preview(items, limit);
    for item in shown.shown {
        writeln!(out, "  - {item}")?;
    }
    if shown.hidden > 0 {
        writeln!(out, "  … and {} more", shown.hidden)?;
    }
    writeln!(out)
}

/// Render the full text report.
pub fn render_report(report: &ComparisonReport, preview_limit: usize, out: &mut impl Write) -> std::io::Result<()> {
    banner("SCHEMA COMPARISON REPORT", out)?;
    for section in &report.sections {
        render_section(section, out)?;
    }

    let summary = &report.summary;
    banner("SUMMARY", out)?;
    render_list("Missing from context.jsonld", &summary.missing_from_context, preview_limit, out)?;
    render_list("Missing from schema.json", &summary.missing_from_schema, preview_limit, out)?;
    render_list("Only in schema.json", &summary.only_in_schema, preview_limit, out)?;
    render_list("Only in context.jsonld", &summary.only_in_context, preview_limit, out)?;
    render_list("Only in XSD", &summary.only_in_xsd, preview_limit, out)?;
    render_list("Only in meta-schema.json", &summary.only_in_meta, usize::MAX, out)?;

    for rep in RepresentationId::all() {
        writeln!(out, "Total fields in {}: {}", rep.file_name(), summary.total(*rep))?;
    }
    writeln!(out, "Mismatched section fields: {}", report.mismatch_count())?;

    if !report.issues.is_empty() {
        writeln!(out)?;
        banner("ISSUES", out)?;
        for issue in &report.issues {
            let level = if issue.is_warning() { "warning" } else { "error" };
            writeln!(out, "  [{level}] {issue}")?;
        }
    }
    Ok(())
}
