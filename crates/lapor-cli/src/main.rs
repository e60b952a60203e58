//! lapor - dashboard tooling for compliance-inspection report evaluation.
//!
//! ## Commands
//!
//! - `init`: create an empty report snapshot
//! - `report`: add a report or move it through the evaluation lifecycle
//! - `summary`: render the dashboard summary counts for a snapshot
//! - `taxonomy`: query the nonconformity catalog

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

use lapor_core::metrics::METRICS;
use lapor_core::reporting::{render_summary_md, write_summary_json, SummaryArtifact};
use lapor_core::snapshot::{ReportRow, ReportSnapshot};
use lapor_core::summary::summarize;
use lapor_core::taxonomy::Taxonomy;
use lapor_core::telemetry::init_tracing;
use lapor_core::Report;

#[derive(Parser)]
#[command(name = "lapor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluation dashboard tooling for compliance-inspection reports", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize an empty report snapshot
    Init {
        /// Snapshot file to create
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,
    },

    /// Add a report or move it through the evaluation lifecycle
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Render the dashboard summary counts for a snapshot
    Summary {
        /// Snapshot file to aggregate
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,

        /// Print the JSON artifact instead of markdown
        #[arg(long)]
        json: bool,

        /// Also write the JSON artifact to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query the nonconformity catalog
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },
}

#[derive(Subcommand)]
enum ReportAction {
    /// Add a new report to the evaluation queue
    Add {
        /// Snapshot file to update
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,

        /// Short description of the finding
        #[arg(short, long)]
        title: String,

        /// Nonconformity category, validated against the catalog
        #[arg(long, requires = "subcategory")]
        category: Option<String>,

        /// Nonconformity subcategory, validated against the catalog
        #[arg(long, requires = "category")]
        subcategory: Option<String>,
    },

    /// Claim a queued report for evaluation
    Claim {
        /// Snapshot file to update
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,

        /// Report id
        #[arg(long)]
        id: Uuid,
    },

    /// Finalize an evaluation pass with no flagged issues
    Complete {
        /// Snapshot file to update
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,

        /// Report id
        #[arg(long)]
        id: Uuid,
    },

    /// Finalize an evaluation pass and flag it for re-review
    Flag {
        /// Snapshot file to update
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,

        /// Report id
        #[arg(long)]
        id: Uuid,
    },

    /// Re-queue a flagged report for another evaluation pass
    Requeue {
        /// Snapshot file to update
        #[arg(long, default_value = "reports.json")]
        reports: PathBuf,

        /// Report id
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum TaxonomyAction {
    /// List all categories and their subcategories
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Load the catalog from this file instead of the embedded revision
        #[arg(long)]
        asset: Option<PathBuf>,
    },

    /// Show the subcategories of one category
    Show {
        /// Exact category name
        name: String,

        /// Load the catalog from this file instead of the embedded revision
        #[arg(long)]
        asset: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.json_logs, cli.verbose);

    let result = match cli.command {
        Commands::Init { reports } => cmd_init(&reports),
        Commands::Report { action } => match action {
            ReportAction::Add {
                reports,
                title,
                category,
                subcategory,
            } => cmd_report_add(&reports, &title, category.as_deref(), subcategory.as_deref()),
            ReportAction::Claim { reports, id } => {
                cmd_report_transition(&reports, id, "claim", Report::claim)
            }
            ReportAction::Complete { reports, id } => {
                cmd_report_transition(&reports, id, "complete", Report::complete)
            }
            ReportAction::Flag { reports, id } => {
                cmd_report_transition(&reports, id, "flag", Report::flag_for_re_review)
            }
            ReportAction::Requeue { reports, id } => {
                cmd_report_transition(&reports, id, "requeue", Report::requeue)
            }
        },
        Commands::Summary {
            reports,
            json,
            output,
        } => cmd_summary(&reports, json, output.as_deref()),
        Commands::Taxonomy { action } => match action {
            TaxonomyAction::List { json, asset } => cmd_taxonomy_list(json, asset.as_deref()),
            TaxonomyAction::Show { name, asset } => cmd_taxonomy_show(&name, asset.as_deref()),
        },
    };

    METRICS.flush();
    result
}

fn load_snapshot(path: &Path) -> Result<ReportSnapshot> {
    ReportSnapshot::from_path(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))
}

fn load_taxonomy(asset: Option<&Path>) -> Result<Taxonomy> {
    match asset {
        Some(path) => Taxonomy::from_path(path)
            .with_context(|| format!("failed to load taxonomy asset: {}", path.display())),
        None => Ok(Taxonomy::builtin().clone()),
    }
}

/// Initialize an empty report snapshot
fn cmd_init(reports: &Path) -> Result<()> {
    let mut snapshot = ReportSnapshot::new();
    snapshot
        .write_to_path(reports)
        .with_context(|| format!("failed to write snapshot: {}", reports.display()))?;

    println!("Initialized empty snapshot at {}", reports.display());
    Ok(())
}

/// Add a new report to the evaluation queue
fn cmd_report_add(
    reports: &Path,
    title: &str,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Result<()> {
    let mut snapshot = load_snapshot(reports)?;

    let mut report = Report::new(title);
    if let (Some(category), Some(subcategory)) = (category, subcategory) {
        report.classify(Taxonomy::builtin(), category, subcategory)?;
    }

    info!(report_id = %report.report_id, "queueing report");
    snapshot.push_report(&report);
    snapshot
        .write_to_path(reports)
        .with_context(|| format!("failed to write snapshot: {}", reports.display()))?;

    println!("Added report {}", report.report_id);
    println!("Status: {}", report.status.label());
    Ok(())
}

/// Apply one lifecycle transition and write the snapshot back.
///
/// On a lifecycle error the snapshot file is left untouched.
fn cmd_report_transition<F>(reports: &Path, id: Uuid, verb: &str, apply: F) -> Result<()>
where
    F: FnOnce(&mut Report) -> lapor_core::Result<()>,
{
    let mut snapshot = load_snapshot(reports)?;

    let row = snapshot.find_row_mut(id)?;
    let mut report = row.to_report()?;
    apply(&mut report).with_context(|| format!("cannot {verb} report {id}"))?;
    *row = ReportRow::from(&report);

    snapshot
        .write_to_path(reports)
        .with_context(|| format!("failed to write snapshot: {}", reports.display()))?;

    println!("Report {} is now: {}", id, report.status.label());
    Ok(())
}

/// Render the dashboard summary counts for a snapshot
fn cmd_summary(reports: &Path, json: bool, output: Option<&Path>) -> Result<()> {
    let snapshot = load_snapshot(reports)?;
    let stats = summarize(&snapshot.reports)?;

    let taxonomy_digest = Taxonomy::builtin().digest().ok();
    let artifact = SummaryArtifact::new(stats, taxonomy_digest);

    if json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else {
        print!("{}", render_summary_md(&stats));
    }

    if let Some(path) = output {
        write_summary_json(path, &artifact)?;
        info!(path = %path.display(), "summary artifact written");
    }
    Ok(())
}

/// List all categories and their subcategories
fn cmd_taxonomy_list(json: bool, asset: Option<&Path>) -> Result<()> {
    let taxonomy = load_taxonomy(asset)?;

    if json {
        println!("{}", serde_json::to_string_pretty(taxonomy.categories())?);
        return Ok(());
    }

    for category in taxonomy.categories() {
        println!("{}", category.name);
        for subcategory in &category.subcategories {
            println!("  - {subcategory}");
        }
    }
    Ok(())
}

/// Show the subcategories of one category
fn cmd_taxonomy_show(name: &str, asset: Option<&Path>) -> Result<()> {
    let taxonomy = load_taxonomy(asset)?;
    let subcategories = taxonomy.subcategories_of(name)?;

    println!("{name}");
    for subcategory in subcategories {
        println!("  - {subcategory}");
    }
    Ok(())
}
