//! Generate label sheets from a CSV file.
//!
//! ```bash
//! # Etiquette sheet with the built-in template
//! taxalabel species.csv -o output/labels.pdf
//!
//! # Unit-tray labels with overrides from a config file
//! taxalabel species.csv --variant tray -c trays.json -o output/trays.pdf
//!
//! # Lay out without writing anything
//! taxalabel species.csv --dry-run
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use miette::{Context, IntoDiagnostic};
use taxalabel::{LabelConfig, RecordingSurface, Variant, generate, generate_pdf, load_records};
use tracing::{info, warn};

/// Turn taxon records into printable label sheets
#[derive(Parser, Debug)]
#[command(name = "taxalabel")]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV with a `taxon` column, a region column and an optional `Autor_Jahr` column
    csv: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = "output/labels.pdf")]
    output: PathBuf,

    /// JSON file overriding layout defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label sheet to produce (overrides the config file)
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Lay out the labels and print a summary without writing a PDF
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Etiquette,
    Tray,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Etiquette => Variant::Etiquette,
            VariantArg::Tray => Variant::Tray,
        }
    }
}

fn main() -> miette::Result<()> {
    // Logs go to stderr so dry-run summaries on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LabelConfig::from_path(path)?,
        None => LabelConfig::default(),
    };
    if let Some(variant) = args.variant {
        config.variant = variant.into();
    }
    config.validate()?;

    // Missing, undecodable or headerless input reads as an empty table
    let records = load_records(&args.csv, config.variant);
    if records.is_empty() {
        warn!(path = %args.csv.display(), "no records found, nothing to do");
        return Ok(());
    }

    if args.dry_run {
        let mut surface = RecordingSurface::new();
        let summary = generate(&records, &config, &mut surface)?;
        println!(
            "{} labels on {} page(s), {} draw operations",
            summary.labels,
            summary.pages,
            surface.ops().len()
        );
        return Ok(());
    }

    if let Some(dir) = args.output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    }

    let summary = generate_pdf(&records, &config, &args.output)?;
    info!(
        labels = summary.labels,
        pages = summary.pages,
        path = %args.output.display(),
        "labels written"
    );
    Ok(())
}
