//! Printable taxonomic labels.
//!
//! Records (a taxon name, a biogeographic region code and an optional
//! author/year string) are turned into label content, placed on a fixed page
//! grid, shrunk to fit, and drawn onto a [`DrawingSurface`]. Two sheets are
//! supported: region-colored collection labels ("etiquettes") and unit-tray
//! labels with a region bar strip.
//!
//! ```
//! use taxalabel::{CsvRecord, LabelConfig, RecordingSurface, generate};
//!
//! let records = [CsvRecord::new("Homo sapiens", "PA", "L., 1758")];
//! let mut surface = RecordingSurface::new();
//! let summary = generate(&records, &LabelConfig::etiquette(), &mut surface)?;
//! assert_eq!(summary.labels, 1);
//! assert!(surface.is_finalized());
//! # Ok::<(), taxalabel::Error>(())
//! ```

pub mod config;
pub mod content;
pub mod errors;
pub mod log;
pub mod records;
pub mod render;
pub mod taxon;
pub mod types;

use std::path::Path;

pub use config::{LabelConfig, Variant};
pub use content::{ContentSpec, TraySpec, build_label_specs, build_tray_specs};
pub use errors::{ConfigError, Error, IngestError, RenderError};
pub use records::{
    CsvRecord, TaxonRecord, load_records, parse_csv, parse_csv_for, read_csv, read_csv_for,
};
pub use render::{
    DrawingSurface, Label, PdfSurface, RecordingSurface, RenderSummary, StandardFont,
    render_labels,
};
pub use types::{Color, Rect};

use render::{EtiquetteLabel, TrayLabel};

/// Labels for `records` in print order, for the variant selected in `config`.
pub fn build_labels<R: TaxonRecord>(records: &[R], config: &LabelConfig) -> Vec<Label> {
    match config.variant {
        Variant::Etiquette => build_label_specs(records)
            .into_iter()
            .map(|spec| EtiquetteLabel::new(spec).into())
            .collect(),
        Variant::Tray => build_tray_specs(records)
            .into_iter()
            .map(|spec| TrayLabel::new(spec).into())
            .collect(),
    }
}

/// Validate `config`, then draw labels for `records` onto `surface` and
/// finalize it.
///
/// Nothing is drawn if the configuration is rejected. With no records the
/// surface is still finalized, which for a [`PdfSurface`] means a single
/// blank page.
pub fn generate<R: TaxonRecord>(
    records: &[R],
    config: &LabelConfig,
    surface: &mut dyn DrawingSurface,
) -> Result<RenderSummary, Error> {
    config.validate()?;
    let labels = build_labels(records, config);
    Ok(render_labels(&labels, config, surface)?)
}

/// [`generate`] into a PDF file at `output`.
///
/// The file is written only once the whole document is assembled.
pub fn generate_pdf<R: TaxonRecord>(
    records: &[R],
    config: &LabelConfig,
    output: &Path,
) -> Result<RenderSummary, Error> {
    config.validate()?;
    let mut surface = PdfSurface::create(output, config.grid().page_size());
    generate(records, config, &mut surface)
}
