//! Error types with diagnostics using miette
//!
//! Configuration problems are fatal and reported before any drawing starts.
//! Ingestion problems surface before a surface is opened. Render errors are
//! only ever I/O failures while writing the finished document.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while loading or validating a [`LabelConfig`](crate::config::LabelConfig)
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    #[diagnostic(code(taxalabel::config::invalid_grid))]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("invalid {field}: {source}")]
    #[diagnostic(code(taxalabel::config::invalid_length))]
    InvalidLength {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("margins leave no usable area on a {page_width}x{page_height} page")]
    #[diagnostic(
        code(taxalabel::config::invalid_margins),
        help("reduce the margins or enlarge the page")
    )]
    InvalidMargins { page_width: f64, page_height: f64 },

    #[error(
        "inner box {inner_width}x{inner_height} does not fit a {cell_width:.3}x{cell_height:.3} cell with padding {padding_x}/{padding_y}"
    )]
    #[diagnostic(
        code(taxalabel::config::inner_box_too_large),
        help("use fewer rows/columns, smaller margins or a smaller inner box")
    )]
    InnerBoxTooLarge {
        inner_width: f64,
        inner_height: f64,
        cell_width: f64,
        cell_height: f64,
        padding_x: f64,
        padding_y: f64,
    },

    #[error("font `{role}`: minimum size {min_size} exceeds base size {base_size}")]
    #[diagnostic(code(taxalabel::config::invalid_font))]
    InvalidFont {
        role: &'static str,
        base_size: f64,
        min_size: f64,
    },

    #[error("unknown font family `{name}`")]
    #[diagnostic(
        code(taxalabel::config::unknown_font),
        help(
            "supported: Helvetica, Helvetica-Bold, Helvetica-Oblique, Helvetica-BoldOblique, Courier, Courier-Bold, Courier-Oblique, Courier-BoldOblique"
        )
    )]
    UnknownFont { name: String },

    #[error("failed to read config file {path}")]
    #[diagnostic(code(taxalabel::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    #[diagnostic(
        code(taxalabel::config::parse),
        help("colors are #rrggbb, rgb(r,g,b), cmyk(c,m,y,k) with 0..100 channels, white or black")
    )]
    Parse(#[source] serde_json::Error),
}

// ============================================================================
// Ingestion Errors
// ============================================================================

/// Errors that occur while reading tabular input
#[derive(Error, Diagnostic, Debug)]
pub enum IngestError {
    #[error("failed to open {path}")]
    #[diagnostic(code(taxalabel::ingest::open))]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    #[diagnostic(
        code(taxalabel::ingest::decode),
        help("re-export the table as UTF-8 CSV")
    )]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("malformed CSV")]
    #[diagnostic(code(taxalabel::ingest::csv))]
    Csv(#[from] csv::Error),

    #[error("header has no `{column}` column")]
    #[diagnostic(
        code(taxalabel::ingest::missing_column),
        help("found columns: {found}")
    )]
    MissingColumn { column: &'static str, found: String },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while producing the output document
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("failed to write {path}")]
    #[diagnostic(code(taxalabel::render::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("surface was already finalized")]
    #[diagnostic(code(taxalabel::render::finalized))]
    AlreadyFinalized,
}

// ============================================================================
// Top-level
// ============================================================================

/// Any error the label pipeline can produce
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}
