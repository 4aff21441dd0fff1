//! Label rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `metrics`: Advance widths of the standard PDF fonts
//! - `fit`: Shrink-to-fit for single-line text
//! - `grid`: Placement of labels on the page grid
//! - `label`: Drawing of one label into its cell
//! - `surface`: The drawing surface trait and an in-memory recorder
//! - `pdf`: The PDF surface

pub mod defaults;
pub mod fit;
pub mod grid;
pub mod label;
pub mod metrics;
pub mod pdf;
pub mod surface;

// Re-export commonly used items
pub use fit::{TextMeasure, fit_font, fit_text};
pub use grid::{GridLayout, PlacedLabel};
pub use label::{DrawLabel, EtiquetteLabel, Label, TrayLabel};
pub use metrics::StandardFont;
pub use pdf::PdfSurface;
pub use surface::{Align, DrawOp, DrawingSurface, RecordingSurface, Stroke};

use crate::config::LabelConfig;
use crate::errors::RenderError;
use crate::log;

/// What a render pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub labels: usize,
    pub pages: usize,
}

/// Draw `labels` in order onto `surface` and finalize it.
///
/// A page break is issued right before the first label of every page after
/// the first, never after the last label, so the final partial page is kept.
/// The surface is finalized whether or not there is anything to draw.
pub fn render_labels(
    labels: &[Label],
    config: &LabelConfig,
    surface: &mut dyn DrawingSurface,
) -> Result<RenderSummary, RenderError> {
    let layout = GridLayout::new(config.grid());

    for (index, label) in labels.iter().enumerate() {
        if layout.starts_new_page(index) {
            log::debug!(index, "starting new page");
            surface.new_page();
        }
        let placed = layout.place(index);
        label.draw(surface, &placed, config);
    }

    surface.finalize()?;

    let summary = RenderSummary {
        labels: labels.len(),
        pages: layout.page_count(labels.len()),
    };
    log::info!(labels = summary.labels, pages = summary.pages, "rendered labels");
    Ok(summary)
}
