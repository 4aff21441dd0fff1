//! Placement of labels on the page grid.
//!
//! Labels fill a page row-major from the top left: index `i` on a page lands
//! in row `i / cols`, column `i % cols`. Pages hold `rows * cols` labels.

use glam::{DVec2, dvec2};

use crate::config::GridConfig;
use crate::types::Rect;

/// Where one label goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    pub index: usize,
    pub page_index: usize,
    pub index_on_page: usize,
    /// Counted from the top of the page.
    pub row: usize,
    pub column: usize,
    /// Bottom-left corner of the cell.
    pub origin: DVec2,
    pub cell_size: DVec2,
}

impl PlacedLabel {
    pub fn cell_rect(&self) -> Rect {
        Rect {
            origin: self.origin,
            size: self.cell_size,
        }
    }
}

/// Maps label indices to cells. Assumes a validated [`GridConfig`].
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    page_height: f64,
    margin_left: f64,
    margin_top: f64,
    cell: DVec2,
}

impl GridLayout {
    pub fn new(grid: &GridConfig) -> Self {
        Self {
            rows: grid.rows as usize,
            cols: grid.cols as usize,
            page_height: grid.page_height,
            margin_left: grid.margins.left,
            margin_top: grid.margins.top,
            cell: grid.cell_size(),
        }
    }

    pub fn labels_per_page(&self) -> usize {
        self.rows * self.cols
    }

    pub fn place(&self, index: usize) -> PlacedLabel {
        let per_page = self.labels_per_page();
        let index_on_page = index % per_page;
        let row = index_on_page / self.cols;
        let column = index_on_page % self.cols;
        let origin = dvec2(
            self.margin_left + column as f64 * self.cell.x,
            self.page_height - self.margin_top - (row + 1) as f64 * self.cell.y,
        );
        PlacedLabel {
            index,
            page_index: index / per_page,
            index_on_page,
            row,
            column,
            origin,
            cell_size: self.cell,
        }
    }

    /// A page break goes right before this label.
    pub fn starts_new_page(&self, index: usize) -> bool {
        index > 0 && index % self.labels_per_page() == 0
    }

    /// Pages needed for `labels` labels. A document always has at least one.
    pub fn page_count(&self, labels: usize) -> usize {
        labels.div_ceil(self.labels_per_page()).max(1)
    }
}
