//! The drawing surface abstraction and an in-memory recorder.

use glam::DVec2;

use crate::errors::RenderError;
use crate::render::fit::TextMeasure;
use crate::render::metrics::StandardFont;
use crate::types::{Color, Rect};

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    /// Left edge of a run of `width` anchored at `x`.
    pub fn start_x(self, x: f64, width: f64) -> f64 {
        match self {
            Align::Left => x,
            Align::Right => x - width,
            Align::Center => x - width / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Where labels are drawn. Coordinates are points with the origin at the
/// bottom left of the page and y growing upwards.
///
/// A surface is opened on its first page, receives draw commands, and is
/// finalized exactly once.
pub trait DrawingSurface: TextMeasure {
    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>);

    /// Draw `text` with its baseline at `pos.y`, anchored at `pos.x` by `align`.
    fn draw_text(
        &mut self,
        pos: DVec2,
        text: &str,
        font: StandardFont,
        size: f64,
        color: Color,
        align: Align,
    );

    fn draw_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color);

    /// Close the current page and start a fresh one.
    fn new_page(&mut self);

    /// Flush the document. Calling this twice is an error.
    fn finalize(&mut self) -> Result<(), RenderError>;
}

/// One recorded draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        page: usize,
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Text {
        page: usize,
        pos: DVec2,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
        align: Align,
    },
    Line {
        page: usize,
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Color,
    },
    NewPage,
}

impl DrawOp {
    /// Page the op was drawn on; `None` for page breaks.
    pub fn page(&self) -> Option<usize> {
        match self {
            DrawOp::Rect { page, .. } | DrawOp::Text { page, .. } | DrawOp::Line { page, .. } => {
                Some(*page)
            }
            DrawOp::NewPage => None,
        }
    }
}

/// A surface that keeps every command in memory, for dry runs and tests.
///
/// Text is measured with the standard font metrics, the same way the PDF
/// surface measures it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    page: usize,
    finalized: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of pages, counting the one the surface opens on.
    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Positions in [`Self::ops`] where a page break was recorded.
    pub fn page_breaks(&self) -> Vec<usize> {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, DrawOp::NewPage))
            .map(|(i, _)| i)
            .collect()
    }

    /// Recorded text runs, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, font: StandardFont, size: f64) -> f64 {
        font.text_width(text, size)
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>) {
        self.ops.push(DrawOp::Rect {
            page: self.page,
            rect,
            fill,
            stroke,
        });
    }

    fn draw_text(
        &mut self,
        pos: DVec2,
        text: &str,
        font: StandardFont,
        size: f64,
        color: Color,
        align: Align,
    ) {
        self.ops.push(DrawOp::Text {
            page: self.page,
            pos,
            text: text.to_string(),
            font,
            size,
            color,
            align,
        });
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.ops.push(DrawOp::Line {
            page: self.page,
            from,
            to,
            width,
            color,
        });
    }

    fn new_page(&mut self) {
        self.ops.push(DrawOp::NewPage);
        self.page += 1;
    }

    fn finalize(&mut self) -> Result<(), RenderError> {
        if self.finalized {
            return Err(RenderError::AlreadyFinalized);
        }
        self.finalized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn align_offsets_the_run() {
        assert_eq!(Align::Left.start_x(100.0, 40.0), 100.0);
        assert_eq!(Align::Right.start_x(100.0, 40.0), 60.0);
        assert_eq!(Align::Center.start_x(100.0, 40.0), 80.0);
    }

    #[test]
    fn records_pages_and_breaks() {
        let mut surface = RecordingSurface::new();
        surface.draw_line(dvec2(0.0, 0.0), dvec2(1.0, 0.0), 0.5, Color::BLACK);
        surface.new_page();
        surface.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Some(Color::WHITE), None);

        assert_eq!(surface.page_count(), 2);
        assert_eq!(surface.page_breaks(), [1]);
        assert_eq!(surface.ops()[0].page(), Some(0));
        assert_eq!(surface.ops()[2].page(), Some(1));
    }

    #[test]
    fn finalizes_once() {
        let mut surface = RecordingSurface::new();
        surface.finalize().unwrap();
        assert!(surface.is_finalized());
        assert!(matches!(surface.finalize(), Err(RenderError::AlreadyFinalized)));
    }
}
