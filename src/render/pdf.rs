//! PDF output through `pdf-writer`.
//!
//! Pages are collected as content streams while labels are drawn; the
//! document is assembled and written only in [`DrawingSurface::finalize`], so
//! a failed run never leaves a partial file behind. Fonts are the standard
//! Type 1 faces, referenced by name with WinAnsi encoding and not embedded.

use std::path::{Path, PathBuf};

use glam::DVec2;
use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};

use super::fit::TextMeasure;
use super::metrics::StandardFont;
use super::surface::{Align, DrawingSurface, Stroke};
use crate::errors::RenderError;
use crate::log;
use crate::types::{Color, Rect};

const FONT_COUNT: usize = StandardFont::ALL.len();

pub struct PdfSurface {
    page_size: DVec2,
    target: Option<PathBuf>,
    pages: Vec<Vec<u8>>,
    current: Content,
    fonts_used: [bool; FONT_COUNT],
    output: Option<Vec<u8>>,
}

impl PdfSurface {
    /// A surface that keeps the finished document in memory.
    pub fn in_memory(page_size: DVec2) -> Self {
        Self {
            page_size,
            target: None,
            pages: Vec::new(),
            current: Content::new(),
            fonts_used: [false; FONT_COUNT],
            output: None,
        }
    }

    /// A surface that writes the finished document to `path`.
    pub fn create(path: impl AsRef<Path>, page_size: DVec2) -> Self {
        Self {
            target: Some(path.as_ref().to_path_buf()),
            ..Self::in_memory(page_size)
        }
    }

    /// The document, once finalized.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.output.as_deref()
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.output
    }

    /// Pages started so far, including the current one.
    pub fn page_count(&self) -> usize {
        if self.output.is_some() {
            self.pages.len()
        } else {
            self.pages.len() + 1
        }
    }

    fn font_name(font: StandardFont) -> String {
        format!("F{}", font as usize + 1)
    }

    fn set_fill(&mut self, color: Color) {
        match color {
            Color::Rgb(r, g, b) => {
                self.current.set_fill_rgb(channel(r), channel(g), channel(b));
            }
            Color::Cmyk(c, m, y, k) => {
                self.current.set_fill_cmyk(c, m, y, k);
            }
        }
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.current.set_line_width(stroke.width as f32);
        match stroke.color {
            Color::Rgb(r, g, b) => {
                self.current.set_stroke_rgb(channel(r), channel(g), channel(b));
            }
            Color::Cmyk(c, m, y, k) => {
                self.current.set_stroke_cmyk(c, m, y, k);
            }
        }
    }

    fn assemble(&self) -> Vec<u8> {
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let mut pdf = Pdf::new();
        let catalog_id = alloc();
        let page_tree_id = alloc();

        let fonts: Vec<(String, Ref)> = StandardFont::ALL
            .into_iter()
            .filter(|&font| self.fonts_used[font as usize])
            .map(|font| {
                let id = alloc();
                let mut writer = pdf.type1_font(id);
                writer.base_font(Name(font.postscript_name().as_bytes()));
                writer.pair(Name(b"Encoding"), Name(b"WinAnsiEncoding"));
                (Self::font_name(font), id)
            })
            .collect();

        let page_ids: Vec<(Ref, Ref)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|&(page_id, _)| page_id))
            .count(page_ids.len() as i32);

        let media_box = PdfRect::new(0.0, 0.0, self.page_size.x as f32, self.page_size.y as f32);
        for (&(page_id, content_id), content) in page_ids.iter().zip(&self.pages) {
            let mut page = pdf.page(page_id);
            page.media_box(media_box)
                .parent(page_tree_id)
                .contents(content_id);
            {
                let mut resources = page.resources();
                let mut font_dict = resources.fonts();
                for (name, id) in &fonts {
                    font_dict.pair(Name(name.as_bytes()), *id);
                }
            }
            page.finish();
            pdf.stream(content_id, content);
        }

        pdf.finish()
    }
}

impl TextMeasure for PdfSurface {
    fn measure_text(&self, text: &str, font: StandardFont, size: f64) -> f64 {
        font.text_width(text, size)
    }
}

impl DrawingSurface for PdfSurface {
    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        if let Some(color) = fill {
            self.set_fill(color);
        }
        if let Some(stroke) = stroke {
            self.set_stroke(stroke);
        }
        self.current.rect(
            rect.x() as f32,
            rect.y() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        match (fill, stroke) {
            (Some(_), Some(_)) => self.current.fill_nonzero_and_stroke(),
            (Some(_), None) => self.current.fill_nonzero(),
            _ => self.current.stroke(),
        };
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
        self.fonts_used[font as usize] = true;
        let x = align.start_x(pos.x, font.text_width(text, size));
        let encoded = to_win_ansi(text);
        let name = Self::font_name(font);
        self.set_fill(color);
        self.current
            .begin_text()
            .set_font(Name(name.as_bytes()), size as f32)
            .next_line(x as f32, pos.y as f32)
            .show(Str(&encoded))
            .end_text();
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.set_stroke(Stroke { color, width });
        self.current
            .move_to(from.x as f32, from.y as f32)
            .line_to(to.x as f32, to.y as f32)
            .stroke();
    }

    fn new_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Content::new());
        self.pages.push(finished.finish());
    }

    fn finalize(&mut self) -> Result<(), RenderError> {
        if self.output.is_some() {
            return Err(RenderError::AlreadyFinalized);
        }
        self.new_page();
        let bytes = self.assemble();
        log::info!(pages = self.pages.len(), bytes = bytes.len(), "assembled document");
        let written = match &self.target {
            Some(path) => std::fs::write(path, &bytes).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            }),
            None => Ok(()),
        };
        self.output = Some(bytes);
        written?;
        #[cfg(feature = "tracing")]
        if let Some(path) = &self.target {
            log::info!(path = %path.display(), "wrote document");
        }
        Ok(())
    }
}

fn channel(v: u8) -> f32 {
    f32::from(v) / 255.0
}

/// Encode text for a WinAnsi font. Characters the encoding lacks become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            'Š' => 0x8A,
            'š' => 0x9A,
            'Ž' => 0x8E,
            'ž' => 0x9E,
            'Œ' => 0x8C,
            'œ' => 0x9C,
            _ => b'?',
        })
        .collect()
}
