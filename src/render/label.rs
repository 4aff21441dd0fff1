//! Drawing of a single label into its grid cell.
//!
//! Each label kind is its own type that knows how to draw itself; [`Label`]
//! wraps them for uniform storage in a render pass.

use enum_dispatch::enum_dispatch;
use glam::dvec2;

use super::defaults;
use super::fit::{fit_font, fit_text};
use super::grid::PlacedLabel;
use super::surface::{Align, DrawingSurface, Stroke};
use crate::config::{EtiquetteConfig, LabelConfig, TrayConfig};
use crate::content::{ContentSpec, TraySpec};
use crate::types::{Color, Rect};

/// Common behavior for all label kinds
#[enum_dispatch]
pub trait DrawLabel {
    /// Draw into the cell described by `placed`.
    fn draw(&self, surface: &mut dyn DrawingSurface, placed: &PlacedLabel, config: &LabelConfig);
}

/// A label of any kind
#[enum_dispatch(DrawLabel)]
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Etiquette(EtiquetteLabel),
    Tray(TrayLabel),
}

// ============================================================================
// Etiquette
// ============================================================================

/// A region-colored collection label: colored field, white inner box, one
/// name line and an optional author line.
#[derive(Debug, Clone, PartialEq)]
pub struct EtiquetteLabel {
    pub content: ContentSpec,
}

impl EtiquetteLabel {
    pub fn new(content: ContentSpec) -> Self {
        Self { content }
    }

    /// Inner box of the label within its cell.
    pub fn inner_box(cell: Rect, config: &EtiquetteConfig) -> Rect {
        cell.centered(config.grid.inner_box.to_vec())
    }
}

impl DrawLabel for EtiquetteLabel {
    fn draw(&self, surface: &mut dyn DrawingSurface, placed: &PlacedLabel, config: &LabelConfig) {
        let cfg = &config.etiquette;
        let spec = &self.content;
        let cell = placed.cell_rect();

        let is_override = cfg.is_override(&spec.region_code);
        let field = if is_override {
            cfg.region_colors.default
        } else {
            cfg.region_colors.resolve(&spec.region_code)
        };
        surface.draw_rect(cell, Some(field), None);

        let inner = Self::inner_box(cell, cfg);
        let border = is_override.then_some(Stroke {
            color: Color::BLACK,
            width: cfg.override_stroke_width,
        });
        surface.draw_rect(inner, Some(Color::WHITE), border);

        if !spec.text.is_empty() {
            let font = cfg
                .name_font
                .family
                .styled(spec.emphasis.bold, spec.emphasis.italic);
            let max_width = (inner.width() - 2.0 * cfg.padding.x) * cfg.fit_safety;
            let size = fit_text(
                &*surface,
                &spec.text,
                font,
                cfg.name_font.base_size,
                max_width,
                cfg.name_font.min_size,
            );
            let baseline = dvec2(
                inner.x() + cfg.padding.x,
                inner.y() + inner.height() / 2.0 - size * defaults::BASELINE_DROP,
            );
            surface.draw_text(baseline, &spec.text, font, size, Color::BLACK, Align::Left);

            if spec.emphasis.underline {
                let width = surface.measure_text(&spec.text, font, size);
                let y = baseline.y - cfg.underline_offset;
                surface.draw_line(
                    dvec2(baseline.x, y),
                    dvec2(baseline.x + width, y),
                    cfg.underline_width,
                    Color::BLACK,
                );
            }
        }

        if !spec.secondary_text.is_empty() {
            let anchor = dvec2(
                inner.max_x() - cfg.padding.x,
                inner.y() + cfg.padding.y - defaults::AUTHOR_DROP,
            );
            surface.draw_text(
                anchor,
                &spec.secondary_text,
                cfg.author_font.family,
                cfg.author_font.base_size,
                Color::BLACK,
                Align::Right,
            );
        }
    }
}

// ============================================================================
// Unit tray
// ============================================================================

/// A unit-tray label: three centered lines and a strip of region bars.
#[derive(Debug, Clone, PartialEq)]
pub struct TrayLabel {
    pub content: TraySpec,
}

impl TrayLabel {
    pub fn new(content: TraySpec) -> Self {
        Self { content }
    }
}

/// Distance between the baselines of neighboring lines.
///
/// `sizes` are the effective sizes of the visible lines (zero for empty
/// ones). The gap follows the largest of them plus spacing on both sides but
/// never pushes the outer lines past the label edges.
pub fn tray_line_gap(sizes: &[f64], config: &TrayConfig, label_height: f64) -> f64 {
    let max_visible = sizes
        .iter()
        .copied()
        .filter(|&s| s > 0.0)
        .reduce(f64::max)
        .unwrap_or(config.epithet_font.base_size);
    let desired = max_visible + 2.0 * config.vertical_spacing;
    let max_gap = (label_height / 2.0 - defaults::TRAY_GAP_HEADROOM).max(defaults::TRAY_MIN_GAP);
    desired.min(max_gap)
}

impl DrawLabel for TrayLabel {
    fn draw(&self, surface: &mut dyn DrawingSurface, placed: &PlacedLabel, config: &LabelConfig) {
        let cfg = &config.tray;
        let spec = &self.content;
        let label = placed.cell_rect().centered(cfg.grid.inner_box.to_vec());

        surface.draw_rect(label, Some(Color::WHITE), None);

        let bars_x = label.max_x() - cfg.bar_area_width();
        for (i, code) in cfg.bar_order.iter().enumerate() {
            let color = if *code == spec.region {
                cfg.region_colors.resolve(code)
            } else {
                Color::WHITE
            };
            let bar = Rect::new(
                bars_x + i as f64 * cfg.bar_width,
                label.y(),
                cfg.bar_width,
                label.height(),
            );
            surface.draw_rect(bar, Some(color), None);
        }

        surface.draw_rect(
            label,
            None,
            Some(Stroke {
                color: Color::BLACK,
                width: cfg.border_width,
            }),
        );

        let left = label.x() + cfg.text_padding_x;
        let right = bars_x - cfg.text_padding_x;
        let text_width = (right - left).max(defaults::TRAY_MIN_TEXT_WIDTH);
        let center_x = left + text_width / 2.0;
        let center_y = label.center().y;

        let lines = [
            (&spec.genus, &cfg.genus_font),
            (&spec.epithet, &cfg.epithet_font),
            (&spec.author, &cfg.author_font),
        ];
        let sizes = lines.map(|(text, font)| {
            if text.is_empty() {
                0.0
            } else {
                fit_font(&*surface, text, font, text_width)
            }
        });
        let gap = tray_line_gap(&sizes, cfg, label.height());

        // Genus on top, epithet through the middle, author below.
        for (i, ((text, font), size)) in lines.into_iter().zip(sizes).enumerate() {
            if text.is_empty() {
                continue;
            }
            let y = center_y + gap * (1.0 - i as f64);
            surface.draw_text(
                dvec2(center_x, y),
                text,
                font.family,
                size,
                Color::BLACK,
                Align::Center,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::grid::GridLayout;
    use crate::render::metrics::StandardFont;
    use crate::render::surface::{DrawOp, RecordingSurface};
    use crate::content::Emphasis;

    fn content(text: &str, underline: bool, secondary: &str, region: &str) -> ContentSpec {
        ContentSpec {
            text: text.into(),
            emphasis: Emphasis::bold(underline),
            secondary_text: secondary.into(),
            region_code: region.into(),
        }
    }

    fn draw(label: Label, config: &LabelConfig) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        let placed = GridLayout::new(config.grid()).place(0);
        label.draw(&mut surface, &placed, config);
        surface
    }

    #[test]
    fn etiquette_colors_field_and_leaves_inner_box_white() {
        let config = LabelConfig::etiquette();
        let label = Label::from(EtiquetteLabel::new(content("sapiens", true, "L.", "AF")));
        let surface = draw(label, &config);
        let rects: Vec<_> = surface.rects().collect();
        assert_eq!(rects.len(), 2);
        let DrawOp::Rect { fill, stroke, .. } = rects[0] else { unreachable!() };
        assert_eq!(*fill, Some(Color::cmyk_percent(0.0, 100.0, 100.0, 0.0)));
        assert_eq!(*stroke, None);
        let DrawOp::Rect { rect, fill, stroke, .. } = rects[1] else { unreachable!() };
        assert_eq!(*fill, Some(Color::WHITE));
        assert_eq!(*stroke, None);
        assert!((rect.width() - defaults::INNER_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn override_region_gets_bordered_box() {
        let config = LabelConfig::etiquette();
        let surface = draw(EtiquetteLabel::new(content("sapiens", true, "", "PA")).into(), &config);
        let rects: Vec<_> = surface.rects().collect();
        let DrawOp::Rect { fill, .. } = rects[0] else { unreachable!() };
        assert_eq!(*fill, Some(Color::WHITE));
        let DrawOp::Rect { stroke, .. } = rects[1] else { unreachable!() };
        assert_eq!(
            *stroke,
            Some(Stroke {
                color: Color::BLACK,
                width: 3.0
            })
        );
    }

    #[test]
    fn underline_spans_the_drawn_text() {
        let config = LabelConfig::etiquette();
        let surface = draw(EtiquetteLabel::new(content("sapiens", true, "", "O")).into(), &config);
        let Some(DrawOp::Text { pos, size, font, .. }) = surface.texts().next() else {
            panic!("no text drawn");
        };
        assert_eq!(*font, StandardFont::HelveticaBold);
        assert_eq!(*size, 12.0);
        let Some(DrawOp::Line { from, to, width, .. }) = surface.lines().next() else {
            panic!("no underline drawn");
        };
        assert_eq!(from.x, pos.x);
        assert!((to.x - from.x - font.text_width("sapiens", 12.0)).abs() < 1e-9);
        assert!((pos.y - from.y - 2.0).abs() < 1e-9);
        assert_eq!(*width, 0.5);
    }

    #[test]
    fn author_is_right_aligned_at_padding() {
        let config = LabelConfig::etiquette();
        let cell = GridLayout::new(config.grid()).place(0).cell_rect();
        let inner = EtiquetteLabel::inner_box(cell, &config.etiquette);
        let surface = draw(EtiquetteLabel::new(content("x", false, "L., 1758", "AS")).into(), &config);
        let texts: Vec<_> = surface.texts().collect();
        let DrawOp::Text { pos, text, align, size, .. } = texts[1] else { unreachable!() };
        assert_eq!(text, "L., 1758");
        assert_eq!(*align, Align::Right);
        assert_eq!(*size, 6.0);
        assert!((pos.x - (inner.max_x() - 6.0)).abs() < 1e-9);
        assert!((pos.y - (inner.y() + 4.5)).abs() < 1e-9);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn empty_text_draws_only_boxes() {
        let config = LabelConfig::etiquette();
        let surface = draw(EtiquetteLabel::new(content("", false, "", "XX")).into(), &config);
        assert_eq!(surface.texts().count(), 0);
        assert_eq!(surface.lines().count(), 0);
        assert_eq!(surface.rects().count(), 2);
    }

    #[test]
    fn long_names_shrink_inside_padding() {
        let config = LabelConfig::etiquette();
        let text = "quadrimaculatoides";
        let surface = draw(EtiquetteLabel::new(content(text, false, "", "AF")).into(), &config);
        let Some(DrawOp::Text { size, font, .. }) = surface.texts().next() else {
            panic!("no text drawn");
        };
        assert!(*size < 12.0 && *size >= 4.0);
        let available = (defaults::INNER_WIDTH - 12.0) * 0.95;
        assert!(font.text_width(text, *size) <= available + 1e-9);
    }

    fn tray(genus: &str, epithet: &str, author: &str, region: &str) -> Label {
        TrayLabel::new(TraySpec {
            genus: genus.into(),
            epithet: epithet.into(),
            author: author.into(),
            region: region.into(),
        })
        .into()
    }

    #[test]
    fn tray_colors_only_the_matching_bar() {
        let config = LabelConfig::tray();
        let surface = draw(tray("Cassida", "viridis", "L., 1758", "AS"), &config);
        let fills: Vec<_> = surface
            .rects()
            .filter_map(|op| match op {
                DrawOp::Rect { fill: Some(fill), rect, .. } if rect.width() == 5.0 => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            [
                Color::WHITE,
                Color::Rgb(0x1B, 0x8A, 0x3F),
                Color::WHITE,
                Color::WHITE,
                Color::WHITE
            ]
        );
    }

    #[test]
    fn tray_lines_are_centered_and_stacked() {
        let config = LabelConfig::tray();
        let surface = draw(tray("Cassida", "viridis", "L., 1758", "PA"), &config);
        let texts: Vec<_> = surface
            .texts()
            .map(|op| match op {
                DrawOp::Text { pos, text, size, align, .. } => (*pos, text.as_str(), *size, *align),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert!(texts.iter().all(|t| t.3 == Align::Center));
        assert_eq!(texts[0].1, "Cassida");
        assert_eq!(texts[0].2, 16.0);
        // gap = min(16 + 8, 92 / 2 - 6) = 24
        assert!((texts[0].0.y - texts[1].0.y - 24.0).abs() < 1e-9);
        assert!((texts[1].0.y - texts[2].0.y - 24.0).abs() < 1e-9);
        assert_eq!(texts[0].0.x, texts[2].0.x);
    }

    #[test]
    fn tray_gap_is_capped_by_label_height() {
        let config = TrayConfig::default();
        assert_eq!(tray_line_gap(&[16.0, 12.0, 9.0], &config, 92.0), 24.0);
        assert_eq!(tray_line_gap(&[16.0, 12.0, 9.0], &config, 40.0), 14.0);
        assert_eq!(tray_line_gap(&[16.0, 12.0, 9.0], &config, 10.0), 4.0);
        assert_eq!(tray_line_gap(&[0.0, 0.0, 0.0], &config, 92.0), 20.0);
    }

    #[test]
    fn tray_skips_empty_lines() {
        let config = LabelConfig::tray();
        let surface = draw(tray("Cassida", "", "", "O"), &config);
        assert_eq!(surface.texts().count(), 1);
    }
}
