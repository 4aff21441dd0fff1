//! Layout configuration.
//!
//! A [`LabelConfig`] is built once (from defaults or a JSON file), validated,
//! and then handed by reference to every component. Nothing in the engine
//! reads configuration from anywhere else.
//!
//! Every field is optional in JSON; omitted fields keep the values of the
//! original museum templates:
//!
//! ```json
//! {
//!   "variant": "etiquette",
//!   "etiquette": {
//!     "grid": { "rows": 10, "cols": 4 },
//!     "name_font": { "family": "Helvetica", "base_size": 14.0, "min_size": 5.0 },
//!     "region_colors": { "colors": { "AF": "cmyk(0,100,100,0)" } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConfigError;
use crate::render::defaults;
use crate::render::metrics::StandardFont;
use crate::types::{Color, check_non_negative, check_positive};

/// Which label sheet to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Region-colored collection labels with a white inner box.
    #[default]
    Etiquette,
    /// Unit-tray labels: genus, epithet and author with a region bar strip.
    Tray,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn uniform(m: f64) -> Self {
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(defaults::ETIQUETTE_MARGIN)
    }
}

/// Gap between a box edge and the text inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            x: defaults::PADDING_X,
            y: defaults::PADDING_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub fn to_vec(self) -> DVec2 {
        dvec2(self.width, self.height)
    }
}

/// Page grid: the page is divided into `rows` x `cols` equal cells after
/// subtracting the margins, and each cell holds an inner box of fixed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub page_width: f64,
    pub page_height: f64,
    pub margins: Margins,
    pub inner_box: BoxSize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: defaults::ETIQUETTE_ROWS,
            cols: defaults::ETIQUETTE_COLS,
            page_width: defaults::A4_WIDTH,
            page_height: defaults::A4_HEIGHT,
            margins: Margins::default(),
            inner_box: BoxSize {
                width: defaults::INNER_WIDTH,
                height: defaults::INNER_HEIGHT,
            },
        }
    }
}

impl GridConfig {
    pub fn labels_per_page(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn page_size(&self) -> DVec2 {
        dvec2(self.page_width, self.page_height)
    }

    /// Size of one cell: the usable page area divided by the grid.
    pub fn cell_size(&self) -> DVec2 {
        let usable_w = self.page_width - self.margins.left - self.margins.right;
        let usable_h = self.page_height - self.margins.top - self.margins.bottom;
        dvec2(usable_w / self.cols as f64, usable_h / self.rows as f64)
    }

    /// Check the grid, the page, and that the inner box (with `padding` on
    /// each side of its text) fits a cell.
    pub fn validate(&self, padding: Padding) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let positive = |field: &'static str, v: f64| {
            check_positive(v).map_err(|source| ConfigError::InvalidLength { field, source })
        };
        let non_negative = |field: &'static str, v: f64| {
            check_non_negative(v).map_err(|source| ConfigError::InvalidLength { field, source })
        };

        positive("page_width", self.page_width)?;
        positive("page_height", self.page_height)?;
        non_negative("margins.left", self.margins.left)?;
        non_negative("margins.right", self.margins.right)?;
        non_negative("margins.top", self.margins.top)?;
        non_negative("margins.bottom", self.margins.bottom)?;
        positive("inner_box.width", self.inner_box.width)?;
        positive("inner_box.height", self.inner_box.height)?;
        non_negative("padding.x", padding.x)?;
        non_negative("padding.y", padding.y)?;

        let cell = self.cell_size();
        if cell.x <= 0.0 || cell.y <= 0.0 {
            return Err(ConfigError::InvalidMargins {
                page_width: self.page_width,
                page_height: self.page_height,
            });
        }

        let eps = defaults::GEOMETRY_EPSILON;
        let inner = self.inner_box;
        let box_fits = inner.width <= cell.x + eps && inner.height <= cell.y + eps;
        let text_fits = 2.0 * padding.x < inner.width && 2.0 * padding.y < inner.height;
        if !box_fits || !text_fits {
            return Err(ConfigError::InnerBoxTooLarge {
                inner_width: inner.width,
                inner_height: inner.height,
                cell_width: cell.x,
                cell_height: cell.y,
                padding_x: padding.x,
                padding_y: padding.y,
            });
        }

        Ok(())
    }
}

/// Font family and size range for one text role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSpec {
    pub family: StandardFont,
    pub base_size: f64,
    /// Shrink-to-fit never goes below this.
    pub min_size: f64,
}

impl FontSpec {
    pub fn new(family: StandardFont, base_size: f64, min_size: f64) -> Self {
        Self {
            family,
            base_size,
            min_size,
        }
    }

    fn validate(&self, role: &'static str) -> Result<(), ConfigError> {
        check_positive(self.base_size).map_err(|source| ConfigError::InvalidLength {
            field: "font.base_size",
            source,
        })?;
        check_positive(self.min_size).map_err(|source| ConfigError::InvalidLength {
            field: "font.min_size",
            source,
        })?;
        if self.min_size > self.base_size {
            return Err(ConfigError::InvalidFont {
                role,
                base_size: self.base_size,
                min_size: self.min_size,
            });
        }
        Ok(())
    }
}

/// Region code to fill color. Codes are matched exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionColorTable {
    pub colors: BTreeMap<String, Color>,
    /// Color for codes missing from the table.
    pub default: Color,
}

impl Default for RegionColorTable {
    fn default() -> Self {
        Self {
            colors: BTreeMap::new(),
            default: Color::WHITE,
        }
    }
}

impl RegionColorTable {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, Color)>) -> Self {
        Self {
            colors: entries
                .into_iter()
                .map(|(code, color)| (code.to_string(), color))
                .collect(),
            default: Color::WHITE,
        }
    }

    /// Colors of the etiquette templates (CMYK values extracted from the
    /// original PDFs). Europe is white on the outside.
    pub fn etiquette() -> Self {
        Self::new([
            ("PA", Color::WHITE),
            ("AF", Color::cmyk_percent(0.0, 100.0, 100.0, 0.0)),
            ("AS", Color::cmyk_percent(100.0, 0.0, 100.0, 0.0)),
            ("O", Color::Rgb(33, 83, 148)),
            ("NW", Color::cmyk_percent(0.0, 0.0, 100.0, 0.0)),
        ])
    }

    /// Bar colors of the unit-tray template.
    pub fn tray() -> Self {
        Self::new([
            ("AF", Color::Rgb(0xC8, 0x10, 0x2E)),
            ("NW", Color::Rgb(0xFF, 0xCD, 0x00)),
            ("AS", Color::Rgb(0x1B, 0x8A, 0x3F)),
            ("O", Color::Rgb(0x1F, 0x5F, 0xAE)),
            ("PA", Color::BLACK),
        ])
    }

    pub fn get(&self, code: &str) -> Option<Color> {
        self.colors.get(code).copied()
    }

    /// Color for `code`, falling back to the table default.
    pub fn resolve(&self, code: &str) -> Color {
        self.get(code).unwrap_or(self.default)
    }
}

/// Settings of the etiquette sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtiquetteConfig {
    pub grid: GridConfig,
    pub padding: Padding,
    /// Primary text; drawn with the bold face of this family.
    pub name_font: FontSpec,
    pub author_font: FontSpec,
    /// Inner-box border width for the override region.
    pub override_stroke_width: f64,
    /// Gap between text baseline and underline.
    pub underline_offset: f64,
    pub underline_width: f64,
    /// Fraction of the padded inner width text may occupy.
    pub fit_safety: f64,
    pub region_colors: RegionColorTable,
    /// Region whose outer field stays at the default color and whose inner
    /// box gets a border.
    pub override_region: Option<String>,
}

impl Default for EtiquetteConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            padding: Padding::default(),
            name_font: FontSpec::new(
                StandardFont::Helvetica,
                defaults::NAME_FONT_SIZE,
                defaults::NAME_FONT_MIN_SIZE,
            ),
            author_font: FontSpec::new(
                StandardFont::Helvetica,
                defaults::AUTHOR_FONT_SIZE,
                defaults::AUTHOR_FONT_SIZE,
            ),
            override_stroke_width: defaults::OVERRIDE_STROKE_WIDTH,
            underline_offset: defaults::UNDERLINE_OFFSET,
            underline_width: defaults::UNDERLINE_WIDTH,
            fit_safety: defaults::FIT_SAFETY,
            region_colors: RegionColorTable::etiquette(),
            override_region: Some(defaults::OVERRIDE_REGION.to_string()),
        }
    }
}

impl EtiquetteConfig {
    pub fn is_override(&self, region: &str) -> bool {
        self.override_region.as_deref() == Some(region)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate(self.padding)?;
        self.name_font.validate("name_font")?;
        self.author_font.validate("author_font")?;
        for (field, value) in [
            ("override_stroke_width", self.override_stroke_width),
            ("underline_offset", self.underline_offset),
            ("underline_width", self.underline_width),
        ] {
            check_non_negative(value)
                .map_err(|source| ConfigError::InvalidLength { field, source })?;
        }
        check_positive(self.fit_safety).map_err(|source| ConfigError::InvalidLength {
            field: "fit_safety",
            source,
        })?;
        Ok(())
    }
}

/// Settings of the unit-tray sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrayConfig {
    /// The inner box of a tray label is the whole cell.
    pub grid: GridConfig,
    pub text_padding_x: f64,
    pub bar_width: f64,
    /// Region codes of the bar strip, left to right.
    pub bar_order: Vec<String>,
    pub border_width: f64,
    pub vertical_spacing: f64,
    pub genus_font: FontSpec,
    pub epithet_font: FontSpec,
    pub author_font: FontSpec,
    pub region_colors: RegionColorTable,
}

impl Default for TrayConfig {
    fn default() -> Self {
        let rows = defaults::TRAY_ROWS;
        let cols = defaults::TRAY_COLS;
        let label_w = defaults::TRAY_LABEL_WIDTH;
        let label_h = defaults::TRAY_LABEL_HEIGHT;
        // Right and bottom margins absorb whatever the fixed label size leaves.
        let margins = Margins {
            left: defaults::TRAY_LEFT_MARGIN,
            top: defaults::TRAY_TOP_MARGIN,
            right: defaults::A4_WIDTH - defaults::TRAY_LEFT_MARGIN - cols as f64 * label_w,
            bottom: defaults::A4_HEIGHT - defaults::TRAY_TOP_MARGIN - rows as f64 * label_h,
        };
        Self {
            grid: GridConfig {
                rows,
                cols,
                page_width: defaults::A4_WIDTH,
                page_height: defaults::A4_HEIGHT,
                margins,
                inner_box: BoxSize {
                    width: label_w,
                    height: label_h,
                },
            },
            text_padding_x: defaults::TRAY_TEXT_PADDING_X,
            bar_width: defaults::TRAY_BAR_WIDTH,
            bar_order: defaults::TRAY_BAR_ORDER.iter().map(|s| s.to_string()).collect(),
            border_width: defaults::TRAY_BORDER_WIDTH,
            vertical_spacing: defaults::TRAY_VERTICAL_SPACING,
            genus_font: FontSpec::new(
                StandardFont::Helvetica,
                defaults::TRAY_GENUS_SIZE.0,
                defaults::TRAY_GENUS_SIZE.1,
            ),
            epithet_font: FontSpec::new(
                StandardFont::HelveticaOblique,
                defaults::TRAY_EPITHET_SIZE.0,
                defaults::TRAY_EPITHET_SIZE.1,
            ),
            author_font: FontSpec::new(
                StandardFont::Helvetica,
                defaults::TRAY_AUTHOR_SIZE.0,
                defaults::TRAY_AUTHOR_SIZE.1,
            ),
            region_colors: RegionColorTable::tray(),
        }
    }
}

impl TrayConfig {
    /// Total width of the bar strip.
    pub fn bar_area_width(&self) -> f64 {
        self.bar_width * self.bar_order.len() as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate(Padding { x: 0.0, y: 0.0 })?;
        self.genus_font.validate("genus_font")?;
        self.epithet_font.validate("epithet_font")?;
        self.author_font.validate("author_font")?;
        for (field, value) in [
            ("text_padding_x", self.text_padding_x),
            ("bar_width", self.bar_width),
            ("border_width", self.border_width),
            ("vertical_spacing", self.vertical_spacing),
        ] {
            check_non_negative(value)
                .map_err(|source| ConfigError::InvalidLength { field, source })?;
        }
        if self.bar_area_width() > self.grid.inner_box.width {
            return Err(ConfigError::InnerBoxTooLarge {
                inner_width: self.bar_area_width(),
                inner_height: self.grid.inner_box.height,
                cell_width: self.grid.inner_box.width,
                cell_height: self.grid.inner_box.height,
                padding_x: self.text_padding_x,
                padding_y: 0.0,
            });
        }
        Ok(())
    }
}

/// Complete configuration of one generation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub variant: Variant,
    pub etiquette: EtiquetteConfig,
    pub tray: TrayConfig,
}

impl LabelConfig {
    /// Defaults of the etiquette template.
    pub fn etiquette() -> Self {
        Self::default()
    }

    /// Defaults of the unit-tray template.
    pub fn tray() -> Self {
        Self {
            variant: Variant::Tray,
            ..Self::default()
        }
    }

    /// Grid of the selected variant.
    pub fn grid(&self) -> &GridConfig {
        match self.variant {
            Variant::Etiquette => &self.etiquette.grid,
            Variant::Tray => &self.tray.grid,
        }
    }

    /// Validate the selected variant. Geometry that cannot be drawn is
    /// rejected here, never discovered mid-render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.variant {
            Variant::Etiquette => self.etiquette.validate(),
            Variant::Tray => self.tray.validate(),
        }
    }

    /// Parse a JSON override document and validate the result.
    ///
    /// The document is laid over the template defaults key by key, so a
    /// partial object such as `{"name_font": {"base_size": 14}}` keeps the
    /// family and floor of that role.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        let mut merged = serde_json::to_value(Self::default()).map_err(ConfigError::Parse)?;
        overlay(&mut merged, overrides);
        let config: LabelConfig = serde_json::from_value(merged).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Objects merge per key; any other value, `null` included, replaces.
fn overlay(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, value) => *base = value,
    }
}
