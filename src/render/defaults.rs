//! Default sizes and settings (all in points, taken from the museum templates)

/// A4 in points (210 x 297 mm).
pub const A4_WIDTH: f64 = 210.0 * 72.0 / 25.4;
pub const A4_HEIGHT: f64 = 297.0 * 72.0 / 25.4;

// Etiquette sheet
pub const ETIQUETTE_ROWS: u32 = 17;
pub const ETIQUETTE_COLS: u32 = 6;
pub const ETIQUETTE_MARGIN: f64 = 20.0;
/// Inner white box measured from the template PDFs.
pub const INNER_WIDTH: f64 = 80.787;
pub const INNER_HEIGHT: f64 = 34.016;
pub const PADDING_X: f64 = 6.0;
pub const PADDING_Y: f64 = 6.0;
pub const NAME_FONT_SIZE: f64 = 12.0;
pub const NAME_FONT_MIN_SIZE: f64 = 4.0;
pub const AUTHOR_FONT_SIZE: f64 = 6.0;
/// Border of the inner box for the override region.
pub const OVERRIDE_STROKE_WIDTH: f64 = 3.0;
pub const UNDERLINE_OFFSET: f64 = 2.0;
pub const UNDERLINE_WIDTH: f64 = 0.5;
/// Fraction of the available width text may use before it is shrunk.
pub const FIT_SAFETY: f64 = 0.95;
/// Baseline drop below the inner box center, as a fraction of font size.
pub const BASELINE_DROP: f64 = 0.3;
/// Extra drop of the author line below the bottom padding.
pub const AUTHOR_DROP: f64 = 1.5;
pub const OVERRIDE_REGION: &str = "PA";

// Unit tray sheet
pub const TRAY_ROWS: u32 = 8;
pub const TRAY_COLS: u32 = 2;
pub const TRAY_LABEL_WIDTH: f64 = 261.0;
pub const TRAY_LABEL_HEIGHT: f64 = 92.0;
pub const TRAY_LEFT_MARGIN: f64 = 41.0;
pub const TRAY_TOP_MARGIN: f64 = 50.0;
pub const TRAY_TEXT_PADDING_X: f64 = 12.0;
pub const TRAY_BAR_WIDTH: f64 = 5.0;
pub const TRAY_BAR_ORDER: [&str; 5] = ["PA", "AS", "NW", "AF", "O"];
pub const TRAY_BORDER_WIDTH: f64 = 1.0;
pub const TRAY_VERTICAL_SPACING: f64 = 4.0;
pub const TRAY_GENUS_SIZE: (f64, f64) = (16.0, 10.0);
pub const TRAY_EPITHET_SIZE: (f64, f64) = (12.0, 8.0);
pub const TRAY_AUTHOR_SIZE: (f64, f64) = (9.0, 6.0);
/// Line gap never exceeds half the label height minus this.
pub const TRAY_GAP_HEADROOM: f64 = 6.0;
pub const TRAY_MIN_GAP: f64 = 4.0;
pub const TRAY_MIN_TEXT_WIDTH: f64 = 1.0;

/// Slack allowed when comparing derived cell sizes against fixed boxes.
pub const GEOMETRY_EPSILON: f64 = 1e-6;
