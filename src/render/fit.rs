//! Shrink-to-fit for single-line text.

use crate::config::FontSpec;
use crate::render::metrics::StandardFont;

/// Anything that can report the rendered width of a string.
pub trait TextMeasure {
    /// Width of `text` in points when set in `font` at `size`.
    fn measure_text(&self, text: &str, font: StandardFont, size: f64) -> f64;
}

impl TextMeasure for StandardFont {
    /// Measures with the receiver's own metrics regardless of `font`.
    fn measure_text(&self, text: &str, _font: StandardFont, size: f64) -> f64 {
        self.text_width(text, size)
    }
}

/// Font size at which `text` fits into `max_width`.
///
/// Text that already fits keeps `base_size`; text is never grown. Otherwise
/// the size is scaled once by `max_width / measured` (advance widths are
/// linear in size for a fixed face) and clamped to `min_size`. Empty text and
/// degenerate measurements also keep `base_size`.
///
/// Callers leave breathing room by passing a `max_width` already reduced by
/// a safety factor.
pub fn fit_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: StandardFont,
    base_size: f64,
    max_width: f64,
    min_size: f64,
) -> f64 {
    if text.is_empty() {
        return base_size;
    }
    let measured = measure.measure_text(text, font, base_size);
    if measured <= max_width || measured <= 0.0 || !measured.is_finite() {
        return base_size;
    }
    let scale = max_width / measured;
    let size = (base_size * scale).max(min_size);
    crate::log::debug!(text, base_size, size, "shrinking text to fit");
    size
}

/// [`fit_text`] with the face and size range of a [`FontSpec`].
pub fn fit_font<M: TextMeasure + ?Sized>(measure: &M, text: &str, font: &FontSpec, max_width: f64) -> f64 {
    fit_text(measure, text, font.family, font.base_size, max_width, font.min_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports `width_at_base` at `base` and scales linearly with size.
    struct Linear {
        width_at_base: f64,
        base: f64,
    }

    impl TextMeasure for Linear {
        fn measure_text(&self, text: &str, _font: StandardFont, size: f64) -> f64 {
            if text.is_empty() {
                0.0
            } else {
                self.width_at_base * size / self.base
            }
        }
    }

    struct Zero;

    impl TextMeasure for Zero {
        fn measure_text(&self, _text: &str, _font: StandardFont, _size: f64) -> f64 {
            0.0
        }
    }

    const FONT: StandardFont = StandardFont::HelveticaBold;

    #[test]
    fn proportional_shrink_above_floor() {
        let m = Linear {
            width_at_base: 400.0,
            base: 12.0,
        };
        assert_eq!(fit_text(&m, "x", FONT, 12.0, 300.0, 4.0), 9.0);
    }

    #[test]
    fn fitting_text_keeps_base_size() {
        let m = Linear {
            width_at_base: 300.0,
            base: 12.0,
        };
        assert_eq!(fit_text(&m, "x", FONT, 12.0, 300.0, 4.0), 12.0);
        assert_eq!(fit_text(&m, "x", FONT, 12.0, 1000.0, 4.0), 12.0);
    }

    #[test]
    fn never_below_floor() {
        let m = Linear {
            width_at_base: 4000.0,
            base: 12.0,
        };
        assert_eq!(fit_text(&m, "x", FONT, 12.0, 30.0, 4.0), 4.0);
    }

    #[test]
    fn empty_and_degenerate_text_keep_base_size() {
        let m = Linear {
            width_at_base: 400.0,
            base: 12.0,
        };
        assert_eq!(fit_text(&m, "", FONT, 12.0, 1.0, 4.0), 12.0);
        assert_eq!(fit_text(&Zero, "x", FONT, 12.0, -5.0, 4.0), 12.0);
    }

    #[test]
    fn fitting_is_idempotent() {
        let max_width = (80.787 - 12.0) * 0.95;
        for text in ["sapiens", "subspecies", "quadrimaculatoides", "Cassida viridis var. alba"] {
            let first = fit_text(&FONT, text, FONT, 12.0, max_width, 4.0);
            let second = fit_text(&FONT, text, FONT, first, max_width, 4.0);
            assert!((first - second).abs() < 1e-9, "{text}: {first} then {second}");
        }
    }

    #[test]
    fn real_metrics_fit_inside_max_width() {
        let max_width = (80.787 - 12.0) * 0.95;
        let size = fit_text(&FONT, "quadrimaculatoides", FONT, 12.0, max_width, 4.0);
        assert!(size < 12.0);
        assert!(FONT.text_width("quadrimaculatoides", size) <= max_width + 1e-9);
    }
}
