//! Advance widths for the standard PDF Type 1 faces.
//!
//! The output document references these fonts without embedding them, so
//! text is measured from the Adobe AFM widths (1/1000 em units) rather than
//! from font files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ConfigError;

/// Helvetica and Helvetica-Oblique widths for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191,
    333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 278, 278, 584, 584, 584, 556,
   1015, 667, 667, 722, 722, 667, 611, 778,
    722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556,
    556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722,
    500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold and Helvetica-BoldOblique widths for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238,
    333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778,
    722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611,
    611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778,
    556, 556, 500, 389, 280, 389, 584,
];

/// Every Courier glyph has the same advance.
const COURIER_WIDTH: u16 = 600;

/// Width used for characters outside the tables.
const FALLBACK_WIDTH: u16 = 556;

/// One of the standard PDF fonts the layout engine can measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    pub const ALL: [StandardFont; 8] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
    ];

    /// PostScript name, as written into the PDF `BaseFont` entry.
    pub fn postscript_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// The bold face of the same family and slant.
    pub fn bold(self) -> StandardFont {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaBold => StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique | StandardFont::HelveticaBoldOblique => {
                StandardFont::HelveticaBoldOblique
            }
            StandardFont::Courier | StandardFont::CourierBold => StandardFont::CourierBold,
            StandardFont::CourierOblique | StandardFont::CourierBoldOblique => {
                StandardFont::CourierBoldOblique
            }
        }
    }

    /// The slanted face of the same family and weight.
    pub fn oblique(self) -> StandardFont {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => StandardFont::HelveticaOblique,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                StandardFont::HelveticaBoldOblique
            }
            StandardFont::Courier | StandardFont::CourierOblique => StandardFont::CourierOblique,
            StandardFont::CourierBold | StandardFont::CourierBoldOblique => {
                StandardFont::CourierBoldOblique
            }
        }
    }

    /// Apply bold and slant on top of this face.
    pub fn styled(self, bold: bool, italic: bool) -> StandardFont {
        let font = if bold { self.bold() } else { self };
        if italic { font.oblique() } else { font }
    }

    /// Advance width of one character in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => &HELVETICA,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => &HELVETICA_BOLD,
            _ => return COURIER_WIDTH,
        };
        let c = latin1_base_letter(c).unwrap_or(c);
        if (' '..='~').contains(&c) {
            table[(c as usize) - 0x20]
        } else {
            FALLBACK_WIDTH
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        f64::from(units) * size / 1000.0
    }
}

/// Accented Latin-1 letters share the advance of their base letter in the
/// Helvetica AFMs, which covers the umlauts and accents seen in author names.
fn latin1_base_letter(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

impl FromStr for StandardFont {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StandardFont::ALL
            .into_iter()
            .find(|font| font.postscript_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownFont {
                name: wanted.to_string(),
            })
    }
}

impl Serialize for StandardFont {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.postscript_name())
    }
}

impl<'de> Deserialize<'de> for StandardFont {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_digits_are_half_em() {
        let width = StandardFont::Helvetica.text_width("1758", 10.0);
        assert!((width - 22.24).abs() < 1e-9, "got {width}");
    }

    #[test]
    fn bold_is_wider_for_lowercase() {
        let regular = StandardFont::Helvetica.text_width("sapiens", 12.0);
        let bold = StandardFont::HelveticaBold.text_width("sapiens", 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let at_12 = StandardFont::HelveticaBold.text_width("subspecies", 12.0);
        let at_6 = StandardFont::HelveticaBold.text_width("subspecies", 6.0);
        assert!((at_12 - 2.0 * at_6).abs() < 1e-9);
    }

    #[test]
    fn umlauts_measure_like_base_letters() {
        assert_eq!(
            StandardFont::Helvetica.text_width("Müller", 10.0),
            StandardFont::Helvetica.text_width("Muller", 10.0)
        );
    }

    #[test]
    fn courier_is_monospaced() {
        assert_eq!(StandardFont::Courier.text_width("iW", 10.0), 12.0);
    }

    #[test]
    fn bold_face_keeps_slant() {
        assert_eq!(StandardFont::Helvetica.bold(), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::HelveticaOblique.bold(), StandardFont::HelveticaBoldOblique);
        assert_eq!(StandardFont::HelveticaBold.bold(), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::Courier.styled(true, true), StandardFont::CourierBoldOblique);
        assert_eq!(StandardFont::Helvetica.styled(false, false), StandardFont::Helvetica);
    }

    #[test]
    fn parses_postscript_names_case_insensitively() {
        assert_eq!("helvetica-bold".parse::<StandardFont>().unwrap(), StandardFont::HelveticaBold);
        assert!(matches!(
            "Times-Roman".parse::<StandardFont>(),
            Err(ConfigError::UnknownFont { .. })
        ));
    }
}
