//! Small value types shared by the layout engine: validated numbers,
//! colors and axis-aligned rectangles.
//!
//! All lengths are PostScript points (1/72 inch) in a page space whose
//! origin is the bottom-left corner with y increasing upwards.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Accept any finite value, including zero and negatives.
#[inline]
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Accept finite values `>= 0`.
#[inline]
pub fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Accept finite values `> 0`.
#[inline]
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_non_negative(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else {
        Ok(val)
    }
}

/// Axis-aligned rectangle given by its bottom-left corner and size.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect {
            origin: dvec2(x, y),
            size: dvec2(w, h),
        }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// Right edge
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    /// Top edge
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    pub fn center(&self) -> DVec2 {
        self.origin + self.size / 2.0
    }

    /// A rectangle of `size` centered inside this one.
    ///
    /// The result may overhang when `size` is larger than `self`; callers
    /// validate sizes up front.
    pub fn centered(&self, size: DVec2) -> Rect {
        Rect {
            origin: self.origin + (self.size - size) / 2.0,
            size,
        }
    }
}

/// Fill or stroke color.
///
/// CMYK channels are stored on the 0..1 scale the PDF operators use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Cmyk(f32, f32, f32, f32),
}

impl Color {
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);

    /// CMYK from the 0..100 percentages used by print templates.
    pub fn cmyk_percent(c: f32, m: f32, y: f32, k: f32) -> Color {
        Color::Cmyk(c / 100.0, m / 100.0, y / 100.0, k / 100.0)
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Cmyk(c, m, y, k) => write!(
                f,
                "cmyk({},{},{},{})",
                c * 100.0,
                m * 100.0,
                y * 100.0,
                k * 100.0
            ),
        }
    }
}

/// Error returned when a color string cannot be understood.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized color `{}`", self.0)
    }
}

impl std::error::Error for ParseColorError {}

/// Parse the comma-separated arguments of `name(a,b,...)`.
fn functional_args<'a>(s: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = s.strip_prefix(name)?.trim_start();
    let inner = inner.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let err = || ParseColorError(trimmed.to_string());

        match lower.as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            _ => {}
        }

        if lower.starts_with('#') {
            return Color::from_hex(&lower).ok_or_else(err);
        }

        if let Some(args) = functional_args(&lower, "rgb") {
            let [r, g, b] = args.as_slice() else {
                return Err(err());
            };
            let parse = |v: &str| v.parse::<u8>().map_err(|_| err());
            return Ok(Color::Rgb(parse(*r)?, parse(*g)?, parse(*b)?));
        }

        if let Some(args) = functional_args(&lower, "cmyk") {
            let [c, m, y, k] = args.as_slice() else {
                return Err(err());
            };
            let parse = |v: &str| match v.parse::<f32>() {
                Ok(p) if (0.0..=100.0).contains(&p) => Ok(p),
                _ => Err(err()),
            };
            return Ok(Color::cmyk_percent(
                parse(*c)?,
                parse(*m)?,
                parse(*y)?,
                parse(*k)?,
            ));
        }

        Err(err())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
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
    fn check_positive_rejects_bad_values() {
        assert_eq!(check_positive(0.0), Err(NumericError::Zero));
        assert_eq!(check_positive(-1.0), Err(NumericError::Negative));
        assert_eq!(check_positive(f64::NAN), Err(NumericError::NaN));
        assert_eq!(check_positive(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(check_positive(2.5), Ok(2.5));
    }

    #[test]
    fn check_non_negative_accepts_zero() {
        assert_eq!(check_non_negative(0.0), Ok(0.0));
        assert_eq!(check_non_negative(-0.5), Err(NumericError::Negative));
    }

    #[test]
    fn rect_centered_splits_slack_evenly() {
        let cell = Rect::new(10.0, 20.0, 100.0, 50.0);
        let inner = cell.centered(dvec2(80.0, 30.0));
        assert_eq!(inner.x(), 20.0);
        assert_eq!(inner.y(), 30.0);
        assert_eq!(inner.max_x(), 100.0);
        assert_eq!(inner.center(), cell.center());
    }

    #[test]
    fn color_parses_names_hex_and_functions() {
        assert_eq!("white".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("Black".parse::<Color>(), Ok(Color::BLACK));
        assert_eq!("#215394".parse::<Color>(), Ok(Color::Rgb(33, 83, 148)));
        assert_eq!("rgb(1, 2, 3)".parse::<Color>(), Ok(Color::Rgb(1, 2, 3)));
        assert_eq!(
            "cmyk(0,100,100,0)".parse::<Color>(),
            Ok(Color::Cmyk(0.0, 1.0, 1.0, 0.0))
        );
    }

    #[test]
    fn color_rejects_garbage() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("cmyk(0,200,0,0)".parse::<Color>().is_err());
        assert!("rgb(1,2)".parse::<Color>().is_err());
        assert!("chartreuse".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_round_trips_hex() {
        assert_eq!(Color::Rgb(33, 83, 148).to_string(), "#215394");
    }
}
