//! Color input and its conversion to bridge hue/saturation.

use std::str::FromStr;

use palette::{FromColor, Hsv, Srgb, encoding};

use super::HueSaturation;
use crate::errors::Error;

/// A color as supplied by a caller.
///
/// Names are looked up in the CSS/web color table. RGB components are taken
/// as normalized `0.0..=1.0` values and are not rescaled, so `(255, 0, 0)` is
/// not treated as 8-bit red.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Named(String),
    Rgb { red: f64, green: f64, blue: f64 },
}

impl Color {
    pub fn named(name: &str) -> Self {
        Color::Named(name.to_string())
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Color::Rgb { red, green, blue }
    }

    /// Convert to the hue and saturation the bridge expects. Brightness is
    /// controlled separately, so the HSV value channel is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Color;
    ///
    /// let red = Color::named("red").resolve().unwrap();
    /// assert_eq!((red.hue(), red.saturation()), (0, 255));
    ///
    /// let green = Color::named("green").resolve().unwrap();
    /// assert_eq!((green.hue(), green.saturation()), (21845, 255));
    ///
    /// assert!(Color::named("not-a-color").resolve().is_err());
    /// ```
    pub fn resolve(&self) -> Result<HueSaturation, Error> {
        let rgb = match self {
            Color::Named(name) => palette::named::from_str(&name.trim().to_lowercase())
                .ok_or_else(|| Error::UnknownColorName(name.clone()))?
                .into_format::<f64>(),
            Color::Rgb { red, green, blue } => Srgb::new(*red, *green, *blue),
        };

        let hsv: Hsv<encoding::Srgb, f64> = Hsv::from_color(rgb);
        Ok(HueSaturation::from_fractions(
            hsv.hue.into_positive_degrees() / 360.0,
            hsv.saturation,
        ))
    }
}

/// Resolve any supported color input to bridge hue/saturation.
pub fn resolve_color(input: impl Into<Color>) -> Result<HueSaturation, Error> {
    input.into().resolve()
}

impl FromStr for Color {
    type Err = Error;

    /// Parse either a color name or a comma-separated normalized triple (e.g., "1,0.5,0").
    fn from_str(s: &str) -> Result<Self, Error> {
        if !s.contains(',') {
            return Ok(Color::named(s));
        }
        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::UnknownColorName(s.to_string()))?;
        match parts.as_slice() {
            [red, green, blue] => Ok(Color::rgb(*red, *green, *blue)),
            _ => Err(Error::UnknownColorName(s.to_string())),
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::named(name)
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::Named(name)
    }
}

impl From<(f64, f64, f64)> for Color {
    fn from((red, green, blue): (f64, f64, f64)) -> Self {
        Color::rgb(red, green, blue)
    }
}
