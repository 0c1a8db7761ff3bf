//! Brightness input normalization.

use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::Error;

/// Named brightness presets accepted as text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BrightnessLevel {
    Min,
    Med,
    Max,
}

impl BrightnessLevel {
    /// Device value for this preset.
    pub fn value(&self) -> i64 {
        match self {
            BrightnessLevel::Min => 1,
            BrightnessLevel::Med => 127,
            BrightnessLevel::Max => 254,
        }
    }
}

/// A brightness as supplied by a caller, before conversion to the bridge's
/// `0..=254` scale.
///
/// No clamping is performed: integers outside the device range are sent as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Brightness {
    /// Already on the device scale.
    Raw(i64),
    /// A fraction when `<= 1.0`, otherwise a device-scale value.
    Scaled(f64),
    /// One of the named presets.
    Level(BrightnessLevel),
    /// Free text: a number, or `min`/`med`/`max`.
    Text(String),
}

impl Brightness {
    const DEVICE_MAX: f64 = 254.0;

    /// Resolve this input to a device brightness.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Brightness;
    ///
    /// assert_eq!(Brightness::from(100).resolve().unwrap(), 100);
    /// assert_eq!(Brightness::from("max").resolve().unwrap(), 254);
    /// assert_eq!(Brightness::from(1.0).resolve().unwrap(), 254);
    /// assert_eq!(Brightness::from(0.5).resolve().unwrap(), 127);
    /// assert_eq!(Brightness::from("0.5").resolve().unwrap(), 127);
    /// assert!(Brightness::from("bright").resolve().is_err());
    /// ```
    pub fn resolve(&self) -> Result<i64, Error> {
        match self {
            Brightness::Raw(value) => Ok(*value),
            Brightness::Scaled(value) => Self::from_float(*value)
                .ok_or_else(|| Error::InvalidBrightnessInput(value.to_string())),
            Brightness::Level(level) => Ok(level.value()),
            Brightness::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => Self::from_float(value)
                    .ok_or_else(|| Error::InvalidBrightnessInput(text.clone())),
                Err(_) => BrightnessLevel::from_str(text)
                    .map(|level| level.value())
                    .map_err(|_| Error::InvalidBrightnessInput(text.clone())),
            },
        }
    }

    // Values <= 1.0 are fractions of full brightness; anything above is taken
    // to be on the device scale already. Truncates toward zero.
    fn from_float(value: f64) -> Option<i64> {
        if !value.is_finite() {
            return None;
        }
        let scaled = if value <= 1.0 {
            value * Self::DEVICE_MAX
        } else {
            value
        };
        Some(scaled as i64)
    }
}

/// Resolve any supported brightness input to a device brightness.
pub fn resolve_brightness(input: impl Into<Brightness>) -> Result<i64, Error> {
    input.into().resolve()
}

impl From<i64> for Brightness {
    fn from(value: i64) -> Self {
        Brightness::Raw(value)
    }
}

impl From<i32> for Brightness {
    fn from(value: i32) -> Self {
        Brightness::Raw(value.into())
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Brightness::Raw(value.into())
    }
}

impl From<f64> for Brightness {
    fn from(value: f64) -> Self {
        Brightness::Scaled(value)
    }
}

impl From<f32> for Brightness {
    fn from(value: f32) -> Self {
        Brightness::Scaled(value.into())
    }
}

impl From<BrightnessLevel> for Brightness {
    fn from(level: BrightnessLevel) -> Self {
        Brightness::Level(level)
    }
}

impl From<&str> for Brightness {
    fn from(text: &str) -> Self {
        Brightness::Text(text.to_string())
    }
}

impl From<String> for Brightness {
    fn from(text: String) -> Self {
        Brightness::Text(text)
    }
}
