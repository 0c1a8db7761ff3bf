//! Hue and Saturation in bridge device units.

/// Hue and Saturation as understood by the bridge.
///
/// - Hue: position on the color wheel scaled to `0..=65535`
/// - Saturation: color intensity scaled to `0..=255`
///
/// The bridge documents saturation as `0..=254`; values produced by
/// [`Color::resolve`](crate::Color::resolve) use a 255 scale and the bridge
/// accepts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueSaturation {
    hue: u16,
    saturation: u8,
}

impl HueSaturation {
    pub const HUE_SCALE: f64 = 65535.0;
    pub const SATURATION_SCALE: f64 = 255.0;

    pub fn new(hue: u16, saturation: u8) -> Self {
        HueSaturation { hue, saturation }
    }

    /// Scale a hue fraction and a saturation fraction (both `0.0..=1.0`) to device units.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::HueSaturation;
    ///
    /// let hs = HueSaturation::from_fractions(1.0 / 3.0, 1.0);
    /// assert_eq!(hs.hue(), 21845);
    /// assert_eq!(hs.saturation(), 255);
    /// ```
    pub fn from_fractions(hue: f64, saturation: f64) -> Self {
        HueSaturation {
            hue: (hue * Self::HUE_SCALE).round() as u16,
            saturation: (saturation * Self::SATURATION_SCALE).round() as u8,
        }
    }

    /// Get the hue value.
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Get the saturation value.
    pub fn saturation(&self) -> u8 {
        self.saturation
    }
}

impl From<(u16, u8)> for HueSaturation {
    fn from((hue, saturation): (u16, u8)) -> Self {
        HueSaturation::new(hue, saturation)
    }
}
