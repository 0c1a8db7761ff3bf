//! Wire-level state patch for Hue lights.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;
use crate::types::HueSaturation;

/// A partial light state as sent to `PUT /api/{user}/lights/{id}/state`.
///
/// Only the attributes that are set are serialized; the bridge leaves every
/// other attribute of the light unchanged.
///
/// # Examples
///
/// ```
/// use hue_lights_rs::StatePatch;
///
/// let mut patch = StatePatch::new();
/// patch.brightness(200);
/// assert_eq!(patch.to_value().unwrap(), serde_json::json!({"bri": 200}));
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatePatch {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<i64>,
    pub(crate) hue: Option<u16>,
    pub(crate) sat: Option<u8>,
}

impl StatePatch {
    /// Create a new empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this patch contains at least one attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::StatePatch;
    ///
    /// let mut patch = StatePatch::new();
    /// assert!(patch.is_empty());
    /// patch.on(true);
    /// assert!(!patch.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.on.is_none() && self.bri.is_none() && self.hue.is_none() && self.sat.is_none()
    }

    pub fn on(&mut self, on: bool) -> &mut Self {
        self.on = Some(on);
        self
    }

    pub fn brightness(&mut self, bri: i64) -> &mut Self {
        self.bri = Some(bri);
        self
    }

    pub fn hue(&mut self, hue: u16) -> &mut Self {
        self.hue = Some(hue);
        self
    }

    pub fn saturation(&mut self, sat: u8) -> &mut Self {
        self.sat = Some(sat);
        self
    }

    /// Set hue and saturation together.
    pub fn color(&mut self, color: &HueSaturation) -> &mut Self {
        self.hue = Some(color.hue());
        self.sat = Some(color.saturation());
        self
    }

    pub fn get_on(&self) -> Option<bool> {
        self.on
    }

    pub fn get_brightness(&self) -> Option<i64> {
        self.bri
    }

    pub fn get_hue(&self) -> Option<u16> {
        self.hue
    }

    pub fn get_saturation(&self) -> Option<u8> {
        self.sat
    }

    /// Serialize to the JSON body sent to the bridge.
    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::JsonDump)
    }
}

impl From<&HueSaturation> for StatePatch {
    fn from(color: &HueSaturation) -> Self {
        let mut p = StatePatch::new();
        p.color(color);
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_set_fields_are_serialized() {
        let mut patch = StatePatch::new();
        assert_eq!(patch.to_value().unwrap(), json!({}));

        patch.on(false);
        assert_eq!(patch.to_value().unwrap(), json!({"on": false}));

        let patch = StatePatch::from(&HueSaturation::new(21845, 255));
        assert_eq!(patch.to_value().unwrap(), json!({"hue": 21845, "sat": 255}));
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let patch: StatePatch =
            serde_json::from_value(json!({"on": true, "bri": 10, "alert": "none"})).unwrap();
        assert_eq!(patch.get_on(), Some(true));
        assert_eq!(patch.get_brightness(), Some(10));
        assert_eq!(patch.get_hue(), None);
    }
}
