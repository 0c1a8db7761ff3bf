//! Per-light cached state that reports every change as a partial patch.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::errors::Error;
use crate::payload::StatePatch;
use crate::types::HueSaturation;

type Result<T> = std::result::Result<T, Error>;

/// Receives the partial patches produced by a bound [`LightState`].
///
/// A [`Light`](crate::Light) binds its state to its endpoint at construction,
/// so every setter call becomes a `PUT` to the bridge.
pub trait PatchSink {
    fn send_patch(&self, patch: &StatePatch) -> Result<()>;
}

/// A patch produced by a setter, together with what the sink made of it.
#[derive(Debug)]
pub struct EmittedPatch {
    pub patch: StatePatch,
    /// `None` when the state is not bound to a sink.
    pub delivery: Option<Result<()>>,
}

/// Cached state of one light.
///
/// Each setter updates the cached value immediately and then hands only the
/// changed attributes to the bound [`PatchSink`]. Attributes are `None` when
/// the snapshot (or patch) the state was built from did not carry them.
#[derive(Clone, Default, Deserialize)]
pub struct LightState {
    reachable: Option<bool>,
    on: Option<bool>,
    #[serde(rename = "bri")]
    brightness: Option<i64>,
    hue: Option<u16>,
    #[serde(rename = "sat")]
    saturation: Option<u8>,
    #[serde(skip)]
    sink: Option<Rc<dyn PatchSink>>,
}

impl LightState {
    /// Create an unbound state; setters only update the cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a patch alone. Attributes missing from the patch,
    /// including `reachable`, are `None` afterwards.
    pub fn from_patch(patch: &StatePatch) -> Self {
        LightState {
            reachable: None,
            on: patch.on,
            brightness: patch.bri,
            hue: patch.hue,
            saturation: patch.sat,
            sink: None,
        }
    }

    /// Attach the sink that receives patches from now on.
    pub fn bind(mut self, sink: Rc<dyn PatchSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn is_bound(&self) -> bool {
        self.sink.is_some()
    }

    pub fn reachable(&self) -> Option<bool> {
        self.reachable
    }

    pub fn is_on(&self) -> Option<bool> {
        self.on
    }

    pub fn brightness(&self) -> Option<i64> {
        self.brightness
    }

    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    pub fn saturation(&self) -> Option<u8> {
        self.saturation
    }

    /// Hue and saturation, when both are known.
    pub fn color(&self) -> Option<HueSaturation> {
        match (self.hue, self.saturation) {
            (Some(hue), Some(sat)) => Some(HueSaturation::new(hue, sat)),
            _ => None,
        }
    }

    pub fn set_on(&mut self, on: bool) -> EmittedPatch {
        self.on = Some(on);
        let mut patch = StatePatch::new();
        patch.on(on);
        self.emit(patch)
    }

    pub fn set_brightness(&mut self, brightness: i64) -> EmittedPatch {
        self.brightness = Some(brightness);
        let mut patch = StatePatch::new();
        patch.brightness(brightness);
        self.emit(patch)
    }

    pub fn set_hue(&mut self, hue: u16) -> EmittedPatch {
        self.hue = Some(hue);
        let mut patch = StatePatch::new();
        patch.hue(hue);
        self.emit(patch)
    }

    pub fn set_saturation(&mut self, saturation: u8) -> EmittedPatch {
        self.saturation = Some(saturation);
        let mut patch = StatePatch::new();
        patch.saturation(saturation);
        self.emit(patch)
    }

    /// Set hue and saturation in a single patch.
    pub fn set_color(&mut self, color: &HueSaturation) -> EmittedPatch {
        self.hue = Some(color.hue());
        self.saturation = Some(color.saturation());
        self.emit(StatePatch::from(color))
    }

    /// The full cached state as a patch.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::{LightState, StatePatch};
    ///
    /// let mut state = LightState::new();
    /// state.set_on(true);
    /// state.set_brightness(42);
    ///
    /// let patch = state.to_patch();
    /// assert_eq!(patch.get_on(), Some(true));
    /// assert_eq!(patch.get_brightness(), Some(42));
    /// assert_eq!(patch.get_hue(), None);
    /// ```
    pub fn to_patch(&self) -> StatePatch {
        StatePatch {
            on: self.on,
            bri: self.brightness,
            hue: self.hue,
            sat: self.saturation,
        }
    }

    fn emit(&self, patch: StatePatch) -> EmittedPatch {
        let delivery = self.sink.as_ref().map(|sink| sink.send_patch(&patch));
        EmittedPatch { patch, delivery }
    }
}

impl fmt::Debug for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightState")
            .field("reachable", &self.reachable)
            .field("on", &self.on)
            .field("brightness", &self.brightness)
            .field("hue", &self.hue)
            .field("saturation", &self.saturation)
            .field("bound", &self.sink.is_some())
            .finish()
    }
}

impl PartialEq for LightState {
    fn eq(&self, other: &Self) -> bool {
        self.reachable == other.reachable
            && self.on == other.on
            && self.brightness == other.brightness
            && self.hue == other.hue
            && self.saturation == other.saturation
    }
}
