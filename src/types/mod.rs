//! Value types for light control parameters.

mod brightness;
mod color;
mod hue_saturation;

pub use brightness::{Brightness, BrightnessLevel, resolve_brightness};
pub use color::{Color, resolve_color};
pub use hue_saturation::HueSaturation;
