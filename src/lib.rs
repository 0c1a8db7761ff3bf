//! # hue_lights_rs
//!
//! A Rust client library for the local REST API of a Philips Hue bridge.
//!
//! This crate pairs with a bridge, fetches its lights, groups and scenes, and
//! turns commands such as "set these lights to orange at half brightness" into
//! the partial state patches the bridge understands.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_lights_rs::{Bridge, FileCredentialStore, LightFilter};
//!
//! fn control_lights() -> Result<(), hue_lights_rs::Error> {
//!     let store = FileCredentialStore::new("hue-credentials.json");
//!     let mut bridge = Bridge::http();
//!
//!     // Press the link button on the bridge first
//!     bridge.create_user("192.168.1.2")?;
//!     bridge.save_credentials(&store)?;
//!
//!     bridge.fetch_lights()?;
//!     bridge.turn_on(LightFilter::All);
//!     bridge.set_color("orange", [1, 2])?;
//!     bridge.set_brightness(0.5, [1, 2])?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pairing**: Obtain a bridge user with [`Bridge::create_user`]
//! - **Credential cache**: Persist the user through a [`CredentialStore`]
//! - **Discovery of resources**: [`Light`]s, [`Group`]s and [`Scene`]s
//! - **Colors**: Web color names or RGB via [`Color`]
//! - **Brightness**: Integers, fractions or `min`/`med`/`max` via [`Brightness`]
//! - **Targeting**: Apply commands to a subset of lights with [`LightFilter`]
//!
//! ## State updates
//!
//! Every change is applied to the cached [`LightState`] first and then sent as
//! a [`StatePatch`] holding only the changed attributes. A patch the bridge
//! rejects is logged and reported as [`PatchOutcome::Rejected`]; whether the
//! cached value is kept or restored is chosen with [`FailurePolicy`].
//!
//! ## Feature Flags
//!
//! - `transport-reqwest` (default): blocking HTTP [`transport::HttpTransport`]
//!   and [`Bridge::http`]

mod bridge;
mod config;
mod credentials;
mod errors;
mod group;
mod light;
mod payload;
mod state;
pub mod transport;
mod types;

// Re-export public API
pub use bridge::{Bridge, LightFilter};
pub use config::{BridgeConfig, FailurePolicy};
pub use credentials::{CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
pub use errors::Error;
pub use group::{Group, Scene};
pub use light::{Light, LightEndpoint, LightRef, PatchOutcome};
pub use payload::StatePatch;
pub use state::{EmittedPatch, LightState, PatchSink};
pub use transport::{Response, Transport};
pub use types::{
    Brightness, BrightnessLevel, Color, HueSaturation, resolve_brightness, resolve_color,
};
