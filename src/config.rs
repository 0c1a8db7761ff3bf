//! Bridge client configuration.

use serde::{Deserialize, Serialize};

/// What a light does with its cached state when the bridge rejects a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep the optimistically updated value even though the bridge refused it.
    #[default]
    KeepOptimistic,
    /// Restore the state the light had before the command.
    Rollback,
}

/// Settings for a [`Bridge`](crate::Bridge).
///
/// # Examples
///
/// ```
/// use hue_lights_rs::{BridgeConfig, FailurePolicy};
///
/// let config = BridgeConfig::new()
///     .device_type("living_room_panel")
///     .failure_policy(FailurePolicy::Rollback);
/// assert_eq!(config.get_device_type(), "living_room_panel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    device_type: String,
    failure_policy: FailurePolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            device_type: Self::DEFAULT_DEVICE_TYPE.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl BridgeConfig {
    /// Device type announced when pairing with a bridge.
    pub const DEFAULT_DEVICE_TYPE: &'static str = "hue_cli";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_type(mut self, device_type: &str) -> Self {
        self.device_type = device_type.to_string();
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn get_device_type(&self) -> &str {
        &self.device_type
    }

    pub fn get_failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}
