//! Individual light control.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, error};

use crate::config::FailurePolicy;
use crate::errors::Error;
use crate::payload::StatePatch;
use crate::state::{EmittedPatch, LightState, PatchSink};
use crate::transport::Transport;
use crate::types::HueSaturation;

type Result<T> = std::result::Result<T, Error>;

/// The state URL of one light, plus the transport used to reach it.
///
/// This is the [`PatchSink`] every [`Light`] binds its [`LightState`] to.
pub struct LightEndpoint {
    light_id: u32,
    url: String,
    transport: Rc<dyn Transport>,
}

impl LightEndpoint {
    /// `lights_url` is the bridge's `.../api/{user}/lights` collection URL.
    pub fn new(light_id: u32, lights_url: &str, transport: Rc<dyn Transport>) -> Self {
        LightEndpoint {
            light_id,
            url: format!("{}/{}/state", lights_url.trim_end_matches('/'), light_id),
            transport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PatchSink for LightEndpoint {
    fn send_patch(&self, patch: &StatePatch) -> Result<()> {
        let body = patch.to_value()?;
        debug!("Sending patch {} to light {}", body, self.light_id);
        let response = self.transport.put(&self.url, &body)?;
        if !response.is_success() {
            return Err(Error::FailedToSetState {
                light_id: self.light_id,
                status: response.status,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for LightEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightEndpoint")
            .field("light_id", &self.light_id)
            .field("url", &self.url)
            .finish()
    }
}

/// What became of a command sent to a light.
///
/// A rejected patch is never returned as an `Err`: it is logged and reported
/// here, and the light's cached state follows its [`FailurePolicy`].
#[derive(Debug)]
pub enum PatchOutcome {
    /// The bridge accepted the patch; the light's state now mirrors it.
    Applied { light_id: u32, patch: StatePatch },
    /// The patch could not be delivered or the bridge refused it.
    Rejected {
        light_id: u32,
        patch: StatePatch,
        error: Error,
    },
}

impl PatchOutcome {
    pub fn light_id(&self) -> u32 {
        match self {
            PatchOutcome::Applied { light_id, .. } | PatchOutcome::Rejected { light_id, .. } => {
                *light_id
            }
        }
    }

    pub fn patch(&self) -> &StatePatch {
        match self {
            PatchOutcome::Applied { patch, .. } | PatchOutcome::Rejected { patch, .. } => patch,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, PatchOutcome::Applied { .. })
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            PatchOutcome::Applied { .. } => None,
            PatchOutcome::Rejected { error, .. } => Some(error),
        }
    }
}

/// Shared handle to a [`Light`]; groups and scenes hold these without owning the light.
pub type LightRef = Rc<RefCell<Light>>;

/// A single light known to the bridge.
///
/// Commands update the cached [`LightState`] first and then `PUT` only the
/// changed attributes to the bridge. When the bridge accepts, the state is
/// rebuilt from the patch that was sent rather than re-fetched, so attributes
/// outside the patch (and `reachable`) read as `None` until the next fetch.
#[derive(Debug)]
pub struct Light {
    id: u32,
    name: String,
    state: LightState,
    endpoint: Rc<LightEndpoint>,
    failure_policy: FailurePolicy,
}

impl Light {
    pub fn new(
        id: u32,
        name: &str,
        state: LightState,
        lights_url: &str,
        transport: Rc<dyn Transport>,
    ) -> Self {
        let endpoint = Rc::new(LightEndpoint::new(id, lights_url, transport));
        Light {
            id,
            name: name.to_string(),
            state: state.bind(endpoint.clone()),
            endpoint,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub fn url(&self) -> &str {
        self.endpoint.url()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn turn_on(&mut self) -> PatchOutcome {
        self.command(|state| state.set_on(true))
    }

    pub fn turn_off(&mut self) -> PatchOutcome {
        self.command(|state| state.set_on(false))
    }

    /// An unknown power state counts as off.
    pub fn toggle(&mut self) -> PatchOutcome {
        let on = !self.state.is_on().unwrap_or(false);
        self.command(|state| state.set_on(on))
    }

    /// Values are sent as given; see [`Color`](crate::Color) for conversion.
    pub fn set_color(&mut self, color: &HueSaturation) -> PatchOutcome {
        self.command(|state| state.set_color(color))
    }

    /// Values are sent as given; see [`Brightness`](crate::Brightness) for conversion.
    pub fn set_brightness(&mut self, brightness: i64) -> PatchOutcome {
        self.command(|state| state.set_brightness(brightness))
    }

    fn command(&mut self, change: impl FnOnce(&mut LightState) -> EmittedPatch) -> PatchOutcome {
        let previous = self.state.clone();
        let emitted = change(&mut self.state);
        self.apply_patch(previous, emitted)
    }

    fn apply_patch(&mut self, previous: LightState, emitted: EmittedPatch) -> PatchOutcome {
        let EmittedPatch { patch, delivery } = emitted;
        match delivery {
            Some(Ok(())) => {
                self.state = LightState::from_patch(&patch).bind(self.endpoint.clone());
                PatchOutcome::Applied {
                    light_id: self.id,
                    patch,
                }
            }
            // unbound state: the cache already holds the new value
            None => PatchOutcome::Applied {
                light_id: self.id,
                patch,
            },
            Some(Err(error)) => {
                error!("Light {} ({}): {}", self.id, self.name, error);
                if self.failure_policy == FailurePolicy::Rollback {
                    self.state = previous;
                }
                PatchOutcome::Rejected {
                    light_id: self.id,
                    patch,
                    error,
                }
            }
        }
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match (self.state.reachable(), self.state.is_on()) {
            (Some(true), Some(true)) => "on",
            (Some(true), _) => "off",
            _ => "unreachable",
        };
        write!(f, "{} - {} ({})", self.id, self.name, status)
    }
}
