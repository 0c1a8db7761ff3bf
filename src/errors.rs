/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No bridge user is known yet; pair with the bridge or load cached credentials first.
    #[error("hue api has not been initialized yet")]
    Uninitialized,

    /// The device at the given address refused the pairing request's device type.
    #[error("invalid devicetype")]
    DeviceType,

    /// Pairing was attempted without pressing the link button on the bridge.
    #[error("link button was not pressed (bridge error type {error_type})")]
    ButtonNotPressed { error_type: i64 },

    /// The bridge rejected a state patch, usually because a parameter was malformed.
    #[error("failed to set state of light {light_id}: bridge answered with status {status}")]
    FailedToSetState { light_id: u32, status: u16 },

    /// The bridge returned something other than the expected resource listing.
    #[error("failed to fetch {resource} from the bridge: {reason}")]
    FailedToGetState { resource: String, reason: String },

    /// The color name is not a known web color.
    #[error("unknown color name: {0}")]
    UnknownColorName(String),

    /// The brightness string is neither a number nor one of `min`, `med`, `max`.
    #[error("invalid brightness input: {0}")]
    InvalidBrightnessInput(String),

    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// An HTTP request to the bridge failed before a response was received.
    #[error("http {action} error: {err}")]
    Http {
        action: String,
        err: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading or writing the credential cache failed.
    #[error("credential cache {action} error: {err:?}")]
    Persistence { action: String, err: std::io::Error },

    /// The bridge answered with a body of an unexpected shape.
    #[error("invalid bridge response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Create a new http error
    pub fn http(action: &str, err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Http {
            action: action.to_string(),
            err: err.into(),
        }
    }

    /// Create a new credential cache error
    pub fn persistence(action: &str, err: std::io::Error) -> Self {
        Error::Persistence {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new failed-to-get-state error
    pub fn failed_to_get(resource: &str, reason: impl Into<String>) -> Self {
        Error::FailedToGetState {
            resource: resource.to_string(),
            reason: reason.into(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
