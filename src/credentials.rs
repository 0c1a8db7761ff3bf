//! Bridge credentials and their persistence.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// The bridge address together with the user name the bridge issued for us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub bridge_ip_address: String,
    pub user_name: String,
}

impl Credentials {
    pub fn new(bridge_ip_address: &str, user_name: &str) -> Self {
        Credentials {
            bridge_ip_address: bridge_ip_address.to_string(),
            user_name: user_name.to_string(),
        }
    }

    /// Root of every authenticated endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Credentials;
    ///
    /// let credentials = Credentials::new("192.168.1.2", "abc");
    /// assert_eq!(credentials.base_url(), "http://192.168.1.2/api/abc");
    /// ```
    pub fn base_url(&self) -> String {
        format!("http://{}/api/{}", self.bridge_ip_address, self.user_name)
    }
}

/// Somewhere credentials survive between runs.
pub trait CredentialStore {
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Credentials>>;
}

/// Stores credentials as JSON in a file at an explicit path.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileCredentialStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, credentials: &Credentials) -> Result<()> {
        let data = serde_json::to_vec_pretty(credentials).map_err(Error::JsonDump)?;
        fs::write(&self.path, data).map_err(|e| Error::persistence("write", e))?;
        info!("Saved bridge credentials to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credentials>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::persistence("read", e)),
        };
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(Error::JsonLoad)
    }
}

/// Keeps credentials in memory only.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    saved: RefCell<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, credentials: &Credentials) -> Result<()> {
        *self.saved.borrow_mut() = Some(credentials.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.saved.borrow().clone())
    }
}
