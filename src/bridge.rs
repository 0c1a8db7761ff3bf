//! The bridge: pairing, resource discovery and fan-out of light commands.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::config::BridgeConfig;
use crate::credentials::{CredentialStore, Credentials};
use crate::errors::Error;
use crate::group::{Group, Scene};
use crate::light::{Light, LightRef, PatchOutcome};
use crate::state::LightState;
use crate::transport::Transport;
use crate::types::{Brightness, Color};

type Result<T> = std::result::Result<T, Error>;

/// Which lights a command applies to.
///
/// An empty id list selects every light, exactly like [`LightFilter::All`].
///
/// # Examples
///
/// ```
/// use hue_lights_rs::LightFilter;
///
/// assert!(LightFilter::from(Vec::<u32>::new()).selects_all());
/// assert!(LightFilter::from(None::<Vec<u32>>).selects_all());
/// assert!(!LightFilter::from([1, 2]).selects_all());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LightFilter {
    #[default]
    All,
    Only(Vec<u32>),
}

impl LightFilter {
    pub fn selects_all(&self) -> bool {
        match self {
            LightFilter::All => true,
            LightFilter::Only(ids) => ids.is_empty(),
        }
    }

    pub fn matches(&self, id: u32) -> bool {
        match self {
            LightFilter::All => true,
            LightFilter::Only(ids) => ids.is_empty() || ids.contains(&id),
        }
    }
}

impl From<Vec<u32>> for LightFilter {
    fn from(ids: Vec<u32>) -> Self {
        LightFilter::Only(ids)
    }
}

impl From<&[u32]> for LightFilter {
    fn from(ids: &[u32]) -> Self {
        LightFilter::Only(ids.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for LightFilter {
    fn from(ids: [u32; N]) -> Self {
        LightFilter::Only(ids.to_vec())
    }
}

impl From<u32> for LightFilter {
    fn from(id: u32) -> Self {
        LightFilter::Only(vec![id])
    }
}

impl From<Option<Vec<u32>>> for LightFilter {
    fn from(ids: Option<Vec<u32>>) -> Self {
        ids.map_or(LightFilter::All, LightFilter::Only)
    }
}

#[derive(Debug, Deserialize)]
struct LightEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    state: LightState,
}

#[derive(Debug, Deserialize)]
struct MemberEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    lights: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PairingReply {
    success: Option<PairingSuccess>,
    error: Option<PairingError>,
}

#[derive(Debug, Deserialize)]
struct PairingSuccess {
    username: String,
}

#[derive(Debug, Deserialize)]
struct PairingError {
    #[serde(rename = "type")]
    error_type: i64,
}

/// A Hue bridge and everything fetched from it.
///
/// Start with [`Bridge::create_user`] (press the link button first) or
/// [`Bridge::load_existing`], then fetch lights, groups and scenes.
///
/// # Example
///
/// ```ignore
/// use hue_lights_rs::{Bridge, FileCredentialStore, LightFilter};
///
/// let store = FileCredentialStore::new("hue-credentials.json");
/// let mut bridge = Bridge::http();
/// bridge.load_existing(&store)?;
/// bridge.fetch_lights()?;
/// bridge.set_color("orange", [1, 3])?;
/// bridge.set_brightness("max", LightFilter::All)?;
/// ```
pub struct Bridge {
    transport: Rc<dyn Transport>,
    config: BridgeConfig,
    credentials: Option<Credentials>,
    lights: Vec<LightRef>,
    groups: Vec<Group>,
    scenes: Vec<Scene>,
    grouped_scenes: BTreeMap<String, Vec<Scene>>,
}

impl Bridge {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self::with_config(transport, BridgeConfig::default())
    }

    pub fn with_config(transport: Rc<dyn Transport>, config: BridgeConfig) -> Self {
        Bridge {
            transport,
            config,
            credentials: None,
            lights: Vec::new(),
            groups: Vec::new(),
            scenes: Vec::new(),
            grouped_scenes: BTreeMap::new(),
        }
    }

    /// A bridge client using the blocking reqwest transport.
    #[cfg(feature = "transport-reqwest")]
    pub fn http() -> Self {
        Self::new(Rc::new(crate::transport::HttpTransport::new()))
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// `http://{ip}/api/{user}`, once credentials are known.
    pub fn base_url(&self) -> Result<String> {
        self.credentials
            .as_ref()
            .map(Credentials::base_url)
            .ok_or(Error::Uninitialized)
    }

    /// Pair with the bridge at `bridge_ip_address`.
    ///
    /// The bridge only hands out a user name within a short window after its
    /// link button was pressed.
    pub fn create_user(&mut self, bridge_ip_address: &str) -> Result<&Credentials> {
        let url = format!("http://{}/api", bridge_ip_address);
        let body = json!({ "devicetype": self.config.get_device_type() });
        let response = self.transport.post(&url, &body)?;

        let replies: Vec<PairingReply> =
            serde_json::from_value(response.body).map_err(Error::JsonLoad)?;
        let Some(reply) = replies.into_iter().next() else {
            return Err(Error::InvalidResponse("empty pairing response".into()));
        };

        if let Some(error) = reply.error {
            return Err(match error.error_type {
                1 => Error::DeviceType,
                error_type => Error::ButtonNotPressed { error_type },
            });
        }
        let Some(success) = reply.success else {
            return Err(Error::InvalidResponse(
                "pairing response has neither success nor error".into(),
            ));
        };

        info!("Created bridge user on {}", bridge_ip_address);
        Ok(&*self
            .credentials
            .insert(Credentials::new(bridge_ip_address, &success.username)))
    }

    /// Restore credentials saved by [`Bridge::save_credentials`].
    pub fn load_existing(&mut self, store: &dyn CredentialStore) -> Result<&Credentials> {
        let credentials = store.load()?.ok_or(Error::Uninitialized)?;
        info!("Loaded credentials for bridge {}", credentials.bridge_ip_address);
        Ok(&*self.credentials.insert(credentials))
    }

    pub fn save_credentials(&self, store: &dyn CredentialStore) -> Result<()> {
        let credentials = self.credentials.as_ref().ok_or(Error::Uninitialized)?;
        store.save(credentials)
    }

    pub fn lights(&self) -> &[LightRef] {
        &self.lights
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Scenes bucketed by name, as of the last [`Bridge::fetch_scenes`].
    pub fn grouped_scenes(&self) -> &BTreeMap<String, Vec<Scene>> {
        &self.grouped_scenes
    }

    /// Replace all lights with the bridge's current list.
    ///
    /// Groups and scenes fetched earlier keep pointing at the previous lights.
    pub fn fetch_lights(&mut self) -> Result<&[LightRef]> {
        let lights_url = format!("{}/lights", self.base_url()?);
        let listing = self.fetch_listing("lights")?;

        let mut lights = Vec::with_capacity(listing.len());
        for (key, value) in listing {
            let id = key
                .parse::<u32>()
                .map_err(|_| Error::failed_to_get("lights", format!("invalid light id {key:?}")))?;
            let entry: LightEntry = serde_json::from_value(value).map_err(Error::JsonLoad)?;
            let light = Light::new(
                id,
                &entry.name,
                entry.state,
                &lights_url,
                self.transport.clone(),
            )
            .with_failure_policy(self.config.get_failure_policy());
            lights.push(Rc::new(RefCell::new(light)));
        }

        debug!("Fetched {} lights", lights.len());
        self.lights = lights;
        Ok(&self.lights)
    }

    /// Fetch groups, resolving members against the lights fetched so far.
    ///
    /// Ids without a matching light are left out. A group that lists no
    /// lights at all resolves to every light.
    pub fn fetch_groups(&mut self) -> Result<&[Group]> {
        let listing = self.fetch_listing("groups")?;

        let mut groups = Vec::with_capacity(listing.len());
        for (id, value) in listing {
            let entry: MemberEntry = serde_json::from_value(value).map_err(Error::JsonLoad)?;
            let members = self.resolve_members("groups", &id, &entry.lights)?;
            groups.push(Group::new(&id, &entry.name, members));
        }

        debug!("Fetched {} groups", groups.len());
        self.groups = groups;
        Ok(&self.groups)
    }

    /// Fetch scenes like [`Bridge::fetch_groups`] and regroup them by name.
    pub fn fetch_scenes(&mut self) -> Result<&[Scene]> {
        let listing = self.fetch_listing("scenes")?;

        let mut scenes = Vec::with_capacity(listing.len());
        for (id, value) in listing {
            let entry: MemberEntry = serde_json::from_value(value).map_err(Error::JsonLoad)?;
            let members = self.resolve_members("scenes", &id, &entry.lights)?;
            scenes.push(Scene::new(&id, &entry.name, members));
        }

        debug!("Fetched {} scenes", scenes.len());
        self.grouped_scenes = Scene::group_by_name(&scenes);
        self.scenes = scenes;
        Ok(&self.scenes)
    }

    /// Lights selected by `filter`, in fetch order.
    pub fn filter_lights(&self, filter: impl Into<LightFilter>) -> Vec<LightRef> {
        let filter = filter.into();
        self.lights
            .iter()
            .filter(|light| filter.matches(light.borrow().id()))
            .cloned()
            .collect()
    }

    pub fn turn_on(&self, filter: impl Into<LightFilter>) -> Vec<PatchOutcome> {
        self.for_each_light(filter, Light::turn_on)
    }

    pub fn turn_off(&self, filter: impl Into<LightFilter>) -> Vec<PatchOutcome> {
        self.for_each_light(filter, Light::turn_off)
    }

    pub fn toggle_on(&self, filter: impl Into<LightFilter>) -> Vec<PatchOutcome> {
        self.for_each_light(filter, Light::toggle)
    }

    /// Normalize `brightness` once, then send it to every selected light.
    pub fn set_brightness(
        &self,
        brightness: impl Into<Brightness>,
        filter: impl Into<LightFilter>,
    ) -> Result<Vec<PatchOutcome>> {
        let value = brightness.into().resolve()?;
        Ok(self.for_each_light(filter, |light| light.set_brightness(value)))
    }

    /// Convert `color` to hue/saturation once, then send it to every selected light.
    pub fn set_color(
        &self,
        color: impl Into<Color>,
        filter: impl Into<LightFilter>,
    ) -> Result<Vec<PatchOutcome>> {
        let color = color.into().resolve()?;
        Ok(self.for_each_light(filter, |light| light.set_color(&color)))
    }

    /// Bridge address, user name and base URL, one per line.
    pub fn debug_info(&self) -> Result<String> {
        let credentials = self.credentials.as_ref().ok_or(Error::Uninitialized)?;
        Ok(format!(
            "Bridge IP address: {}\nBridge API key (username): {}\nAPI Base URL: {}",
            credentials.bridge_ip_address,
            credentials.user_name,
            credentials.base_url()
        ))
    }

    fn for_each_light(
        &self,
        filter: impl Into<LightFilter>,
        mut command: impl FnMut(&mut Light) -> PatchOutcome,
    ) -> Vec<PatchOutcome> {
        self.filter_lights(filter)
            .iter()
            .map(|light| command(&mut *light.borrow_mut()))
            .collect()
    }

    fn fetch_listing(&self, resource: &str) -> Result<Map<String, Value>> {
        let url = format!("{}/{}", self.base_url()?, resource);
        match self.transport.get(&url)? {
            Value::Object(listing) => Ok(listing),
            // the bridge reports failures (e.g. an unknown user) as an error list
            Value::Array(entries) => {
                let reason = entries
                    .first()
                    .and_then(|entry| entry.pointer("/error/description"))
                    .and_then(Value::as_str)
                    .unwrap_or("bridge returned an error");
                Err(Error::failed_to_get(resource, reason))
            }
            other => Err(Error::failed_to_get(
                resource,
                format!("unexpected response {other}"),
            )),
        }
    }

    fn resolve_members(&self, resource: &str, id: &str, raw: &[Value]) -> Result<Vec<LightRef>> {
        let ids = raw
            .iter()
            .map(|value| parse_light_id(value).ok_or_else(|| {
                Error::failed_to_get(resource, format!("{id} lists invalid light id {value}"))
            }))
            .collect::<Result<Vec<u32>>>()?;

        let unknown = self.unknown_light_ids(&ids);
        if !unknown.is_empty() {
            warn!("{} {} references unknown light(s) {:?}", resource, id, unknown);
        }
        Ok(self.filter_lights(ids.as_slice()))
    }

    /// Distinct ids in `ids` that match no fetched light.
    fn unknown_light_ids(&self, ids: &[u32]) -> BTreeSet<u32> {
        ids.iter()
            .copied()
            .filter(|id| !self.lights.iter().any(|light| light.borrow().id() == *id))
            .collect()
    }
}

fn parse_light_id(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("lights", &self.lights)
            .field("groups", &self.groups)
            .field("scenes", &self.scenes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::credentials::MemoryCredentialStore;
    use crate::transport::testing::MockTransport;
    use crate::types::HueSaturation;

    const BASE: &str = "http://test_address/api/test_user";

    fn paired(transport: &Rc<MockTransport>) -> Bridge {
        let mut bridge = Bridge::new(transport.clone());
        bridge.set_credentials(Credentials::new("test_address", "test_user"));
        bridge
    }

    fn with_lights(transport: &Rc<MockTransport>) -> Bridge {
        transport.on_get(
            &format!("{BASE}/lights"),
            json!({
                "1": {"name": "Light 1", "state": {"on": false, "bri": 1, "hue": 0, "sat": 0, "reachable": true}},
                "2": {"name": "Light 2", "state": {"on": true, "reachable": true}},
                "10": {"name": "Light 10", "state": {}}
            }),
        );
        let mut bridge = paired(transport);
        bridge.fetch_lights().unwrap();
        bridge
    }

    fn ids(lights: &[LightRef]) -> Vec<u32> {
        lights.iter().map(|l| l.borrow().id()).collect()
    }

    #[test]
    fn test_create_user() {
        let transport = Rc::new(MockTransport::new());
        transport.on_post(json!([{"success": {"username": "U"}}]));
        let mut bridge = Bridge::new(transport.clone());

        let credentials = bridge.create_user("test_address").unwrap().clone();
        assert_eq!(credentials, Credentials::new("test_address", "U"));
        assert_eq!(bridge.base_url().unwrap(), "http://test_address/api/U");

        let request = &transport.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "http://test_address/api");
        assert_eq!(request.body, Some(json!({"devicetype": "hue_cli"})));
    }

    #[test]
    fn test_create_user_errors() {
        let transport = Rc::new(MockTransport::new());
        let mut bridge = Bridge::new(transport.clone());

        transport.on_post(json!([{"error": {"type": 1, "description": "invalid"}}]));
        assert_eq!(
            bridge.create_user("test_address").unwrap_err(),
            Error::DeviceType
        );

        transport.on_post(json!([{"error": {"type": 101, "description": "link button not pressed"}}]));
        assert_eq!(
            bridge.create_user("test_address").unwrap_err(),
            Error::ButtonNotPressed { error_type: 101 }
        );

        transport.on_post(json!([]));
        assert!(matches!(
            bridge.create_user("test_address"),
            Err(Error::InvalidResponse(_))
        ));
        assert!(bridge.credentials().is_none());
    }

    #[test]
    fn test_create_user_reply_without_outcome() {
        let transport = Rc::new(MockTransport::new());
        let mut bridge = paired(&transport);
        let lights_before = bridge.lights().len();

        transport.on_post(json!([{}]));
        assert!(matches!(
            bridge.create_user("other_address"),
            Err(Error::InvalidResponse(_))
        ));
        assert_eq!(
            bridge.credentials(),
            Some(&Credentials::new("test_address", "test_user"))
        );
        assert_eq!(bridge.lights().len(), lights_before);
    }

    #[test]
    fn test_custom_device_type() {
        let transport = Rc::new(MockTransport::new());
        transport.on_post(json!([{"success": {"username": "U"}}]));
        let mut bridge =
            Bridge::with_config(transport.clone(), BridgeConfig::new().device_type("panel"));
        bridge.create_user("1.2.3.4").unwrap();
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"devicetype": "panel"}))
        );
    }

    #[test]
    fn test_credentials_round_trip() {
        let transport = Rc::new(MockTransport::new());
        let store = MemoryCredentialStore::new();

        let mut bridge = Bridge::new(transport.clone());
        assert_eq!(bridge.load_existing(&store).unwrap_err(), Error::Uninitialized);
        assert_eq!(bridge.save_credentials(&store).unwrap_err(), Error::Uninitialized);

        let bridge = paired(&transport);
        bridge.save_credentials(&store).unwrap();

        let mut restored = Bridge::new(transport);
        restored.load_existing(&store).unwrap();
        assert_eq!(restored.base_url().unwrap(), BASE);
        assert_eq!(
            restored.debug_info().unwrap(),
            format!(
                "Bridge IP address: test_address\nBridge API key (username): test_user\nAPI Base URL: {BASE}"
            )
        );
    }

    #[test]
    fn test_fetch_requires_credentials() {
        let transport = Rc::new(MockTransport::new());
        let mut bridge = Bridge::new(transport.clone());
        assert_eq!(bridge.fetch_lights().unwrap_err(), Error::Uninitialized);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_fetch_lights() {
        let transport = Rc::new(MockTransport::new());
        let bridge = with_lights(&transport);

        assert_eq!(ids(bridge.lights()), vec![1, 2, 10]);
        let first = bridge.lights()[0].borrow();
        assert_eq!(first.name(), "Light 1");
        assert_eq!(first.state().is_on(), Some(false));
        assert_eq!(first.url(), format!("{BASE}/lights/1/state"));
    }

    #[test]
    fn test_fetch_lights_error_list() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/lights"),
            json!([{"error": {"type": 1, "address": "/", "description": "unauthorized user"}}]),
        );
        let mut bridge = paired(&transport);
        assert_eq!(
            bridge.fetch_lights().unwrap_err(),
            Error::failed_to_get("lights", "unauthorized user")
        );
    }

    #[test]
    fn test_filter_lights() {
        let transport = Rc::new(MockTransport::new());
        let bridge = with_lights(&transport);

        assert_eq!(ids(&bridge.filter_lights(LightFilter::All)), vec![1, 2, 10]);
        assert_eq!(ids(&bridge.filter_lights(Vec::<u32>::new())), vec![1, 2, 10]);
        assert_eq!(ids(&bridge.filter_lights(None::<Vec<u32>>)), vec![1, 2, 10]);
        assert_eq!(ids(&bridge.filter_lights(1)), vec![1]);
        assert_eq!(ids(&bridge.filter_lights([10, 1])), vec![1, 10]);
        assert!(bridge.filter_lights([42]).is_empty());
    }

    #[test]
    fn test_fetch_groups_drops_unknown_members() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/groups"),
            json!({
                "1": {"name": "Living room", "lights": ["1", "99"], "type": "Room"},
                "2": {"name": "Nothing", "lights": ["98"]},
                "3": {"name": "Everything", "lights": []}
            }),
        );
        let mut bridge = with_lights(&transport);
        bridge.fetch_groups().unwrap();

        let groups = bridge.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].id(), "1");
        assert_eq!(groups[0].name(), "Living room");
        assert_eq!(groups[0].light_ids(), vec![1]);
        assert!(groups[1].lights().is_empty());
        assert_eq!(groups[2].light_ids(), vec![1, 2, 10]);
    }

    #[test]
    fn test_repeated_member_ids_are_not_unknown() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/groups"),
            json!({"1": {"name": "Twice", "lights": ["1", "1"]}}),
        );
        let mut bridge = with_lights(&transport);
        bridge.fetch_groups().unwrap();

        assert_eq!(bridge.groups()[0].light_ids(), vec![1]);
        assert!(bridge.unknown_light_ids(&[1, 1, 2]).is_empty());
        assert_eq!(
            bridge.unknown_light_ids(&[1, 99, 99, 98]),
            BTreeSet::from([98, 99])
        );
    }

    #[test]
    fn test_fetch_lights_invalid_id() {
        let transport = Rc::new(MockTransport::new());
        let mut bridge = with_lights(&transport);
        transport.on_get(
            &format!("{BASE}/lights"),
            json!({"abc": {"name": "Odd", "state": {}}}),
        );

        assert!(matches!(
            bridge.fetch_lights(),
            Err(Error::FailedToGetState { .. })
        ));
        assert_eq!(ids(bridge.lights()), vec![1, 2, 10]);
        assert_eq!(
            bridge.credentials(),
            Some(&Credentials::new("test_address", "test_user"))
        );
    }

    #[test]
    fn test_fetch_lights_unexpected_body() {
        let transport = Rc::new(MockTransport::new());
        let mut bridge = with_lights(&transport);

        for body in [json!(null), json!("x"), json!(42)] {
            transport.on_get(&format!("{BASE}/lights"), body);
            assert!(matches!(
                bridge.fetch_lights(),
                Err(Error::FailedToGetState { .. })
            ));
        }
        assert_eq!(ids(bridge.lights()), vec![1, 2, 10]);
        assert_eq!(
            bridge.credentials(),
            Some(&Credentials::new("test_address", "test_user"))
        );
    }

    #[test]
    fn test_fetch_groups_invalid_member() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/groups"),
            json!({"1": {"name": "Broken", "lights": ["one"]}}),
        );
        let mut bridge = with_lights(&transport);
        assert!(matches!(
            bridge.fetch_groups(),
            Err(Error::FailedToGetState { .. })
        ));
    }

    #[test]
    fn test_fetch_scenes_groups_by_name() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/scenes"),
            json!({
                "abc-on-0": {"name": "Relax", "lights": ["1"]},
                "abc-on-1": {"name": "Relax", "lights": ["2"]},
                "def-on-0": {"name": "Read", "lights": ["1", "2"]}
            }),
        );
        let mut bridge = with_lights(&transport);
        bridge.fetch_scenes().unwrap();

        assert_eq!(bridge.scenes().len(), 3);
        let grouped = bridge.grouped_scenes();
        assert_eq!(grouped.len(), 2);
        let relax: Vec<_> = grouped["Relax"].iter().map(Scene::id).collect();
        assert_eq!(relax, vec!["abc-on-0", "abc-on-1"]);
        assert_eq!(grouped["Read"][0].light_ids(), vec![1, 2]);
    }

    #[test]
    fn test_refetching_lights_leaves_groups_stale() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/groups"),
            json!({"1": {"name": "Living room", "lights": ["1"]}}),
        );
        let mut bridge = with_lights(&transport);
        bridge.fetch_groups().unwrap();
        bridge.fetch_lights().unwrap();

        let member = bridge.groups()[0].lights()[0].clone();
        assert!(!Rc::ptr_eq(&member, &bridge.lights()[0]));

        bridge.turn_on(1);
        assert_eq!(bridge.lights()[0].borrow().state().is_on(), Some(true));
        assert_eq!(member.borrow().state().is_on(), Some(false));
    }

    #[test]
    fn test_turn_on_off() {
        let transport = Rc::new(MockTransport::new());
        let bridge = with_lights(&transport);

        let outcomes = bridge.turn_on(LightFilter::All);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(PatchOutcome::is_applied));
        for light in bridge.lights() {
            assert_eq!(light.borrow().state().is_on(), Some(true));
        }

        bridge.turn_off([1]);
        assert_eq!(bridge.lights()[0].borrow().state().is_on(), Some(false));
        assert_eq!(bridge.lights()[1].borrow().state().is_on(), Some(true));

        let urls: Vec<_> = transport.puts().into_iter().map(|r| r.url).collect();
        assert_eq!(urls.last().unwrap(), &format!("{BASE}/lights/1/state"));
    }

    #[test]
    fn test_toggle_on() {
        let transport = Rc::new(MockTransport::new());
        let bridge = with_lights(&transport);

        bridge.toggle_on([1]);
        assert_eq!(bridge.lights()[0].borrow().state().is_on(), Some(true));
        bridge.toggle_on([1]);
        assert_eq!(bridge.lights()[0].borrow().state().is_on(), Some(false));
    }

    #[test]
    fn test_set_brightness() {
        let transport = Rc::new(MockTransport::new());
        let bridge = with_lights(&transport);
        let light = bridge.lights()[0].clone();

        assert_eq!(light.borrow().state().brightness(), Some(1));
        bridge.set_brightness(100, [1]).unwrap();
        assert_eq!(light.borrow().state().brightness(), Some(100));
        bridge.set_brightness("max", [1]).unwrap();
        assert_eq!(light.borrow().state().brightness(), Some(254));
        bridge.set_brightness(0.5, [1]).unwrap();
        assert_eq!(light.borrow().state().brightness(), Some(127));

        let count = transport.puts().len();
        assert!(bridge.set_brightness("blinding", [1]).is_err());
        assert_eq!(transport.puts().len(), count);
    }

    #[test]
    fn test_set_color() {
        let transport = Rc::new(MockTransport::new());
        let bridge = with_lights(&transport);
        let light = bridge.lights()[0].clone();

        bridge.set_color("red", [1]).unwrap();
        assert_eq!(light.borrow().state().color(), Some(HueSaturation::new(0, 255)));
        bridge.set_color("green", [1]).unwrap();
        assert_eq!(
            light.borrow().state().color(),
            Some(HueSaturation::new(21845, 255))
        );
        assert_eq!(
            transport.puts().last().unwrap().body,
            Some(json!({"hue": 21845, "sat": 255}))
        );

        assert_eq!(
            bridge.set_color("blurple", [1]).unwrap_err(),
            Error::UnknownColorName("blurple".into())
        );
    }

    #[test]
    fn test_rejected_commands_are_reported_not_raised() {
        let transport = Rc::new(MockTransport::new());
        transport.set_put_status(400);
        let bridge = with_lights(&transport);

        let outcomes = bridge.set_brightness(50, LightFilter::All).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.error().is_some()));
        // optimistic value is kept by default
        assert_eq!(bridge.lights()[0].borrow().state().brightness(), Some(50));
    }

    #[test]
    fn test_rollback_policy_applies_to_fetched_lights() {
        let transport = Rc::new(MockTransport::new());
        transport.on_get(
            &format!("{BASE}/lights"),
            json!({"1": {"name": "Light 1", "state": {"bri": 1}}}),
        );
        transport.set_put_status(500);
        let mut bridge = Bridge::with_config(
            transport.clone(),
            BridgeConfig::new().failure_policy(FailurePolicy::Rollback),
        );
        bridge.set_credentials(Credentials::new("test_address", "test_user"));
        bridge.fetch_lights().unwrap();

        bridge.set_brightness(50, 1).unwrap();
        assert_eq!(bridge.lights()[0].borrow().state().brightness(), Some(1));
    }
}
