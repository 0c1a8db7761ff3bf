//! Groups and scenes: named collections of lights.

use std::collections::BTreeMap;
use std::fmt;

use crate::light::LightRef;

/// A bridge group and the lights it contained when it was fetched.
///
/// Members are shared handles to the bridge's lights at fetch time; fetching
/// lights again does not update them.
#[derive(Debug, Clone)]
pub struct Group {
    id: String,
    name: String,
    lights: Vec<LightRef>,
}

impl Group {
    pub fn new(id: &str, name: &str, lights: Vec<LightRef>) -> Self {
        Group {
            id: id.to_string(),
            name: name.to_string(),
            lights,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lights(&self) -> &[LightRef] {
        &self.lights
    }

    /// Ids of the member lights, in membership order.
    pub fn light_ids(&self) -> Vec<u32> {
        self.lights.iter().map(|light| light.borrow().id()).collect()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group({}) - {} - {} lights",
            self.id,
            self.name,
            self.lights.len()
        )?;
        for light in &self.lights {
            write!(f, "\n{}", light.borrow())?;
        }
        Ok(())
    }
}

/// A bridge scene and the lights it applies to.
///
/// The bridge lists a logical scene once per set of lights it was stored for,
/// so several `Scene`s often share a name; see [`Scene::group_by_name`].
#[derive(Debug, Clone)]
pub struct Scene {
    id: String,
    name: String,
    lights: Vec<LightRef>,
}

impl Scene {
    pub fn new(id: &str, name: &str, lights: Vec<LightRef>) -> Self {
        Scene {
            id: id.to_string(),
            name: name.to_string(),
            lights,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lights(&self) -> &[LightRef] {
        &self.lights
    }

    pub fn light_ids(&self) -> Vec<u32> {
        self.lights.iter().map(|light| light.borrow().id()).collect()
    }

    /// Bucket scenes by name, keeping input order inside each bucket.
    pub fn group_by_name(scenes: &[Scene]) -> BTreeMap<String, Vec<Scene>> {
        let mut grouped: BTreeMap<String, Vec<Scene>> = BTreeMap::new();
        for scene in scenes {
            grouped
                .entry(scene.name.clone())
                .or_default()
                .push(scene.clone());
        }
        grouped
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene({}) - {} - {} lights",
            self.id,
            self.name,
            self.lights.len()
        )?;
        for light in &self.lights {
            write!(f, "\n{}", light.borrow().name())?;
        }
        Ok(())
    }
}
