use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named camera pose the user can jump to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    #[serde(with = "xyz")]
    pub position: Vec3,
    #[serde(with = "xyz")]
    pub target: Vec3,
}

impl View {
    pub fn new(name: impl Into<String>, position: Vec3, target: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            target,
        }
    }
}

/// Ordered, non-empty list of views. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCatalog {
    views: Vec<View>,
}

impl ViewCatalog {
    /// Build a catalog, rejecting empty lists and unnamed views
    pub fn new(views: Vec<View>) -> Result<Self> {
        if views.is_empty() {
            bail!("view catalog must contain at least one view");
        }
        if let Some(index) = views.iter().position(|v| v.name.trim().is_empty()) {
            bail!("view {} has an empty name", index);
        }
        Ok(Self { views })
    }

    /// Parse a JSON array of `{name, position: {x,y,z}, target: {x,y,z}}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let views: Vec<View> = serde_json::from_str(json).context("Invalid view catalog JSON")?;
        Self::new(views)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read view catalog: {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Failed to load view catalog: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&View> {
        self.views.get(index)
    }

    pub fn first(&self) -> &View {
        &self.views[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }
}

impl Default for ViewCatalog {
    /// Interior views tuned for a room roughly centred at the origin, in metres
    fn default() -> Self {
        Self {
            views: vec![
                View::new("Room Overview", Vec3::new(3.0, 2.5, 3.0), Vec3::new(-1.0, 1.0, 0.0)),
                View::new("Bed & Wall Art", Vec3::new(-3.5, 1.5, 1.5), Vec3::new(-1.8, 1.5, 0.0)),
                View::new("Play Area", Vec3::new(2.0, 1.2, -1.0), Vec3::new(0.0, 0.5, 2.0)),
                View::new("TV Corner", Vec3::new(1.0, 1.5, 2.5), Vec3::new(-2.0, 1.0, 0.0)),
                View::new("Sofa View", Vec3::new(-2.0, 1.3, -2.0), Vec3::new(1.0, 1.0, 1.0)),
                View::new("Bird's Eye", Vec3::new(0.0, 6.0, 1.0), Vec3::new(0.0, 0.0, 0.5)),
            ],
        }
    }
}

/// Serializes a `Vec3` as `{ "x": .., "y": .., "z": .. }`
mod xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz { x: v.x, y: v.y, z: v.z }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(x, y, z))
    }
}
