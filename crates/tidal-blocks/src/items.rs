//! Tool declarations. Stats are consumed by the host as-is.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::registry::{RegistryError, read_config};
use crate::types::ToolKind;

#[derive(Deserialize, Debug)]
pub struct ItemsConfig {
    #[serde(default)]
    pub tools: Vec<ToolDef>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ToolDef {
    pub name: String,
    pub kind: ToolKind,
    // Mining level; blocks with a harvest level above this drop nothing
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub attack_damage: f32,
    #[serde(default = "default_attack_speed")]
    pub attack_speed: f32,
    #[serde(default = "default_max_stack")]
    pub max_stack: u8,
}

fn default_attack_speed() -> f32 {
    -3.0
}
fn default_max_stack() -> u8 {
    1
}

#[derive(Default, Clone, Debug)]
pub struct ToolCatalog {
    pub tools: Vec<ToolDef>,
    pub by_name: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: ItemsConfig = toml::from_str(toml_str)?;
        let mut catalog = ToolCatalog::new();
        for tool in cfg.tools {
            if catalog.by_name.contains_key(&tool.name) {
                return Err(RegistryError::DuplicateName(tool.name));
            }
            catalog.by_name.insert(tool.name.clone(), catalog.tools.len());
            catalog.tools.push(tool);
        }
        Ok(catalog)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = read_config(path.as_ref())?;
        Self::from_toml_str(&s)
    }
}
