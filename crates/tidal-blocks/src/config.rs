use serde::Deserialize;
use std::collections::HashMap;

use crate::types::{Harvest, SoundGroup, Strength};

// Top-level blocks config file
#[derive(Deserialize, Debug)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    // Optional name of a block to use as the default unknown/fallback block
    // when a requested block is unavailable. If absent or not found, fallbacks
    // will use `air`.
    #[serde(default)]
    pub unknown_block: Option<String>,
    // Block that fills cells vacated by submerged growth (usually `water`)
    #[serde(default)]
    pub fluid_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub fluid: Option<bool>,

    #[serde(default)]
    pub shape: Option<ShapeConfig>,

    #[serde(default)]
    pub state_schema: Option<HashMap<String, Vec<String>>>,

    // Host-facing settings, passed through verbatim
    #[serde(default)]
    pub strength: Option<Strength>,
    #[serde(default)]
    pub sound: Option<SoundGroup>,
    #[serde(default)]
    pub requires_tool: Option<bool>,
    #[serde(default)]
    pub harvest: Option<Harvest>,
    #[serde(default)]
    pub ticks_randomly: Option<bool>,
    #[serde(default)]
    pub opacity: Option<u8>,
}

// Shape config supports either a simple string ("cube") or a detailed table
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ShapeConfig {
    Simple(String),
    Detailed(ShapeDetailed),
}

#[derive(Deserialize, Debug, Clone)]
pub struct ShapeDetailed {
    pub kind: String,
    #[serde(default)]
    pub half: Option<PropertyFrom>,
    #[serde(default)]
    pub facing: Option<PropertyFrom>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PropertyFrom {
    pub from: String,
}
