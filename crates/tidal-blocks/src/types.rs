use serde::{Deserialize, Serialize};

// Compact voxel representation used at runtime
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

pub type BlockId = u16;
pub type BlockState = u16;

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId, state: BlockState) -> Self {
        Self { id, state }
    }

    #[inline]
    pub fn with_state(self, state: BlockState) -> Self {
        Self { state, ..self }
    }
}

// Collision shape families; full-face queries are derived from these per state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Cube,
    Slab { half_from: String },
    Stairs { facing_from: String, half_from: String },
    // Thin, non-colliding growth (algae, kelp, vines)
    Plant,
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundGroup {
    Stone,
    Wood,
    Grass,
    Gravel,
    Sand,
    WetGrass,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Sword,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub hardness: f32,
    pub resistance: f32,
}

impl Default for Strength {
    fn default() -> Self {
        Self {
            hardness: 0.0,
            resistance: 0.0,
        }
    }
}

/// Tool requirement for dropping a block when mined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harvest {
    pub tool: ToolKind,
    #[serde(default)]
    pub level: u8,
}
