use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig, ShapeConfig};
use super::direction::{Direction, FaceMask};
use super::items::ToolDef;
use super::types::{Block, BlockId, BlockState, Harvest, Shape, SoundGroup, Strength};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("block `{0}` is defined more than once")]
    DuplicateName(String),
    #[error("block id {id} is claimed by both `{first}` and `{second}`")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },
    #[error("`{field}` names unknown block `{name}`")]
    UnknownBlock { field: &'static str, name: String },
}

pub(crate) fn read_config(path: &Path) -> Result<String, RegistryError> {
    fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
    pub fluid_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).filter(|ty| !ty.name.is_empty())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let blocks_toml = read_config(blocks_path.as_ref())?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            if reg.by_name.contains_key(&def.name) {
                return Err(RegistryError::DuplicateName(def.name));
            }
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            if let Some(prev) = reg.get(id) {
                return Err(RegistryError::DuplicateId {
                    id,
                    first: prev.name.clone(),
                    second: def.name,
                });
            }
            let ty = BlockType::compile(id, def);
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.by_name.insert(ty.name.clone(), id);
            reg.blocks[id as usize] = ty;
        }

        if let Some(name) = cfg.unknown_block {
            reg.unknown_block_id = Some(reg.id_by_name(&name).ok_or(
                RegistryError::UnknownBlock {
                    field: "unknown_block",
                    name,
                },
            )?);
        }
        if let Some(name) = cfg.fluid_block {
            let id = reg
                .id_by_name(&name)
                .ok_or(RegistryError::UnknownBlock {
                    field: "fluid_block",
                    name: name.clone(),
                })?;
            if !reg.blocks[id as usize].fluid {
                log::warn!(target: "registry", "fluid_block `{}` is not marked fluid", name);
            }
            reg.fluid_block_id = Some(id);
        }
        log::debug!(
            target: "registry",
            "compiled {} block types (fluid={:?}, unknown={:?})",
            reg.by_name.len(),
            reg.fluid_block_id,
            reg.unknown_block_id
        );
        Ok(reg)
    }

    /// Fallback block for unresolvable names; `air` when none is configured.
    pub fn unknown_block(&self) -> Block {
        self.unknown_block_id
            .map(|id| Block::new(id, 0))
            .unwrap_or(Block::AIR)
    }

    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name)?;
        let state = if let Some(p) = props {
            self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0)
        } else {
            0
        };
        Some(Block { id, state })
    }

    /// Faces of `b` that are full, collidable squares. Unknown ids have none.
    #[inline]
    pub fn full_faces(&self, b: Block) -> FaceMask {
        self.get(b.id)
            .map(|ty| ty.full_faces_cached(b.state))
            .unwrap_or_else(FaceMask::empty)
    }

    #[inline]
    pub fn is_face_full(&self, b: Block, face: Direction) -> bool {
        self.full_faces(b).has(face)
    }

    #[inline]
    pub fn is_fluid(&self, b: Block) -> bool {
        self.get(b.id).map(|ty| ty.fluid).unwrap_or(false)
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub fluid: bool,
    pub shape: Shape,
    pub strength: Strength,
    pub sound: SoundGroup,
    pub requires_tool: bool,
    pub harvest: Option<Harvest>,
    pub ticks_randomly: bool,
    pub opacity: u8,
    // Precomputed full-face mask per state (6 bits in Direction order)
    pub pre_full_faces: Vec<FaceMask>,
    pub state_schema: HashMap<String, Vec<String>>, // property name -> allowed values
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            fluid: false,
            shape: Shape::None,
            strength: Strength::default(),
            sound: SoundGroup::Stone,
            requires_tool: false,
            harvest: None,
            ticks_randomly: false,
            opacity: 0,
            pre_full_faces: vec![FaceMask::empty()],
            state_schema: HashMap::new(),
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }

    fn compile(id: BlockId, def: BlockDef) -> Self {
        let fluid = def.fluid.unwrap_or(false);
        let solid = def.solid.unwrap_or(!fluid);
        let shape = compile_shape(def.shape);
        let state_schema = def.state_schema.unwrap_or_default();
        let (state_fields, prop_index) = compute_state_layout(&state_schema);
        let mut ty = BlockType {
            id,
            name: def.name,
            solid,
            fluid,
            opacity: def.opacity.unwrap_or(if solid { 255 } else { 0 }),
            shape,
            strength: def.strength.unwrap_or_default(),
            sound: def.sound.unwrap_or(SoundGroup::Stone),
            requires_tool: def.requires_tool.unwrap_or(false),
            harvest: def.harvest,
            ticks_randomly: def.ticks_randomly.unwrap_or(false),
            pre_full_faces: Vec::new(),
            state_schema,
            state_fields,
            prop_index,
        };

        let total_bits: u32 = ty.state_fields.iter().map(|f| f.bits).sum();
        let states_len: usize = if total_bits == 0 {
            1
        } else {
            1usize << total_bits.min(16)
        };
        ty.pre_full_faces = (0..states_len)
            .map(|s| ty.full_faces_for(s as BlockState))
            .collect();
        ty
    }

    fn full_faces_for(&self, state: BlockState) -> FaceMask {
        if !self.solid {
            return FaceMask::empty();
        }
        match &self.shape {
            Shape::Cube => FaceMask::all(),
            Shape::Slab { half_from } => {
                if self.state_prop_is_value(state, half_from, "top") {
                    FaceMask::UP
                } else {
                    FaceMask::DOWN
                }
            }
            Shape::Stairs {
                facing_from,
                half_from,
            } => {
                let half = if self.state_prop_is_value(state, half_from, "top") {
                    FaceMask::UP
                } else {
                    FaceMask::DOWN
                };
                let facing = self
                    .state_prop_value(state, facing_from)
                    .and_then(Direction::from_name)
                    .filter(|d| d.is_horizontal())
                    .unwrap_or(Direction::North);
                half | facing.face_bit()
            }
            Shape::Plant | Shape::None => FaceMask::empty(),
        }
    }

    #[inline]
    pub fn full_faces_cached(&self, state: BlockState) -> FaceMask {
        let len = self.pre_full_faces.len();
        self.pre_full_faces[state as usize & (len - 1)]
    }

    pub fn is_solid(&self, _state: BlockState) -> bool {
        self.solid
    }

    pub fn debug_name(&self) -> &str {
        &self.name
    }

    /// Whether mining this block with `tool` yields a drop.
    pub fn can_harvest_with(&self, tool: Option<&ToolDef>) -> bool {
        if !self.requires_tool {
            return true;
        }
        match (self.harvest, tool) {
            (Some(h), Some(t)) => t.kind == h.tool && t.level >= h.level,
            // Requires some tool but does not care which
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let mask: u32 = if f.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << f.bits) - 1
        };
        let idx: usize = (((state as u32) >> f.offset) & mask) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    pub fn pack_state(&self, props: &HashMap<String, String>) -> BlockState {
        if self.state_fields.is_empty() {
            return 0;
        }
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & ((1u32 << f.bits) - 1)) << f.offset;
        }
        acc as BlockState
    }
}

fn compile_shape(shape: Option<ShapeConfig>) -> Shape {
    use super::config::ShapeDetailed;
    let (kind, half, facing) = match shape.unwrap_or(ShapeConfig::Simple("cube".into())) {
        ShapeConfig::Simple(k) => (k, None, None),
        ShapeConfig::Detailed(ShapeDetailed { kind, half, facing }) => {
            (kind, half.map(|p| p.from), facing.map(|p| p.from))
        }
    };
    match kind.as_str() {
        "cube" => Shape::Cube,
        "slab" => Shape::Slab {
            half_from: half.unwrap_or_else(|| "half".to_string()),
        },
        "stairs" => Shape::Stairs {
            facing_from: facing.unwrap_or_else(|| "facing".to_string()),
            half_from: half.unwrap_or_else(|| "half".to_string()),
        },
        "plant" => Shape::Plant,
        _ => Shape::None,
    }
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let mut index: HashMap<String, usize> = HashMap::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        index.insert(f.name.clone(), i);
    }
    (fields, index)
}
