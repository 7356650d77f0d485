//! Scene files: a flooded box, some solid fills and hand-placed blocks.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tidal_blocks::{BlockPos, BlockRegistry, Direction};
use tidal_growth::{AlgaeAutomaton, ConnectivityState};
use tidal_world::{HeightBounds, SparseWorld};

/// Side priority used when a scene places a plant without explicit flags.
pub const PLACEMENT_ORDER: [Direction; 6] = [
    Direction::Up,
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::Down,
];

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("scene names unknown block `{0}`")]
    UnknownBlock(String),
    #[error("`{name}` is not a direction (block at {pos:?})")]
    UnknownDirection { name: String, pos: BlockPos },
    #[error("flags given for `{0}`, which does not grow")]
    FlagsOnStaticBlock(String),
    #[error("nothing to attach to for the plant at {0:?}")]
    Unsupported(BlockPos),
    #[error("scene size must be positive, got {0:?}")]
    BadSize([i32; 3]),
}

#[derive(Deserialize, Debug)]
pub struct SceneConfig {
    pub size: [i32; 3],
    #[serde(default)]
    pub floor: i32,
    // Exclusive top; defaults to floor + size[1]
    #[serde(default)]
    pub ceiling: Option<i32>,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_chunk")]
    pub chunk: i32,
    #[serde(default)]
    pub fills: Vec<FillDef>,
    #[serde(default)]
    pub blocks: Vec<PlaceDef>,
}

fn default_fill() -> String {
    "water".to_string()
}
fn default_chunk() -> i32 {
    16
}

#[derive(Deserialize, Debug, Clone)]
pub struct FillDef {
    pub block: String,
    pub min: [i32; 3],
    pub max: [i32; 3],
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlaceDef {
    pub block: String,
    pub pos: [i32; 3],
    #[serde(default)]
    pub props: HashMap<String, String>,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// A loaded scene world plus the inclusive box it covers.
pub struct Scene {
    pub world: SparseWorld,
    pub min: BlockPos,
    pub max: BlockPos,
    pub chunk: i32,
}

impl SceneConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn bounds(&self) -> HeightBounds {
        HeightBounds::new(self.floor, self.ceiling.unwrap_or(self.floor + self.size[1]))
    }

    pub fn build(&self, reg: &BlockRegistry, plant: &AlgaeAutomaton<'_>) -> Result<Scene, SceneError> {
        if self.size.iter().any(|s| *s <= 0) || self.chunk <= 0 {
            return Err(SceneError::BadSize(self.size));
        }
        let block = |name: &str, props: Option<&HashMap<String, String>>| {
            reg.make_block_by_name(name, props)
                .ok_or_else(|| SceneError::UnknownBlock(name.to_string()))
        };
        let bounds = self.bounds();
        let fill = block(&self.fill, None)?;
        let mut world = SparseWorld::new(self.chunk, self.chunk, self.chunk, bounds, fill);
        let min = BlockPos::new(0, bounds.min, 0);
        let max = BlockPos::new(self.size[0] - 1, bounds.max - 1, self.size[2] - 1);
        world.load_region(min, max);

        for f in &self.fills {
            world.put_box(f.min.into(), f.max.into(), block(&f.block, None)?);
        }

        for p in &self.blocks {
            let pos: BlockPos = p.pos.into();
            let b = block(&p.block, (!p.props.is_empty()).then_some(&p.props))?;
            if !plant.is_self(b) {
                if !p.flags.is_empty() {
                    return Err(SceneError::FlagsOnStaticBlock(p.block.clone()));
                }
                world.put(pos, b);
                continue;
            }
            let state = if p.flags.is_empty() {
                plant
                    .placement_state(&world, pos, &PLACEMENT_ORDER)
                    .ok_or(SceneError::Unsupported(pos))?
            } else {
                flags_state(&p.flags, pos)?
            };
            if !plant.can_occupy(state, &world, pos) {
                log::warn!(target: "sandbox", "plant at {:?} has no valid spot; placing anyway", pos);
            }
            world.put(pos, plant.block_for(state));
        }

        log::info!(
            target: "sandbox",
            "scene {}x{}x{} y={}..{}: {} stored blocks",
            self.size[0],
            self.size[1],
            self.size[2],
            bounds.min,
            bounds.max,
            world.stats().block_entries
        );
        Ok(Scene {
            world,
            min,
            max,
            chunk: self.chunk,
        })
    }
}

fn flags_state(flags: &[String], pos: BlockPos) -> Result<ConnectivityState, SceneError> {
    flags.iter().try_fold(ConnectivityState::default(), |s, name| {
        Direction::from_name(name)
            .map(|d| s.with(d, true))
            .ok_or_else(|| SceneError::UnknownDirection {
                name: name.clone(),
                pos,
            })
    })
}
