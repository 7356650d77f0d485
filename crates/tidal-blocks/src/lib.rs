//! Block identities, directions, and the declarative block/tool registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod direction;
pub mod items;
pub mod pos;
pub mod registry;
pub mod types;

pub use direction::{Direction, FaceMask};
pub use items::{ToolCatalog, ToolDef};
pub use pos::BlockPos;
pub use registry::{BlockRegistry, BlockType, RegistryError};
pub use types::{Block, BlockId, BlockState, Shape};
