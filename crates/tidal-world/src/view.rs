use bitflags::bitflags;
use tidal_blocks::{Block, BlockPos};

/// Vertical extent of a world: `min` inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightBounds {
    pub min: i32,
    pub max: i32,
}

impl HeightBounds {
    #[inline]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, y: i32) -> bool {
        y >= self.min && y < self.max
    }
}

bitflags! {
    /// How the host should propagate a block write.
    #[derive(Default)]
    pub struct UpdateFlags: u8 {
        const NOTIFY_NEIGHBORS = 1 << 0;
        const SYNC_CLIENTS = 1 << 1;
    }
}

/// Read-only snapshot of the host world, valid for one evaluation.
///
/// Reads are total: positions outside the height bounds or in unloaded
/// chunks report `Block::AIR`.
pub trait BlockView {
    fn block(&self, pos: BlockPos) -> Block;
    fn is_loaded(&self, pos: BlockPos) -> bool;
    fn height_bounds(&self) -> HeightBounds;
}

/// Single-cell replacement issued to the host.
pub trait BlockWriter {
    fn set_block(&mut self, pos: BlockPos, block: Block, flags: UpdateFlags);
}
