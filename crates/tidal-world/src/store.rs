//! Sparse, chunk-keyed block store with change tracking.

use hashbrown::{HashMap, HashSet};
use tidal_blocks::{Block, BlockPos};

use crate::view::{BlockView, BlockWriter, HeightBounds, UpdateFlags};

#[derive(Default, Debug, Clone, Copy)]
pub struct SparseWorldStats {
    pub chunk_entries: usize,
    pub block_entries: usize,
    pub loaded_chunks: usize,
    pub pending_changes: usize,
}

/// A write recorded by [`SparseWorld`], in the order it was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockChange {
    pub pos: BlockPos,
    pub from: Block,
    pub to: Block,
    pub flags: UpdateFlags,
    pub stamp: u64,
}

/// Chunk-aware sparse world: cells never written hold `fill`.
///
/// Chunks must be marked loaded before their cells can be read or written;
/// unloaded reads report `Block::AIR` and unloaded writes are dropped.
pub struct SparseWorld {
    sx: i32,
    sy: i32,
    sz: i32,
    bounds: HeightBounds,
    fill: Block,
    // Map per-chunk: key=(cx,cy,cz) -> map of world position -> Block
    inner: HashMap<(i32, i32, i32), HashMap<BlockPos, Block>>,
    loaded: HashSet<(i32, i32, i32)>,
    changes: Vec<BlockChange>,
    counter: u64,
}

impl SparseWorld {
    pub fn new(sx: i32, sy: i32, sz: i32, bounds: HeightBounds, fill: Block) -> Self {
        Self {
            sx,
            sy,
            sz,
            bounds,
            fill,
            inner: HashMap::new(),
            loaded: HashSet::new(),
            changes: Vec::new(),
            counter: 0,
        }
    }

    pub fn stats(&self) -> SparseWorldStats {
        SparseWorldStats {
            chunk_entries: self.inner.len(),
            block_entries: self.inner.values().map(|m| m.len()).sum(),
            loaded_chunks: self.loaded.len(),
            pending_changes: self.changes.len(),
        }
    }

    #[inline]
    fn chunk_key(&self, pos: BlockPos) -> (i32, i32, i32) {
        (
            pos.x.div_euclid(self.sx),
            pos.y.div_euclid(self.sy),
            pos.z.div_euclid(self.sz),
        )
    }

    #[inline]
    pub fn fill(&self) -> Block {
        self.fill
    }

    /// Mark every chunk overlapping the inclusive box `min..=max` as loaded.
    pub fn load_region(&mut self, min: BlockPos, max: BlockPos) {
        let (c0x, c0y, c0z) = self.chunk_key(min);
        let (c1x, c1y, c1z) = self.chunk_key(max);
        for cy in c0y..=c1y {
            for cz in c0z..=c1z {
                for cx in c0x..=c1x {
                    self.loaded.insert((cx, cy, cz));
                }
            }
        }
    }

    pub fn unload_chunk_at(&mut self, pos: BlockPos) {
        let k = self.chunk_key(pos);
        self.loaded.remove(&k);
    }

    /// Write without journaling; for scene setup.
    pub fn put(&mut self, pos: BlockPos, b: Block) {
        if !self.bounds.contains(pos.y) {
            return;
        }
        let k = self.chunk_key(pos);
        let entry = self.inner.entry(k).or_default();
        if b == self.fill {
            entry.remove(&pos);
        } else {
            entry.insert(pos, b);
        }
    }

    /// Fill the inclusive box `min..=max` with `b` (setup only, no journal).
    pub fn put_box(&mut self, min: BlockPos, max: BlockPos, b: Block) {
        for pos in BlockPos::iter_box(min, max) {
            self.put(pos, b);
        }
    }

    /// Positions holding block id `id`, across all stored chunks.
    pub fn positions_of(&self, id: u16) -> Vec<BlockPos> {
        let mut out: Vec<BlockPos> = self
            .inner
            .values()
            .flat_map(|m| m.iter().filter(|(_, b)| b.id == id).map(|(p, _)| *p))
            .collect();
        out.sort_by_key(|p| (p.y, p.z, p.x));
        out
    }

    pub fn count_of(&self, id: u16) -> usize {
        self.inner
            .values()
            .map(|m| m.values().filter(|b| b.id == id).count())
            .sum()
    }

    /// Take the journal of applied writes, oldest first.
    pub fn drain_changes(&mut self) -> Vec<BlockChange> {
        std::mem::take(&mut self.changes)
    }

    #[inline]
    pub fn last_stamp(&self) -> u64 {
        self.counter
    }
}

impl BlockView for SparseWorld {
    fn block(&self, pos: BlockPos) -> Block {
        if !self.bounds.contains(pos.y) || !self.is_loaded(pos) {
            return Block::AIR;
        }
        let k = self.chunk_key(pos);
        self.inner
            .get(&k)
            .and_then(|m| m.get(&pos).copied())
            .unwrap_or(self.fill)
    }

    fn is_loaded(&self, pos: BlockPos) -> bool {
        self.loaded.contains(&self.chunk_key(pos))
    }

    fn height_bounds(&self) -> HeightBounds {
        self.bounds
    }
}

impl BlockWriter for SparseWorld {
    fn set_block(&mut self, pos: BlockPos, block: Block, flags: UpdateFlags) {
        if !self.bounds.contains(pos.y) || !self.is_loaded(pos) {
            log::debug!(target: "world", "dropped write to unloaded {:?}", pos);
            return;
        }
        let from = self.block(pos);
        self.put(pos, block);
        self.counter = self.counter.wrapping_add(1).max(1);
        self.changes.push(BlockChange {
            pos,
            from,
            to: block,
            flags,
            stamp: self.counter,
        });
    }
}
