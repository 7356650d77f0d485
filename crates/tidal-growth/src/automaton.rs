//! Attachment rules: which faces a plant may hold on to, and what happens
//! to it when a neighbor changes.

use tidal_blocks::{Block, BlockId, BlockPos, BlockRegistry, Direction, Shape};
use tidal_world::BlockView;

use crate::state::ConnectivityState;

#[derive(Debug, thiserror::Error)]
pub enum AutomatonError {
    #[error("block `{0}` is not registered")]
    UnknownBlock(String),
    #[error("registry has no fluid_block configured")]
    NoFluidBlock,
    #[error("block `{0}` must use the plant shape to grow")]
    NotAPlant(String),
}

/// Outcome of a neighbor-change notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NeighborUpdate {
    /// The block stays, possibly with fewer attachments.
    Keep(ConnectivityState),
    /// Nothing holds the block any more; replace it with the ambient fluid.
    Remove,
    /// The change came from below; the host applies its default support check.
    Deferred,
}

/// Connectivity automaton for one plant block type.
///
/// Borrowing the registry keeps full-face queries and the ambient fluid
/// identity consistent with whatever the host loaded.
#[derive(Clone, Copy, Debug)]
pub struct AlgaeAutomaton<'r> {
    pub(crate) registry: &'r BlockRegistry,
    pub(crate) algae: BlockId,
    pub(crate) fluid: BlockId,
}

impl<'r> AlgaeAutomaton<'r> {
    pub fn new(registry: &'r BlockRegistry, name: &str) -> Result<Self, AutomatonError> {
        let algae = registry
            .id_by_name(name)
            .ok_or_else(|| AutomatonError::UnknownBlock(name.to_string()))?;
        let fluid = registry.fluid_block_id.ok_or(AutomatonError::NoFluidBlock)?;
        match registry.get(algae).map(|ty| &ty.shape) {
            Some(Shape::Plant) => {}
            _ => return Err(AutomatonError::NotAPlant(name.to_string())),
        }
        log::debug!(target: "growth", "automaton for `{}` (id {}), fluid id {}", name, algae, fluid);
        Ok(Self {
            registry,
            algae,
            fluid,
        })
    }

    #[inline]
    pub fn registry(&self) -> &'r BlockRegistry {
        self.registry
    }

    #[inline]
    pub fn block_id(&self) -> BlockId {
        self.algae
    }

    #[inline]
    pub fn is_self(&self, b: Block) -> bool {
        b.id == self.algae
    }

    /// Closed membership test for the surrounding medium.
    #[inline]
    pub fn is_ambient_fluid(&self, b: Block) -> bool {
        b.id == self.fluid
    }

    #[inline]
    pub fn fluid_block(&self) -> Block {
        Block::new(self.fluid, 0)
    }

    pub fn state_of(&self, b: Block) -> Option<ConnectivityState> {
        self.is_self(b)
            .then(|| ConnectivityState::from_block_state(b.state))
    }

    #[inline]
    pub fn block_for(&self, state: ConnectivityState) -> Block {
        Block::new(self.algae, state.to_block_state())
    }

    /// Fluid reported by a block in `state`: waterlogged plants read as water.
    pub fn fluid_state(&self, state: ConnectivityState) -> Option<Block> {
        state.is_waterlogged().then(|| self.fluid_block())
    }

    /// Whether the block at `target` presents a full face back toward a
    /// neighbor that reached it by stepping `dir`.
    #[inline]
    pub fn can_attach_to(&self, view: &impl BlockView, target: BlockPos, dir: Direction) -> bool {
        self.registry
            .is_face_full(view.block(target), dir.opposite())
    }

    /// Support available to a plant at `pos` on side `dir`: a full face
    /// there, or for horizontal sides, the same side held by a plant above.
    pub fn has_attachment(&self, view: &impl BlockView, pos: BlockPos, dir: Direction) -> bool {
        if dir == Direction::Down {
            return false;
        }
        if self.can_attach_to(view, pos.offset(dir), dir) {
            return true;
        }
        if dir.is_vertical() {
            return false;
        }
        self.state_of(view.block(pos.up()))
            .is_some_and(|above| above.has(dir))
    }

    /// Re-tests every set flag. Flags can only be cleared here.
    pub fn resolve_attachments(
        &self,
        state: ConnectivityState,
        view: &impl BlockView,
        pos: BlockPos,
    ) -> ConnectivityState {
        let mut out = state;
        if state.has(Direction::Up) {
            out = out.with(
                Direction::Up,
                self.can_attach_to(view, pos.up(), Direction::Up),
            );
        }
        for d in Direction::HORIZONTAL {
            if state.has(d) {
                out = out.with(d, self.has_attachment(view, pos, d));
            }
        }
        out
    }

    /// A plant in `state` may sit at `pos` only inside the ambient fluid and
    /// only while something still holds it.
    pub fn can_occupy(&self, state: ConnectivityState, view: &impl BlockView, pos: BlockPos) -> bool {
        self.is_ambient_fluid(view.block(pos))
            && self
                .resolve_attachments(state, view, pos)
                .has_any_attachment()
    }

    pub fn on_neighbor_changed(
        &self,
        state: ConnectivityState,
        changed: Direction,
        view: &impl BlockView,
        pos: BlockPos,
    ) -> NeighborUpdate {
        if changed == Direction::Down {
            return NeighborUpdate::Deferred;
        }
        let resolved = self.resolve_attachments(state, view, pos);
        if resolved.has_any_attachment() {
            NeighborUpdate::Keep(resolved)
        } else {
            log::trace!(target: "growth", "{:?} lost every attachment", pos);
            NeighborUpdate::Remove
        }
    }

    /// Block the host should store after `update`; `None` leaves it as is.
    pub fn block_after(&self, current: ConnectivityState, update: NeighborUpdate) -> Option<Block> {
        match update {
            NeighborUpdate::Keep(s) if s == current => None,
            NeighborUpdate::Keep(s) => Some(self.block_for(s)),
            NeighborUpdate::Remove => Some(self.fluid_block()),
            NeighborUpdate::Deferred => None,
        }
    }
}
