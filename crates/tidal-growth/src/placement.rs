use tidal_blocks::{Block, BlockPos, Direction};
use tidal_world::BlockView;

use crate::automaton::AlgaeAutomaton;
use crate::state::ConnectivityState;

impl AlgaeAutomaton<'_> {
    /// Whether a placement may target a cell already holding `existing`.
    /// Plants accept merges until all five sides are taken.
    pub fn can_replace(&self, existing: Block) -> bool {
        match self.state_of(existing) {
            Some(s) => !s.is_fully_attached(),
            None => self.is_ambient_fluid(existing),
        }
    }

    /// State to store when placing at `pos`, trying sides in `order`.
    ///
    /// An existing plant gains the first supported side it lacks, or stays
    /// unchanged when none qualifies. An empty cell with no supported side
    /// rejects the placement.
    pub fn placement_state(
        &self,
        view: &impl BlockView,
        pos: BlockPos,
        order: &[Direction],
    ) -> Option<ConnectivityState> {
        let existing = self.state_of(view.block(pos));
        let base = existing.unwrap_or_default();
        order
            .iter()
            .copied()
            .filter(|d| *d != Direction::Down)
            .find(|d| !base.has(*d) && self.has_attachment(view, pos, *d))
            .map(|d| base.with(d, true))
            .or(existing)
    }
}
