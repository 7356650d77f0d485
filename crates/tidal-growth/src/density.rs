//! Local population cap that keeps spread from running away.

use tidal_blocks::BlockPos;
use tidal_world::BlockView;

use crate::automaton::AlgaeAutomaton;

/// Horizontal reach of the scan, in blocks either side.
pub const DENSITY_RADIUS_XZ: i32 = 4;
/// Vertical reach of the scan, in blocks either side.
pub const DENSITY_RADIUS_Y: i32 = 1;
/// Same-type blocks (the origin included) at which growth stops.
pub const DENSITY_CAP: usize = 5;

impl AlgaeAutomaton<'_> {
    /// True once `DENSITY_CAP` plants are found in the window around `pos`.
    /// The scan stops as soon as the cap is reached.
    pub fn is_overcrowded(&self, view: &impl BlockView, pos: BlockPos) -> bool {
        let min = pos.add(-DENSITY_RADIUS_XZ, -DENSITY_RADIUS_Y, -DENSITY_RADIUS_XZ);
        let max = pos.add(DENSITY_RADIUS_XZ, DENSITY_RADIUS_Y, DENSITY_RADIUS_XZ);
        BlockPos::iter_box(min, max)
            .filter(|p| self.is_self(view.block(*p)))
            .nth(DENSITY_CAP - 1)
            .is_some()
    }

    /// Plants in the scan window, without the early exit.
    pub fn population_near(&self, view: &impl BlockView, pos: BlockPos) -> usize {
        let min = pos.add(-DENSITY_RADIUS_XZ, -DENSITY_RADIUS_Y, -DENSITY_RADIUS_XZ);
        let max = pos.add(DENSITY_RADIUS_XZ, DENSITY_RADIUS_Y, DENSITY_RADIUS_XZ);
        BlockPos::iter_box(min, max)
            .filter(|p| self.is_self(view.block(*p)))
            .count()
    }
}
