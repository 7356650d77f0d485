//! One stochastic growth step per random tick.
//!
//! Every step reads a snapshot of the neighborhood and yields at most one
//! single-cell write. Probabilities and branch order are tuned values and
//! are kept exactly as they are.

use tidal_blocks::{BlockPos, Direction};
use tidal_world::{BlockView, BlockWriter, UpdateFlags};

use crate::automaton::AlgaeAutomaton;
use crate::entropy::Entropy;
use crate::state::ConnectivityState;

/// Chance that a spread with no perpendicular support tries the ceiling.
pub const CEILING_CHANCE: f32 = 0.05;
/// A random tick does anything only one time in this many.
pub const TICK_GATE: u32 = 4;

/// Which rule produced a write.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GrowthKind {
    /// Added a side to the ticking block itself.
    Densify,
    /// New block beside the origin, holding a perpendicular wall.
    Spread,
    /// New block around an outside corner.
    CornerWrap,
    /// New block beside the origin hanging from a ceiling.
    Ceiling,
    /// Ticking block took hold of the face above it.
    Anchor,
    /// New block above, carrying some of the origin's sides.
    Climb,
    /// Sides copied into the cell below.
    Trail,
}

/// A single cell replacement produced by a growth step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GrowthWrite {
    pub pos: BlockPos,
    pub state: ConnectivityState,
    pub kind: GrowthKind,
}

impl GrowthWrite {
    pub fn apply(&self, automaton: &AlgaeAutomaton<'_>, writer: &mut impl BlockWriter) {
        writer.set_block(
            self.pos,
            automaton.block_for(self.state),
            UpdateFlags::SYNC_CLIENTS,
        );
    }
}

impl AlgaeAutomaton<'_> {
    /// Random-tick entry point: a 1-in-4 gate, then one growth step toward a
    /// uniformly random direction.
    pub fn random_tick(
        &self,
        state: ConnectivityState,
        pos: BlockPos,
        view: &impl BlockView,
        rng: &mut impl Entropy,
    ) -> Option<GrowthWrite> {
        if !rng.one_in(TICK_GATE) || !view.is_loaded(pos) {
            return None;
        }
        self.step_growth(state, pos, view, rng)
    }

    pub fn step_growth(
        &self,
        state: ConnectivityState,
        pos: BlockPos,
        view: &impl BlockView,
        rng: &mut impl Entropy,
    ) -> Option<GrowthWrite> {
        let dir = rng.next_direction();
        self.step_growth_toward(state, pos, dir, view, rng)
    }

    /// Growth step with the direction already sampled.
    pub fn step_growth_toward(
        &self,
        state: ConnectivityState,
        pos: BlockPos,
        dir: Direction,
        view: &impl BlockView,
        rng: &mut impl Entropy,
    ) -> Option<GrowthWrite> {
        if !view.is_loaded(pos) {
            return None;
        }
        if self.is_overcrowded(view, pos) {
            log::trace!(target: "growth", "{:?} overcrowded", pos);
            return None;
        }
        let bounds = view.height_bounds();
        let write = if dir.is_horizontal() && !state.has(dir) {
            self.spread(state, pos, dir, view, rng)
        } else {
            let up = if dir == Direction::Up && pos.y < bounds.max - 1 {
                self.grow_up(state, pos, view, rng)
            } else {
                None
            };
            match up {
                Some(step) => step,
                None if pos.y > bounds.min => self.trail_down(state, pos, view, rng),
                None => None,
            }
        };
        if let Some(w) = &write {
            log::trace!(target: "growth", "{:?} from {:?}: {:?} at {:?}", w.kind, pos, w.state, w.pos);
        }
        write
    }

    fn spread(
        &self,
        state: ConnectivityState,
        pos: BlockPos,
        dir: Direction,
        view: &impl BlockView,
        rng: &mut impl Entropy,
    ) -> Option<GrowthWrite> {
        let target = pos.offset(dir);
        if !self.is_ambient_fluid(view.block(target)) {
            return self.can_attach_to(view, target, dir).then(|| GrowthWrite {
                pos,
                state: state.with(dir, true),
                kind: GrowthKind::Densify,
            });
        }

        let fresh = |d: Direction| ConnectivityState::default().with(d, true);
        let cw = dir.rotate_y_cw();
        let ccw = dir.rotate_y_ccw();

        for side in [cw, ccw] {
            if state.has(side) && self.can_attach_to(view, target.offset(side), side) {
                return Some(GrowthWrite {
                    pos: target,
                    state: fresh(side),
                    kind: GrowthKind::Spread,
                });
            }
        }

        let back = dir.opposite();
        for side in [cw, ccw] {
            let corner = target.offset(side);
            if state.has(side)
                && self.is_ambient_fluid(view.block(corner))
                && self.can_attach_to(view, pos.offset(side), back)
            {
                return Some(GrowthWrite {
                    pos: corner,
                    state: fresh(back),
                    kind: GrowthKind::CornerWrap,
                });
            }
        }

        (rng.next_f32() < CEILING_CHANCE && self.can_attach_to(view, target.up(), Direction::Up))
            .then(|| GrowthWrite {
                pos: target,
                state: fresh(Direction::Up),
                kind: GrowthKind::Ceiling,
            })
    }

    // Outer `None` falls through to the trail rule; `Some(None)` ends the step.
    fn grow_up(
        &self,
        state: ConnectivityState,
        pos: BlockPos,
        view: &impl BlockView,
        rng: &mut impl Entropy,
    ) -> Option<Option<GrowthWrite>> {
        if self.has_attachment(view, pos, Direction::Up) {
            return Some((!state.has(Direction::Up)).then(|| GrowthWrite {
                pos,
                state: state.with(Direction::Up, true),
                kind: GrowthKind::Anchor,
            }));
        }
        let above = pos.up();
        if !self.is_ambient_fluid(view.block(above)) {
            return None;
        }
        let mut carried = state.horizontal_only();
        for d in Direction::HORIZONTAL {
            if rng.next_bool() || !self.can_attach_to(view, above.offset(d), d) {
                carried = carried.with(d, false);
            }
        }
        Some(carried.has_horizontal().then_some(GrowthWrite {
            pos: above,
            state: carried,
            kind: GrowthKind::Climb,
        }))
    }

    fn trail_down(
        &self,
        state: ConnectivityState,
        pos: BlockPos,
        view: &impl BlockView,
        rng: &mut impl Entropy,
    ) -> Option<GrowthWrite> {
        let below = pos.down();
        let existing = view.block(below);
        let base = if self.is_ambient_fluid(existing) {
            ConnectivityState::default()
        } else {
            self.state_of(existing)?
        };
        let mut derived = base;
        for d in Direction::HORIZONTAL {
            if rng.next_bool() && state.has(d) {
                derived = derived.with(d, true);
            }
        }
        (derived != base && derived.has_horizontal()).then_some(GrowthWrite {
            pos: below,
            state: derived,
            kind: GrowthKind::Trail,
        })
    }
}
