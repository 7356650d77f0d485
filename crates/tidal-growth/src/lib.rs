//! Connectivity and growth rules for submerged, face-attached plants (algae).
//!
//! The automaton never owns world state: every operation reads through a
//! [`BlockView`](tidal_world::BlockView) snapshot and returns the write the
//! host should apply, if any.
#![forbid(unsafe_code)]

pub mod automaton;
pub mod density;
pub mod entropy;
pub mod growth;
pub mod placement;
pub mod shape;
pub mod state;

pub use automaton::{AlgaeAutomaton, AutomatonError, NeighborUpdate};
pub use entropy::{Entropy, ScriptedEntropy};
pub use growth::{GrowthKind, GrowthWrite};
pub use shape::compute_shape;
pub use state::{ConnectivityState, Mirror, Rotation};
