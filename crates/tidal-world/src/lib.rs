//! Host world interface and an in-memory reference world.
#![forbid(unsafe_code)]

pub mod store;
pub mod view;

pub use store::{BlockChange, SparseWorld, SparseWorldStats};
pub use view::{BlockView, BlockWriter, HeightBounds, UpdateFlags};
