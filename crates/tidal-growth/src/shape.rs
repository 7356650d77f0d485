//! Outline shapes, one thin slab per attached face.

use once_cell::sync::Lazy;
use tidal_blocks::Direction;
use tidal_geom::{Aabb, VoxelShape};

use crate::state::ConnectivityState;

// Built once; indexed by the raw state bits.
static SHAPES: Lazy<Vec<VoxelShape>> = Lazy::new(|| {
    (0..ConnectivityState::COUNT)
        .map(|bits| shape_for(ConnectivityState::from_bits(bits as u8)))
        .collect()
});

fn face_slab(dir: Direction) -> Aabb {
    match dir {
        Direction::Up => Aabb::from_pixels(0.0, 15.0, 0.0, 16.0, 16.0, 16.0),
        Direction::North => Aabb::from_pixels(0.0, 0.0, 0.0, 16.0, 16.0, 1.0),
        Direction::South => Aabb::from_pixels(0.0, 0.0, 15.0, 16.0, 16.0, 16.0),
        Direction::West => Aabb::from_pixels(0.0, 0.0, 0.0, 1.0, 16.0, 16.0),
        Direction::East => Aabb::from_pixels(15.0, 0.0, 0.0, 16.0, 16.0, 16.0),
        Direction::Down => Aabb::from_pixels(0.0, 0.0, 0.0, 16.0, 1.0, 16.0),
    }
}

fn shape_for(state: ConnectivityState) -> VoxelShape {
    state
        .attached()
        .fold(VoxelShape::empty(), |shape, d| shape.union(face_slab(d)))
}

/// Outline of `state`; depends only on the attachment bits.
#[inline]
pub fn compute_shape(state: ConnectivityState) -> &'static VoxelShape {
    &SHAPES[state.bits() as usize]
}
