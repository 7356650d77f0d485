//! Minimal geometry types for block outlines (unit-cube local space).
#![forbid(unsafe_code)]

use core::ops::{Add, Div, Mul, Sub};

/// Number of "pixels" along one block edge; block models are authored on this grid.
pub const PIXELS_PER_BLOCK: f32 = 16.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn min(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline]
    pub fn max(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const UNIT: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ONE,
    };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box given in 1/16 block units, e.g. `from_pixels(0, 15, 0, 16, 16, 16)` is the top slab.
    #[inline]
    pub fn from_pixels(x0: f32, y0: f32, z0: f32, x1: f32, y1: f32, z1: f32) -> Self {
        Self::new(
            Vec3::new(x0, y0, z0) / PIXELS_PER_BLOCK,
            Vec3::new(x1, y1, z1) / PIXELS_PER_BLOCK,
        )
    }

    #[inline]
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        let e = self.extents();
        e.x * e.y * e.z
    }

    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    #[inline]
    pub fn translated(&self, t: Vec3) -> Aabb {
        Aabb::new(self.min + t, self.max + t)
    }

    /// Smallest box enclosing both.
    #[inline]
    pub fn enclose(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// Union of axis-aligned boxes, used for outline/selection shapes.
///
/// Boxes are kept as given; overlapping members are not merged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelShape {
    boxes: Vec<Aabb>,
}

impl VoxelShape {
    pub const fn empty() -> Self {
        Self { boxes: Vec::new() }
    }

    pub fn from_box(b: Aabb) -> Self {
        Self { boxes: vec![b] }
    }

    pub fn union(mut self, b: Aabb) -> Self {
        self.boxes.push(b);
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    #[inline]
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.boxes.split_first()?;
        Some(rest.iter().fold(*first, |acc, b| acc.enclose(b)))
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.boxes.iter().any(|b| b.contains_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Fold arbitrary floats (inf, NaN, huge) into a sane range
    fn tame(v: Vec3) -> Vec3 {
        let f = |c: f32| if c.is_finite() { c % 1000.0 } else { 0.0 };
        Vec3::new(f(v.x), f(v.y), f(v.z))
    }

    proptest! {
        #[test]
        fn enclose_contains_both_corners(a in any::<Aabb>(), b in any::<Aabb>()) {
            let ordered = |x: Aabb| {
                let (p, q) = (tame(x.min), tame(x.max));
                Aabb::new(p.min(q), p.max(q))
            };
            let (a, b) = (ordered(a), ordered(b));
            let e = a.enclose(&b);
            for p in [a.min, a.max, b.min, b.max] {
                prop_assert!(e.contains_point(p));
            }
        }

        #[test]
        fn shape_contains_its_box_corners(v in any::<Vec3>()) {
            let lo = tame(v);
            let b = Aabb::new(lo, lo + Vec3::ONE);
            let s = VoxelShape::empty().union(b);
            prop_assert!(s.contains_point(lo));
            prop_assert_eq!(s.bounds(), Some(b));
        }
    }

    #[test]
    fn shape_bounds_enclose_every_box() {
        let s = VoxelShape::from_box(Aabb::from_pixels(0.0, 15.0, 0.0, 16.0, 16.0, 16.0))
            .union(Aabb::from_pixels(0.0, 0.0, 0.0, 1.0, 16.0, 16.0));
        assert_eq!(s.bounds(), Some(Aabb::UNIT));
        assert_eq!(VoxelShape::empty().bounds(), None);
    }
}
