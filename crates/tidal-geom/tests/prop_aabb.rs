use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use tidal_geom::{Aabb, Vec3, VoxelShape};

fn approx(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e3)
}
fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}
// Ordered boxes (min <= max on every axis)
fn arb_aabb() -> impl Strategy<Value = Aabb> {
    (arb_vec3(), arb_vec3())
        .prop_map(|(a, b)| Aabb::new(a.min(b), a.max(b)))
}

#[test]
fn from_pixels_top_slab() {
    let top = Aabb::from_pixels(0.0, 15.0, 0.0, 16.0, 16.0, 16.0);
    assert!(vapprox(top.min, Vec3::new(0.0, 0.9375, 0.0), 1e-6));
    assert!(vapprox(top.max, Vec3::ONE, 1e-6));
    assert!(approx(top.volume(), 1.0 / 16.0, 1e-6));
}

#[test]
fn empty_shape_has_no_bounds() {
    let s = VoxelShape::empty();
    assert!(s.is_empty());
    assert_eq!(s.bounds(), None);
    assert!(!s.contains_point(Vec3::new(0.5, 0.5, 0.5)));
}

proptest! {
    // Enclosing box contains both corners of both inputs
    #[test]
    fn enclose_contains_inputs(a in arb_aabb(), b in arb_aabb()) {
        let e = a.enclose(&b);
        prop_assert!(e.contains_point(a.min) && e.contains_point(a.max));
        prop_assert!(e.contains_point(b.min) && e.contains_point(b.max));
    }

    // Enclose is commutative
    #[test]
    fn enclose_commutative(a in arb_aabb(), b in arb_aabb()) {
        prop_assert_eq!(a.enclose(&b), b.enclose(&a));
    }

    // Translation keeps extents
    #[test]
    fn translate_keeps_extents(a in arb_aabb(), t in arb_vec3()) {
        let b = a.translated(t);
        prop_assert!(vapprox(b.extents(), a.extents(), 1e-2));
    }

    // Shape bounds enclose every member box
    #[test]
    fn shape_bounds_enclose_members(boxes in proptest::collection::vec(arb_aabb(), 1..6)) {
        let shape = boxes.iter().fold(VoxelShape::empty(), |s, b| s.union(*b));
        let bounds = shape.bounds().unwrap();
        for b in shape.boxes() {
            prop_assert!(bounds.contains_point(b.min));
            prop_assert!(bounds.contains_point(b.max));
        }
    }
}
