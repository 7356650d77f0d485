use proptest::prelude::*;
use tidal_blocks::{Block, BlockPos, BlockRegistry, Direction};
use tidal_growth::{AlgaeAutomaton, ConnectivityState, Mirror, NeighborUpdate, Rotation, compute_shape};
use tidal_world::{HeightBounds, SparseWorld};

const BLOCKS: &str = r#"
    fluid_block = "water"

    [[blocks]]
    name = "air"
    id = 0
    solid = false
    shape = "none"

    [[blocks]]
    name = "water"
    id = 1
    fluid = true
    shape = "none"

    [[blocks]]
    name = "stone"
    id = 2

    [[blocks]]
    name = "algae"
    id = 3
    solid = false
    shape = "plant"
"#;

fn arb_state() -> impl Strategy<Value = ConnectivityState> {
    (0u8..64).prop_map(ConnectivityState::from_bits)
}

fn arb_rotation() -> impl Strategy<Value = Rotation> {
    prop_oneof![
        Just(Rotation::None),
        Just(Rotation::Clockwise90),
        Just(Rotation::Clockwise180),
        Just(Rotation::CounterClockwise90),
    ]
}

// 3x3x3 neighborhood around the origin: water, stone or algae with any bits
fn arb_cell() -> impl Strategy<Value = Block> {
    prop_oneof![
        Just(Block::new(1, 0)),
        Just(Block::new(2, 0)),
        (0u16..64).prop_map(|s| Block::new(3, s)),
    ]
}

fn neighborhood(cells: &[Block]) -> SparseWorld {
    let mut w = SparseWorld::new(8, 8, 8, HeightBounds::new(-8, 8), Block::new(1, 0));
    w.load_region(BlockPos::new(-8, -8, -8), BlockPos::new(7, 7, 7));
    let positions = BlockPos::iter_box(BlockPos::new(-1, -1, -1), BlockPos::new(1, 1, 1));
    for (pos, b) in positions.zip(cells.iter().copied()) {
        if pos != BlockPos::new(0, 0, 0) {
            w.put(pos, b);
        }
    }
    w
}

proptest! {
    #[test]
    fn shape_depends_only_on_bits(s in arb_state()) {
        let a = compute_shape(s);
        let b = compute_shape(ConnectivityState::from_bits(s.bits()));
        prop_assert!(std::ptr::eq(a, b));
        prop_assert_eq!(a.boxes().len() as u32, s.attachment_count());
        prop_assert_eq!(a, compute_shape(s.with_waterlogged(!s.is_waterlogged())));
    }

    #[test]
    fn four_quarter_turns_are_identity(s in arb_state(), r in arb_rotation()) {
        let turned = (0..4).fold(s, |acc, _| acc.rotated(r));
        prop_assert_eq!(turned, s);
        prop_assert_eq!(s.rotated(r).attachment_count(), s.attachment_count());
        prop_assert_eq!(s.rotated(r).has(Direction::Up), s.has(Direction::Up));
    }

    #[test]
    fn mirroring_twice_is_identity(s in arb_state()) {
        for m in [Mirror::None, Mirror::LeftRight, Mirror::FrontBack] {
            prop_assert_eq!(s.mirrored(m).mirrored(m), s);
        }
    }

    #[test]
    fn resolve_only_clears_flags(
        s in arb_state(),
        cells in proptest::collection::vec(arb_cell(), 27),
    ) {
        let reg = BlockRegistry::from_toml_str(BLOCKS).unwrap();
        let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
        let w = neighborhood(&cells);
        let o = BlockPos::new(0, 0, 0);
        let r = algae.resolve_attachments(s, &w, o);
        prop_assert_eq!(r.bits() & !s.bits(), 0);
        prop_assert_eq!(r.is_waterlogged(), s.is_waterlogged());
        // Idempotent once resolved
        prop_assert_eq!(algae.resolve_attachments(r, &w, o), r);
    }

    #[test]
    fn empty_result_is_always_removed(
        s in arb_state(),
        cells in proptest::collection::vec(arb_cell(), 27),
        changed in proptest::sample::select(Direction::ALL.to_vec()),
    ) {
        let reg = BlockRegistry::from_toml_str(BLOCKS).unwrap();
        let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
        let w = neighborhood(&cells);
        match algae.on_neighbor_changed(s, changed, &w, BlockPos::new(0, 0, 0)) {
            NeighborUpdate::Keep(kept) => prop_assert!(kept.has_any_attachment()),
            NeighborUpdate::Remove => prop_assert!(changed != Direction::Down),
            NeighborUpdate::Deferred => prop_assert_eq!(changed, Direction::Down),
        }
    }
}
