use rand::SeedableRng;
use rand::rngs::StdRng;
use tidal_blocks::{Block, BlockPos, BlockRegistry, Direction};
use tidal_growth::{AlgaeAutomaton, ConnectivityState, GrowthKind, NeighborUpdate, ScriptedEntropy};
use tidal_world::{BlockView, HeightBounds, SparseWorld};

const BLOCKS: &str = r#"
    fluid_block = "water"

    [[blocks]]
    name = "air"
    id = 0
    solid = false
    shape = "none"

    [[blocks]]
    name = "water"
    fluid = true
    shape = "none"

    [[blocks]]
    name = "stone"

    [[blocks]]
    name = "algae"
    solid = false
    shape = "plant"
    ticks_randomly = true
    opacity = 255
"#;

struct Reef {
    reg: BlockRegistry,
    world: SparseWorld,
    stone: Block,
}

impl Reef {
    fn new() -> Self {
        let reg = BlockRegistry::from_toml_str(BLOCKS).unwrap();
        let water = reg.make_block_by_name("water", None).unwrap();
        let stone = reg.make_block_by_name("stone", None).unwrap();
        let mut world = SparseWorld::new(16, 16, 16, HeightBounds::new(0, 32), water);
        world.load_region(BlockPos::new(-16, 0, -16), BlockPos::new(31, 31, 31));
        Self { reg, world, stone }
    }
}

fn st(dirs: &[Direction]) -> ConnectivityState {
    dirs.iter()
        .fold(ConnectivityState::default(), |s, d| s.with(*d, true))
}

#[test]
fn spread_reaches_solid_block_two_cells_east() {
    let Reef {
        reg,
        mut world,
        stone,
    } = Reef::new();
    let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
    let origin = BlockPos::new(0, 4, 0);
    let next = BlockPos::new(1, 4, 0);
    // Ceiling over both cells, solid block facing west at x=2
    world.put_box(BlockPos::new(0, 5, 0), BlockPos::new(1, 5, 0), stone);
    world.put(BlockPos::new(2, 4, 0), stone);
    let s = st(&[Direction::Up]);
    world.put(origin, algae.block_for(s));
    let mut rng = ScriptedEntropy::new().floats([0.0]);
    let w = algae
        .step_growth_toward(s, origin, Direction::East, &world, &mut rng)
        .unwrap();
    assert_eq!((w.kind, w.pos), (GrowthKind::Ceiling, next));
    w.apply(&algae, &mut world);

    let grown = algae.state_of(world.block(next)).unwrap();
    let w = algae
        .step_growth_toward(grown, next, Direction::East, &world, &mut ScriptedEntropy::new())
        .unwrap();
    assert_eq!(w.kind, GrowthKind::Densify);
    w.apply(&algae, &mut world);

    let grown = algae.state_of(world.block(next)).unwrap();
    assert!(grown.has(Direction::East));
    assert!(grown.has(Direction::Up));
    assert_eq!(world.drain_changes().len(), 2);
}

#[test]
fn removing_the_wall_collapses_the_plant() {
    let Reef {
        reg,
        mut world,
        stone,
    } = Reef::new();
    let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
    let pos = BlockPos::new(3, 3, 3);
    let wall = pos.offset(Direction::South);
    world.put(wall, stone);
    let placed = algae
        .placement_state(&world, pos, &[Direction::Up, Direction::South])
        .unwrap();
    assert_eq!(placed, st(&[Direction::South]));
    assert!(algae.can_occupy(placed, &world, pos));
    world.put(pos, algae.block_for(placed));

    world.put(wall, algae.fluid_block());
    let update = algae.on_neighbor_changed(placed, Direction::South, &world, pos);
    assert_eq!(update, NeighborUpdate::Remove);
    world.put(pos, algae.block_after(placed, update).unwrap());
    assert!(algae.state_of(world.block(pos)).is_none());
}

#[test]
fn seeded_growth_only_writes_supported_plants_into_water() {
    let Reef {
        reg,
        mut world,
        stone,
    } = Reef::new();
    let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
    // Floor, back wall and a ceiling
    world.put_box(BlockPos::new(-8, 0, -8), BlockPos::new(8, 0, 8), stone);
    world.put_box(BlockPos::new(-8, 1, -8), BlockPos::new(8, 6, -8), stone);
    world.put_box(BlockPos::new(-8, 7, -8), BlockPos::new(8, 7, 8), stone);
    let stones = world.count_of(stone.id);
    world.put(BlockPos::new(0, 3, -7), algae.block_for(st(&[Direction::North])));

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..4000 {
        for pos in world.positions_of(algae.block_id()) {
            let Some(state) = algae.state_of(world.block(pos)) else {
                continue;
            };
            if let Some(w) = algae.random_tick(state, pos, &world, &mut rng) {
                assert!(w.state.has_any_attachment(), "{:?}", w);
                let before = world.block(w.pos);
                assert!(algae.is_ambient_fluid(before) || algae.is_self(before));
                w.apply(&algae, &mut world);
            }
        }
    }
    assert_eq!(world.count_of(stone.id), stones);
    assert!(world.count_of(algae.block_id()) > 1);
}
