use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use tidal_blocks::{BlockPos, Direction};
use tidal_blocks::registry::BlockRegistry;
use tidal_growth::{AlgaeAutomaton, ConnectivityState, compute_shape};
use tidal_world::{HeightBounds, SparseWorld};

fn load_registry() -> BlockRegistry {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    BlockRegistry::load_from_path(root.join("../../assets/blocks.toml")).unwrap()
}

fn make_reef(reg: &BlockRegistry) -> SparseWorld {
    let water = reg.make_block_by_name("water", None).unwrap();
    let stone = reg.make_block_by_name("stone", None).unwrap();
    let mut w = SparseWorld::new(32, 32, 32, HeightBounds::new(0, 64), water);
    w.load_region(BlockPos::new(-32, 0, -32), BlockPos::new(31, 63, 31));
    w.put_box(BlockPos::new(-16, 0, -16), BlockPos::new(16, 0, 16), stone);
    w.put_box(BlockPos::new(-16, 1, -16), BlockPos::new(16, 12, -16), stone);
    w
}

fn bench_step_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_growth");
    let reg = load_registry();
    let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
    let w = make_reef(&reg);
    let state = ConnectivityState::default().with(Direction::North, true);
    let pos = BlockPos::new(0, 4, -15);
    let mut rng = StdRng::seed_from_u64(0xA16AE);
    group.bench_function("sparse_wall", |b| {
        b.iter(|| black_box(algae.step_growth(state, pos, &w, &mut rng)))
    });
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let reg = load_registry();
    let algae = AlgaeAutomaton::new(&reg, "algae").unwrap();
    let w = make_reef(&reg);
    let state = ConnectivityState::from_bits(0x3f);
    c.bench_function("resolve_attachments", |b| {
        b.iter(|| black_box(algae.resolve_attachments(state, &w, BlockPos::new(0, 4, -15))))
    });
    c.bench_function("compute_shape_all", |b| {
        b.iter(|| {
            for bits in 0..64u8 {
                black_box(compute_shape(ConnectivityState::from_bits(bits)));
            }
        })
    });
}

criterion_group!(benches, bench_step_growth, bench_resolve);
criterion_main!(benches);
