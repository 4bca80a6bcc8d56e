use criterion::{criterion_group, criterion_main, Criterion};
use lithos_core::voxel::{
    build_chunk_mesh, Chunk, ChunkPos, Generator, Neighborhood, VoxelWorld, CHUNK_SIZE,
};
use std::hint::black_box;

/// Worst case for the mesher: a 3D checkerboard exposes every face of every
/// solid voxel.
fn checker_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    for z in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if (x + y + z) % 2 == 0 {
                    chunk.set(x, y, z, 1);
                }
            }
        }
    }
    chunk
}

fn bench_mesher(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chunk Meshing");

    let checker = checker_chunk();
    group.bench_function("checker chunk (worst case)", |b| {
        b.iter(|| {
            let mesh = build_chunk_mesh(&Neighborhood::single(black_box(&checker)));
            black_box(mesh.index_count());
        });
    });

    let solid = Chunk::filled(1);
    group.bench_function("solid lone chunk (hull only)", |b| {
        b.iter(|| {
            let mesh = build_chunk_mesh(&Neighborhood::single(black_box(&solid)));
            black_box(mesh.index_count());
        });
    });

    let world = VoxelWorld::generate((3, 3, 3), &Generator::Terrain { id: 1, floor_id: 2 });
    group.bench_function("terrain chunk with neighbors", |b| {
        b.iter(|| {
            let hood = world.neighborhood(ChunkPos::new(1, 1, 1));
            let mesh = build_chunk_mesh(black_box(&hood));
            black_box(mesh.index_count());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_mesher);
criterion_main!(benches);
