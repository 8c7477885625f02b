//! Sparse Merkle tree benchmarks.
//!
//! Covers the three operations whose cost scales with the depth of the tree: inserting a leaf,
//! generating its Merkle path and verifying that path.

use std::{hint, time::Duration};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use field_smt::{
    Fr,
    hash::{MerkleHasher, Poseidon254},
    merkle::{SparseMerkleTree, verify_merkle_path},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const MEASUREMENT_TIME: Duration = Duration::from_secs(10);
const DEPTHS: &[u8] = &[16, 32, 64];
const NUM_LEAVES: usize = 256;

fn random_tree(depth: u8, rng: &mut StdRng) -> (SparseMerkleTree<Poseidon254>, Vec<u64>) {
    let mut tree = SparseMerkleTree::new(depth, Poseidon254::hash_element(0)).unwrap();
    let indices: Vec<u64> = (0..NUM_LEAVES).map(|_| rng.gen_range(0..=tree.max_index())).collect();
    for &index in &indices {
        tree.insert(index, Fr::from(index)).unwrap();
    }
    (tree, indices)
}

fn smt_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("smt-insert");
    group.measurement_time(MEASUREMENT_TIME);
    let mut rng = StdRng::seed_from_u64(0);

    for &depth in DEPTHS {
        let (tree, _) = random_tree(depth, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter_batched(
                || (tree.clone(), rng.gen_range(0..=tree.max_index())),
                |(mut tree, index)| tree.insert(hint::black_box(index), Fr::from(index)).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn smt_generate_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("smt-generate-path");
    group.measurement_time(MEASUREMENT_TIME);
    let mut rng = StdRng::seed_from_u64(1);

    for &depth in DEPTHS {
        let (tree, indices) = random_tree(depth, &mut rng);
        let mut next = indices.iter().cycle();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                let index = *next.next().unwrap();
                hint::black_box(tree.generate_merkle_path(index).unwrap())
            })
        });
    }

    group.finish();
}

fn smt_verify_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("smt-verify-path");
    group.measurement_time(MEASUREMENT_TIME);
    let mut rng = StdRng::seed_from_u64(2);

    for &depth in DEPTHS {
        let (tree, indices) = random_tree(depth, &mut rng);
        let index = indices[0];
        let value = tree.get_leaf(index).unwrap();
        let path = tree.generate_merkle_path(index).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                assert!(verify_merkle_path::<Poseidon254>(
                    hint::black_box(value),
                    &path,
                    tree.root(),
                    depth
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(smt_group, smt_insert, smt_generate_path, smt_verify_path);
criterion_main!(smt_group);
