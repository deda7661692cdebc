use criterion::{black_box, criterion_group, criterion_main, Criterion};
use decision_tree::condition::DecisionCondition;
use decision_tree::distribution::DiscreteDistribution;
use decision_tree::{Attribute, DecisionNode, DecisionTree, Instance, InstanceList, Model};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::time::Duration;

const LABELS: [&str; 3] = ["a", "b", "c"];

/// Complete binary tree splitting continuous attributes at random thresholds.
fn create_node(rng: &mut StdRng, depth: usize, n_features: usize) -> DecisionNode {
    let distribution = DiscreteDistribution::from_counts(LABELS.iter().map(|l| (*l, rng.gen_range(1..100))));
    if depth == 0 {
        return DecisionNode::leaf(distribution);
    }
    let feature = rng.gen_range(0..n_features);
    let threshold: f64 = rng.gen_range(0.0..1.0);
    let left =
        create_node(rng, depth - 1, n_features).with_condition(DecisionCondition::less_or_equal(feature, threshold));
    let right = create_node(rng, depth - 1, n_features).with_condition(DecisionCondition::greater(feature, threshold));
    // Children are never empty here.
    DecisionNode::internal(distribution, vec![left, right]).unwrap()
}

fn create_data(rng: &mut StdRng, n_samples: usize, n_features: usize) -> InstanceList {
    (0..n_samples)
        .map(|_| {
            let attributes: Vec<Attribute> = (0..n_features)
                .map(|_| Attribute::Continuous(rng.gen_range(0.0..1.0)))
                .collect();
            Instance::new(LABELS[rng.gen_range(0..LABELS.len())], attributes)
        })
        .collect()
}

pub fn tree_benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1903);
    let n_features = 10;
    let tree = DecisionTree::new(create_node(&mut rng, 10, n_features));
    let data = create_data(&mut rng, 10_000, n_features);

    c.bench_function("predict single threaded", |b| {
        b.iter(|| tree.predict_all(black_box(&data), false))
    });
    c.bench_function("predict parallel", |b| b.iter(|| tree.predict_all(black_box(&data), true)));
    c.bench_function("predict probability", |b| {
        b.iter(|| {
            data.iter()
                .map(|i| tree.predict_probability(black_box(i)).len())
                .sum::<usize>()
        })
    });
    c.bench_function("save and load text", |b| {
        b.iter(|| black_box(tree.to_txt().unwrap()).parse::<DecisionTree>().unwrap())
    });

    let mut group = c.benchmark_group("pruning");
    group.sample_size(10).measurement_time(Duration::from_secs(30));
    let small_tree = DecisionTree::new(create_node(&mut rng, 6, n_features));
    let prune_set = create_data(&mut rng, 1_000, n_features);
    group.bench_function("prune depth 6", |b| {
        b.iter(|| {
            let mut t = small_tree.clone();
            t.prune(black_box(&prune_set));
            t
        })
    });
    group.finish();
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
