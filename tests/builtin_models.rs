use minitrees::prelude::*;
use rand::prelude::*;


/// A zero vector of length `n` with the given positions overwritten.
fn features(n: usize, values: &[(usize, f64)]) -> Vec<f64> {
    let mut v = vec![0.0; n];
    for &(i, x) in values {
        v[i] = x;
    }
    v
}


/// Random vectors that hit every threshold of `model` exactly,
/// just below, or just above it.
fn threshold_vectors(model: &TreeModel, n: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut thresholds = vec![Vec::new(); model.arity()];
    for node in model.nodes() {
        if let Node::Branch { splitter, .. } = node {
            thresholds[splitter.feature].push(splitter.threshold);
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| {
        thresholds.iter()
            .map(|ts| {
                match (ts.choose(&mut rng), rng.gen_range(0..4)) {
                    (Some(&t), 0) => t,
                    (Some(&t), 1) => t - t.abs().max(1.0) * 1e-3,
                    (Some(&t), 2) => t + t.abs().max(1.0) * 1e-3,
                    _ => rng.gen_range(-1e3..1e9),
                }
            })
            .collect()
    })
    .collect()
}


#[test]
fn model_a_scenarios() {
    let a = BuiltinModel::A.build(false).unwrap();

    // AbsSumResidual <= 35.5, DCT2_DCT2cost <= 4.999999921591263e17
    let v = features(18, &[(10, 10.0), (17, 0.0), (7, 0.0)]);
    assert_eq!(a.predict(&v).unwrap(), 0);

    // AbsSumResidual > 35.5, DCT2_DCT2cost > 4.999999935734331e17
    let v = features(18, &[(10, 500.0), (17, 5e17 + 1.0)]);
    assert_eq!(a.predict(&v).unwrap(), 1);

    // AbsSumUltimaLinha > 200.5, AbsSumResidual <= 2215,
    // splitSeries <= 2215457, frame > 146
    let v = features(18, &[(10, 500.0), (17, 1e6), (11, 300.0), (7, 0.0), (0, 200.0)]);
    assert_eq!(a.predict(&v).unwrap(), 0);

    // Same region, but splitSeries > 2215457 ends in a leaf of class 1.
    let v = features(18, &[(10, 500.0), (17, 1e6), (11, 300.0), (7, 3e6), (0, 200.0)]);
    assert_eq!(a.predict(&v).unwrap(), 1);

    // AbsSumResidual > 2215 leads to the class 1 subtree.
    let v = features(18, &[(10, 2500.0), (17, 1e6), (11, 300.0), (7, 3e6), (0, 200.0)]);
    assert_eq!(a.predict(&v).unwrap(), 1);
}


#[test]
fn model_b_scenarios() {
    let b = BuiltinModel::B.build(false).unwrap();

    // DCT2_DCT2cost > 95769868 decides alone.
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let mut v = (0..26).map(|_| rng.gen_range(-1e6..1e6)).collect::<Vec<f64>>();
        v[22] = 1e8;
        assert_eq!(b.predict(&v).unwrap(), 0);
    }

    // Area > 192, Width <= 24
    let v = features(26, &[(22, 0.0), (6, 300.0), (3, 10.0)]);
    assert_eq!(b.predict(&v).unwrap(), 1);
}


#[test]
fn ties_take_the_left_branch() {
    let a = BuiltinModel::A.build(false).unwrap();

    // The root tests AbsSumResidual <= 35.5.
    let v = features(18, &[(10, 35.5)]);
    let path = a.decision_path(&v).unwrap();
    match a.nodes()[ROOT] {
        Node::Branch { left, .. } => assert_eq!(path[1], left),
        Node::Leaf { .. } => panic!("root of tree A is a leaf"),
    }

    // DCT2_DCT2cost == 4.999999921591263e17 stays on the class 0 side.
    let v = features(18, &[(17, 4.999999921591263e17)]);
    assert_eq!(a.predict(&v).unwrap(), 0);
    let v = features(18, &[(17, 5e17)]);
    assert_eq!(a.predict(&v).unwrap(), 1);

    // frame == 146 goes left (class 1); just above goes right (class 0).
    let v = features(18, &[(10, 500.0), (17, 1e6), (11, 300.0), (0, 146.0)]);
    assert_eq!(a.predict(&v).unwrap(), 1);
    let v = features(18, &[(10, 500.0), (17, 1e6), (11, 300.0), (0, 146.5)]);
    assert_eq!(a.predict(&v).unwrap(), 0);

    let b = BuiltinModel::B.build(false).unwrap();

    // DCT2_DCT2cost == 95769868 goes left, where Area > 192 gives class 1.
    let v = features(26, &[(22, 95769868.0), (6, 300.0)]);
    assert_eq!(b.predict(&v).unwrap(), 1);

    // IntraMode == 34.5 goes left (class 0) instead of right (class 1).
    let v = features(26, &[(13, 34.5)]);
    assert_eq!(b.predict(&v).unwrap(), 0);
    let v = features(26, &[(13, 35.0)]);
    assert_eq!(b.predict(&v).unwrap(), 1);
}


#[test]
fn wrong_arity_is_rejected() {
    let a = BuiltinModel::A.build(false).unwrap();
    let b = BuiltinModel::B.build(false).unwrap();

    for n in [0, 17, 19, 26] {
        let err = a.predict(&vec![0.0; n]).unwrap_err();
        assert!(err.is_invalid_feature_vector(), "{err}");
    }
    for n in [0, 18, 25, 27] {
        let err = b.predict(&vec![0.0; n]).unwrap_err();
        assert!(err.is_invalid_feature_vector(), "{err}");
    }

    match a.predict(&[0.0; 26]) {
        Err(TreeError::InvalidFeatureVector { expected, got }) => {
            assert_eq!((expected, got), (18, 26));
        },
        other => panic!("unexpected result: {other:?}"),
    }
}


#[test]
fn evaluation_is_total_and_deterministic() {
    for builtin in BuiltinModel::ALL {
        let model = builtin.build(false).unwrap();
        for v in threshold_vectors(&model, 2_000, 11) {
            let label = model.predict(&v).unwrap();
            assert!(label <= 1);
            assert_eq!(model.predict(&v).unwrap(), label);
        }
    }
}


#[test]
fn nan_features_follow_the_right_branch() {
    let b = BuiltinModel::B.build(false).unwrap();
    // NaN <= 95769868 is false, so the root sends the vector to class 0.
    let v = features(26, &[(22, f64::NAN), (6, 300.0)]);
    assert_eq!(b.predict(&v).unwrap(), 0);
}


#[test]
fn collapsing_preserves_every_prediction() {
    for builtin in BuiltinModel::ALL {
        let full = builtin.build(false).unwrap();
        let collapsed = builtin.build(true).unwrap();
        assert!(collapsed.n_nodes() < full.n_nodes());

        for v in threshold_vectors(&full, 5_000, 42) {
            assert_eq!(
                full.predict(&v).unwrap(),
                collapsed.predict(&v).unwrap(),
                "{builtin} disagrees on {v:?}",
            );
        }
    }
}


#[test]
fn labels_map_to_block_sizes() {
    let registry = ModelRegistry::builtin().unwrap();

    let v = features(26, &[(6, 300.0), (3, 10.0)]);
    let label = registry.predict("B", &v).unwrap();
    let decision = BlockSizeDecision::try_from(label).unwrap();
    assert_eq!(decision.block_size(), 20);

    let model = registry.model("B").unwrap();
    assert_eq!(model.class_names()[label], decision.to_string());
}
