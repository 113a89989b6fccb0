use minitrees::prelude::*;

use std::env;


fn blocks_a() -> Sample {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/blocks_a.csv");

    SampleReader::default()
        .file(path)
        .read()
        .unwrap()
}


#[test]
fn read_block_features() {
    let sample = blocks_a();
    assert_eq!(sample.shape(), (5, 19));
    assert!(sample.has_names());
    assert_eq!(sample.names()[0], "DCT2_DCT2cost");

    // 2e18 in the file is clipped.
    assert_eq!(sample.row(4).unwrap()[0], CLIP_BOUND);
}


#[test]
fn predict_all_matches_columns_by_name() {
    let sample = blocks_a();
    let model = BuiltinModel::A.build(false).unwrap();

    let predictions = model.predict_all(&sample).unwrap();
    assert_eq!(predictions, vec![0, 1, 0, 1, 1]);

    // Row by row, in the model's own feature order.
    let rows = sample.project(model.feature_names()).unwrap();
    for (row, &label) in rows.iter().zip(&predictions) {
        assert_eq!(model.predict(row).unwrap(), label);
    }
}


#[test]
fn predict_all_reports_missing_features() {
    let sample = blocks_a();
    let model = BuiltinModel::B.build(false).unwrap();

    match model.predict_all(&sample) {
        Err(TreeError::MissingFeature(name)) => assert_eq!(name, "depth"),
        other => panic!("unexpected result: {other:?}"),
    }
}


#[test]
fn unnamed_rows_are_positional() {
    let mut rows = vec![vec![0.0; 26]; 3];
    rows[0][22] = 1e8;
    rows[1][6] = 300.0;
    rows[2][13] = 34.5;
    let sample = Sample::from_rows(rows).unwrap();

    let model = BuiltinModel::B.build(true).unwrap();
    assert_eq!(model.predict_all(&sample).unwrap(), vec![0, 1, 0]);

    let model = BuiltinModel::A.build(true).unwrap();
    let err = model.predict_all(&sample).unwrap_err();
    assert!(err.is_invalid_feature_vector());
}


#[test]
fn evaluate_against_the_target_column() {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/blocks_a.csv");

    let sample = SampleReader::default()
        .file(path)
        .target_feature("MTSChosen")
        .read()
        .unwrap();
    assert_eq!(sample.shape(), (5, 18));
    assert_eq!(sample.target(), Some(&[0, 1, 1, 1, 0][..]));

    let model = BuiltinModel::A.build(false).unwrap();
    let report = model.evaluate(&sample).unwrap();
    let matrix = report.matrix();

    assert_eq!(matrix.counts(), &[vec![1, 1], vec![1, 2]][..]);
    assert_eq!(report.accuracy(), Some(0.6));
    assert_eq!(matrix.precision(0), Some(0.5));
    assert_eq!(matrix.recall(1), Some(2.0 / 3.0));
    assert!(report.to_string().contains("accuracy"));

    // Without a target column there is nothing to score against.
    let err = model.evaluate(&blocks_a()).unwrap_err();
    assert!(matches!(err, TreeError::MissingTarget));
}


#[test]
fn empty_batches_predict_nothing() {
    let model = BuiltinModel::A.build(false).unwrap();

    let sample = Sample::from_rows(Vec::new()).unwrap();
    assert_eq!(model.predict_all(&sample).unwrap(), Vec::<Label>::new());

    let names = FEATURES_A.iter().map(|s| s.to_string()).collect();
    let sample = Sample::new(names, Vec::new()).unwrap();
    assert_eq!(model.predict_all(&sample).unwrap(), Vec::<Label>::new());

    let sample = SampleReader::<&str>::default()
        .has_header(false)
        .read_from("".as_bytes())
        .unwrap();
    assert_eq!(model.predict_all(&sample).unwrap(), Vec::<Label>::new());
}


#[test]
fn duplicate_columns_are_rejected() {
    let text = "frame;x;frame\n1;2;3\n";
    let err = SampleReader::<&str>::default()
        .read_from(text.as_bytes())
        .unwrap_err();
    assert!(matches!(err, TreeError::DuplicateColumn(name) if name == "frame"));
}
