//! Integration test: preprocessing transformers end-to-end

use polars::prelude::*;
use tabprep::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn sample_df() -> DataFrame {
    df!(
        "neighborhood" => &["north", "south", "east", "north", "south", "east"],
        "quality" => &["low", "high", "medium", "medium", "high", "low"],
        "area" => &[50.0, 120.0, 80.0, 65.0, 140.0, 55.0],
        "price" => &[100.0, 320.0, 180.0, 150.0, 400.0, 110.0],
    )
    .unwrap()
}

#[test]
fn test_full_preprocessing_chain() {
    init_tracing();
    let df = sample_df();
    let target = df.column("price").unwrap().as_materialized_series().clone();

    let mut ordinal =
        OrdinalEncoder::new(vec!["quality".to_string()], "price").unwrap();
    let mut onehot = CategoricalEncoder::new(vec!["neighborhood".to_string()]).unwrap();
    let mut scaler = ContinuousScaler::new(vec!["area".to_string()]).unwrap();

    let step1 = ordinal.fit_transform(&df, &target).unwrap();
    let step2 = onehot.fit_transform(&step1).unwrap();
    let result = scaler.fit_transform(&step2).unwrap();

    assert_eq!(result.height(), 6, "row count should be preserved");
    assert!(result.column("neighborhood").is_err(), "source column dropped");
    assert!(result.column("neighborhood_north").is_ok());
    assert!(result.column("neighborhood_south").is_ok());
    // "east" sorts first among the three levels and is the reference
    assert!(result.column("neighborhood_east").is_err());

    // Ordinal labels follow target rank: low prices rank lowest
    let quality: Vec<i64> = result
        .column("quality")
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(quality, vec![1, 3, 2, 2, 3, 1]);

    let area = result.column("area").unwrap().f64().unwrap();
    assert!((area.min().unwrap() - 0.0).abs() < 1e-10);
    assert!((area.max().unwrap() - 1.0).abs() < 1e-10);
}

#[test]
fn test_components_compose_in_any_order() {
    let df = sample_df();
    let target = df.column("price").unwrap().as_materialized_series().clone();

    let mut onehot = CategoricalEncoder::new(vec!["neighborhood".to_string()]).unwrap();
    let mut ordinal =
        OrdinalEncoder::new(vec!["quality".to_string()], "price").unwrap();
    let mut scaler = ContinuousScaler::new(vec!["area".to_string()]).unwrap();

    // Scaler first, then one-hot, then ordinal
    let step1 = scaler.fit_transform(&df).unwrap();
    let step2 = onehot.fit_transform(&step1).unwrap();
    let result = ordinal.fit_transform(&step2, &target).unwrap();

    assert_eq!(result.height(), 6);
    assert!(result.column("quality").unwrap().i64().is_ok());
}

#[test]
fn test_fitted_state_survives_new_data() {
    let train = sample_df();
    let target = train.column("price").unwrap().as_materialized_series().clone();

    let mut ordinal =
        OrdinalEncoder::new(vec!["quality".to_string()], "price").unwrap();
    let mut onehot = CategoricalEncoder::new(vec!["neighborhood".to_string()]).unwrap();
    let mut scaler = ContinuousScaler::new(vec!["area".to_string()]).unwrap();
    ordinal.fit(&train, &target).unwrap();
    onehot.fit(&train).unwrap();
    scaler.fit(&train).unwrap();

    // New rows: one unseen neighborhood, one unseen quality, area beyond fit max
    let test = df!(
        "neighborhood" => &["west", "north"],
        "quality" => &["premium", "low"],
        "area" => &[200.0, 50.0],
    )
    .unwrap();

    let step1 = ordinal.transform(&test).unwrap();
    let step2 = onehot.transform(&step1).unwrap();
    let result = scaler.transform(&step2).unwrap();

    // Unseen neighborhood: all indicators zero, no new column
    assert_eq!(
        result.column("neighborhood_north").unwrap().i32().unwrap().get(0),
        Some(0)
    );
    assert!(result.column("neighborhood_west").is_err());

    // Unseen quality level degrades to null, seen level keeps its label
    let quality = result.column("quality").unwrap().i64().unwrap();
    assert_eq!(quality.get(0), None);
    assert_eq!(quality.get(1), Some(1));

    // Out-of-range area scales past 1.0 with no clamping
    let area = result.column("area").unwrap().f64().unwrap();
    assert!(area.get(0).unwrap() > 1.0);
}

#[test]
fn test_transform_does_not_mutate_state() {
    let df = sample_df();
    let mut onehot = CategoricalEncoder::new(vec!["neighborhood".to_string()]).unwrap();
    onehot.fit(&df).unwrap();

    let before = onehot.dummy_columns("neighborhood").unwrap();
    let first = onehot.transform(&df).unwrap();
    let second = onehot.transform(&df).unwrap();

    assert!(first.equals(&second));
    assert_eq!(onehot.dummy_columns("neighborhood").unwrap(), before);
}

#[test]
fn test_fitted_scaler_serializes() {
    let df = sample_df();
    let mut scaler = ContinuousScaler::new(vec!["area".to_string()]).unwrap();
    scaler.fit(&df).unwrap();

    let json = serde_json::to_string(&scaler).unwrap();
    let restored: ContinuousScaler = serde_json::from_str(&json).unwrap();

    let expected = scaler.transform(&df).unwrap();
    let actual = restored.transform(&df).unwrap();
    assert!(expected.equals(&actual));
}

#[test]
fn test_empty_variable_lists_rejected() {
    assert!(matches!(
        CategoricalEncoder::new(vec![]),
        Err(PrepError::ConfigError(_))
    ));
    assert!(matches!(
        OrdinalEncoder::new(vec![], "price"),
        Err(PrepError::ConfigError(_))
    ));
    assert!(matches!(
        ContinuousScaler::new(vec![]),
        Err(PrepError::ConfigError(_))
    ));
}
