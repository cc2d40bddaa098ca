//! Bridge behavior through the public API.

use scconvert::bridge::{
    bridge_convert, bridge_convert_with, dataset_to_feature_major, BridgeRequest, BridgeResponse,
    BridgeValue, ConversionError, Direction, InProcessRuntime, RecordFields, Runtime,
    CALL_TO_OBSERVATION_MAJOR,
};
use scconvert::dataset::{AnnotatedDataset, AttributeTable, AttributeValues};
use scconvert::matrix::MatrixData;

fn anndata_record(n_obs: usize, n_vars: usize) -> BridgeValue {
    let matrix = MatrixData::from_rows(vec![vec![1.0; n_vars]; n_obs]).unwrap();
    let mut obs = AttributeTable::new();
    obs.insert(
        "Source.Name".to_string(),
        AttributeValues::Strings((0..n_obs).map(|i| format!("s{}", i)).collect()),
    );

    let mut fields = RecordFields::new();
    fields.insert("X".into(), BridgeValue::Matrix(matrix));
    fields.insert(
        "obs_names".into(),
        BridgeValue::StrVec((0..n_obs).map(|i| format!("c{}", i)).collect()),
    );
    fields.insert(
        "var_names".into(),
        BridgeValue::StrVec((0..n_vars).map(|j| format!("g{}", j)).collect()),
    );
    fields.insert("obs".into(), BridgeValue::Frame(obs));
    fields.insert("var".into(), BridgeValue::Frame(AttributeTable::new()));
    BridgeValue::record("AnnData", fields)
}

/// Delegates to the in-process runtime and counts requests
struct CountingRuntime {
    inner: InProcessRuntime,
    calls: std::cell::Cell<usize>,
}

impl Runtime for CountingRuntime {
    fn name(&self) -> &str {
        "counting"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn execute(&self, request: BridgeRequest) -> Result<BridgeResponse, ConversionError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.execute(request)
    }
}

#[test]
fn test_hand_built_record_converts() {
    let sce = bridge_convert(anndata_record(3, 2), Direction::ToFeatureMajor).unwrap();
    assert_eq!(sce.class(), Some("SingleCellExperiment"));
    match sce.field("assays") {
        Some(BridgeValue::List(assays)) => match assays.get("X") {
            Some(BridgeValue::Matrix(m)) => assert_eq!(m.shape(), (2, 3)),
            other => panic!("unexpected assay {:?}", other),
        },
        other => panic!("unexpected assays {:?}", other),
    }
}

#[test]
fn test_missing_var_names_fails() {
    let mut record = anndata_record(2, 2);
    if let BridgeValue::Record { fields, .. } = &mut record {
        fields.shift_remove("var_names");
    }
    let err = bridge_convert(record, Direction::ToFeatureMajor).unwrap_err();
    assert!(matches!(err, ConversionError::MissingField { .. }));
}

#[test]
fn test_missing_colnames_fails() {
    let dataset = AnnotatedDataset::new(
        MatrixData::from_rows(vec![vec![0.0, 1.0]]).unwrap(),
        vec!["c".into()],
        vec!["g1".into(), "g2".into()],
    )
    .unwrap();
    let mut sce = dataset_to_feature_major(dataset);
    if let BridgeValue::Record { fields, .. } = &mut sce {
        fields.shift_remove("colnames");
    }
    let err = bridge_convert(sce, Direction::ToObservationMajor).unwrap_err();
    assert!(matches!(err, ConversionError::MissingField { field, .. } if field == "colnames"));
}

#[test]
fn test_custom_runtime_is_used() {
    let runtime = CountingRuntime {
        inner: InProcessRuntime::new(),
        calls: std::cell::Cell::new(0),
    };
    let sce = bridge_convert_with(&runtime, anndata_record(2, 2), Direction::ToFeatureMajor).unwrap();
    let back = bridge_convert_with(&runtime, sce, Direction::ToObservationMajor).unwrap();
    assert_eq!(runtime.calls.get(), 2);
    assert_eq!(back, anndata_record(2, 2));
}

#[test]
fn test_multiple_inputs_in_one_request() {
    let runtime = InProcessRuntime::new();
    let a = dataset_to_feature_major(
        AnnotatedDataset::new(
            MatrixData::from_rows(vec![vec![1.0]]).unwrap(),
            vec!["c".into()],
            vec!["g".into()],
        )
        .unwrap(),
    );
    let request = BridgeRequest::new(CALL_TO_OBSERVATION_MAJOR)
        .with_input("a", a.clone())
        .with_input("b", a)
        .with_output("b")
        .with_output("a");
    let response = runtime.execute(request).unwrap();
    let names: Vec<&str> = response.outputs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert!(response.outputs.values().all(|v| v.class() == Some("AnnData")));
}
