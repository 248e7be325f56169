use pretty_assertions::assert_eq;
use rstest::rstest;
use series_reducer::reducer::{self, DownsampleConfig, IntervalConfig, Policy};
use series_reducer::{Error, ErrorKind, ReducerConfig, Sample};
use serde_json::{json, Value};

#[rstest]
#[case::average("average", json!({ "interval": "1m" }), Policy::Average)]
#[case::sum("sum", json!({ "interval": "90s" }), Policy::Sum)]
#[case::max("max", json!({ "interval": "1h30m" }), Policy::Max)]
#[case::min("min", json!({ "interval": "250ms" }), Policy::Min)]
#[case::downsample("downsample", json!({ "step": 10 }), Policy::Downsample)]
fn test_build(#[case] id: &str, #[case] raw: Value, #[case] policy: Policy) {
    let reducer = reducer::build(id, &raw).unwrap();
    assert_eq!(reducer.policy(), policy);
}

#[test]
fn test_build_unknown_policy() {
    assert_eq!(
        reducer::build("bogus", &json!({})).unwrap_err(),
        Error::UnknownPolicy("bogus".to_string())
    );
}

#[test]
fn test_build_downsample_with_zero_step() {
    let err = reducer::build("downsample", &json!({ "step": 0 })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    assert_eq!(err.root_cause(), &Error::InvalidStep(0));
}

#[rstest]
#[case::missing_interval("average", json!({}))]
#[case::numeric_interval("sum", json!({ "interval": 60 }))]
#[case::not_an_object("max", json!("1m"))]
#[case::missing_step("downsample", json!({ "interval": "1m" }))]
#[case::string_step("downsample", json!({ "step": "3" }))]
fn test_build_decode_failures(#[case] id: &str, #[case] raw: Value) {
    let err = reducer::build(id, &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigDecode, "{id} {raw}");
}

#[rstest]
#[case::unparseable("average", "soon")]
#[case::zero_sum("sum", "0s")]
#[case::negative_max("max", "-1m")]
#[case::zero_min("min", "0")]
fn test_build_invalid_intervals(#[case] id: &str, #[case] interval: &str) {
    let err = reducer::build(id, &json!({ "interval": interval })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    assert_eq!(err.root_cause().kind(), ErrorKind::InvalidInterval);
}

#[test]
fn test_yaml_payload() -> anyhow::Result<()> {
    let raw: Value = serde_yaml::from_str(
        r#"
interval: 1m
"#,
    )?;
    let reducer = reducer::build("sum", &raw)?;

    let samples: Vec<Sample> = serde_json::from_value(json!([
        { "timestamp": "2023-10-01T00:00:00Z", "value": 1.0 },
        { "timestamp": "2023-10-01T00:00:30Z", "value": 2.0 },
        { "timestamp": "2023-10-01T00:01:00Z", "value": 3.0 },
        { "timestamp": "2023-10-01T00:01:30Z", "value": 4.0 },
    ]))?;
    let reduced = reducer.reduce(&samples)?;

    assert_eq!(
        serde_json::to_value(&reduced)?,
        json!([
            { "timestamp": "2023-10-01T00:00:00Z", "value": 3.0 },
            { "timestamp": "2023-10-01T00:01:00Z", "value": 7.0 },
        ])
    );
    Ok(())
}

#[test]
fn test_decode_then_build() {
    let entry = reducer::lookup("downsample").unwrap();
    let config = entry.decode(&json!({ "step": 3 })).unwrap();
    assert_eq!(config, ReducerConfig::Downsample(DownsampleConfig { step: 3 }));

    let reducer = reducer::build_config(config).unwrap();
    assert_eq!(reducer.policy(), Policy::Downsample);

    let config = ReducerConfig::Average(IntervalConfig {
        interval: "2m".to_string(),
    });
    assert_eq!(reducer::build_config(config).unwrap().policy(), Policy::Average);
}

#[test]
fn test_every_registered_policy_parses_as_policy() {
    for entry in reducer::registered_policies() {
        assert_eq!(entry.id.parse::<Policy>().unwrap(), entry.policy);
    }
}
