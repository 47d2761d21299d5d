use std::collections::HashMap;

use super::*;

#[test]
fn defaults_are_valid() {
    let config = EngineConfig::default();
    config.validate().expect("defaults validate");

    assert_eq!(config.dismissal.velocity_threshold, 1000.0);
    assert_eq!(config.dismissal.distance_fraction, 0.4);
    assert_eq!(config.stack.base_scale, 0.94);
    assert_eq!(config.stack.offset_step, 25.0);
    assert_eq!(config.layout.card_width_fraction, 0.7);
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let raw = r#"
        [dismissal]
        velocity_threshold = 800.0

        [springs.dismiss]
        duration = 0.3
    "#;
    let config = parse_config(raw).expect("parse");

    assert_eq!(config.dismissal.velocity_threshold, 800.0);
    assert_eq!(config.dismissal.distance_fraction, 0.4);
    assert_eq!(config.springs.dismiss.duration, 0.3);
    assert_eq!(config.springs.dismiss.damping_ratio, 0.75);
    assert_eq!(config.stack, StackConfig::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = parse_config("[dismissal\nvelocity_threshold = ").expect_err("broken toml");
    assert!(matches!(err, EngineError::ConfigParse(_)));
}

#[test]
fn out_of_range_values_are_rejected() {
    let mut config = EngineConfig::default();
    config.dismissal.distance_fraction = 1.5;
    let err = config.validate().expect_err("fraction above one");
    assert!(matches!(err, EngineError::InvalidConfig(ref message) if message.contains("distance_fraction")));

    let mut config = EngineConfig::default();
    config.springs.reflow.damping_ratio = 1.0;
    let err = config.validate().expect_err("critically damped reflow");
    assert!(err.to_string().contains("springs.reflow.damping_ratio"));

    let mut config = EngineConfig::default();
    config.stack.base_scale = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn environment_overrides_replace_file_values() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("CARD_STACK__VELOCITY_THRESHOLD", "1200"),
        ("CARD_STACK__OFFSET_STEP", " 30.5 "),
    ]);
    let mut config = EngineConfig::default();
    apply_env_overrides(&mut config, |key| vars.get(key).map(|value| value.to_string()));

    assert_eq!(config.dismissal.velocity_threshold, 1200.0);
    assert_eq!(config.stack.offset_step, 30.5);
    assert_eq!(config.stack.base_scale, 0.94);
}

#[test]
fn unparsable_override_is_ignored() {
    let mut config = EngineConfig::default();
    apply_env_overrides(&mut config, |key| {
        (key == "CARD_STACK__BASE_SCALE").then(|| "smaller".to_string())
    });
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn load_config_reads_an_explicit_file() {
    let path = std::env::temp_dir().join(format!("card_stack_config_{}.toml", std::process::id()));
    fs::write(&path, "[drag]\nresistance = 0.8\n").expect("write temp config");

    let loaded = load_config(Some(&path));
    let _ = fs::remove_file(&path);

    let config = loaded.expect("load");
    assert_eq!(config.drag.resistance, 0.8);
}

#[test]
fn missing_explicit_file_is_a_read_error() {
    let path = std::env::temp_dir().join("card_stack_config_does_not_exist.toml");
    let err = load_config(Some(&path)).expect_err("missing file");
    assert!(matches!(err, EngineError::ConfigRead { .. }));
    assert_eq!(err.code(), shared::error::ErrorCode::InvalidConfig);
}
