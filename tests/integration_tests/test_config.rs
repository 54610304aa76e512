// integration tests for the config command

use crate::common::*;
use serde_json::json;

#[test]
fn test_config_path_prints_override() {
    let env = TestEnv::new();
    let output = env.run(&["config", "path"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), env.config_path.to_str().unwrap());
}

#[test]
fn test_config_default_has_settings() {
    let env = TestEnv::new();
    let output = env.run(&["config", "default"]);

    let config: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(config["settings"]["log_level"], "info");
    assert_eq!(config["settings"]["suggest_threshold"], 3);
}

#[test]
fn test_config_set_preset_and_show() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "presets.abandoned", "noowner minage 30"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let config = read_json(&env.config_path);
    assert_eq!(config["presets"]["abandoned"], json!(["noowner", "minage", "30"]));

    let output = env.run(&["config", "show"]);
    assert!(stdout_of(&output).contains("abandoned"));
}

#[test]
fn test_config_set_rejects_unknown_condition() {
    let env = TestEnv::new();
    let output = env.run(&["config", "set", "presets.bad", "nosuchthing"]);

    assert!(!output.status.success());
    assert!(read_json(&env.config_path)["presets"].get("bad").is_none());
}

#[test]
fn test_config_verify_valid() {
    let env = TestEnv::with_config(&json!({
        "presets": { "abandoned": ["noowner", "minage", "30"] }
    }));
    let output = env.run(&["config", "verify"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Config is valid"));
}

#[test]
fn test_config_verify_reports_errors() {
    let env = TestEnv::with_config(&json!({
        "presets": { "broken": ["oldgrids"] },
        "settings": { "log_level": "loud" }
    }));
    let output = env.run(&["config", "verify"]);

    assert_eq!(output.status.code(), Some(CONFIG_ERROR));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Config has 2 error(s)"), "stderr: {}", stderr);
    assert!(stderr.contains("presets.broken: Unknown argument 'oldgrids'"));
}

#[test]
fn test_invalid_config_fails_scan() {
    let env = TestEnv::new();
    std::fs::write(&env.config_path, "{ presets: ").unwrap();

    let output = env.run(&["scan", "--world", &env.world_arg()]);
    assert_eq!(output.status.code(), Some(CONFIG_ERROR));
}

#[test]
fn test_config_reset() {
    let env = TestEnv::with_config(&json!({
        "presets": { "unowned": ["noowner"] }
    }));
    let output = env.run(&["config", "reset"]);

    assert!(output.status.success());
    assert!(read_json(&env.config_path)["presets"]
        .as_object()
        .unwrap()
        .is_empty());
}
