// integration tests for the conditions command

use crate::common::*;

#[test]
fn test_conditions_json_lists_registry() {
    let env = TestEnv::new();
    let (output, json) = env.run_json(&["conditions"]);

    assert!(output.status.success());
    let conditions = json["result"].as_array().expect("result should be an array");

    let minage = conditions
        .iter()
        .find(|c| c["command"] == "minage")
        .expect("minage should be listed");
    assert_eq!(minage["invert_command"], "maxage");
    assert_eq!(minage["takes_parameter"], true);

    let haspilot = conditions
        .iter()
        .find(|c| c["command"] == "haspilot")
        .expect("haspilot should be listed");
    assert!(haspilot.get("invert_command").is_none());

    // the implicit default is not a user-facing condition
    assert!(!conditions.iter().any(|c| c["command"] == "unpiloted"));
}

#[test]
fn test_conditions_text_output() {
    let env = TestEnv::new();
    let output = env.run(&["conditions"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("hasowner / noowner"));
    assert!(stdout.contains("minage / maxage <value>"));
}
