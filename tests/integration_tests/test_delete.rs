// integration tests for the delete command

use crate::common::*;

#[test]
fn test_delete_writes_to_output_file() {
    let env = TestEnv::new();
    let out = env.path("cleaned.json");

    let (output, json) = env.run_json(&[
        "delete",
        "--world",
        &env.world_arg(),
        "--output",
        out.to_str().unwrap(),
        "noowner",
        "minage",
        "30",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(result_ids(&json), vec![2]);
    assert_eq!(json["result"]["action"], "delete");
    assert_eq!(json["result"]["dry_run"], false);
    assert_eq!(json["result"]["written_to"], out.to_str().unwrap());

    assert_eq!(world_grid_ids(&out), vec![1, 3, 4, 5, 500, 6]);
    // input untouched
    assert_eq!(world_grid_ids(&env.world_path), vec![1, 2, 3, 4, 5, 500, 6]);
}

#[test]
fn test_delete_in_place_keeps_projections_and_economy() {
    let env = TestEnv::new();

    let (output, json) = env.run_json(&["delete", "--world", &env.world_arg(), "noowner"]);

    assert!(output.status.success());
    assert_eq!(result_ids(&json), vec![2, 6]);
    assert_eq!(world_grid_ids(&env.world_path), vec![1, 3, 4, 5, 500]);

    // players and factions survive the rewrite
    let world = read_json(&env.world_path);
    assert_eq!(world["players"]["200"]["name"], "Bob");
    assert_eq!(world["factions"]["2"]["tag"], "ECO");
}

#[test]
fn test_delete_dry_run_leaves_world_alone() {
    let env = TestEnv::new();
    let before = std::fs::read_to_string(&env.world_path).unwrap();

    let output = env.run(&["delete", "--world", &env.world_arg(), "--dry-run", "ownedby", "bob"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Would delete 2 grid(s) matching: ownedby bob, unpiloted"));
    assert!(!stdout.contains("Wrote"));
    assert_eq!(std::fs::read_to_string(&env.world_path).unwrap(), before);
}

#[test]
fn test_delete_nothing_matched_does_not_write() {
    let env = TestEnv::new();
    let out = env.path("cleaned.json");

    let (output, json) = env.run_json(&[
        "delete",
        "--world",
        &env.world_arg(),
        "--output",
        out.to_str().unwrap(),
        "blocksgreaterthan",
        "100000",
    ]);

    assert!(output.status.success());
    assert_eq!(json["result"]["count"], 0);
    assert!(json["result"].get("written_to").is_none());
    assert!(!out.exists());
}

#[test]
fn test_delete_unknown_argument_touches_nothing() {
    let env = TestEnv::new();
    let before = std::fs::read_to_string(&env.world_path).unwrap();

    let output = env.run(&["delete", "--world", &env.world_arg(), "destroyall", "noowner"]);

    assert_eq!(output.status.code(), Some(INVALID_ARGS));
    assert!(stderr_of(&output).contains("Unknown argument 'destroyall'"));
    assert_eq!(std::fs::read_to_string(&env.world_path).unwrap(), before);
}
