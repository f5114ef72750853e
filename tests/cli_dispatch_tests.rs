use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_artifactor")
}

fn scenario(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("artifactor-{name}-{stamp}.{extension}"))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(args)
        .env_remove("ARTIFACTOR_SCENARIO")
        .output()
        .expect("artifactor should run")
}

#[test]
fn evaluate_command_emits_damage_report() {
    let path = scenario("diluc.json");
    let output = run(&["evaluate", path.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("evaluate should emit json");
    let total = payload["total_damage"].as_f64().expect("total is a number");
    assert!((total - 1490.609).abs() < 0.1, "unexpected total {total}");
    assert_eq!(payload["breakdown"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["breakdown"][0]["name"], "E_1");
}

#[test]
fn evaluate_command_writes_csv_breakdown() {
    let path = scenario("diluc.yaml");
    let output = run(&["evaluate", path.to_str().expect("utf-8 path"), "--csv"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("name,damage,share"));
    assert_eq!(lines.count(), 4);
}

#[test]
fn scenario_path_can_come_from_the_environment() {
    let output = Command::new(bin())
        .arg("evaluate")
        .env("ARTIFACTOR_SCENARIO", scenario("diluc.json"))
        .output()
        .expect("artifactor should run");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn mains_command_ranks_top_candidates() {
    let path = scenario("diluc.yaml");
    let output = run(&["mains", "--top", "3", path.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("mains should emit json");
    let ranked = payload.as_array().expect("ranking is an array");
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0]["selection"]["goblet"], "PyroDMGBonus");
}

#[test]
fn substats_command_reports_allocation() {
    let path = scenario("diluc.json");
    let output = run(&["substats", path.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("substats should emit json");
    assert_eq!(payload["substats"]["max_rolls"], 40);
    assert_eq!(payload["substats"]["energy_recharge_met"], true);
    assert_eq!(payload["main_stats"]["circlet"], "CritRate");
}

#[test]
fn lookup_command_prints_stat_table() {
    let output = run(&["lookup", "weapon", "wolf's", "gravestone"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("lookup should emit json");
    assert_eq!(payload["BaseATK"], 608.0);
}

#[test]
fn lookup_miss_fails() {
    let output = run(&["lookup", "character", "nobody"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no character named 'nobody'"));
    assert!(stderr.contains("known characters:"));
    assert!(stderr.contains("Diluc"));
}

#[test]
fn weapon_miss_lists_bundled_weapons() {
    let output = run(&["lookup", "weapon", "stick"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("known weapons:"));
    assert!(stderr.contains("Rainslasher"));
}

#[test]
fn lookup_without_name_is_a_usage_error() {
    let output = run(&["lookup", "weapon"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: artifactor lookup"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = run(&["serve"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: artifactor"));
}

#[test]
fn malformed_scenario_fails() {
    let path = unique_temp_path("broken", "yaml");
    fs::write(&path, "rotation: [not, a, list, of, actions").expect("temp scenario writable");

    let output = run(&["evaluate", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid YAML scenario"));

    let _ = fs::remove_file(path);
}
