use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bedrock_index() -> Command {
    Command::cargo_bin("bedrock-index").unwrap()
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn addon() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        root,
        "rp/animations/cow.animation.json",
        r#"{
  "format_version": "1.8.0",
  // cow animations
  "animations": {
    "animation.cow.walk": { "loop": true },
    "animation.cow.look_at_target": {},
  }
}"#,
    );
    write(
        root,
        "rp/models/entity/stone.geo.json",
        r#"{
  "format_version": "1.12.0",
  "minecraft:geometry": [
    { "description": { "identifier": "geometry.stone" } },
    { "description": { "identifier": "geometry.granite:geometry.stone" } }
  ]
}"#,
    );
    write(
        root,
        "bp/entities/cow.json",
        r#"{
  "minecraft:entity": {
    "description": { "identifier": "demo:cow" },
    "component_groups": { "demo:baby": {} },
    "events": { "demo:grow_up": {} }
  }
}"#,
    );
    write(root, "rp/animations/broken.json", "{ \"animations\": ");
    write(root, "rp/textures/entity/cow.png", "");
    write(root, "rp/textures/entity/pig.png", "");
    write(root, "rp/textures/entity/pig.tga", "");

    temp
}

#[test]
fn test_list_animations() {
    let temp = addon();

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["list", "animation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("animation.cow.walk"))
        .stdout(predicate::str::contains("animation.cow.look_at_target"))
        .stdout(predicate::str::contains("Found 2 identifiers"));
}

#[test]
fn test_list_json_output() {
    let temp = addon();

    let output = bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["list", "server-entity", "--data-type", "events", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let event = &json["demo:grow_up"];
    assert!(event["path"].as_str().unwrap().ends_with("cow.json"));
    assert!(event["range"]["start"]["line"].is_number());
}

#[test]
fn test_find_hierarchical_geometry() {
    let temp = addon();

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["find", "geometry", "geometry.granite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stone.geo.json:5:"));
}

#[test]
fn test_find_missing_identifier_exits_1() {
    let temp = addon();

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["find", "animation", "animation.pig.walk"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_texture_resolution() {
    let temp = addon();

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["texture", "textures/entity/cow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cow.png"));

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["texture", "textures/entity/pig"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_file_type_is_rejected() {
    let temp = addon();

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["list", "texture"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown file type"));
}

#[test]
fn test_config_texture_extensions() {
    let temp = addon();
    write(temp.path(), ".bedrock-index.toml", "texture_extensions = [\"tga\"]\n");

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["texture", "textures/entity/pig"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pig.tga"));
}

#[test]
fn test_invalid_config_reports_error() {
    let temp = addon();
    write(temp.path(), ".bedrock-index.toml", "max_file_size = \"big\"\n");

    bedrock_index()
        .arg("--root")
        .arg(temp.path())
        .args(["list", "animation"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn test_missing_root_reports_error() {
    bedrock_index()
        .args(["--root", "/nonexistent/addon/root", "list", "animation"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Workspace not accessible"));
}

#[test]
fn test_init_writes_default_config() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("custom.toml");

    bedrock_index()
        .arg("init")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("texture_extensions"));
    assert!(content.contains("proximity_ordering = true"));
}
