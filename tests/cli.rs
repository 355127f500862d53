//! Integration tests for CLI commands
//!
//! Network-free: everything runs against the sim gateway with narration
//! disabled, driving the cook shell over stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fridgechef() -> Command {
    Command::cargo_bin("fridgechef").unwrap()
}

/// Minimal jpeg-ish file; the sim gateway never inspects the bytes
fn write_photo(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("fridge.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    path
}

#[test]
fn test_main_command_help() {
    fridgechef()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("photograph your fridge"));
}

#[test]
fn test_analyze_command_help() {
    fridgechef()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyze a fridge photo"))
        .stdout(predicate::str::contains("--no-narration"));
}

#[test]
fn test_analyze_with_sim_gateway_lists_recipes() {
    let tmp = TempDir::new().unwrap();
    let photo = write_photo(&tmp);

    fridgechef()
        .arg("analyze")
        .arg(&photo)
        .args(["--gateway", "sim", "--no-narration"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected:"))
        .stdout(predicate::str::contains("Suggested recipes:"))
        .stdout(predicate::str::contains("Spinach Omelette"));
}

#[test]
fn test_analyze_with_dietary_filter() {
    let tmp = TempDir::new().unwrap();
    let photo = write_photo(&tmp);

    fridgechef()
        .arg("analyze")
        .arg(&photo)
        .args(["--gateway", "sim", "--no-narration", "--filter", "vegan"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Filter: Vegan"))
        .stdout(predicate::str::contains("Rainbow Veggie Stir-Fry"))
        .stdout(predicate::str::contains("Spinach Omelette").not());
}

#[test]
fn test_cook_through_to_the_end() {
    let tmp = TempDir::new().unwrap();
    let photo = write_photo(&tmp);

    // Spinach Omelette has 3 steps: overview -> 1 -> 2 -> 3 -> finished
    fridgechef()
        .arg("analyze")
        .arg(&photo)
        .args(["--gateway", "sim", "--no-narration"])
        .write_stdin("cook 1\nnext\nnext\nnext\nnext\ndone\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gather ingredients:"))
        .stdout(predicate::str::contains("Step 1 of 3"))
        .stdout(predicate::str::contains("Bon Appetit!"));
}

#[test]
fn test_shopping_list_round_trip() {
    let tmp = TempDir::new().unwrap();
    let photo = write_photo(&tmp);

    fridgechef()
        .arg("analyze")
        .arg(&photo)
        .args(["--gateway", "sim", "--no-narration"])
        .write_stdin("add soy sauce\nadd soy sauce\ncart\ndrop soy sauce\ncart\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("- soy sauce"))
        .stdout(predicate::str::contains("Shopping list is empty"));
}

#[test]
fn test_unknown_gateway_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let photo = write_photo(&tmp);

    fridgechef()
        .arg("analyze")
        .arg(&photo)
        .args(["--gateway", "midjourney"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown gateway"));
}

#[test]
fn test_missing_image_file_is_reported() {
    fridgechef()
        .args(["analyze", "/nonexistent/fridge.jpg", "--gateway", "sim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read image file"));
}

#[test]
fn test_config_command_prints_toml() {
    fridgechef()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[gateway]"))
        .stdout(predicate::str::contains("[narrator]"));
}
