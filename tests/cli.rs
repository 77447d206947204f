use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs the binary with an empty config file so the user's own config never leaks in.
fn pageframe_cmd(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("pageframe").expect("binary exists");
    cmd.arg("--config").arg(config);
    cmd
}

fn write_annotations(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("annotations.json");
    fs::write(
        &path,
        r#"[
            {"id": "L-1", "name": "6\"-P-1001", "coordinates": {"x": 10, "y": 20, "width": 80, "height": 12}, "page": 1},
            {"id": "L-2", "name": "4\"-P-1002", "coordinates": {"x": 40, "y": 90, "width": 60, "height": 12}, "page": 2}
        ]"#,
    )
    .unwrap();
    path
}

#[test]
fn help_prints_usage() {
    let dir = TempDir::new().unwrap();
    pageframe_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "annotation overlay through a pan/zoom viewport",
        ));
}

#[test]
fn list_modes_prints_builtin_modes() {
    let dir = TempDir::new().unwrap();
    pageframe_cmd(&dir)
        .arg("--list-modes")
        .assert()
        .success()
        .stdout(predicate::str::contains("line_numbers"))
        .stdout(predicate::str::contains("Clean PDF"));
}

#[test]
fn output_is_required_for_render() {
    let dir = TempDir::new().unwrap();
    pageframe_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn renders_current_page_items_to_png() {
    let dir = TempDir::new().unwrap();
    let annotations = write_annotations(&dir);
    let output = dir.path().join("page.png");

    pageframe_cmd(&dir)
        .arg("--annotations")
        .arg(&annotations)
        .args(["--page-size", "400x300", "--zoom", "1.5", "--pan", "-20,10"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 1 overlay shape(s) at zoom 150%"));

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn zoom_is_clamped_to_configured_range() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("page.png");
    pageframe_cmd(&dir)
        .args(["--page-size", "100x100", "--zoom", "40"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("at zoom 500%"));
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    pageframe_cmd(&dir)
        .args(["--mode", "heatmap", "--output", "out.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown display mode"));
}

#[test]
fn missing_annotations_still_render() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("page.png");
    pageframe_cmd(&dir)
        .arg("--annotations")
        .arg(dir.path().join("nope.json"))
        .args(["--page-size", "100x100"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 0 overlay shape(s)"));
    assert!(output.exists());
}

#[test]
fn disabled_mode_cannot_render() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[modes.equipment]\nenabled = false\n",
    )
    .unwrap();
    pageframe_cmd(&dir)
        .args(["--mode", "equipment", "--page-size", "100x100"])
        .arg("--output")
        .arg(dir.path().join("page.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot render in equipment mode"));
}

#[test]
fn clean_mode_renders_no_shapes() {
    let dir = TempDir::new().unwrap();
    let annotations = write_annotations(&dir);
    pageframe_cmd(&dir)
        .arg("--annotations")
        .arg(&annotations)
        .args(["--mode", "clean", "--page-size", "100x100"])
        .arg("--output")
        .arg(dir.path().join("page.png"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 0 overlay shape(s)"));
}
