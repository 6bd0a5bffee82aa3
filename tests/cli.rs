use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cardscriber_cmd() -> Command {
    Command::cargo_bin("cardscriber").expect("binary exists")
}

#[test]
fn cardscriber_help_prints_usage() {
    cardscriber_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Stroke capture and replay canvas engine",
        ));
}

#[test]
fn default_run_writes_both_surfaces() {
    let temp = TempDir::new().unwrap();
    let front = temp.path().join("front.png");
    let back = temp.path().join("back.png");

    cardscriber_cmd()
        .arg("--front-out")
        .arg(&front)
        .arg("--back-out")
        .arg(&back)
        .assert()
        .success()
        .stdout(predicate::str::contains("strokes replayed at 150x150"));

    assert!(std::fs::metadata(&front).unwrap().len() > 0);
    assert!(std::fs::metadata(&back).unwrap().len() > 0);
}

#[test]
fn options_file_overrides_the_back_size() {
    let temp = TempDir::new().unwrap();
    let options = temp.path().join("options.toml");
    std::fs::write(&options, "back_canvas_size = 100\nback_base_line_width = 2.0\n").unwrap();

    cardscriber_cmd()
        .arg("--options")
        .arg(&options)
        .assert()
        .success()
        .stdout(predicate::str::contains("replayed at 100x100"));
}

#[test]
fn malformed_options_file_fails_with_context() {
    let temp = TempDir::new().unwrap();
    let options = temp.path().join("options.toml");
    std::fs::write(&options, "front_canvas_size = [not toml").unwrap();

    cardscriber_cmd()
        .arg("--options")
        .arg(&options)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse options"));
}

#[test]
fn dumped_drawing_replays_in_a_second_run() {
    let temp = TempDir::new().unwrap();
    let recorded = temp.path().join("drawing.json");
    let back = temp.path().join("back.png");

    cardscriber_cmd()
        .arg("--dump-drawing")
        .arg(&recorded)
        .assert()
        .success();

    cardscriber_cmd()
        .arg("--drawing")
        .arg(&recorded)
        .arg("--back-out")
        .arg(&back)
        .assert()
        .success()
        .stdout(predicate::str::contains("strokes replayed"));

    assert!(std::fs::metadata(&back).unwrap().len() > 0);
}

#[test]
fn dark_flag_is_accepted() {
    cardscriber_cmd().arg("--dark").assert().success();
}

#[test]
fn config_schema_dump_lists_option_keys() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("front_canvas_size"))
        .stdout(predicate::str::contains("color_schemes"));
}
