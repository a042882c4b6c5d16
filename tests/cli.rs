use assert_cmd::Command;
use tempfile::tempdir;

fn run_model() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_run-model"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_input_flag() {
    let output = run_model().arg("--help").assert().success().get_output().clone();
    let text = stdout_of(&output);
    assert!(text.contains("--input"));
    assert!(text.contains("comma-separated"));
}

#[test]
fn input_flag_is_required() {
    run_model().assert().failure().code(2);
}

#[test]
fn missing_default_model_exits_one() {
    let dir = tempdir().unwrap();
    let output = run_model()
        .current_dir(dir.path())
        .args(["--input", "5.1,3.5,1.4,0.2"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();

    let text = stdout_of(&output);
    assert!(
        text.contains("ERROR: Model file not found at artifacts/model.onnx"),
        "unexpected stdout: {text}"
    );
}

#[test]
fn missing_model_is_reported_before_bad_input() {
    let dir = tempdir().unwrap();
    let output = run_model()
        .current_dir(dir.path())
        .args(["--input", "a,b,c,d"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let text = stdout_of(&output);
    assert!(text.contains("Model file not found"));
    assert!(!text.contains("numeric"));
}

#[test]
fn model_flag_overrides_path() {
    let dir = tempdir().unwrap();
    let output = run_model()
        .current_dir(dir.path())
        .args(["--input", "1,2,3,4", "--model", "models/iris.onnx"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(stdout_of(&output).contains("ERROR: Model file not found at models/iris.onnx"));
}

#[test]
fn config_file_sets_model_path() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config/config.toml"),
        "[model]\npath = \"from_config.onnx\"\n",
    )
    .unwrap();

    let output = run_model()
        .current_dir(dir.path())
        .args(["--input", "1,2,3,4"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(stdout_of(&output).contains("Model file not found at from_config.onnx"));
}

#[test]
fn env_overrides_model_path() {
    let dir = tempdir().unwrap();
    let output = run_model()
        .current_dir(dir.path())
        .env("RUN_MODEL__MODEL__PATH", "from_env.onnx")
        .args(["--input", "1,2,3,4"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(stdout_of(&output).contains("Model file not found at from_env.onnx"));
}

#[test]
fn missing_explicit_config_exits_one() {
    let dir = tempdir().unwrap();
    let output = run_model()
        .current_dir(dir.path())
        .args(["--input", "1,2,3,4", "--config", "nope.toml"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    assert!(stdout_of(&output).starts_with("ERROR: Config error"));
}
