use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_pin-bind-gen");

const PIN_MAP: &str = r#"{
    "led1": {
        "type": "led_matrix",
        "rows": 1,
        "cols": 8,
        "signals": {
            "data": {"direction": "in", "verilog_signals": {"bus": [15, 8]}}
        }
    },
    "arm": {"type": "servo"}
}"#;

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("failed to launch pin-bind-gen")
}

/// Writes `contents` as the pin map and returns (input, output) paths.
fn setup(dir: &Path, contents: &str) -> (String, String) {
    let input = dir.join("pin_map.json");
    std::fs::write(&input, contents).unwrap();
    let output = dir.join("bind.cpp");
    (
        input.to_str().unwrap().to_owned(),
        output.to_str().unwrap().to_owned(),
    )
}

#[test]
fn wrong_argument_count_prints_usage_and_exits_1() {
    for args in [&[][..], &["only_one.json"][..]] {
        let out = run(args);
        assert_eq!(out.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Usage"), "{stderr}");
    }

    let out = run(&["a.json", "b.cpp", "c"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_successfully() {
    let out = run(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("PIN_MAP"));
}

#[test]
fn generates_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let (input, output) = setup(dir.path(), PIN_MAP);

    let out = run(&[input.as_str(), output.as_str()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let source = std::fs::read_to_string(&output).unwrap();
    assert!(source.contains("led1->bindSignal(\"data\", &top->bus, 8, 8, 15);"));
    assert!(!source.contains("arm"));

    // skipped device is reported on stderr by default
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("arm"), "{stderr}");
}

#[test]
fn options_change_the_signature() {
    let dir = tempfile::tempdir().unwrap();
    let (input, output) = setup(dir.path(), PIN_MAP);

    let out = run(&[
        input.as_str(),
        output.as_str(),
        "--function",
        "setup_board",
        "--top-type",
        "Vcounter",
        "--model-header",
        "Vcounter.h",
        "--registry",
        "parameter",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let source = std::fs::read_to_string(&output).unwrap();
    assert!(source.contains("#include \"Vcounter.h\"\n"));
    assert!(source.contains("void setup_board(Vcounter* top, cakeboard::CakeBoard& board) {\n"));
    assert!(source.contains("board.addDevice(led1);"));
}

#[test]
fn deny_unknown_fails_on_servo() {
    let dir = tempfile::tempdir().unwrap();
    let (input, output) = setup(dir.path(), PIN_MAP);

    let out = run(&[input.as_str(), output.as_str(), "--deny-unknown"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported type `servo`"));
    assert!(!Path::new(&output).exists());
}

#[test]
fn malformed_pin_map_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (input, output) = setup(
        dir.path(),
        r#"{"led1": {"type": "led_matrix", "cols": 8, "signals": {}}}"#,
    );

    let out = run(&[input.as_str(), output.as_str()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("led1"), "{stderr}");
    assert!(stderr.contains("rows"), "{stderr}");
}

#[test]
fn invalid_model_type_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (input, output) = setup(dir.path(), PIN_MAP);

    let out = run(&[input.as_str(), output.as_str(), "--top-type", "Vtop*"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid top-level model type `Vtop*`"), "{stderr}");
    assert!(!Path::new(&output).exists());
}
