//! Integration tests for command mode (-c/--command flag)

use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        // Tests must be deterministic and not depend on a user's ~/.config/fixgrid/config.toml.
        .arg("--no-config")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("fixgrid_cli_{}_{}", std::process::id(), name))
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_auto_prepend_equals() {
    let (with_eq, _, _) = run_command(&["-c", "=2+3*4"]);
    let (without_eq, _, code) = run_command(&["-c", "2+3*4"]);
    assert_eq!(with_eq.trim(), "14");
    assert_eq!(without_eq.trim(), "14");
    assert_eq!(code, 0);
}

#[test]
fn test_negative_results() {
    let (stdout, _, code) = run_command(&["-c", "3-5+1"]);
    assert_eq!(stdout.trim(), "-1");
    assert_eq!(code, 0);
}

#[test]
fn test_cells_set_from_command_line() {
    let (stdout, _, code) = run_command(&["-s", "A1=2", "-s", "B1=3", "-c", "sum(A1:B1)*2"]);
    assert_eq!(stdout.trim(), "10");
    assert_eq!(code, 0);
}

#[test]
fn test_set_formula_uses_earlier_cells() {
    let (stdout, _, code) = run_command(&["-s", "A1=4", "-s", "A2==A1*A1", "-c", "A2+1"]);
    assert_eq!(stdout.trim(), "17");
    assert_eq!(code, 0);
}

#[test]
fn test_list_result() {
    let (stdout, _, code) = run_command(&["-c", "range(1,4)"]);
    assert_eq!(stdout.trim(), "1,2,3,4");
    assert_eq!(code, 0);
}

#[test]
fn test_boolean_result() {
    let (stdout, _, code) = run_command(&["-c", "everyeven(2,4)"]);
    assert_eq!(stdout.trim(), "true");
    let (stdout, _, _) = run_command(&["-c", "has2(1,3)"]);
    assert_eq!(stdout.trim(), "false");
    assert_eq!(code, 0);
}

#[test]
fn test_division_by_zero() {
    let (stdout, _, code) = run_command(&["-c", "1/0"]);
    assert_eq!(stdout.trim(), "Infinity");
    assert_eq!(code, 0);
}

#[test]
fn test_unknown_function_is_printed_verbatim() {
    let (stdout, _, code) = run_command(&["-c", "foo(1,2)"]);
    assert_eq!(stdout.trim(), "foo(1,2)");
    assert_eq!(code, 0);
}

#[test]
fn test_error_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "range(1)"]);
    assert_eq!(stdout.trim(), "#ERROR!");
    assert_eq!(code, 1);
}

#[test]
fn test_max_passes_flag() {
    let (stdout, _, code) = run_command(&["--max-passes", "1", "-c", "sum(1,2)*2"]);
    assert_eq!(stdout.trim(), "#ERROR!");
    assert_eq!(code, 1);
}

#[test]
fn test_invalid_max_passes_is_rejected() {
    let (_, stderr, code) = run_command(&["--max-passes", "0", "-c", "1"]);
    assert!(stderr.contains("--max-passes"));
    assert_eq!(code, 1);
}

#[test]
fn test_config_file_sets_error_marker() {
    let config = temp_file("marker.toml");
    std::fs::write(&config, "error_marker = \"ERR\"\n").unwrap();

    let output = Command::new("cargo")
        .args(["run", "-q", "--", "--config"])
        .arg(&config)
        .args(["-c", "range(2)"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ERR");
    assert_eq!(output.status.code(), Some(1));

    std::fs::remove_file(&config).ok();
}

#[test]
fn test_config_problems_are_warnings() {
    let config = temp_file("unknown_key.toml");
    std::fs::write(&config, "colour = \"red\"\n").unwrap();

    let output = Command::new("cargo")
        .args(["run", "-q", "--", "--config"])
        .arg(&config)
        .args(["-c", "1+1"])
        .output()
        .expect("Failed to execute command");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN"), "{stderr}");
    assert!(stderr.contains("Failed to parse"), "{stderr}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");
    assert_eq!(output.status.code(), Some(0));

    std::fs::remove_file(&config).ok();
}

#[test]
fn test_apply_fills_range() {
    let (stdout, stderr, code) = run_command(&["-s", "A1=4", "-a", "B1:C2==A1*2"]);
    assert_eq!(
        stdout,
        "# fixgrid sheet\nA1: 4\nB1: 8\nC1: 8\nB2: 8\nC2: 8\n"
    );
    assert!(stderr.contains("references were not shifted"), "{stderr}");
    assert_eq!(code, 0);
}

#[test]
fn test_apply_text_and_bad_range() {
    let (stdout, stderr, code) = run_command(&["-a", "A1:A2= note "]);
    assert_eq!(stdout, "# fixgrid sheet\nA1: \"note\"\nA2: \"note\"\n");
    assert!(!stderr.contains("not shifted"));
    assert_eq!(code, 0);

    let (_, stderr, code) = run_command(&["-a", "A1:K2=1"]);
    assert!(stderr.contains("Invalid selection"), "{stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_file_is_loaded_and_printed() {
    let sheet = temp_file("sheet.grd");
    std::fs::write(&sheet, "A1: 2\nB1: 3\nC1: =A1*B1\n").unwrap();

    let (stdout, _, code) = run_command(&[sheet.to_str().unwrap(), "-s", "A2=\"x\""]);
    assert_eq!(stdout, "# fixgrid sheet\nA1: 2\nB1: 3\nC1: 6\nA2: \"\\\"x\\\"\"\n");
    assert_eq!(code, 0);

    let (stdout, _, _) = run_command(&[sheet.to_str().unwrap(), "-c", "C1+1"]);
    assert_eq!(stdout.trim(), "7");

    std::fs::remove_file(&sheet).ok();
}

#[test]
fn test_bad_sheet_reports_line() {
    let sheet = temp_file("bad.grd");
    std::fs::write(&sheet, "A1: 1\nA2: words\n").unwrap();

    let (_, stderr, code) = run_command(&[sheet.to_str().unwrap(), "-c", "1"]);
    assert!(stderr.contains("line 2"), "{stderr}");
    assert_eq!(code, 1);

    std::fs::remove_file(&sheet).ok();
}

#[test]
fn test_markdown_output() {
    use std::fs;

    let output_file = temp_file("export.md");

    let (stdout, _, code) = run_command(&[
        "-s",
        "A1=5",
        "-s",
        "B2==A1*2",
        "-o",
        output_file.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Exported to"));

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("|   | A | B |"));
    assert!(content.contains("| 1 | 5 |  |"));
    assert!(content.contains("| 2 |  | 10 |"));

    fs::remove_file(&output_file).ok();
}

#[test]
fn test_invalid_cell_in_set() {
    let (_, stderr, code) = run_command(&["-s", "K1=3", "-c", "1"]);
    assert!(stderr.contains("K1"));
    assert_eq!(code, 1);
}

#[test]
fn test_empty_result() {
    let (stdout, _, code) = run_command(&["-c", "even(1,3)"]);
    assert_eq!(stdout.trim(), "");
    assert_eq!(code, 0);
}
