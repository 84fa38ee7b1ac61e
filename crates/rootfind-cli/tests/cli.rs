//! End-to-end tests for the `rootfind` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn rootfind() -> Command {
    let mut cmd = Command::cargo_bin("rootfind").unwrap();
    cmd.env_remove("ROOTFIND_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// ============================================================================
// solve
// ============================================================================

#[test]
fn solve_sqrt_2_minimal() {
    rootfind()
        .args(["-f", "minimal", "solve", "x -> x^2 - 2", "--x0", "1", "--x1", "2"])
        .args(["--tolerance", "1e-9", "--max-iterations", "100"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1.41421356"));
}

#[test]
fn solve_linear_json() {
    let report = json_output(rootfind().args([
        "--format", "json", "solve", "x - 5", "--x0", "0", "--x1", "1",
    ]));

    assert_eq!(report["root"], 5.0);
    assert_eq!(report["iterations"], 1);
    assert_eq!(report["residual"], 0.0);
    assert!(report.get("log").is_none());
}

#[test]
fn solve_with_log_json() {
    let report = json_output(rootfind().args([
        "-f", "json", "solve", "x -> x^2 - 2", "--x0", "1", "--x1", "2", "-t", "1e-9", "--log",
    ]));

    let log = report["log"].as_array().unwrap();
    assert_eq!(log.len(), 5);
    for (i, entry) in log.iter().enumerate() {
        assert_eq!(entry["iter"], i as u64 + 1);
        assert!(entry.get("f(x)").is_some());
    }
}

#[test]
fn solve_with_log_csv() {
    rootfind()
        .args(["-f", "csv", "solve", "x - 5", "--x0", "0", "--x1", "1", "--log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("iter,x_prev,x_curr,x_next,f(x)"));
}

#[test]
fn solve_table_output() {
    rootfind()
        .args(["solve", "cos(x) - x", "--x0", "0", "--x1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Root"))
        .stdout(predicate::str::contains("0.739085"));
}

#[test]
fn solve_negative_seeds() {
    rootfind()
        .args(["-f", "minimal", "solve", "x -> x + 3", "--x0", "-1", "--x1", "-2"])
        .assert()
        .success()
        .stdout("-3\n");
}

#[test]
fn solve_verbose_reports_progress_on_stderr() {
    rootfind()
        .args(["-f", "minimal", "solve", "x - 5", "--x0", "0", "--x1", "1", "--verbose"])
        .assert()
        .success()
        .stdout("5\n")
        .stderr(predicate::str::contains("converged"));
}

#[test]
fn solve_equal_seeds_fails() {
    rootfind()
        .args(["solve", "x -> x^2", "--x0", "3", "--x1", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Initial points must be different"));
}

#[test]
fn solve_constant_function_zero_slope() {
    rootfind()
        .args(["solve", "x -> 1", "--x0", "0", "--x1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zero slope"));
}

#[test]
fn solve_non_convergence() {
    rootfind()
        .args(["solve", "x^3 + x + 1", "--x0", "10", "--x1", "20"])
        .args(["--tolerance", "1e-12", "--max-iterations", "5", "--log"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Iterations"))
        .stderr(predicate::str::contains("Convergence failed after 5 iterations"));
}

#[test]
fn solve_non_convergence_log_json() {
    let output = rootfind()
        .args(["-f", "json", "solve", "x^3 + x + 1", "--x0", "10", "--x1", "20"])
        .args(["--tolerance", "1e-12", "--max-iterations", "5", "--log"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let log: Value = serde_json::from_slice(&output).unwrap();
    let log = log.as_array().unwrap();
    assert_eq!(log.len(), 5);
    assert_eq!(log[4]["iter"], 5);
}

#[test]
fn solve_non_convergence_log_csv() {
    rootfind()
        .args(["-f", "csv", "solve", "x^3 + x + 1", "--x0", "10", "--x1", "20"])
        .args(["--tolerance", "1e-12", "--max-iterations", "5", "--log"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("iter,x_prev,x_curr,x_next,f(x)"))
        .stdout(predicate::str::contains("\n5,"));
}

#[test]
fn solve_rejects_deeply_nested_expression() {
    let function = format!("x -> {}x{}", "(".repeat(50_000), ")".repeat(50_000));
    rootfind()
        .args(["solve", &function, "--x0", "0", "--x1", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nested too deeply"));
}

#[test]
fn solve_rejects_two_argument_function() {
    rootfind()
        .args(["solve", "x * y", "--x0", "0", "--x1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 1 argument"));
}

#[test]
fn solve_rejects_unknown_function() {
    rootfind()
        .args(["solve", "x -> foo(x)", "--x0", "0", "--x1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not callable"));
}

#[test]
fn solve_rejects_zero_tolerance() {
    rootfind()
        .args(["solve", "x - 1", "--x0", "0", "--x1", "2", "--tolerance", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance must be positive"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rootfind.toml");

    rootfind()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    let settings = json_output(rootfind().args(["-f", "json", "config", "show", "--config"]).arg(&path));
    assert_eq!(settings["solver"]["max_iterations"], 1000);
    assert_eq!(settings["solver"]["logging"], false);
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rootfind.toml");
    std::fs::write(&path, "").unwrap();

    rootfind()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    rootfind()
        .args(["config", "init", "--force"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn config_show_defaults_minimal() {
    rootfind()
        .args(["-f", "minimal", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_iterations=1000"));
}

#[test]
fn settings_file_is_applied_and_flags_win() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tight.toml");
    std::fs::write(&path, "[solver]\ntolerance = 1e-12\nmax_iterations = 2\n").unwrap();

    rootfind()
        .args(["solve", "x -> x^2 - 2", "--x0", "1", "--x1", "2", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Convergence failed after 2 iterations"));

    rootfind()
        .args(["-f", "minimal", "solve", "x -> x^2 - 2", "--x0", "1", "--x1", "2"])
        .args(["--max-iterations", "100", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1.414213562"));
}

#[test]
fn settings_file_with_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[solver]\ntol = 1.0\n").unwrap();

    rootfind()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file"));
}
