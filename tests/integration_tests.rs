//! Integration tests for the repolint CLI

use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn repolint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("repolint").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("REPOLINT_RULES__FILE_SIZE__MAX_LINES");
    cmd
}

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

/// a.ts at 501 lines, b.ts at 500, a stray root doc and a proper one
fn scenario() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "a.ts", &"x\n".repeat(501));
    write(root, "b.ts", &"x\n".repeat(500));
    write(root, "NOTES.md", "# notes\n");
    write(root, "docs/guide.md", "# guide\n");
    temp_dir
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    Command::cargo_bin("repolint")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("repository policy"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("languages"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    Command::cargo_bin("repolint")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command() {
    let temp_dir = TempDir::new().unwrap();
    repolint(temp_dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "repolint {}",
            env!("CARGO_PKG_VERSION")
        )));
}

/// Usage errors exit with the cannot-run status
#[test]
fn test_invalid_subcommand() {
    Command::cargo_bin("repolint")
        .unwrap()
        .arg("invalid-command")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_scenario_reports_both_rules() {
    let temp_dir = scenario();

    repolint(temp_dir.path())
        .args(["check", "--all"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.ts"))
        .stdout(predicate::str::contains("501 lines (limit 500)"))
        .stdout(predicate::str::contains("NOTES.md"))
        .stdout(predicate::str::contains("not in allowed root docs list"))
        .stdout(predicate::str::contains("2 policy violations found"))
        .stdout(predicate::str::contains("b.ts").not())
        .stdout(predicate::str::contains("guide.md").not());
}

#[test]
fn test_scenario_with_exceptions_flag() {
    let temp_dir = scenario();
    write(temp_dir.path(), "policy/size-exceptions", "# generated\n\na.ts\n");

    repolint(temp_dir.path())
        .args(["check", "--all", "--exceptions", "policy/size-exceptions"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NOTES.md"))
        .stdout(predicate::str::contains("1 policy violation found"))
        .stdout(predicate::str::contains("a.ts").not());
}

#[test]
fn test_default_exceptions_file_is_discovered() {
    let temp_dir = scenario();
    write(temp_dir.path(), ".repolint-exceptions", "*.ts\n");

    repolint(temp_dir.path())
        .args(["check", "--all"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.ts").not());
}

#[test]
fn test_json_report() {
    let temp_dir = scenario();

    let output = repolint(temp_dir.path())
        .args(["check", "--all", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["violations"].as_array().unwrap().len(), 2);
    assert_eq!(report["violations"][0]["rule"], "file-size");
    assert_eq!(report["violations"][0]["file"], "a.ts");
    assert_eq!(report["violations"][0]["detail"]["line_count"], 501);
    assert_eq!(report["violations"][1]["rule"], "doc-location");
    assert_eq!(report["violations"][1]["detail"]["reason"], "not in allowed root docs list");
    assert_eq!(report["warnings"], serde_json::json!([]));
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp_dir = scenario();
    let run = || {
        repolint(temp_dir.path())
            .args(["check", "--all", "--format", "json"])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_empty_tree_passes() {
    let temp_dir = TempDir::new().unwrap();

    repolint(temp_dir.path())
        .args(["check", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No files to check"));
}

#[test]
fn test_excluded_directories_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "node_modules/pkg/index.js", &"x\n".repeat(2000));
    write(temp_dir.path(), "target/debug/build.rs", &"x\n".repeat(2000));
    write(temp_dir.path(), "src/main.rs", "fn main() {}\n");

    repolint(temp_dir.path())
        .args(["check", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All policy checks passed (1 files)"));
}

#[test]
fn test_max_lines_override() {
    let temp_dir = scenario();

    repolint(temp_dir.path())
        .args(["check", "--all", "--max-lines", "1000"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.ts").not());
}

#[test]
fn test_env_override() {
    let temp_dir = scenario();

    repolint(temp_dir.path())
        .env("REPOLINT_RULES__FILE_SIZE__MAX_LINES", "501")
        .args(["check", "--all"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 policy violation found"));
}

#[test]
fn test_docs_allowlist_and_dir_flags() {
    let temp_dir = scenario();
    write(temp_dir.path(), "policy/root-docs", "# root docs\nNOTES.md\n");

    repolint(temp_dir.path())
        .args(["check", "--all", "--max-lines", "1000"])
        .args(["--docs-allowlist", "policy/root-docs"])
        .assert()
        .success();

    // With another docs dir, docs/ is just one more subdirectory
    repolint(temp_dir.path())
        .args(["check", "--all", "--max-lines", "1000", "--docs-dir", "handbook"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("docs/guide.md"))
        .stdout(predicate::str::contains("should be in the docs directory"));
}

#[test]
fn test_missing_exceptions_file_cannot_run() {
    let temp_dir = scenario();

    repolint(temp_dir.path())
        .args(["check", "--all", "--exceptions", "missing.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot run"))
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_invalid_config_cannot_run() {
    let temp_dir = scenario();

    repolint(temp_dir.path())
        .args(["check", "--all", "--max-lines", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_lines"));

    write(temp_dir.path(), "repolint.toml", "[rules.doc_location]\ndocs_dir = \"a/b\"\n");
    repolint(temp_dir.path())
        .args(["check", "--all"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot run"));
}

#[test]
fn test_repository_config_file() {
    let temp_dir = scenario();
    write(
        temp_dir.path(),
        "repolint.toml",
        "[rules.doc_location]\nenabled = false\n\n[rules.file_size]\nmax_lines = 600\n",
    );

    repolint(temp_dir.path())
        .args(["check", "--all"])
        .assert()
        .success();
}

#[test]
fn test_staged_mode_uses_index() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let repo = Repository::init(root).unwrap();

    write(root, "big.py", &"x = 1\n".repeat(20));
    write(root, "untracked.py", &"x = 1\n".repeat(20));
    write(root, "NOTES.md", "# notes\n");
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("big.py")).unwrap();
    index.add_path(Path::new("NOTES.md")).unwrap();
    index.write().unwrap();

    // Default subcommand is a staged check with default settings
    repolint(root)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NOTES.md"))
        .stdout(predicate::str::contains("1 policy violation found"));

    repolint(root)
        .args(["check", "--max-lines", "10"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("big.py"))
        .stdout(predicate::str::contains("untracked.py").not());

    // Runs from a subdirectory still resolve the repository root
    fs::create_dir_all(root.join("sub")).unwrap();
    repolint(&root.join("sub"))
        .args(["check", "--max-lines", "10"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("big.py"));
}

#[test]
fn test_staged_outside_repository_warns_and_passes() {
    let temp_dir = TempDir::new().unwrap();

    repolint(temp_dir.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cannot query staged files"));
}

#[test]
fn test_languages_command() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "web/app.tsx", "export {}\n");
    write(temp_dir.path(), "api/server.py", "pass\n");
    write(temp_dir.path(), "README.md", "# readme\n");
    write(temp_dir.path(), "node_modules/x/index.js", "\n");

    repolint(temp_dir.path())
        .args(["languages", "--all"])
        .assert()
        .success()
        .stdout(predicate::eq("typescript\npython\n"));

    repolint(temp_dir.path())
        .args(["languages", "--all", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::eq("[\"typescript\",\"python\"]\n"));
}

#[test]
fn test_config_show() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "repolint.toml", "[rules.file_size]\nmax_lines = 300\n");

    repolint(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_lines = 300"))
        .stdout(predicate::str::contains("docs_dir = \"docs\""));

    let output = repolint(temp_dir.path())
        .args(["config", "show", "--format", "json"])
        .output()
        .unwrap();
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["rules"]["file_size"]["max_lines"], 300);
    assert_eq!(config["parallel"]["mode"], "auto");
}

#[test]
fn test_custom_config_flag() {
    let temp_dir = scenario();
    write(temp_dir.path(), "ci/policy.toml", "[rules.file_size]\nmax_lines = 1000\n");

    repolint(temp_dir.path())
        .args(["--config", "ci/policy.toml", "check", "--all"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.ts").not());

    repolint(temp_dir.path())
        .args(["--config", "ci/missing.toml", "check", "--all"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}
