//! 바이너리 수준 테스트: 종료 코드와 stderr 실패 형식.
//! 호스트 사용자 설정이 섞이지 않도록 HOME / XDG_CONFIG_HOME을 임시 디렉터리로 돌린다.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aiqa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("aiqa").expect("binary builds");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("AIQA_CONFIG")
        .env_remove("AIQA_LOG");
    cmd
}

fn with_config(dir: &Path, body: &str) -> Command {
    let path = dir.join("aiqa.json");
    std::fs::write(&path, body).unwrap();
    let mut cmd = aiqa(dir);
    cmd.env("AIQA_CONFIG", &path);
    cmd
}

#[test]
fn help_lists_subcommands_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detect-framework"))
        .stdout(predicate::str::contains("--cwd"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn successful_leaf_exits_zero_with_empty_stderr() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path())
        .args(["cache", "clear"])
        .assert()
        .code(0)
        .stdout("cache is already empty\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn quiet_is_inherited_from_root() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path())
        .args(["-q", "cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn classified_failure_prints_one_line_and_exits_one() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path())
        .arg("analyze")
        .assert()
        .code(1)
        .stderr("ConfigError no handler configured for 'analyze' (set delegates.analyze.command)\n");
}

#[test]
fn missing_manifest_reports_project_error() {
    let dir = TempDir::new().unwrap();
    let assert = aiqa(dir.path())
        .args(["detect-framework"])
        .assert()
        .code(1);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("ProjectError no package.json found in"));
}

#[test]
fn init_twice_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".aiqa/config.json").is_file());

    aiqa(dir.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ConfigError "));

    aiqa(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path())
        .arg("bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("UsageError "))
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn bare_invocation_prints_help_then_usage_error() {
    let dir = TempDir::new().unwrap();
    aiqa(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::ends_with("UsageError a subcommand is required\n"));
}

#[test]
fn deprecated_config_key_warns_but_runs() {
    let dir = TempDir::new().unwrap();
    with_config(dir.path(), r#"{"options": {"strict": true}}"#)
        .args(["cache", "clear"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "DeprecationWarning: 'options.strict'",
        ));
}

#[test]
fn malformed_config_takes_the_default_crash_path() {
    let dir = TempDir::new().unwrap();
    with_config(dir.path(), "{ not json")
        .args(["cache", "clear"])
        .assert()
        .code(101)
        .stderr(predicate::str::contains("failed to parse JSON"))
        .stderr(predicate::str::starts_with("ConfigError").not());
}

#[test]
fn help_still_answers_with_malformed_config() {
    let dir = TempDir::new().unwrap();
    with_config(dir.path(), "{ not json")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[cfg(unix)]
#[test]
fn project_config_follows_inherited_cwd() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("proj");
    std::fs::create_dir_all(project.join(".aiqa")).unwrap();
    std::fs::write(
        project.join(".aiqa/config.json"),
        r#"{"delegates": {"analyze": {"command": "sh", "args": ["-c", "exit 0"]}}}"#,
    )
    .unwrap();

    aiqa(dir.path())
        .args(["-C", "proj", "analyze"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn relative_delegate_program_resolves_under_inherited_cwd() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let project = dir.path().join("proj");
    std::fs::create_dir_all(project.join(".aiqa")).unwrap();
    std::fs::create_dir_all(project.join("scripts")).unwrap();
    let script = project.join("scripts/analyze.sh");
    std::fs::write(&script, "#!/bin/sh\npwd > analyzed.txt\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::write(
        project.join(".aiqa/config.json"),
        r#"{"delegates": {"analyze": {"command": "./scripts/analyze.sh"}}}"#,
    )
    .unwrap();

    aiqa(dir.path())
        .args(["-C", "proj", "analyze"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    assert!(project.join("analyzed.txt").is_file());
}

#[cfg(unix)]
#[test]
fn passthrough_cwd_words_do_not_pick_the_project() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".aiqa")).unwrap();
    std::fs::write(
        dir.path().join(".aiqa/config.json"),
        r#"{"delegates": {"analyze": {"command": "sh", "args": ["-c", "echo \"$@\" > args.txt", "analyze"]}}}"#,
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("other/.aiqa")).unwrap();
    std::fs::write(
        dir.path().join("other/.aiqa/config.json"),
        r#"{"delegates": {"analyze": {"command": "sh", "args": ["-c", "exit 9"]}}}"#,
    )
    .unwrap();

    aiqa(dir.path())
        .args(["analyze", "src", "-C", "other"])
        .assert()
        .success();

    let recorded = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
    assert_eq!(recorded.trim(), "src -C other");
}

#[cfg(unix)]
#[test]
fn clustered_short_cwd_picks_the_project() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("proj");
    std::fs::create_dir_all(project.join(".aiqa")).unwrap();
    std::fs::write(
        project.join(".aiqa/config.json"),
        r#"{"delegates": {"analyze": {"command": "sh", "args": ["-c", "touch ran"]}}}"#,
    )
    .unwrap();

    aiqa(dir.path())
        .args(["-qC", "proj", "analyze"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(project.join("ran").is_file());
}

#[test]
fn init_writes_under_inherited_cwd_and_is_read_back() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("proj")).unwrap();

    aiqa(dir.path()).args(["--cwd", "proj", "init"]).assert().success();
    assert!(dir.path().join("proj/.aiqa/config.json").is_file());

    aiqa(dir.path())
        .args(["--cwd", "proj", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ConfigError "));
}

#[cfg(unix)]
#[test]
fn failing_delegate_reports_delegate_error() {
    let dir = TempDir::new().unwrap();
    with_config(
        dir.path(),
        r#"{"delegates": {"generate": {"command": "sh", "args": ["-c", "exit 3"]}}}"#,
    )
    .arg("generate")
    .assert()
    .code(1)
    .stderr("DelegateError 'generate' exited with status 3\n");
}

#[cfg(unix)]
#[test]
fn delegate_receives_forwarded_options_and_passthrough() {
    let dir = TempDir::new().unwrap();
    with_config(
        dir.path(),
        r#"{"delegates": {"plan": {"command": "sh", "args": ["-c", "echo \"$@\" > plan.args", "plan"]}}}"#,
    )
    .args(["plan", "--force", "checkout", "--headless"])
    .assert()
    .success();

    let recorded = std::fs::read_to_string(dir.path().join("plan.args")).unwrap();
    assert_eq!(recorded.trim(), "--force checkout --headless");
}

#[cfg(unix)]
#[test]
fn report_fallback_prints_chain_and_exits_seventy() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("not-executable.sh");
    std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();

    let config = format!(
        r#"{{"failures": {{"unclassified": "report"}}, "delegates": {{"analyze": {{"command": "{}"}}}}}}"#,
        script.display()
    );
    with_config(dir.path(), &config)
        .arg("analyze")
        .assert()
        .code(70)
        .stderr(predicate::str::contains("failed to run"));
}
