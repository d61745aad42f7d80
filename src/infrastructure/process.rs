//! 외부 프로그램 탐지/실행 유틸리티.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;

/// 프로그램 이름을 실제 파일 경로로 해석한다.
/// 경로 구분자가 있으면 `cwd` 기준의 그 파일만, 없으면 `PATH` 디렉터리를 앞에서부터 찾는다.
pub fn find_program(command: &str, cwd: &Path) -> Option<PathBuf> {
    let command = command.trim();
    if command.is_empty() {
        return None;
    }

    let given = Path::new(command);
    if given.components().count() > 1 {
        let resolved = cwd.join(given);
        return resolved.is_file().then_some(resolved);
    }

    let search_path = env::var_os("PATH")?;
    env::split_paths(&search_path)
        .flat_map(|dir| candidate_names(command).into_iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

pub fn command_exists(command: &str, cwd: &Path) -> bool {
    find_program(command, cwd).is_some()
}

#[cfg(not(windows))]
fn candidate_names(command: &str) -> Vec<String> {
    vec![command.to_string()]
}

/// 확장자가 없으면 `PATHEXT` 후보를 덧붙인다.
#[cfg(windows)]
fn candidate_names(command: &str) -> Vec<String> {
    let mut names = vec![command.to_string()];
    if Path::new(command).extension().is_none() {
        let exts = env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT;.COM".to_string());
        names.extend(
            exts.split(';')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(|ext| format!("{command}{ext}")),
        );
    }
    names
}

/// stdio를 그대로 물려받아 프로그램을 실행하고 종료 상태를 반환한다.
pub async fn run_inherited(program: &Path, args: &[String], cwd: &Path) -> Result<ExitStatus> {
    tracing::debug!(program = %program.display(), ?args, cwd = %cwd.display(), "spawning delegate");
    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("failed to run '{}'", program.display()))
}
