//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use super::types::{CliConfig, DEFAULT_CACHE_DIR};
use crate::domain::warning::Warning;
use crate::infrastructure::warnings;

pub const CONFIG_ENV: &str = "AIQA_CONFIG";
pub const PROJECT_CONFIG_PATH: &str = ".aiqa/config.json";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: CliConfig,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다. 설정 파일이 없어도 성공한다.
/// 프로젝트 설정은 `project_root` 기준으로 찾는다.
pub(crate) fn load_merged_config(project_root: &Path) -> Result<LoadedConfig> {
    load_from_paths(&config_paths(project_root))
}

pub(crate) fn load_from_paths(paths: &[PathBuf]) -> Result<LoadedConfig> {
    let mut merged = CliConfig::default();
    let mut loaded_paths = Vec::new();

    for path in paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let mut parsed: CliConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        upgrade_deprecated_keys(&mut parsed, path);
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    tracing::debug!(loaded = ?loaded_paths, "config loaded");
    Ok(LoadedConfig {
        config: merged,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순(낮은 -> 높은 우선순위).
pub fn config_paths(project_root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/aiqa/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("aiqa").join("config.json"));
    }

    paths.push(project_root.join(PROJECT_CONFIG_PATH));

    if let Some(path) = explicit_config_path() {
        paths.push(path);
    }

    dedup_paths(paths)
}

/// `AIQA_CONFIG`로 명시된 설정 경로.
pub fn explicit_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV).map(PathBuf::from)
}

pub fn template_json() -> Result<String> {
    let template = json!({
        "output": { "color": "auto" },
        "options": { "allow_unknown": false },
        "failures": { "unclassified": "panic" },
        "cache": { "dir": DEFAULT_CACHE_DIR },
        "delegates": {}
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&template)?))
}

fn upgrade_deprecated_keys(config: &mut CliConfig, path: &Path) {
    let Some(strict) = config.options.strict.take() else {
        return;
    };

    warnings::emit(Warning::deprecation(&format!(
        "'options.strict' in {} is deprecated; use 'options.allow_unknown' instead",
        path.display()
    )));
    if config.options.allow_unknown.is_none() {
        config.options.allow_unknown = Some(!strict);
    }
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
