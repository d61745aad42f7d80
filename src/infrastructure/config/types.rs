//! 설정 스키마와 병합/해석 규칙.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::exit_policy::UnclassifiedFallback;
use crate::domain::command::{ColorMode, UnknownOptions};

pub const DEFAULT_CACHE_DIR: &str = ".aiqa/cache";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// 출력 형식
    #[serde(default)]
    pub output: OutputConfig,
    /// 옵션 파싱 엄격도
    #[serde(default)]
    pub options: OptionsConfig,
    /// 최상위 실패 처리
    #[serde(default)]
    pub failures: FailuresConfig,
    /// 캐시 위치
    #[serde(default)]
    pub cache: CacheConfig,
    /// 외부 프로그램에 위임하는 명령(명령 이름 -> 실행 사양)
    #[serde(default)]
    pub delegates: HashMap<String, DelegateConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OptionsConfig {
    /// 선언되지 않은 옵션 허용 여부(기본 false)
    pub allow_unknown: Option<bool>,
    /// deprecated: `allow_unknown`의 반대 의미
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FailuresConfig {
    pub unclassified: Option<UnclassifiedFallback>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CacheConfig {
    /// 작업 디렉터리 기준 상대 경로 또는 절대 경로
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DelegateConfig {
    /// 실행할 프로그램
    pub command: Option<String>,
    /// 사용자 인자 앞에 붙는 고정 인자
    pub args: Option<Vec<String>>,
}

impl CliConfig {
    pub fn color(&self) -> ColorMode {
        self.output.color.unwrap_or_default()
    }

    pub fn unknown_options(&self) -> UnknownOptions {
        if self.options.allow_unknown.unwrap_or(false) {
            UnknownOptions::Ignore
        } else {
            UnknownOptions::Reject
        }
    }

    pub fn unclassified_fallback(&self) -> UnclassifiedFallback {
        self.failures.unclassified.unwrap_or_default()
    }

    pub fn cache_dir(&self) -> &str {
        self.cache.dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR)
    }

    pub fn delegate(&self, command: &str) -> Option<&DelegateConfig> {
        self.delegates.get(command)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: CliConfig) {
        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }
        if other.options.allow_unknown.is_some() {
            self.options.allow_unknown = other.options.allow_unknown;
        }
        if other.failures.unclassified.is_some() {
            self.failures.unclassified = other.failures.unclassified;
        }
        if other.cache.dir.is_some() {
            self.cache.dir = other.cache.dir;
        }

        for (name, incoming) in other.delegates {
            if let Some(existing) = self.delegates.get_mut(&name) {
                existing.merge_from(incoming);
            } else {
                self.delegates.insert(name, incoming);
            }
        }
    }
}

impl DelegateConfig {
    pub fn merge_from(&mut self, other: DelegateConfig) {
        if other.command.is_some() {
            self.command = other.command;
        }
        if other.args.is_some() {
            self.args = other.args;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_file_overrides_field_by_field() {
        let mut base: CliConfig = serde_json::from_str(
            r#"{
                "output": { "color": "never" },
                "cache": { "dir": "/var/cache/aiqa" },
                "delegates": { "analyze": { "command": "npx", "args": ["analyzer"] } }
            }"#,
        )
        .unwrap();
        let project: CliConfig = serde_json::from_str(
            r#"{
                "options": { "allow_unknown": true },
                "delegates": { "analyze": { "args": ["analyzer", "--ci"] } }
            }"#,
        )
        .unwrap();

        base.merge_from(project);

        assert_eq!(base.color(), ColorMode::Never);
        assert_eq!(base.unknown_options(), UnknownOptions::Ignore);
        assert_eq!(base.cache_dir(), "/var/cache/aiqa");
        let analyze = base.delegate("analyze").unwrap();
        assert_eq!(analyze.command.as_deref(), Some("npx"));
        assert_eq!(analyze.args.as_deref().unwrap(), ["analyzer", "--ci"]);
    }

    #[test]
    fn defaults_apply_to_empty_config() {
        let config = CliConfig::default();
        assert_eq!(config.color(), ColorMode::Auto);
        assert_eq!(config.unknown_options(), UnknownOptions::Reject);
        assert_eq!(config.unclassified_fallback(), UnclassifiedFallback::Panic);
        assert_eq!(config.cache_dir(), DEFAULT_CACHE_DIR);
        assert!(config.delegate("plan").is_none());
    }
}
