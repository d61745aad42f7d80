//! 사용자 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합한다.

mod loader;
mod types;

use std::path::Path;

use anyhow::Result;

pub use loader::{
    CONFIG_ENV, PROJECT_CONFIG_PATH, config_paths, explicit_config_path, template_json,
};
pub use types::{
    CacheConfig, CliConfig, DEFAULT_CACHE_DIR, DelegateConfig, FailuresConfig, OptionsConfig,
    OutputConfig,
};

impl CliConfig {
    /// 병합된 최종 설정을 로딩한다. 프로젝트 설정은 `project_root/.aiqa/config.json`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let loaded = loader::load_merged_config(project_root)?;
        if loaded.loaded_paths.is_empty() {
            tracing::debug!(project = %project_root.display(), "no config files found; using defaults");
        } else {
            tracing::debug!(layers = loaded.loaded_paths.len(), "merged config layers");
        }
        Ok(loaded.config)
    }
}
