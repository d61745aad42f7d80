//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use crate::application::ports::Reporter;
use crate::domain::command::OptionSpec;
use crate::infrastructure::actions::{
    CacheClearAction, DelegatedAction, DetectFrameworkAction, InitAction,
};
use crate::infrastructure::config::{CliConfig, explicit_config_path};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: CliConfig,
    reporter: Arc<dyn Reporter>,
}

impl AppComposition {
    pub fn new(config: CliConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn reporter(&self) -> Arc<dyn Reporter> {
        self.reporter.clone()
    }

    /// 설정 템플릿 생성 action을 만든다.
    pub fn init_action(&self) -> InitAction {
        InitAction::new(self.reporter.clone(), explicit_config_path())
    }

    /// 캐시 정리 action을 만든다.
    pub fn cache_clear_action(&self) -> CacheClearAction {
        CacheClearAction::new(self.reporter.clone(), self.config.cache_dir())
    }

    /// 프레임워크 감지 action을 만든다.
    pub fn detect_framework_action(&self) -> DetectFrameworkAction {
        DetectFrameworkAction::new(self.reporter.clone(), self.config.cache_dir())
    }

    /// `delegates.<name>` 설정을 사용하는 위임 action을 만든다.
    pub fn delegated_action(&self, name: &str, forwarded: &[OptionSpec]) -> DelegatedAction {
        DelegatedAction::new(name, self.config.delegate(name).cloned(), forwarded.to_vec())
    }
}
