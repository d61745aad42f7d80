//! CLI 인터페이스 모듈 묶음.
//! 명령 트리 정의와, 디스패치 바깥(설정 로딩/트리 조립)까지 감싸는 실행 세션.

pub mod command;

use std::ffi::OsString;
use std::sync::Arc;

use anyhow::Result;

pub use command::{ROOT_COMMAND, build_command_tree, working_dir_hint};

use crate::application::dispatch::Dispatcher;
use crate::application::exit_policy::UnclassifiedFallback;
use crate::application::ports::Reporter;
use crate::domain::command::ColorMode;
use crate::domain::failure::{ClassifiedError, ProcessOutcome};
use crate::infrastructure::config::CliConfig;
use crate::infrastructure::console::ConsoleReporter;
use crate::interface::composition::AppComposition;

/// 프로세스 1회 실행 단위. 설정이 로딩되면 색상/미분류 실패 처리 방식이 갱신된다.
#[derive(Debug, Default)]
pub struct CliSession {
    color: ColorMode,
    fallback: UnclassifiedFallback,
}

impl CliSession {
    /// 디스패치 바깥에서 난 실패는 `Err`로 돌려준다(외부 catch 대상).
    pub async fn dispatch<I, T>(&mut self, argv: I) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let project_root = working_dir_hint(&argv);
        let config = match CliConfig::load(&project_root) {
            Ok(config) => config,
            // 설정이 깨져 있어도 도움말/버전 요청에는 답한다.
            Err(err) => return self.help_or_version(&argv).ok_or(err),
        };
        self.color = config.color();
        self.fallback = config.unclassified_fallback();

        let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(self.color));
        let composition = AppComposition::new(config, reporter.clone());
        let tree = build_command_tree(&composition).map_err(ClassifiedError::from)?;

        Ok(Dispatcher::new(tree, reporter).run(argv).await)
    }

    /// 기본 설정으로 조립한 트리에서 도움말/버전만 처리한다.
    fn help_or_version(&self, argv: &[OsString]) -> Option<ProcessOutcome> {
        let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(self.color));
        let composition = AppComposition::new(CliConfig::default(), reporter.clone());
        let tree = build_command_tree(&composition).ok()?;
        Dispatcher::new(tree, reporter).help_or_version(argv)
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn fallback(&self) -> UnclassifiedFallback {
        self.fallback
    }
}
