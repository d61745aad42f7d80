//! 명령 action 포트 구현체.

mod cache;
mod delegate;
mod framework;
mod init;

use std::path::{Path, PathBuf};

pub use cache::CacheClearAction;
pub use delegate::DelegatedAction;
pub use framework::{DetectFrameworkAction, FrameworkReport, detect_frameworks};
pub use init::InitAction;

use crate::application::ports::Reporter;
use crate::domain::invocation::Invocation;

/// 루트가 선언하고 모든 명령이 상속하는 전역 옵션 id.
pub const CWD_OPTION: &str = "cwd";
pub const QUIET_OPTION: &str = "quiet";

/// 전역 옵션에서 읽어낸 실행 환경.
struct ActionContext {
    cwd: PathBuf,
    quiet: bool,
}

impl ActionContext {
    fn from_invocation(invocation: &Invocation) -> Self {
        Self {
            cwd: invocation
                .options
                .value(CWD_OPTION)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            quiet: invocation.options.flag(QUIET_OPTION),
        }
    }

    /// 상대 경로는 작업 디렉터리 기준으로 해석한다.
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    fn say(&self, reporter: &dyn Reporter, text: &str) {
        if !self.quiet {
            reporter.line(text);
        }
    }
}
