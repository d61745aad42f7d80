//! aiqa library root.
//! 명령 트리 조립, 디스패치, 종료 정책을 계층별로 외부에 노출한다.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

pub use application::dispatch::{Dispatcher, handle_top_level_failure};
pub use application::exit_policy::{ExitDecision, UnclassifiedFallback};
pub use domain::failure::{ClassifiedError, ProcessOutcome};
pub use interface::cli::CliSession;
