//! Domain layer
//! 명령 트리/실패 분류/경고 규칙을 외부 의존성 없이 표현한다.

pub mod command;
pub mod failure;
pub mod invocation;
pub mod warning;
