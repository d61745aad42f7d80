//! Interface layer
//! 명령 트리 정의, 의존성 조립, 프로세스 진입 세션.

pub mod cli;
pub mod composition;
