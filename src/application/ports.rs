//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::invocation::Invocation;

/// 명령 노드에 연결되는 비동기 action.
///
/// 스스로 해결할 수 없는 실패는 삼키지 말고 그대로 반환해야 한다.
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    /// stdout 한 줄
    fn line(&self, text: &str);
    /// stderr 원문(도움말 등)
    fn error_text(&self, text: &str);
    /// 분류된 실패 한 줄: `<discriminator> <message>`
    fn failure(&self, discriminator: &str, message: &str);
}
