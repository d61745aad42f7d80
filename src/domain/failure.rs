//! 실패 분류 규칙(사용자 대상 오류 vs 미분류 결함)과 프로세스 결과.

use std::fmt;

use thiserror::Error;

use crate::domain::command::TreeError;

/// 사용자가 조치할 수 있는, 이미 알려진 실패 영역.
#[derive(Debug, Error)]
pub enum ClassifiedError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Project(String),

    #[error("{0}")]
    Cache(String),

    #[error("'{command}' exited with {status}")]
    Delegate { command: String, status: String },

    #[error(transparent)]
    CommandTree(#[from] TreeError),
}

impl ClassifiedError {
    /// 오류 스트림에 강조 표시되는 구분자.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::Usage(_) => "UsageError",
            Self::Project(_) => "ProjectError",
            Self::Cache(_) => "CacheError",
            Self::Delegate { .. } => "DelegateError",
            Self::CommandTree(_) => "CommandTreeError",
        }
    }
}

/// 최상위에서 다루는 실패의 닫힌 분류.
#[derive(Debug)]
pub enum Failure {
    Classified(ClassifiedError),
    Unclassified(anyhow::Error),
}

/// 실패 값을 분류한다. `anyhow::Context`로 감싼 경우에도 원본 분류를 찾는다.
pub fn classify(err: anyhow::Error) -> Failure {
    match err.downcast::<ClassifiedError>() {
        Ok(classified) => Failure::Classified(classified),
        Err(other) => Failure::Unclassified(other),
    }
}

/// 디스패치 결과. 만들어지는 즉시 프로세스 종료 방식이 결정된다.
#[derive(Debug)]
pub enum ProcessOutcome {
    Success,
    ClassifiedFailure(ClassifiedError),
    UnclassifiedFailure(anyhow::Error),
}

impl From<Failure> for ProcessOutcome {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Classified(err) => Self::ClassifiedFailure(err),
            Failure::Unclassified(err) => Self::UnclassifiedFailure(err),
        }
    }
}

/// 실패를 처리한 위치(진단 로그 전용).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 해석된 action 실행 중
    Dispatch,
    /// 설정 로딩/트리 조립 등 디스패치 바깥
    Startup,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch => f.write_str("dispatch"),
            Self::Startup => f.write_str("startup"),
        }
    }
}
