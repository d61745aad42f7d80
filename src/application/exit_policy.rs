//! 디스패치 결과를 종료 코드와 오류 스트림 출력으로 바꾸는 정책.

use serde::{Deserialize, Serialize};

use crate::application::ports::Reporter;
use crate::domain::failure::ProcessOutcome;

/// `UnclassifiedFallback::Report`가 사용하는 종료 코드(EX_SOFTWARE).
pub const REPORTED_DEFECT_EXIT_CODE: i32 = 70;

/// 프로세스가 실제로 해야 할 일.
#[derive(Debug)]
pub enum ExitDecision {
    Exit(i32),
    /// 요약하지 않고 기본 실패 경로로 넘긴다.
    Raise(anyhow::Error),
}

/// 미분류 실패를 최종적으로 드러내는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnclassifiedFallback {
    /// 런타임 기본 경로(panic, 종료 코드 101)
    #[default]
    Panic,
    /// 전체 오류 체인을 stderr에 쓰고 70으로 종료
    Report,
}

impl UnclassifiedFallback {
    pub fn raise(self, err: anyhow::Error) -> ! {
        match self {
            Self::Panic => panic!("{err:?}"),
            Self::Report => {
                eprintln!("{err:?}");
                std::process::exit(REPORTED_DEFECT_EXIT_CODE)
            }
        }
    }
}

/// Success -> 0, 분류된 실패 -> 한 줄 + 1, 미분류 -> 출력 없이 Raise.
pub fn decide(outcome: ProcessOutcome, reporter: &dyn Reporter) -> ExitDecision {
    match outcome {
        ProcessOutcome::Success => ExitDecision::Exit(0),
        ProcessOutcome::ClassifiedFailure(err) => {
            reporter.failure(err.discriminator(), &err.to_string());
            ExitDecision::Exit(1)
        }
        ProcessOutcome::UnclassifiedFailure(err) => ExitDecision::Raise(err),
    }
}
