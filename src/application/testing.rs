//! 테스트 전용 포트 구현.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{CommandAction, Reporter};
use crate::domain::invocation::Invocation;

/// 출력 내용을 메모리에 보관한다.
#[derive(Default)]
pub struct CaptureReporter {
    lines: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl CaptureReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Reporter for CaptureReporter {
    fn line(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }

    fn error_text(&self, text: &str) {
        self.errors.lock().unwrap().push(text.to_string());
    }

    fn failure(&self, discriminator: &str, message: &str) {
        self.errors
            .lock()
            .unwrap()
            .push(format!("{discriminator} {message}"));
    }
}

/// 호출 횟수와 마지막 입력을 기록하는 action.
#[derive(Clone, Default)]
pub struct RecordingAction {
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Invocation>>>,
}

impl RecordingAction {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<Invocation> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandAction for RecordingAction {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(invocation.clone());
        Ok(())
    }
}

/// 매 호출마다 새 오류를 만들어 실패하는 action.
pub struct FailingAction {
    make: Box<dyn Fn() -> anyhow::Error + Send + Sync>,
}

impl FailingAction {
    pub fn new(make: impl Fn() -> anyhow::Error + Send + Sync + 'static) -> Self {
        Self {
            make: Box::new(make),
        }
    }
}

#[async_trait]
impl CommandAction for FailingAction {
    async fn run(&self, _invocation: &Invocation) -> Result<()> {
        Err((self.make)())
    }
}
