//! 프로세스 전역 경고 스트림.
//!
//! 필터는 시작 시 한 번만 등록되고 이후 바뀌지 않는다. 등록 전에는 모든 경고가 통과한다.

use std::io::{self, Write};
use std::sync::OnceLock;

use crate::domain::warning::{Warning, WarningFilter};

static RELAY: OnceLock<WarningRelay> = OnceLock::new();

/// 필터를 통과한 경고만 대상 스트림에 쓴다.
#[derive(Debug, Clone, Default)]
pub struct WarningRelay {
    filter: WarningFilter,
}

impl WarningRelay {
    pub fn new(filter: WarningFilter) -> Self {
        Self { filter }
    }

    /// 경고를 썼으면 true, 억제했으면 false.
    pub fn relay(&self, warning: &Warning, out: &mut dyn Write) -> io::Result<bool> {
        if !self.filter.admits(warning) {
            tracing::debug!(name = %warning.name, "suppressed warning");
            return Ok(false);
        }
        writeln!(out, "{warning}")?;
        Ok(true)
    }
}

/// 전역 필터를 등록한다. 이미 등록되어 있으면 false를 반환하고 기존 필터를 유지한다.
pub fn install(filter: WarningFilter) -> bool {
    RELAY.set(WarningRelay::new(filter)).is_ok()
}

/// 전역 필터를 거쳐 stderr로 경고를 내보낸다.
pub fn emit(warning: Warning) {
    let fallback = WarningRelay::default();
    let relay = RELAY.get().unwrap_or(&fallback);
    let _ = relay.relay(&warning, &mut io::stderr().lock());
}
