//! tracing 구독자 초기화.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "AIQA_LOG";

/// `AIQA_LOG`(없으면 `warn`) 기준으로 stderr 로거를 설치한다. 두 번째 호출은 무시된다.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .try_init();
}
