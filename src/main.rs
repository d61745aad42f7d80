//! `aiqa` 바이너리 진입점.

use aiqa::application::exit_policy::{self, ExitDecision};
use aiqa::domain::failure::Phase;
use aiqa::domain::warning::WarningFilter;
use aiqa::infrastructure::console::ConsoleReporter;
use aiqa::infrastructure::{logging, warnings};
use aiqa::{CliSession, handle_top_level_failure};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    warnings::install(WarningFilter::startup_default());
    logging::init();

    let mut session = CliSession::default();
    let outcome = match session.dispatch(std::env::args_os()).await {
        Ok(outcome) => outcome,
        Err(err) => handle_top_level_failure(err, Phase::Startup),
    };

    let reporter = ConsoleReporter::new(session.color());
    match exit_policy::decide(outcome, &reporter) {
        ExitDecision::Exit(code) => std::process::exit(code),
        ExitDecision::Raise(err) => session.fallback().raise(err),
    }
}
