//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crossterm::style::Stylize;

use crate::application::ports::Reporter;
use crate::domain::command::ColorMode;

/// stdout/stderr에 직접 쓰는 리포터.
pub struct ConsoleReporter {
    color_stderr: bool,
}

impl ConsoleReporter {
    /// Auto면 stderr가 TTY일 때만 구분자를 색칠한다.
    pub fn new(color: ColorMode) -> Self {
        let color_stderr = match color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stderr().is_terminal(),
        };
        Self { color_stderr }
    }
}

impl Reporter for ConsoleReporter {
    fn line(&self, text: &str) {
        println!("{text}");
    }

    fn error_text(&self, text: &str) {
        eprintln!("{text}");
    }

    fn failure(&self, discriminator: &str, message: &str) {
        eprintln!("{}", format_failure(discriminator, message, self.color_stderr));
    }
}

fn format_failure(discriminator: &str, message: &str, color: bool) -> String {
    if color {
        format!("{} {message}", discriminator.red())
    } else {
        format!("{discriminator} {message}")
    }
}
