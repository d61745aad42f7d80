//! 설정된 외부 프로그램에 실행을 넘기는 명령(`github-code`, `analyze`, `plan`, `generate`).

use std::process::ExitStatus;

use anyhow::Result;
use async_trait::async_trait;

use super::ActionContext;
use crate::application::ports::CommandAction;
use crate::domain::command::OptionSpec;
use crate::domain::failure::ClassifiedError;
use crate::domain::invocation::Invocation;
use crate::infrastructure::config::DelegateConfig;
use crate::infrastructure::process::{find_program, run_inherited};

pub struct DelegatedAction {
    name: String,
    delegate: Option<DelegateConfig>,
    /// 명령줄에서 지정되면 위임 프로그램에 그대로 넘기는 로컬 옵션
    forwarded: Vec<OptionSpec>,
}

impl DelegatedAction {
    pub fn new(name: &str, delegate: Option<DelegateConfig>, forwarded: Vec<OptionSpec>) -> Self {
        Self {
            name: name.to_string(),
            delegate,
            forwarded,
        }
    }

    /// 고정 인자 + 지정된 옵션 + passthrough 순.
    fn build_args(&self, invocation: &Invocation) -> Vec<String> {
        let mut args = self
            .delegate
            .as_ref()
            .and_then(|d| d.args.clone())
            .unwrap_or_default();

        for option in &self.forwarded {
            if option.is_flag() {
                if invocation.options.flag(&option.id) {
                    args.push(format!("--{}", option.long));
                }
            } else if let Some(value) = invocation.options.value(&option.id) {
                args.push(format!("--{}", option.long));
                args.push(value.to_string());
            }
        }

        args.extend(invocation.passthrough.iter().cloned());
        args
    }
}

#[async_trait]
impl CommandAction for DelegatedAction {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let Some(program) = self
            .delegate
            .as_ref()
            .and_then(|d| d.command.as_deref())
            .filter(|c| !c.trim().is_empty())
        else {
            return Err(ClassifiedError::Config(format!(
                "no handler configured for '{0}' (set delegates.{0}.command)",
                self.name
            ))
            .into());
        };

        let ctx = ActionContext::from_invocation(invocation);
        let Some(resolved) = find_program(program, &ctx.cwd) else {
            return Err(ClassifiedError::Config(format!(
                "program '{program}' for '{}' not found in PATH",
                self.name
            ))
            .into());
        };

        let status = run_inherited(&resolved, &self.build_args(invocation), &ctx.cwd).await?;
        if !status.success() {
            return Err(ClassifiedError::Delegate {
                command: self.name.clone(),
                status: describe(status),
            }
            .into());
        }
        Ok(())
    }
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("status {code}"),
        None => status.to_string(),
    }
}
