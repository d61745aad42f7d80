//! `init`: 프로젝트 설정 템플릿 생성.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::ActionContext;
use crate::application::ports::{CommandAction, Reporter};
use crate::domain::failure::ClassifiedError;
use crate::domain::invocation::Invocation;
use crate::infrastructure::config::{PROJECT_CONFIG_PATH, template_json};

pub struct InitAction {
    reporter: Arc<dyn Reporter>,
    /// 지정되면 작업 디렉터리 대신 이 경로에 쓴다(`AIQA_CONFIG`).
    target: Option<PathBuf>,
}

impl InitAction {
    pub fn new(reporter: Arc<dyn Reporter>, target: Option<PathBuf>) -> Self {
        Self { reporter, target }
    }
}

#[async_trait]
impl CommandAction for InitAction {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let ctx = ActionContext::from_invocation(invocation);
        let path = self
            .target
            .clone()
            .unwrap_or_else(|| ctx.cwd.join(PROJECT_CONFIG_PATH));

        let exists = fs::try_exists(&path)
            .await
            .with_context(|| format!("failed to check {}", path.display()))?;
        if exists && !invocation.options.flag("force") {
            return Err(ClassifiedError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
            .into());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, template_json()?)
            .await
            .with_context(|| format!("failed to create config template at {}", path.display()))?;

        ctx.say(self.reporter.as_ref(), &format!("created {}", path.display()));
        Ok(())
    }
}
