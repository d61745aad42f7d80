//! `cache clear`: 캐시 디렉터리 정리.

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;

use super::ActionContext;
use crate::application::ports::{CommandAction, Reporter};
use crate::domain::failure::ClassifiedError;
use crate::domain::invocation::Invocation;

pub struct CacheClearAction {
    reporter: Arc<dyn Reporter>,
    cache_dir: String,
}

impl CacheClearAction {
    pub fn new(reporter: Arc<dyn Reporter>, cache_dir: &str) -> Self {
        Self {
            reporter,
            cache_dir: cache_dir.to_string(),
        }
    }
}

#[async_trait]
impl CommandAction for CacheClearAction {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let ctx = ActionContext::from_invocation(invocation);
        let dir = ctx.resolve(&self.cache_dir);

        let exists = fs::try_exists(&dir)
            .await
            .map_err(|e| cache_error(&dir, e))?;
        if !exists {
            ctx.say(self.reporter.as_ref(), "cache is already empty");
            return Ok(());
        }

        // --force-purge는 디렉터리 자체를 지운다.
        if invocation.options.flag("force-purge") {
            fs::remove_dir_all(&dir)
                .await
                .map_err(|e| cache_error(&dir, e))?;
            ctx.say(self.reporter.as_ref(), &format!("removed {}", dir.display()));
            return Ok(());
        }

        let mut removed = 0usize;
        let mut entries = fs::read_dir(&dir).await.map_err(|e| cache_error(&dir, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| cache_error(&dir, e))?
        {
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| cache_error(&path, e))?
                .is_dir();
            let result = if is_dir {
                fs::remove_dir_all(&path).await
            } else {
                fs::remove_file(&path).await
            };
            result.map_err(|e| cache_error(&path, e))?;
            removed += 1;
        }

        tracing::debug!(removed, dir = %dir.display(), "cache cleared");
        ctx.say(
            self.reporter.as_ref(),
            &format!("cleared {removed} cache entries from {}", dir.display()),
        );
        Ok(())
    }
}

fn cache_error(path: &Path, err: io::Error) -> anyhow::Error {
    ClassifiedError::Cache(format!("failed to clear {}: {err}", path.display())).into()
}
