//! `detect-framework`: package.json 의존성으로 웹 프레임워크를 감지하고 캐시한다.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

use super::ActionContext;
use crate::application::ports::{CommandAction, Reporter};
use crate::domain::failure::ClassifiedError;
use crate::domain::invocation::Invocation;

const CACHE_FILE: &str = "framework.json";
const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "devDependencies", "peerDependencies"];

/// (패키지 이름, 표시 이름). 메타 프레임워크가 기반 라이브러리보다 앞에 온다.
const KNOWN_FRAMEWORKS: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("nuxt", "Nuxt"),
    ("@remix-run/react", "Remix"),
    ("@sveltejs/kit", "SvelteKit"),
    ("astro", "Astro"),
    ("@angular/core", "Angular"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("react", "React"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FrameworkReport {
    pub package: Option<String>,
    pub frameworks: Vec<String>,
}

impl FrameworkReport {
    fn summary(&self) -> String {
        if self.frameworks.is_empty() {
            "no known framework detected".to_string()
        } else {
            format!("detected: {}", self.frameworks.join(", "))
        }
    }
}

/// 매니페스트에 선언된 의존성 기준으로 프레임워크 목록을 만든다.
pub fn detect_frameworks(manifest: &Value) -> FrameworkReport {
    let declared = |package: &str| {
        DEPENDENCY_SECTIONS
            .iter()
            .any(|section| manifest.get(section).and_then(|deps| deps.get(package)).is_some())
    };

    FrameworkReport {
        package: manifest
            .get("name")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        frameworks: KNOWN_FRAMEWORKS
            .iter()
            .filter(|(package, _)| declared(package))
            .map(|(_, label)| label.to_string())
            .collect(),
    }
}

pub struct DetectFrameworkAction {
    reporter: Arc<dyn Reporter>,
    cache_dir: String,
}

impl DetectFrameworkAction {
    pub fn new(reporter: Arc<dyn Reporter>, cache_dir: &str) -> Self {
        Self {
            reporter,
            cache_dir: cache_dir.to_string(),
        }
    }
}

#[async_trait]
impl CommandAction for DetectFrameworkAction {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let ctx = ActionContext::from_invocation(invocation);
        let cache_path = ctx.resolve(&self.cache_dir).join(CACHE_FILE);

        if !invocation.options.flag("force")
            && let Ok(raw) = fs::read_to_string(&cache_path).await
            && let Ok(cached) = serde_json::from_str::<FrameworkReport>(&raw)
        {
            tracing::debug!(path = %cache_path.display(), "using cached framework report");
            ctx.say(self.reporter.as_ref(), &cached.summary());
            return Ok(());
        }

        let manifest_path = ctx.cwd.join("package.json");
        let raw = match fs::read_to_string(&manifest_path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ClassifiedError::Project(format!(
                    "no package.json found in {}",
                    ctx.cwd.display()
                ))
                .into());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", manifest_path.display()));
            }
        };
        let manifest: Value = serde_json::from_str(&raw).map_err(|err| {
            ClassifiedError::Project(format!("invalid {}: {err}", manifest_path.display()))
        })?;

        let report = detect_frameworks(&manifest);

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&cache_path, serde_json::to_string_pretty(&report)?)
            .await
            .with_context(|| format!("failed to write {}", cache_path.display()))?;

        ctx.say(self.reporter.as_ref(), &report.summary());
        Ok(())
    }
}
