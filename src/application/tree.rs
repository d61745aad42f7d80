//! 명령 트리 조립(attach)과 상속 설정 전파(propagate).
//!
//! 1단계: `CommandNode`를 조립하며 `attach`마다 즉시 전파한다.
//! 2단계: `CommandTree::freeze`로 고정한다. 디스패치는 고정된 트리만 받는다.

use std::fmt;
use std::sync::Arc;

use crate::application::ports::CommandAction;
use crate::domain::command::{
    ColorMode, InheritedSettings, OptionSpec, TreeError, UnknownOptions,
};

/// 이름을 가진 CLI 동작 단위.
#[derive(Clone)]
pub struct CommandNode {
    name: String,
    about: String,
    version: Option<String>,
    options: Vec<OptionSpec>,
    passthrough: Option<String>,
    settings: InheritedSettings,
    action: Option<Arc<dyn CommandAction>>,
    children: Vec<CommandNode>,
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("settings", &self.settings)
            .field("has_action", &self.action.is_some())
            .field("children", &self.children)
            .finish()
    }
}

impl CommandNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            about: String::new(),
            version: None,
            options: Vec::new(),
            passthrough: None,
            settings: InheritedSettings::default(),
            action: None,
            children: Vec::new(),
        }
    }

    pub fn about(mut self, about: &str) -> Self {
        self.about = about.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// 이 노드에서만 인식하는 옵션.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// 이 노드와 모든 하위 노드가 인식하는 옵션.
    pub fn global_option(mut self, option: OptionSpec) -> Self {
        self.settings.add_global(option);
        self
    }

    pub fn color(mut self, color: ColorMode) -> Self {
        self.settings.set_color(color);
        self
    }

    pub fn unknown_options(mut self, policy: UnknownOptions) -> Self {
        self.settings.set_unknown_options(policy);
        self
    }

    /// 남은 인자를 그대로 모으는 trailing 위치 인자를 선언한다.
    pub fn passthrough(mut self, value_name: &str) -> Self {
        self.passthrough = Some(value_name.to_string());
        self
    }

    pub fn action(mut self, action: impl CommandAction + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// `attach`의 소유권 이동 버전(빌더 체인용).
    pub fn subcommand(mut self, child: CommandNode) -> Result<Self, TreeError> {
        self.attach(child)?;
        Ok(self)
    }

    /// 자식을 등록하고 즉시 상속 설정을 전파한다.
    /// 같은 이름의 형제가 있으면 아무것도 붙이지 않고 실패한다.
    pub fn attach(&mut self, mut child: CommandNode) -> Result<(), TreeError> {
        if self.child(&child.name).is_some() {
            return Err(TreeError::DuplicateCommand {
                parent: self.name.clone(),
                name: child.name,
            });
        }

        propagate_settings(&self.settings, &mut child)?;
        tracing::trace!(parent = %self.name, child = %child.name, "attached subcommand");
        self.children.push(child);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about_text(&self) -> &str {
        &self.about
    }

    pub fn version_text(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn local_options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn passthrough_name(&self) -> Option<&str> {
        self.passthrough.as_deref()
    }

    pub fn settings(&self) -> &InheritedSettings {
        &self.settings
    }

    pub fn action_handle(&self) -> Option<&Arc<dyn CommandAction>> {
        self.action.as_ref()
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// 상속 + 로컬 옵션 전체(파싱 대상).
    pub fn recognized_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.settings.global_options().iter().chain(self.options.iter())
    }
}

/// 부모의 상속 설정을 자식(과 그 하위 트리)에 복사한다.
/// 부모의 action이나 다른 자식은 복사하지 않는다.
pub fn propagate(parent: &CommandNode, child: &mut CommandNode) -> Result<(), TreeError> {
    propagate_settings(&parent.settings, child)
}

fn propagate_settings(parent: &InheritedSettings, child: &mut CommandNode) -> Result<(), TreeError> {
    child.settings.absorb(parent);
    check_options(child)?;

    let snapshot = child.settings.clone();
    for grandchild in &mut child.children {
        propagate_settings(&snapshot, grandchild)?;
    }
    Ok(())
}

/// 노드가 인식하는 옵션끼리, 그리고 파서 예약 플래그와 겹치지 않는지 검사한다.
fn check_options(node: &CommandNode) -> Result<(), TreeError> {
    let conflict = |option: &OptionSpec, other: String| TreeError::OptionConflict {
        command: node.name.clone(),
        option: option.long.clone(),
        other,
    };

    let options: Vec<&OptionSpec> = node.recognized_options().collect();
    for (index, &option) in options.iter().enumerate() {
        if let Some(earlier) = options[..index].iter().find(|o| o.clashes_with(option)) {
            return Err(conflict(option, format!("option '--{}'", earlier.long)));
        }
        if option.long == "help" || option.short == Some('h') {
            return Err(conflict(option, "the built-in help flag".to_string()));
        }
        if node.version.is_some() && (option.long == "version" || option.short == Some('V')) {
            return Err(conflict(option, "the built-in version flag".to_string()));
        }
    }
    Ok(())
}

/// 조립이 끝난 불변 명령 트리.
#[derive(Debug, Clone)]
pub struct CommandTree {
    root: CommandNode,
}

impl CommandTree {
    /// 모든 간선에 전파를 한 번 더 적용해 고정한다(멱등이므로 결과는 같다).
    pub fn freeze(mut root: CommandNode) -> Result<Self, TreeError> {
        check_options(&root)?;
        let snapshot = root.settings.clone();
        for child in &mut root.children {
            propagate_settings(&snapshot, child)?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// 루트 이후 이름 경로로 노드를 찾는다. 빈 경로는 루트.
    pub fn find(&self, path: &[&str]) -> Option<&CommandNode> {
        path.iter()
            .try_fold(&self.root, |node, name| node.child(name))
    }
}
