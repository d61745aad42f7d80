//! `aiqa` 명령 트리 정의.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::dispatch::Dispatcher;
use crate::application::tree::{CommandNode, CommandTree};
use crate::domain::command::{ColorMode, OptionSpec, TreeError};
use crate::infrastructure::actions::{CWD_OPTION, QUIET_OPTION};
use crate::infrastructure::config::CliConfig;
use crate::infrastructure::console::ConsoleReporter;
use crate::interface::composition::AppComposition;

pub const ROOT_COMMAND: &str = "aiqa";
const CWD_SHORT: char = 'C';

/// 루트에 하위 명령을 고정된 순서로 붙이고 고정한다.
pub fn build_command_tree(composition: &AppComposition) -> Result<CommandTree, TreeError> {
    let config = composition.config();
    let mut root = CommandNode::new(ROOT_COMMAND)
        .about("AI-assisted QA toolkit for web projects")
        .version(env!("CARGO_PKG_VERSION"))
        .global_option(
            OptionSpec::value(CWD_OPTION, "DIR", "Run as if started in DIR").short(CWD_SHORT),
        )
        .global_option(OptionSpec::flag(QUIET_OPTION, "Suppress non-error output").short('q'))
        .color(config.color())
        .unknown_options(config.unknown_options());

    root.attach(
        CommandNode::new("init")
            .about("Write a project config template")
            .option(OptionSpec::flag("force", "Overwrite an existing config"))
            .action(composition.init_action()),
    )?;
    root.attach(delegated(
        composition,
        "github-code",
        "Retrieve a GitHub verification code",
        vec![OptionSpec::value("secret", "KEY", "Secret the code is derived from")],
    ))?;
    root.attach(cache_group(composition)?)?;
    root.attach(
        CommandNode::new("detect-framework")
            .about("Detect the web framework from package.json")
            .option(OptionSpec::flag("force", "Ignore the cached result"))
            .action(composition.detect_framework_action()),
    )?;
    root.attach(delegated(
        composition,
        "analyze",
        "Analyze the project",
        vec![OptionSpec::flag("force", "Re-run even if results are cached")],
    ))?;
    root.attach(delegated(
        composition,
        "plan",
        "Plan tests from the analysis",
        vec![OptionSpec::flag("force", "Re-run even if results are cached")],
    ))?;
    root.attach(delegated(
        composition,
        "generate",
        "Generate tests from the plan",
        vec![OptionSpec::flag("force", "Re-run even if results are cached")],
    ))?;

    CommandTree::freeze(root)
}

/// 설정 로딩 전에 기본 설정 트리로 argv를 해석해 `--cwd`를 얻는다.
/// 실제 디스패치와 같은 파서를 쓰므로 passthrough로 넘어가는 인자는 보지 않는다.
/// 지정이 없거나 해석할 수 없으면 `.`.
pub fn working_dir_hint(argv: &[OsString]) -> PathBuf {
    let composition = AppComposition::new(
        CliConfig::default(),
        Arc::new(ConsoleReporter::new(ColorMode::Never)),
    );
    let hint = build_command_tree(&composition).ok().and_then(|tree| {
        let reporter = composition.reporter();
        Dispatcher::new(tree, reporter).preview(argv)
    });

    hint.and_then(|invocation| invocation.options.value(CWD_OPTION).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn cache_group(composition: &AppComposition) -> Result<CommandNode, TreeError> {
    CommandNode::new("cache")
        .about("Manage cached results")
        .subcommand(
            CommandNode::new("clear")
                .about("Clear the cache")
                .option(OptionSpec::flag("force-purge", "Remove the cache directory itself"))
                .action(composition.cache_clear_action()),
        )
}

fn delegated(
    composition: &AppComposition,
    name: &str,
    about: &str,
    options: Vec<OptionSpec>,
) -> CommandNode {
    let action = composition.delegated_action(name, &options);
    options
        .into_iter()
        .fold(CommandNode::new(name).about(about), CommandNode::option)
        .passthrough("ARGS")
        .action(action)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::testing::CaptureReporter;

    fn tree() -> CommandTree {
        let composition = AppComposition::new(
            CliConfig::default(),
            Arc::new(CaptureReporter::default()),
        );
        build_command_tree(&composition).unwrap()
    }

    fn visit(node: &CommandNode, f: &mut dyn FnMut(&CommandNode)) {
        f(node);
        for child in node.children() {
            visit(child, f);
        }
    }

    fn argv(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn working_dir_hint_reads_every_cwd_form() {
        assert_eq!(working_dir_hint(&argv(&["aiqa", "plan"])), PathBuf::from("."));
        assert_eq!(working_dir_hint(&argv(&["aiqa", "-qC", "proj", "plan"])), PathBuf::from("proj"));
        assert_eq!(working_dir_hint(&argv(&["aiqa", "-C", "proj", "plan"])), PathBuf::from("proj"));
        assert_eq!(working_dir_hint(&argv(&["aiqa", "-Cproj", "plan"])), PathBuf::from("proj"));
        assert_eq!(working_dir_hint(&argv(&["aiqa", "--cwd=proj", "plan"])), PathBuf::from("proj"));
        assert_eq!(
            working_dir_hint(&argv(&["aiqa", "--cwd", "a", "plan", "--cwd", "b"])),
            PathBuf::from("b")
        );
    }

    #[test]
    fn working_dir_hint_ignores_passthrough_arguments() {
        assert_eq!(
            working_dir_hint(&argv(&["aiqa", "analyze", "src", "-C", "other"])),
            PathBuf::from(".")
        );
        assert_eq!(
            working_dir_hint(&argv(&["aiqa", "-C", "proj", "analyze", "src", "--cwd", "other"])),
            PathBuf::from("proj")
        );
    }

    #[test]
    fn working_dir_hint_falls_back_when_argv_does_not_parse() {
        assert_eq!(working_dir_hint(&argv(&["aiqa", "-C", "proj", "bogus"])), PathBuf::from("."));
    }

    #[test]
    fn working_dir_hint_stops_at_double_dash() {
        assert_eq!(
            working_dir_hint(&argv(&["aiqa", "analyze", "--", "-C", "elsewhere"])),
            PathBuf::from(".")
        );
    }

    #[test]
    fn subcommands_are_attached_in_fixed_order() {
        let tree = tree();
        let names: Vec<&str> = tree.root().children().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "init",
                "github-code",
                "cache",
                "detect-framework",
                "analyze",
                "plan",
                "generate"
            ]
        );
    }

    #[test]
    fn every_descendant_inherits_root_settings() {
        let tree = tree();
        let root_settings = tree.root().settings().clone();
        visit(tree.root(), &mut |node: &CommandNode| {
            assert!(node.settings().covers(&root_settings), "{}", node.name());
            assert!(node.settings().has_global(CWD_OPTION));
            assert!(node.settings().has_global(QUIET_OPTION));
        });
    }

    #[test]
    fn only_root_and_cache_group_lack_actions() {
        let tree = tree();
        let mut without_action = Vec::new();
        visit(tree.root(), &mut |node: &CommandNode| {
            if node.action_handle().is_none() {
                without_action.push(node.name().to_string());
            }
        });
        assert_eq!(without_action, vec!["aiqa", "cache"]);
        assert!(tree.find(&["cache", "clear"]).is_some());
    }
}
