//! 인자 파싱 -> 단일 action 해석/실행 -> 결과 분류까지의 디스패치 루프.

use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::Result;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

use crate::application::ports::Reporter;
use crate::application::tree::{CommandNode, CommandTree};
use crate::domain::command::{ColorMode, OptionKind, OptionSpec, UnknownOptions};
use crate::domain::failure::{ClassifiedError, Phase, ProcessOutcome, classify};
use crate::domain::invocation::{Invocation, OptionValue, ParsedOptions};

const PASSTHROUGH_ID: &str = "passthrough";

/// 고정된 명령 트리를 한 번 실행하는 디스패처.
pub struct Dispatcher {
    tree: CommandTree,
    parser: Command,
    reporter: Arc<dyn Reporter>,
}

impl Dispatcher {
    pub fn new(tree: CommandTree, reporter: Arc<dyn Reporter>) -> Self {
        let parser = build_parser(tree.root());
        Self {
            tree,
            parser,
            reporter,
        }
    }

    /// `argv[0]`은 바이너리 이름. 자신을 소비하므로 action은 프로세스당 최대 1회 실행된다.
    pub async fn run<I, T>(self, argv: I) -> ProcessOutcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let lenient = self.tree.root().settings().unknown_options() == UnknownOptions::Ignore;
        let matches = match self.parse(argv, lenient) {
            Ok(matches) => matches,
            Err(err) => return self.parse_failure(&err),
        };

        let (node, invocation) = match self.resolve(&matches) {
            Ok(resolved) => resolved,
            Err(err) => return handle_top_level_failure(err, Phase::Dispatch),
        };

        let Some(action) = node.action_handle() else {
            tracing::debug!(command = %invocation.command_line(), "resolved command has no action");
            return ProcessOutcome::Success;
        };

        tracing::debug!(command = %invocation.command_line(), "dispatching");
        match action.run(&invocation).await {
            Ok(()) => ProcessOutcome::Success,
            Err(err) => handle_top_level_failure(err, Phase::Dispatch),
        }
    }

    /// 도움말/버전 요청일 때만 출력하고 결과를 돌려준다. 그 밖의 입력은 `None`.
    pub fn help_or_version(&self, argv: &[OsString]) -> Option<ProcessOutcome> {
        match self.parser.clone().try_get_matches_from(argv) {
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Some(self.parse_failure(&err))
            }
            _ => None,
        }
    }

    /// action은 실행하지 않고 argv가 가리키는 호출만 해석한다.
    /// 선언되지 않은 옵션은 정책과 무관하게 건너뛰고, 파싱할 수 없으면 `None`.
    pub fn preview(&self, argv: &[OsString]) -> Option<Invocation> {
        let matches = self.parse(argv.to_vec(), true).ok()?;
        self.resolve(&matches).ok().map(|(_, invocation)| invocation)
    }

    /// 항상 엄격하게 파싱한다. `lenient`이면 선언되지 않은 옵션 토큰만 빼고 다시 파싱한다.
    /// 알 수 없는 하위 명령, 남는 위치 인자, 빠진 하위 명령은 그대로 오류다.
    fn parse(&self, mut argv: Vec<OsString>, lenient: bool) -> Result<ArgMatches, clap::Error> {
        loop {
            let err = match self.parser.clone().try_get_matches_from(&argv) {
                Ok(matches) => return Ok(matches),
                Err(err) => err,
            };
            if !lenient {
                return Err(err);
            }
            let Some(index) = unknown_option_index(&err, &argv) else {
                return Err(err);
            };
            tracing::debug!(option = ?argv[index], "ignoring unknown option");
            argv.remove(index);
        }
    }

    fn resolve(&self, matches: &ArgMatches) -> Result<(&CommandNode, Invocation)> {
        let mut node = self.tree.root();
        let mut level = matches;
        let mut invocation = Invocation {
            path: vec![node.name().to_string()],
            ..Invocation::default()
        };
        collect_options(node, level, &mut invocation.options)?;

        while let Some((name, sub)) = level.subcommand() {
            let Some(child) = node.child(name) else {
                break;
            };
            node = child;
            level = sub;
            invocation.path.push(name.to_string());
            collect_options(node, level, &mut invocation.options)?;
        }

        if node.passthrough_name().is_some()
            && let Some(values) = level.try_get_many::<String>(PASSTHROUGH_ID)?
        {
            invocation.passthrough = values.cloned().collect();
        }

        Ok((node, invocation))
    }

    fn parse_failure(&self, err: &clap::Error) -> ProcessOutcome {
        let color = self.tree.root().settings().color();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let text = render(err, color, io::stdout().is_terminal());
                self.reporter.line(text.trim_end());
                ProcessOutcome::Success
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let text = render(err, color, io::stderr().is_terminal());
                self.reporter.error_text(text.trim_end());
                ProcessOutcome::ClassifiedFailure(ClassifiedError::Usage(
                    "a subcommand is required".to_string(),
                ))
            }
            _ => ProcessOutcome::ClassifiedFailure(ClassifiedError::Usage(usage_summary(
                &err.render().to_string(),
            ))),
        }
    }
}

/// 로컬/외부 catch가 공유하는 단일 분류 지점.
pub fn handle_top_level_failure(err: anyhow::Error, phase: Phase) -> ProcessOutcome {
    tracing::trace!(%phase, "handling top-level failure");
    classify(err).into()
}

/// 더 깊은 단계에서 명시된 값이 얕은 단계 값을 덮어쓴다. 기본값은 빈 자리만 채운다.
fn collect_options(node: &CommandNode, matches: &ArgMatches, options: &mut ParsedOptions) -> Result<()> {
    for option in node.recognized_options() {
        let explicit = matches!(
            matches.value_source(&option.id),
            Some(ValueSource::CommandLine | ValueSource::EnvVariable)
        );
        if !explicit && options.contains(&option.id) {
            continue;
        }

        let value = if option.is_flag() {
            OptionValue::Flag(matches.try_get_one::<bool>(&option.id)?.copied().unwrap_or(false))
        } else {
            OptionValue::Value(matches.try_get_one::<String>(&option.id)?.cloned())
        };
        options.insert(&option.id, value);
    }
    Ok(())
}

/// 파서가 거부한 토큰이 선언되지 않은 옵션(`-x`, `--name`, `--name=v`)이면 그 위치.
fn unknown_option_index(err: &clap::Error, argv: &[OsString]) -> Option<usize> {
    if err.kind() != ErrorKind::UnknownArgument {
        return None;
    }
    let Some(ContextValue::String(arg)) = err.get(ContextKind::InvalidArg) else {
        return None;
    };
    if !arg.starts_with('-') || arg.as_str() == "--" {
        return None;
    }

    let with_value = format!("{arg}=");
    argv.iter()
        .enumerate()
        .skip(1)
        .find(|(_, token)| {
            token
                .to_str()
                .is_some_and(|t| t == arg.as_str() || t.starts_with(&with_value))
        })
        .map(|(index, _)| index)
}

/// 색상이 켜져 있으면 clap 스타일을 ANSI로 유지한다.
fn render(err: &clap::Error, color: ColorMode, stream_is_terminal: bool) -> String {
    let styled = err.render();
    let colored = match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stream_is_terminal,
    };
    if colored {
        styled.ansi().to_string()
    } else {
        styled.to_string()
    }
}

fn usage_summary(rendered: &str) -> String {
    let first = rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("invalid arguments");
    first
        .strip_prefix("error:")
        .unwrap_or(first)
        .trim()
        .to_string()
}

fn build_parser(node: &CommandNode) -> Command {
    let mut cmd = Command::new(node.name().to_string())
        .about(node.about_text().to_string())
        .color(color_choice(node.settings().color()));

    if let Some(version) = node.version_text() {
        cmd = cmd.version(version.to_string());
    }

    for option in node.recognized_options() {
        cmd = cmd.arg(build_arg(option));
    }

    if let Some(value_name) = node.passthrough_name() {
        cmd = cmd.arg(
            Arg::new(PASSTHROUGH_ID)
                .value_name(value_name.to_string())
                .action(ArgAction::Append)
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        );
    }

    if !node.children().is_empty() && node.action_handle().is_none() {
        cmd = cmd.subcommand_required(true).arg_required_else_help(true);
    }

    for child in node.children() {
        cmd = cmd.subcommand(build_parser(child));
    }
    cmd
}

fn build_arg(option: &OptionSpec) -> Arg {
    let mut arg = Arg::new(option.id.clone())
        .long(option.long.clone())
        .help(option.help.clone());
    if let Some(short) = option.short {
        arg = arg.short(short);
    }

    match &option.kind {
        OptionKind::Flag => arg.action(ArgAction::SetTrue),
        OptionKind::Value { value_name } => {
            arg = arg.action(ArgAction::Set).value_name(value_name.clone());
            match &option.default {
                Some(default) => arg.default_value(default.clone()),
                None => arg,
            }
        }
    }
}

fn color_choice(color: ColorMode) -> ColorChoice {
    match color {
        ColorMode::Auto => ColorChoice::Auto,
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
    }
}
