//! 명령 노드가 선언하는 옵션과 부모로부터 상속되는 설정(값 객체).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 옵션 값 형태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// 값 없는 on/off 플래그
    Flag,
    /// `--name <value>` 형태
    Value { value_name: String },
}

/// 명령이 인식하는 단일 옵션 선언.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub id: String,
    pub long: String,
    pub short: Option<char>,
    pub help: String,
    pub kind: OptionKind,
    pub default: Option<String>,
}

impl OptionSpec {
    pub fn flag(long: &str, help: &str) -> Self {
        Self {
            id: long.to_string(),
            long: long.to_string(),
            short: None,
            help: help.to_string(),
            kind: OptionKind::Flag,
            default: None,
        }
    }

    pub fn value(long: &str, value_name: &str, help: &str) -> Self {
        Self {
            id: long.to_string(),
            long: long.to_string(),
            short: None,
            help: help.to_string(),
            kind: OptionKind::Value {
                value_name: value_name.to_string(),
            },
            default: None,
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn is_flag(&self) -> bool {
        matches!(self.kind, OptionKind::Flag)
    }

    /// 같은 파서에 함께 둘 수 없는지(id, long, short 중 하나라도 겹침).
    pub fn clashes_with(&self, other: &OptionSpec) -> bool {
        self.id == other.id
            || self.long == other.long
            || (self.short.is_some() && self.short == other.short)
    }
}

/// 출력 색상 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 대상 스트림이 TTY일 때만 색상 사용
    #[default]
    Auto,
    Always,
    Never,
}

/// 선언되지 않은 옵션을 만났을 때의 처리 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOptions {
    #[default]
    Reject,
    Ignore,
}

/// 부모에서 자식으로 복사되는 설정 스냅샷.
///
/// 전파는 항상 부모 -> 자식 단방향이며, `absorb`는 여러 번 호출해도
/// 첫 호출 이후 결과가 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InheritedSettings {
    global_options: Vec<OptionSpec>,
    color: ColorMode,
    unknown_options: UnknownOptions,
}

impl InheritedSettings {
    pub fn global_options(&self) -> &[OptionSpec] {
        &self.global_options
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn unknown_options(&self) -> UnknownOptions {
        self.unknown_options
    }

    pub fn has_global(&self, id: &str) -> bool {
        self.global_options.iter().any(|o| o.id == id)
    }

    /// 자신이 선언하는 전역 옵션을 추가한다(같은 id는 교체).
    pub fn add_global(&mut self, option: OptionSpec) {
        if let Some(existing) = self.global_options.iter_mut().find(|o| o.id == option.id) {
            *existing = option;
        } else {
            self.global_options.push(option);
        }
    }

    pub fn set_color(&mut self, color: ColorMode) {
        self.color = color;
    }

    pub fn set_unknown_options(&mut self, policy: UnknownOptions) {
        self.unknown_options = policy;
    }

    /// 부모 스냅샷을 병합한다.
    /// 결과 전역 옵션 = 부모 전역 옵션 + (부모에 없는) 자신의 전역 옵션.
    pub fn absorb(&mut self, parent: &InheritedSettings) {
        let mut merged = parent.global_options.clone();
        for own in &self.global_options {
            if !parent.has_global(&own.id) {
                merged.push(own.clone());
            }
        }
        self.global_options = merged;
        self.color = parent.color;
        self.unknown_options = parent.unknown_options;
    }

    /// `other`의 전역 옵션과 정책을 모두 포함하는지 검사한다.
    pub fn covers(&self, other: &InheritedSettings) -> bool {
        self.color == other.color
            && self.unknown_options == other.unknown_options
            && other
                .global_options
                .iter()
                .all(|o| self.global_options.contains(o))
    }
}

/// 명령 트리 조립 단계에서 발견되는 구성 결함.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("command '{parent}' already has a subcommand named '{name}'")]
    DuplicateCommand { parent: String, name: String },

    #[error("option '--{option}' of command '{command}' collides with {other}")]
    OptionConflict {
        command: String,
        option: String,
        other: String,
    },
}
