//! 프로세스 경고 값과 억제 규칙.

use std::fmt;

/// 이름(종류)과 메시지를 가진 프로세스 경고.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub name: String,
    pub message: String,
}

impl Warning {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn deprecation(message: &str) -> Self {
        Self::new("DeprecationWarning", message)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SuppressRule {
    name: String,
    fragment: String,
}

/// 이름 + 메시지 부분 문자열이 모두 맞는 경고만 버리고 나머지는 통과시킨다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningFilter {
    rules: Vec<SuppressRule>,
}

impl WarningFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시작 시 등록하는 기본 필터.
    pub fn startup_default() -> Self {
        Self::new().suppress("DeprecationWarning", "punycode")
    }

    pub fn suppress(mut self, name: &str, fragment: &str) -> Self {
        self.rules.push(SuppressRule {
            name: name.to_string(),
            fragment: fragment.to_string(),
        });
        self
    }

    pub fn admits(&self, warning: &Warning) -> bool {
        !self
            .rules
            .iter()
            .any(|rule| warning.name == rule.name && warning.message.contains(&rule.fragment))
    }
}
