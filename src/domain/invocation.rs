//! 해석된 명령 1회 실행에 전달되는 입력.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Value(Option<String>),
}

/// 옵션 id -> 파싱된 값.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: BTreeMap<String, OptionValue>,
}

impl ParsedOptions {
    pub fn insert(&mut self, id: &str, value: OptionValue) {
        self.values.insert(id.to_string(), value);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// 미선언 또는 값 옵션이면 false.
    pub fn flag(&self, id: &str) -> bool {
        matches!(self.values.get(id), Some(OptionValue::Flag(true)))
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(OptionValue::Value(Some(v))) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// 루트부터 선택된 노드까지의 경로, 옵션, 추가 인자.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub path: Vec<String>,
    pub options: ParsedOptions,
    pub passthrough: Vec<String>,
}

impl Invocation {
    /// 공백으로 이은 명령 경로(예: `aiqa cache clear`).
    pub fn command_line(&self) -> String {
        self.path.join(" ")
    }
}
