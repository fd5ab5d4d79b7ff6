//! Replay Script - JSON 스크립트 정의
//!
//! ```json
//! {
//!   "reducers": { "counter": { "kind": "counter", "on": "increment" } },
//!   "steps": [
//!     { "op": "dispatch", "action": { "type": "increment" } },
//!     { "op": "add", "key": "stack", "reducer": { "kind": "stack", "on": "push" } },
//!     { "op": "remove", "key": "counter", "preserveState": true },
//!     { "op": "add", "path": ["child"], "key": "log", "reducer": { "kind": "concat", "on": "log" } }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use combiner_core::{Action, EntryMap, Reducer, ReducerCombiner, ReducerEntry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

// ============================================================================
// ReducerSpec - 내장 reducer 템플릿
// ============================================================================

/// 스크립트에서 쓸 수 있는 reducer 종류
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReducerSpec {
    /// `on` 액션마다 `step`만큼 증가 (기본 0)
    Counter {
        on: String,
        #[serde(default = "default_step")]
        step: i64,
    },

    /// `on` 액션의 값(`payload`, 없으면 `value`)을 배열에 추가 (기본 [])
    Stack { on: String },

    /// `on` 액션의 값을 문자열에 이어 붙임 (기본 "")
    Concat { on: String },

    /// 상태를 그대로 유지
    Passthrough,

    /// 하위 combiner
    Combiner {
        #[serde(default)]
        reducers: IndexMap<String, ReducerSpec>,
    },
}

fn default_step() -> i64 {
    1
}

impl ReducerSpec {
    /// registry 항목으로 변환
    pub fn build(&self, name: &str) -> ReducerEntry {
        match self {
            Self::Counter { on, step } => {
                let (on, step) = (on.clone(), *step);
                Reducer::with_default(json!(0), move |state, action| {
                    if action.is(&on) {
                        json!(state.as_i64().unwrap_or(0).saturating_add(step))
                    } else {
                        state
                    }
                })
                .into()
            }
            Self::Stack { on } => {
                let on = on.clone();
                Reducer::with_default(json!([]), move |mut state, action| {
                    if action.is(&on) {
                        if let Some(items) = state.as_array_mut() {
                            items.push(action.value().clone());
                        }
                    }
                    state
                })
                .into()
            }
            Self::Concat { on } => {
                let on = on.clone();
                Reducer::with_default(json!(""), move |state, action| {
                    if !action.is(&on) {
                        return state;
                    }
                    let suffix = match action.value() {
                        Value::String(s) => s.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    json!(format!("{}{}", state.as_str().unwrap_or_default(), suffix))
                })
                .into()
            }
            Self::Passthrough => Reducer::passthrough().into(),
            Self::Combiner { reducers } => {
                ReducerCombiner::named(name, build_entries(reducers)).into()
            }
        }
    }
}

/// `ReducerSpec` mapping → registry mapping
pub fn build_entries(specs: &IndexMap<String, ReducerSpec>) -> EntryMap {
    specs
        .iter()
        .map(|(key, spec)| (key.clone(), spec.build(key)))
        .collect()
}

// ============================================================================
// Step - 실행 단계
// ============================================================================

/// 스크립트 단계
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// `add_reducer`
    Add {
        #[serde(default)]
        path: Vec<String>,
        key: String,
        reducer: ReducerSpec,
    },

    /// `remove_reducer`
    #[serde(rename_all = "camelCase")]
    Remove {
        #[serde(default)]
        path: Vec<String>,
        key: String,
        #[serde(default)]
        preserve_state: bool,
    },

    /// `update_reducer`
    Update {
        #[serde(default)]
        path: Vec<String>,
        key: String,
        reducer: ReducerSpec,
    },

    /// `Store::dispatch`
    Dispatch { action: Action },
}

fn target(path: &[String], key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path.join("."), key)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add { path, key, .. } => write!(f, "add {}", target(path, key)),
            Self::Remove {
                path,
                key,
                preserve_state,
            } => {
                if *preserve_state {
                    write!(f, "remove {} (preserve)", target(path, key))
                } else {
                    write!(f, "remove {}", target(path, key))
                }
            }
            Self::Update { path, key, .. } => write!(f, "update {}", target(path, key)),
            Self::Dispatch { action } => write!(f, "dispatch {}", action),
        }
    }
}

// ============================================================================
// Script
// ============================================================================

/// replay 스크립트
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    /// 초기 mapping
    #[serde(default)]
    pub reducers: IndexMap<String, ReducerSpec>,

    /// 실행 단계
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script: Script = serde_json::from_value(json!({
            "reducers": {
                "counter": {"kind": "counter", "on": "increment"},
                "child": {"kind": "combiner", "reducers": {"keep": {"kind": "passthrough"}}}
            },
            "steps": [
                {"op": "dispatch", "action": {"type": "increment"}},
                {"op": "remove", "path": ["child"], "key": "keep", "preserveState": true},
                {"op": "update", "key": "counter", "reducer": {"kind": "counter", "on": "increment", "step": 10}}
            ]
        }))
        .unwrap();

        assert_eq!(script.reducers.len(), 2);
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[0].to_string(), "dispatch increment");
        assert_eq!(script.steps[1].to_string(), "remove child.keep (preserve)");
        assert_eq!(script.steps[2].to_string(), "update counter");
    }

    #[test]
    fn test_builtin_reducers() {
        let counter = ReducerSpec::Counter {
            on: "tick".into(),
            step: 2,
        }
        .build("counter");
        let reducer = counter.as_reducer().unwrap();
        assert_eq!(reducer.reduce(None, &Action::new("tick")), json!(2));
        assert_eq!(reducer.reduce(Some(&json!(3)), &Action::new("other")), json!(3));

        let concat = ReducerSpec::Concat { on: "log".into() }.build("log");
        let reducer = concat.as_reducer().unwrap();
        assert_eq!(
            reducer.reduce(Some(&json!("a")), &Action::new("log").with_payload(1)),
            json!("a1")
        );
    }

    #[test]
    fn test_nested_spec_builds_named_combiner() {
        let spec = ReducerSpec::Combiner {
            reducers: IndexMap::from([(
                "items".to_string(),
                ReducerSpec::Stack { on: "push".into() },
            )]),
        };
        let entry = spec.build("child");
        let combiner = entry.as_combiner().unwrap();
        assert_eq!(combiner.name(), "child");
        assert_eq!(combiner.keys(), vec!["items"]);
    }

    #[test]
    fn test_script_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"{"steps": [{"op": "dispatch", "action": {"type": "x"}}]}"#).unwrap();

        let script = Script::from_file(&path).unwrap();
        assert!(script.reducers.is_empty());
        assert_eq!(script.steps.len(), 1);

        assert!(Script::from_file(&dir.path().join("missing.json")).is_err());
    }
}
