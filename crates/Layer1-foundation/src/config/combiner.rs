//! Combiner Config - 통합 설정
//!
//! Store 이름/초기 상태와 조합 옵션을 관리하는 CombinerConfig

use crate::combine::CombineOptions;
use crate::core::State;
use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};

/// 설정 파일명
pub const COMBINER_CONFIG_FILE: &str = "combiner.json";

// ============================================================================
// Combiner Config (통합)
// ============================================================================

/// 통합 설정
///
/// 레이어(글로벌, 프로젝트)마다 명시한 값만 `merge`에서 덮어씁니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinerConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Store 설정
    #[serde(default)]
    pub store: StoreConfig,

    /// 조합 옵션 (없으면 기본값)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine: Option<CombineOptions>,
}

fn default_version() -> u32 {
    1
}

impl CombinerConfig {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            ..Self::default()
        }
    }

    /// 실제로 적용할 조합 옵션
    pub fn combine_options(&self) -> CombineOptions {
        self.combine.clone().unwrap_or_default()
    }

    pub fn with_combine(mut self, options: CombineOptions) -> Self {
        self.combine = Some(options);
        self
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<CombinerConfig>(COMBINER_CONFIG_FILE)? {
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<CombinerConfig>(COMBINER_CONFIG_FILE)?
            {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// 특정 저장소에서만 로드 (없으면 기본값)
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        let mut config = Self::new();
        if let Some(loaded) = store.load_optional::<CombinerConfig>(COMBINER_CONFIG_FILE)? {
            config.merge(loaded);
        }
        Ok(config)
    }

    pub fn save_to(&self, store: &JsonStore) -> Result<()> {
        store.save(COMBINER_CONFIG_FILE, self)
    }

    /// 나중 설정이 우선 (명시된 값만)
    pub fn merge(&mut self, other: CombinerConfig) {
        self.version = self.version.max(other.version);
        self.store.merge(other.store);
        if other.combine.is_some() {
            self.combine = other.combine;
        }
    }
}

// ============================================================================
// Store Config
// ============================================================================

/// 이름이 없을 때 쓰는 Store 이름
pub const DEFAULT_STORE_NAME: &str = "store";

/// Store 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store 이름 (로그용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 초기 상태
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preloaded_state: Option<State>,
}

impl StoreConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_preloaded_state(mut self, state: State) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_STORE_NAME)
    }

    fn merge(&mut self, other: StoreConfig) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.preloaded_state.is_some() {
            self.preloaded_state = other.preloaded_state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer(value: serde_json::Value) -> CombinerConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config = layer(json!({}));
        assert_eq!(config.version, 1);
        assert_eq!(config.store.name(), DEFAULT_STORE_NAME);
        assert!(config.store.preloaded_state.is_none());
        assert!(config.combine.is_none());
        assert!(config.combine_options().warn_unexpected_keys);
    }

    #[test]
    fn test_merge_prefers_later_values() {
        let mut config = CombinerConfig::new();
        config.merge(CombinerConfig {
            version: 1,
            store: StoreConfig::named("app").with_preloaded_state(json!({"counter": 3})),
            combine: Some(CombineOptions::default()),
        });
        config.merge(CombinerConfig {
            version: 2,
            store: StoreConfig::default(),
            combine: Some(CombineOptions::quiet()),
        });

        assert_eq!(config.version, 2);
        assert_eq!(config.store.name(), "app");
        assert_eq!(config.store.preloaded_state, Some(json!({"counter": 3})));
        assert!(!config.combine_options().warn_unexpected_keys);
    }

    #[test]
    fn test_project_without_combine_keeps_global_options() {
        let mut config = CombinerConfig::new();
        config.merge(layer(json!({"combine": {"warnUnexpectedKeys": false}})));
        config.merge(layer(json!({"store": {"name": "proj"}})));

        assert_eq!(config.store.name(), "proj");
        assert_eq!(config.combine_options(), CombineOptions::quiet());
    }

    #[test]
    fn test_explicit_default_name_overrides_global() {
        let mut config = CombinerConfig::new();
        config.merge(layer(json!({"store": {"name": "global-app"}})));
        config.merge(layer(json!({"store": {"name": "store"}})));
        assert_eq!(config.store.name(), "store");

        config.merge(layer(json!({"version": 1})));
        assert_eq!(config.store.name(), "store");
    }

    #[test]
    fn test_save_and_load_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::project(dir.path());

        let missing = CombinerConfig::load_from(&store).unwrap();
        assert_eq!(missing.store.name(), DEFAULT_STORE_NAME);

        let mut config = CombinerConfig::new().with_combine(CombineOptions::quiet());
        config.store = StoreConfig::named("replay");
        config.save_to(&store).unwrap();

        let loaded = CombinerConfig::load_from(&store).unwrap();
        assert_eq!(loaded.store.name(), "replay");
        assert_eq!(loaded.combine, Some(CombineOptions::quiet()));
    }
}
