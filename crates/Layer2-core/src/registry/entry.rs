//! Registry Entry - 레지스트리 항목 정의

use super::combiner::ReducerCombiner;
use combiner_foundation::{CombineOptions, Reducer};

// ============================================================================
// ReducerEntry - 항목 값
// ============================================================================

/// combiner mapping의 값: leaf reducer 또는 하위 combiner
#[derive(Debug, Clone)]
pub enum ReducerEntry {
    /// 상태 전이 함수
    Leaf(Reducer),

    /// 하위 트리
    Nested(ReducerCombiner),
}

impl ReducerEntry {
    /// 하위 combiner 여부
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    pub fn as_reducer(&self) -> Option<&Reducer> {
        match self {
            Self::Leaf(reducer) => Some(reducer),
            Self::Nested(_) => None,
        }
    }

    pub fn as_combiner(&self) -> Option<&ReducerCombiner> {
        match self {
            Self::Leaf(_) => None,
            Self::Nested(combiner) => Some(combiner),
        }
    }

    /// 조합용 reducer로 변환 (하위 combiner는 재귀 조합)
    pub(crate) fn resolve(&self, options: &CombineOptions) -> Reducer {
        match self {
            Self::Leaf(reducer) => reducer.clone(),
            Self::Nested(combiner) => combiner.combine_reducers_with(options),
        }
    }

    /// 로그용 종류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Nested(_) => "nested",
        }
    }
}

impl From<Reducer> for ReducerEntry {
    fn from(reducer: Reducer) -> Self {
        Self::Leaf(reducer)
    }
}

impl From<ReducerCombiner> for ReducerEntry {
    fn from(combiner: ReducerCombiner) -> Self {
        Self::Nested(combiner)
    }
}

impl From<&ReducerCombiner> for ReducerEntry {
    fn from(combiner: &ReducerCombiner) -> Self {
        Self::Nested(combiner.clone())
    }
}
