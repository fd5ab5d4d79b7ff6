//! Replay - 스크립트를 combiner + store에 적용

use crate::script::{build_entries, ReducerSpec, Script, Step};
use combiner_core::{Reducer, ReducerCombiner, ReducerEntry, Store, StoreController};
use combiner_foundation::{CombinerConfig, Error, Result, State};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// 단계 실행 결과
#[derive(Debug, Clone)]
pub struct StepReport {
    /// 1부터 시작
    pub index: usize,
    pub description: String,
    pub state: State,
}

/// 루트 combiner와 store를 묶은 실행기
pub struct Replay {
    root: ReducerCombiner,
    controller: StoreController,
}

impl Replay {
    pub fn new(reducers: &IndexMap<String, ReducerSpec>, config: &CombinerConfig) -> Result<Self> {
        let root = ReducerCombiner::named("root", build_entries(reducers));
        let store = Store::from_config(Reducer::passthrough(), &config.store);
        let controller = StoreController::bind_with(&root, &store, config.combine_options())?;

        info!(
            "Replay ready: store '{}' with {} root reducers",
            store.name(),
            root.len()
        );

        Ok(Self { root, controller })
    }

    pub fn state(&self) -> State {
        self.controller.store().get_state()
    }

    /// 한 단계 실행
    pub fn apply(&self, step: &Step) -> Result<()> {
        debug!("Applying step: {}", step);
        match step {
            Step::Add { path, key, reducer } => {
                self.resolve(path)?.add_reducer(key.as_str(), reducer.build(key))?;
            }
            Step::Remove {
                path,
                key,
                preserve_state,
            } => {
                self.resolve(path)?.remove_reducer(key, *preserve_state);
            }
            Step::Update { path, key, reducer } => {
                self.resolve(path)?.update_reducer(key.as_str(), reducer.build(key));
            }
            Step::Dispatch { action } => {
                self.controller.store().dispatch(action)?;
            }
        }
        Ok(())
    }

    /// 전체 스크립트 실행 (첫 에러에서 중단)
    pub fn run(script: &Script, config: &CombinerConfig) -> Result<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(script.steps.len());
        Self::run_with(script, config, |report| reports.push(report))?;
        Ok(reports)
    }

    /// 전체 스크립트 실행, 단계가 끝날 때마다 `on_step` 호출
    ///
    /// 실패한 단계 이전의 보고는 모두 전달된 뒤 에러를 반환합니다.
    pub fn run_with(
        script: &Script,
        config: &CombinerConfig,
        mut on_step: impl FnMut(StepReport),
    ) -> Result<()> {
        let replay = Self::new(&script.reducers, config)?;

        for (i, step) in script.steps.iter().enumerate() {
            replay.apply(step).map_err(|e| {
                warn!("Step {} ({}) failed: {}", i + 1, step, e);
                e
            })?;
            on_step(StepReport {
                index: i + 1,
                description: step.to_string(),
                state: replay.state(),
            });
        }

        Ok(())
    }

    /// 경로의 하위 combiner 찾기 (빈 경로는 루트)
    fn resolve(&self, path: &[String]) -> Result<ReducerCombiner> {
        let mut current = self.root.clone();
        for (depth, key) in path.iter().enumerate() {
            let walked = path[..=depth].join(".");
            current = match current.get(key) {
                Some(ReducerEntry::Nested(child)) => child,
                Some(ReducerEntry::Leaf(_)) => {
                    return Err(Error::InvalidInput(format!("'{}' is not a combiner", walked)))
                }
                None => return Err(Error::NotFound(format!("combiner '{}'", walked))),
            };
        }
        Ok(current)
    }
}
