// crates/lh_physics/src/batch.rs

//! 多单元批量推进
//!
//! 各单元的时间步相互独立，可按单元粒度并行。单个单元内部始终串行。
//! 结果按输入顺序返回；某个单元失败不影响其他单元。

use rayon::prelude::*;

use crate::error::ComputeResult;
use crate::state::CellState;
use crate::step::{StepInputs, StepOrchestrator, StepReport};

/// 批量推进策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchStrategy {
    /// 串行执行
    Sequential,
    /// rayon 并行
    Parallel,
    /// 按单元数量自动选择
    #[default]
    Auto,
}

/// 批量推进配置
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// 策略
    pub strategy: BatchStrategy,
    /// 最小并行单元数（`Auto` 下低于此值串行）
    pub min_parallel_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            strategy: BatchStrategy::Auto,
            min_parallel_size: 64,
        }
    }
}

impl BatchConfig {
    /// 指定策略
    pub fn with_strategy(mut self, strategy: BatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// 指定最小并行单元数
    pub fn with_min_parallel_size(mut self, size: usize) -> Self {
        self.min_parallel_size = size;
        self
    }

    fn use_parallel(&self, n_cells: usize) -> bool {
        match self.strategy {
            BatchStrategy::Sequential => false,
            BatchStrategy::Parallel => true,
            BatchStrategy::Auto => n_cells >= self.min_parallel_size,
        }
    }
}

/// 单个单元的推进任务
pub struct CellTask<'a> {
    /// 只读输入
    pub inputs: StepInputs<'a>,
    /// 单元状态
    pub state: &'a mut CellState,
}

/// 推进一批单元
pub fn step_cells(
    orchestrator: &StepOrchestrator<'_>,
    tasks: &mut [CellTask<'_>],
    config: &BatchConfig,
) -> Vec<ComputeResult<StepReport>> {
    if config.use_parallel(tasks.len()) {
        log::debug!("并行推进 {} 个单元", tasks.len());
        tasks
            .par_iter_mut()
            .map(|task| orchestrator.step(&task.inputs, task.state))
            .collect()
    } else {
        tasks
            .iter_mut()
            .map(|task| orchestrator.step(&task.inputs, task.state))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_threshold() {
        let config = BatchConfig::default().with_min_parallel_size(4);
        assert!(!config.use_parallel(3));
        assert!(config.use_parallel(4));
        assert!(!config.with_strategy(BatchStrategy::Sequential).use_parallel(100));
        assert!(config.with_strategy(BatchStrategy::Parallel).use_parallel(1));
    }
}
