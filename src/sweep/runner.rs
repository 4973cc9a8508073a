//! # 磁场扫描执行器
//!
//! 在一组磁场值上并行执行同一计算（IDOS、化学势等）。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果保持磁场顺序
//! - 进度条显示
//! - 单个磁场的失败被记录而不中断整个扫描
//!
//! 每个磁场只读取体系参数，不修改密度，因此可以安全并行；
//! 密度只在两次扫描之间修改。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, ToybandsError};
use crate::utils::progress;

use rayon::prelude::*;

/// 扫描结果统计
#[derive(Debug)]
pub struct SweepResult<T> {
    /// 与输入磁场一一对应，失败处为 None
    pub values: Vec<Option<T>>,
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (磁场, 错误信息)
    pub failures: Vec<(f64, String)>,
}

impl<T> Default for SweepResult<T> {
    fn default() -> Self {
        SweepResult {
            values: Vec::new(),
            success: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }
}

impl<T> SweepResult<T> {
    /// 合并单个磁场的结果
    pub fn merge(&mut self, field: f64, result: Result<T>) {
        match result {
            Ok(value) => {
                self.success += 1;
                self.values.push(Some(value));
            }
            Err(e) => {
                self.failed += 1;
                self.failures.push((field, e.to_string()));
                self.values.push(None);
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }

    /// 要求全部成功，否则返回第一个失败
    pub fn into_complete(self) -> Result<Vec<T>> {
        if let Some((field, err)) = self.failures.into_iter().next() {
            return Err(ToybandsError::Other(format!("B = {} T: {}", field, err)));
        }
        Ok(self.values.into_iter().flatten().collect())
    }
}

/// 磁场扫描执行器
pub struct FieldRunner {
    /// 并行作业数
    jobs: usize,
    /// 是否显示进度条
    show_progress: bool,
}

impl FieldRunner {
    /// 创建新的执行器，`jobs = 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: true,
        }
    }

    /// 关闭进度条
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 在每个磁场上并行执行 `processor`
    pub fn run<T, F>(&self, fields: &[f64], message: &str, processor: F) -> Result<SweepResult<T>>
    where
        T: Send,
        F: Fn(f64) -> Result<T> + Sync + Send,
    {
        let pb = if self.show_progress {
            progress::create_progress_bar(fields.len() as u64, message)
        } else {
            indicatif::ProgressBar::hidden()
        };

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| ToybandsError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<Result<T>> = pool.install(|| {
            fields
                .par_iter()
                .map(|&field| {
                    let result = processor(field);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut sweep = SweepResult::default();
        for (&field, result) in fields.iter().zip(results) {
            sweep.merge(field, result);
        }

        Ok(sweep)
    }
}
