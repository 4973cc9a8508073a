//! # simu 子命令 CLI 定义
//!
//! 密度切片可由 `--allden` 与 `--nos` 生成，也可从 CSV 读入。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/simu.rs`

use super::common::CommonArgs;
use clap::Args;
use std::path::PathBuf;

/// simu 参数
#[derive(Args, Debug)]
pub struct SimuArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Densities for each band in m^-2: start1 end1 start2 end2 ...
    #[arg(
        long,
        num_args = 1..,
        allow_negative_numbers = true,
        conflicts_with = "den_csv"
    )]
    pub allden: Vec<f64>,

    /// Number of steps in the density sweep
    #[arg(long)]
    pub nos: Option<usize>,

    /// Headerless CSV with one column per band and one row per step, in cm^-2
    #[arg(long)]
    pub den_csv: Option<PathBuf>,
}
