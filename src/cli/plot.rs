//! # enplot / denplot 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/enplot.rs` 与 `commands/denplot.rs`

use super::common::CommonArgs;
use clap::Args;

/// enplot / denplot 参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}
