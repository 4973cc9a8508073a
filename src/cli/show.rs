//! # show 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/show.rs`

use crate::plot::DEFAULT_DIR;

use clap::Args;
use std::path::PathBuf;

/// show 参数
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// System definition file (JSON table of band records)
    #[arg(long, default_value = "system.json")]
    pub system: PathBuf,

    /// Also stamp the table into <DIR>/<NAME>_sysinfo.csv
    #[arg(long, value_name = "NAME")]
    pub stamp: Option<String>,

    /// Output directory for the stamp
    #[arg(long, default_value = DEFAULT_DIR)]
    pub dir: PathBuf,
}
