//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `sweep/`, `plot/`, `export/`, `utils/`
//! - 子模块: context, enplot, denplot, simu, show

pub mod context;
pub mod denplot;
pub mod enplot;
pub mod show;
pub mod simu;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Enplot(args) => enplot::execute(args),
        Commands::Denplot(args) => denplot::execute(args),
        Commands::Simu(args) => simu::execute(args),
        Commands::Show(args) => show::execute(args),
    }
}
