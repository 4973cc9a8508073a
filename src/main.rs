//! # toybands - 二维体系朗道能级模拟
//!
//! 为二维 Dirac 能带与常规抛物线能带构建朗道能级、Gaussian 展宽的态密度与
//! 积分态密度，并求解给定总载流子密度下的化学势。
//!
//! ## 子命令
//! - `enplot`  - 能级能量与化学势随磁场的变化
//! - `denplot` - 能级密度随磁场的变化
//! - `simu`    - 逐步改变能带密度的扫描
//! - `show`    - 打印体系参数表
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (体系 JSON 与密度 CSV)
//!   │     ├── models/    (能带与多能带体系)
//!   │     ├── sweep/     (并行磁场扫描与密度切片)
//!   │     ├── plot/      (图表生成)
//!   │     └── export/    (CSV 导出)
//!   ├── physics/    (常数、朗道能级、态密度)
//!   ├── numeric/    (网格、求积、积分器)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod export;
mod models;
mod numeric;
mod parsers;
mod physics;
mod plot;
mod sweep;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
