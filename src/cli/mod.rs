//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `enplot`: 朗道能级能量随磁场的变化及化学势
//! - `denplot`: 朗道能级对应密度随磁场的变化
//! - `simu`: 逐步改变各能带密度的密度-磁场扫描
//! - `show`: 打印体系参数表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, plot, simu, show

pub mod common;
pub mod plot;
pub mod show;
pub mod simu;

use clap::{Parser, Subcommand};

/// toybands - 二维体系朗道能级与化学势模拟
#[derive(Parser)]
#[command(name = "toybands")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A toy band model for Landau levels in 2D Dirac and conventional bands", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Plot Landau level energies and the chemical potential versus magnetic field
    Enplot(plot::PlotArgs),

    /// Plot the density of each Landau level versus magnetic field
    Denplot(plot::PlotArgs),

    /// Sweep band densities step by step and scatter the level densities versus field
    Simu(simu::SimuArgs),

    /// Print the band table of the system
    Show(show::ShowArgs),
}
