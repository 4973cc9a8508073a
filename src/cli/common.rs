//! # 公共参数
//!
//! `enplot`、`denplot` 与 `simu` 共用的体系、网格与输出参数。
//!
//! ## 依赖关系
//! - 被 `cli/plot.rs`, `cli/simu.rs` 展开使用
//! - 参数由 `commands/context.rs` 解析为计算上下文

use crate::plot::DEFAULT_DIR;

use clap::Args;
use std::path::PathBuf;

/// 公共参数
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// System definition file (JSON table of band records)
    #[arg(long, default_value = "system.json")]
    pub system: PathBuf,

    /// Magnetic field range in tesla: start end number-of-points
    #[arg(
        long,
        num_args = 3,
        value_names = ["START", "END", "NUM"],
        allow_negative_numbers = true,
        required = true
    )]
    pub bfrange: Vec<f64>,

    /// Energy range in eV: start end number-of-points (the step sets the level broadening)
    #[arg(
        long,
        num_args = 3,
        value_names = ["START", "END", "NUM"],
        allow_negative_numbers = true,
        required = true
    )]
    pub enrange: Vec<f64>,

    /// Number of Landau levels per band
    #[arg(long, default_value_t = 20)]
    pub nmax: usize,

    /// Angle in degrees between the field and the sample normal
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Output directory
    #[arg(long, default_value = DEFAULT_DIR)]
    pub dir: PathBuf,

    /// Output file name; the extension selects the image format (png or svg)
    #[arg(long)]
    pub fnm: Option<String>,

    /// Number of parallel jobs (0 = all CPUs)
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    /// Half-fill the lowest electron level and the highest hole level
    #[arg(long)]
    pub compensate: bool,
}
