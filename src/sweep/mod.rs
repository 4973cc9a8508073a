//! # 扫描模块
//!
//! 磁场方向的并行扫描与密度方向的切片生成。
//!
//! ## 功能
//! - 磁场值上的并行计算与失败汇总
//! - 各能带密度的线性切片
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;
pub mod slices;

pub use runner::FieldRunner;
pub use slices::{make_slices, total_density_step};
