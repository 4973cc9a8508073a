//! # 数据导出模块
//!
//! 将计算结果写为 CSV 文件。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `csv` 库

pub mod writer;

pub use writer::{
    write_databdl_csv, write_mu_csv, write_spectrum_csv, write_system_csv, BundleKind,
};
