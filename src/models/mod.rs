//! # 数据模型模块
//!
//! 定义能带、多能带体系及其外部记录格式。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `commands/`, `export/`, `sweep/` 使用
//! - 子模块: record, band, system

pub mod band;
pub mod record;
pub mod system;

pub use band::{Band, Curve, EnergyTable, SpectrumParams};
pub use record::BandRecord;
pub use system::{DataBundle, System};
