//! # 物理模型模块
//!
//! 二维能带在磁场中的朗道能级、带边能量与展宽态密度。
//!
//! ## 子模块
//! - `constants`: 物理常数与显示单位换算
//! - `landau`: Dirac / 常规色散的朗道能级能量
//! - `density`: 载流子密度与带边能量互相换算
//! - `dos`: Gaussian 展宽的 DOS 与 IDOS
//!
//! ## 依赖关系
//! - 被 `models/band.rs` 使用
//! - 使用 `numeric/` 做积分

pub mod constants;
pub mod density;
pub mod dos;
pub mod landau;

pub use density::{den2en, Dispersion};
pub use landau::{ll_conventional, ll_dirac, Polarity, Spin};
