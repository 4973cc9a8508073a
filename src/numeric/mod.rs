//! # 数值计算模块
//!
//! 提供态密度积分所需的数值工具。
//!
//! ## 子模块
//! - `quadrature`: 自适应 Gauss-Kronrod 求积
//! - `integrator`: 能量网格上的增量累积积分（上升/下降两个方向）
//! - `grid`: 等间距网格、线性插值等序列工具
//!
//! ## 依赖关系
//! - 被 `physics/dos.rs`, `models/`, `commands/` 使用
//! - 无外部依赖

pub mod grid;
pub mod integrator;
pub mod quadrature;

pub use grid::{add_list, extract_list, interp, linspace, step};
pub use integrator::{falling_integral, rising_integral};
