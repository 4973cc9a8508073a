//! # 绘图模块
//!
//! 能级能量图、能级密度图与密度扫描散点图的生成。
//!
//! ## 子模块
//! - `config`: 绘图样式
//! - `colors`: jet 色图取色
//! - `figures`: 图表绘制
//! - `save`: 输出路径
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `plotters` 渲染图表

pub mod colors;
pub mod config;
pub mod figures;
pub mod save;

pub use colors::make_n_colors;
pub use config::PlotStyle;
pub use figures::{save_figure, DensityFigure, EnergyFigure, ImageFormat, ScatterFigure};
pub use save::{OutputTarget, DEFAULT_DIR};
