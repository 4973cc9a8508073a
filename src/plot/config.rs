//! # 绘图样式
//!
//! 图表尺寸、线宽、字号与色图取值区间，作为显式参数传给各图表。
//!
//! ## 依赖关系
//! - 被 `plot/figures.rs` 与 `commands/` 使用

/// 图表样式
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// 画布宽度 (像素)
    pub width: u32,
    /// 画布高度 (像素)
    pub height: u32,
    /// 曲线线宽
    pub line_width: u32,
    /// 散点半径
    pub point_size: u32,
    /// 刻度字号
    pub label_font: u32,
    /// 坐标轴标题字号
    pub desc_font: u32,
    /// 色图起点 ∈ [0, 1]
    pub vstart: f64,
    /// 色图终点 ∈ [0, 1]
    pub vend: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            line_width: 2,
            point_size: 3,
            label_font: 20,
            desc_font: 24,
            vstart: 0.1,
            vend: 0.9,
        }
    }
}
