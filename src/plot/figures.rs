//! # 朗道能级图表
//!
//! 使用 `plotters` 绘制能级能量与能级密度随磁场的变化。
//!
//! ## 功能
//! - 能量-磁场图：各能带能级为彩色曲线，化学势为黑色曲线
//! - 密度-磁场图：各能级密度为彩色曲线，总密度为黑色水平线
//! - 密度扫描散点图：多个密度切片叠加在同一画布上，只保留窗口内的点
//! - 根据文件扩展名输出 PNG 或 SVG
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `plot/config.rs` 的 PlotStyle
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, ToybandsError};
use crate::numeric::extract_list;
use crate::physics::constants::{joule_to_ev, DENSITY_DISPLAY_UNIT};
use crate::plot::PlotStyle;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 支持的图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// 从文件扩展名判断格式
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("svg") => Ok(ImageFormat::Svg),
            Some(other) => Err(ToybandsError::UnsupportedFormat(format!(
                "image format '{}' (use png or svg)",
                other
            ))),
            None => Err(ToybandsError::UnsupportedFormat(format!(
                "{} has no image extension",
                path.display()
            ))),
        }
    }
}

/// 可绘制到任意后端的图表
pub trait Figure {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &PlotStyle,
    ) -> Result<()>
    where
        DB::ErrorType: 'static;
}

/// 将图表保存为 PNG 或 SVG
pub fn save_figure<F: Figure>(figure: &F, output_path: &Path, style: &PlotStyle) -> Result<()> {
    match ImageFormat::from_path(output_path)? {
        ImageFormat::Png => {
            let root =
                BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
            figure.draw(&root, style)?;
            root.present()
                .map_err(|e| ToybandsError::PlotError(e.to_string()))?;
        }
        ImageFormat::Svg => {
            let root =
                SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
            figure.draw(&root, style)?;
            root.present()
                .map_err(|e| ToybandsError::PlotError(e.to_string()))?;
        }
    }
    Ok(())
}

fn plot_err<E: std::fmt::Debug>(e: E) -> ToybandsError {
    ToybandsError::PlotError(format!("{:?}", e))
}

/// 数据范围，外扩 5%；无数据或退化时给出可用的区间
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.05 };
        return (min - pad, max + pad);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn field_range(fields: &[f64]) -> (f64, f64) {
    match (fields.first(), fields.last()) {
        (Some(&a), Some(&b)) if a != b => (a.min(b), a.max(b)),
        _ => padded_range(fields.iter().copied()),
    }
}

/// 能量-磁场图，能量以 J 传入、以 eV 显示
pub struct EnergyFigure<'a> {
    pub fields: &'a [f64],
    /// `[band][level][field]`
    pub bundle: &'a [Vec<Vec<f64>>],
    pub colors: &'a [RGBColor],
    /// 各磁场下的化学势，未求得处为 None
    pub mu: &'a [Option<f64>],
}

impl Figure for EnergyFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &PlotStyle,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;

        let (x_min, x_max) = field_range(self.fields);
        let (y_min, y_max) = padded_range(
            self.bundle
                .iter()
                .flatten()
                .flatten()
                .chain(self.mu.iter().flatten())
                .map(|&e| joule_to_ev(e)),
        );

        let mut chart = ChartBuilder::on(root)
            .margin(30)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("B (T)")
            .y_desc("E (eV)")
            .x_label_style(("sans-serif", style.label_font))
            .y_label_style(("sans-serif", style.label_font))
            .axis_desc_style(("sans-serif", style.desc_font))
            .draw()
            .map_err(plot_err)?;

        for (levels, color) in self.bundle.iter().zip(self.colors) {
            for level in levels {
                chart
                    .draw_series(LineSeries::new(
                        self.fields
                            .iter()
                            .zip(level)
                            .map(|(&b, &e)| (b, joule_to_ev(e))),
                        color.stroke_width(style.line_width),
                    ))
                    .map_err(plot_err)?;
            }
        }

        let mu_line: Vec<(f64, f64)> = self
            .fields
            .iter()
            .zip(self.mu)
            .filter_map(|(&b, mu)| mu.map(|e| (b, joule_to_ev(e))))
            .collect();
        if !mu_line.is_empty() {
            chart
                .draw_series(LineSeries::new(
                    mu_line,
                    BLACK.stroke_width(style.line_width),
                ))
                .map_err(plot_err)?;
        }

        Ok(())
    }
}

/// 密度-磁场图，密度以 m⁻² 传入、以 10¹⁶ m⁻² 显示
pub struct DensityFigure<'a> {
    pub fields: &'a [f64],
    /// `[band][level][field]`
    pub bundle: &'a [Vec<Vec<f64>>],
    pub colors: &'a [RGBColor],
    /// 总载流子密度 (m⁻²)
    pub tot_den: f64,
}

impl Figure for DensityFigure<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &PlotStyle,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;

        let (x_min, x_max) = field_range(self.fields);
        let (y_min, y_max) = padded_range(
            self.bundle
                .iter()
                .flatten()
                .flatten()
                .copied()
                .chain(std::iter::once(self.tot_den))
                .map(|n| n / DENSITY_DISPLAY_UNIT),
        );

        let mut chart = ChartBuilder::on(root)
            .margin(30)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("B (T)")
            .y_desc("n (1e16 m^-2)")
            .x_label_style(("sans-serif", style.label_font))
            .y_label_style(("sans-serif", style.label_font))
            .axis_desc_style(("sans-serif", style.desc_font))
            .draw()
            .map_err(plot_err)?;

        for (levels, color) in self.bundle.iter().zip(self.colors) {
            for level in levels {
                chart
                    .draw_series(LineSeries::new(
                        self.fields
                            .iter()
                            .zip(level)
                            .map(|(&b, &n)| (b, n / DENSITY_DISPLAY_UNIT)),
                        color.stroke_width(style.line_width),
                    ))
                    .map_err(plot_err)?;
            }
        }

        let tot = self.tot_den / DENSITY_DISPLAY_UNIT;
        chart
            .draw_series(LineSeries::new(
                vec![(x_min, tot), (x_max, tot)],
                BLACK.stroke_width(style.line_width),
            ))
            .map_err(plot_err)?;

        Ok(())
    }
}

/// 密度扫描散点图，逐个切片累积后一次性绘制
#[derive(Debug, Default)]
pub struct ScatterFigure {
    /// (颜色, 点集)，点的纵坐标为显示单位
    series: Vec<(RGBColor, Vec<(f64, f64)>)>,
    /// 各切片的总密度 (显示单位)
    tot_lines: Vec<f64>,
    fields: Vec<f64>,
}

impl ScatterFigure {
    pub fn new(fields: &[f64]) -> Self {
        Self {
            fields: fields.to_vec(),
            ..Default::default()
        }
    }

    /// 加入一个切片：只保留严格落在 `plotrange` 内的点
    pub fn add_slice(
        &mut self,
        bundle: &[Vec<Vec<f64>>],
        colors: &[RGBColor],
        tot_den: f64,
        plotrange: (f64, f64),
    ) -> Result<()> {
        let (lo, hi) = plotrange;
        for (levels, color) in bundle.iter().zip(colors) {
            for level in levels {
                let mask: Vec<bool> = level.iter().map(|&n| n > lo && n < hi).collect();
                let xs = extract_list(&self.fields, &mask)?;
                let ys = extract_list(level, &mask)?;
                if xs.is_empty() {
                    continue;
                }
                let points = xs
                    .into_iter()
                    .zip(ys)
                    .map(|(b, n)| (b, n / DENSITY_DISPLAY_UNIT))
                    .collect();
                self.series.push((*color, points));
            }
        }
        self.tot_lines.push(tot_den / DENSITY_DISPLAY_UNIT);
        Ok(())
    }

    /// 已累积的点数
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|(_, points)| points.len()).sum()
    }
}

impl Figure for ScatterFigure {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &PlotStyle,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;

        let (x_min, x_max) = field_range(&self.fields);
        let (y_min, y_max) = padded_range(
            self.series
                .iter()
                .flat_map(|(_, points)| points.iter().map(|(_, n)| *n))
                .chain(self.tot_lines.iter().copied()),
        );

        let mut chart = ChartBuilder::on(root)
            .margin(30)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("B (T)")
            .y_desc("n (1e16 m^-2)")
            .x_label_style(("sans-serif", style.label_font))
            .y_label_style(("sans-serif", style.label_font))
            .axis_desc_style(("sans-serif", style.desc_font))
            .draw()
            .map_err(plot_err)?;

        for (color, points) in &self.series {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, style.point_size, color.filled())),
                )
                .map_err(plot_err)?;
        }

        for &tot in &self.tot_lines {
            chart
                .draw_series(LineSeries::new(
                    vec![(x_min, tot), (x_max, tot)],
                    BLACK.stroke_width(style.line_width),
                ))
                .map_err(plot_err)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_format() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out/a.png")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("a.SVG")).unwrap(),
            ImageFormat::Svg
        );
        assert!(matches!(
            ImageFormat::from_path(Path::new("a.pdf")),
            Err(ToybandsError::UnsupportedFormat(_))
        ));
        assert!(ImageFormat::from_path(Path::new("a")).is_err());
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([0.0, 10.0].into_iter());
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
        assert_eq!(padded_range([0.0].into_iter()), (-1.0, 1.0));
    }

    #[test]
    fn test_scatter_keeps_points_inside_window() {
        let fields = [1.0, 2.0, 3.0];
        let mut figure = ScatterFigure::new(&fields);
        let bundle = vec![vec![vec![0.5e16, 1.0e16, 2.0e16]]];
        figure
            .add_slice(&bundle, &[RGBColor(0, 0, 0)], 1.0e16, (0.6e16, 1.5e16))
            .unwrap();

        assert_eq!(figure.point_count(), 1);
        assert_eq!(figure.series[0].1, vec![(2.0, 1.0)]);
        assert_eq!(figure.tot_lines, vec![1.0]);
    }
}
