//! # 计算上下文
//!
//! 把公共命令行参数解析为体系、磁场网格、能量网格、展宽参数与输出位置。
//!
//! ## 依赖关系
//! - 被 `commands/enplot.rs`, `commands/denplot.rs`, `commands/simu.rs` 使用
//! - 使用 `parsers/system_json.rs` 读取体系
//! - 使用 `numeric/grid.rs` 生成网格

use crate::cli::common::CommonArgs;
use crate::error::{Result, ToybandsError};
use crate::models::{SpectrumParams, System};
use crate::numeric::{linspace, step};
use crate::parsers::parse_system_file;
use crate::physics::constants::{ev_to_joule, joule_to_ev};
use crate::plot::{OutputTarget, PlotStyle};
use crate::sweep::FieldRunner;
use crate::utils::output;

/// 一次运行所需的全部输入
pub struct RunContext {
    pub system: System,
    /// 磁场网格 (T)
    pub fields: Vec<f64>,
    /// 能量网格 (J)
    pub energies: Vec<f64>,
    pub params: SpectrumParams,
    pub target: OutputTarget,
    pub style: PlotStyle,
    jobs: usize,
}

/// 解析 `start end count` 三元组
fn parse_range(values: &[f64], name: &str, min_count: usize) -> Result<(f64, f64, usize)> {
    let [start, end, count] = values else {
        return Err(ToybandsError::InvalidArgument(format!(
            "--{} expects start, end and number of points",
            name
        )));
    };
    if !start.is_finite() || !end.is_finite() || !count.is_finite() || *count < min_count as f64 {
        return Err(ToybandsError::InvalidArgument(format!(
            "--{} needs finite bounds and at least {} points",
            name, min_count
        )));
    }
    if count.fract() != 0.0 {
        return Err(ToybandsError::InvalidArgument(format!(
            "--{} number of points must be an integer, got {}",
            name, count
        )));
    }
    Ok((*start, *end, *count as usize))
}

/// 能量网格必须从低到高
fn check_energy_bounds(start: f64, end: f64) -> Result<()> {
    if !(start < end) {
        return Err(ToybandsError::InvalidArgument(format!(
            "--enrange start ({}) must be below end ({})",
            start, end
        )));
    }
    Ok(())
}

impl RunContext {
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        if args.nmax == 0 {
            return Err(ToybandsError::InvalidArgument(
                "--nmax must be at least 1".to_string(),
            ));
        }

        let system = parse_system_file(&args.system)?;

        let (b_start, b_end, b_count) = parse_range(&args.bfrange, "bfrange", 1)?;
        let fields = linspace(b_start, b_end, b_count);

        let (e_start, e_end, e_count) = parse_range(&args.enrange, "enrange", 2)?;
        check_energy_bounds(e_start, e_end)?;
        let energies = linspace(ev_to_joule(e_start), ev_to_joule(e_end), e_count);
        let sigma = step(&energies).unwrap_or(0.0);
        if sigma <= 0.0 {
            return Err(ToybandsError::InvalidArgument(
                "--enrange step is too small to resolve".to_string(),
            ));
        }

        let params =
            SpectrumParams::new(args.nmax, args.angle, sigma).with_compensation(args.compensate);
        let target = OutputTarget::new(&args.dir, args.fnm.as_deref())?;

        Ok(Self {
            system,
            fields,
            energies,
            params,
            target,
            style: PlotStyle::default(),
            jobs: args.jobs,
        })
    }

    /// 磁场扫描执行器
    pub fn runner(&self) -> FieldRunner {
        FieldRunner::new(self.jobs)
    }

    /// 打印运行概要
    pub fn print_summary(&self) {
        output::print_info("Run parameters");
        output::print_param("bands", &self.system.len().to_string());
        output::print_param(
            "total density",
            &format!("{:.4e} m^-2", self.system.tot_density()),
        );
        output::print_param("field points", &self.fields.len().to_string());
        output::print_param("energy points", &self.energies.len().to_string());
        output::print_param("sigma", &format!("{:.4e} eV", joule_to_ev(self.params.sigma)));
        output::print_param("levels per band", &self.params.n_max.to_string());
        output::print_param("angle", &format!("{}°", self.params.angle));
        output::print_param("jobs", &self.runner().jobs().to_string());
        if self.params.compensate {
            output::print_info("Zero-level compensation enabled");
        }
    }

    /// 创建输出目录
    pub fn prepare_output(&self) -> Result<()> {
        if self.target.ensure_dir()? {
            output::print_info(&format!(
                "Created output directory '{}'",
                self.target.dir.display()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_range(&[0.0, 1.0, 11.0], "bfrange", 1).unwrap(),
            (0.0, 1.0, 11)
        );
        assert!(parse_range(&[0.0, 1.0], "bfrange", 1).is_err());
        assert!(parse_range(&[0.0, 1.0, 1.0], "enrange", 2).is_err());
        assert!(parse_range(&[0.0, f64::NAN, 3.0], "enrange", 2).is_err());
    }

    #[test]
    fn test_parse_range_rejects_fractional_count() {
        assert!(matches!(
            parse_range(&[0.0, 1.0, 2.7], "bfrange", 1),
            Err(ToybandsError::InvalidArgument(_))
        ));
        assert_eq!(parse_range(&[0.0, 1.0, 3.0], "bfrange", 1).unwrap().2, 3);
    }

    #[test]
    fn test_energy_bounds_must_ascend() {
        assert!(check_energy_bounds(-0.2, 0.2).is_ok());
        assert!(matches!(
            check_energy_bounds(0.2, -0.2),
            Err(ToybandsError::InvalidArgument(_))
        ));
        assert!(check_energy_bounds(0.1, 0.1).is_err());
    }
}
