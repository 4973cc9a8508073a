//! # CSV 数据导出
//!
//! 导出能级能量/密度数据包、化学势序列与体系参数表。
//!
//! ## 支持格式
//! - 数据包：第一列 `B(T)`，之后每个 (能带, 能级) 一列，列名 `band{i}_#{N}`；
//!   能量以 eV、密度以 10¹⁶ m⁻² 写出，绘图窗口外的值写为空单元格
//! - 化学势：`B(T)`, `mu(eV)`，未求得处为空
//! - 能谱：第一列 `E(eV)`，之后每个磁场一列；DOS 以 10¹⁶ m⁻²/eV、IDOS 以 10¹⁶ m⁻² 写出
//! - 体系参数：每个能带一行，单位与 `system.json` 相同，另附带边能量
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/system.rs` 的 System 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, ToybandsError};
use crate::models::{Curve, EnergyTable, System};
use crate::physics::constants::{joule_to_ev, DENSITY_DISPLAY_UNIT, E0};

use std::path::Path;

/// 数据包中存放的物理量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    /// 能级能量 (J)
    Energy,
    /// 能级密度 (m⁻²)
    Density,
}

impl BundleKind {
    /// 内部单位 → 导出单位
    fn to_display(self, value: f64) -> f64 {
        match self {
            BundleKind::Energy => joule_to_ev(value),
            BundleKind::Density => value / DENSITY_DISPLAY_UNIT,
        }
    }
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn flush_writer(mut wtr: csv::Writer<std::fs::File>, output_path: &Path) -> Result<()> {
    wtr.flush().map_err(|e| ToybandsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 导出 `[band][level][field]` 数据包
///
/// `plotrange` 以内部单位给出，只保留严格落在区间内的值。
pub fn write_databdl_csv(
    output_path: &Path,
    fields: &[f64],
    bundle: &[Vec<Vec<f64>>],
    kind: BundleKind,
    plotrange: Option<(f64, f64)>,
) -> Result<()> {
    for (i, levels) in bundle.iter().enumerate() {
        for (n, level) in levels.iter().enumerate() {
            if level.len() != fields.len() {
                return Err(ToybandsError::InvalidArgument(format!(
                    "band{}_#{} has {} values but there are {} fields",
                    i,
                    n,
                    level.len(),
                    fields.len()
                )));
            }
        }
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec!["B(T)".to_string()];
    for (i, levels) in bundle.iter().enumerate() {
        header.extend((0..levels.len()).map(|n| format!("band{}_{}", i, EnergyTable::key(n))));
    }
    wtr.write_record(&header)?;

    for (j, field) in fields.iter().enumerate() {
        let mut row = vec![field.to_string()];
        for level in bundle.iter().flatten() {
            let value = level[j];
            let inside = plotrange.map_or(true, |(lo, hi)| value > lo && value < hi);
            row.push(optional_cell(inside.then(|| kind.to_display(value))));
        }
        wtr.write_record(&row)?;
    }

    flush_writer(wtr, output_path)
}

/// 导出各磁场下的化学势
pub fn write_mu_csv(output_path: &Path, fields: &[f64], mu: &[Option<f64>]) -> Result<()> {
    if fields.len() != mu.len() {
        return Err(ToybandsError::InvalidArgument(format!(
            "got {} chemical potentials for {} fields",
            mu.len(),
            fields.len()
        )));
    }

    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record(["B(T)", "mu(eV)"])?;
    for (field, mu) in fields.iter().zip(mu) {
        wtr.write_record([field.to_string(), optional_cell(mu.map(joule_to_ev))])?;
    }

    flush_writer(wtr, output_path)
}

/// 导出各磁场下的总 DOS 或 IDOS，`curves[i]` 对应 `fields[i]`
pub fn write_spectrum_csv(
    output_path: &Path,
    energies: &[f64],
    fields: &[f64],
    curves: &[Vec<f64>],
    curve: Curve,
) -> Result<()> {
    if curves.len() != fields.len() {
        return Err(ToybandsError::InvalidArgument(format!(
            "got {} curves for {} fields",
            curves.len(),
            fields.len()
        )));
    }
    if let Some(bad) = curves.iter().find(|c| c.len() != energies.len()) {
        return Err(ToybandsError::InvalidArgument(format!(
            "a curve has {} values but there are {} energies",
            bad.len(),
            energies.len()
        )));
    }

    let (label, scale) = match curve {
        Curve::Dos => ("DOS", E0 / DENSITY_DISPLAY_UNIT),
        Curve::Idos => ("IDOS", 1.0 / DENSITY_DISPLAY_UNIT),
    };

    let mut wtr = csv::Writer::from_path(output_path)?;
    let mut header = vec!["E(eV)".to_string()];
    header.extend(fields.iter().map(|b| format!("{}@{}T", label, b)));
    wtr.write_record(&header)?;

    for (j, &energy) in energies.iter().enumerate() {
        let mut row = vec![joule_to_ev(energy).to_string()];
        row.extend(curves.iter().map(|c| (c[j] * scale).to_string()));
        wtr.write_record(&row)?;
    }

    flush_writer(wtr, output_path)
}

/// 导出体系参数表
pub fn write_system_csv(output_path: &Path, system: &System) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record([
        "", "density", "is_cond", "is_dirac", "gfactor", "meff", "spin", "M", "vf", "Ebb",
    ])?;

    for (i, band) in system.bands().iter().enumerate() {
        let record = band.to_record();
        wtr.write_record([
            i.to_string(),
            record.density.to_string(),
            record.is_cond.to_string(),
            record.is_dirac.to_string(),
            record.gfactor.to_string(),
            optional_cell(record.meff),
            optional_cell(record.spin),
            optional_cell(record.mass),
            optional_cell(record.vf),
            band.band_edge().to_string(),
        ])?;
    }

    flush_writer(wtr, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Band, BandRecord};
    use crate::physics::constants::E0;
    use std::fs;

    #[test]
    fn test_energy_bundle_csv() {
        let path = std::env::temp_dir().join("toybands_enplot_test.csv");
        let fields = [1.0, 2.0];
        let bundle = vec![
            vec![vec![E0, 2.0 * E0], vec![-E0, -2.0 * E0]],
            vec![vec![0.0, E0]],
        ];
        write_databdl_csv(&path, &fields, &bundle, BundleKind::Energy, None).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "B(T),band0_#0,band0_#1,band1_#0");
        assert_eq!(lines[1], "1,1,-1,0");
        assert_eq!(lines[2], "2,2,-2,1");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_density_bundle_plotrange() {
        let path = std::env::temp_dir().join("toybands_simu_test.csv");
        let fields = [1.0, 2.0, 3.0];
        let bundle = vec![vec![vec![1e16, 2e16, 3e16]]];
        write_databdl_csv(
            &path,
            &fields,
            &bundle,
            BundleKind::Density,
            Some((1.5e16, 3e16)),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "1,");
        assert_eq!(lines[2], "2,2");
        assert_eq!(lines[3], "3,");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bundle_length_mismatch() {
        let path = std::env::temp_dir().join("toybands_mismatch_test.csv");
        let bundle = vec![vec![vec![1.0]]];
        assert!(write_databdl_csv(&path, &[1.0, 2.0], &bundle, BundleKind::Energy, None).is_err());
    }

    #[test]
    fn test_mu_csv() {
        let path = std::env::temp_dir().join("toybands_mu_test.csv");
        write_mu_csv(&path, &[1.0, 2.0], &[Some(E0), None]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "B(T),mu(eV)\n1,1\n2,\n");
        fs::remove_file(&path).ok();

        assert!(write_mu_csv(&path, &[1.0], &[]).is_err());
    }

    #[test]
    fn test_spectrum_csv() {
        let path = std::env::temp_dir().join("toybands_idos_test.csv");
        let energies = [0.0, E0];
        let curves = vec![vec![0.0, 1e16], vec![2e16, 3e16]];
        write_spectrum_csv(&path, &energies, &[1.0, 2.5], &curves, Curve::Idos).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "E(eV),IDOS@1T,IDOS@2.5T\n0,0,2\n1,1,3\n");
        fs::remove_file(&path).ok();

        // DOS 按每 eV 写出
        let dos_path = std::env::temp_dir().join("toybands_dos_test.csv");
        write_spectrum_csv(&dos_path, &energies, &[1.0], &[vec![0.0, 4e16 / E0]], Curve::Dos)
            .unwrap();
        let content = fs::read_to_string(&dos_path).unwrap();
        let last: f64 = content.lines().last().unwrap().split(',').nth(1).unwrap().parse().unwrap();
        assert!((last - 4.0).abs() < 1e-12);
        fs::remove_file(&dos_path).ok();

        assert!(write_spectrum_csv(&path, &energies, &[1.0], &curves, Curve::Idos).is_err());
        assert!(write_spectrum_csv(&path, &[0.0], &[1.0], &curves[..1], Curve::Idos).is_err());
    }

    #[test]
    fn test_system_csv() {
        let path = std::env::temp_dir().join("toybands_sysinfo_test.csv");
        let mut system = System::new();
        system.add_band(Band::try_from(&BandRecord::dirac(1e16, true, 0.0, 0.0, 1e6)).unwrap());
        system.add_band(
            Band::try_from(&BandRecord::conventional(-1e16, false, 2.0, 0.5, 1.0)).unwrap(),
        );
        write_system_csv(&path, &system).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ",density,is_cond,is_dirac,gfactor,meff,spin,M,vf,Ebb");
        assert!(lines[1].starts_with("0,10000000000000000,true,true,0,,,0,1000000,"));
        assert!(lines[2].starts_with("1,-10000000000000000,false,false,2,0.5,1,,,"));
        fs::remove_file(&path).ok();
    }
}
