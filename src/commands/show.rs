//! # show 命令实现
//!
//! 以显示单位打印体系参数表，可选写出 `<NAME>_sysinfo.csv`。
//!
//! ## 依赖关系
//! - 使用 `cli/show.rs` 定义的参数
//! - 使用 `parsers/system_json.rs`, `export/`
//! - 使用 `tabled` 打印表格

use crate::cli::show::ShowArgs;
use crate::error::{Result, ToybandsError};
use crate::export::write_system_csv;
use crate::models::System;
use crate::parsers::parse_system_file;
use crate::physics::constants::{joule_to_ev, DENSITY_DISPLAY_UNIT, VELOCITY_DISPLAY_UNIT};
use crate::utils::output;

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 表格中的一行
#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "density(1e16/m2)")]
    density: String,
    is_cond: bool,
    is_dirac: bool,
    gfactor: String,
    meff: String,
    spin: String,
    #[tabled(rename = "M(eV)")]
    mass: String,
    #[tabled(rename = "vf(1e6m/s)")]
    vf: String,
    #[tabled(rename = "Ebb(eV)")]
    band_edge: String,
}

fn optional(value: Option<f64>, scale: f64) -> String {
    value
        .map(|v| format!("{:.4}", v / scale))
        .unwrap_or_else(|| "-".to_string())
}

fn band_rows(system: &System) -> Vec<BandRow> {
    system
        .bands()
        .iter()
        .enumerate()
        .map(|(i, band)| {
            let record = band.to_record();
            BandRow {
                index: i,
                density: format!("{:.4}", record.density / DENSITY_DISPLAY_UNIT),
                is_cond: record.is_cond,
                is_dirac: record.is_dirac,
                gfactor: format!("{:.3}", record.gfactor),
                meff: optional(record.meff, 1.0),
                spin: optional(record.spin, 1.0),
                mass: optional(record.mass, 1.0),
                vf: optional(record.vf, VELOCITY_DISPLAY_UNIT),
                band_edge: format!("{:.6}", joule_to_ev(band.band_edge())),
            }
        })
        .collect()
}

/// `<dir>/<stem>_sysinfo.csv`
fn stamp_path(dir: &Path, name: &str) -> Result<std::path::PathBuf> {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToybandsError::InvalidArgument(format!("invalid stamp name '{}'", name)))?;
    Ok(dir.join(format!("{}_sysinfo.csv", stem)))
}

/// 执行 show 命令
pub fn execute(args: ShowArgs) -> Result<()> {
    let system = parse_system_file(&args.system)?;

    output::print_header(&format!(
        "System '{}': {} band(s)",
        args.system.display(),
        system.len()
    ));
    println!("{}", Table::new(band_rows(&system)));
    output::print_separator();
    output::print_info(&format!(
        "Total density: {:.4} x 1e16 m^-2",
        system.tot_density() / DENSITY_DISPLAY_UNIT
    ));

    if let Some(name) = &args.stamp {
        let path = stamp_path(&args.dir, name)?;
        if !args.dir.is_dir() {
            fs::create_dir_all(&args.dir).map_err(|e| ToybandsError::FileWriteError {
                path: args.dir.display().to_string(),
                source: e,
            })?;
        }
        write_system_csv(&path, &system)?;
        output::print_saved("sysinfo", &path);
    }

    Ok(())
}
