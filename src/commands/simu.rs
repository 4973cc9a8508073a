//! # simu 命令实现
//!
//! 按密度切片逐步改变各能带密度，每一步计算能级密度数据包，
//! 只保留总密度附近窗口内的点，所有切片叠加在同一张散点图上。
//!
//! ## 功能
//! - 切片来自 `--allden` + `--nos` 的线性扫描，或 `--den-csv` 文件
//! - 窗口宽度为相邻切片总密度之差
//! - 每个切片单独导出 CSV；某个切片计算失败时给出警告并跳过
//!
//! ## 依赖关系
//! - 使用 `cli/simu.rs` 定义的参数
//! - 使用 `parsers/density_csv.rs`, `sweep/`, `plot/`, `export/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::simu::SimuArgs;
use crate::commands::context::RunContext;
use crate::error::{Result, ToybandsError};
use crate::export::{write_databdl_csv, BundleKind};
use crate::models::{DataBundle, System};
use crate::parsers::read_density_csv;
use crate::plot::{make_n_colors, save_figure, ScatterFigure};
use crate::sweep::{make_slices, total_density_step, FieldRunner};
use crate::utils::{output, progress};

/// 确定密度切片
fn density_slices(args: &SimuArgs) -> Result<Vec<Vec<f64>>> {
    if let Some(path) = &args.den_csv {
        return read_density_csv(path);
    }
    match args.nos {
        Some(steps) if !args.allden.is_empty() => make_slices(&args.allden, steps),
        _ => Err(ToybandsError::InvalidArgument(
            "simu needs --allden with --nos, or --den-csv".to_string(),
        )),
    }
}

/// 单个切片：设定密度后计算能级密度数据包
fn slice_bundle(
    system: &mut System,
    densities: &[f64],
    ctx: &RunContext,
    runner: &FieldRunner,
) -> Result<DataBundle> {
    system.set_all_density(densities)?;
    let sys: &System = system;
    let idos = runner
        .run(&ctx.fields, "Integrated DOS", |field| {
            sys.dos_gen(&ctx.energies, field, &ctx.params)
        })?
        .into_complete()?;
    sys.density_bundle(
        &ctx.fields,
        &ctx.energies,
        &idos,
        ctx.params.n_max,
        ctx.params.angle,
    )
}

/// 执行 simu 命令
pub fn execute(args: SimuArgs) -> Result<()> {
    output::print_header("Density Sweep Simulation");

    let ctx = RunContext::from_args(&args.common)?;
    let slices = density_slices(&args)?;
    if let Some(bad) = slices.iter().find(|s| s.len() != ctx.system.len()) {
        return Err(ToybandsError::InvalidArgument(format!(
            "each density slice needs {} values (one per band), got {}",
            ctx.system.len(),
            bad.len()
        )));
    }
    ctx.print_summary();
    output::print_info(&format!("{} density slices", slices.len()));

    // 只有一个切片时不设窗口
    let window = total_density_step(&slices).unwrap_or(f64::INFINITY);

    ctx.prepare_output()?;

    let colors = make_n_colors(ctx.system.len(), ctx.style.vstart, ctx.style.vend)?;
    let runner = ctx.runner().quiet();
    let mut system = ctx.system.clone();
    let mut figure = ScatterFigure::new(&ctx.fields);
    let mut written = 0usize;

    let pb = progress::create_simple_bar(slices.len() as u64);
    for (k, densities) in slices.iter().enumerate() {
        pb.set_message(format!("slice {}", k));
        let bundle = match slice_bundle(&mut system, densities, &ctx, &runner) {
            Ok(bundle) => bundle,
            Err(e) => {
                pb.suspend(|| output::print_skip(&format!("slice {}: {}", k, e)));
                pb.inc(1);
                continue;
            }
        };

        let tot_den = system.tot_density();
        let plotrange = (tot_den - 0.5 * window, tot_den + 0.5 * window);
        figure.add_slice(&bundle, &colors, tot_den, plotrange)?;

        let csv_path = ctx.target.csv_path(&format!("simu_{}", k));
        write_databdl_csv(
            &csv_path,
            &ctx.fields,
            &bundle,
            BundleKind::Density,
            Some(plotrange),
        )?;
        written += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    if figure.point_count() == 0 {
        output::print_warning("No level density falls inside the plot windows");
    }

    if written < slices.len() {
        output::print_warning(&format!(
            "{}/{} slices skipped",
            slices.len() - written,
            slices.len()
        ));
    }
    output::print_success(&format!(
        "{} slices written to '{}'",
        written,
        ctx.target.dir.display()
    ));

    let image_path = ctx.target.image_path();
    save_figure(&figure, &image_path, &ctx.style)?;
    output::print_saved("plot", &image_path);

    output::print_done("simu finished");
    Ok(())
}
