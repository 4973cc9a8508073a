//! # denplot 命令实现
//!
//! 计算每个磁场下体系的总 IDOS，把各能级能量插值为对应的载流子密度，
//! 并导出各磁场下的总 DOS 与 IDOS 曲线。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `models/`, `sweep/`, `plot/`, `export/`
//! - 使用 `utils/output.rs`

use crate::cli::plot::PlotArgs;
use crate::commands::context::RunContext;
use crate::error::Result;
use crate::export::{write_databdl_csv, write_spectrum_csv, BundleKind};
use crate::models::Curve;
use crate::plot::{make_n_colors, save_figure, DensityFigure};
use crate::utils::output;

/// 执行 denplot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Landau Level Densities");

    let ctx = RunContext::from_args(&args.common)?;
    ctx.print_summary();

    let idos = ctx
        .runner()
        .run(&ctx.fields, "Integrated DOS", |field| {
            ctx.system.dos_gen(&ctx.energies, field, &ctx.params)
        })?
        .into_complete()?;

    let dos = ctx
        .runner()
        .run(&ctx.fields, "DOS", |field| {
            ctx.system
                .total_curve(&ctx.energies, field, &ctx.params, Curve::Dos)
        })?
        .into_complete()?;

    let bundle = ctx.system.density_bundle(
        &ctx.fields,
        &ctx.energies,
        &idos,
        ctx.params.n_max,
        ctx.params.angle,
    )?;

    ctx.prepare_output()?;

    let colors = make_n_colors(bundle.len(), ctx.style.vstart, ctx.style.vend)?;
    let image_path = ctx.target.image_path();
    save_figure(
        &DensityFigure {
            fields: &ctx.fields,
            bundle: &bundle,
            colors: &colors,
            tot_den: ctx.system.tot_density(),
        },
        &image_path,
        &ctx.style,
    )?;
    output::print_saved("plot", &image_path);

    let csv_path = ctx.target.csv_path("denplot");
    write_databdl_csv(&csv_path, &ctx.fields, &bundle, BundleKind::Density, None)?;
    output::print_saved("levels", &csv_path);

    for (curves, curve, suffix) in [(&idos, Curve::Idos, "idos"), (&dos, Curve::Dos, "dos")] {
        let path = ctx.target.csv_path(suffix);
        write_spectrum_csv(&path, &ctx.energies, &ctx.fields, curves, curve)?;
        output::print_saved(suffix, &path);
    }

    output::print_done("denplot finished");
    Ok(())
}
