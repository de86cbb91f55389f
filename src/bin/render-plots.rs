use std::{path::PathBuf, time::Instant};

use itertools::Itertools;
use plotview::{BesselCurve, Config, PlotKind, Plotter};
use rayon::prelude::*;
use structopt::StructOpt;
use strum::IntoEnumIterator;

#[derive(Debug, StructOpt)]
#[structopt(name = "render-plots", about = "Renders the demo plots to PNG files")]
struct Opt {
    /// Bessel function order
    #[structopt(short, long, default_value = "3")]
    order: u32,
    /// Output directory [default: $PLOTVIEW_OUTPUT_DIR or the working directory]
    #[structopt(short = "d", long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// Plots to render: bessel, intensity, contour or gradient [default: all]
    #[structopt(short, long)]
    kind: Vec<PlotKind>,
}

/// Plots to render, each one once
fn selected(kinds: Vec<PlotKind>) -> Vec<PlotKind> {
    if kinds.is_empty() {
        PlotKind::iter().collect()
    } else {
        kinds.into_iter().unique().collect()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = Config::from_env()?.order(opt.order)?;
    if let Some(output) = opt.output {
        config = config.output_dir(output);
    }
    let kinds = selected(opt.kind);

    let curve = if kinds.contains(&PlotKind::Bessel) {
        Some(BesselCurve::new(config.get_order())?)
    } else {
        None
    };

    let plotter = Plotter::new(&config);
    let now = Instant::now();
    let paths = kinds
        .par_iter()
        .map(|&kind| match (kind, &curve) {
            (PlotKind::Bessel, Some(curve)) => plotter.bessel_curve(curve),
            _ => plotter.render(kind),
        })
        .collect::<Result<Vec<PathBuf>, _>>()?;
    for path in &paths {
        println!("{}", path.display());
    }
    log::info!("{} plots rendered in {}ms", paths.len(), now.elapsed().as_millis());

    if let Some(curve) = &curve {
        let (x, y) = curve.peak();
        println!(
            "J{} maximum: ({:.6}, {:.6}) in {} iterations (converged: {})",
            curve.order, x, y, curve.extremum.iterations, curve.extremum.converged
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_kinds() {
        assert_eq!(selected(vec![]).len(), 4);
        assert_eq!(
            selected(vec![
                PlotKind::Contour,
                PlotKind::Bessel,
                PlotKind::Contour,
                PlotKind::Bessel
            ]),
            vec![PlotKind::Contour, PlotKind::Bessel]
        );
    }
}
