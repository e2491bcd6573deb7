use crate::core::model::GenotypeClass;
use crate::plot::spec::ScatterPlot;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Turns a `ScatterPlot` into an image file at `out`.
pub trait PlotRenderer {
    fn render(&mut self, plot: &ScatterPlot, out: &Path) -> Result<()>;
}

/// PNG output through the plotters bitmap backend.
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Fixed per class so plots stay comparable across SNPs.
pub fn class_color(class: GenotypeClass) -> RGBColor {
    match class {
        GenotypeClass::BB => RGBColor(0, 0, 230),
        GenotypeClass::AB => RGBColor(200, 0, 200),
        GenotypeClass::AA => RGBColor(220, 0, 0),
        GenotypeClass::NoCall => RGBColor(140, 140, 140),
    }
}

/// Data bounds padded by 5% on each side. Degenerate or empty input
/// falls back to `0..1`.
pub fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { lo.abs().max(1.0) * 0.05 };
    (lo - pad)..(hi + pad)
}

impl PlotRenderer for PngRenderer {
    fn render(&mut self, plot: &ScatterPlot, out: &Path) -> Result<()> {
        let points = || plot.series.iter().flat_map(|s| s.points.iter());
        let x_range = axis_range(points().map(|p| p.0));
        let y_range = axis_range(points().map(|p| p.1));

        let root = BitMapBackend::new(out, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&plot.title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(plot.x_label)
            .y_desc(plot.y_label)
            .label_style(("sans-serif", 12))
            .axis_desc_style(("sans-serif", 14))
            .draw()?;

        for series in &plot.series {
            let color = class_color(series.class);
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )?
                .label(format!(" {}", series.class.title()))
                .legend(move |(x, y)| Circle::new((x + 8, y), 3, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE)
            .border_style(BLACK)
            .draw()?;

        root.present()
            .with_context(|| format!("failed to write {}", out.display()))?;
        Ok(())
    }
}
