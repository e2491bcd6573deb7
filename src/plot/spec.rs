use crate::core::io::lines;
use crate::core::model::{COL_CALL1, COL_CALL2, GenotypeClass, PlotKind};
use crate::core::parser::split_fields;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct Series {
    pub class: GenotypeClass,
    pub points: Vec<(f64, f64)>,
}

/// Everything a renderer needs for one `<snp>-<kind>` image.
#[derive(Clone, Debug)]
pub struct ScatterPlot {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Always one entry per genotype class, in `GenotypeClass::ALL` order.
    pub series: Vec<Series>,
    pub skipped: usize,
}

impl ScatterPlot {
    pub fn empty(snp: &str, kind: PlotKind) -> Self {
        let (x_label, y_label) = kind.axis_labels();
        Self {
            title: format!("{} {}", snp, kind.as_str()),
            x_label,
            y_label,
            series: GenotypeClass::ALL
                .iter()
                .map(|&class| Series {
                    class,
                    points: Vec::new(),
                })
                .collect(),
            skipped: 0,
        }
    }

    pub fn series_mut(&mut self, class: GenotypeClass) -> &mut Series {
        &mut self.series[class.index()]
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Adds one report row. Returns false when the row belongs to no series.
    pub fn push_row(&mut self, fields: &[impl AsRef<str>], kind: PlotKind) -> bool {
        let (xc, yc) = kind.columns();
        if fields.len() <= COL_CALL2 {
            self.skipped += 1;
            return false;
        }
        let Some(class) =
            GenotypeClass::classify(fields[COL_CALL1].as_ref(), fields[COL_CALL2].as_ref())
        else {
            self.skipped += 1;
            return false;
        };
        let (Some(x), Some(y)) = (parse_coord(fields[xc].as_ref()), parse_coord(fields[yc].as_ref()))
        else {
            self.skipped += 1;
            return false;
        };
        self.series_mut(class).points.push((x, y));
        true
    }
}

fn parse_coord(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads an extracted-rows file and sorts its points into genotype series.
pub fn build_plot(snp: &str, kind: PlotKind, rows_path: &Path) -> Result<ScatterPlot> {
    let bytes = std::fs::read(rows_path)
        .with_context(|| format!("failed to read {}", rows_path.display()))?;
    let mut plot = ScatterPlot::empty(snp, kind);
    for line in lines(&bytes) {
        if line.is_empty() {
            continue;
        }
        plot.push_row(&split_fields(line), kind);
    }
    Ok(plot)
}
