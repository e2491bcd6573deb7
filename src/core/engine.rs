use crate::core::extract::extract_rows;
use crate::core::io::ReportSource;
use crate::core::model::PlotKind;
use crate::core::parser::{self, ParseOutcome};
use crate::core::registry::SnpRegistry;
use crate::plot::render::PlotRenderer;
use crate::plot::spec::build_plot;
use crate::report;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct RunConfig {
    pub report: PathBuf,
    pub snp_list: Option<PathBuf>,
    pub out_dir: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct RunOutput {
    pub snps: usize,
    pub plots_rendered: usize,
    pub plots_failed: usize,
    pub malformed_rows: usize,
    pub data_section_found: bool,
    pub index_path: PathBuf,
}

pub fn run(cfg: &RunConfig, renderer: &mut dyn PlotRenderer) -> Result<RunOutput> {
    let stats = stats_enabled();
    let t_total = Instant::now();

    let t_open = Instant::now();
    let source = ReportSource::open(&cfg.report)?;
    log_stage(stats, "engine.input_open", t_open);

    let t_discover = Instant::now();
    let (registry, data_section_found, malformed_rows) = discover_snps(cfg, source.bytes())?;
    log_stage(stats, "engine.discover", t_discover);

    let mut output = RunOutput {
        snps: registry.len(),
        malformed_rows,
        data_section_found,
        index_path: cfg.out_dir.join("index.html"),
        ..RunOutput::default()
    };

    let t_plot = Instant::now();
    for snp in registry.iter() {
        let extracted = extract_rows(source.bytes(), &snp.name, &cfg.out_dir)
            .with_context(|| format!("failed to extract rows for {}", snp.name))?;
        if extracted.rows == 0 {
            warn!(snp = %snp.name, "no data rows found; plots will be empty");
        }
        for kind in PlotKind::ALL {
            let out = cfg.out_dir.join(kind.file_name(&snp.name));
            let result = build_plot(&snp.name, kind, extracted.path()).and_then(|plot| {
                if plot.skipped > 0 {
                    debug!(
                        snp = %snp.name,
                        kind = kind.as_str(),
                        rows = plot.skipped,
                        "rows outside every genotype series"
                    );
                }
                renderer.render(&plot, &out)
            });
            match result {
                Ok(()) => {
                    output.plots_rendered += 1;
                    info!("plotted {} as {}", snp.name, kind.as_str());
                }
                Err(e) => {
                    output.plots_failed += 1;
                    warn!(snp = %snp.name, kind = kind.as_str(), "plot failed: {e:#}");
                }
            }
        }
        // Temp data file is removed here.
        drop(extracted);
    }
    log_stage(stats, "engine.plot", t_plot);

    let t_html = Instant::now();
    let title = cfg
        .report
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sorted = registry.sorted();
    report::html::write(&output.index_path, &title, &sorted)?;
    log_stage(stats, "engine.html", t_html);

    if stats {
        eprintln!(
            "SNP_SCATTER_STATS snps={} plots={} failed={} total={}",
            output.snps,
            output.plots_rendered,
            output.plots_failed,
            fmt_dur(t_total.elapsed())
        );
    }
    Ok(output)
}

fn discover_snps(cfg: &RunConfig, report: &[u8]) -> Result<(SnpRegistry, bool, usize)> {
    if let Some(list) = &cfg.snp_list {
        let bytes =
            fs::read(list).with_context(|| format!("failed to read {}", list.display()))?;
        let registry = parser::snps_from_list(&bytes);
        info!(snps = registry.len(), list = %list.display(), "SNPs taken from list");
        return Ok((registry, true, 0));
    }
    let ParseOutcome {
        registry,
        data_section_found,
        data_rows,
        malformed,
    } = parser::find_snps(report);
    if !data_section_found {
        warn!(report = %cfg.report.display(), "no [Data] section found");
    }
    if !registry.is_empty() {
        info!(snps = registry.len(), rows = data_rows, "SNPs found in report");
    }
    Ok((registry, data_section_found, malformed))
}

pub fn stats_enabled() -> bool {
    matches!(env::var("SNP_SCATTER_STATS").as_deref(), Ok("1"))
}

fn log_stage(stats: bool, name: &str, t: Instant) {
    if stats {
        eprintln!(
            "SNP_SCATTER_STATS stage={} time={}",
            name,
            fmt_dur(t.elapsed())
        );
    }
}

pub fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
