use crate::cli::args::Cli;
use crate::core::engine::{self, RunConfig, fmt_dur, stats_enabled};
use crate::plot::render::PngRenderer;
use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::fs;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn entry() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.help {
        println!("{}", usage());
        return Ok(ExitCode::SUCCESS);
    }
    if cli.version {
        println!("{}", version_text());
        return Ok(ExitCode::SUCCESS);
    }
    let Some(input) = cli.input.clone() else {
        println!("Missing input file");
        println!("{}", usage());
        return Ok(ExitCode::from(1));
    };

    init_logging();
    run(&cli, input)?;
    Ok(ExitCode::SUCCESS)
}

fn run(cli: &Cli, input: std::path::PathBuf) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    if !input.is_file() {
        bail!("input file not found: {}", input.display());
    }
    if let Some(list) = &cli.snp_list {
        if !list.is_file() {
            bail!("SNP list not found: {}", list.display());
        }
    }
    if cli.width == 0 || cli.height == 0 {
        bail!("--width and --height must be >= 1");
    }
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create output dir {}", cli.out_dir.display()))?;

    let config = RunConfig {
        report: input,
        snp_list: cli.snp_list.clone(),
        out_dir: cli.out_dir.clone(),
    };
    let mut renderer = PngRenderer {
        width: cli.width,
        height: cli.height,
    };

    let output = engine::run(&config, &mut renderer)?;

    if output.snps == 0 {
        println!("No SNPs found in {}", config.report.display());
        if !output.data_section_found {
            println!("The report has no [Data] section");
        }
    }
    if output.malformed_rows > 0 {
        tracing::warn!(rows = output.malformed_rows, "malformed data rows were skipped");
    }
    if output.plots_failed > 0 {
        tracing::warn!(
            failed = output.plots_failed,
            "some plots could not be rendered; their links in index.html are dangling"
        );
    }
    info!(
        snps = output.snps,
        plots = output.plots_rendered,
        index = %output.index_path.display(),
        "report written"
    );
    if stats {
        eprintln!("SNP_SCATTER_STATS total={}", fmt_dur(t0.elapsed()));
    }
    Ok(())
}

fn usage() -> String {
    Cli::command().render_help().to_string()
}

const COPYRIGHT: &str = "Copyright (c) 2009-11 Oklahoma Medical Research Foundation";

fn version_text() -> String {
    format!(
        "{} - Version: {}\nWritten by {}\n\n{}. All Rights Reserved\nThis software comes with ABSOLUTELY NO WARRANTY",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        COPYRIGHT
    )
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "snp_scatter=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
