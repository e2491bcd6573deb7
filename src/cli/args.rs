use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snp-scatter",
    about = "Genotype scatter plots for every SNP in a final report",
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = "Reads every SNP from the given final report and draws three scatter plots for \
each one (raw, corrected, and Norm R vs Theta), named SNP_NAME-raw.png, \
SNP_NAME-corrected.png and SNP_NAME-r_theta.png, plus an index.html linking them. \
Output goes to the current directory unless --out-dir is given."
)]
pub struct Cli {
    /// Print this help message
    #[arg(short = 'H', long = "help")]
    pub help: bool,

    /// Print version information
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Final report file containing SNP data (plain or gzip)
    #[arg(short = 'f', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Plain text list of SNP names, one per line, used instead of scanning the report
    #[arg(short = 's', value_name = "FILE")]
    pub snp_list: Option<PathBuf>,

    /// Directory for index.html and the plot images
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Plot width in pixels
    #[arg(long, default_value_t = crate::plot::render::DEFAULT_WIDTH)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = crate::plot::render::DEFAULT_HEIGHT)]
    pub height: u32,
}
