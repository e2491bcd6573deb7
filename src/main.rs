mod cli;
mod core;
mod plot;
mod report;

fn main() -> anyhow::Result<std::process::ExitCode> {
    cli::run::entry()
}
