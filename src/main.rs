use anyhow::Result;
use clap::Parser;
use log::info;
use nnoutputs::cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    cli::init_logging(&args);

    info!("Starting nnoutputs v{}", env!("CARGO_PKG_VERSION"));

    cli::run(args)
}
