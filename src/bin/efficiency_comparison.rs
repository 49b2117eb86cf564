//! Efficiency comparison between vehicles

use std::path::PathBuf;
use structopt::StructOpt;
use v2l_charts::{config::ComparisonConfig, pipelines::comparison};

#[derive(Debug, StructOpt)]
#[structopt(name = "efficiency_comparison", about = "Efficiency comparison between vehicles")]
struct Opt {
    /// Workbook of efficiency curves
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Folder receiving comparison_eff
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = ComparisonConfig::default();
    if let Some(arg) = opt.input {
        config = config.with_input(arg);
    }
    if let Some(arg) = opt.output {
        config = config.with_output(arg);
    }

    let report = comparison::run(&config)?;
    if !report.is_complete() {
        log::warn!("{} item(s) skipped", report.skipped.len());
    }
    Ok(())
}
