//! Power-quality analyzer harmonics and vector diagram

use std::path::PathBuf;
use structopt::StructOpt;
use v2l_charts::{config::HarmonicsConfig, pipelines::harmonics};

#[derive(Debug, StructOpt)]
#[structopt(name = "hioki_harmonics", about = "Power-quality analyzer harmonics and vector diagram")]
struct Opt {
    /// Folder of the analyzer CSV exports
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Folder receiving one folder per export
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = HarmonicsConfig::default();
    if let Some(arg) = opt.input {
        config = config.with_input(arg);
    }
    if let Some(arg) = opt.output {
        config = config.with_output(arg);
    }

    let report = harmonics::run(&config)?;
    if !report.is_complete() {
        log::warn!("{} item(s) skipped", report.skipped.len());
    }
    Ok(())
}
