//! ETAS LV, DC/DC and V2L current charts

use std::path::PathBuf;
use structopt::StructOpt;
use v2l_charts::{config::EtasConfig, pipelines::etas};

#[derive(Debug, StructOpt)]
#[structopt(name = "etas_signals", about = "ETAS LV, DC/DC and V2L current charts")]
struct Opt {
    /// ETAS workbook, one test per sheet
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Folder receiving one folder per sheet
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = EtasConfig::default();
    if let Some(arg) = opt.input {
        config = config.with_input(arg);
    }
    if let Some(arg) = opt.output {
        config = config.with_output(arg);
    }

    let report = etas::run(&config)?;
    if !report.is_complete() {
        log::warn!("{} item(s) skipped", report.skipped.len());
    }
    Ok(())
}
