//! ETAS DC/DC converter power charts

use std::path::PathBuf;
use structopt::StructOpt;
use v2l_charts::{config::DcdcConfig, pipelines::dcdc};

#[derive(Debug, StructOpt)]
#[structopt(name = "etas_dcdc", about = "ETAS DC/DC converter power charts")]
struct Opt {
    /// ETAS workbook, one test per sheet
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Folder receiving one chart per sheet
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = DcdcConfig::default();
    if let Some(arg) = opt.input {
        config = config.with_input(arg);
    }
    if let Some(arg) = opt.output {
        config = config.with_output(arg);
    }

    let report = dcdc::run(&config)?;
    if !report.is_complete() {
        log::warn!("{} item(s) skipped", report.skipped.len());
    }
    Ok(())
}
