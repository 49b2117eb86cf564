//! OBD efficiency curve

use std::path::PathBuf;
use structopt::StructOpt;
use v2l_charts::{config::EfficiencyConfig, pipelines::efficiency};

#[derive(Debug, StructOpt)]
#[structopt(name = "obd_efficiency", about = "OBD efficiency curve")]
struct Opt {
    /// Folder of the OBD test workbooks
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Folder receiving processed_charts
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = EfficiencyConfig::default();
    if let Some(arg) = opt.input {
        config = config.with_input(arg);
    }
    if let Some(arg) = opt.output {
        config = config.with_output(arg);
    }

    let report = efficiency::run(&config)?;
    if !report.is_complete() {
        log::warn!("{} item(s) skipped", report.skipped.len());
    }
    Ok(())
}
