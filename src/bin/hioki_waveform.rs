//! Power-quality analyzer waveforms

use std::path::PathBuf;
use structopt::StructOpt;
use v2l_charts::{config::WaveformConfig, pipelines::waveform};

#[derive(Debug, StructOpt)]
#[structopt(name = "hioki_waveform", about = "Power-quality analyzer waveforms")]
struct Opt {
    /// Folder of the waveform CSV captures
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Folder receiving one folder per capture
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = WaveformConfig::default();
    if let Some(arg) = opt.input {
        config = config.with_input(arg);
    }
    if let Some(arg) = opt.output {
        config = config.with_output(arg);
    }

    let report = waveform::run(&config)?;
    if !report.is_complete() {
        log::warn!("{} item(s) skipped", report.skipped.len());
    }
    Ok(())
}
