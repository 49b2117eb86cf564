//! Analysis pipelines
//!
//! Every pipeline loads its inputs, derives the statistics and renders the
//! charts, one input (file or sheet) after the other.
//! Each returns the [BatchReport](crate::batch::BatchReport) of the run.

use std::path::Path;

pub mod comparison;
pub mod dcdc;
pub mod efficiency;
pub mod etas;
pub mod harmonics;
pub mod obd;
pub mod waveform;

/// File name without extension
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

