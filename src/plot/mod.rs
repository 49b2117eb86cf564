//! Chart rendering
//!
//! Charts are described by a [ChartSpec] (series, axis assignment, colors and
//! limit policies) and drawn to PNG by [render]. The vector diagram of the
//! power-quality analysis has its own renderer in [phasor].

use plotters::style::RGBColor;
use std::{fs, io, path::Path, path::PathBuf};

mod chart;
pub mod phasor;
pub use chart::{
    render, Annotation, Axis, AxisSpec, ChartSpec, DetachedSample, Legend, Limits, Mark, Notes,
    NotesPlacement, Series,
};

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("failed to create the output folder {path:?}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("nothing to plot in {0:?}")]
    NoData(String),
    #[error("failed to draw the chart: {0}")]
    Draw(String),
}
type Result<T> = std::result::Result<T, PlotError>;

pub(crate) fn draw_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}

/// Creates `path` and its parents, nothing happens if it already exists
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|source| PlotError::OutputDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Named colors of the charts
pub mod colors {
    use plotters::style::RGBColor;

    pub const RED: RGBColor = RGBColor(214, 39, 40);
    pub const BLUE: RGBColor = RGBColor(31, 119, 180);
    pub const DARK_BLUE: RGBColor = RGBColor(0, 0, 139);
    pub const GREEN: RGBColor = RGBColor(0, 128, 0);
    pub const BLACK: RGBColor = RGBColor(0, 0, 0);
    pub const YELLOW: RGBColor = RGBColor(230, 200, 0);
    pub const CYAN: RGBColor = RGBColor(0, 190, 190);
    pub const ORANGE: RGBColor = RGBColor(255, 127, 14);
    pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
    pub const GRAY: RGBColor = RGBColor(128, 128, 128);
    pub const WHEAT: RGBColor = RGBColor(245, 222, 179);
    /// color pairs of the efficiency comparison curves
    pub const PAIRS: [[RGBColor; 2]; 3] = [
        [RGBColor(31, 119, 180), RGBColor(174, 199, 232)],
        [RGBColor(44, 160, 44), RGBColor(152, 223, 138)],
        [RGBColor(148, 103, 189), RGBColor(197, 176, 213)],
    ];
}

/// Cycles through the Tableau 10 palette
pub fn palette() -> impl Iterator<Item = RGBColor> {
    colorous::TABLEAU10
        .iter()
        .cycle()
        .map(|c| RGBColor(c.r, c.g, c.b))
}

/// Formats a tick value without trailing zeros
pub fn tick_label(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
