//! Power-quality analyzer waveforms
//!
//! Voltage and current captures against the sample index, and the samples
//! sorted by voltage in a spreadsheet next to the charts.

use super::file_stem;
use crate::{
    batch::{self, display_name, BatchReport},
    config::WaveformConfig,
    error::Result,
    export::export_sorted,
    loader::csv::{load_waveform, Waveform},
    plot::{self, colors, AxisSpec, ChartSpec, Legend, Limits, NotesPlacement, Series},
    stats::Summary,
    table::TableError,
};
use plotters::style::RGBColor;
use std::path::Path;

pub const IMAGE_DIR: &str = "Image_waveform";
pub const SORTED_FILE: &str = "sorted_values.xlsx";

const SIZE: (u32, u32) = (1200, 420);
const Y_TICKS: usize = 8;

fn samples(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

fn summary(values: &[Option<f64>], name: &str) -> Result<Summary> {
    Ok(Summary::from_sparse(values).ok_or_else(|| TableError::Empty(name.to_string()))?)
}

/// Max, min and mean of the maxima, as drawn in the chart box
pub fn notes(summary: &Summary, unit: &str) -> Vec<String> {
    vec![
        format!("Max: {:.1}{}", summary.max, unit),
        format!("Min: {:.1}{}", summary.min, unit),
        format!("Mean Max: {:.3}{}", summary.max, unit),
    ]
}

fn wave_chart(
    title: &str,
    label: &str,
    unit: &str,
    values: &[Option<f64>],
    color: RGBColor,
) -> Result<ChartSpec> {
    let summary = summary(values, label)?;
    Ok(ChartSpec::new(title, SIZE)
        .x_axis(AxisSpec::new("Time (s)").hide_tick_labels())
        .y_axis(AxisSpec::new(label).ticks(Y_TICKS))
        .legend(Legend::Hidden)
        .zero_line()
        .series(Series::sparse("", &samples(values.len()), values).color(color))
        .notes(notes(&summary, unit), NotesPlacement::InsetLowerLeft))
}

pub fn voltage_chart(waveform: &Waveform) -> Result<ChartSpec> {
    wave_chart("Voltage waveform", "Voltage (V)", "V", &waveform.voltage, colors::GREEN)
}

pub fn current_chart(waveform: &Waveform) -> Result<ChartSpec> {
    wave_chart("Current waveform", "Current (A)", "A", &waveform.current, colors::BLUE)
}

/// Voltage with the current on a fixed secondary axis
pub fn combined_chart(waveform: &Waveform, current_range: (f64, f64)) -> ChartSpec {
    let x = samples(waveform.len());
    let (lo, hi) = current_range;
    ChartSpec::new("Voltage and Current Waveforms with Phase Shift", SIZE)
        .x_axis(AxisSpec::new("Time (s)").hide_tick_labels())
        .y_axis(
            AxisSpec::new("Voltage (V)")
                .label_color(colors::GREEN)
                .ticks(Y_TICKS),
        )
        .secondary_axis(
            AxisSpec::new("Current (A)")
                .label_color(colors::BLUE)
                .limits(Limits::Fixed(lo, hi)),
        )
        .legend(Legend::UpperRight)
        .zero_line()
        .series(Series::sparse("Voltage (V)", &x, &waveform.voltage).color(colors::GREEN))
        .series(
            Series::sparse("Current (A)", &x, &waveform.current)
                .color(colors::BLUE)
                .secondary(),
        )
}

/// Charts and sorted samples of one capture
///
/// A failed spreadsheet export is logged, the charts are kept.
pub fn process<P: AsRef<Path>>(path: P, config: &WaveformConfig) -> Result<()> {
    let path = path.as_ref();
    let waveform = load_waveform(path)?;
    let main_dir = plot::ensure_dir(config.output.join(file_stem(path)))?;
    let image_dir = plot::ensure_dir(main_dir.join(IMAGE_DIR))?;

    let voltage = voltage_chart(&waveform)?;
    let current = current_chart(&waveform)?;
    plot::render(&voltage, image_dir.join("voltage_wave.png"))?;
    plot::render(&current, image_dir.join("current_wave.png"))?;
    plot::render(
        &combined_chart(&waveform, config.current_range),
        image_dir.join("combined_waveform.png"),
    )?;

    if let Err(e) = export_sorted(&waveform, main_dir.join(SORTED_FILE)) {
        log::error!("{}: {}", display_name(path), e);
    }

    let max_voltage = summary(&waveform.voltage, "Value1")?.max;
    let max_current = summary(&waveform.current, "Value2")?.max;
    log::info!(
        "Mean of max values for {}: {:.3}V/A",
        display_name(path),
        0.5 * (max_voltage + max_current)
    );
    Ok(())
}

pub fn run(config: &WaveformConfig) -> Result<BatchReport> {
    let paths = batch::inputs(&config.input, &["csv"])?;
    Ok(BatchReport::run(
        &paths,
        |path| display_name(path),
        |path| process(path, config),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waveform() -> Waveform {
        Waveform {
            voltage: vec![Some(0.), Some(325.), None, Some(-325.)],
            current: vec![Some(0.), Some(10.), Some(2.), None],
        }
    }

    #[test]
    fn inset_notes() {
        let spec = voltage_chart(&waveform()).unwrap();
        let notes = spec.notes.unwrap();
        assert_eq!(notes.lines, vec!["Max: 325.0V", "Min: -325.0V", "Mean Max: 325.000V"]);
        assert_eq!(notes.placement, NotesPlacement::InsetLowerLeft);
        assert!(!spec.x.show_tick_labels);
        assert!(spec.zero_line);
    }

    #[test]
    fn gaps_are_kept() {
        let spec = current_chart(&waveform()).unwrap();
        assert_eq!(spec.series[0].points.len(), 4);
        assert_eq!(spec.series[0].segments().len(), 1);
        let spec = voltage_chart(&waveform()).unwrap();
        assert_eq!(spec.series[0].segments().len(), 2);
    }

    #[test]
    fn current_axis() {
        let spec = combined_chart(&waveform(), (-25., 25.));
        assert_eq!(spec.y_range(plot::Axis::Secondary), Some((-25., 25.)));
        assert_eq!(spec.series[1].axis, plot::Axis::Secondary);
    }

    #[test]
    fn empty_capture() {
        let empty = Waveform {
            voltage: vec![None],
            current: vec![None],
        };
        assert!(voltage_chart(&empty).is_err());
    }
}
