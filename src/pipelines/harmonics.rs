//! Power-quality analyzer harmonics
//!
//! Voltage and current, powers, voltage harmonics and the vector diagram of
//! every analyzer export, each file in its own folder.

use super::file_stem;
use crate::{
    batch::{self, display_name, BatchReport},
    config::HarmonicsConfig,
    error::Result,
    loader::csv::load_headed,
    phasor::{harmonic_column, PhasorSummary, EVEN_HARMONICS, ODD_HARMONICS},
    plot::{self, colors, palette, phasor::render_phasor, AxisSpec, ChartSpec, Limits, Series},
    table::MeasurementTable,
};
use plotters::style::RGBColor;
use std::path::Path;

pub const VOLTAGE: &str = "AveUrms1";
pub const CURRENT: &str = "AveIrms1";
pub const ACTIVE_POWER: &str = "AveP1";
pub const APPARENT_POWER: &str = "AveS1";
pub const REACTIVE_POWER: &str = "AveQ1";
pub const POWER_FACTOR: &str = "AvePF1";
pub const THD: &str = "MaxUthd1";
pub const PHASOR_CHART: &str = "Fasorial_Fasorial.png";

const SIZE: (u32, u32) = (1000, 360);

/// Columns read from the exports
pub fn fields(config: &HarmonicsConfig) -> Vec<String> {
    let mut fields: Vec<String> = [
        config.time_field.as_str(),
        VOLTAGE,
        CURRENT,
        ACTIVE_POWER,
        APPARENT_POWER,
        REACTIVE_POWER,
        POWER_FACTOR,
        THD,
    ]
    .iter()
    .map(|f| f.to_string())
    .collect();
    fields.extend((2..=10).map(harmonic_column));
    fields
}

/// Signals against time on one axis, `None` colors are taken from the palette
fn time_chart(
    table: &MeasurementTable,
    config: &HarmonicsConfig,
    title: &str,
    signals: &[(String, Option<RGBColor>)],
) -> Result<ChartSpec> {
    let time = table.column(&config.time_field)?;
    let mut fallback = palette();
    signals.iter().try_fold(
        ChartSpec::new(title, SIZE)
            .integer_x()
            .x_axis(AxisSpec::new("Time (s)")),
        |spec, (signal, color)| -> Result<ChartSpec> {
            let color = color.or_else(|| fallback.next()).unwrap_or(colors::BLUE);
            Ok(spec.series(Series::new(signal.as_str(), time, table.column(signal)?).color(color)))
        },
    )
}

fn named(signals: &[&str]) -> Vec<(String, Option<RGBColor>)> {
    signals.iter().map(|s| (s.to_string(), None)).collect()
}

fn harmonics(orders: &[u32]) -> Vec<(String, Option<RGBColor>)> {
    orders.iter().map(|&o| (harmonic_column(o), None)).collect()
}

/// RMS voltage with the RMS current on the secondary axis
pub fn voltage_current(table: &MeasurementTable, config: &HarmonicsConfig) -> Result<ChartSpec> {
    let (v0, v1) = config.voltage_range;
    let (i0, i1) = config.current_range;
    let time = table.column(&config.time_field)?;
    Ok(time_chart(
        table,
        config,
        "AveU_I",
        &[(VOLTAGE.to_string(), Some(colors::GREEN))],
    )?
    .y_axis(
        AxisSpec::new("Voltage (V)")
            .label_color(colors::GREEN)
            .limits(Limits::Fixed(v0, v1))
            .tick_step(config.voltage_tick),
    )
    .secondary_axis(
        AxisSpec::new(CURRENT)
            .label_color(colors::BLUE)
            .limits(Limits::Fixed(i0, i1)),
    )
    .series(
        Series::new(CURRENT, time, table.column(CURRENT)?)
            .color(colors::BLUE)
            .secondary(),
    ))
}

/// Active, apparent and reactive powers with the power factor
pub fn powers(table: &MeasurementTable, config: &HarmonicsConfig) -> Result<ChartSpec> {
    let signals: Vec<_> = [
        (ACTIVE_POWER, colors::RED),
        (APPARENT_POWER, colors::BLACK),
        (REACTIVE_POWER, colors::YELLOW),
        (POWER_FACTOR, colors::CYAN),
    ]
    .iter()
    .map(|&(s, c)| (s.to_string(), Some(c)))
    .collect();
    Ok(time_chart(table, config, "AveP_S_Q_PF", &signals)?
        .y_axis(AxisSpec::new("Power (W, VA, VAR)")))
}

/// Total harmonic distortion and every voltage harmonic
pub fn distortion(table: &MeasurementTable, config: &HarmonicsConfig) -> Result<ChartSpec> {
    let (lo, hi) = config.harmonics_range;
    let mut signals = named(&[THD]);
    signals.extend(harmonics(&(2..=10).collect::<Vec<u32>>()));
    Ok(time_chart(table, config, "MaxU", &signals)?
        .y_axis(AxisSpec::new("THD (%)").limits(Limits::Fixed(lo, hi))))
}

/// Even (group 1) or odd (group 2) voltage harmonics
pub fn harmonic_group(
    table: &MeasurementTable,
    config: &HarmonicsConfig,
    title: &str,
    orders: &[u32],
) -> Result<ChartSpec> {
    Ok(time_chart(table, config, title, &harmonics(orders))?.y_axis(AxisSpec::new("THD (%)")))
}

/// Charts of one export, in `dir`
pub fn process<P: AsRef<Path>>(path: P, config: &HarmonicsConfig, dir: &Path) -> Result<()> {
    let path = path.as_ref();
    let table = load_headed(path, &fields(config), Some(config.time_field.as_str()))?;
    let dir = plot::ensure_dir(dir)?;
    let charts = [
        ("AveU_I", voltage_current(&table, config)?),
        ("AveP_S_Q_PF", powers(&table, config)?),
        ("MaxU", distortion(&table, config)?),
        (
            "MaxU1_Group1",
            harmonic_group(&table, config, "MaxU1_Group1", &EVEN_HARMONICS)?,
        ),
        (
            "MaxU1_Group2",
            harmonic_group(&table, config, "MaxU1_Group2", &ODD_HARMONICS)?,
        ),
    ];
    for (name, spec) in charts {
        plot::render(&spec, dir.join(format!("{}.png", name)))?;
    }
    match PhasorSummary::from_table(&table, ACTIVE_POWER, APPARENT_POWER) {
        Ok(summary) => {
            log::info!(
                "{}: FP = {:.4}, angle = {:.2}°, THD = {:.2}%",
                display_name(path),
                summary.power_factor.cos_theta,
                summary.angle_deg(),
                summary.thd
            );
            render_phasor(&summary, "Fasorial", dir.join(PHASOR_CHART))?;
        }
        Err(e) => log::warn!("{}: vector diagram skipped: {}", display_name(path), e),
    }
    Ok(())
}

pub fn run(config: &HarmonicsConfig) -> Result<BatchReport> {
    let paths = batch::inputs(&config.input, &["csv"])?;
    Ok(BatchReport::run(
        &paths,
        |path| display_name(path),
        |path| process(path, config, &config.output.join(file_stem(path))),
    ))
}
