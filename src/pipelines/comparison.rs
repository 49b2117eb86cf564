//! Efficiency comparison between vehicles
//!
//! One curve per workbook column against the output power, with the 0.1 kW
//! calibration point always on the axis and the known anomalous samples drawn
//! apart from their curve.

use crate::{
    batch::{self, BatchReport},
    config::{AnomalousSample, ComparisonConfig},
    error::Result,
    loader::workbook::{read_curves, Workbook},
    plot::{self, colors, AxisSpec, ChartSpec, DetachedSample, Legend, Limits, Mark, Series},
    table::{CurveTable, TableError},
};

pub const CHART: &str = "Efficiency Comparison Between Vehicles.png";

/// Index of the sample of `anomaly` once the sentinel row is accounted for
pub fn anomaly_index(anomaly: &AnomalousSample, sentinel_inserted: bool) -> usize {
    anomaly.row + usize::from(sentinel_inserted)
}

/// Curves in percent, with the sentinel abscissa
///
/// Returns whether the sentinel row was inserted.
pub fn prepare(mut curves: CurveTable, sentinel: f64) -> (CurveTable, bool) {
    let inserted = curves.ensure_sentinel(sentinel);
    if inserted {
        log::info!("{} kW added to the power axis", sentinel);
    }
    curves.scale(100.);
    (curves, inserted)
}

pub fn chart(curves: &CurveTable, inserted: bool, config: &ComparisonConfig) -> Result<ChartSpec> {
    let (x0, x1) = curves
        .x
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
        .ok_or_else(|| TableError::Empty(curves.x_name.clone()))?;
    let x_axis = AxisSpec::new("Power (kW)").limits(Limits::Fixed(x0, x1));
    let mut spec = ChartSpec::new("Vehicle Efficiency Comparison", (1000, 600))
        .x_axis(x_axis.tick_step(config.x_tick))
        .y_axis(
            AxisSpec::new("Efficiency (%)")
                .limits(Limits::Fixed(0., 100.))
                .ticks(10),
        )
        .legend(Legend::LowerRight);
    for (i, curve) in curves.curves.iter().enumerate() {
        let color = colors::PAIRS[(i / 2) % colors::PAIRS.len()][i % 2];
        let mut series = Series::sparse(curve.name.as_str(), &curves.x, &curve.values)
            .color(color)
            .mark(Mark::LineMarkers);
        if let Some(anomaly) = config.anomalies.iter().find(|a| a.curve == curve.name) {
            let index = anomaly_index(anomaly, inserted);
            log::info!(
                "{}: sample {} drawn apart from the curve",
                curve.name,
                index
            );
            series = series.detach(DetachedSample {
                index,
                color: colors::RED,
                label: format!("{} row {}", curve.name, anomaly.row + 1),
            });
        }
        spec = spec.series(series);
    }
    Ok(spec)
}

pub fn run(config: &ComparisonConfig) -> Result<BatchReport> {
    batch::ensure_input(&config.input)?;
    let mut workbook = Workbook::open(&config.input)?;
    let (sheet, range) = workbook.first_sheet()?;
    let curves = read_curves(
        &range,
        &sheet,
        &config.power_column,
        &config.first_curve_column,
    )?;
    log::info!("{} efficiency curves in {}", curves.curves.len(), sheet);
    let (curves, inserted) = prepare(curves, config.sentinel);
    let dir = plot::ensure_dir(config.charts_dir())?;
    Ok(BatchReport::run(
        &[sheet],
        |sheet| sheet.clone(),
        |_| -> Result<()> {
            plot::render(&chart(&curves, inserted, config)?, dir.join(CHART))?;
            Ok(())
        },
    ))
}
