//! OBD efficiency curve
//!
//! One workbook per test: the mean HV power over the steady window gives the
//! system and component efficiencies of the test nominal load.

use crate::{
    batch::{self, display_name, BatchReport},
    config::{EfficiencyConfig, WORKBOOK_EXTENSIONS},
    efficiency::{match_test, EfficiencyCurve, TestRecord},
    error::Result,
    loader::workbook::{read_table, Workbook},
    plot::{self, colors, AxisSpec, ChartSpec, Legend, Limits, Mark, Series},
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const CHART: &str = "efficiency_curve.png";
pub const RESULTS: &str = "efficiency.csv";
const OVERLAY_NOTE: &str = "500W_20% SOC";

/// Absolute mean power [kW] of a test workbook over the configured window
pub fn mean_power<P: AsRef<Path>>(path: P, config: &EfficiencyConfig) -> Result<f64> {
    let mut workbook = Workbook::open(path)?;
    let (sheet, range) = workbook.first_sheet()?;
    let table = read_table(&range, &sheet, &config.schema)?;
    let steady = table.within("time", config.window)?;
    Ok(steady.summary("power")?.mean.abs())
}

/// Efficiency curves of the workbooks in the input folder
pub fn run(config: &EfficiencyConfig) -> Result<BatchReport> {
    let paths = batch::inputs(&config.input, &WORKBOOK_EXTENSIONS)?;
    let mut unmatched = BatchReport::default();
    let tests: Vec<(PathBuf, &TestRecord)> = paths
        .into_iter()
        .filter_map(|path| {
            let name = display_name(&path);
            match match_test(&config.tests, &name) {
                Some(test) => Some((path, test)),
                None => {
                    log::warn!("{} skipped: no known test in the file name", name);
                    unmatched
                        .skipped
                        .push((name, "no known test in the file name".into()));
                    None
                }
            }
        })
        .collect();

    let mut measured = BTreeMap::new();
    let report = BatchReport::run(
        &tests,
        |(path, _)| display_name(path),
        |(path, test)| -> Result<()> {
            let mean_kw = mean_power(path, config)?;
            log::info!("{}: mean power {:.4} kW", test.pattern, mean_kw);
            measured.insert(test.pattern.clone(), mean_kw);
            Ok(())
        },
    );

    let curve = EfficiencyCurve::build(&config.tests, &measured);
    if curve.is_empty() {
        log::warn!("No efficiency measurement, the chart is not drawn");
    } else {
        let dir = plot::ensure_dir(config.charts_dir())?;
        write_results(&curve, dir.join(RESULTS))?;
        plot::render(&chart(&curve), dir.join(CHART))?;
    }
    Ok(unmatched.merge(report))
}

/// Writes the efficiency of every test
pub fn write_results<P: AsRef<Path>>(curve: &EfficiencyCurve, path: P) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for point in curve.points.iter().chain(curve.overlay.iter()) {
        wtr.serialize(point)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    log::info!("Saved {:?}", path.as_ref());
    Ok(())
}

/// System and component efficiency per test, with the overlay points
pub fn chart(curve: &EfficiencyCurve) -> ChartSpec {
    let labels = curve.labels();
    let x: Vec<f64> = (0..labels.len()).map(|i| i as f64).collect();
    let mut spec = ChartSpec::new("Efficiency Curve", (1000, 600))
        .categories(labels.clone())
        .x_axis(AxisSpec::new("Test"))
        .y_axis(AxisSpec::new("Efficiency (%)").limits(Limits::Fixed(0., 100.)))
        .legend(Legend::LowerRight)
        .series(
            Series::new("System efficiency", &x, &curve.system())
                .color(colors::BLUE)
                .mark(Mark::LineMarkers),
        )
        .series(
            Series::new("Component efficiency", &x, &curve.component())
                .color(colors::RED)
                .mark(Mark::DashedMarkers),
        );
    if let Some(overlay) = &curve.overlay {
        match labels.iter().position(|l| *l == overlay.label) {
            Some(i) => {
                let at = i as f64;
                spec = spec
                    .series(
                        Series::new("500W-20 Point (System)", &[at], &[overlay.system])
                            .color(colors::BLUE)
                            .mark(Mark::Points),
                    )
                    .series(
                        Series::new("500W-20 Point (Component)", &[at], &[overlay.component])
                            .color(colors::RED)
                            .mark(Mark::Points),
                    );
                // labelled only when both efficiencies are meaningful
                if overlay.system != 0. && overlay.component != 0. {
                    spec = spec
                        .annotate(OVERLAY_NOTE, (at, overlay.system - 5.), colors::BLUE)
                        .annotate(OVERLAY_NOTE, (at, overlay.component + 4.), colors::RED);
                }
            }
            None => log::warn!(
                "No {:?} test on the curve, the overlay points are not drawn",
                overlay.label
            ),
        }
    }
    spec
}
