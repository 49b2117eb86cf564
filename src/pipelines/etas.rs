//! ETAS acquisition signals
//!
//! One sheet per test, three charts per sheet: LV battery current and voltage,
//! LV against DC/DC output current, and the V2L adapter current.

use crate::{
    batch::{self, BatchReport},
    config::EtasConfig,
    error::Result,
    loader::workbook::{read_table, Workbook},
    plot::{self, colors, AxisSpec, ChartSpec, Limits, Series},
    table::MeasurementTable,
};

pub const LV_CURRENT: &str = "ADS1_CH1";
pub const DCDC_CURRENT: &str = "ADS1_CH2";
pub const V2L_CURRENT: &str = "ADS1_CH3";
pub const LV_VOLTAGE: &str = "ADS2_CH3";

/// The three charts of a sheet, with their file names
pub fn charts(table: &MeasurementTable, v2l_margin: f64) -> Result<Vec<(&'static str, ChartSpec)>> {
    let time = table.column("time")?;
    let lv_current = table.summary(LV_CURRENT)?;
    let lv_voltage = table.summary(LV_VOLTAGE)?;
    let dcdc_current = table.summary(DCDC_CURRENT)?;
    let v2l_current = table.summary(V2L_CURRENT)?;

    let chart_1 = ChartSpec::new(
        format!(
            "Graph 1: Current & Voltage vs Time\n\
             Mean Current: {:.2} A | Max Current: {:.2} A\n\
             Mean Voltage: {:.2} V | Max Voltage: {:.2} V",
            lv_current.mean, lv_current.max, lv_voltage.mean, lv_voltage.max
        ),
        (800, 640),
    )
    .y_axis(AxisSpec::new("LV Battery"))
    .series(Series::new("Current (LV)", time, table.column(LV_CURRENT)?).color(colors::BLUE))
    .series(Series::new("Voltage (LV)", time, table.column(LV_VOLTAGE)?).color(colors::GREEN));

    let chart_2 = ChartSpec::new(
        format!(
            "Graph 2: LV & DCDC_OUT Current vs Time\n\
             Mean LV Current: {:.2} A | Max LV Current: {:.2} A\n\
             Mean DCDC Current: {:.2} A | Max DCDC Current: {:.2} A",
            lv_current.mean, lv_current.max, dcdc_current.mean, dcdc_current.max
        ),
        (800, 640),
    )
    .y_axis(AxisSpec::new("Current"))
    .series(Series::new("Current (LV)", time, table.column(LV_CURRENT)?).color(colors::BLUE))
    .series(
        Series::new("DCDC_OUT Current", time, table.column(DCDC_CURRENT)?)
            .color(colors::DARK_BLUE),
    );

    let chart_3 = ChartSpec::new(
        format!(
            "Graph 3: V2L Current vs Time\n\
             Mean V2L Current: {:.2} A | Max V2L Current: {:.2} A",
            v2l_current.mean, v2l_current.max
        ),
        (800, 620),
    )
    .y_axis(AxisSpec::new("V2L Current").limits(Limits::SpanMargin(v2l_margin)))
    .series(Series::new("V2L Adapter", time, table.column(V2L_CURRENT)?).color(colors::BLUE));

    Ok(vec![
        ("chart_1.png", chart_1),
        ("chart_2.png", chart_2),
        ("chart_3.png", chart_3),
    ])
}

/// Charts of one sheet, in `<output>/<sheet>`
pub fn process_sheet(table: &MeasurementTable, sheet: &str, config: &EtasConfig) -> Result<()> {
    let charts = charts(table, config.v2l_margin)?;
    let dir = plot::ensure_dir(config.output.join(sheet))?;
    for (file_name, spec) in charts {
        plot::render(&spec, dir.join(file_name))?;
    }
    Ok(())
}

pub fn run(config: &EtasConfig) -> Result<BatchReport> {
    batch::ensure_input(&config.input)?;
    let mut workbook = Workbook::open(&config.input)?;
    let sheets = workbook.sheet_names();
    log::info!("{} sheets in {:?}", sheets.len(), config.input);
    Ok(BatchReport::run(
        &sheets,
        |sheet| sheet.clone(),
        |sheet| -> Result<()> {
            let range = workbook.sheet(sheet)?;
            let table = read_table(&range, sheet, &config.schema)?;
            process_sheet(&table, sheet, config)
        },
    ))
}
