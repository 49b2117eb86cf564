//! OBD logger signals
//!
//! Power, HV current, SOC and HV voltage along a test, and the current to
//! power characteristic. One test file may also get the endurance chart.

use super::file_stem;
use crate::{
    batch::{self, display_name, BatchReport},
    config::{ObdConfig, WORKBOOK_EXTENSIONS},
    error::Result,
    loader::workbook::{read_table, Workbook},
    plot::{self, colors, AxisSpec, ChartSpec, Legend, Series},
    schema::SheetSchema,
    table::MeasurementTable,
};
use std::path::Path;

fn load<P: AsRef<Path>>(path: P, schema: &SheetSchema) -> Result<MeasurementTable> {
    let mut workbook = Workbook::open(path)?;
    let (sheet, range) = workbook.first_sheet()?;
    Ok(read_table(&range, &sheet, schema)?)
}

/// Power and HV current on the left axis, SOC and HV voltage on the right one
pub fn signals_chart(table: &MeasurementTable) -> Result<ChartSpec> {
    let time = table.column("time")?;
    let power = table.summary("power")?;
    let current = table.summary("current")?;
    let soc = table.summary("soc")?;
    let voltage = table.summary("voltage")?;
    Ok(
        ChartSpec::new("Graph 1: HV Voltage, HV Current, SOC & HV Power vs Time", (1000, 600))
            .y_axis(AxisSpec::new("Power (kW) / Current (A)"))
            .secondary_axis(AxisSpec::new("SOC (%) / HV Voltage"))
            .legend(Legend::UpperRight)
            .series(
                Series::new(
                    format!("Power (kW) Min: {:.2}, Avg: {:.2}", power.min, power.mean),
                    time,
                    table.column("power")?,
                )
                .color(colors::RED),
            )
            .series(
                Series::new(
                    format!("HV Current (A) Min: {:.2}", current.min),
                    time,
                    table.column("current")?,
                )
                .color(colors::BLUE),
            )
            .series(
                Series::new(format!("SOC (%) Max: {:.2}", soc.max), time, table.column("soc")?)
                    .color(colors::BLACK)
                    .secondary(),
            )
            .series(
                Series::new(
                    format!("HV Voltage (V) Max: {:.2}", voltage.max),
                    time,
                    table.column("voltage")?,
                )
                .color(colors::GREEN)
                .secondary(),
            ),
    )
}

/// HV power against HV current
pub fn current_power_chart(table: &MeasurementTable) -> Result<ChartSpec> {
    let power = table.summary("power")?;
    Ok(ChartSpec::new("Graph 3: Current vs Power", (1000, 600))
        .x_axis(AxisSpec::new("Current (A)"))
        .y_axis(AxisSpec::new("Power (kW)"))
        .series(
            Series::new(
                format!("Current vs Power Max: {:.2}", power.max),
                table.column("current")?,
                table.column("power")?,
            )
            .color(colors::BLUE),
        ))
}

/// SOC and temperature on the left axis, voltage on the right one
pub fn endurance_chart(table: &MeasurementTable) -> Result<ChartSpec> {
    let time = table.column("time")?;
    let soc = table.summary("soc")?;
    let temperature = table.summary("temperature")?;
    let voltage = table.summary("voltage")?;
    Ok(ChartSpec::new("Graph: 3h Endurance", (1000, 600))
        .y_axis(AxisSpec::new("SOC (%) / Temperature (°C)"))
        .secondary_axis(AxisSpec::new("Voltage (V)"))
        .series(
            Series::new(format!("SOC (%) Max: {:.2}", soc.max), time, table.column("soc")?)
                .color(colors::BLACK),
        )
        .series(
            Series::new(
                format!("Temperature (°C) Max: {:.2}", temperature.max),
                time,
                table.column("temperature")?,
            )
            .color(colors::RED),
        )
        .series(
            Series::new(
                format!("Voltage (V) Max: {:.2}", voltage.max),
                time,
                table.column("voltage")?,
            )
            .color(colors::GREEN)
            .secondary(),
        ))
}

/// Charts of one OBD workbook
pub fn process<P: AsRef<Path>>(path: P, config: &ObdConfig, dir: &Path) -> Result<()> {
    let path = path.as_ref();
    let table = load(path, &config.schema)?;
    let name = display_name(path);
    plot::render(&signals_chart(&table)?, dir.join(format!("{}_chart_1.png", name)))?;
    plot::render(
        &current_power_chart(&table)?,
        dir.join(format!("{}_chart_3.png", name)),
    )?;
    Ok(())
}

/// Endurance chart of one OBD workbook
pub fn process_endurance<P: AsRef<Path>>(path: P, config: &ObdConfig, dir: &Path) -> Result<()> {
    let path = path.as_ref();
    let table = load(path, &config.endurance_schema)?;
    plot::render(
        &endurance_chart(&table)?,
        dir.join(format!("{}_endurance.png", file_stem(path))),
    )?;
    Ok(())
}

pub fn run(config: &ObdConfig) -> Result<BatchReport> {
    let paths = batch::inputs(&config.input, &WORKBOOK_EXTENSIONS)?;
    let dir = plot::ensure_dir(config.charts_dir())?;
    let mut report = BatchReport::run(
        &paths,
        |path| display_name(path),
        |path| process(path, config, &dir),
    );
    if let Some(endurance) = &config.endurance {
        let path = config.input.join(endurance);
        if path.is_file() {
            report = report.merge(BatchReport::run(
                &[path],
                |path| format!("{} (endurance)", display_name(path)),
                |path| process_endurance(path, config, &dir),
            ));
        } else {
            log::warn!("Endurance test {:?} not found, its chart is skipped", path);
        }
    }
    Ok(report)
}
