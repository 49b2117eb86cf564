//! ETAS DC/DC converter power
//!
//! Maximum and mean of the converter current, voltage and power over the
//! steady window, drawn under the whole record.

use crate::{
    batch::{self, BatchReport},
    config::DcdcConfig,
    error::Result,
    loader::workbook::{read_table, Workbook},
    plot::{self, colors, AxisSpec, ChartSpec, Limits, NotesPlacement, Series},
    stats::Summary,
    table::MeasurementTable,
};

/// Statistics of the steady window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcdcStats {
    pub current: Summary,
    pub voltage: Summary,
    pub power: Summary,
}
impl DcdcStats {
    /// Fails if no sample falls in the window
    pub fn new(table: &MeasurementTable, config: &DcdcConfig) -> Result<Self> {
        let steady = table.within("time", config.window)?;
        Ok(Self {
            current: steady.summary("current")?,
            voltage: steady.summary("voltage")?,
            power: steady.summary("power")?,
        })
    }
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "DCDC_Current (A) (Blue): Max = {:.2}, Average = {:.2}",
                self.current.max, self.current.mean
            ),
            format!(
                "DCDC_Voltage (V) (Green): Max = {:.2}, Average = {:.2}",
                self.voltage.max, self.voltage.mean
            ),
            format!(
                "DCDC_Power (W) (Red): Max = {:.2}, Average = {:.2}",
                self.power.max, self.power.mean
            ),
        ]
    }
}

pub fn chart(table: &MeasurementTable, sheet: &str, stats: &DcdcStats, power_margin: f64) -> Result<ChartSpec> {
    let time = table.column("time")?;
    Ok(ChartSpec::new(format!("Test graph: {}", sheet), (1200, 800))
        .y_axis(AxisSpec::new("Current / Voltage"))
        .secondary_axis(
            AxisSpec::new("Power")
                .label_color(colors::RED)
                .limits(Limits::PeakMargin(power_margin)),
        )
        .series(Series::new("Current (A)", time, table.column("current")?).color(colors::BLUE))
        .series(Series::new("Voltage (V)", time, table.column("voltage")?).color(colors::GREEN))
        .series(
            Series::new("Power", time, table.column("power")?)
                .color(colors::RED)
                .secondary(),
        )
        .notes(stats.lines(), NotesPlacement::Footer))
}

pub fn run(config: &DcdcConfig) -> Result<BatchReport> {
    batch::ensure_input(&config.input)?;
    let mut workbook = Workbook::open(&config.input)?;
    let sheets = workbook.sheet_names();
    let dir = plot::ensure_dir(&config.output)?;
    Ok(BatchReport::run(
        &sheets,
        |sheet| sheet.clone(),
        |sheet| -> Result<()> {
            let range = workbook.sheet(sheet)?;
            let table = read_table(&range, sheet, &config.schema)?;
            let stats = DcdcStats::new(&table, config)?;
            log::info!("{}: {}", sheet, stats.lines().join(" | "));
            plot::render(
                &chart(&table, sheet, &stats, config.power_margin)?,
                dir.join(format!("{}.png", sheet)),
            )?;
            Ok(())
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{stats::TimeWindow, table::TableError};

    fn table() -> MeasurementTable {
        let mut table = MeasurementTable::new(["time", "current", "voltage", "power"]);
        for row in [
            [100., 1., 10., 10.],
            [150., 2., 12., 24.],
            [175., 4., 12., 48.],
            [180., 9., 20., 180.],
        ] {
            table.push_row(&row).unwrap();
        }
        table
    }

    #[test]
    fn window_statistics() {
        let stats = DcdcStats::new(&table(), &DcdcConfig::default()).unwrap();
        assert_eq!(stats.current.max, 4.);
        assert_eq!(stats.current.mean, 3.);
        assert_eq!(stats.power.count, 2);
    }

    #[test]
    fn empty_window_is_skipped() {
        let config = DcdcConfig {
            window: TimeWindow::new(500., 600.),
            ..Default::default()
        };
        assert!(matches!(
            DcdcStats::new(&table(), &config),
            Err(crate::error::Error::Table(TableError::Empty(_)))
        ));
    }

    #[test]
    fn power_axis() {
        let table = table();
        let config = DcdcConfig::default();
        let stats = DcdcStats::new(&table, &config).unwrap();
        let spec = chart(&table, "Sheet1", &stats, config.power_margin).unwrap();
        // power spans 10..180, peak 180
        let (lo, hi) = spec.y_range(plot::Axis::Secondary).unwrap();
        approx::assert_abs_diff_eq!(lo, 10. - 162., epsilon = 1e-9);
        approx::assert_abs_diff_eq!(hi, 180. + 162., epsilon = 1e-9);
    }
}
