//! Rig constants of every analysis
//!
//! Each pipeline takes its own configuration; `Default` holds the values of
//! the test rig (paths, sheet layouts, time windows and calibration table).
//! Binaries only override the input and output paths.

use crate::{efficiency::TestRecord, schema::SheetSchema, stats::TimeWindow};
use std::path::PathBuf;

macro_rules! paths {
    ($($config:ident),+) => {
        $(
            impl $config {
                /// Replaces the input path
                pub fn with_input<P: Into<PathBuf>>(self, input: P) -> Self {
                    Self {
                        input: input.into(),
                        ..self
                    }
                }
                /// Replaces the output path
                pub fn with_output<P: Into<PathBuf>>(self, output: P) -> Self {
                    Self {
                        output: output.into(),
                        ..self
                    }
                }
            }
        )+
    };
}
paths!(
    EfficiencyConfig,
    ObdConfig,
    EtasConfig,
    DcdcConfig,
    HarmonicsConfig,
    WaveformConfig,
    ComparisonConfig
);

/// Workbook extensions of the OBD logger exports
pub const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// OBD efficiency curve
#[derive(Debug, Clone)]
pub struct EfficiencyConfig {
    /// folder of OBD workbooks
    pub input: PathBuf,
    /// the charts go into `<output>/processed_charts`
    pub output: PathBuf,
    pub schema: SheetSchema,
    pub window: TimeWindow,
    /// known tests, matched in order against the file names
    pub tests: Vec<TestRecord>,
}
impl EfficiencyConfig {
    /// Calibration offsets [kW] measured at no load, keyed by nominal load
    pub fn calibration() -> Vec<(f64, f64)> {
        vec![
            (0.1, 0.23874 / 0.95),
            (0.5, 0.23877 / 0.95),
            (0.6, 0.15857 / 0.95),
            (1., 0.23878 / 0.95),
            (2., 0.23859 / 0.95),
            (3., 0.2384 / 0.95),
            (3.3, 0.2389 / 0.95),
        ]
    }
    /// Offset of the nominal load `key`, 0 if it isn't calibrated
    pub fn offset(key: f64) -> f64 {
        Self::calibration()
            .into_iter()
            .find(|(k, _)| (k - key).abs() < 1e-9)
            .map_or(0., |(_, offset)| offset)
    }
    pub fn charts_dir(&self) -> PathBuf {
        self.output.join("processed_charts")
    }
}
impl Default for EfficiencyConfig {
    fn default() -> Self {
        let test = |pattern: &str, nominal: f64| TestRecord::new(pattern, nominal, Self::offset(nominal));
        Self {
            input: PathBuf::from("data/obd"),
            output: PathBuf::from("data/obd"),
            schema: SheetSchema::new(15).time("time", "D").field("power", "L"),
            window: TimeWindow::new(25., 170.),
            tests: vec![
                test("- eff 100W", 0.1),
                // 500 W at 20% SOC, calibrated apart from the 500 W curve point
                TestRecord::new("- eff 500W - 20", 0.5, Self::offset(0.6)).overlay("500W"),
                test("- eff 500W", 0.5),
                test("- eff 1000W", 1.),
                test("- eff 2000W", 2.),
                test("- eff 3000W", 3.),
                test("- eff 3300W", 3.3),
            ],
        }
    }
}

/// OBD signal charts
#[derive(Debug, Clone)]
pub struct ObdConfig {
    /// folder of OBD workbooks
    pub input: PathBuf,
    /// the charts go into `<output>/processed_charts`
    pub output: PathBuf,
    pub schema: SheetSchema,
    /// file name of the endurance test, inside `input`
    pub endurance: Option<String>,
    pub endurance_schema: SheetSchema,
}
impl ObdConfig {
    pub fn charts_dir(&self) -> PathBuf {
        self.output.join("processed_charts")
    }
}
impl Default for ObdConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/obd"),
            output: PathBuf::from("data/obd"),
            schema: SheetSchema::new(15)
                .time("time", "D")
                .field("voltage", "N")
                .field("current", "O")
                .field("soc", "K")
                .field("power", "L"),
            endurance: Some("20F4-10-31 09-37-13- 3h test.xlsx".into()),
            endurance_schema: SheetSchema::new(15)
                .time("time", "D")
                .field("voltage", "N")
                .field("soc", "K")
                .field("temperature", "Y"),
        }
    }
}

/// ETAS acquisition signals
#[derive(Debug, Clone)]
pub struct EtasConfig {
    /// ETAS workbook, one test per sheet
    pub input: PathBuf,
    /// one folder per sheet
    pub output: PathBuf,
    pub schema: SheetSchema,
    /// margin of the V2L current axis, as a fraction of its span
    pub v2l_margin: f64,
}
impl Default for EtasConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/etas/Etas_kona_excel_V2L.xlsx"),
            output: PathBuf::from("data/etas/processed_signals"),
            schema: SheetSchema::new(4)
                .time("time", "A")
                .field("ADS1_CH1", "B")
                .field("ADS1_CH2", "C")
                .field("ADS1_CH3", "D")
                .field("ADS2_CH3", "F"),
            v2l_margin: 0.1,
        }
    }
}

/// ETAS DC/DC converter power
#[derive(Debug, Clone)]
pub struct DcdcConfig {
    /// ETAS workbook, one test per sheet
    pub input: PathBuf,
    pub output: PathBuf,
    pub schema: SheetSchema,
    pub window: TimeWindow,
    /// margin of the power axis, as a fraction of the power peak
    pub power_margin: f64,
}
impl Default for DcdcConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/etas/ETAS_Kona_EXCEL_V2L_POT.xlsx"),
            output: PathBuf::from("data/etas/Pot_DCDC"),
            schema: SheetSchema::new(4)
                .time("time", "A")
                .field("current", "B")
                .field("voltage", "C")
                .field("power", "D"),
            window: TimeWindow::new(150., 175.),
            power_margin: 0.9,
        }
    }
}

/// Power-quality analyzer harmonics
#[derive(Debug, Clone)]
pub struct HarmonicsConfig {
    /// folder of analyzer CSV exports
    pub input: PathBuf,
    /// one folder per CSV file
    pub output: PathBuf,
    pub time_field: String,
    pub voltage_range: (f64, f64),
    pub voltage_tick: f64,
    pub current_range: (f64, f64),
    pub harmonics_range: (f64, f64),
}
impl Default for HarmonicsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/hioki/csv"),
            output: PathBuf::from("data/hioki/charts"),
            time_field: "Time".into(),
            voltage_range: (0., 240.),
            voltage_tick: 60.,
            current_range: (0., 20.),
            harmonics_range: (0., 1.5),
        }
    }
}

/// Power-quality analyzer waveforms
#[derive(Debug, Clone)]
pub struct WaveformConfig {
    /// folder of headerless waveform CSV files
    pub input: PathBuf,
    /// results go into `<output>/<file stem>`
    pub output: PathBuf,
    pub current_range: (f64, f64),
}
impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/hioki/waveforms"),
            output: PathBuf::from("data/hioki/waveforms"),
            current_range: (-25., 25.),
        }
    }
}

/// Explicit override of one sample of one curve
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalousSample {
    /// curve name, from the header row
    pub curve: String,
    /// 0-based index of the data row in the workbook
    pub row: usize,
}

/// Efficiency comparison between vehicles
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// workbook of efficiency curves
    pub input: PathBuf,
    /// the chart goes into `<output>/comparison_eff`
    pub output: PathBuf,
    pub power_column: String,
    pub first_curve_column: String,
    /// power [kW] that must appear on the X axis
    pub sentinel: f64,
    /// samples left out of their curve and drawn as markers
    pub anomalies: Vec<AnomalousSample>,
    pub x_tick: f64,
}
impl ComparisonConfig {
    pub fn charts_dir(&self) -> PathBuf {
        self.output.join("comparison_eff")
    }
}
impl Default for ComparisonConfig {
    fn default() -> Self {
        let anomaly = |curve: &str| AnomalousSample {
            curve: curve.into(),
            row: 3,
        };
        Self {
            input: PathBuf::from("data/comparison/efficiency.xlsx"),
            output: PathBuf::from("data/comparison"),
            power_column: "B".into(),
            first_curve_column: "C".into(),
            sentinel: 0.1,
            anomalies: vec![anomaly("G"), anomaly("H")],
            x_tick: 0.5,
        }
    }
}
