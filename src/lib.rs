//! # V2L test bench charts
//!
//! Statistics and charts of the vehicle-to-load bench exports: OBD logger and
//! ETAS workbooks, and power-quality analyzer CSV files.
//!
//! Each analysis is a [pipeline](pipelines) run by its own binary:
//! the [loader] materializes a [MeasurementTable] (or a [CurveTable]),
//! the analysis derives [Summary] statistics, efficiencies or the
//! [PowerFactor], and [plot] renders the charts to PNG.

pub mod batch;
pub mod config;
pub mod efficiency;
pub mod error;
pub mod export;
pub mod loader;
pub mod phasor;
pub mod pipelines;
pub mod plot;
pub mod schema;
pub mod stats;
pub mod table;

pub use batch::BatchReport;
pub use efficiency::{corrected_efficiency, raw_efficiency, EfficiencyCurve, TestRecord};
pub use error::{Error, Result};
pub use phasor::{PhasorSummary, PowerFactor};
pub use schema::SheetSchema;
pub use stats::{Summary, TimeWindow};
pub use table::{CurveTable, MeasurementTable};
