//! Spreadsheet export of the waveform samples

use crate::loader::csv::Waveform;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::{cmp::Ordering, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("failed to write the spreadsheet (is it open in another program?)")]
    Xlsx(#[from] XlsxError),
}
type Result<T> = std::result::Result<T, ExportError>;

pub const SORTED_SHEET: &str = "Sorted_Data";

/// Sample pairs sorted by decreasing voltage, missing voltages last
pub fn sorted_rows(waveform: &Waveform) -> Vec<(Option<f64>, Option<f64>)> {
    let mut rows: Vec<_> = waveform
        .voltage
        .iter()
        .copied()
        .zip(waveform.current.iter().copied())
        .collect();
    rows.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows
}

/// Writes the sorted samples to the `Sorted_Data` sheet of the workbook at `path`
///
/// Missing samples are left as empty cells.
pub fn export_sorted<P: AsRef<Path>>(waveform: &Waveform, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SORTED_SHEET)?;
    sheet.write_string(0, 0, "Value1")?;
    sheet.write_string(0, 1, "Value2")?;
    for (row, (voltage, current)) in (1u32..).zip(sorted_rows(waveform)) {
        if let Some(voltage) = voltage {
            sheet.write_number(row, 0, voltage)?;
        }
        if let Some(current) = current {
            sheet.write_number(row, 1, current)?;
        }
    }
    workbook.save(path)?;
    log::info!("Saved {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_missing_last() {
        let waveform = Waveform {
            voltage: vec![Some(1.), None, Some(3.), Some(-2.)],
            current: vec![Some(0.1), Some(0.2), None, Some(0.4)],
        };
        assert_eq!(
            sorted_rows(&waveform),
            vec![
                (Some(3.), None),
                (Some(1.), Some(0.1)),
                (Some(-2.), Some(0.4)),
                (None, Some(0.2)),
            ]
        );
    }

    #[test]
    fn writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sorted_values.xlsx");
        let waveform = Waveform {
            voltage: vec![Some(1.), Some(2.)],
            current: vec![Some(0.5), None],
        };
        export_sorted(&waveform, &path).unwrap();
        assert!(path.is_file());
    }
}
