//! Power-quality analyzer CSV exports

use super::{ensure_exists, parse_number, parse_seconds, LoaderError, Result};
use crate::table::MeasurementTable;
use ::csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// Loads the named columns of a CSV file with a header row
///
/// Values of `time_field` may be given in seconds or as `hh:mm:ss`.
/// Rows with a missing or non-numeric value in any of the fields are dropped.
pub fn load_headed<P: AsRef<Path>>(
    path: P,
    fields: &[String],
    time_field: Option<&str>,
) -> Result<MeasurementTable> {
    let path = path.as_ref();
    ensure_exists(path)?;
    log::info!("Loading {:?}...", path);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let indices = fields
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| h == field)
                .ok_or_else(|| LoaderError::MissingColumn(field.clone()))
        })
        .collect::<Result<Vec<usize>>>()?;
    let is_time: Vec<bool> = fields.iter().map(|f| Some(f.as_str()) == time_field).collect();

    let mut table = MeasurementTable::new(fields.iter().cloned());
    let mut dropped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let values: Vec<Option<f64>> = indices
            .iter()
            .zip(&is_time)
            .map(|(&i, &time)| {
                record
                    .get(i)
                    .and_then(|x| if time { parse_seconds(x) } else { parse_number(x) })
            })
            .collect();
        if !table.push_complete(&values)? {
            dropped += 1;
        }
    }
    log::debug!(
        "{:?}: {} rows kept, {} incomplete rows dropped",
        path,
        table.len(),
        dropped
    );
    Ok(table)
}

/// Voltage and current samples of a waveform capture
///
/// Non-numeric cells are kept as missing samples, no row is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waveform {
    /// first column (Value1) [V]
    pub voltage: Vec<Option<f64>>,
    /// second column (Value2) [A]
    pub current: Vec<Option<f64>>,
}
impl Waveform {
    pub fn len(&self) -> usize {
        self.voltage.len()
    }
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
    fn push(&mut self, record: &StringRecord) {
        let value = |i: usize| record.get(i).and_then(parse_number);
        self.voltage.push(value(0));
        self.current.push(value(1));
    }
}

/// Loads a two-column CSV file without header
pub fn load_waveform<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    let path = path.as_ref();
    ensure_exists(path)?;
    log::info!("Loading {:?}...", path);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let mut waveform = Waveform::default();
    for result in rdr.records() {
        waveform.push(&result?);
    }
    log::info!("{:?}: {} samples", path, waveform.len());
    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn headed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hioki.csv");
        fs::write(
            &path,
            "Time,AveP1,AveS1,Comment\n0,10,12,a\n1,,12,b\n00:00:02,11,13,c\n3,x,14,d\n",
        )
        .unwrap();
        let fields: Vec<String> = ["Time", "AveP1", "AveS1"].map(String::from).to_vec();
        let table = load_headed(&path, &fields, Some("Time")).unwrap();
        assert_eq!(table.column("Time").unwrap(), &[0., 2.]);
        assert_eq!(table.column("AveP1").unwrap(), &[10., 11.]);
    }

    #[test]
    fn headed_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hioki.csv");
        fs::write(&path, "Time,AveP1\n0,10\n").unwrap();
        let fields = vec!["Time".to_string(), "AveS1".to_string()];
        assert!(matches!(
            load_headed(&path, &fields, None),
            Err(LoaderError::MissingColumn(c)) if c == "AveS1"
        ));
    }

    #[test]
    fn waveform_keeps_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.csv");
        fs::write(&path, "1.5,0.2\n-3,oops\n,4\n").unwrap();
        let waveform = load_waveform(&path).unwrap();
        assert_eq!(waveform.voltage, vec![Some(1.5), Some(-3.), None]);
        assert_eq!(waveform.current, vec![Some(0.2), None, Some(4.)]);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_waveform("no/such/file.csv"),
            Err(LoaderError::NotFound(_))
        ));
    }
}
