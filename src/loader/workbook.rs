//! Excel workbooks

use super::{ensure_exists, parse_number, parse_seconds, LoaderError, Result};
use crate::{
    schema::{column_index, SchemaError, SheetSchema},
    table::{Curve, CurveTable, MeasurementTable},
};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Numeric value of a cell
pub fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(x) if x.is_finite() => Some(*x),
        Data::Int(x) => Some(*x as f64),
        Data::String(s) => parse_number(s),
        _ => None,
    }
}
/// Time value of a cell in seconds
pub fn cell_seconds(cell: &Data) -> Option<f64> {
    match cell {
        Data::String(s) => parse_seconds(s),
        cell => cell_number(cell),
    }
}

/// An open workbook
///
/// The file handle is released when the workbook is dropped.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}
impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        ensure_exists(path)?;
        log::info!("Loading {:?}...", path);
        let sheets = open_workbook_auto(path).map_err(|source| LoaderError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }
    /// Returns the cells of the worksheet `name`
    pub fn sheet(&mut self, name: &str) -> Result<Range<Data>> {
        self.sheets
            .worksheet_range(name)
            .map_err(|source| LoaderError::Workbook {
                path: self.path.clone(),
                source,
            })
    }
    /// Returns the name and the cells of the first worksheet
    pub fn first_sheet(&mut self) -> Result<(String, Range<Data>)> {
        let name = self
            .sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| LoaderError::NoSheet(self.path.clone()))?;
        let range = self.sheet(&name)?;
        Ok((name, range))
    }
}

/// Reads the fields of `schema` from a worksheet
///
/// Rows with a missing or non-numeric value in any field are dropped.
pub fn read_table(range: &Range<Data>, sheet: &str, schema: &SheetSchema) -> Result<MeasurementTable> {
    let schema_error = |source: SchemaError| LoaderError::Schema {
        sheet: sheet.to_string(),
        source,
    };
    let resolved = schema
        .resolve(range.end().map(|(_, column)| column))
        .map_err(schema_error)?;
    let mut table = MeasurementTable::new(schema.names());
    let Some((last_row, _)) = range.end() else {
        return Ok(table);
    };
    let is_time: Vec<bool> = schema
        .fields
        .iter()
        .map(|f| schema.time_field.as_deref() == Some(f.name.as_str()))
        .collect();
    let mut dropped = 0usize;
    for row in resolved.first_row..=last_row {
        let values: Vec<Option<f64>> = resolved
            .columns
            .iter()
            .zip(&is_time)
            .map(|(&column, &time)| {
                range.get_value((row, column)).and_then(|cell| {
                    if time {
                        cell_seconds(cell)
                    } else {
                        cell_number(cell)
                    }
                })
            })
            .collect();
        if !table.push_complete(&values)? {
            dropped += 1;
        }
    }
    log::debug!(
        "{}: {} rows kept, {} incomplete rows dropped",
        sheet,
        table.len(),
        dropped
    );
    Ok(table)
}

/// Reads a table of curves sharing one abscissa
///
/// The first row holds the names, `x_column` the abscissa and every column
/// from `first_curve_column` to the last used one a curve.
/// Rows without an abscissa are dropped, missing curve values are kept as `None`.
pub fn read_curves(
    range: &Range<Data>,
    sheet: &str,
    x_column: &str,
    first_curve_column: &str,
) -> Result<CurveTable> {
    let schema_error = |source: SchemaError| LoaderError::Schema {
        sheet: sheet.to_string(),
        source,
    };
    let (last_row, last_column) = range
        .end()
        .ok_or_else(|| schema_error(SchemaError::EmptySheet))?;
    let x_index = column_index(x_column).map_err(schema_error)?;
    let first_curve = column_index(first_curve_column).map_err(schema_error)?;
    if first_curve > last_column {
        return Err(schema_error(SchemaError::OutOfRange {
            field: "curves".into(),
            column: first_curve_column.into(),
            last: crate::schema::column_letters(last_column),
        }));
    }
    let header = |column: u32| -> String {
        match range.get_value((0, column)) {
            Some(Data::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(cell) if cell_number(cell).is_some() => cell.to_string(),
            _ => crate::schema::column_letters(column),
        }
    };
    let mut table = CurveTable {
        x_name: header(x_index),
        x: Vec::new(),
        curves: (first_curve..=last_column)
            .map(|column| Curve::new(header(column)))
            .collect(),
    };
    for row in 1..=last_row {
        let Some(x) = range.get_value((row, x_index)).and_then(cell_number) else {
            continue;
        };
        table.x.push(x);
        for (curve, column) in table.curves.iter_mut().zip(first_curve..=last_column) {
            curve
                .values
                .push(range.get_value((row, column)).and_then(cell_number));
        }
    }
    Ok(table)
}
