//! Measurement tables
//!
//! A [MeasurementTable] is the materialized content of one sheet or file:
//! an ordered sequence of rows with a fixed set of named numeric fields.
//! Every retained row is complete, rows with a missing field never make it in.

use crate::stats::{Summary, TimeWindow};

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("field {0:?} is not in the table")]
    MissingField(String),
    #[error("row has {found} values, table has {expected} fields")]
    RowWidth { expected: usize, found: usize },
    #[error("field {0:?} has no samples")]
    Empty(String),
}
type Result<T> = std::result::Result<T, TableError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    fields: Vec<String>,
    columns: Vec<Vec<f64>>,
}
impl MeasurementTable {
    /// Creates an empty table with the given field names
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        let fields: Vec<String> = fields.into_iter().map(|f| f.into()).collect();
        let columns = vec![Vec::new(); fields.len()];
        Self { fields, columns }
    }
    /// Appends a complete row
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.fields.len() {
            return Err(TableError::RowWidth {
                expected: self.fields.len(),
                found: row.len(),
            });
        }
        self.columns
            .iter_mut()
            .zip(row)
            .for_each(|(column, &value)| column.push(value));
        Ok(())
    }
    /// Appends a row if every value is present, returns whether it was kept
    pub fn push_complete(&mut self, row: &[Option<f64>]) -> Result<bool> {
        match row.iter().copied().collect::<Option<Vec<f64>>>() {
            Some(values) => self.push_row(&values).map(|_| true),
            None => Ok(false),
        }
    }
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the values of a field
    pub fn column(&self, field: &str) -> Result<&[f64]> {
        self.fields
            .iter()
            .position(|f| f == field)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| TableError::MissingField(field.to_string()))
    }
    /// Returns the rows whose `time_field` value falls inside `window`
    pub fn within(&self, time_field: &str, window: TimeWindow) -> Result<Self> {
        let time = self.column(time_field)?;
        let keep: Vec<bool> = time.iter().map(|&t| window.contains(t)).collect();
        let columns = self
            .columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .zip(&keep)
                    .filter(|(_, k)| **k)
                    .map(|(&v, _)| v)
                    .collect()
            })
            .collect();
        Ok(Self {
            fields: self.fields.clone(),
            columns,
        })
    }
    /// Mean, min and max of a field
    pub fn summary(&self, field: &str) -> Result<Summary> {
        Summary::from_values(self.column(field)?)
            .ok_or_else(|| TableError::Empty(field.to_string()))
    }
}

/// A curve sampled at the abscissas of a [CurveTable], with missing samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub name: String,
    pub values: Vec<Option<f64>>,
}
impl Curve {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// Curves sharing one abscissa
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveTable {
    pub x_name: String,
    pub x: Vec<f64>,
    pub curves: Vec<Curve>,
}
impl CurveTable {
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
    /// Multiplies every curve sample by `factor`
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.curves
            .iter_mut()
            .flat_map(|c| c.values.iter_mut().flatten())
            .for_each(|v| *v *= factor);
        self
    }
    /// Makes sure `x` contains `sentinel`
    ///
    /// Only the 0.1 kW calibration point of the efficiency comparison uses
    /// this: when absent, a row is prepended at `sentinel` with every curve
    /// sample missing. Returns whether the row was inserted.
    pub fn ensure_sentinel(&mut self, sentinel: f64) -> bool {
        if self.x.iter().any(|&x| x == sentinel) {
            return false;
        }
        self.x.insert(0, sentinel);
        self.curves
            .iter_mut()
            .for_each(|c| c.values.insert(0, None));
        true
    }
}
