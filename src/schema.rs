//! Sheet layouts
//!
//! Instrument exports are addressed by position. A [SheetSchema] names every
//! column that is read and the row where data starts, and is checked against
//! the sheet's used range before a single value is read.

use regex::Regex;
use std::sync::OnceLock;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("{0:?} is not a column reference (expected letters, e.g. \"D\" or \"AB\")")]
    ColumnRef(String),
    #[error("first data row must be at least 1, found {0}")]
    FirstRow(u32),
    #[error("field {field:?} is mapped to column {column} but the sheet only spans columns up to {last}")]
    OutOfRange {
        field: String,
        column: String,
        last: String,
    },
    #[error("the sheet is empty")]
    EmptySheet,
}
type Result<T> = std::result::Result<T, SchemaError>;

fn column_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([A-Za-z]{1,3})\s*$").expect("valid column regex"))
}

/// Converts a column reference ("A", "L", "AB") to a 0-based index
pub fn column_index(column: &str) -> Result<u32> {
    let letters = column_regex()
        .captures(column)
        .and_then(|c| c.get(1))
        .ok_or_else(|| SchemaError::ColumnRef(column.to_string()))?;
    Ok(letters
        .as_str()
        .to_ascii_uppercase()
        .bytes()
        .fold(0u32, |acc, b| acc * 26 + (b - b'A' + 1) as u32)
        - 1)
}

/// Converts a 0-based column index to its letters
pub fn column_letters(index: u32) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let r = (n - 1) % 26;
        letters.push((b'A' + r as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A named field and the column it is read from
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub column: String,
}

/// Layout of a worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSchema {
    /// 1-based row number of the first data row, as shown in the spreadsheet
    pub first_row: u32,
    /// field used as the time axis, if any
    pub time_field: Option<String>,
    pub fields: Vec<Field>,
}
impl SheetSchema {
    pub fn new(first_row: u32) -> Self {
        Self {
            first_row,
            time_field: None,
            fields: Vec::new(),
        }
    }
    /// Adds a field
    pub fn field<S: Into<String>, C: Into<String>>(mut self, name: S, column: C) -> Self {
        self.fields.push(Field {
            name: name.into(),
            column: column.into(),
        });
        self
    }
    /// Adds the time field, non-numeric time cells drop the row
    pub fn time<S: Into<String>, C: Into<String>>(self, name: S, column: C) -> Self {
        let name: String = name.into();
        let mut this = self.field(name.clone(), column);
        this.time_field = Some(name);
        this
    }
    /// Maps consecutive columns, starting at column A, to `names`
    pub fn positional<S: Into<String>>(first_row: u32, names: impl IntoIterator<Item = S>) -> Self {
        names
            .into_iter()
            .enumerate()
            .fold(Self::new(first_row), |schema, (i, name)| {
                schema.field(name, column_letters(i as u32))
            })
    }
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
    /// Checks the layout against the last used (0-based) column of a sheet
    ///
    /// Returns the 0-based first row and the 0-based column of every field.
    pub fn resolve(&self, last_column: Option<u32>) -> Result<ResolvedSchema> {
        if self.first_row < 1 {
            return Err(SchemaError::FirstRow(self.first_row));
        }
        let last_column = last_column.ok_or(SchemaError::EmptySheet)?;
        let columns = self
            .fields
            .iter()
            .map(|field| {
                let index = column_index(&field.column)?;
                if index > last_column {
                    Err(SchemaError::OutOfRange {
                        field: field.name.clone(),
                        column: field.column.clone(),
                        last: column_letters(last_column),
                    })
                } else {
                    Ok(index)
                }
            })
            .collect::<Result<Vec<u32>>>()?;
        Ok(ResolvedSchema {
            first_row: self.first_row - 1,
            columns,
        })
    }
}

/// A [SheetSchema] checked against a sheet, with 0-based positions
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub first_row: u32,
    pub columns: Vec<u32>,
}
