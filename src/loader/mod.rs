//! Instrument export loaders
//!
//! - [workbook]: OBD logger and ETAS workbooks (`.xlsx`/`.xls`)
//! - [csv]: power-quality analyzer exports

use crate::{schema::SchemaError, table::TableError};
use std::path::PathBuf;

pub mod csv;
pub mod workbook;

#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    #[error("input file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("failed to open workbook {path:?}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook {0:?} has no worksheet")]
    NoSheet(PathBuf),
    #[error("sheet {sheet:?} layout doesn't match")]
    Schema {
        sheet: String,
        #[source]
        source: SchemaError,
    },
    #[error("column {0:?} is missing from the CSV header")]
    MissingColumn(String),
    #[error("failed to read the CSV file")]
    Csv(#[from] ::csv::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}
type Result<T> = std::result::Result<T, LoaderError>;

/// Parses a text cell as a number, `None` when it isn't one
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Parses a time cell given in seconds or as `[hh:]mm:ss[.s]`
pub fn parse_seconds(text: &str) -> Option<f64> {
    if let Some(seconds) = parse_number(text) {
        return Some(seconds);
    }
    let parts: Vec<&str> = text.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    parts
        .iter()
        .try_fold(0f64, |acc, part| parse_number(part).map(|x| acc * 60. + x))
}

fn ensure_exists(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(LoaderError::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number(" 1.5 "), Some(1.5));
        assert_eq!(parse_number("-2e3"), Some(-2000.));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn seconds() {
        assert_eq!(parse_seconds("12.5"), Some(12.5));
        assert_eq!(parse_seconds("01:02"), Some(62.));
        assert_eq!(parse_seconds("01:00:01.5"), Some(3601.5));
        assert_eq!(parse_seconds("2024/10/31"), None);
        assert_eq!(parse_seconds("1:2:3:4"), None);
    }
}
