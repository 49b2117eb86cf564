//! Input fixtures written the way the bench tools export them

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::{fs, path::Path};

pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// A worksheet: name and `(row, column, cell)` entries, 0-based
pub struct Sheet<'a> {
    pub name: &'a str,
    pub cells: Vec<(u32, u16, Cell<'a>)>,
}
impl<'a> Sheet<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            cells: vec![],
        }
    }
    pub fn text(mut self, row: u32, column: u16, text: &'a str) -> Self {
        self.cells.push((row, column, Cell::Text(text)));
        self
    }
    /// Writes `rows` from `first_row` on, one value per column of `columns`
    pub fn rows(mut self, first_row: u32, columns: &[u16], rows: &[Vec<f64>]) -> Self {
        for (k, row) in rows.iter().enumerate() {
            for (&column, &value) in columns.iter().zip(row) {
                self.cells
                    .push((first_row + k as u32, column, Cell::Number(value)));
            }
        }
        self
    }
}

pub fn write_workbook(path: &Path, sheets: &[Sheet]) {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();
        for (row, column, cell) in &sheet.cells {
            match cell {
                Cell::Text(text) => worksheet.write_string(*row, *column, *text).unwrap(),
                Cell::Number(value) => worksheet.write_number(*row, *column, *value).unwrap(),
            };
        }
    }
    workbook.save(path).unwrap();
}

/// OBD logger layout: title block, data from row 15
pub fn obd_sheet<'a>(columns: &[u16], rows: &[Vec<f64>]) -> Sheet<'a> {
    Sheet::new("Sheet1")
        .text(0, 0, "OBD logger export")
        .text(13, 3, "Time [s]")
        .rows(14, columns, rows)
}

/// ETAS layout: two title rows and a header row, data from row 4
pub fn etas_sheet<'a>(name: &'a str, columns: usize, rows: &[Vec<f64>]) -> Sheet<'a> {
    let columns: Vec<u16> = (0..columns as u16).collect();
    Sheet::new(name)
        .text(0, 0, "ETAS measurement")
        .text(1, 0, name)
        .text(2, 0, "Time")
        .rows(3, &columns, rows)
}

pub fn write_text(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}
