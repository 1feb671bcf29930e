#![cfg(feature = "calamine")]

use crate::traits::{CellData, CellValue, SheetData, SpreadsheetReader};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

/// Read-only backend over `calamine`.
///
/// Values are the cached results stored in the file; formula text comes from the
/// separate formula layer.
pub struct CalamineAdapter {
    workbook: Xlsx<BufReader<File>>,
    path: PathBuf,
}

impl CalamineAdapter {
    fn convert_value(data: &Data) -> Option<CellValue> {
        match data {
            Data::Empty => None,
            // Treat empty strings as no value
            Data::String(s) if s.is_empty() => None,
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Float(f) => Some(CellValue::Number(*f)),
            Data::Int(i) => Some(CellValue::Number(*i as f64)),
            Data::Bool(b) => Some(CellValue::Boolean(*b)),
            Data::Error(e) => Some(CellValue::Error(e.to_string())),
            // Excel serial number; the template holds no dates
            Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
            Data::DateTimeIso(s) => Some(CellValue::Text(s.clone())),
            Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        }
    }

    fn range_to_cells(
        range: &Range<Data>,
        formulas: Option<&Range<String>>,
    ) -> BTreeMap<(u32, u32), CellData> {
        let mut cells = BTreeMap::new();

        let (start_row, start_col) = range.start().unwrap_or_default();
        for (row, col, val) in range.used_cells() {
            // calamine is 0-based and relative to the range start
            let excel_row = row as u32 + start_row + 1;
            let excel_col = col as u32 + start_col + 1;
            if let Some(value) = Self::convert_value(val) {
                cells.insert(
                    (excel_row, excel_col),
                    CellData {
                        value: Some(value),
                        formula: None,
                    },
                );
            }
        }

        if let Some(frm_range) = formulas {
            let (start_row, start_col) = frm_range.start().unwrap_or_default();
            for (row, col, formula) in frm_range.used_cells() {
                if formula.is_empty() {
                    continue;
                }
                let excel_row = row as u32 + start_row + 1;
                let excel_col = col as u32 + start_col + 1;
                let text = crate::traits::normalize_formula(formula.clone());
                cells
                    .entry((excel_row, excel_col))
                    .and_modify(|cell: &mut CellData| cell.formula = Some(text.clone()))
                    .or_insert_with(|| CellData {
                        value: None,
                        formula: Some(text),
                    });
            }
        }

        cells
    }
}

impl SpreadsheetReader for CalamineAdapter {
    type Error = calamine::Error;

    fn backend_name(&self) -> &'static str {
        "calamine"
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.as_ref().display(), "calamine opened workbook");
        Ok(Self {
            workbook,
            path: path.as_ref().to_path_buf(),
        })
    }

    fn source_path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.workbook.sheet_names().to_vec())
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        let range = self.workbook.worksheet_range(sheet)?;
        // Same dims as the value range; cells without a formula hold empty strings
        let formulas = self.workbook.worksheet_formula(sheet).ok();
        let cells = Self::range_to_cells(&range, formulas.as_ref());
        Ok(SheetData::from_cells(cells))
    }
}
