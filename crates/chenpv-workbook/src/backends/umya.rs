#![cfg(feature = "umya")]

use crate::traits::{CellData, CellValue, SheetData, SpreadsheetReader, SpreadsheetWriter};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{CellRawValue, Spreadsheet, XlsxError, reader::xlsx};

/// Read/write backend over `umya-spreadsheet`.
///
/// The whole document is held in memory; writes stay there until [`save_as`]
/// produces a new file, so the source path is never written to.
///
/// [`save_as`]: SpreadsheetWriter::save_as
pub struct UmyaAdapter {
    workbook: RwLock<Spreadsheet>,
    original_path: Option<PathBuf>,
}

impl UmyaAdapter {
    fn convert_cell_value(cv: &umya_spreadsheet::CellValue) -> Option<CellValue> {
        match cv.get_raw_value() {
            CellRawValue::Empty => None,
            CellRawValue::Numeric(n) => Some(CellValue::Number(*n)),
            CellRawValue::Bool(b) => Some(CellValue::Boolean(*b)),
            CellRawValue::String(s) => Some(CellValue::Text(s.to_string())),
            CellRawValue::RichText(rt) => Some(CellValue::Text(rt.get_text().to_string())),
            CellRawValue::Lazy(s) => {
                let txt = s.as_ref();
                if let Ok(n) = txt.parse::<f64>() {
                    Some(CellValue::Number(n))
                } else if txt.eq_ignore_ascii_case("TRUE") {
                    Some(CellValue::Boolean(true))
                } else if txt.eq_ignore_ascii_case("FALSE") {
                    Some(CellValue::Boolean(false))
                } else {
                    Some(CellValue::Text(txt.to_string()))
                }
            }
            CellRawValue::Error(_) => Some(CellValue::Error(cv.get_value().to_string())),
        }
    }

    fn deserialize_all(wb: &mut Spreadsheet) {
        let count = wb.get_sheet_count();
        for i in 0..count {
            wb.read_sheet(i);
        }
    }
}

impl SpreadsheetReader for UmyaAdapter {
    type Error = XlsxError;

    fn backend_name(&self) -> &'static str {
        "umya"
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        // Full read (not lazy) so that saving a copy sees every sheet.
        let book = xlsx::read(path.as_ref())?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.as_ref().display(), "umya opened workbook");
        Ok(Self {
            workbook: RwLock::new(book),
            original_path: Some(path.as_ref().to_path_buf()),
        })
    }

    fn source_path(&self) -> Option<&Path> {
        self.original_path.as_deref()
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        // Write lock: sheets deserialize on first touch.
        let mut wb = self.workbook.write();
        let count = wb.get_sheet_count();
        let mut names = Vec::with_capacity(count);
        for i in 0..count {
            wb.read_sheet(i);
            if let Some(s) = wb.get_sheet(&i) {
                names.push(s.get_name().to_string());
            }
        }
        Ok(names)
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        let mut wb = self.workbook.write();
        wb.read_sheet_by_name(sheet);
        let ws = wb
            .get_sheet_by_name(sheet)
            .ok_or_else(|| XlsxError::CellError(format!("sheet `{sheet}` not found")))?;

        let mut cells: BTreeMap<(u32, u32), CellData> = BTreeMap::new();
        for cell in ws.get_cell_collection() {
            let coord = cell.get_coordinate();
            let col = *coord.get_col_num();
            let row = *coord.get_row_num();
            let cv = cell.get_cell_value();
            let formula = if cv.is_formula() {
                let f = cv.get_formula();
                (!f.is_empty()).then(|| crate::traits::normalize_formula(f.to_string()))
            } else {
                None
            };
            let value = Self::convert_cell_value(cv);
            if value.is_none() && formula.is_none() {
                continue;
            }
            cells.insert((row, col), CellData { value, formula });
        }
        Ok(SheetData::from_cells(cells))
    }
}

impl SpreadsheetWriter for UmyaAdapter {
    type Error = XlsxError;

    fn write_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
        data: CellData,
    ) -> Result<(), Self::Error> {
        let mut wb = self.workbook.write();
        wb.read_sheet_by_name(sheet);
        let ws = wb
            .get_sheet_by_name_mut(sheet)
            .ok_or_else(|| XlsxError::CellError(format!("sheet `{sheet}` not found")))?;
        // umya addresses cells as (col, row)
        let cell = ws.get_cell_mut((col, row));
        match data.value {
            Some(CellValue::Number(n)) => {
                cell.set_value_number(n);
            }
            Some(CellValue::Boolean(b)) => {
                cell.set_value_bool(b);
            }
            Some(CellValue::Text(s)) | Some(CellValue::Error(s)) => {
                cell.set_value(s);
            }
            None => {
                cell.set_blank();
            }
        }
        if let Some(f) = data.formula {
            // umya stores formulas without the leading '='
            cell.set_formula(f.strip_prefix('=').unwrap_or(&f));
        }
        Ok(())
    }

    fn has_macros(&self) -> bool {
        self.workbook.read().get_macros_code().is_some()
    }

    fn save_as(&mut self, path: &Path) -> Result<(), Self::Error> {
        let mut wb = self.workbook.write();
        Self::deserialize_all(&mut wb);
        umya_spreadsheet::writer::xlsx::write(&*wb, path)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "umya saved workbook copy");
        Ok(())
    }
}
