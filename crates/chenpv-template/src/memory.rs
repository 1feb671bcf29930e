//! In-memory document used by unit tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chenpv_workbook::{CellData, SheetData, SpreadsheetReader, SpreadsheetWriter};

type Cells = BTreeMap<(u32, u32), CellData>;

#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    sheets: Vec<(String, Cells)>,
    pub source: Option<PathBuf>,
    pub macros: bool,
    pub saved: Vec<(PathBuf, Vec<(String, Cells)>)>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: &str) {
        if !self.sheets.iter().any(|(n, _)| n == name) {
            self.sheets.push((name.to_string(), Cells::new()));
        }
    }

    fn sheet_mut(&mut self, name: &str) -> &mut Cells {
        self.add_sheet(name);
        let idx = self
            .sheets
            .iter()
            .position(|(n, _)| n == name)
            .unwrap_or_default();
        &mut self.sheets[idx].1
    }

    pub fn set(&mut self, sheet: &str, row: u32, col: u32, data: CellData) {
        self.sheet_mut(sheet).insert((row, col), data);
    }

    pub fn set_row(
        &mut self,
        sheet: &str,
        row: u32,
        label: &str,
        value: CellData,
        unit: Option<&str>,
    ) {
        self.set(sheet, row, 1, CellData::from_value(label));
        self.set(sheet, row, 2, value);
        if let Some(unit) = unit {
            self.set(sheet, row, 3, CellData::from_value(unit));
        }
    }

    pub fn cell(&self, sheet: &str, row: u32, col: u32) -> Option<&CellData> {
        self.sheets
            .iter()
            .find(|(n, _)| n == sheet)
            .and_then(|(_, cells)| cells.get(&(row, col)))
    }
}

fn not_found(sheet: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("sheet `{sheet}` not found"),
    )
}

impl SpreadsheetReader for MemoryDocument {
    type Error = std::io::Error;

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("memory documents cannot open {}", path.as_ref().display()),
        ))
    }

    fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.sheets.iter().map(|(n, _)| n.clone()).collect())
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        self.sheets
            .iter()
            .find(|(n, _)| n == sheet)
            .map(|(_, cells)| SheetData::from_cells(cells.clone()))
            .ok_or_else(|| not_found(sheet))
    }
}

impl SpreadsheetWriter for MemoryDocument {
    type Error = std::io::Error;

    fn write_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
        data: CellData,
    ) -> Result<(), Self::Error> {
        if !self.sheets.iter().any(|(n, _)| n == sheet) {
            return Err(not_found(sheet));
        }
        self.set(sheet, row, col, data);
        Ok(())
    }

    fn has_macros(&self) -> bool {
        self.macros
    }

    fn save_as(&mut self, path: &Path) -> Result<(), Self::Error> {
        self.saved.push((path.to_path_buf(), self.sheets.clone()));
        Ok(())
    }
}
