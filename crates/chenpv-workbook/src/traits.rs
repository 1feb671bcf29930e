use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A literal cell value as stored in the document.
///
/// For formula cells this is the cached result last saved by the authoring tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Error token such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Numeric reading of the value, under "use cached results" semantics.
    ///
    /// Numeric text is parsed, booleans count as `1`/`0`, blank text and errors are absent.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Error(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => f.write_str(e),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellData {
    pub value: Option<CellValue>,
    /// Formula text, always with its leading `=`.
    pub formula: Option<String>,
}

impl CellData {
    pub fn from_value<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: Some(value.into()),
            formula: None,
        }
    }

    pub fn from_formula(formula: impl Into<String>) -> Self {
        Self {
            value: None,
            formula: Some(normalize_formula(formula.into())),
        }
    }

    /// Formula text, or literal text that starts with `=`.
    pub fn formula_text(&self) -> Option<&str> {
        if let Some(f) = self.formula.as_deref() {
            return Some(f);
        }
        match &self.value {
            Some(CellValue::Text(s)) if s.starts_with('=') => Some(s.as_str()),
            _ => None,
        }
    }

    /// Display text of the literal value, trimmed; `None` when blank.
    pub fn text(&self) -> Option<String> {
        let value = self.value.as_ref()?;
        let text = value.to_string();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

pub(crate) fn normalize_formula(formula: String) -> String {
    if formula.starts_with('=') {
        formula
    } else {
        format!("={formula}")
    }
}

/// Cells of one worksheet keyed by 1-based `(row, col)`.
#[derive(Clone, Debug, Default)]
pub struct SheetData {
    pub cells: BTreeMap<(u32, u32), CellData>,
    /// `(last_row, last_col)` of the used area.
    pub dimensions: Option<(u32, u32)>,
}

impl SheetData {
    pub fn from_cells(cells: BTreeMap<(u32, u32), CellData>) -> Self {
        let dims = cells.keys().fold((0u32, 0u32), |acc, (r, c)| {
            (acc.0.max(*r), acc.1.max(*c))
        });
        Self {
            cells,
            dimensions: Some(dims),
        }
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    pub fn last_row(&self) -> u32 {
        self.dimensions.map(|(r, _)| r).unwrap_or(0)
    }
}

pub trait SpreadsheetReader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short backend name used in diagnostics.
    fn backend_name(&self) -> &'static str;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Path the document was opened from, if any.
    fn source_path(&self) -> Option<&Path>;

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error>;

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error>;

    fn read_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
    ) -> Result<Option<CellData>, Self::Error> {
        let mut data = self.read_sheet(sheet)?;
        Ok(data.cells.remove(&(row, col)))
    }
}

pub trait SpreadsheetWriter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Overwrite a cell in memory. Nothing touches disk before [`save_as`](Self::save_as).
    fn write_cell(&mut self, sheet: &str, row: u32, col: u32, data: CellData)
    -> Result<(), Self::Error>;

    /// Whether the document carries embedded macro content that a save keeps.
    fn has_macros(&self) -> bool;

    /// Write a full copy of the document to `path`.
    fn save_as(&mut self, path: &Path) -> Result<(), Self::Error>;
}
