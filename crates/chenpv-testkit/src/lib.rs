//! Spreadsheet fixtures for tests.
//!
//! Fixtures are written with `umya-spreadsheet` into a temporary directory that
//! lives as long as the returned [`WorkbookFixture`].

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use umya_spreadsheet::Spreadsheet;

pub const TEMPLATE_SHEET: &str = "Planilha2";

pub struct WorkbookFixture {
    dir: TempDir,
    path: PathBuf,
}

impl WorkbookFixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A sibling path inside the fixture's temporary directory.
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Build a workbook (starting from umya's default `Sheet1`) and save it to a temp file.
pub fn build_workbook(f: impl FnOnce(&mut Spreadsheet)) -> WorkbookFixture {
    build_workbook_named("fixture.xlsx", f)
}

pub fn build_workbook_named(file_name: &str, f: impl FnOnce(&mut Spreadsheet)) -> WorkbookFixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(file_name);
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write fixture workbook");
    WorkbookFixture { dir, path }
}

#[derive(Debug, Clone, Copy)]
pub enum FixtureValue {
    Number(f64),
    /// Formula text without the leading `=`.
    Formula(&'static str),
    Blank,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateRow {
    pub label: &'static str,
    pub value: FixtureValue,
    pub unit: Option<&'static str>,
}

const fn row(label: &'static str, value: FixtureValue, unit: Option<&'static str>) -> TemplateRow {
    TemplateRow { label, value, unit }
}

use FixtureValue::{Blank, Formula, Number};

/// Rows 2.. of the reference template. Row 10 is an empty separator.
pub const REFERENCE_ROWS: &[TemplateRow] = &[
    row("PAS", Number(120.0), Some("mmHg")),
    row("PAD", Number(70.0), Some("mmHg")),
    row("VDF", Number(67.35), Some("mL")),
    row("VSF", Number(34.35), Some("mL")),
    row("PET (CIV)", Number(100.0), Some("ms")),
    row("ET", Number(300.0), Some("ms")),
    row("Ees", Number(2.39), Some("mmHg/mL")),
    row("V0", Number(-8.21), Some("mL")),
    row("", Blank, None),
    row("PAt", Formula("IF(B2=\"\",\"\",0.9*B2)"), Some("mmHg")),
    row("VS", Formula("IF(OR(B4=\"\",B5=\"\"),\"\",B4-B5)"), Some("mL")),
    row("FE", Formula("IF(OR(B4=\"\",B5=\"\"),\"\",(B4-B5)/B4*100)"), Some("%")),
    row("tNd", Formula("IF(OR(B6=\"\",B7=\"\"),\"\",B6/B7)"), None),
    row(
        "Endavg",
        Formula(
            "IF(B14=\"\",\"\",0.35695-7.2266*B14+74.249*B14^2-307.39*B14^3+684.54*B14^4-856.92*B14^5+571.95*B14^6-159.1*B14^7)",
        ),
        None,
    ),
    row("Ea ", Formula("IF(OR(B11=\"\",B12=\"\"),\"\",B11/B12)"), Some(" mmHg/mL ")),
    row("VAC", Formula("IF(OR(B16=\"\",B8=\"\"),\"\",B16/B8)"), None),
    row("Ptop", Formula("IF(OR(B8=\"\",B5=\"\",B9=\"\"),\"\",B8*(B5-B9))"), Some("mmHg")),
];

/// Number of non-empty labels in [`REFERENCE_ROWS`].
pub fn reference_label_count() -> usize {
    REFERENCE_ROWS
        .iter()
        .filter(|r| !r.label.trim().is_empty())
        .count()
}

/// The reference template: a cover sheet plus `Planilha2` with a header row and
/// [`REFERENCE_ROWS`] in columns A (label), B (value) and C (unit).
pub fn reference_template() -> WorkbookFixture {
    template_with_rows(REFERENCE_ROWS)
}

pub fn template_with_rows(rows: &[TemplateRow]) -> WorkbookFixture {
    build_workbook_named("template.xlsx", |book| fill_template_sheet(book, rows))
}

/// The reference template saved as `.xlsm` with an embedded VBA project part.
pub fn macro_template() -> WorkbookFixture {
    build_workbook_named("template.xlsm", |book| {
        fill_template_sheet(book, REFERENCE_ROWS);
        book.set_macros_code(MACRO_PAYLOAD.to_vec());
    })
}

/// Bytes stored as the fixture's `vbaProject.bin`.
pub const MACRO_PAYLOAD: &[u8] = &[1, 2, 3, 4];

fn fill_template_sheet(book: &mut Spreadsheet, rows: &[TemplateRow]) {
    book.get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .set_name("Planilha1");
    let _ = book.new_sheet(TEMPLATE_SHEET);
    let sheet = book
        .get_sheet_by_name_mut(TEMPLATE_SHEET)
        .expect("template sheet");
    sheet.get_cell_mut((1, 1)).set_value("Variável");
    sheet.get_cell_mut((2, 1)).set_value("Valor");
    sheet.get_cell_mut((3, 1)).set_value("Unidade");
    for (i, r) in rows.iter().enumerate() {
        let row = i as u32 + 2;
        if !r.label.is_empty() {
            sheet.get_cell_mut((1, row)).set_value(r.label);
        }
        match r.value {
            Number(n) => {
                sheet.get_cell_mut((2, row)).set_value_number(n);
            }
            Formula(f) => {
                sheet.get_cell_mut((2, row)).set_formula(f);
            }
            Blank => {}
        }
        if let Some(unit) = r.unit {
            sheet.get_cell_mut((3, row)).set_value(unit);
        }
    }
}

/// A workbook without the template sheet.
pub fn workbook_without_template_sheet() -> WorkbookFixture {
    build_workbook(|book| {
        let _ = book.new_sheet("Resumo");
    })
}
