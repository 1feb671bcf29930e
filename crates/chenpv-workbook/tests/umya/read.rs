use chenpv_testkit::{TEMPLATE_SHEET, build_workbook, reference_template};
use chenpv_workbook::{CellValue, SpreadsheetReader, UmyaAdapter};

#[test]
fn umya_lists_sheets_in_workbook_order() {
    let fixture = reference_template();
    let adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    assert_eq!(
        adapter.sheet_names().unwrap(),
        vec!["Planilha1".to_string(), TEMPLATE_SHEET.to_string()]
    );
    assert_eq!(adapter.source_path(), Some(fixture.path()));
}

#[test]
fn umya_reads_literals_and_formula_text() {
    let fixture = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut((1, 1)).set_value("PAS"); // A1
        sh.get_cell_mut((2, 1)).set_value_number(120); // B1
        sh.get_cell_mut((2, 2)).set_formula("B1*0.9"); // B2
    });

    let mut adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    let sheet = adapter.read_sheet("Sheet1").unwrap();

    assert_eq!(
        sheet.cell(1, 1).and_then(|c| c.value.clone()),
        Some(CellValue::Text("PAS".into()))
    );
    assert_eq!(
        sheet.cell(1, 2).and_then(|c| c.value.as_ref()?.as_number()),
        Some(120.0)
    );
    assert_eq!(
        sheet.cell(2, 2).and_then(|c| c.formula_text()),
        Some("=B1*0.9")
    );
    assert_eq!(sheet.last_row(), 2);
}

#[test]
fn umya_read_cell_defaults_to_sheet_scan() {
    let fixture = reference_template();
    let mut adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    let b4 = adapter.read_cell(TEMPLATE_SHEET, 4, 2).unwrap().unwrap();
    assert_eq!(b4.value.and_then(|v| v.as_number()), Some(67.35));
    assert!(adapter.read_cell(TEMPLATE_SHEET, 10, 1).unwrap().is_none());
}

#[test]
fn umya_missing_sheet_is_an_error() {
    let fixture = build_workbook(|_| {});
    let mut adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    assert!(adapter.read_sheet("Planilha2").is_err());
}

#[test]
fn umya_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(UmyaAdapter::open_path(dir.path().join("absent.xlsx")).is_err());
}
