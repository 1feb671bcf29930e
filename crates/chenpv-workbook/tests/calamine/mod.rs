// Integration tests for the calamine backend; run with `--features calamine`.
use chenpv_testkit::{TEMPLATE_SHEET, reference_template};
use chenpv_workbook::{CalamineAdapter, CellValue, SpreadsheetReader};

#[test]
fn calamine_lists_sheets() {
    let fixture = reference_template();
    let adapter = CalamineAdapter::open_path(fixture.path()).unwrap();
    let names = adapter.sheet_names().unwrap();
    assert!(names.iter().any(|n| n == TEMPLATE_SHEET), "sheets: {names:?}");
}

#[test]
fn calamine_reads_labels_values_and_formulas() {
    let fixture = reference_template();
    let mut adapter = CalamineAdapter::open_path(fixture.path()).unwrap();
    let sheet = adapter.read_sheet(TEMPLATE_SHEET).unwrap();

    assert_eq!(
        sheet.cell(6, 1).and_then(|c| c.value.clone()),
        Some(CellValue::Text("PET (CIV)".into()))
    );
    assert_eq!(
        sheet.cell(9, 2).and_then(|c| c.value.as_ref()?.as_number()),
        Some(-8.21)
    );
    let formula = sheet.cell(11, 2).and_then(|c| c.formula_text());
    assert_eq!(formula, Some("=IF(B2=\"\",\"\",0.9*B2)"));
    assert!(sheet.cell(10, 1).is_none());
}

#[test]
fn calamine_missing_sheet_is_an_error() {
    let fixture = reference_template();
    let mut adapter = CalamineAdapter::open_path(fixture.path()).unwrap();
    assert!(adapter.read_sheet("Nope").is_err());
}
