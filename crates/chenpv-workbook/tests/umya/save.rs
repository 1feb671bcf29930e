use chenpv_testkit::{MACRO_PAYLOAD, TEMPLATE_SHEET, macro_template, reference_template};
use chenpv_workbook::{CellData, SpreadsheetReader, SpreadsheetWriter, UmyaAdapter};

#[test]
fn umya_save_as_writes_copy_and_leaves_source_alone() {
    let fixture = reference_template();
    let before = std::fs::read(fixture.path()).unwrap();
    let out = fixture.sibling("filled.xlsx");

    let mut adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    adapter
        .write_cell(TEMPLATE_SHEET, 2, 2, CellData::from_value(130.0))
        .unwrap();
    adapter.save_as(&out).unwrap();

    assert_eq!(std::fs::read(fixture.path()).unwrap(), before);

    let mut reopened = UmyaAdapter::open_path(&out).unwrap();
    let sheet = reopened.read_sheet(TEMPLATE_SHEET).unwrap();
    assert_eq!(
        sheet.cell(2, 2).and_then(|c| c.value.as_ref()?.as_number()),
        Some(130.0)
    );
    // untouched neighbours survive the copy
    assert_eq!(
        sheet.cell(3, 2).and_then(|c| c.value.as_ref()?.as_number()),
        Some(70.0)
    );
    assert_eq!(
        sheet.cell(12, 2).and_then(|c| c.formula_text()),
        Some("=IF(OR(B4=\"\",B5=\"\"),\"\",B4-B5)")
    );
    assert_eq!(reopened.sheet_names().unwrap().len(), 2);
}

#[test]
fn umya_write_formula_round_trips() {
    let fixture = reference_template();
    let out = fixture.sibling("formula.xlsx");

    let mut adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    adapter
        .write_cell(TEMPLATE_SHEET, 20, 2, CellData::from_formula("=B2+B3"))
        .unwrap();
    adapter.save_as(&out).unwrap();

    let mut reopened = UmyaAdapter::open_path(&out).unwrap();
    let cell = reopened.read_cell(TEMPLATE_SHEET, 20, 2).unwrap().unwrap();
    assert_eq!(cell.formula.as_deref(), Some("=B2+B3"));
}

#[test]
fn umya_plain_xlsx_has_no_macros() {
    let fixture = reference_template();
    let adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    assert!(!adapter.has_macros());
}

#[test]
fn umya_save_as_keeps_embedded_macros() {
    let fixture = macro_template();
    let out = fixture.sibling("filled.xlsm");

    let mut adapter = UmyaAdapter::open_path(fixture.path()).unwrap();
    assert!(adapter.has_macros());
    adapter
        .write_cell(TEMPLATE_SHEET, 2, 2, CellData::from_value(130.0))
        .unwrap();
    adapter.save_as(&out).unwrap();

    let reopened = UmyaAdapter::open_path(&out).unwrap();
    assert!(reopened.has_macros());
    let book = umya_spreadsheet::reader::xlsx::read(&out).unwrap();
    assert_eq!(
        book.get_macros_code().map(|code| code.to_vec()),
        Some(MACRO_PAYLOAD.to_vec())
    );
}
