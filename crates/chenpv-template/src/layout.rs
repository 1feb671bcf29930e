use chenpv_workbook::cell_address;
use serde::{Deserialize, Serialize};

/// Where the variable table lives inside the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateLayout {
    /// Worksheet holding the variable table.
    pub sheet: String,
    /// First row after the header (1-based).
    pub first_data_row: u32,
    pub label_col: u32,
    pub value_col: u32,
    pub unit_col: u32,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            sheet: "Planilha2".to_string(),
            first_data_row: 2,
            label_col: 1,
            value_col: 2,
            unit_col: 3,
        }
    }
}

impl TemplateLayout {
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    /// A1 address of the value cell on `row`.
    pub fn value_cell(&self, row: u32) -> String {
        cell_address(row, self.value_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_targets_planilha2_column_b() {
        let layout = TemplateLayout::default();
        assert_eq!(layout.sheet, "Planilha2");
        assert_eq!(layout.value_cell(2), "B2");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let layout: TemplateLayout = serde_json::from_str(r#"{"sheet": "Dados"}"#).unwrap();
        assert_eq!(layout.sheet, "Dados");
        assert_eq!(layout.first_data_row, 2);
        assert_eq!(layout.unit_col, 3);
    }
}
