use chenpv_workbook::{CellData, IoError, SheetData, SpreadsheetReader};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::layout::TemplateLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// The value cell holds a literal.
    Input,
    /// The value cell holds a formula.
    Derived,
}

/// One labeled row of the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub label: String,
    /// A1 address of the value cell.
    pub cell: String,
    pub unit: Option<String>,
    pub kind: VariableKind,
    /// Formula text with its leading `=`; only for derived rows.
    pub formula: Option<String>,
}

/// Cached numeric value per label, in row order.
///
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateValues {
    entries: Vec<(String, Option<f64>)>,
}

impl TemplateValues {
    /// Insert or replace. A repeated label keeps its first position.
    pub fn insert(&mut self, label: String, value: Option<f64>) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    /// `None` when the label is unknown, `Some(None)` when it has no numeric value.
    pub fn get(&self, label: &str) -> Option<Option<f64>> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TemplateValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Read the template sheet after checking it exists.
pub(crate) fn read_template_sheet<R: SpreadsheetReader>(
    reader: &mut R,
    layout: &TemplateLayout,
) -> Result<SheetData, TemplateError> {
    let backend = reader.backend_name();
    let available = reader
        .sheet_names()
        .map_err(|e| IoError::from_backend(backend, e))?;
    if !available.iter().any(|name| *name == layout.sheet) {
        return Err(TemplateError::SheetNotFound {
            sheet: layout.sheet.clone(),
            available,
        });
    }
    let sheet = reader
        .read_sheet(&layout.sheet)
        .map_err(|e| IoError::from_backend(backend, e))?;
    #[cfg(feature = "tracing")]
    tracing::debug!(
        backend,
        sheet = %layout.sheet,
        last_row = sheet.last_row(),
        "read template sheet"
    );
    Ok(sheet)
}

/// `(row, trimmed label)` for every row with a non-blank label, top-down.
pub(crate) fn labeled_rows<'a>(
    sheet: &'a SheetData,
    layout: &'a TemplateLayout,
) -> impl Iterator<Item = (u32, String)> + 'a {
    (layout.first_data_row..=sheet.last_row()).filter_map(move |row| {
        let label = sheet.cell(row, layout.label_col).and_then(CellData::text)?;
        Some((row, label))
    })
}

pub fn extract_schema<R: SpreadsheetReader>(
    reader: &mut R,
) -> Result<Vec<TemplateVariable>, TemplateError> {
    extract_schema_with_layout(reader, &TemplateLayout::default())
}

/// Describe every labeled row of the template sheet, in row order.
pub fn extract_schema_with_layout<R: SpreadsheetReader>(
    reader: &mut R,
    layout: &TemplateLayout,
) -> Result<Vec<TemplateVariable>, TemplateError> {
    let sheet = read_template_sheet(reader, layout)?;
    let schema = labeled_rows(&sheet, layout)
        .map(|(row, label)| {
            let formula = sheet
                .cell(row, layout.value_col)
                .and_then(CellData::formula_text)
                .map(str::to_string);
            let kind = if formula.is_some() {
                VariableKind::Derived
            } else {
                VariableKind::Input
            };
            TemplateVariable {
                label,
                cell: layout.value_cell(row),
                // Whitespace-only unit cells count as blank and give `None`
                unit: sheet.cell(row, layout.unit_col).and_then(CellData::text),
                kind,
                formula,
            }
        })
        .collect();
    Ok(schema)
}

pub fn extract_values<R: SpreadsheetReader>(
    reader: &mut R,
) -> Result<TemplateValues, TemplateError> {
    extract_values_with_layout(reader, &TemplateLayout::default())
}

/// Cached value of every labeled row.
///
/// Formula cells report whatever result the authoring tool saved last; nothing is
/// recalculated here.
pub fn extract_values_with_layout<R: SpreadsheetReader>(
    reader: &mut R,
    layout: &TemplateLayout,
) -> Result<TemplateValues, TemplateError> {
    let sheet = read_template_sheet(reader, layout)?;
    let mut values = TemplateValues::default();
    for (row, label) in labeled_rows(&sheet, layout) {
        let value = sheet
            .cell(row, layout.value_col)
            .and_then(|cell| cell.value.as_ref())
            .and_then(|v| v.as_number());
        values.insert(label, value);
    }
    Ok(values)
}
