use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chenpv_template::{TemplateLayout, extract_schema_from_path, extract_values_from_path};
use chenpv_workbook::UmyaAdapter;

pub(crate) fn layout_for(sheet: Option<String>) -> TemplateLayout {
    match sheet {
        Some(sheet) => TemplateLayout::default().with_sheet(sheet),
        None => TemplateLayout::default(),
    }
}

/// Write the schema (or cached values) of `workbook` to `output` as pretty JSON.
///
/// Returns the number of variables exported.
pub fn export_json(
    workbook: &Path,
    output: &Path,
    schema: bool,
    sheet: Option<String>,
) -> Result<usize> {
    let layout = layout_for(sheet);
    let (json, count) = if schema {
        let schema = extract_schema_from_path::<UmyaAdapter>(workbook, &layout)
            .with_context(|| format!("failed to read schema from {}", workbook.display()))?;
        (serde_json::to_string_pretty(&schema)?, schema.len())
    } else {
        let values = extract_values_from_path::<UmyaAdapter>(workbook, &layout)
            .with_context(|| format!("failed to read values from {}", workbook.display()))?;
        (serde_json::to_string_pretty(&values)?, values.len())
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(variables = count, schema, output = %output.display(), "exported template");
    Ok(count)
}
