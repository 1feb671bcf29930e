use std::path::{Path, PathBuf};

use chenpv_common::InputKey;
use chenpv_workbook::{CellData, IoError, SpreadsheetReader, SpreadsheetWriter};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::TemplateError;
use crate::layout::TemplateLayout;
use crate::schema::{labeled_rows, read_template_sheet};

/// One value cell overwritten by [`fill_template`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenCell {
    pub key: InputKey,
    pub label: &'static str,
    pub cell: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillReport {
    pub output: PathBuf,
    pub written: Vec<WrittenCell>,
    /// The source carried macro content, kept in the copy.
    pub macros_preserved: bool,
}

pub fn fill_template<D, I, K>(
    document: &mut D,
    output: &Path,
    inputs: I,
) -> Result<FillReport, TemplateError>
where
    D: SpreadsheetReader + SpreadsheetWriter,
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    fill_template_with_layout(document, output, inputs, &TemplateLayout::default())
}

/// Write named inputs into the template's value cells and save a full copy to `output`.
///
/// Keys are the canonical input names (`PAS`, `PET`, ...); each is mapped to its
/// display label and the row carrying that label is overwritten. Every key is
/// resolved before anything is written, so a bad key leaves no output behind.
pub fn fill_template_with_layout<D, I, K>(
    document: &mut D,
    output: &Path,
    inputs: I,
    layout: &TemplateLayout,
) -> Result<FillReport, TemplateError>
where
    D: SpreadsheetReader + SpreadsheetWriter,
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let inputs = resolve_keys(inputs)?;
    let template = document
        .source_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string());
    if let Some(source) = document.source_path() {
        if same_file(source, output) {
            return Err(TemplateError::OutputIsTemplate { path: template });
        }
    }

    let sheet = read_template_sheet(document, layout)?;
    let mut label_rows: FxHashMap<String, u32> = FxHashMap::default();
    for (row, label) in labeled_rows(&sheet, layout) {
        // Later rows win on duplicate labels
        label_rows.insert(label, row);
    }

    let mut planned = Vec::with_capacity(inputs.len());
    let mut rows = Vec::with_capacity(inputs.len());
    for (key, value) in inputs {
        let label = key.template_label();
        let row = *label_rows
            .get(label)
            .ok_or_else(|| TemplateError::LabelNotFound {
                template: template.clone(),
                label: label.to_string(),
            })?;
        planned.push(WrittenCell {
            key,
            label,
            cell: layout.value_cell(row),
            value,
        });
        rows.push(row);
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, label, row, value, "planned template write");
    }

    let backend = document.backend_name();
    for (written, &row) in planned.iter().zip(&rows) {
        SpreadsheetWriter::write_cell(
            document,
            &layout.sheet,
            row,
            layout.value_col,
            CellData::from_value(written.value),
        )
        .map_err(|e| IoError::from_backend(backend, e))?;
    }

    let macros_preserved = document.has_macros();
    document
        .save_as(output)
        .map_err(|e| IoError::from_backend(backend, e))?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        output = %output.display(),
        cells = planned.len(),
        macros_preserved,
        "filled template copy"
    );

    Ok(FillReport {
        output: output.to_path_buf(),
        written: planned,
        macros_preserved,
    })
}

/// Parse every key up front, reporting all unknown names at once.
fn resolve_keys<I, K>(inputs: I) -> Result<Vec<(InputKey, f64)>, TemplateError>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut resolved = Vec::new();
    let mut unknown = Vec::new();
    let mut accepted = Vec::new();
    for (key, value) in inputs {
        match key.as_ref().parse::<InputKey>() {
            Ok(k) if !value.is_finite() => {
                return Err(TemplateError::NonFiniteInput {
                    key: k.as_str().to_string(),
                });
            }
            Ok(k) => resolved.push((k, value)),
            Err(err) => {
                unknown.push(err.key);
                accepted = err.accepted;
            }
        }
    }
    if !unknown.is_empty() {
        return Err(TemplateError::UnknownInputKey {
            keys: unknown,
            accepted,
        });
    }
    Ok(resolved)
}

fn same_file(source: &Path, output: &Path) -> bool {
    let canonical_output = match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent.canonicalize().ok().map(|p| p.join(name))
        }
        _ => None,
    };
    match (source.canonicalize().ok(), canonical_output) {
        (Some(a), Some(b)) => a == b,
        _ => source == output,
    }
}
