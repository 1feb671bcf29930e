//! Path-based entry points: each call opens a fresh document.

use std::path::Path;

use chenpv_workbook::{IoError, SpreadsheetReader};

use crate::error::TemplateError;
use crate::layout::TemplateLayout;
use crate::schema::{
    TemplateValues, TemplateVariable, extract_schema_with_layout, extract_values_with_layout,
};

fn open<R: SpreadsheetReader>(path: &Path) -> Result<R, TemplateError> {
    R::open_path(path).map_err(|e| {
        let backend = std::any::type_name::<R>()
            .rsplit("::")
            .next()
            .unwrap_or("document");
        TemplateError::Io(IoError::open(backend, path, e))
    })
}

pub fn extract_schema_from_path<R: SpreadsheetReader>(
    path: impl AsRef<Path>,
    layout: &TemplateLayout,
) -> Result<Vec<TemplateVariable>, TemplateError> {
    let mut reader = open::<R>(path.as_ref())?;
    extract_schema_with_layout(&mut reader, layout)
}

pub fn extract_values_from_path<R: SpreadsheetReader>(
    path: impl AsRef<Path>,
    layout: &TemplateLayout,
) -> Result<TemplateValues, TemplateError> {
    let mut reader = open::<R>(path.as_ref())?;
    extract_values_with_layout(&mut reader, layout)
}

/// Open `template` with the umya backend, fill it and save the copy to `output`.
///
/// `template` is only ever read.
#[cfg(feature = "umya")]
pub fn fill_template_path<I, K>(
    template: impl AsRef<Path>,
    output: impl AsRef<Path>,
    inputs: I,
    layout: &TemplateLayout,
) -> Result<crate::fill::FillReport, TemplateError>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut document = open::<chenpv_workbook::UmyaAdapter>(template.as_ref())?;
    crate::fill::fill_template_with_layout(&mut document, output.as_ref(), inputs, layout)
}
