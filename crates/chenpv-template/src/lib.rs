//! Template schema mapper.
//!
//! The reference spreadsheet lists one variable per row of a fixed worksheet:
//! label in column A, value in column B, unit in column C. Rows are discovered by
//! their label text rather than by position, so inserting or reordering rows in
//! the template does not break extraction or filling.
//!
//! - [`extract_schema`] classifies each labeled row as an input or a derived value.
//! - [`extract_values`] reads the cached numeric result of every labeled row.
//! - [`fill_template`] writes named inputs into a copy of the template.
//!
//! All three are generic over the [`SpreadsheetReader`]/[`SpreadsheetWriter`]
//! capability; the `*_from_path` helpers open a fresh document per call.

mod error;
mod fill;
mod layout;
mod path;
mod schema;

pub use chenpv_workbook::{SpreadsheetReader, SpreadsheetWriter};
pub use error::TemplateError;
pub use fill::{FillReport, WrittenCell, fill_template, fill_template_with_layout};
pub use layout::TemplateLayout;
pub use path::{extract_schema_from_path, extract_values_from_path};
#[cfg(feature = "umya")]
pub use path::fill_template_path;
pub use schema::{
    TemplateValues, TemplateVariable, VariableKind, extract_schema, extract_schema_with_layout,
    extract_values, extract_values_with_layout,
};

#[cfg(test)]
pub(crate) mod memory;
