//! Access to labeled tabular documents.
//!
//! [`SpreadsheetReader`] and [`SpreadsheetWriter`] are the only surface the template
//! mapper depends on, so the spreadsheet library underneath can be swapped. Two
//! backends ship with the crate:
//!
//! - [`UmyaAdapter`] (feature `umya`, default): reads formula text and cached values,
//!   writes cells, and saves a full copy of the document, embedded macros included.
//! - [`CalamineAdapter`] (feature `calamine`): read-only.

pub mod address;
pub mod backends;
pub mod error;
pub mod traits;

#[cfg(feature = "calamine")]
pub use backends::CalamineAdapter;
#[cfg(feature = "umya")]
pub use backends::UmyaAdapter;
pub use address::{cell_address, col_to_a1};
pub use error::IoError;
pub use traits::{CellData, CellValue, SheetData, SpreadsheetReader, SpreadsheetWriter};
