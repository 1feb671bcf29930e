//! Shared vocabulary for the chenpv crates.
//!
//! The eight clinical measurements are addressed through [`InputKey`]. Each key
//! carries its code name (the column header used in batch files and JSON) and its
//! display label inside the reference spreadsheet template.

pub mod error;
pub mod inputs;
pub mod key;

pub use error::UnknownInputKey;
pub use inputs::ClinicalInputs;
pub use key::InputKey;
