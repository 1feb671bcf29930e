use chenpv_workbook::IoError;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("worksheet `{sheet}` not found; available: [{}]", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("unknown input key(s) {}; accepted keys: {}", .keys.join(", "), .accepted.join(", "))]
    UnknownInputKey {
        keys: Vec<String>,
        accepted: Vec<&'static str>,
    },

    #[error("label `{label}` not found in template {template}")]
    LabelNotFound { template: String, label: String },

    #[error("input `{key}` is not a finite number")]
    NonFiniteInput { key: String },

    #[error("refusing to overwrite the template itself: {path}")]
    OutputIsTemplate { path: String },

    #[error(transparent)]
    Io(#[from] IoError),
}
