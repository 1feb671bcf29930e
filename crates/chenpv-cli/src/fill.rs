use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chenpv_template::{FillReport, fill_template_path};
use serde_json::Value;

use crate::extract::layout_for;

/// Numeric entries of a `--row-json` object. `null` entries are skipped.
pub fn parse_row_json(text: &str) -> Result<Vec<(String, f64)>> {
    let value: Value = serde_json::from_str(text).context("--row-json is not valid JSON")?;
    let Value::Object(map) = value else {
        bail!("--row-json must be a JSON object");
    };
    let mut inputs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => continue,
            Value::Number(n) => match n.as_f64() {
                Some(v) => inputs.push((key, v)),
                None => bail!("value for `{key}` is not representable as a number"),
            },
            other => bail!("value for `{key}` must be a number, got {other}"),
        }
    }
    if inputs.is_empty() {
        bail!("--row-json has no numeric values to write");
    }
    Ok(inputs)
}

pub fn fill_from_json(
    template: &Path,
    row_json: &str,
    output: &Path,
    sheet: Option<String>,
) -> Result<FillReport> {
    let inputs = parse_row_json(row_json)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let report = fill_template_path(template, output, inputs, &layout_for(sheet))
        .with_context(|| format!("failed to fill {}", template.display()))?;
    for cell in &report.written {
        tracing::debug!(key = %cell.key, cell = %cell.cell, value = cell.value, "wrote input");
    }
    if report.macros_preserved {
        tracing::info!(output = %report.output.display(), "macros carried into the copy");
    }
    Ok(report)
}
