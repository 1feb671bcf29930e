//! CSV batch computation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chenpv_common::{ClinicalInputs, InputKey};
use chenpv_eval::{ElastancePath, Metric, compute_metrics};
use csv::StringRecord;

/// Columns appended when at least one row yields loop geometry.
pub const ESPVR_COLUMNS: [&str; 4] = ["ESPVR_V0", "ESPVR_P0", "ESPVR_VES", "ESPVR_PES"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub with_geometry: usize,
}

/// Input column index for each canonical key, or an error naming what is missing.
pub fn locate_inputs(headers: &StringRecord) -> Result<[usize; 8]> {
    let mut found = [0usize; 8];
    let mut missing = Vec::new();
    for (slot, key) in found.iter_mut().zip(InputKey::ALL) {
        match headers.iter().position(|h| h.trim() == key.as_str()) {
            Some(idx) => *slot = idx,
            None => missing.push(key.as_str()),
        }
    }
    if !missing.is_empty() {
        let present: Vec<&str> = headers.iter().collect();
        bail!(
            "missing input columns: {}; found: {}",
            missing.join(", "),
            present.join(", ")
        );
    }
    Ok(found)
}

/// Blank, non-numeric and non-finite cells are absent.
pub fn parse_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Output header plus the column each appended value lands in.
///
/// A name that already exists in the input is reused in place.
struct OutputLayout {
    headers: Vec<String>,
    metric_cols: Vec<usize>,
    espvr_cols: Vec<usize>,
}

impl OutputLayout {
    fn new(input: &StringRecord, with_geometry: bool) -> Self {
        let mut headers: Vec<String> = input.iter().map(str::to_string).collect();
        let mut slot = |name: &str| match headers.iter().position(|h| h.trim() == name) {
            Some(idx) => idx,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        };
        let metric_cols = Metric::ALL.iter().map(|m| slot(m.as_str())).collect();
        let espvr_cols = if with_geometry {
            ESPVR_COLUMNS.iter().map(|name| slot(*name)).collect()
        } else {
            Vec::new()
        };
        Self {
            headers,
            metric_cols,
            espvr_cols,
        }
    }
}

/// Shortest round-trip rendering that keeps a fractional part (`0.0`, not `0`).
fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{v:?}")).unwrap_or_default()
}

/// Read `input`, compute every row, and write `output` with the metric columns added.
pub fn compute_csv(input: &Path, output: &Path, path: ElastancePath) -> Result<BatchSummary> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", input.display()))?
        .clone();
    let columns = locate_inputs(&headers)?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("failed to read data row {} of {}", line + 1, input.display())
        })?;
        let mut inputs = ClinicalInputs::new();
        for (key, &col) in InputKey::ALL.iter().zip(&columns) {
            inputs.set(*key, record.get(col).and_then(parse_cell));
        }
        let metrics = compute_metrics(&inputs);
        let geometry = metrics.pv_points(&inputs, path);
        rows.push((record, metrics, geometry));
    }

    let with_geometry = rows.iter().filter(|(_, _, g)| g.is_some()).count();
    let layout = OutputLayout::new(&headers, with_geometry > 0);
    tracing::info!(
        rows = rows.len(),
        with_geometry,
        elastance = ?path,
        "computed batch"
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    writer.write_record(&layout.headers)?;

    for (record, metrics, geometry) in &rows {
        let mut out: Vec<String> = record.iter().map(str::to_string).collect();
        out.resize(layout.headers.len(), String::new());
        for (metric, &col) in Metric::ALL.iter().zip(&layout.metric_cols) {
            out[col] = format_value(metrics.get(*metric));
        }
        let anchors = geometry.map(|g| g.espvr_anchors());
        for (i, &col) in layout.espvr_cols.iter().enumerate() {
            out[col] = format_value(anchors.map(|a| a[i]));
        }
        writer.write_record(&out)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(BatchSummary {
        rows: rows.len(),
        with_geometry,
    })
}
