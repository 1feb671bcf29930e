//! Formula engine for pressure-volume (PV) loop analysis.
//!
//! Eight optional clinical measurements ([`ClinicalInputs`]) are turned into a
//! fixed set of derived metrics ([`DerivedMetrics`]) and, when enough values are
//! known, the corner points of a PV loop diagram ([`PvLoopPoints`]).
//!
//! Missing data never raises. An absent operand or an exactly-zero denominator
//! makes the result absent, and absence flows on to every metric that consumes it,
//! the same way a blank cell propagates through the reference spreadsheet.
//!
//! ```
//! use chenpv_eval::{compute_metrics, ClinicalInputs, InputKey};
//!
//! let inputs = ClinicalInputs::new()
//!     .with(InputKey::Vdf, 67.35)
//!     .with(InputKey::Vsf, 34.35);
//! let metrics = compute_metrics(&inputs);
//! assert!((metrics.vs.unwrap() - 33.0).abs() < 1e-9);
//! assert_eq!(metrics.ea, None);
//! ```

pub mod metrics;
pub mod numeric;
pub mod pv_loop;

pub use chenpv_common::{ClinicalInputs, InputKey};
pub use metrics::{DerivedMetrics, Metric, compute_metrics};
pub use numeric::{END_AVG_COEFFICIENTS, end_avg, safe_divide};
pub use pv_loop::{ElastancePath, PvLoopPoints, compute_pv_points};
