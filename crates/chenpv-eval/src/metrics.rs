use std::fmt;

use chenpv_common::ClinicalInputs;
use serde::{Deserialize, Serialize};

use crate::numeric::{end_avg, safe_divide};

/// Names of the derived metrics, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Central (telesystolic) arterial pressure, `0.9·PAS`.
    PAt,
    /// Stroke volume.
    Vs,
    /// Ejection fraction, in percent.
    Fe,
    /// Normalized pre-ejection/ejection time ratio.
    TNd,
    /// Average normalized elastance at `tNd`.
    EndAvg,
    /// Estimated normalized elastance at end-diastole.
    EndEst,
    /// Effective arterial elastance.
    Ea,
    /// Ventriculo-arterial coupling with the measured `Ees`.
    Vac,
    /// End-systolic pressure on the ESPVR with the measured `Ees`.
    Ptop,
    /// Single-beat estimate of `Ees`.
    EesChen,
    /// Coupling with the single-beat `Ees`.
    VacChen,
    /// End-systolic pressure on the single-beat ESPVR.
    PtopChen,
}

impl Metric {
    pub const ALL: [Metric; 12] = [
        Metric::PAt,
        Metric::Vs,
        Metric::Fe,
        Metric::TNd,
        Metric::EndAvg,
        Metric::EndEst,
        Metric::Ea,
        Metric::Vac,
        Metric::Ptop,
        Metric::EesChen,
        Metric::VacChen,
        Metric::PtopChen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::PAt => "PAt",
            Metric::Vs => "VS",
            Metric::Fe => "FE",
            Metric::TNd => "tNd",
            Metric::EndAvg => "Endavg",
            Metric::EndEst => "Endest",
            Metric::Ea => "Ea",
            Metric::Vac => "VAC",
            Metric::Ptop => "Ptop",
            Metric::EesChen => "Ees_chen",
            Metric::VacChen => "VAC_chen",
            Metric::PtopChen => "Ptop_chen",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every derived metric, each independently absent.
///
/// All twelve keys are always serialized; an absent metric becomes `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    #[serde(rename = "PAt")]
    pub pat: Option<f64>,
    #[serde(rename = "VS")]
    pub vs: Option<f64>,
    #[serde(rename = "FE")]
    pub fe: Option<f64>,
    #[serde(rename = "tNd")]
    pub tnd: Option<f64>,
    #[serde(rename = "Endavg")]
    pub end_avg: Option<f64>,
    #[serde(rename = "Endest")]
    pub end_est: Option<f64>,
    #[serde(rename = "Ea")]
    pub ea: Option<f64>,
    #[serde(rename = "VAC")]
    pub vac: Option<f64>,
    #[serde(rename = "Ptop")]
    pub ptop: Option<f64>,
    #[serde(rename = "Ees_chen")]
    pub ees_chen: Option<f64>,
    #[serde(rename = "VAC_chen")]
    pub vac_chen: Option<f64>,
    #[serde(rename = "Ptop_chen")]
    pub ptop_chen: Option<f64>,
}

impl DerivedMetrics {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::PAt => self.pat,
            Metric::Vs => self.vs,
            Metric::Fe => self.fe,
            Metric::TNd => self.tnd,
            Metric::EndAvg => self.end_avg,
            Metric::EndEst => self.end_est,
            Metric::Ea => self.ea,
            Metric::Vac => self.vac,
            Metric::Ptop => self.ptop,
            Metric::EesChen => self.ees_chen,
            Metric::VacChen => self.vac_chen,
            Metric::PtopChen => self.ptop_chen,
        }
    }

    /// `(metric, value)` pairs in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    pub fn present_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_some()).count()
    }
}

/// Compute every derived metric from one set of measurements.
///
/// Pure: the same inputs always give bit-identical output.
pub fn compute_metrics(inputs: &ClinicalInputs) -> DerivedMetrics {
    let ClinicalInputs {
        pas,
        pad,
        vdf,
        vsf,
        pet,
        et,
        ees,
        v0,
    } = *inputs;

    let pat = pas.map(|pas| 0.9 * pas);
    let vs = stroke_volume(vdf, vsf);
    let fe = ejection_fraction(vdf, vsf);
    let tnd = safe_divide(pet, et);
    let end_avg = tnd.map(end_avg);
    let end_est = end_est(fe, pad, pat, end_avg);
    let ea = safe_divide(pat, vs);
    let vac = safe_divide(ea, ees);
    let ptop = espvr_pressure(ees, vsf, v0);
    let ees_chen = single_beat_ees(pas, pad, end_est, vs);
    let vac_chen = safe_divide(ea, ees_chen);
    let ptop_chen = espvr_pressure(ees_chen, vsf, v0);

    let metrics = DerivedMetrics {
        pat,
        vs,
        fe,
        tnd,
        end_avg,
        end_est,
        ea,
        vac,
        ptop,
        ees_chen,
        vac_chen,
        ptop_chen,
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(
        inputs = inputs.present().count(),
        metrics = metrics.present_count(),
        "computed pv metrics"
    );

    metrics
}

fn stroke_volume(vdf: Option<f64>, vsf: Option<f64>) -> Option<f64> {
    Some(vdf? - vsf?)
}

fn ejection_fraction(vdf: Option<f64>, vsf: Option<f64>) -> Option<f64> {
    let (vdf, vsf) = (vdf?, vsf?);
    if vdf == 0.0 {
        return None;
    }
    Some((vdf - vsf) / vdf * 100.0)
}

fn end_est(
    fe: Option<f64>,
    pad: Option<f64>,
    pat: Option<f64>,
    end_avg: Option<f64>,
) -> Option<f64> {
    let (fe, end_avg) = (fe?, end_avg?);
    let pressure_ratio = safe_divide(pad, pat)?;
    Some(0.0275 - 0.165 * (fe / 100.0) + 0.3656 * pressure_ratio + 0.515 * end_avg)
}

fn espvr_pressure(ees: Option<f64>, vsf: Option<f64>, v0: Option<f64>) -> Option<f64> {
    Some(ees? * (vsf? - v0?))
}

// Chen single-beat form: (PAD - Endest·0.9·PAS) / (Endest·VS), sign convention kept as published.
fn single_beat_ees(
    pas: Option<f64>,
    pad: Option<f64>,
    end_est: Option<f64>,
    vs: Option<f64>,
) -> Option<f64> {
    let (pas, pad, end_est, vs) = (pas?, pad?, end_est?, vs?);
    if end_est == 0.0 || vs == 0.0 {
        return None;
    }
    let esp = 0.9 * pas;
    safe_divide(Some(pad - end_est * esp), Some(end_est * vs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chenpv_common::InputKey;

    fn full_inputs() -> ClinicalInputs {
        ClinicalInputs {
            pas: Some(120.0),
            pad: Some(70.0),
            vdf: Some(67.35),
            vsf: Some(34.35),
            pet: Some(100.0),
            et: Some(300.0),
            ees: Some(2.39),
            v0: Some(-8.21),
        }
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("metric should be present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_inputs_give_all_absent() {
        let metrics = compute_metrics(&ClinicalInputs::default());
        assert_eq!(metrics, DerivedMetrics::default());
        assert_eq!(metrics.iter().count(), 12);
        assert_eq!(metrics.present_count(), 0);
    }

    #[test]
    fn full_inputs_follow_template_formulas() {
        let m = compute_metrics(&full_inputs());
        assert_close(m.pat, 108.0);
        assert_close(m.vs, 33.0);
        assert_close(m.fe, 33.0 / 67.35 * 100.0);
        assert_close(m.tnd, 1.0 / 3.0);
        assert_close(m.end_avg, end_avg(1.0 / 3.0));
        let end_est_expected = 0.0275 - 0.165 * (m.fe.unwrap() / 100.0)
            + 0.3656 * (70.0 / 108.0)
            + 0.515 * m.end_avg.unwrap();
        assert_close(m.end_est, end_est_expected);
        assert_close(m.ea, 108.0 / 33.0);
        assert_close(m.vac, 108.0 / 33.0 / 2.39);
        assert_close(m.ptop, 101.7184);
        let ees_chen_expected =
            (70.0 - end_est_expected * 108.0) / (end_est_expected * 33.0);
        assert_close(m.ees_chen, ees_chen_expected);
        assert_close(m.vac_chen, (108.0 / 33.0) / ees_chen_expected);
        assert_close(m.ptop_chen, ees_chen_expected * 42.56);
    }

    #[test]
    fn zero_vdf_drops_ejection_fraction_only_where_used() {
        let inputs = full_inputs().with(InputKey::Vdf, 0.0);
        let m = compute_metrics(&inputs);
        assert_eq!(m.fe, None);
        assert_eq!(m.end_est, None);
        assert_eq!(m.ees_chen, None);
        assert_close(m.vs, -34.35);
        assert!(m.ea.is_some());
    }

    #[test]
    fn zero_pas_makes_end_est_absent() {
        let m = compute_metrics(&full_inputs().with(InputKey::Pas, 0.0));
        assert_eq!(m.pat, Some(0.0));
        assert_eq!(m.end_est, None);
        assert_eq!(m.ees_chen, None);
        assert_eq!(m.ea, Some(0.0));
    }

    #[test]
    fn equal_volumes_zero_the_stroke_volume() {
        let m = compute_metrics(&full_inputs().with(InputKey::Vsf, 67.35));
        assert_eq!(m.vs, Some(0.0));
        assert_eq!(m.ea, None);
        assert_eq!(m.vac, None);
        assert_eq!(m.ees_chen, None);
        assert_eq!(m.vac_chen, None);
        assert_eq!(m.ptop_chen, None);
    }

    #[test]
    fn zero_ees_leaves_direct_coupling_absent() {
        let m = compute_metrics(&full_inputs().with(InputKey::Ees, 0.0));
        assert_eq!(m.vac, None);
        assert_eq!(m.ptop, Some(0.0));
        assert!(m.vac_chen.is_some());
    }

    #[test]
    fn zero_et_leaves_timing_chain_absent() {
        let m = compute_metrics(&full_inputs().with(InputKey::Et, 0.0));
        assert_eq!(m.tnd, None);
        assert_eq!(m.end_avg, None);
        assert_eq!(m.end_est, None);
        assert_eq!(m.ees_chen, None);
        assert!(m.ptop.is_some());
    }

    #[test]
    fn serializes_every_key_with_nulls() {
        let json = serde_json::to_value(compute_metrics(&ClinicalInputs::default())).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 12);
        for metric in Metric::ALL {
            assert!(obj[metric.as_str()].is_null(), "{metric} should be null");
        }
    }
}
