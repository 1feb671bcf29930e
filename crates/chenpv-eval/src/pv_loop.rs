use chenpv_common::ClinicalInputs;
use serde::{Deserialize, Serialize};

use crate::metrics::DerivedMetrics;

/// A `(volume, pressure)` pair, mL and mmHg.
pub type PvPoint = (f64, f64);

/// Points needed to draw the ESPVR line and the PV loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PvLoopPoints {
    /// `(V0, 0)` to `(VSF, Ptop)`.
    pub espvr: [PvPoint; 2],
    /// Closed path `(VDF,0) → (VDF,Ptop) → (VSF,Ptop) → (VSF,0) → (VDF,0)`.
    #[serde(rename = "loop")]
    pub loop_polygon: [PvPoint; 5],
}

impl PvLoopPoints {
    /// `(ESPVR_V0, ESPVR_P0, ESPVR_VES, ESPVR_PES)`, the columns appended to batch output.
    pub fn espvr_anchors(&self) -> [f64; 4] {
        let [(v0, p0), (ves, pes)] = self.espvr;
        [v0, p0, ves, pes]
    }

    pub fn is_closed(&self) -> bool {
        self.loop_polygon[0] == self.loop_polygon[4]
    }
}

/// Which end-systolic elastance drives the loop's top pressure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElastancePath {
    /// Measured `Ees`, giving `Ptop`.
    #[default]
    Direct,
    /// Single-beat estimate `Ees_chen`, giving `Ptop_chen`.
    SingleBeat,
}

/// Loop geometry, or `None` unless all four values are present.
pub fn compute_pv_points(
    vdf: Option<f64>,
    vsf: Option<f64>,
    v0: Option<f64>,
    ptop: Option<f64>,
) -> Option<PvLoopPoints> {
    let (vdf, vsf, v0, ptop) = (vdf?, vsf?, v0?, ptop?);
    Some(PvLoopPoints {
        espvr: [(v0, 0.0), (vsf, ptop)],
        loop_polygon: [
            (vdf, 0.0),
            (vdf, ptop),
            (vsf, ptop),
            (vsf, 0.0),
            (vdf, 0.0),
        ],
    })
}

impl DerivedMetrics {
    pub fn top_pressure(&self, path: ElastancePath) -> Option<f64> {
        match path {
            ElastancePath::Direct => self.ptop,
            ElastancePath::SingleBeat => self.ptop_chen,
        }
    }

    /// Loop geometry for these metrics and the inputs they were computed from.
    pub fn pv_points(&self, inputs: &ClinicalInputs, path: ElastancePath) -> Option<PvLoopPoints> {
        compute_pv_points(inputs.vdf, inputs.vsf, inputs.v0, self.top_pressure(path))
    }
}
