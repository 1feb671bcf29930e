use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownInputKey;

/// The eight canonical clinical measurements.
///
/// The variant order is the column order used by batch files and the row order
/// of the reference template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputKey {
    /// Systolic arterial pressure.
    #[serde(rename = "PAS")]
    Pas,
    /// Diastolic arterial pressure.
    #[serde(rename = "PAD")]
    Pad,
    /// End-diastolic volume.
    #[serde(rename = "VDF")]
    Vdf,
    /// End-systolic volume.
    #[serde(rename = "VSF")]
    Vsf,
    /// Pre-ejection time.
    #[serde(rename = "PET")]
    Pet,
    /// Ejection time.
    #[serde(rename = "ET")]
    Et,
    /// End-systolic elastance.
    #[serde(rename = "Ees")]
    Ees,
    /// Volume intercept of the ESPVR.
    #[serde(rename = "V0")]
    V0,
}

/// key, code name, template label
static KEY_TABLE: [(InputKey, &str, &str); 8] = [
    (InputKey::Pas, "PAS", "PAS"),
    (InputKey::Pad, "PAD", "PAD"),
    (InputKey::Vdf, "VDF", "VDF"),
    (InputKey::Vsf, "VSF", "VSF"),
    // The template labels this row after the isovolumic contraction convention.
    (InputKey::Pet, "PET", "PET (CIV)"),
    (InputKey::Et, "ET", "ET"),
    (InputKey::Ees, "Ees", "Ees"),
    (InputKey::V0, "V0", "V0"),
];

impl InputKey {
    pub const ALL: [InputKey; 8] = [
        InputKey::Pas,
        InputKey::Pad,
        InputKey::Vdf,
        InputKey::Vsf,
        InputKey::Pet,
        InputKey::Et,
        InputKey::Ees,
        InputKey::V0,
    ];

    fn entry(self) -> &'static (InputKey, &'static str, &'static str) {
        &KEY_TABLE[self as usize]
    }

    /// Code name used as CSV column and JSON key.
    pub fn as_str(self) -> &'static str {
        self.entry().1
    }

    /// Display label of this input's row in the reference template.
    pub fn template_label(self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKey {
    type Err = UnknownInputKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KEY_TABLE
            .iter()
            .find(|(_, code, _)| *code == s)
            .map(|(k, _, _)| *k)
            .ok_or_else(|| UnknownInputKey::new(s))
    }
}
