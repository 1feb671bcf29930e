use serde::{Deserialize, Serialize};

use crate::InputKey;

/// One set of clinical measurements. Every field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInputs {
    #[serde(rename = "PAS", default)]
    pub pas: Option<f64>,
    #[serde(rename = "PAD", default)]
    pub pad: Option<f64>,
    #[serde(rename = "VDF", default)]
    pub vdf: Option<f64>,
    #[serde(rename = "VSF", default)]
    pub vsf: Option<f64>,
    #[serde(rename = "PET", default)]
    pub pet: Option<f64>,
    #[serde(rename = "ET", default)]
    pub et: Option<f64>,
    #[serde(rename = "Ees", default)]
    pub ees: Option<f64>,
    #[serde(rename = "V0", default)]
    pub v0: Option<f64>,
}

impl ClinicalInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: InputKey) -> Option<f64> {
        match key {
            InputKey::Pas => self.pas,
            InputKey::Pad => self.pad,
            InputKey::Vdf => self.vdf,
            InputKey::Vsf => self.vsf,
            InputKey::Pet => self.pet,
            InputKey::Et => self.et,
            InputKey::Ees => self.ees,
            InputKey::V0 => self.v0,
        }
    }

    pub fn set(&mut self, key: InputKey, value: Option<f64>) {
        let slot = match key {
            InputKey::Pas => &mut self.pas,
            InputKey::Pad => &mut self.pad,
            InputKey::Vdf => &mut self.vdf,
            InputKey::Vsf => &mut self.vsf,
            InputKey::Pet => &mut self.pet,
            InputKey::Et => &mut self.et,
            InputKey::Ees => &mut self.ees,
            InputKey::V0 => &mut self.v0,
        };
        *slot = value;
    }

    /// Builder-style setter.
    pub fn with(mut self, key: InputKey, value: f64) -> Self {
        self.set(key, Some(value));
        self
    }

    /// Present measurements in canonical key order.
    pub fn present(&self) -> impl Iterator<Item = (InputKey, f64)> + '_ {
        InputKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|v| (key, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_cover_every_key() {
        let mut inputs = ClinicalInputs::new();
        for (i, key) in InputKey::ALL.into_iter().enumerate() {
            inputs.set(key, Some(i as f64));
        }
        for (i, key) in InputKey::ALL.into_iter().enumerate() {
            assert_eq!(inputs.get(key), Some(i as f64));
        }
    }

    #[test]
    fn deserializes_partial_objects() {
        let inputs: ClinicalInputs =
            serde_json::from_str(r#"{"VDF": 67.35, "PET": null}"#).unwrap();
        assert_eq!(inputs.vdf, Some(67.35));
        assert_eq!(inputs.pet, None);
        assert_eq!(inputs.present().count(), 1);
    }
}
