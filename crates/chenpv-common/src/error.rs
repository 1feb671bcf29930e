/// A caller supplied an input name that is not one of the eight canonical keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input key `{key}`; accepted keys: {}", .accepted.join(", "))]
pub struct UnknownInputKey {
    pub key: String,
    pub accepted: Vec<&'static str>,
}

impl UnknownInputKey {
    pub fn new(key: impl Into<String>) -> Self {
        let mut accepted: Vec<&'static str> =
            crate::InputKey::ALL.iter().map(|k| k.as_str()).collect();
        accepted.sort_unstable();
        Self {
            key: key.into(),
            accepted,
        }
    }
}
