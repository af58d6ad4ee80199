use serde::{Deserialize, Serialize};

/// A single key/value service setting, e.g. the title shown on the landing page.
///
/// Older dashboard builds sent the value as `data`; it is still accepted on
/// input but always written back as `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralOption {
    pub key: String,
    #[serde(alias = "data")]
    pub value: String,
}

impl GeneralOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Options written on first start when the table is still empty.
    pub fn defaults() -> Vec<GeneralOption> {
        vec![
            GeneralOption::new("service_title", "OGC Features API"),
            GeneralOption::new("service_description", "A OGC compliant Features API"),
        ]
    }
}
