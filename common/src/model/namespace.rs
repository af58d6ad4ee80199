use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logical grouping label with its own identity and URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default)]
    pub uuid: Uuid,
    pub name: String,
    pub url: String,
}
