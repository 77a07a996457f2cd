use serde::{Deserialize, Serialize};

/// A single to-do entry. The id is assigned once by the store and never
/// reused; `attachment_url` is set at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    pub text: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
}
