use crate::ledger::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldInputRequest {
    #[serde(default)]
    pub value: String,
    pub target: String,
    #[serde(default)]
    pub target2: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// `data:image/png;base64,...` produced on the page; absent when the
    /// rasterization library did not load.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub amount: String,
}

/// Element updates keyed by element id: `html` replaces innerHTML, `text`
/// replaces textContent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentUpdate {
    pub html: BTreeMap<String, String>,
    pub text: BTreeMap<String, String>,
    #[serde(default)]
    pub items: Vec<ItemView>,
}
