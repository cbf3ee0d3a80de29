use serde::{Deserialize, Serialize};

/// One entry of the paginated autoresponder listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoresponderSummary {
    pub autoresponder_id: String,
}

/// One entry of the template listing. The backend serves template names
/// in PascalCase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateSummary {
    #[serde(rename = "Name")]
    pub name: String,
}

/// A page of the template listing; `nextToken` continues the pagination.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePage {
    #[serde(default)]
    pub templates: Vec<TemplateSummary>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Tags that auto-confirm a subscriber, stored as one comma-separated
/// string on the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoConfirmTags {
    #[serde(default)]
    pub auto_confirm_tags: Option<String>,
}
