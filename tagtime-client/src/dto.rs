use serde::Serialize;

use crate::domain::TagId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest<'a> {
    pub start_at: String,
    pub end_at: String,
    pub tag_ids: &'a [TagId],
}
