use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider name → API key. Flat string map, stored as-is.
pub type ProviderKeys = BTreeMap<String, String>;

/// Per-client provider keys, overwritten as a whole on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiKeys {
    pub id: String,
    pub client_id: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub providers: ProviderKeys,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}
