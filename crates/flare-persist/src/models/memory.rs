use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Key-value memory entry, unique per (client_id, key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemoryItem {
    pub id: String,
    pub client_id: String,
    pub key: String,
    pub value: String,
    pub ts: i64,
}
