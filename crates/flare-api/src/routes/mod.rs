pub mod health;
pub mod chats;
pub mod memory;
pub mod code;
pub mod keys;

use serde::Serialize;
use utoipa::ToSchema;

/// Result of an idempotent delete: `false` when nothing matched
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Acknowledgement of an upsert-replace save
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    pub ok: bool,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl SaveResponse {
    pub fn saved(updated_at: i64) -> Self {
        Self { ok: true, updated_at }
    }
}
