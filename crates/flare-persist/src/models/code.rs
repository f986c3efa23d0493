use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The single saved HTML document of a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CodeDoc {
    pub id: String,
    pub client_id: String,
    pub html: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}
