pub mod models;
pub mod trait_client;
pub mod dbs;
pub mod error;
#[cfg(feature = "mongodb")]
pub mod builder;

pub use models::{
    now_millis, ApiKeys, ChatMessage, ChatThread, CodeDoc, MemoryItem, MessageRole, ProviderKeys,
};
pub use trait_client::PersistenceClient;
pub use dbs::memory::InMemoryPersistenceClient;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoPersistenceClient;
pub use error::{PersistError, Result};
#[cfg(feature = "mongodb")]
pub use builder::StoreBuilder;
