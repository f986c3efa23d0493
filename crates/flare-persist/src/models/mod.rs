mod thread;
mod memory;
mod code;
mod keys;

// Export database-agnostic models
pub use thread::{ChatMessage, ChatThread, MessageRole};
pub use memory::MemoryItem;
pub use code::CodeDoc;
pub use keys::{ApiKeys, ProviderKeys};

/// Current wall-clock time as epoch milliseconds, the unit every stored timestamp uses.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
