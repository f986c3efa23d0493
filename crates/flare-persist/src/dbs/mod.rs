pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;

/// Collection names, shared by every backend
pub const THREADS_COLLECTION: &str = "chatthread";
pub const MEMORY_COLLECTION: &str = "memoryitem";
pub const CODE_COLLECTION: &str = "codedoc";
pub const KEYS_COLLECTION: &str = "apikeys";
