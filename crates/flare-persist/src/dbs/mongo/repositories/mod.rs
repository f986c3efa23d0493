pub mod thread;
pub mod memory;
pub mod code;
pub mod keys;

pub use thread::MongoThreadRepository;
pub use memory::MongoMemoryRepository;
pub use code::MongoCodeRepository;
pub use keys::MongoKeysRepository;
