//! Key/value persistence collaborators for the launch store

pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
