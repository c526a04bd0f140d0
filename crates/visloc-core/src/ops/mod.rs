//! Store primitives the requester is built on

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::CommandStore;
