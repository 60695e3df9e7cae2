//! Config store adapters implementing the `ConfigStore` port.

pub mod json;
pub mod memory;

pub use json::JsonConfigStore;
pub use memory::MemoryConfigStore;
