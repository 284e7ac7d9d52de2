// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod json_store;
pub mod memory_store;

pub use clock::{FixedClock, SystemClock};
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
