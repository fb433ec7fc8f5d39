mod dapr;
mod memory;

pub use self::dapr::{DaprConfig, DaprStateStore};
pub use self::memory::MemoryStateStore;
