mod state_store;

pub use self::state_store::{DynStateStore, StateItem, StateStoreTrait};
