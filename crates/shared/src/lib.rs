pub mod abstract_trait;
pub mod errors;
pub mod state_store;
pub mod utils;
