pub mod query;
pub mod validate;
