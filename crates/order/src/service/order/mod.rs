mod command;
mod listing;
mod query;

pub use self::command::OrderCommandService;
pub use self::query::{NOT_FOUND_MESSAGE, OrderQueryService};
