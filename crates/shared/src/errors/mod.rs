mod http;
mod service;
mod state_store;

pub use self::http::HttpError;
pub use self::service::ServiceError;
pub use self::state_store::StateStoreError;
