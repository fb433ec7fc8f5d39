pub mod order;
mod tracing_ctx;

pub use self::tracing_ctx::OperationTracer;
