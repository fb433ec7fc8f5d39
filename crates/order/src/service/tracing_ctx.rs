use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use shared::utils::{Method, Metrics, Status as StatusUtils, TracingContext};
use tokio::time::Instant;
use tracing::{error, info};

/// Opens a span per service operation and records its outcome in the
/// request metrics.
#[derive(Clone)]
pub struct OperationTracer {
    tracer_name: &'static str,
    metrics: Metrics,
}

impl OperationTracer {
    pub fn new(tracer_name: &'static str, metrics: Metrics) -> Self {
        Self {
            tracer_name,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        operation: &str,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, operation, method, true, message);
    }

    pub fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        operation: &str,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, operation, method, false, error_message);
    }

    fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        operation: &str,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(operation, method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
