use tracing::Span;

use super::TraceId;

/// Root span for a long-running job (one service run, one reload).
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!("root", name = %name, trace_id = %trace_id)
}

/// Child span; inherits trace_id from the enclosing root span.
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name)
}
