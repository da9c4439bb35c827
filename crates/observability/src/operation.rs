//! Explicit logging wrapper composed around each public branch operation.

use core::fmt::Display;

/// Run `f` inside an `operation` span and log how it ended.
///
/// Success is logged at `info`, failure at `warn` with the error text. The
/// result is returned unchanged.
pub fn logged<T, E, F>(operation: &'static str, f: F) -> Result<T, E>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    let span = ::tracing::info_span!("operation", name = operation);
    let _guard = span.enter();

    let result = f();
    match &result {
        Ok(_) => ::tracing::info!(operation, "operation succeeded"),
        Err(err) => ::tracing::warn!(operation, error = %err, "operation failed"),
    }
    result
}
