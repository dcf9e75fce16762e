// file: src/logging/logger.rs
// version: 2.0.0
// guid: 0d5c7b93-a1e8-4f26-b3c4-58e9f0a27d61

//! Logger initialization and configuration

use crate::error::{ConvertError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| ConvertError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Run `f` inside an `operation` span named after a conversion stage
pub fn with_operation_span<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("operation", name = operation);
    let _enter = span.enter();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_is_an_error_not_a_panic() {
        let _ = init_logger(false, true);
        let second = init_logger(true, false);

        // Only one global subscriber can be installed per process
        assert!(second.is_err());
    }

    #[test]
    fn test_with_operation_span() {
        let mut executed = false;

        let result = with_operation_span("scan", || {
            executed = true;
            "scanned"
        });

        assert!(executed);
        assert_eq!(result, "scanned");
    }

    #[test]
    fn test_with_operation_span_with_return_value() {
        assert_eq!(with_operation_span("generate", || 2 + 2), 4);
    }
}
