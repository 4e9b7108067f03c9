//! Redaction of customer data in log output.
//!
//! Sample values are customer records (names, emails, revenue). They only
//! reach the logs when data logging was switched on explicitly.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when data logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Enables or disables logging of sample values and prompts.
pub fn set_log_data(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Release);
}

/// Returns true if data logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Acquire)
}

/// Returns the input value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}
