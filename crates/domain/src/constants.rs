//! Protocol constants
//!
//! Response codes, endpoint details and defaults shared by every layer.

// Response codes (leading digit is the status class)
pub const CODE_SUCCESS: &str = "1000";
pub const CODE_ACCEPTED: &str = "1001";
pub const CODE_PARSE_ERROR: &str = "9999";
pub const CODE_POLL_TIMEOUT: &str = "9998";

// HTTP endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.wedos.com/wapi";
pub const REQUEST_FORM_FIELD: &str = "request";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Polling defaults
pub const DEFAULT_POLL_ATTEMPTS: u32 = 60;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

// Reference clock
pub const DEFAULT_TIMEZONE: &str = "Europe/Prague";
pub const FALLBACK_UTC_OFFSET_HOURS: i32 = 1;

// Logging
pub const REDACTION_MARKER: &str = "[REDACTED]";

// Registry object handles (NSSET names) are limited to this many characters
pub const MAX_HANDLE_LENGTH: usize = 30;
