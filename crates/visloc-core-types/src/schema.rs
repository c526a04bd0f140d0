//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the logging macros,
//! the error facility and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Store addressing
pub const FIELD_KEY: &str = "key";
pub const FIELD_THING: &str = "thing";
pub const FIELD_QUEUE_LEN: &str = "queue_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Operation names owned by the requester boundary
pub const OP_LOCATE: &str = "locate";
pub const OP_CLEAR_COMMANDS: &str = "clear_commands";
pub const OP_GET_LOCATION: &str = "get_location";
pub const OP_PENDING_COMMANDS: &str = "pending_commands";
