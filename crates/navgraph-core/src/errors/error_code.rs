//! NavgraphErrorCode trait for structured error codes.

/// Trait giving every navgraph error a stable code string.
/// Orchestrating pipelines match on the code instead of the message.
pub trait NavgraphErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ENTRY_POINT_NOT_FOUND: &str = "ENTRY_POINT_NOT_FOUND";
pub const NOT_A_MENU_ITEM: &str = "NOT_A_MENU_ITEM";
pub const SINK_ERROR: &str = "SINK_ERROR";
pub const SINK_REJECTED: &str = "SINK_REJECTED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
