//! Logging targets for Horizon Spinner.
//!
//! Horizon Spinner uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_spinner=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_spinner_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_spinner_core::signal";
    /// Spin model target (value changes, bound updates).
    pub const MODEL: &str = "horizon_spinner::model";
    /// Text formatting and parsing target.
    pub const FORMAT: &str = "horizon_spinner::format";
    /// Editor glue target.
    pub const EDITOR: &str = "horizon_spinner::editor";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_spinner::config";
}
