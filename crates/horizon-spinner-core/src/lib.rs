//! Core systems for Horizon Spinner.
//!
//! This crate provides the foundational pieces shared by the spinner models
//! and editors:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Logging**: `tracing` target names for filtering spinner logs
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_spinner_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
