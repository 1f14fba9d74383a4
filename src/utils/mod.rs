//! # Utility Modules
//!
//! Supporting utilities shared by every codec.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` setup driven by [`crate::config::LoggingConfig`]
//! - **Metrics**: Thread-safe decode and encode counters

pub mod logging;
pub mod metrics;

pub use metrics::{CodecMetrics, MetricsSnapshot};
