//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the store produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for log aggregation)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metric labels are bounded: unknown event types collapse to "other"

pub mod logging;
pub mod metrics;
