//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - The subscriber is built once in `main` and is the only logger; nothing
//!   in the library holds a logger handle of its own
//! - Request ID flows through every request span
//! - Metric updates are plain macro calls; without an installed recorder they are no-ops

pub mod logging;
pub mod metrics;
