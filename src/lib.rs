//! In-memory product catalogue served over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │               PRODUCT SERVICE                │
//!                     │                                              │
//!   Client Request    │  ┌──────────┐    ┌──────────┐    ┌────────┐  │
//!   ──────────────────┼─▶│  http    │───▶│ handlers │───▶│  repo  │  │
//!                     │  │  server  │    │ validate │    │ RwLock │  │
//!                     │  └──────────┘    └──────────┘    └────────┘  │
//!   Client Response   │        ▲               │                     │
//!   ◀─────────────────┼────────┴── response ◀──┘                     │
//!                     │                                              │
//!                     │  config · lifecycle · observability          │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! The repository is built once at startup and handed to the HTTP layer as an
//! `Arc<dyn ProductRepository>`; nothing in the crate is a global singleton
//! apart from the tracing subscriber and metrics recorder installed by `main`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod repository;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use model::{Product, ProductId};
pub use repository::{InMemoryProductRepository, ProductRepository, RepositoryError};
