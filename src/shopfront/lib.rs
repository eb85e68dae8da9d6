//! # Shopfront Architecture
//!
//! Shopfront is a **UI-agnostic storefront engine**. It holds the logic a shop
//! page would otherwise bury in view code: the faceted product listing and the
//! cart math around it. The bundled CLI is one client of the library, not the
//! point of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (query strings, line selectors)        │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Listing, cart, saved items, shipping, checkout, config   │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filter Engine (filter/)                                    │
//! │  - Predicate, facet counts, sorting, query-string codec     │
//! │  - Pure functions of (catalog, FilterState)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! The same core could back a web handler or a GUI.
//!
//! ## Testing Strategy
//!
//! 1. **Filter engine** (`filter/*.rs`): properties of the predicate, facets,
//!    sort orders and the query-string round trip.
//! 2. **Commands** (`commands/*.rs`): business logic against `InMemoryStore`.
//!    This is where most tests live.
//! 3. **API** (`api.rs`): dispatch and input normalization.
//! 4. **CLI** (`tests/`): end-to-end runs of the binary on a temp data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`filter`]: The faceted filtering engine
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Product`, `CartItem`, `Gender`)
//! - [`config`]: Shop settings and coupons
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod store;
