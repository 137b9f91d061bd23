//! HTTP service for the weather lookup & favorites app.
//!
//! Exposes current-weather and forecast lookups plus favorites CRUD over
//! the endpoints described in the router. The binary in `main.rs` wires
//! config, database and upstream clients together; tests mount the same
//! router against mock upstreams.

pub mod endpoints;
pub mod router;
pub mod state;
pub mod types;
