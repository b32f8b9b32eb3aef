//! `UniKhoj` HTTP server.
//!
//! Wires the lead store and HTTP routes into an Axum application serving
//! `POST /api/leads` and `GET /api/health`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
