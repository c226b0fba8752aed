//! Hueloupe - value studies and color sampling over HTTP
//!
//! Service layer around the `value_study` engine: image decoding, PNG
//! encoding, result caching, viewport sessions and the HTTP API.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
