//! nflgate - HTTP gateway exposing NFL data loaders as JSON endpoints
//!
//! Remote callers invoke named loaders with keyword parameters over HTTP
//! and receive tabular or scalar results as JSON.

pub mod api;
pub mod cli;
pub mod config;
pub mod frame;
pub mod loaders;
pub mod registry;
pub mod server;
