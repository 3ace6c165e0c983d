//! staticd - Minimal static file responder
//!
//! Core library for the per-connection request/response pipeline.

pub mod config;
pub mod content;
pub mod http;
pub mod server;
