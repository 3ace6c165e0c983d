//! HTTP protocol implementation.
//!
//! This module implements the single-request HTTP pipeline: each accepted
//! connection is read once, answered once, and closed.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection handler driving the state machine
//! - **`parser`**: Extracts the resource path token from a request line
//! - **`reader`**: Consumes the inbound stream line by line until the header block ends
//! - **`request`**: The two-state request target (path captured vs. absent)
//! - **`response`**: Status codes and the fixed-order response header block
//! - **`writer`**: Serializes and writes header blocks to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Consume request lines until the blank line
//!        └──────┬──────┘
//!               │ Target captured (or absent)
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Resolve resource, write header, write body
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │    Flushing      │ ← Flush and shut the stream down
//!        └──────┬───────────┘
//!               │
//!               ▼ Closed (always — no keep-alive)
//! ```
//!
//! The machine never re-enters an earlier state: one request per connection,
//! matching the `Connection: close` the header advertises.

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
