//! Content resolution and body emission.
//!
//! - **`resolve`**: normalizes client-supplied paths and pins them under the
//!   document root
//! - **`emitter`**: streams resolved files with marker substitution, and
//!   emits the default landing page and the 404 response

pub mod emitter;
pub mod resolve;

pub use emitter::ContentEmitter;
