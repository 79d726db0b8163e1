//! Utility modules
//!
//! - **codec**: gzip encoding of payloads
//! - **crypto**: HMAC signing of payloads
//! - **error**: error taxonomy and retry with backoff
//! - **logging**: tracing subscriber setup
//! - **signal**: shutdown signal handling

pub mod codec;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod signal;

pub use logging::init_tracing;
pub use signal::shutdown_signal;
