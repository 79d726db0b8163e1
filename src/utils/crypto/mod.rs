//! Cryptographic utilities
//!
//! Payload integrity for agent/server exchanges: HMAC-SHA256 over the JSON
//! body, hex encoded into the `HashSHA256` header.

pub mod hmac;

pub use hmac::{HASH_HEADER, Signer};
