//! Payload codecs

pub mod gzip;

pub use gzip::{GZIP, compress};
#[cfg(test)]
pub use gzip::decompress;
