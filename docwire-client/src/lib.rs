//! # docwire-client
//!
//! Client library for docwire.
//!
//! This crate provides:
//! - Command-source reading (file or standard input, accumulated to EOF)
//! - A single-request TCP connection with length-prefixed framing
//! - Response text decoding into native strings

pub mod client;
pub mod connection;
pub mod error;
pub mod source;

pub use client::Client;
pub use connection::{Connection, ConnectionConfig};
pub use error::ClientError;
pub use source::CommandSource;
