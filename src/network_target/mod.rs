//! Network log target.
//!
//! This module defines `NetworkTarget`, which encodes each
//! [`LogEntry`](crate::log_entry::LogEntry) into a fixed binary frame and
//! writes it to a TCP connection with a single send per entry. The framing
//! helpers are public so collectors can decode the stream.

mod backoff;
mod config;
pub mod protocol;
mod target;
mod transport;

#[cfg(test)]
mod tests;

pub use config::{BackoffPolicy, NetworkTargetConfig};
pub use protocol::{HEADER_LEN, WireError, WireFrame, decode_frame, encode_frame, read_frame};
pub use target::NetworkTarget;
pub use transport::{Endpoint, NetworkTargetError};
