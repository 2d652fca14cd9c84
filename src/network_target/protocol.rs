//! Binary framing for entries shipped to a remote collector.
//!
//! Every entry becomes exactly one frame:
//!
//! ```text
//! [u32 BE message length][u64 BE epoch seconds][u32 BE severity][u32 BE bare flag][message bytes]
//! ```
//!
//! The message is UTF-8, neither null-terminated nor length-prefixed again.
//! Messages longer than `u32::MAX` bytes are truncated to that length.

use std::io::{self, Read};

use thiserror::Error;

use crate::level::{InvalidSeverity, SeverityLevel};
use crate::log_entry::LogEntry;

/// Size of the fixed frame header in bytes.
pub const HEADER_LEN: usize = 20;

/// Errors raised while decoding a frame.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("frame truncated: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error(transparent)]
    InvalidSeverity(#[from] InvalidSeverity),
    #[error("invalid bare flag {0}")]
    InvalidBareFlag(u32),
    #[error("message payload is not valid UTF-8")]
    InvalidUtf8,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decoded contents of one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireFrame {
    pub timestamp: i64,
    pub level: SeverityLevel,
    pub is_bare: bool,
    pub message: String,
}

/// Length actually written for a message of `len` bytes.
pub fn clamp_message_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Encode raw fields into a frame.
pub fn encode_parts(timestamp: i64, level: SeverityLevel, is_bare: bool, message: &str) -> Vec<u8> {
    let len = clamp_message_len(message.len());
    let body = &message.as_bytes()[..len as usize];
    let mut frame = Vec::with_capacity(HEADER_LEN + body.len());
    frame.extend(len.to_be_bytes());
    // Epoch seconds travel as their two's complement bit pattern.
    frame.extend((timestamp as u64).to_be_bytes());
    frame.extend(level.ordinal().to_be_bytes());
    frame.extend(u32::from(is_bare).to_be_bytes());
    frame.extend_from_slice(body);
    frame
}

/// Encode an entry into a single frame.
pub fn encode_frame(entry: &LogEntry) -> Vec<u8> {
    encode_parts(entry.timestamp(), entry.level(), entry.is_bare(), entry.message())
}

struct Header {
    len: usize,
    timestamp: i64,
    level: SeverityLevel,
    is_bare: bool,
}

fn be_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_be_bytes(buf)
}

fn be_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(buf)
}

fn parse_header(header: &[u8; HEADER_LEN]) -> Result<Header, WireError> {
    let level = SeverityLevel::try_from(be_u32(&header[12..16]))?;
    let is_bare = match be_u32(&header[16..20]) {
        0 => false,
        1 => true,
        other => return Err(WireError::InvalidBareFlag(other)),
    };
    Ok(Header {
        len: be_u32(&header[0..4]) as usize,
        timestamp: be_u64(&header[4..12]) as i64,
        level,
        is_bare,
    })
}

fn into_frame(header: Header, body: Vec<u8>) -> Result<WireFrame, WireError> {
    let message = String::from_utf8(body).map_err(|_| WireError::InvalidUtf8)?;
    Ok(WireFrame {
        timestamp: header.timestamp,
        level: header.level,
        is_bare: header.is_bare,
        message,
    })
}

/// Decode one frame from the start of `bytes`.
///
/// Returns the frame and the number of bytes it occupied so callers can
/// walk a buffer holding several frames.
pub fn decode_frame(bytes: &[u8]) -> Result<(WireFrame, usize), WireError> {
    let Some(header_bytes) = bytes.first_chunk::<HEADER_LEN>() else {
        return Err(WireError::Truncated {
            needed: HEADER_LEN,
            available: bytes.len(),
        });
    };
    let header = parse_header(header_bytes)?;
    let total = HEADER_LEN + header.len;
    if bytes.len() < total {
        return Err(WireError::Truncated {
            needed: total,
            available: bytes.len(),
        });
    }
    let body = bytes[HEADER_LEN..total].to_vec();
    Ok((into_frame(header, body)?, total))
}

/// Read one frame from a stream, blocking until it is complete.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<WireFrame, WireError> {
    let mut header_bytes = [0u8; HEADER_LEN];
    reader.read_exact(&mut header_bytes)?;
    let header = parse_header(&header_bytes)?;
    // Grow with the bytes that actually arrive instead of trusting the length.
    let mut body = Vec::new();
    reader.by_ref().take(header.len as u64).read_to_end(&mut body)?;
    if body.len() < header.len {
        return Err(WireError::Truncated {
            needed: HEADER_LEN + header.len,
            available: HEADER_LEN + body.len(),
        });
    }
    into_frame(header, body)
}
