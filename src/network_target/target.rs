//! Public target type exported by the crate.

use std::{
    io::Write,
    net::{Shutdown, SocketAddr, TcpStream},
    time::Instant,
};

use log::warn;
use parking_lot::Mutex;

use crate::{
    level::SeverityLevel,
    log_entry::LogEntry,
    target::{LogTarget, TargetError},
};

use super::{
    backoff::BackoffState,
    config::NetworkTargetConfig,
    protocol::encode_frame,
    transport::{Endpoint, NetworkTargetError, connect},
};

struct Connection {
    stream: Option<TcpStream>,
    backoff: BackoffState,
}

/// Target shipping one frame per entry to a remote collector over TCP.
///
/// The connection is established eagerly; failing to connect is an error at
/// construction. A write failure drops the entry and the broken connection;
/// later entries reconnect once the backoff delay has passed.
pub struct NetworkTarget {
    threshold: SeverityLevel,
    endpoint: Endpoint,
    config: NetworkTargetConfig,
    connection: Mutex<Connection>,
}

impl NetworkTarget {
    /// Connect to `host:port` with the default configuration.
    pub fn connect(
        threshold: SeverityLevel,
        host: impl Into<String>,
        port: u16,
    ) -> Result<Self, NetworkTargetError> {
        Self::with_config(threshold, Endpoint::new(host, port), NetworkTargetConfig::default())
    }

    /// Connect to `endpoint` using an explicit configuration.
    pub fn with_config(
        threshold: SeverityLevel,
        endpoint: Endpoint,
        config: NetworkTargetConfig,
    ) -> Result<Self, NetworkTargetError> {
        let stream = open_stream(&endpoint, &config)?;
        Ok(Self {
            threshold,
            connection: Mutex::new(Connection {
                stream: Some(stream),
                backoff: BackoffState::new(config.backoff.clone()),
            }),
            endpoint,
            config,
        })
    }

    /// Address of the live connection, if any.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.connection
            .lock()
            .stream
            .as_ref()
            .and_then(|s| s.peer_addr().ok())
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

fn open_stream(
    endpoint: &Endpoint,
    config: &NetworkTargetConfig,
) -> Result<TcpStream, NetworkTargetError> {
    let stream = connect(endpoint, config.connect_timeout)?;
    if let Err(err) = stream.set_write_timeout(Some(config.write_timeout)) {
        warn!("NetworkTarget: could not set write timeout: {err}");
    }
    Ok(stream)
}

impl Connection {
    fn ensure_stream(
        &mut self,
        endpoint: &Endpoint,
        config: &NetworkTargetConfig,
    ) -> Result<&mut TcpStream, TargetError> {
        if self.stream.is_none() {
            let now = Instant::now();
            if !self.backoff.may_attempt(now) {
                return Err(TargetError::Disconnected);
            }
            match open_stream(endpoint, config) {
                Ok(stream) => {
                    self.backoff.record_success();
                    self.stream = Some(stream);
                }
                Err(err) => {
                    let delay = self.backoff.record_failure(now);
                    warn!("NetworkTarget: reconnect failed: {err}; next attempt in {delay:?}");
                    return Err(TargetError::Disconnected);
                }
            }
        }
        self.stream.as_mut().ok_or(TargetError::Disconnected)
    }
}

impl LogTarget for NetworkTarget {
    fn threshold(&self) -> SeverityLevel {
        self.threshold
    }

    fn write(&self, entry: &LogEntry) -> Result<(), TargetError> {
        let frame = encode_frame(entry);
        let mut conn = self.connection.lock();
        let stream = conn.ensure_stream(&self.endpoint, &self.config)?;
        if let Err(err) = stream.write_all(&frame) {
            if let Some(broken) = conn.stream.take() {
                let _ = broken.shutdown(Shutdown::Both);
            }
            conn.backoff.record_failure(Instant::now());
            return Err(err.into());
        }
        Ok(())
    }

    fn flush(&self) -> bool {
        self.connection
            .lock()
            .stream
            .as_mut()
            .is_some_and(|s| s.flush().is_ok())
    }
}

impl Drop for NetworkTarget {
    fn drop(&mut self) {
        if let Some(stream) = self.connection.get_mut().stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

impl std::fmt::Debug for NetworkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkTarget")
            .field("threshold", &self.threshold)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
